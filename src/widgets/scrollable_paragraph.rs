// src/widgets/scrollable_paragraph.rs
#[derive(Debug, Default, Clone)]
pub struct ScrollableParagraphState {
    pub content: String,
    pub scroll_offset_vertical: u16,
    // Inner size of the area the paragraph was last laid out in.
    pub width: u16,
    pub height: u16,
}

impl ScrollableParagraphState {
    pub fn new(content: String) -> Self {
        Self { content, ..Self::default() }
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.scroll_offset_vertical = 0; // Reset scroll when content changes
    }

    pub fn set_dimensions(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll_offset_vertical = self.scroll_offset_vertical.min(self.max_scroll());
    }

    /// Rows the content occupies once wrapped to `width`. Approximate for wide glyphs.
    pub fn wrapped_line_count(&self) -> u16 {
        let width = usize::from(self.width.max(1));
        let rows: usize = self
            .content
            .lines()
            .map(|line| {
                let w = unicode_width::UnicodeWidthStr::width(line);
                w.div_ceil(width).max(1)
            })
            .sum();
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    pub fn max_scroll(&self) -> u16 {
        self.wrapped_line_count().saturating_sub(self.height)
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset_vertical = self.scroll_offset_vertical.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset_vertical =
            self.scroll_offset_vertical.saturating_add(amount).min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_capped_by_content() {
        let mut state = ScrollableParagraphState::new("a\nb\nc\nd\ne".to_string());
        state.set_dimensions(10, 3);
        state.scroll_down(10);
        assert_eq!(state.scroll_offset_vertical, 2);
        state.scroll_up(5);
        assert_eq!(state.scroll_offset_vertical, 0);
    }

    #[test]
    fn test_long_lines_wrap() {
        let mut state = ScrollableParagraphState::new("x".repeat(25));
        state.set_dimensions(10, 1);
        assert_eq!(state.wrapped_line_count(), 3);
        state.scroll_down(1);
        assert_eq!(state.scroll_offset_vertical, 1);
    }

    #[test]
    fn test_new_content_resets_scroll() {
        let mut state = ScrollableParagraphState::new("1\n2\n3\n4".to_string());
        state.set_dimensions(5, 1);
        state.scroll_down(2);
        state.set_content("other".to_string());
        assert_eq!(state.scroll_offset_vertical, 0);
    }
}
