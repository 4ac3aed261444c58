// src/terminal_ui.rs
use crate::app::{App, FilterRow, FocusedPanel, InputMode, LoadState};
use crate::position::{AxisRange, marker_column};
use crate::timeline::PositionedEvent;
use crate::timeline_event::{Axis, TimelineEvent};
use chrono::{DateTime, Datelike, Duration, Utc};
use log::warn;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use std::rc::Rc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MARKER: &str = "●";
const OFFSCREEN_LEFT: &str = "◀";
const OFFSCREEN_RIGHT: &str = "▶";
const DETAIL_MAX_WIDTH: u16 = 84;

/// Converts HTML show notes to plain text; anything else passes through.
pub fn format_content(content: &str) -> String {
    const DEFAULT_TEXT_WIDTH: usize = 80;
    if content.contains('<') && content.contains('>') && content.contains("</") {
        match html2text::from_read(content.as_bytes(), DEFAULT_TEXT_WIDTH) {
            Ok(text_content) => text_content
                .lines()
                .map(|line| line.trim_end())
                .filter(|line| !line.is_empty())
                .collect::<Vec<&str>>()
                .join("\n"),
            Err(e) => {
                warn!("Failed to convert HTML content with html2text: {}", e);
                content.to_string()
            }
        }
    } else {
        content.to_string()
    }
    .trim()
    .to_string()
}

/// Body of the detail modal.
pub fn event_detail_text(event: &TimelineEvent) -> String {
    let mut lines: Vec<String> = vec![
        format!("Director : {}", event.director()),
        format!("Released : {}", event.date().format("%Y-%m-%d")),
        format!("Episode  : #{} ({})", event.episode_number(), event.episode_date().format("%Y-%m-%d")),
    ];
    if !event.tags().is_empty() {
        lines.push(format!("Genres   : {}", event.tags().join(", ")));
    }
    if !event.description().is_empty() {
        lines.push(String::new());
        lines.push(event.description().to_string());
    }
    let content = format_content(event.content());
    if !content.is_empty() {
        lines.push(String::new());
        lines.push(content);
    }
    if !event.links().is_empty() {
        lines.push(String::new());
        lines.push("Links".to_string());
        for link in event.links() {
            let text = if link.text.is_empty() { link.url.as_str() } else { link.text.as_str() };
            lines.push(format!("  {} <{}>", text, link.url));
        }
    }
    lines.join("\n")
}

/// Cuts `text` to `max_width` display columns, ending in '…' when shortened.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn time_at_column(range: &AxisRange, column: u16, track_width: u16) -> DateTime<Utc> {
    if track_width <= 1 {
        return range.min;
    }
    let span_ms = (range.max - range.min).num_milliseconds() as f64;
    let fraction = f64::from(column.min(track_width - 1)) / f64::from(track_width - 1);
    range.min + Duration::milliseconds((span_ms * fraction) as i64)
}

fn track_width(width: u16, zoom: f64) -> u16 {
    let track = (f64::from(width) * zoom.max(1.0)).round();
    track.min(f64::from(u16::MAX)) as u16
}

/// Year labels at both visible edges of the track joined by a rule.
pub fn ruler_line(range: Option<&AxisRange>, width: u16, zoom: f64, scroll: u16) -> String {
    let width_usize = usize::from(width);
    let Some(range) = range else {
        return " ".repeat(width_usize);
    };
    let track = track_width(width, zoom);
    let left = time_at_column(range, scroll, track).year().to_string();
    let right = time_at_column(range, scroll.saturating_add(width.saturating_sub(1)), track).year().to_string();
    let fill = width_usize.saturating_sub(left.len() + right.len() + 2);
    if fill == 0 {
        return truncate_to_width(&left, width_usize);
    }
    format!("{} {} {}", left, "─".repeat(fill), right)
}

fn event_label(positioned: &PositionedEvent, axis: Axis) -> String {
    let event = &positioned.event;
    format!("{} ({}) #{}", event.title(), event.timestamp(axis).year(), event.episode_number())
}

/// One timeline row: the marker at its zoomed column, label beside it.
pub fn timeline_row(
    positioned: &PositionedEvent,
    axis: Axis,
    color: Color,
    width: u16,
    zoom: f64,
    scroll: u16,
    is_cursor: bool,
) -> Line<'static> {
    let width_usize = usize::from(width);
    let label_style = if is_cursor {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let marker_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let label = event_label(positioned, axis);

    let column = marker_column(positioned.position, width, zoom);
    if column < scroll || column - scroll >= width {
        let arrow = if column < scroll { OFFSCREEN_LEFT } else { OFFSCREEN_RIGHT };
        return Line::from(vec![
            Span::styled(format!("{} ", arrow), marker_style),
            Span::styled(truncate_to_width(&label, width_usize.saturating_sub(2)), label_style),
        ]);
    }

    let offset = usize::from(column - scroll);
    let room_right = width_usize.saturating_sub(offset + 2);
    if label.width() > room_right && offset > label.width() + 1 {
        // Not enough room on the right: put the label before the marker.
        let lead = offset - label.width() - 1;
        return Line::from(vec![
            Span::raw(" ".repeat(lead)),
            Span::styled(label, label_style),
            Span::raw(" "),
            Span::styled(MARKER.to_string(), marker_style),
        ]);
    }

    Line::from(vec![
        Span::raw(" ".repeat(offset)),
        Span::styled(MARKER.to_string(), marker_style),
        Span::raw(" "),
        Span::styled(truncate_to_width(&label, room_right), label_style),
    ])
}

pub struct LayoutChunks {
    pub controls_chunk: Rect,
    pub filters_chunk: Rect,
    pub timeline_chunk: Rect,
    pub hint_chunk: Rect,
}

pub fn compute_layout(frame_size: Rect) -> LayoutChunks {
    let main_chunks: Rc<[Rect]> = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(frame_size);

    let content_columns: Rc<[Rect]> = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(main_chunks[1]);

    LayoutChunks {
        controls_chunk: main_chunks[0],
        filters_chunk: content_columns[0],
        timeline_chunk: content_columns[1],
        hint_chunk: main_chunks[2],
    }
}

/// Helper to create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn detail_area(frame_size: Rect) -> Rect {
    let width = frame_size.width.saturating_sub(4).min(DETAIL_MAX_WIDTH);
    let height = frame_size.height.saturating_sub(4);
    centered_rect(width, height, frame_size)
}

/// Updates layout-dependent state outside the draw closure: modal size and
/// horizontal scroll of the zoomed track.
pub fn prepare_ui_layout(app: &mut App, frame_size: Rect) {
    let layout_chunks = compute_layout(frame_size);

    let timeline_inner = Block::default().borders(Borders::ALL).inner(layout_chunks.timeline_chunk);
    let width = timeline_inner.width;
    let track = track_width(width, app.filters.zoom);
    let max_scroll = track.saturating_sub(width);

    if app.follow_cursor {
        if let Some(positioned) = app.view.visible_events.get(app.event_cursor) {
            let column = marker_column(positioned.position, width, app.filters.zoom);
            if column < app.horizontal_scroll || column >= app.horizontal_scroll.saturating_add(width) {
                app.horizontal_scroll = column.saturating_sub(width / 2);
            }
        }
        app.follow_cursor = false;
    }
    app.horizontal_scroll = app.horizontal_scroll.min(max_scroll);

    let detail_inner = Block::default().borders(Borders::ALL).inner(detail_area(frame_size));
    app.detail_state.set_dimensions(detail_inner.width, detail_inner.height);
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let layout_chunks = compute_layout(f.size());

    // === Define Styles ===
    let default_style: Style = Style::default().fg(Color::White);
    let focused_style: Style = Style::default().fg(Color::Cyan);
    let dim_style: Style = Style::default().fg(Color::DarkGray);

    // ================================= Controls Bar ==============================================
    let search_text = match app.input_mode {
        InputMode::Search => format!("{}_", app.filters.search_term),
        InputMode::Normal if app.filters.search_term.is_empty() => "-".to_string(),
        InputMode::Normal => app.filters.search_term.clone(),
    };
    let status_text = match &app.load_state {
        LoadState::Loading => "loading…".to_string(),
        LoadState::Failed(_) => "no data".to_string(),
        LoadState::Loaded => format!("{}/{} events", app.view.len(), app.timeline.events().len()),
    };
    let controls_line = Line::from(vec![
        Span::styled("Axis: ", dim_style),
        Span::styled(app.filters.axis.label(), default_style),
        Span::styled("  View: ", dim_style),
        Span::styled(app.filters.category_view.label(), default_style),
        Span::styled("  Zoom: ", dim_style),
        Span::styled(format!("{:.1}x", app.filters.zoom), default_style),
        Span::styled("  Search: ", dim_style),
        Span::styled(
            search_text,
            if app.input_mode == InputMode::Search { focused_style } else { default_style },
        ),
        Span::styled("  ", dim_style),
        Span::styled(status_text, Style::default().fg(Color::LightGreen)),
    ]);
    let controls_widget = Paragraph::new(controls_line).block(
        Block::default()
            .title("Film Timeline")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(controls_widget, layout_chunks.controls_chunk);

    // ================================= Filters Panel (Left) ======================================
    let is_filters_focused = app.focused_panel == FocusedPanel::Filters;
    let filter_items: Vec<ListItem> = app
        .filter_rows
        .iter()
        .map(|row| match row {
            FilterRow::Header(label) => ListItem::new(Line::from(Span::styled(
                label.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))),
            FilterRow::Director(name) => filter_item(
                name,
                app.filters.selected_directors.contains(name),
                app.timeline.color_for(name),
            ),
            FilterRow::Tag(tag) => filter_item(
                tag,
                app.filters.selected_tags.contains(tag),
                app.timeline.color_for(tag),
            ),
        })
        .collect();
    let filters_title = if app.filters.has_active_filters() { "Filters (c: clear)" } else { "Filters" };
    let filters_list = List::new(filter_items)
        .block(
            Block::default()
                .title(filters_title)
                .borders(Borders::ALL)
                .border_style(if is_filters_focused { focused_style } else { default_style }),
        )
        .highlight_style(if is_filters_focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::LightCyan)
        })
        .highlight_symbol(if is_filters_focused { ">> " } else { "   " });
    f.render_stateful_widget(filters_list, layout_chunks.filters_chunk, &mut app.filter_list_state);

    // ================================ Timeline Panel (Right) =====================================
    let is_timeline_focused = app.focused_panel == FocusedPanel::Timeline;
    let timeline_block = Block::default()
        .title(format!("Timeline: {}", app.filters.axis.label()))
        .borders(Borders::ALL)
        .border_style(if is_timeline_focused { focused_style } else { default_style });
    let timeline_inner = timeline_block.inner(layout_chunks.timeline_chunk);
    f.render_widget(timeline_block, layout_chunks.timeline_chunk);

    let empty_message = match &app.load_state {
        LoadState::Loading => Some("Loading..."),
        LoadState::Failed(_) => Some("No data: the dataset could not be loaded"),
        LoadState::Loaded if app.timeline.is_empty() => Some("No data"),
        LoadState::Loaded if app.view.is_empty() => Some("No events match the current filters"),
        LoadState::Loaded => None,
    };
    match empty_message {
        Some(message) => render_empty_state(f, timeline_inner, message),
        None => render_timeline_rows(f, app, timeline_inner),
    }

    // =============================== Hint Bar Panel (Bottom) =====================================
    let hint_text: &str = if app.input_mode == InputMode::Search {
        "Type to search | [Backspace] Delete | [Enter/Esc] Done"
    } else if app.is_detail_open() {
        "[↑/↓/PgUp/PgDn] Scroll | [Esc/Enter] Close | [Q] Quit"
    } else {
        "[Tab] Panel | [↑/↓] Move | [Space] Toggle | [Enter] Details | [/] Search | [a] Axis | [v] View | [+/-/0] Zoom | [←/→] Pan | [Q] Quit"
    };
    let hint_widget = Paragraph::new(hint_text).style(dim_style).alignment(Alignment::Center);
    f.render_widget(hint_widget, layout_chunks.hint_chunk);

    // ==================================== Detail Modal ===========================================
    if let Some(event) = app.selected_event().cloned() {
        let area = detail_area(f.size());
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(MARKER, Style::default().fg(app.timeline.color_for(event.director()))),
                Span::raw(" "),
                Span::styled(event.title().to_string(), Style::default().add_modifier(Modifier::BOLD)),
            ]))
            .borders(Borders::ALL)
            .border_style(focused_style)
            .style(Style::default().bg(Color::Black));
        let paragraph = Paragraph::new(app.detail_state.content.clone())
            .wrap(Wrap { trim: false })
            .style(default_style)
            .block(block)
            .scroll((app.detail_state.scroll_offset_vertical, 0));
        f.render_widget(paragraph, area);
    }
}

fn filter_item(name: &str, selected: bool, color: Color) -> ListItem<'static> {
    let check = if selected { "[x] " } else { "[ ] " };
    ListItem::new(Line::from(vec![
        Span::raw(check),
        Span::styled("■ ", Style::default().fg(color)),
        Span::raw(name.to_string()),
    ]))
}

fn render_timeline_rows(f: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let width = area.width;
    let zoom = app.filters.zoom;
    let scroll = app.horizontal_scroll;
    let axis = app.view.axis;

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        ruler_line(app.view.range.as_ref(), width, zoom, scroll),
        Style::default().fg(Color::DarkGray),
    ))];

    let rows = usize::from(area.height.saturating_sub(1));
    let first = if app.event_cursor >= rows { app.event_cursor + 1 - rows } else { 0 };
    lines.extend(app.view.visible_events.iter().enumerate().skip(first).take(rows).map(
        |(i, positioned)| {
            let color = app.timeline.color_for(positioned.event.director());
            timeline_row(positioned, axis, color, width, zoom, scroll, i == app.event_cursor)
        },
    ));

    f.render_widget(Paragraph::new(lines), area);
}

fn render_empty_state(f: &mut Frame, area: Rect, message: &str) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    let centered = Rect::new(area.x, y, area.width, 1);
    let paragraph =
        Paragraph::new(message).style(Style::default().fg(Color::DarkGray)).alignment(Alignment::Center);
    f.render_widget(paragraph, centered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_dataset;
    use crate::event::AppEvent;
    use crate::timeline_event::test_support::{event, ymd};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_format_content_strips_html() {
        let text = format_content("<p>Hello <b>world</b></p>");
        assert!(text.contains("Hello"));
        assert!(!text.contains("<p>"));
        assert_eq!(format_content("  plain text  "), "plain text");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Alien", 10), "Alien");
        assert_eq!(truncate_to_width("The Shining", 6), "The S…");
        assert_eq!(truncate_to_width("Anything", 0), "");
    }

    #[test]
    fn test_marker_lands_at_its_column() {
        let positioned = PositionedEvent { event: event(1, "Ridley Scott", &[], ymd(1979, 1, 1)), position: 50.0 };
        let line = timeline_row(&positioned, Axis::Film, Color::Red, 21, 1.0, 0, false);
        let text = line_text(&line);
        assert_eq!(text.chars().position(|c| c == '●'), Some(10));
    }

    #[test]
    fn test_label_moves_left_near_the_end() {
        let positioned = PositionedEvent { event: event(1, "Ridley Scott", &[], ymd(1979, 1, 1)), position: 100.0 };
        let line = timeline_row(&positioned, Axis::Film, Color::Red, 40, 1.0, 0, false);
        let text = line_text(&line);
        assert!(text.ends_with('●'));
        assert!(text.contains("Film 1 (1979)"));
    }

    #[test]
    fn test_offscreen_marker_shows_arrow() {
        let positioned = PositionedEvent { event: event(1, "Ridley Scott", &[], ymd(1979, 1, 1)), position: 0.0 };
        let line = timeline_row(&positioned, Axis::Film, Color::Red, 20, 3.0, 10, false);
        assert!(line_text(&line).starts_with(OFFSCREEN_LEFT));
    }

    #[test]
    fn test_ruler_spans_the_range() {
        let range = AxisRange { min: ymd(1950, 1, 1), max: ymd(2020, 1, 1) };
        let ruler = ruler_line(Some(&range), 30, 1.0, 0);
        assert!(ruler.starts_with("1950"));
        assert!(ruler.ends_with("2020"));
        assert_eq!(ruler.width(), 30);
    }

    #[test]
    fn test_detail_text_lists_links_and_tags() {
        let events = parse_dataset(
            r#"[{"id": 1, "title": "Alien", "director": "Ridley Scott", "date": "1979-05-25",
                 "episodeDate": "2022-03-01", "episodeNumber": "12", "tags": ["Sci-Fi", "Horror"],
                 "links": [{"url": "https://example.com/ep12", "text": "Listen"}]}]"#,
        )
        .unwrap();
        let text = event_detail_text(&events[0]);
        assert!(text.contains("Director : Ridley Scott"));
        assert!(text.contains("Genres   : Sci-Fi, Horror"));
        assert!(text.contains("Listen <https://example.com/ep12>"));
        assert!(text.contains("#12 (2022-03-01)"));
    }

    #[test]
    fn test_ui_renders_every_state() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = App::new();

        let size = terminal.size().unwrap();
        prepare_ui_layout(&mut app, size);
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        app.handle_app_event(AppEvent::DatasetLoaded {
            events: parse_dataset(
                r#"[{"id": 1, "title": "Alien", "director": "Ridley Scott", "date": "1979-05-25",
                     "episodeDate": "2022-03-01", "tags": ["Sci-Fi"]},
                    {"id": 2, "title": "Blade Runner", "director": "Ridley Scott", "date": "1982-06-25",
                     "episodeDate": "2022-04-01", "tags": ["Sci-Fi", "Noir"]}]"#,
            )
            .unwrap(),
            timestamp: chrono::Utc::now(),
        });
        app.on_key(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
        app.on_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        prepare_ui_layout(&mut app, size);
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        assert!(app.horizontal_scroll > 0);

        app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        prepare_ui_layout(&mut app, size);
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        assert!(app.is_detail_open());
    }

    #[test]
    fn test_ui_survives_a_tiny_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        let mut app = App::new();
        app.set_events(vec![]);
        let size = terminal.size().unwrap();
        prepare_ui_layout(&mut app, size);
        terminal.draw(|f| ui(f, &mut app)).unwrap();
    }
}
