// src/app.rs
use crate::event::AppEvent;
use crate::filter_state::FilterState;
use crate::terminal_ui::event_detail_text;
use crate::timeline::{Timeline, TimelineView};
use crate::timeline_event::{SharedEvent, TimelineEvent};
use crate::widgets::scrollable_paragraph::ScrollableParagraphState;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, backend::Backend, widgets::ListState};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

const HORIZONTAL_SCROLL_STEP: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum FocusedPanel {
    Filters,
    #[default]
    Timeline,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// One line of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRow {
    Header(String),
    Director(String),
    Tag(String),
}

impl FilterRow {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, FilterRow::Header(_))
    }
}

pub struct App {
    pub should_quit: bool,
    pub load_state: LoadState,
    pub timeline: Timeline,
    pub filters: FilterState,
    pub view: TimelineView,
    pub filter_rows: Vec<FilterRow>,
    pub filter_list_state: ListState,
    pub event_cursor: usize,
    pub focused_panel: FocusedPanel,
    pub input_mode: InputMode,
    pub horizontal_scroll: u16,
    // Set when the cursor moves so the next layout pass scrolls it into view.
    pub follow_cursor: bool,
    pub detail_state: ScrollableParagraphState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        Self::with_filters(FilterState::default())
    }

    pub fn with_filters(filters: FilterState) -> App {
        let timeline = Timeline::new(Vec::new());
        let view = timeline.view(&filters);
        let mut app = App {
            should_quit: false,
            load_state: LoadState::Loading,
            timeline,
            filters,
            view,
            filter_rows: Vec::new(),
            filter_list_state: ListState::default(),
            event_cursor: 0,
            focused_panel: FocusedPanel::default(),
            input_mode: InputMode::default(),
            horizontal_scroll: 0,
            follow_cursor: true,
            detail_state: ScrollableParagraphState::default(),
        };
        app.refresh_view();
        app
    }

    // ===================================== Loading ===============================================

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::DatasetLoaded { events, timestamp } => {
                info!("App: dataset with {} events arrived at {}", events.len(), timestamp);
                self.set_events(events);
            }
            AppEvent::DatasetFailed { error, timestamp } => {
                error!("App: dataset failed to load at {}: {}", timestamp, error);
                self.load_failed(error);
            }
        }
    }

    pub fn set_events(&mut self, events: Vec<TimelineEvent>) {
        self.timeline = Timeline::new(events);
        self.load_state = LoadState::Loaded;
        self.event_cursor = 0;
        self.refresh_view();
    }

    pub fn load_failed(&mut self, message: String) {
        self.timeline = Timeline::new(Vec::new());
        self.load_state = LoadState::Failed(message);
        self.refresh_view();
    }

    // ==================================== Recompute ==============================================

    /// Rebuilds every derived view from the immutable dataset and the current filter state.
    pub fn refresh_view(&mut self) {
        self.view = self.timeline.view(&self.filters);
        self.filter_rows = build_filter_rows(&self.timeline, &self.filters);

        if self.view.is_empty() {
            self.event_cursor = 0;
        } else if self.event_cursor >= self.view.len() {
            self.event_cursor = self.view.len() - 1;
        }

        let filter_cursor = self.filter_list_state.selected().unwrap_or(0);
        self.filter_list_state.select(nearest_selectable(&self.filter_rows, filter_cursor));

        if let Some(id) = self.filters.selected_event {
            match self.view.index_of(id) {
                Some(index) => self.event_cursor = index,
                None => {
                    debug!("App: selected event {:?} filtered out, closing details", id);
                    self.filters.clear_selected_event();
                }
            }
        }
        self.follow_cursor = true;
    }

    // ==================================== Accessors ==============================================

    pub fn cursor_event(&self) -> Option<&SharedEvent> {
        self.view.visible_events.get(self.event_cursor).map(|p| &p.event)
    }

    pub fn selected_event(&self) -> Option<&SharedEvent> {
        self.filters.selected_event.and_then(|id| self.timeline.event(id))
    }

    pub fn is_detail_open(&self) -> bool {
        self.filters.selected_event.is_some()
    }

    pub fn filter_cursor_row(&self) -> Option<&FilterRow> {
        self.filter_list_state.selected().and_then(|i| self.filter_rows.get(i))
    }

    // ==================================== Transitions ============================================

    pub fn open_detail(&mut self) {
        let Some(event) = self.cursor_event().cloned() else {
            return;
        };
        self.filters.select_event(event.id());
        self.detail_state.set_content(event_detail_text(&event));
        self.refresh_view();
    }

    pub fn close_detail(&mut self) {
        self.filters.clear_selected_event();
        self.refresh_view();
    }

    pub fn toggle_filter_at_cursor(&mut self) {
        match self.filter_cursor_row().cloned() {
            Some(FilterRow::Director(name)) => {
                let on = self.filters.toggle_director(&name);
                debug!("App: director '{}' {}", name, if on { "selected" } else { "cleared" });
            }
            Some(FilterRow::Tag(tag)) => {
                let on = self.filters.toggle_tag(&tag);
                debug!("App: tag '{}' {}", tag, if on { "selected" } else { "cleared" });
            }
            Some(FilterRow::Header(_)) | None => return,
        }
        self.refresh_view();
    }

    pub fn toggle_axis(&mut self) {
        self.filters.toggle_axis();
        self.horizontal_scroll = 0;
        self.refresh_view();
    }

    pub fn cycle_category_view(&mut self) {
        self.filters.cycle_category_view();
        self.filter_list_state.select(Some(0));
        self.refresh_view();
    }

    pub fn zoom_in(&mut self) {
        self.filters.zoom_in();
        self.refresh_view();
    }

    pub fn zoom_out(&mut self) {
        self.filters.zoom_out();
        self.refresh_view();
    }

    pub fn reset_zoom(&mut self) {
        self.filters.reset_zoom();
        self.horizontal_scroll = 0;
        self.refresh_view();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_filters();
        self.refresh_view();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filters.push_search_char(c);
        self.refresh_view();
    }

    pub fn pop_search_char(&mut self) {
        self.filters.pop_search_char();
        self.refresh_view();
    }

    // ==================================== Navigation =============================================

    pub fn focus_next_panel(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Filters => FocusedPanel::Timeline,
            FocusedPanel::Timeline => FocusedPanel::Filters,
        };
    }

    pub fn select_next_event(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.event_cursor = (self.event_cursor + 1) % self.view.len();
        self.follow_cursor = true;
    }

    pub fn select_prev_event(&mut self) {
        if self.view.is_empty() {
            return;
        }
        let len = self.view.len();
        self.event_cursor = (self.event_cursor + len - 1) % len;
        self.follow_cursor = true;
    }

    pub fn select_next_filter(&mut self) {
        let start = self.filter_list_state.selected().map_or(0, |i| i + 1);
        let next = (start..self.filter_rows.len())
            .chain(0..start)
            .find(|&i| self.filter_rows[i].is_selectable());
        self.filter_list_state.select(next);
    }

    pub fn select_prev_filter(&mut self) {
        let len = self.filter_rows.len();
        if len == 0 {
            return;
        }
        let current = self.filter_list_state.selected().unwrap_or(0);
        let prev = (0..len)
            .map(|step| (current + len - 1 - step) % len)
            .find(|&i| self.filter_rows[i].is_selectable());
        self.filter_list_state.select(prev);
    }

    pub fn scroll_left(&mut self) {
        self.horizontal_scroll = self.horizontal_scroll.saturating_sub(HORIZONTAL_SCROLL_STEP);
        self.follow_cursor = false;
    }

    pub fn scroll_right(&mut self) {
        self.horizontal_scroll = self.horizontal_scroll.saturating_add(HORIZONTAL_SCROLL_STEP);
        self.follow_cursor = false;
    }

    // =================================== Key Handler =============================================

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.input_mode == InputMode::Search {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Backspace => self.pop_search_char(),
                KeyCode::Char(c) => self.push_search_char(c),
                _ => {}
            }
            return;
        }

        if self.is_detail_open() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => self.close_detail(),
                KeyCode::Down => self.detail_state.scroll_down(1),
                KeyCode::Up => self.detail_state.scroll_up(1),
                KeyCode::PageDown => self.detail_state.scroll_down(5),
                KeyCode::PageUp => self.detail_state.scroll_up(5),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.focus_next_panel(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Esc if !self.filters.search_term.is_empty() => {
                self.filters.clear_search();
                self.refresh_view();
            }
            KeyCode::Char('a') => self.toggle_axis(),
            KeyCode::Char('v') => self.cycle_category_view(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_in(),
            KeyCode::Char('-') => self.zoom_out(),
            KeyCode::Char('0') => self.reset_zoom(),
            KeyCode::Char('c') => self.clear_filters(),
            _ => match self.focused_panel {
                FocusedPanel::Filters => match key.code {
                    KeyCode::Down => self.select_next_filter(),
                    KeyCode::Up => self.select_prev_filter(),
                    KeyCode::Enter | KeyCode::Char(' ') => self.toggle_filter_at_cursor(),
                    KeyCode::Right => self.focus_next_panel(),
                    _ => {}
                },
                FocusedPanel::Timeline => match key.code {
                    KeyCode::Down => self.select_next_event(),
                    KeyCode::Up => self.select_prev_event(),
                    KeyCode::Enter => self.open_detail(),
                    KeyCode::Left => self.scroll_left(),
                    KeyCode::Right => self.scroll_right(),
                    _ => {}
                },
            },
        }
    }
}

/// Era-grouped directors and/or genres, depending on the category view.
pub fn build_filter_rows(timeline: &Timeline, filters: &FilterState) -> Vec<FilterRow> {
    let mut rows: Vec<FilterRow> = Vec::new();
    if filters.category_view.shows_directors() {
        for group in timeline.era_groups() {
            rows.push(FilterRow::Header(group.label.to_string()));
            rows.extend(group.directors.iter().map(|d| FilterRow::Director(d.to_string())));
        }
    }
    if filters.category_view.shows_genres() && !timeline.available_tags().is_empty() {
        rows.push(FilterRow::Header("Genres".to_string()));
        rows.extend(timeline.available_tags().iter().cloned().map(FilterRow::Tag));
    }
    rows
}

fn nearest_selectable(rows: &[FilterRow], from: usize) -> Option<usize> {
    let from = from.min(rows.len().saturating_sub(1));
    (from..rows.len())
        .find(|&i| rows[i].is_selectable())
        .or_else(|| (0..from).rev().find(|&i| rows[i].is_selectable()))
}

pub fn start_ui(mut app: App, events_rx: UnboundedReceiver<AppEvent>) -> Result<()> {
    // Set up the terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_loop(&mut terminal, &mut app, events_rx);

    // Restore the terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

pub fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events_rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit {
        while let Ok(app_event) = events_rx.try_recv() {
            app.handle_app_event(app_event);
        }

        let frame_size = terminal.size()?;
        crate::terminal_ui::prepare_ui_layout(app, frame_size);
        terminal.draw(|f| crate::terminal_ui::ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    app.on_key(key_event);
                }
            }
        }
    }

    Ok(())
}
