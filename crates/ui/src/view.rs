//! Terminal-side state the browser paints into.

use bookconnect_application::{BookSummary, DetailView, FilterKind, FilterOption, Renderer};
use bookconnect_core::{Palette, Theme};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct TerminalView {
    items: Vec<BookSummary>,
    show_more_remaining: usize,
    show_more_enabled: bool,
    empty: bool,
    detail: Option<DetailView>,
    palette: Palette,
    author_options: Vec<FilterOption>,
    genre_options: Vec<FilterOption>,
    scroll_reset: bool,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            show_more_remaining: 0,
            show_more_enabled: false,
            empty: false,
            detail: None,
            palette: Theme::Day.palette(),
            author_options: Vec::new(),
            genre_options: Vec::new(),
            scroll_reset: false,
        }
    }
}

impl TerminalView {
    pub fn items(&self) -> &[BookSummary] {
        &self.items
    }

    pub fn is_empty_state(&self) -> bool {
        self.empty
    }

    pub fn show_more_enabled(&self) -> bool {
        self.show_more_enabled
    }

    pub fn show_more_label(&self) -> String {
        format!("Show more ({})", self.show_more_remaining)
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn options(&self, kind: FilterKind) -> &[FilterOption] {
        match kind {
            FilterKind::Author => &self.author_options,
            FilterKind::Genre => &self.genre_options,
        }
    }

    /// Foreground comes from the dark token.
    pub fn foreground(&self) -> Color {
        parse_rgb(self.palette.dark).unwrap_or(Color::Reset)
    }

    /// Background comes from the light token.
    pub fn background(&self) -> Color {
        parse_rgb(self.palette.light).unwrap_or(Color::Reset)
    }

    /// True once after the browser asked for the list to scroll back up.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset)
    }
}

impl Renderer for TerminalView {
    fn clear_list(&mut self) {
        self.items.clear();
    }

    fn render_page(&mut self, books: &[BookSummary]) {
        self.items.extend_from_slice(books);
    }

    fn set_show_more_label(&mut self, remaining: usize) {
        self.show_more_remaining = remaining;
    }

    fn set_show_more_enabled(&mut self, enabled: bool) {
        self.show_more_enabled = enabled;
    }

    fn set_empty_state(&mut self, empty: bool) {
        self.empty = empty;
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.detail = Some(detail.clone());
    }

    fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    fn populate_filter_options(&mut self, kind: FilterKind, options: &[FilterOption]) {
        match kind {
            FilterKind::Author => self.author_options = options.to_vec(),
            FilterKind::Genre => self.genre_options = options.to_vec(),
        }
    }

    fn scroll_to_top(&mut self) {
        self.scroll_reset = true;
    }
}

/// Parses an `"R, G, B"` token.
pub fn parse_rgb(token: &str) -> Option<Color> {
    let mut parts = token.split(',').map(|part| part.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Color::Rgb(r, g, b))
}
