//! ratatui-based UI.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context as _;
use bookconnect_application::{BookSummary, Browser, DetailView, FilterKind, FilterOption};
use bookconnect_core::{ANY, SearchForm, Theme, ThemeForm};
use bookconnect_engine::TaggedNode;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod view;

pub use view::{TerminalView, parse_rgb};

/// Rows each preview occupies: title, then author.
const PREVIEW_HEIGHT: usize = 2;

const EMPTY_STATE_MESSAGE: &str = "No results found. Your filters might be too narrow.";

/// One node of a click's interaction path, innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiNode {
    pub role: &'static str,
    pub preview: Option<String>,
}

impl UiNode {
    fn plain(role: &'static str) -> Self {
        Self {
            role,
            preview: None,
        }
    }

    fn preview(id: &str) -> Self {
        Self {
            role: "preview",
            preview: Some(id.to_string()),
        }
    }
}

impl TaggedNode for UiNode {
    fn preview_tag(&self) -> Option<&str> {
        self.preview.as_deref()
    }
}

pub struct Ui {
    browser: Browser,
    view: TerminalView,
    list_state: ListState,
    list_inner: Rect,
    show_more_area: Rect,
    search_panel: SearchPanel,
    settings_panel: SettingsPanel,
    status: Option<String>,
}

impl Ui {
    pub fn new(mut browser: Browser) -> Self {
        let mut view = TerminalView::default();
        browser.start(&mut view);
        let mut ui = Self {
            browser,
            view,
            list_state: ListState::default(),
            list_inner: Rect::default(),
            show_more_area: Rect::default(),
            search_panel: SearchPanel::default(),
            settings_panel: SettingsPanel::default(),
            status: None,
        };
        ui.apply_scroll_reset();
        ui
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(())), Ok(())) => Ok(()),
            (Ok(Err(err)), _) => Err(err),
            (Ok(Ok(())), Err(err)) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame.area(), frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    needs_redraw = true;
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    if self.handle_mouse(mouse) {
                        needs_redraw = true;
                    }
                }
                _ => {}
            }
        }
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.settings_panel.open {
            self.handle_settings_panel_key(key);
            false
        } else if self.search_panel.open {
            self.handle_search_panel_key(key);
            false
        } else if self.view.detail().is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.view.close_detail();
            }
            false
        } else {
            self.handle_main_key(key)
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('/') => self.open_search_panel(),
            KeyCode::Char('s') => {
                self.settings_panel.open = true;
                self.settings_panel.theme = self.browser.preference();
            }
            KeyCode::Char('m') | KeyCode::Char(' ') => self.show_more(),
            KeyCode::Enter => {
                if let Some(item) = self
                    .list_state
                    .selected()
                    .and_then(|idx| self.view.items().get(idx))
                {
                    let path = preview_path(item);
                    self.open_preview(path);
                }
            }
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_prev(),
            _ => {}
        }
        false
    }

    fn open_search_panel(&mut self) {
        self.search_panel.open = true;
        self.search_panel.focus = SearchField::Title;
    }

    fn handle_search_panel_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char('u') = key.code
        {
            self.search_panel.title.clear();
            self.search_panel.genre = 0;
            self.search_panel.author = 0;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.search_panel.open = false;
            }
            KeyCode::Enter => {
                self.search_panel.open = false;
                self.submit_search();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.search_panel.focus = self.search_panel.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.search_panel.focus = self.search_panel.focus.prev();
            }
            KeyCode::Left => self.cycle_search_option(false),
            KeyCode::Right => self.cycle_search_option(true),
            KeyCode::Backspace => {
                if self.search_panel.focus == SearchField::Title {
                    self.search_panel.title.pop();
                }
            }
            KeyCode::Char(ch) => {
                if self.search_panel.focus == SearchField::Title && !ch.is_control() {
                    self.search_panel.title.push(ch);
                }
            }
            _ => {}
        }
    }

    fn cycle_search_option(&mut self, forward: bool) {
        let (kind, cursor) = match self.search_panel.focus {
            SearchField::Title => return,
            SearchField::Genre => (FilterKind::Genre, &mut self.search_panel.genre),
            SearchField::Author => (FilterKind::Author, &mut self.search_panel.author),
        };
        let len = self.view.options(kind).len();
        if len == 0 {
            return;
        }
        *cursor = if forward {
            (*cursor + 1) % len
        } else {
            (*cursor + len - 1) % len
        };
    }

    fn search_form(&self) -> SearchForm {
        SearchForm {
            title: self.search_panel.title.clone(),
            author: option_key(self.view.options(FilterKind::Author), self.search_panel.author),
            genre: option_key(self.view.options(FilterKind::Genre), self.search_panel.genre),
        }
    }

    fn submit_search(&mut self) {
        let form = self.search_form();
        match self.browser.submit_search(&form, &mut self.view) {
            Ok(count) => {
                self.status = Some(format!("{count} matching books"));
            }
            Err(err) => {
                self.status = Some(err.to_string());
            }
        }
        self.apply_scroll_reset();
    }

    fn handle_settings_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.settings_panel.open = false;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Char(' ') => {
                self.settings_panel.theme = self.settings_panel.theme.toggled();
            }
            KeyCode::Enter => {
                self.settings_panel.open = false;
                let form = ThemeForm {
                    theme: self.settings_panel.theme.as_str().to_string(),
                };
                match self.browser.submit_theme(&form, &mut self.view) {
                    Ok(theme) if theme != self.settings_panel.theme => {
                        self.status = Some(format!(
                            "{} theme needs a dark terminal, using {theme}",
                            self.settings_panel.theme
                        ));
                    }
                    Ok(theme) => {
                        self.status = Some(format!("{theme} theme"));
                    }
                    Err(err) => {
                        self.status = Some(err.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    /// Returns true when something changed on screen.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::ScrollDown if self.is_main_view() => {
                self.select_next();
                return true;
            }
            MouseEventKind::ScrollUp if self.is_main_view() => {
                self.select_prev();
                return true;
            }
            _ => return false,
        }

        if self.search_panel.open || self.settings_panel.open {
            return false;
        }
        if self.view.detail().is_some() {
            self.view.close_detail();
            return true;
        }
        if rect_contains(self.show_more_area, mouse.column, mouse.row) {
            self.show_more();
            return true;
        }

        let path = preview_path_at(
            self.list_inner,
            self.list_state.offset(),
            self.view.items(),
            mouse.column,
            mouse.row,
        );
        if path.is_empty() {
            return false;
        }
        if let Some(idx) = path
            .iter()
            .find_map(|node| node.preview_tag())
            .and_then(|id| self.view.items().iter().position(|item| item.id == id))
        {
            self.list_state.select(Some(idx));
        }
        self.open_preview(path);
        true
    }

    fn is_main_view(&self) -> bool {
        !self.search_panel.open && !self.settings_panel.open && self.view.detail().is_none()
    }

    fn open_preview(&mut self, path: Vec<UiNode>) {
        match self.browser.select_preview(path, &mut self.view) {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!("click did not land on a preview");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to open book detail");
                self.status = Some(err.to_string());
            }
        }
    }

    fn show_more(&mut self) {
        if !self.view.show_more_enabled() {
            return;
        }
        let added = self.browser.show_more(&mut self.view);
        if added > 0 && self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
    }

    fn apply_scroll_reset(&mut self) {
        if self.view.take_scroll_reset() {
            *self.list_state.offset_mut() = 0;
            let first = (!self.view.items().is_empty()).then_some(0);
            self.list_state.select(first);
        }
    }

    fn select_next(&mut self) {
        let len = self.view.items().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(idx) => (idx + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.view.items().is_empty() {
            return;
        }
        let prev = self
            .list_state
            .selected()
            .map(|idx| idx.saturating_sub(1))
            .unwrap_or(0);
        self.list_state.select(Some(prev));
    }

    fn accent_color(&self) -> Color {
        match self.browser.theme() {
            Theme::Day => Color::Blue,
            Theme::Night => Color::Yellow,
        }
    }

    fn base_style(&self) -> Style {
        Style::default()
            .fg(self.view.foreground())
            .bg(self.view.background())
    }

    fn draw(&mut self, area: Rect, frame: &mut ratatui::Frame) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(self.base_style()), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(area);

        let header = Paragraph::new(Text::from(self.header_lines()))
            .alignment(Alignment::Center)
            .style(self.base_style())
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, layout[0]);

        self.draw_list(frame, layout[1]);
        self.draw_footer(frame, layout[2]);

        if self.search_panel.open {
            self.draw_search_panel(area, frame);
        }

        if self.settings_panel.open {
            self.draw_settings_panel(area, frame);
        }

        if let Some(detail) = self.view.detail() {
            self.draw_detail(detail, area, frame);
        }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::styled(
                "Book Connect",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(vec![
                Span::styled("/", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" search  "),
                Span::styled("s", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" settings  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" details  "),
                Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" quit"),
            ]),
        ]
    }

    fn draw_list(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let title = if self.browser.criteria().is_unfiltered() {
            "Books".to_string()
        } else {
            format!(
                "Books ({} of {} match)",
                self.browser.results().len(),
                self.browser.catalog().len()
            )
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(self.base_style());
        let inner = block.inner(area);
        self.list_inner = inner;
        frame.render_widget(block, area);

        if self.view.is_empty_state() {
            let message = Paragraph::new(Text::from(vec![
                Line::raw(""),
                Line::raw(EMPTY_STATE_MESSAGE),
            ]))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(message, inner);
            return;
        }

        let max_width = inner.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .view
            .items()
            .iter()
            .map(|item| {
                ListItem::new(Text::from(vec![
                    Line::styled(
                        truncate_to_width(&item.title, max_width),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(
                        truncate_to_width(&item.author_display_name, max_width),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ]))
            })
            .collect();

        let highlight_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let list = List::new(items)
            .highlight_style(highlight_style)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }

    fn draw_footer(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);

        let button_style = if self.view.show_more_enabled() {
            Style::default()
                .fg(Color::Black)
                .bg(self.accent_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let hint = if self.view.show_more_enabled() {
            "  (m)"
        } else {
            ""
        };
        let button = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", self.view.show_more_label()), button_style),
            Span::raw(hint),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
        self.show_more_area = sections[0];
        frame.render_widget(button, sections[0]);

        if let Some(status) = &self.status {
            let line = Paragraph::new(Line::styled(
                status.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(line, sections[1]);
        }
    }

    fn draw_search_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .style(self.base_style())
            .title(Span::styled(
                "Search",
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let highlight_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let title_value = if self.search_panel.focus == SearchField::Title {
            format!("{}_", self.search_panel.title)
        } else {
            self.search_panel.title.clone()
        };
        let items = vec![
            ListItem::new(Line::from(vec![
                Span::styled("Title: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(title_value),
            ])),
            ListItem::new(Line::from(vec![
                Span::styled("Genre: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    "< {} >",
                    option_label(self.view.options(FilterKind::Genre), self.search_panel.genre)
                )),
            ])),
            ListItem::new(Line::from(vec![
                Span::styled("Author: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    "< {} >",
                    option_label(self.view.options(FilterKind::Author), self.search_panel.author)
                )),
            ])),
        ];

        let list = List::new(items)
            .highlight_style(highlight_style)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        state.select(Some(self.search_panel.focus.index()));
        frame.render_stateful_widget(list, sections[0], &mut state);

        let help_lines = vec![
            Line::from(vec![
                Span::styled("Tab/↑/↓", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" field  "),
                Span::styled("←/→", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" choose  "),
                Span::styled("Ctrl+U", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" clear"),
            ]),
            Line::from(vec![
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" search  "),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" cancel"),
            ]),
        ];
        let help = Paragraph::new(Text::from(help_lines))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(help, sections[1]);
    }

    fn draw_settings_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(40, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .style(self.base_style())
            .title(Span::styled(
                "Settings",
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let lines = vec![
            Line::from(vec![
                Span::styled("Theme: ", Style::default().add_modifier(Modifier::BOLD)),
                option_chip("day", self.settings_panel.theme == Theme::Day),
                Span::raw(" "),
                option_chip("night", self.settings_panel.theme == Theme::Night),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("←/→", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" toggle  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" cancel"),
            ]),
        ];
        let body = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        frame.render_widget(body, inner);
    }

    fn draw_detail(&self, detail: &DetailView, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            Line::styled(
                detail.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                detail.subtitle(),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
            Line::raw(""),
            Line::raw(detail.description.clone()),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Genres: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(detail.genres.join(", ")),
            ]),
            Line::from(vec![
                Span::styled("Pages: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(detail.pages.to_string()),
                Span::raw("  "),
                Span::styled("Popularity: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{}/100", detail.popularity)),
            ]),
        ];
        if !detail.image.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Cover: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(detail.image.clone()),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" close"),
        ]));

        let paragraph = Paragraph::new(Text::from(lines))
            .style(self.base_style())
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SearchField {
    #[default]
    Title,
    Genre,
    Author,
}

impl SearchField {
    fn next(self) -> Self {
        match self {
            SearchField::Title => SearchField::Genre,
            SearchField::Genre => SearchField::Author,
            SearchField::Author => SearchField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Genre => SearchField::Title,
            SearchField::Author => SearchField::Genre,
        }
    }

    fn index(self) -> usize {
        match self {
            SearchField::Title => 0,
            SearchField::Genre => 1,
            SearchField::Author => 2,
        }
    }
}

/// Form state survives closing the overlay, like a page form does.
#[derive(Debug, Clone, Default)]
struct SearchPanel {
    open: bool,
    focus: SearchField,
    title: String,
    genre: usize,
    author: usize,
}

#[derive(Debug, Clone, Default)]
struct SettingsPanel {
    open: bool,
    theme: Theme,
}

/// Path for the preview row itself, as if its title were clicked.
pub fn preview_path(item: &BookSummary) -> Vec<UiNode> {
    vec![
        UiNode::plain("preview__title"),
        UiNode::plain("preview__info"),
        UiNode::preview(&item.id),
        UiNode::plain("list__items"),
    ]
}

/// Maps a click inside the list to its interaction path. Empty when the
/// click is outside the list; just the container when it misses every row.
pub fn preview_path_at(
    list_inner: Rect,
    offset: usize,
    items: &[BookSummary],
    column: u16,
    row: u16,
) -> Vec<UiNode> {
    if !rect_contains(list_inner, column, row) {
        return Vec::new();
    }

    let rel = usize::from(row - list_inner.y);
    let Some(item) = items.get(offset + rel / PREVIEW_HEIGHT) else {
        return vec![UiNode::plain("list__items")];
    };
    let part = if rel % PREVIEW_HEIGHT == 0 {
        "preview__title"
    } else {
        "preview__author"
    };
    vec![
        UiNode::plain(part),
        UiNode::plain("preview__info"),
        UiNode::preview(&item.id),
        UiNode::plain("list__items"),
    ]
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn option_key(options: &[FilterOption], cursor: usize) -> String {
    options
        .get(cursor)
        .map(|option| option.key.clone())
        .unwrap_or_else(|| ANY.to_string())
}

fn option_label(options: &[FilterOption], cursor: usize) -> String {
    options
        .get(cursor)
        .map(|option| option.display_name.clone())
        .unwrap_or_else(|| ANY.to_string())
}

fn option_chip(label: &str, selected: bool) -> Span<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(label.to_string(), style)
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .context("leave alt screen")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
