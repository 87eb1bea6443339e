//! Application orchestration layer for Book Connect.
//!
//! [`Browser`] owns the result set and the page cursor and turns user input
//! into instructions for a [`Renderer`]. It never draws anything itself.

use bookconnect_core::{
    ANY, Book, Catalog, CatalogError, CriteriaError, FilterCriteria, Palette, SearchForm,
    Settings, Theme, ThemeForm,
};
use bookconnect_engine::{PageCursor, TaggedNode, filter, resolve_selection, resolve_theme};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Author,
    Genre,
}

impl FilterKind {
    pub fn plural(&self) -> &'static str {
        match self {
            FilterKind::Author => "Authors",
            FilterKind::Genre => "Genres",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub key: String,
    pub display_name: String,
}

/// What a preview row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub author_display_name: String,
    pub image: String,
}

impl BookSummary {
    pub fn from_book(catalog: &Catalog, book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author_display_name: catalog.author_name(&book.author).to_string(),
            image: book.image.clone(),
        }
    }
}

/// What the detail overlay shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub author_display_name: String,
    pub published_year: i32,
    pub description: String,
    pub image: String,
    pub genres: Vec<String>,
    pub pages: u32,
    pub popularity: u32,
}

impl DetailView {
    pub fn from_book(catalog: &Catalog, book: &Book) -> Result<Self, CatalogError> {
        let published_year = book
            .published_year()
            .ok_or_else(|| CatalogError::InvalidPublished {
                id: book.id.clone(),
                published: book.published.clone(),
            })?;
        Ok(Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author_display_name: catalog.author_name(&book.author).to_string(),
            published_year,
            description: book.description.clone(),
            image: book.image.clone(),
            genres: book
                .genres
                .iter()
                .map(|g| catalog.genre_name(g).to_string())
                .collect(),
            pages: book.pages,
            popularity: book.popularity,
        })
    }

    /// "Author (Year)".
    pub fn subtitle(&self) -> String {
        format!("{} ({})", self.author_display_name, self.published_year)
    }
}

/// The presentation layer. Implementations apply instructions and never
/// decide what to show.
pub trait Renderer {
    /// Drops every rendered preview.
    fn clear_list(&mut self);
    /// Appends previews after the ones already shown.
    fn render_page(&mut self, books: &[BookSummary]);
    fn set_show_more_label(&mut self, remaining: usize);
    fn set_show_more_enabled(&mut self, enabled: bool);
    fn set_empty_state(&mut self, empty: bool);
    fn show_detail(&mut self, detail: &DetailView);
    fn set_palette(&mut self, palette: Palette);
    /// `options` starts with the "any" entry.
    fn populate_filter_options(&mut self, kind: FilterKind, options: &[FilterOption]);
    fn scroll_to_top(&mut self) {}
}

#[derive(Debug, Clone)]
pub struct Browser {
    catalog: Catalog,
    cursor: PageCursor<Book>,
    criteria: FilterCriteria,
    preference: Theme,
    system_prefers_dark: bool,
    theme: Theme,
}

impl Browser {
    pub fn new(catalog: Catalog, settings: &Settings, system_prefers_dark: bool) -> Self {
        let mut cursor = PageCursor::new(settings.page_size);
        cursor.reset(catalog.books().to_vec());
        Self {
            catalog,
            cursor,
            criteria: FilterCriteria::any(),
            preference: settings.theme,
            system_prefers_dark,
            theme: resolve_theme(settings.theme, system_prefers_dark),
        }
    }

    /// Paints the initial state: palette, filter options, first page of the
    /// whole catalog.
    pub fn start<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        tracing::info!(
            books = self.catalog.len(),
            page_size = self.cursor.page_size(),
            theme = %self.theme,
            "starting browser"
        );
        renderer.set_palette(self.theme.palette());
        for kind in [FilterKind::Genre, FilterKind::Author] {
            renderer.populate_filter_options(kind, &self.filter_options(kind));
        }
        self.criteria = FilterCriteria::any();
        self.show_results(self.catalog.books().to_vec(), renderer);
    }

    /// Validates the form, recomputes the result set and reveals its first
    /// page. Returns the result count. Rejected input leaves state untouched.
    pub fn submit_search<R: Renderer + ?Sized>(
        &mut self,
        form: &SearchForm,
        renderer: &mut R,
    ) -> Result<usize, BrowseError> {
        let criteria = match FilterCriteria::from_form(form, &self.catalog) {
            Ok(criteria) => criteria,
            Err(err) => {
                tracing::warn!(error = %err, "rejected search form");
                return Err(err.into());
            }
        };

        let results: Vec<Book> = filter(self.catalog.books(), &criteria)
            .into_iter()
            .cloned()
            .collect();
        let count = results.len();
        self.criteria = criteria;
        self.show_results(results, renderer);
        Ok(count)
    }

    /// Reveals the next page. Returns how many previews were appended.
    pub fn show_more<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        self.reveal_page(renderer)
    }

    /// Opens the detail overlay for the book the path points at, if any.
    pub fn select_preview<N, I, R>(
        &self,
        path: I,
        renderer: &mut R,
    ) -> Result<Option<DetailView>, BrowseError>
    where
        N: TaggedNode,
        I: IntoIterator<Item = N>,
        R: Renderer + ?Sized,
    {
        let Some(book) = resolve_selection(path, self.catalog.books()) else {
            return Ok(None);
        };
        let detail = DetailView::from_book(&self.catalog, book)?;
        tracing::debug!(id = %detail.id, "showing detail");
        renderer.show_detail(&detail);
        Ok(Some(detail))
    }

    /// Applies a theme submission. Returns the resolved theme.
    pub fn submit_theme<R: Renderer + ?Sized>(
        &mut self,
        form: &ThemeForm,
        renderer: &mut R,
    ) -> Result<Theme, BrowseError> {
        let preference = match form.parse() {
            Ok(theme) => theme,
            Err(err) => {
                tracing::warn!(error = %err, "rejected theme form");
                return Err(err.into());
            }
        };

        self.preference = preference;
        self.theme = resolve_theme(preference, self.system_prefers_dark);
        if self.theme != preference {
            tracing::info!(
                requested = %preference,
                resolved = %self.theme,
                "system is not in dark mode, staying on day palette"
            );
        }
        renderer.set_palette(self.theme.palette());
        Ok(self.theme)
    }

    /// Options for a filter select, leading with the "any" entry.
    pub fn filter_options(&self, kind: FilterKind) -> Vec<FilterOption> {
        let table = match kind {
            FilterKind::Author => self.catalog.authors(),
            FilterKind::Genre => self.catalog.genres(),
        };
        let mut options = Vec::with_capacity(table.len() + 1);
        options.push(FilterOption {
            key: ANY.to_string(),
            display_name: format!("All {}", kind.plural()),
        });
        options.extend(table.iter().map(|(key, name)| FilterOption {
            key: key.to_string(),
            display_name: name.to_string(),
        }));
        options
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn results(&self) -> &[Book] {
        self.cursor.results()
    }

    pub fn revealed(&self) -> usize {
        self.cursor.revealed()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn preference(&self) -> Theme {
        self.preference
    }

    fn show_results<R: Renderer + ?Sized>(&mut self, results: Vec<Book>, renderer: &mut R) {
        renderer.clear_list();
        renderer.set_empty_state(results.is_empty());
        self.cursor.reset(results);
        self.reveal_page(renderer);
        renderer.scroll_to_top();
    }

    fn reveal_page<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let page: Vec<BookSummary> = self
            .cursor
            .advance()
            .iter()
            .map(|book| BookSummary::from_book(&self.catalog, book))
            .collect();
        if !page.is_empty() {
            renderer.render_page(&page);
        }

        let remaining = self.cursor.remaining();
        renderer.set_show_more_enabled(remaining > 0);
        renderer.set_show_more_label(remaining);
        page.len()
    }
}
