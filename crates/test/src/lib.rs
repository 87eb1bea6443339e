//! Test helpers and fixtures.

use bookconnect_application::{BookSummary, DetailView, FilterKind, FilterOption, Renderer};
use bookconnect_core::{Book, Catalog, LookupTable, Palette, Settings};

pub fn make_book(id: &str, title: &str, author: &str, genres: &[&str]) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        description: format!("{title} description"),
        image: format!("https://covers.test/{id}.jpg"),
        published: "2010-03-04T00:00:00.000Z".to_string(),
        pages: 200,
        popularity: 40,
    }
}

pub fn make_settings(page_size: usize) -> Settings {
    Settings {
        page_size,
        ..Settings::default()
    }
}

/// Two authors, two genres, `n` books alternating between them.
pub fn sample_catalog(n: usize) -> Catalog {
    let authors: LookupTable = [("x", "Ann X"), ("y", "Bob Y")].into_iter().collect();
    let genres: LookupTable = [("g1", "Fantasy"), ("g2", "Horror")].into_iter().collect();
    let books = (0..n)
        .map(|i| {
            let (author, genre) = if i % 2 == 0 { ("x", "g1") } else { ("y", "g2") };
            make_book(&format!("b{i}"), &format!("Book {i}"), author, &[genre])
        })
        .collect();
    Catalog::new(books, authors, genres).expect("sample catalog is consistent")
}

/// The two-book catalog used in the scenario tests.
pub fn foo_bar_catalog() -> Catalog {
    let authors: LookupTable = [("x", "Ann X"), ("y", "Bob Y")].into_iter().collect();
    let genres: LookupTable = [("g1", "Fantasy"), ("g2", "Horror")].into_iter().collect();
    Catalog::new(
        vec![
            make_book("a", "Foo", "x", &["g1"]),
            make_book("b", "Bar", "y", &["g2"]),
        ],
        authors,
        genres,
    )
    .expect("foo/bar catalog is consistent")
}

/// Renderer that keeps the last state it was told to show, like a page would.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub items: Vec<BookSummary>,
    pub show_more_label: Option<usize>,
    pub show_more_enabled: Option<bool>,
    pub empty_state: Option<bool>,
    pub detail: Option<DetailView>,
    pub palette: Option<Palette>,
    pub author_options: Vec<FilterOption>,
    pub genre_options: Vec<FilterOption>,
    pub scrolls: usize,
    pub pages_rendered: usize,
}

impl RecordingRenderer {
    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear_list(&mut self) {
        self.items.clear();
    }

    fn render_page(&mut self, books: &[BookSummary]) {
        self.items.extend_from_slice(books);
        self.pages_rendered += 1;
    }

    fn set_show_more_label(&mut self, remaining: usize) {
        self.show_more_label = Some(remaining);
    }

    fn set_show_more_enabled(&mut self, enabled: bool) {
        self.show_more_enabled = Some(enabled);
    }

    fn set_empty_state(&mut self, empty: bool) {
        self.empty_state = Some(empty);
    }

    fn show_detail(&mut self, detail: &DetailView) {
        self.detail = Some(detail.clone());
    }

    fn set_palette(&mut self, palette: Palette) {
        self.palette = Some(palette);
    }

    fn populate_filter_options(&mut self, kind: FilterKind, options: &[FilterOption]) {
        match kind {
            FilterKind::Author => self.author_options = options.to_vec(),
            FilterKind::Genre => self.genre_options = options.to_vec(),
        }
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_settings() {
        let settings = make_settings(12);
        assert_eq!(settings.page_size, 12);
    }

    #[test]
    fn sample_catalog_alternates_authors() {
        let catalog = sample_catalog(4);
        let authors: Vec<&str> = catalog.books().iter().map(|b| b.author.as_str()).collect();
        assert_eq!(authors, vec!["x", "y", "x", "y"]);
    }
}
