use bookconnect_core::{Book, FilterCriteria, KeyFilter};

/// Returns the books matching `criteria`, in catalog order.
///
/// The title needle is trimmed and compared case-insensitively; a blank
/// needle matches every title. An empty result is a normal outcome.
pub fn filter<'a>(books: &'a [Book], criteria: &FilterCriteria) -> Vec<&'a Book> {
    let needle = criteria.title.trim().to_lowercase();
    let out: Vec<&Book> = books
        .iter()
        .filter(|book| matches_title(&needle, book))
        .filter(|book| matches_author(&criteria.author, book))
        .filter(|book| matches_genre(&criteria.genre, book))
        .collect();

    tracing::debug!(
        title = %criteria.title.trim(),
        author = criteria.author.as_str(),
        genre = criteria.genre.as_str(),
        matched = out.len(),
        total = books.len(),
        "filtered catalog"
    );
    out
}

/// `needle` must already be trimmed and lowercased.
pub fn matches_title(needle: &str, book: &Book) -> bool {
    needle.is_empty() || book.title.to_lowercase().contains(needle)
}

pub fn matches_author(filter: &KeyFilter, book: &Book) -> bool {
    match filter {
        KeyFilter::Any => true,
        KeyFilter::Key(key) => book.author == *key,
    }
}

pub fn matches_genre(filter: &KeyFilter, book: &Book) -> bool {
    match filter {
        KeyFilter::Any => true,
        KeyFilter::Key(key) => book.has_genre(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author: &str, genres: &[&str]) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            description: String::new(),
            image: String::new(),
            published: "2000-01-01".to_string(),
            pages: 1,
            popularity: 1,
        }
    }

    fn criteria(title: &str, author: &str, genre: &str) -> FilterCriteria {
        FilterCriteria {
            title: title.to_string(),
            author: KeyFilter::parse(author),
            genre: KeyFilter::parse(genre),
        }
    }

    fn ids(books: &[&Book]) -> Vec<String> {
        books.iter().map(|b| b.id.clone()).collect()
    }

    fn shelf() -> Vec<Book> {
        vec![
            book("a", "Foo", "x", &["g1"]),
            book("b", "Bar", "y", &["g2"]),
            book("c", "Food for Thought", "y", &["g2", "g1"]),
            book("d", "The Barn", "x", &["g3"]),
        ]
    }

    #[test]
    fn genre_filter_keeps_only_members() {
        let books = vec![book("a", "Foo", "x", &["g1"]), book("b", "Bar", "y", &["g2"])];
        let out = filter(&books, &criteria("", "any", "g1"));
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn title_is_case_insensitive_substring() {
        let books = shelf();
        assert_eq!(ids(&filter(&books, &criteria("foo", "any", "any"))), vec!["a", "c"]);
        assert_eq!(ids(&filter(&books, &criteria("BAR", "any", "any"))), vec!["b", "d"]);
    }

    #[test]
    fn title_needle_is_trimmed() {
        let books = shelf();
        assert_eq!(ids(&filter(&books, &criteria("  barn ", "any", "any"))), vec!["d"]);
    }

    #[test]
    fn whitespace_title_matches_everything() {
        let books = shelf();
        assert_eq!(filter(&books, &criteria("   \t", "any", "any")).len(), books.len());
    }

    #[test]
    fn predicates_combine_conjunctively() {
        let books = shelf();
        assert_eq!(ids(&filter(&books, &criteria("foo", "y", "g1"))), vec!["c"]);
        assert_eq!(ids(&filter(&books, &criteria("", "x", "any"))), vec!["a", "d"]);
        assert!(filter(&books, &criteria("foo", "x", "g2")).is_empty());
    }

    #[test]
    fn result_is_ordered_subsequence() {
        let books = shelf();
        for c in [
            criteria("", "any", "g1"),
            criteria("o", "y", "any"),
            criteria("ba", "any", "any"),
        ] {
            let out = filter(&books, &c);
            let mut last = None;
            for b in &out {
                let pos = books.iter().position(|x| x.id == b.id).unwrap();
                assert!(last.is_none_or(|prev| prev < pos));
                last = Some(pos);
            }
        }
    }

    #[test]
    fn matched_and_excluded_books_agree_with_predicates() {
        let books = shelf();
        let c = criteria("o", "y", "g1");
        let needle = c.title.trim().to_lowercase();
        let out = filter(&books, &c);
        for b in &books {
            let included = out.iter().any(|x| x.id == b.id);
            let all = matches_title(&needle, b)
                && matches_author(&c.author, b)
                && matches_genre(&c.genre, b);
            assert_eq!(included, all, "book {}", b.id);
        }
    }

    #[test]
    fn refilter_is_idempotent() {
        let books = shelf();
        let c = criteria("o", "any", "g2");
        assert_eq!(filter(&books, &c), filter(&books, &c));
    }
}
