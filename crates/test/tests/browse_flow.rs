use bookconnect_application::{BrowseError, Browser};
use bookconnect_core::{CriteriaError, FilterCriteria, KeyFilter, SearchForm};
use bookconnect_engine::{filter, matches_author, matches_genre, matches_title};
use bookconnect_storage::default_catalog;
use bookconnect_test::{RecordingRenderer, foo_bar_catalog, make_settings, sample_catalog};
use pretty_assertions::assert_eq;

fn form(title: &str, author: &str, genre: &str) -> SearchForm {
    SearchForm {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
    }
}

#[test]
fn genre_search_on_two_book_catalog() {
    let mut browser = Browser::new(foo_bar_catalog(), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);

    let count = browser
        .submit_search(&form("", "any", "g1"), &mut renderer)
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(renderer.item_ids(), vec!["a"]);
    assert_eq!(renderer.empty_state, Some(false));
    assert_eq!(renderer.show_more_enabled, Some(false));
    assert_eq!(renderer.show_more_label, Some(0));
}

#[test]
fn page_size_one_reveals_one_book_per_click() {
    let mut browser = Browser::new(foo_bar_catalog(), &make_settings(1), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);

    assert_eq!(renderer.item_ids(), vec!["a"]);
    assert_eq!(browser.remaining(), 1);
    assert_eq!(renderer.show_more_label, Some(1));
    assert_eq!(renderer.show_more_enabled, Some(true));

    assert_eq!(browser.show_more(&mut renderer), 1);
    assert_eq!(renderer.item_ids(), vec!["a", "b"]);
    assert_eq!(browser.remaining(), 0);
    assert_eq!(renderer.show_more_enabled, Some(false));

    assert_eq!(browser.show_more(&mut renderer), 0);
    assert_eq!(renderer.item_ids(), vec!["a", "b"]);
}

#[test]
fn start_shows_first_page_of_whole_catalog() {
    let mut browser = Browser::new(sample_catalog(50), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);

    assert_eq!(renderer.items.len(), 36);
    assert_eq!(renderer.show_more_label, Some(14));
    assert_eq!(renderer.genre_options[0].display_name, "All Genres");
    assert_eq!(renderer.author_options[0].display_name, "All Authors");
    assert_eq!(renderer.author_options.len(), 3);
    assert_eq!(renderer.scrolls, 1);
    assert!(renderer.palette.is_some());
}

#[test]
fn new_search_resets_cursor() {
    let mut browser = Browser::new(sample_catalog(50), &make_settings(10), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);
    browser.show_more(&mut renderer);
    browser.show_more(&mut renderer);
    assert_eq!(browser.revealed(), 30);

    browser
        .submit_search(&form("", "x", "any"), &mut renderer)
        .unwrap();
    assert_eq!(browser.results().len(), 25);
    assert_eq!(browser.revealed(), 10);
    assert_eq!(renderer.items.len(), 10);
    assert_eq!(renderer.show_more_label, Some(15));
    assert_eq!(renderer.scrolls, 2);
}

#[test]
fn exhausting_pages_reveals_every_result_once() {
    let mut browser = Browser::new(sample_catalog(23), &make_settings(5), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);
    while browser.remaining() > 0 {
        browser.show_more(&mut renderer);
    }
    assert_eq!(renderer.items.len(), 23);
    assert_eq!(renderer.pages_rendered, 5);
    let ids = renderer.item_ids();
    let expected: Vec<String> = browser.results().iter().map(|b| b.id.clone()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn no_matches_is_empty_state_not_error() {
    let mut browser = Browser::new(sample_catalog(5), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);

    let count = browser
        .submit_search(&form("zzz", "any", "any"), &mut renderer)
        .unwrap();
    assert_eq!(count, 0);
    assert!(renderer.items.is_empty());
    assert_eq!(renderer.empty_state, Some(true));
    assert_eq!(renderer.show_more_enabled, Some(false));

    browser
        .submit_search(&form("  ", "any", "any"), &mut renderer)
        .unwrap();
    assert_eq!(renderer.empty_state, Some(false));
    assert_eq!(renderer.items.len(), 5);
}

#[test]
fn malformed_criteria_are_rejected_at_the_boundary() {
    let mut browser = Browser::new(sample_catalog(5), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);

    let err = browser
        .submit_search(&form("", "nobody", "any"), &mut renderer)
        .unwrap_err();
    assert!(matches!(
        err,
        BrowseError::Criteria(CriteriaError::UnknownAuthor(ref key)) if key == "nobody"
    ));
    assert_eq!(renderer.items.len(), 5);

    let err = browser
        .submit_search(&form("", "", "any"), &mut renderer)
        .unwrap_err();
    assert!(matches!(
        err,
        BrowseError::Criteria(CriteriaError::UnknownAuthor(ref key)) if key.is_empty()
    ));

    let err = browser
        .submit_search(&form("", "any", " g1 "), &mut renderer)
        .unwrap_err();
    assert!(matches!(
        err,
        BrowseError::Criteria(CriteriaError::UnknownGenre(ref key)) if key == " g1 "
    ));
    assert_eq!(renderer.items.len(), 5);
}

#[test]
fn bundled_catalog_filters_satisfy_predicates() {
    let catalog = default_catalog().unwrap();
    let cases = [
        ("the", "any", "any"),
        ("", "verne", "any"),
        ("", "any", "horror"),
        (" OF ", "any", "classic"),
        ("", "dickens", "science-fiction"),
    ];
    for (title, author, genre) in cases {
        let criteria = FilterCriteria {
            title: title.to_string(),
            author: KeyFilter::parse(author),
            genre: KeyFilter::parse(genre),
        };
        let needle = title.trim().to_lowercase();
        let out = filter(catalog.books(), &criteria);

        let mut last = None;
        for book in catalog.books() {
            let included = out.iter().position(|b| b.id == book.id);
            let satisfies = matches_title(&needle, book)
                && matches_author(&criteria.author, book)
                && matches_genre(&criteria.genre, book);
            assert_eq!(included.is_some(), satisfies, "{} for {criteria:?}", book.id);
            if let Some(pos) = included {
                assert!(last.is_none_or(|prev| prev < pos));
                last = Some(pos);
            }
        }
        assert_eq!(out, filter(catalog.books(), &criteria));
    }
}
