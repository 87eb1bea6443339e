use bookconnect_application::Browser;
use bookconnect_core::{DARK_RGB, LIGHT_RGB, SearchForm, Settings, Theme, ThemeForm};
use bookconnect_test::{RecordingRenderer, foo_bar_catalog, make_settings, sample_catalog};
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Node(Option<&'static str>);

impl bookconnect_engine::TaggedNode for Node {
    fn preview_tag(&self) -> Option<&str> {
        self.0
    }
}

#[test]
fn click_on_nested_child_opens_its_book() {
    let browser = Browser::new(foo_bar_catalog(), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();
    let path = [Node(None), Node(None), Node(Some("b")), Node(None)];

    let detail = browser.select_preview(path, &mut renderer).unwrap().unwrap();
    assert_eq!(detail.id, "b");
    assert_eq!(detail.subtitle(), "Bob Y (2010)");
    assert_eq!(renderer.detail.as_ref().map(|d| d.title.as_str()), Some("Bar"));
}

#[test]
fn untagged_or_dangling_paths_are_no_ops() {
    let browser = Browser::new(foo_bar_catalog(), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();

    let none = browser
        .select_preview([Node(None), Node(None)], &mut renderer)
        .unwrap();
    assert!(none.is_none());

    let dangling = browser
        .select_preview([Node(Some("deleted"))], &mut renderer)
        .unwrap();
    assert!(dangling.is_none());
    assert!(renderer.detail.is_none());
}

#[test]
fn selection_resolves_outside_current_results() {
    let mut browser = Browser::new(sample_catalog(6), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);
    browser
        .submit_search(
            &SearchForm {
                author: "x".to_string(),
                ..SearchForm::default()
            },
            &mut renderer,
        )
        .unwrap();

    let detail = browser
        .select_preview([Node(Some("b1"))], &mut renderer)
        .unwrap()
        .unwrap();
    assert_eq!(detail.author_display_name, "Bob Y");
}

#[test]
fn night_preference_needs_dark_system() {
    let night = ThemeForm {
        theme: "night".to_string(),
    };

    let mut light_system = Browser::new(sample_catalog(1), &make_settings(36), false);
    let mut renderer = RecordingRenderer::default();
    assert_eq!(light_system.submit_theme(&night, &mut renderer).unwrap(), Theme::Day);
    let palette = renderer.palette.unwrap();
    assert_eq!((palette.dark, palette.light), (DARK_RGB, LIGHT_RGB));

    let mut dark_system = Browser::new(sample_catalog(1), &make_settings(36), true);
    assert_eq!(dark_system.submit_theme(&night, &mut renderer).unwrap(), Theme::Night);
    let palette = renderer.palette.unwrap();
    assert_eq!((palette.dark, palette.light), (LIGHT_RGB, DARK_RGB));

    let day = ThemeForm {
        theme: "day".to_string(),
    };
    assert_eq!(dark_system.submit_theme(&day, &mut renderer).unwrap(), Theme::Day);
}

#[test]
fn configured_night_theme_applies_at_start() {
    let settings = Settings {
        theme: Theme::Night,
        ..make_settings(36)
    };
    let mut browser = Browser::new(sample_catalog(1), &settings, true);
    let mut renderer = RecordingRenderer::default();
    browser.start(&mut renderer);
    assert_eq!(browser.theme(), Theme::Night);
    assert_eq!(renderer.palette.map(|p| p.dark), Some(LIGHT_RGB));
}
