//! Core domain types for Book Connect.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

mod catalog;
mod error;

pub use catalog::{Catalog, CatalogSource, LookupTable};
pub use error::{CatalogError, CriteriaError};

/// Form value meaning "do not filter on this field".
pub const ANY: &str = "any";

pub const DEFAULT_PAGE_SIZE: usize = 36;
pub const MAX_PAGE_SIZE: usize = 500;

/// RGB tokens for the two palette slots.
pub const DARK_RGB: &str = "10, 10, 20";
pub const LIGHT_RGB: &str = "255, 255, 255";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub published: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub popularity: u32,
}

impl Book {
    pub fn published_year(&self) -> Option<i32> {
        parse_published_year(&self.published)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// Accepts RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD`.
pub fn parse_published_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.year());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.year());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

/// Search form payload exactly as the user submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: ANY.to_string(),
            genre: ANY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyFilter {
    #[default]
    Any,
    Key(String),
}

impl KeyFilter {
    /// Only the literal `"any"` is a wildcard; every other value, blank or
    /// padded ones included, is a key that must exist in its table.
    pub fn parse(value: &str) -> Self {
        if value == ANY {
            KeyFilter::Any
        } else {
            KeyFilter::Key(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            KeyFilter::Any => ANY,
            KeyFilter::Key(key) => key,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, KeyFilter::Any)
    }
}

/// Validated filter input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title: String,
    pub author: KeyFilter,
    pub genre: KeyFilter,
}

impl FilterCriteria {
    /// Criteria that match the whole catalog.
    pub fn any() -> Self {
        Self::default()
    }

    /// Checks author and genre against the catalog tables.
    pub fn from_form(form: &SearchForm, catalog: &Catalog) -> Result<Self, CriteriaError> {
        let author = KeyFilter::parse(&form.author);
        if let KeyFilter::Key(key) = &author {
            if !catalog.authors().contains_key(key) {
                return Err(CriteriaError::UnknownAuthor(key.clone()));
            }
        }

        let genre = KeyFilter::parse(&form.genre);
        if let KeyFilter::Key(key) = &genre {
            if !catalog.genres().contains_key(key) {
                return Err(CriteriaError::UnknownGenre(key.clone()));
            }
        }

        Ok(Self {
            title: form.title.clone(),
            author,
            genre,
        })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.title.trim().is_empty() && self.author.is_any() && self.genre.is_any()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Day => Palette {
                dark: DARK_RGB,
                light: LIGHT_RGB,
            },
            Theme::Night => Palette {
                dark: LIGHT_RGB,
                light: DARK_RGB,
            },
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            _ => Err("unknown theme"),
        }
    }
}

/// Settings form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeForm {
    pub theme: String,
}

impl ThemeForm {
    pub fn parse(&self) -> Result<Theme, CriteriaError> {
        self.theme
            .parse::<Theme>()
            .map_err(|_| CriteriaError::UnknownTheme(self.theme.clone()))
    }
}

/// The two color tokens the page is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark: &'static str,
    pub light: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: usize,
    pub theme: Theme,
    pub system_prefers_dark: Option<bool>,
    pub catalog_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            theme: Theme::Day,
            system_prefers_dark: None,
            catalog_path: None,
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self.catalog_path = self
            .catalog_path
            .take()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());
    }
}
