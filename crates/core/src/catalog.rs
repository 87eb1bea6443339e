//! The catalog store: books plus the author and genre display tables.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Book, CatalogError};

/// Key to display-name table. Keeps the order the source listed the keys in,
/// which is also the order filter options are offered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: Vec<(String, String)>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, name: impl Into<String>) {
        let key = key.into();
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = name,
            None => self.entries.push((key, name)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, name)| name.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = LookupTable::new();
        for (key, name) in iter {
            table.insert(key, name);
        }
        table
    }
}

impl Serialize for LookupTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, name) in &self.entries {
            map.serialize_entry(key, name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LookupTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = LookupTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of key to display name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = LookupTable::new();
                while let Some((key, name)) = access.next_entry::<String, String>()? {
                    table.insert(key, name);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Raw catalog data as it is shipped, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSource {
    pub books: Vec<Book>,
    pub authors: LookupTable,
    pub genres: LookupTable,
}

impl CatalogSource {
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.books, self.authors, self.genres)
    }
}

/// Immutable, validated catalog. Every book id is unique, every author and
/// genre key resolves, and every published date parses.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    authors: LookupTable,
    genres: LookupTable,
}

impl Catalog {
    pub fn new(
        books: Vec<Book>,
        authors: LookupTable,
        genres: LookupTable,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for book in &books {
            if !seen.insert(book.id.as_str()) {
                return Err(CatalogError::DuplicateId(book.id.clone()));
            }
            if book.genres.is_empty() {
                return Err(CatalogError::EmptyGenres {
                    id: book.id.clone(),
                });
            }
            if !authors.contains_key(&book.author) {
                return Err(CatalogError::UnknownAuthor {
                    id: book.id.clone(),
                    author: book.author.clone(),
                });
            }
            if let Some(genre) = book.genres.iter().find(|g| !genres.contains_key(g)) {
                return Err(CatalogError::UnknownGenre {
                    id: book.id.clone(),
                    genre: genre.clone(),
                });
            }
            if book.published_year().is_none() {
                return Err(CatalogError::InvalidPublished {
                    id: book.id.clone(),
                    published: book.published.clone(),
                });
            }
            if book.popularity > 100 {
                return Err(CatalogError::InvalidPopularity {
                    id: book.id.clone(),
                    popularity: book.popularity,
                });
            }
        }

        Ok(Self {
            books,
            authors,
            genres,
        })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn authors(&self) -> &LookupTable {
        &self.authors
    }

    pub fn genres(&self) -> &LookupTable {
        &self.genres
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Display name for an author key, or the key itself on a miss.
    pub fn author_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.authors.get(key).unwrap_or(key)
    }

    /// Display name for a genre key, or the key itself on a miss.
    pub fn genre_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.genres.get(key).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
