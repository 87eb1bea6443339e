use thiserror::Error;

/// Data errors found while building the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate book id `{0}`")]
    DuplicateId(String),

    #[error("book `{id}` has no genres")]
    EmptyGenres { id: String },

    #[error("book `{id}` references unknown author `{author}`")]
    UnknownAuthor { id: String, author: String },

    #[error("book `{id}` references unknown genre `{genre}`")]
    UnknownGenre { id: String, genre: String },

    #[error("book `{id}` has unparseable published date `{published}`")]
    InvalidPublished { id: String, published: String },

    #[error("book `{id}` has popularity {popularity}, expected 0..=100")]
    InvalidPopularity { id: String, popularity: u32 },
}

/// Rejected form input, caught before it reaches the filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("unknown author filter `{0}`")]
    UnknownAuthor(String),

    #[error("unknown genre filter `{0}`")]
    UnknownGenre(String),

    #[error("unknown theme `{0}`, expected `day` or `night`")]
    UnknownTheme(String),
}
