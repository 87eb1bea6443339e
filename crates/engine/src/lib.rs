//! Filtering, paging, selection and theme resolution for the catalog browser.
//!
//! Everything here is synchronous and free of I/O.

mod filter;
mod pagination;
mod selection;
mod theme;

pub use filter::{filter, matches_author, matches_genre, matches_title};
pub use pagination::PageCursor;
pub use selection::{TaggedNode, resolve_selection};
pub use theme::resolve_theme;
