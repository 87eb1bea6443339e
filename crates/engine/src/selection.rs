use bookconnect_core::Book;

/// A node in an interaction path that may carry a preview identifier.
pub trait TaggedNode {
    fn preview_tag(&self) -> Option<&str>;
}

impl TaggedNode for Option<String> {
    fn preview_tag(&self) -> Option<&str> {
        self.as_deref()
    }
}

impl TaggedNode for Option<&str> {
    fn preview_tag(&self) -> Option<&str> {
        *self
    }
}

impl<N: TaggedNode + ?Sized> TaggedNode for &N {
    fn preview_tag(&self) -> Option<&str> {
        (**self).preview_tag()
    }
}

/// Resolves an interaction path (innermost node first) to the book it
/// represents.
///
/// Only the first tagged node counts. An untagged path or a tag that names no
/// book yields `None`. A dangling inner tag ends the walk: outer tagged nodes
/// are never tried, so `[Some("ghost"), Some("a")]` resolves to `None`.
pub fn resolve_selection<'a, N, I>(path: I, books: &'a [Book]) -> Option<&'a Book>
where
    N: TaggedNode,
    I: IntoIterator<Item = N>,
{
    let mut path = path.into_iter();
    let Some(tag) = path.find_map(|node| node.preview_tag().map(str::to_owned)) else {
        tracing::debug!("no preview tag in interaction path");
        return None;
    };

    let found = books.iter().find(|book| book.id == tag);
    if found.is_none() {
        tracing::warn!(id = %tag, "preview tag does not name a catalog book");
    }
    found
}
