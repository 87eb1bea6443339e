/// Tracks how much of the current result set has been revealed.
///
/// `revealed` never exceeds the result length; `reset` rebinds the cursor to
/// a new result set and starts over.
#[derive(Debug, Clone)]
pub struct PageCursor<T> {
    results: Vec<T>,
    revealed: usize,
    page_size: usize,
}

impl<T> PageCursor<T> {
    /// `page_size` of zero is bumped to one so `advance` always makes progress.
    pub fn new(page_size: usize) -> Self {
        Self {
            results: Vec::new(),
            revealed: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn reset(&mut self, results: Vec<T>) {
        self.results = results;
        self.revealed = 0;
    }

    /// Next page slice; empty once everything has been revealed.
    pub fn advance(&mut self) -> &[T] {
        let start = self.revealed;
        let end = start.saturating_add(self.page_size).min(self.results.len());
        self.revealed = end;
        tracing::debug!(start, end, total = self.results.len(), "advanced page cursor");
        &self.results[start..end]
    }

    pub fn remaining(&self) -> usize {
        self.results.len() - self.revealed
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Everything revealed so far.
    pub fn visible(&self) -> &[T] {
        &self.results[..self.revealed]
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
