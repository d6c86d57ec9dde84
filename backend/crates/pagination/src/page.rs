//! Page envelope returned by list operations.

/// A single page of results.
///
/// `total` counts the items in this page only. It is not a count of all
/// matching rows, so clients cannot derive the number of pages from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: usize,
}

impl<T> Page<T> {
    /// Wrap the items of one page; the total is their count.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }

    /// A page with no items and a total of zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Items in this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items in this page.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Whether the page holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Transform every item, keeping the page-local total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page::from_items(self.items.into_iter().map(f).collect())
    }

    /// Split the page into its items and total.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, usize) {
        (self.items, self.total)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
