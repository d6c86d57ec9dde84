//! Lenient construction of offset pagination requests from query text.

use crate::SortOrder;

/// Parse a signed base-10 integer, yielding `0` for anything unparseable.
///
/// Empty strings, surrounding whitespace, non-digits and out-of-range values
/// all coerce to `0`; a leading `+` or `-` is accepted.
///
/// # Examples
///
/// ```
/// use pagination::coerce_integer;
///
/// assert_eq!(coerce_integer("25"), 25);
/// assert_eq!(coerce_integer("-3"), -3);
/// assert_eq!(coerce_integer("ten"), 0);
/// assert_eq!(coerce_integer(""), 0);
/// ```
#[must_use]
pub fn coerce_integer(text: &str) -> i64 {
    text.parse().unwrap_or(0)
}

/// Offset pagination parameters for a list query.
///
/// ## Invariants
/// - A raw limit of `0` means "no limit"; every other value, negative
///   included, is forwarded to the store untouched. Negative limits are not
///   clamped here: the database decides whether they are valid.
/// - The offset is always applied, even when it is `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    limit: i64,
    offset: i64,
    order: Option<SortOrder>,
}

impl PageRequest {
    /// Build a request from already-typed values.
    #[must_use]
    pub const fn new(limit: i64, offset: i64, order: Option<SortOrder>) -> Self {
        Self {
            limit,
            offset,
            order,
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Numbers go through [`coerce_integer`] and the order through
    /// [`SortOrder::parse_lenient`], so this never fails.
    #[must_use]
    pub fn from_query_text(limit: &str, offset: &str, order: &str) -> Self {
        Self::new(
            coerce_integer(limit),
            coerce_integer(offset),
            SortOrder::parse_lenient(order),
        )
    }

    /// Row limit to apply, or `None` when results are unbounded.
    #[must_use]
    pub const fn limit(&self) -> Option<i64> {
        if self.limit == 0 {
            None
        } else {
            Some(self.limit)
        }
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Primary-key ordering, if one was requested.
    #[must_use]
    pub const fn order(&self) -> Option<SortOrder> {
        self.order
    }
}
