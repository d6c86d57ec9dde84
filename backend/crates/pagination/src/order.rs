//! Sort direction for list queries ordered by primary key.

use std::fmt;
use std::str::FromStr;

/// Direction applied to the primary-key ordering of a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest identifier first (`asc`).
    Ascending,
    /// Largest identifier first (`desc`).
    Descending,
}

/// Returned by [`SortOrder::from_str`] for text that names no direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order `{value}`; expected `asc` or `desc`")]
pub struct SortOrderParseError {
    value: String,
}

impl SortOrder {
    /// Parse a direction, ignoring ASCII case.
    ///
    /// Returns `None` for anything other than `asc` or `desc`, including the
    /// empty string, so callers can treat "no usable order" as "unordered".
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::SortOrder;
    ///
    /// assert_eq!(SortOrder::parse_lenient("AsC"), Some(SortOrder::Ascending));
    /// assert_eq!(SortOrder::parse_lenient("newest"), None);
    /// ```
    #[must_use]
    pub fn parse_lenient(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if text.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else {
            Err(SortOrderParseError {
                value: text.to_owned(),
            })
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}
