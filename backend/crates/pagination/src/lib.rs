//! Offset pagination primitives shared by backend list endpoints.
//!
//! List endpoints accept loosely typed query text (`limit`, `offset`,
//! `order`) and never reject it: unparseable numbers fall back to zero and
//! unknown sort directions are ignored. This crate owns that coercion so
//! adapters and services agree on a single [`PageRequest`] shape, and it
//! provides the [`Page`] envelope whose total is page-local.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageRequest, SortOrder};
//!
//! let request = PageRequest::from_query_text("10", "abc", "DESC");
//! assert_eq!(request.limit(), Some(10));
//! assert_eq!(request.offset(), 0);
//! assert_eq!(request.order(), Some(SortOrder::Descending));
//!
//! let page = Page::from_items(vec!["a", "b"]);
//! assert_eq!(page.total(), 2);
//! ```

mod order;
mod page;
mod request;

pub use order::{SortOrder, SortOrderParseError};
pub use page::Page;
pub use request::{PageRequest, coerce_integer};
