//! Search query compilation for the bookshelf catalog.
//!
//! This crate provides the pure half of search:
//! - Query normalization (trim, locale-invariant lowercasing)
//! - Query parsing in literal and operator modes (`|` for OR, `-` for NOT)
//! - Compilation of parsed queries into composable filter expressions
//! - In-process evaluation of filter expressions against record fields

pub mod error;
pub mod query;

// Re-export main types
pub use error::{QueryError, Result};
pub use query::{
    compile, normalize_query, FieldSource, FilterExpression, ParsedQuery, QueryParser,
    SearchField, SearchStrategy, SEARCH_FIELDS,
};
