//! Query parsing, compilation, and matching for catalog search.
//!
//! This module provides the query language for catalog search, including:
//! - Normalization of raw query text
//! - Parsed query values tagged with a combination strategy
//! - Filter expression types (field atoms, AND, OR, NOT, constants)
//! - Compilation from parsed queries to filter expressions
//! - Matching filter expressions against records

mod compile;
mod evaluate;
mod expression;
mod fields;
mod normalize;
mod parser;

// Re-export public types
pub use compile::compile;
pub use expression::{FilterExpression, ParsedQuery, SearchStrategy};
pub use fields::{FieldSource, SearchField, SEARCH_FIELDS};
pub use normalize::normalize_query;
pub use parser::QueryParser;
