//! Storage seams the search core depends on, with in-memory implementations.
//!
//! - [`RecordStore`]: evaluates a compiled filter and returns a page of books
//! - [`RankedCounter`]: atomic increment-by-member and descending range reads

mod ranked_counter;
mod record_store;

pub use ranked_counter::{MemoryRankedCounter, RankedCounter, SharedRankedCounter};
pub use record_store::{MemoryRecordStore, RecordStore, SharedRecordStore};
