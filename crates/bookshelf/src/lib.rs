pub mod error;
pub mod types;
pub mod config;

pub mod book;
pub mod storage;
pub mod popularity;
pub mod search;

pub use crate::book::{Book, BookService};
pub use crate::config::{load_or_create_config, BookshelfConfig};
pub use crate::error::{ErrorBody, ServiceError, ServiceResult};
pub use crate::popularity::{PopularityAggregator, PopularityEntry, RecordHandle};
pub use crate::search::{SearchOutcome, SearchService};
pub use crate::storage::{
    MemoryRankedCounter, MemoryRecordStore, RankedCounter, RecordStore, SharedRankedCounter,
    SharedRecordStore,
};
pub use crate::types::{
    BookDetail, BookSummary, Page, PageInfo, PageRequest, SearchKeyword, SearchMetadata,
    SearchResponse,
};
