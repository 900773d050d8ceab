use serde::{Deserialize, Serialize};

pub mod dedup;
pub mod error;
pub mod index;
pub mod query;
pub mod shared;
pub mod tokenizer;

pub use dedup::remove_duplicates;
pub use error::{Result, SearchError};
pub use index::SearchEngine;
pub use query::Query;
pub use shared::SharedSearchEngine;

pub type DocId = u32;

/// Moderation status attached to a document at ingestion time. It does not
/// affect indexing; queries filter on it through the acceptance predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}
