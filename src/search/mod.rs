//! Search pipeline around score modifiers.
//!
//! Retrieval itself is delegated to a [`Retriever`]; this module validates the
//! request, rescores what comes back, ranks and truncates it, and projects the
//! returned documents. [`MemoryRetriever`] is a ready-made retriever over
//! documents with precomputed scores.

pub mod config;
pub mod engine;
pub mod memory;
pub mod projection;
pub mod request;
pub mod rescore;
pub mod types;

pub use config::SearchConfig;
pub use engine::{RetrievalRequest, Retriever, SearchEngine};
pub use memory::MemoryRetriever;
pub use request::{BulkSearchQuery, BulkSearchQueryEntity, MetadataFilter, SearchQuery};
pub use rescore::{rank, rescore};
pub use types::{BulkSearchResults, SCORE_FIELD, ScoredHit, SearchHit, SearchResults};
