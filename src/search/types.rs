//! Hit and result types shared by the search pipeline.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// A hit as produced by the retriever: the full document and its base score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredHit {
    pub document: Document,
    pub score: f64,
}

impl ScoredHit {
    pub fn new(document: Document, score: f64) -> Self {
        Self { document, score }
    }
}

/// Key under which a returned hit carries its final score.
pub const SCORE_FIELD: &str = "_score";

/// A hit as returned to the caller.
///
/// Serializes flat: the (projected) document fields next to `_score`. A stored
/// field of that name is not returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    #[serde(flatten)]
    pub document: Document,
    #[serde(rename = "_score")]
    pub score: f64,
}

impl SearchHit {
    pub fn id(&self) -> Option<&str> {
        self.document.id()
    }
}

/// Results of a single search.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Hits sorted by final score, descending.
    pub hits: Vec<SearchHit>,
    pub query: String,
    pub limit: usize,
    pub processing_time_ms: u64,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn best_hit(&self) -> Option<&SearchHit> {
        self.hits.first()
    }
}

/// Results of a bulk search, one entry per query in request order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BulkSearchResults {
    pub result: Vec<SearchResults>,
}
