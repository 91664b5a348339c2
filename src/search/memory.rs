//! In-memory retriever with precomputed scores.
//!
//! [`MemoryRetriever`] stands in for a vector index in fixtures and tests:
//! every document is stored with a base score per tensor field, and a query
//! returns each document's best score over the fields it is allowed to search.
//! The query text itself is not interpreted.

use std::collections::{HashMap, HashSet};

use crate::document::{Document, ID_FIELD};
use crate::error::{GlaiveError, Result};
use crate::search::engine::{RetrievalRequest, Retriever};
use crate::search::rescore::compare_scores;
use crate::search::types::ScoredHit;

#[derive(Debug, Clone)]
struct MemoryEntry {
    document: Document,
    field_scores: HashMap<String, f64>,
}

impl MemoryEntry {
    fn best_score(&self, searchable: Option<&[String]>) -> Option<f64> {
        self.field_scores
            .iter()
            .filter(|(field, _)| searchable.is_none_or(|allowed| allowed.contains(*field)))
            .map(|(_, score)| *score)
            .max_by(|a, b| compare_scores(*a, *b))
    }
}

/// Retriever over documents held in memory.
#[derive(Debug, Clone)]
pub struct MemoryRetriever {
    identity_field: String,
    entries: Vec<MemoryEntry>,
    ids: HashSet<String>,
}

impl Default for MemoryRetriever {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRetriever {
    pub fn new() -> Self {
        Self::with_identity_field(ID_FIELD)
    }

    pub fn with_identity_field<S: Into<String>>(identity_field: S) -> Self {
        Self {
            identity_field: identity_field.into(),
            entries: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Store a document together with its base score for each tensor field.
    pub fn insert<I, S>(&mut self, document: Document, field_scores: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let id = document
            .id_in(&self.identity_field)
            .ok_or_else(|| {
                GlaiveError::invalid_argument(format!(
                    "document is missing a text '{}' field",
                    self.identity_field
                ))
            })?
            .to_string();
        if !self.ids.insert(id.clone()) {
            return Err(GlaiveError::invalid_argument(format!(
                "duplicate document id '{id}'"
            )));
        }

        self.entries.push(MemoryEntry {
            document,
            field_scores: field_scores
                .into_iter()
                .map(|(field, score)| (field.into(), score))
                .collect(),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Retriever for MemoryRetriever {
    fn retrieve(&self, request: &RetrievalRequest<'_>) -> Result<Vec<ScoredHit>> {
        let mut hits: Vec<ScoredHit> = self
            .entries
            .iter()
            .filter(|entry| request.filter.is_none_or(|filter| filter.matches(&entry.document)))
            .filter_map(|entry| {
                entry
                    .best_score(request.searchable_attributes)
                    .map(|score| ScoredHit::new(entry.document.clone(), score))
            })
            .collect();

        hits.sort_by(|a, b| compare_scores(b.score, a.score));
        hits.truncate(request.limit);
        Ok(hits)
    }
}
