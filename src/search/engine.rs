//! Search orchestration.
//!
//! [`SearchEngine`] runs a request through the pipeline:
//!
//! 1. validate arguments and score modifiers (before any retrieval work);
//! 2. retrieve base-scored hits from the index's [`Retriever`];
//! 3. rescore every hit against its full document;
//! 4. rank and truncate;
//! 5. project the returned documents.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{GlaiveError, Result};
use crate::modifier::{ScoreModifiers, validate};
use crate::search::config::SearchConfig;
use crate::search::projection::into_search_hits;
use crate::search::request::{BulkSearchQuery, MetadataFilter, SearchQuery};
use crate::search::rescore::{rank, rescore};
use crate::search::types::{BulkSearchResults, ScoredHit, SearchResults};

/// What the retriever is asked for.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
    pub filter: Option<&'a MetadataFilter>,
    pub searchable_attributes: Option<&'a [String]>,
}

impl<'a> RetrievalRequest<'a> {
    pub fn new(query: &'a str, limit: usize) -> Self {
        Self {
            query,
            limit,
            filter: None,
            searchable_attributes: None,
        }
    }
}

/// The retrieval engine behind an index.
///
/// Implementations return at most `limit` hits, best first, each carrying the
/// complete document. Filtering and searchable-attribute restriction are the
/// retriever's job.
pub trait Retriever: Send + Sync {
    fn retrieve(&self, request: &RetrievalRequest<'_>) -> Result<Vec<ScoredHit>>;
}

/// Runs searches against named indexes.
pub struct SearchEngine {
    config: SearchConfig,
    indexes: HashMap<String, Arc<dyn Retriever>>,
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.indexes.keys().collect();
        names.sort();
        f.debug_struct("SearchEngine")
            .field("config", &self.config)
            .field("indexes", &names)
            .finish()
    }
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            indexes: HashMap::new(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Register the retriever serving `name`.
    pub fn register_index<S: Into<String>>(
        &mut self,
        name: S,
        retriever: Arc<dyn Retriever>,
    ) -> Result<()> {
        let name = name.into();
        if self.indexes.contains_key(&name) {
            return Err(GlaiveError::invalid_argument(format!(
                "index '{name}' is already registered"
            )));
        }
        self.indexes.insert(name, retriever);
        Ok(())
    }

    /// Run a single search, applying the query's score modifiers.
    pub fn search(&self, index: &str, query: &SearchQuery) -> Result<SearchResults> {
        let limit = self.config.resolve_limit(query.limit)?;
        self.check_searchable_attributes(query)?;
        let modifiers = validate(query.score_modifiers.as_ref(), &self.config.modifier)?;
        let retriever = self.retriever(index)?;
        self.execute(retriever, query, limit, &modifiers)
    }

    /// Run several searches. Score modifiers are not supported here; a batch
    /// carrying any is rejected before the first query runs.
    pub fn bulk_search(&self, bulk: &BulkSearchQuery) -> Result<BulkSearchResults> {
        bulk.validate()?;

        let mut plans = Vec::with_capacity(bulk.queries.len());
        for entity in &bulk.queries {
            let limit = self.config.resolve_limit(entity.query.limit)?;
            self.check_searchable_attributes(&entity.query)?;
            let retriever = self.retriever(&entity.index)?;
            plans.push((retriever, &entity.query, limit));
        }

        let mut result = Vec::with_capacity(plans.len());
        for (retriever, query, limit) in plans {
            result.push(self.execute(retriever, query, limit, &ScoreModifiers::Identity)?);
        }
        Ok(BulkSearchResults { result })
    }

    fn execute(
        &self,
        retriever: &dyn Retriever,
        query: &SearchQuery,
        limit: usize,
        modifiers: &ScoreModifiers,
    ) -> Result<SearchResults> {
        let start = Instant::now();

        let request = RetrievalRequest {
            query: &query.q,
            limit,
            filter: query.filter.as_ref().filter(|filter| !filter.is_empty()),
            searchable_attributes: query.searchable_attributes.as_deref(),
        };
        let hits = retriever.retrieve(&request)?;
        log::debug!("retrieved {} hit(s) for query {:?}", hits.len(), query.q);

        let hits = rank(
            rescore(modifiers, hits, self.config.parallel_threshold),
            limit,
        );

        let hits = into_search_hits(
            hits,
            query.attributes_to_retrieve.as_deref(),
            &self.config.modifier.identity_field,
        );

        Ok(SearchResults {
            hits,
            query: query.q.clone(),
            limit,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn retriever(&self, index: &str) -> Result<&dyn Retriever> {
        self.indexes
            .get(index)
            .map(|retriever| retriever.as_ref())
            .ok_or_else(|| GlaiveError::not_found(format!("index '{index}'")))
    }

    fn check_searchable_attributes(&self, query: &SearchQuery) -> Result<()> {
        if query
            .searchable_attributes
            .as_ref()
            .is_some_and(|attributes| attributes.is_empty())
        {
            return Err(GlaiveError::invalid_argument(
                "searchableAttributes must not be empty when given",
            ));
        }
        Ok(())
    }
}
