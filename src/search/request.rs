//! Search request models.
//!
//! Requests use the camelCase field names of the wire format. Score modifiers
//! are kept as raw JSON here and only turned into
//! [`crate::modifier::ScoreModifiers`] when the request is executed, so that a
//! malformed payload is reported as an invalid modifier specification rather
//! than as a generic deserialization failure.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;
use crate::error::{GlaiveError, Result};

/// Structured equality filter over document metadata.
///
/// Filters are evaluated by the retriever; a document survives when every
/// listed field holds a scalar whose textual form equals the expected value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MetadataFilter {
    #[serde(default)]
    pub equals: HashMap<String, String>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn with_equals<K: Into<String>, V: Into<String>>(mut self, field: K, value: V) -> Self {
        self.equals.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.equals.iter().all(|(field, expected)| {
            document
                .get_field(field)
                .filter(|value| value.is_scalar())
                .map(|actual| actual.to_string() == *expected)
                .unwrap_or(false)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.equals.is_empty()
    }
}

/// A single search request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Query text handed to the retriever.
    pub q: String,
    /// Number of hits to return; the engine default applies when unset.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub filter: Option<MetadataFilter>,
    /// Restrict retrieval to these tensor fields.
    #[serde(default)]
    pub searchable_attributes: Option<Vec<String>>,
    /// Restrict the returned document fields to these (plus the identity).
    #[serde(default)]
    pub attributes_to_retrieve: Option<Vec<String>>,
    /// Raw score modifier payload.
    #[serde(default)]
    pub score_modifiers: Option<Value>,
}

impl SearchQuery {
    pub fn new<S: Into<String>>(q: S) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_searchable_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_attributes_to_retrieve<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_retrieve = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_score_modifiers(mut self, modifiers: Value) -> Self {
        self.score_modifiers = Some(modifiers);
        self
    }

    /// True when a modifier payload other than `null` is attached.
    pub fn has_score_modifiers(&self) -> bool {
        self.score_modifiers
            .as_ref()
            .is_some_and(|value| !value.is_null())
    }
}

/// One query of a bulk request, addressed to a named index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkSearchQueryEntity {
    pub index: String,
    #[serde(flatten)]
    pub query: SearchQuery,
}

impl BulkSearchQueryEntity {
    pub fn new<S: Into<String>>(index: S, query: SearchQuery) -> Self {
        Self {
            index: index.into(),
            query,
        }
    }
}

/// Several independent queries executed as one request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BulkSearchQuery {
    pub queries: Vec<BulkSearchQueryEntity>,
}

impl BulkSearchQuery {
    pub fn new(queries: Vec<BulkSearchQueryEntity>) -> Self {
        Self { queries }
    }

    /// Reject score modifiers anywhere in the batch.
    pub fn validate(&self) -> Result<()> {
        if let Some((i, entity)) = self
            .queries
            .iter()
            .enumerate()
            .find(|(_, entity)| entity.query.has_score_modifiers())
        {
            return Err(GlaiveError::unsupported_in_bulk(format!(
                "query {i} (index '{}') carries scoreModifiers; use a single search instead",
                entity.index
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_filter_matches_scalars_by_text() {
        let doc = Document::builder()
            .id("0")
            .add_text("filter", "original")
            .add_integer("year", 2024)
            .add_field("tags", crate::document::FieldValue::List(vec![]))
            .build();

        assert!(MetadataFilter::new().matches(&doc));
        assert!(MetadataFilter::new().with_equals("filter", "original").matches(&doc));
        assert!(MetadataFilter::new().with_equals("year", "2024").matches(&doc));
        assert!(!MetadataFilter::new().with_equals("filter", "other").matches(&doc));
        assert!(!MetadataFilter::new().with_equals("missing", "x").matches(&doc));
        assert!(!MetadataFilter::new().with_equals("tags", "[]").matches(&doc));
        assert!(
            !MetadataFilter::new()
                .with_equals("filter", "original")
                .with_equals("year", "1999")
                .matches(&doc)
        );
    }

    #[test]
    fn test_search_query_wire_format() {
        let query: SearchQuery = serde_json::from_value(json!({
            "q": "what is the rider doing?",
            "limit": 10,
            "filter": {"equals": {"filter": "original"}},
            "searchableAttributes": ["my_image_field"],
            "attributesToRetrieve": ["_id"],
            "scoreModifiers": {"add_to_score": [{"field_name": "add_1"}]}
        }))
        .unwrap();

        assert_eq!(query.limit, Some(10));
        assert_eq!(
            query.searchable_attributes.as_deref(),
            Some(&["my_image_field".to_string()][..])
        );
        assert!(query.has_score_modifiers());

        let minimal: SearchQuery = serde_json::from_value(json!({"q": "hehehe"})).unwrap();
        assert_eq!(minimal, SearchQuery::new("hehehe"));
        assert!(!minimal.has_score_modifiers());
    }

    #[test]
    fn test_null_modifiers_are_not_modifiers() {
        let query = SearchQuery::new("x").with_score_modifiers(Value::Null);
        assert!(!query.has_score_modifiers());
    }

    #[test]
    fn test_bulk_rejects_modifiers() {
        let bulk: BulkSearchQuery = serde_json::from_value(json!({
            "queries": [
                {"index": "bulk_test", "q": "hehehe", "limit": 2},
                {
                    "index": "bulk_test",
                    "q": "hehehe",
                    "limit": 2,
                    "scoreModifiers": {"multiply_score_by": [{"field_name": "multiply_1"}]}
                }
            ]
        }))
        .unwrap();
        assert_eq!(bulk.queries[0].index, "bulk_test");

        match bulk.validate() {
            Err(GlaiveError::UnsupportedInBulkContext(reason)) => {
                assert!(reason.contains("query 1"), "{reason}")
            }
            other => panic!("unexpected {other:?}"),
        }

        let plain = BulkSearchQuery::new(vec![BulkSearchQueryEntity::new(
            "bulk_test",
            SearchQuery::new("hehehe"),
        )]);
        assert!(plain.validate().is_ok());
    }
}
