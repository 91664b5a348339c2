//! Attribute projection of returned documents.
//!
//! Projection runs after scoring; a field dropped here may still have
//! contributed to the hit's score.

use crate::document::Document;
use crate::search::types::{SCORE_FIELD, ScoredHit, SearchHit};

/// Keep the identity field and the requested attributes.
///
/// `None` keeps every field. Requested attributes the document lacks are
/// ignored.
pub fn project(document: Document, attributes: Option<&[String]>, identity_field: &str) -> Document {
    let Some(attributes) = attributes else {
        return document;
    };

    let mut projected = Document::new();
    if let Some(id) = document.get_field(identity_field) {
        projected.add_field(identity_field, id.clone());
    }
    for name in attributes {
        if let Some(value) = document.get_field(name) {
            projected.add_field(name.as_str(), value.clone());
        }
    }
    projected
}

/// Turn ranked hits into response hits, projecting each document.
///
/// A stored `_score` field is dropped so it cannot shadow the hit's score.
pub fn into_search_hits(
    hits: Vec<ScoredHit>,
    attributes: Option<&[String]>,
    identity_field: &str,
) -> Vec<SearchHit> {
    hits.into_iter()
        .map(|hit| {
            let mut document = project(hit.document, attributes, identity_field);
            if document.remove_field(SCORE_FIELD).is_some() {
                log::trace!("dropping stored '{SCORE_FIELD}' field from returned hit");
            }
            SearchHit {
                document,
                score: hit.score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::builder()
            .id("1")
            .add_text("my_text_field", "A rider is riding a horse jumping over the barrier.")
            .add_integer("multiply_1", 1)
            .add_float("add_2", 30.0)
            .build()
    }

    #[test]
    fn test_no_projection_keeps_everything() {
        assert_eq!(project(sample(), None, "_id"), sample());
    }

    #[test]
    fn test_identity_only() {
        let attributes = vec!["_id".to_string()];
        let projected = project(sample(), Some(attributes.as_slice()), "_id");
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.id(), Some("1"));

        let projected = project(sample(), Some(&[][..]), "_id");
        assert_eq!(projected.field_names(), vec!["_id"]);
    }

    #[test]
    fn test_into_search_hits_keeps_scores() {
        let hits = vec![ScoredHit::new(sample(), 42.0)];
        let attributes = vec!["multiply_1".to_string()];
        let out = into_search_hits(hits, Some(attributes.as_slice()), "_id");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].score, 42.0);
        assert_eq!(out[0].document.len(), 2);
        assert_eq!(out[0].id(), Some("1"));
    }

    #[test]
    fn test_stored_score_field_is_not_returned() {
        let document = Document::builder()
            .id("1")
            .add_float(SCORE_FIELD, 99.0)
            .add_integer("multiply_1", 1)
            .build();
        let hits = vec![ScoredHit::new(document, 0.5)];

        let out = into_search_hits(hits.clone(), None, "_id");
        assert!(!out[0].document.has_field(SCORE_FIELD));
        assert!(out[0].document.has_field("multiply_1"));
        let json = serde_json::to_string(&out[0]).unwrap();
        assert_eq!(json.matches("\"_score\"").count(), 1);
        assert_eq!(serde_json::to_value(&out[0]).unwrap()["_score"], 0.5);

        let attributes = vec![SCORE_FIELD.to_string()];
        let out = into_search_hits(hits, Some(attributes.as_slice()), "_id");
        assert_eq!(out[0].document.field_names(), vec!["_id"]);
    }

    #[test]
    fn test_selected_attributes() {
        let attributes = vec!["add_2".to_string(), "not_there".to_string()];
        let projected = project(sample(), Some(attributes.as_slice()), "_id");
        assert_eq!(projected.len(), 2);
        assert!(projected.has_field("add_2"));
        assert!(!projected.has_field("multiply_1"));
        assert!(!projected.has_field("not_there"));
    }
}
