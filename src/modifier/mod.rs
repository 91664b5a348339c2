//! Score modifiers.
//!
//! A score modifier specification rewrites a hit's base relevance score using
//! numeric fields of the hit's own document: a list of weighted fields the
//! running score is multiplied by, and a list of weighted fields added on top.
//!
//! Validation happens once per request and produces [`ScoreModifiers`];
//! [`combine`] then runs once per hit. Both are pure functions.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use glaive::document::FieldValue;
//! use glaive::modifier::{ModifierConfig, combine, validate};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "multiply_score_by": [{"field_name": "popularity"}],
//!     "add_to_score": [{"field_name": "boost", "weight": 0.5}]
//! });
//! let modifiers = validate(Some(&raw), &ModifierConfig::default()).unwrap();
//!
//! let mut fields = HashMap::new();
//! fields.insert("popularity".to_string(), FieldValue::Float(2.0));
//! fields.insert("boost".to_string(), FieldValue::Integer(4));
//!
//! assert_eq!(combine(&modifiers, &fields, 0.5), 0.5 * 2.0 + 0.5 * 4.0);
//! ```

pub mod combinator;
pub mod config;
pub mod spec;
pub mod validator;

pub use combinator::combine;
pub use config::ModifierConfig;
pub use spec::{ADD_TO_SCORE, MULTIPLY_SCORE_BY, ModifierSpec, ScoreModifiers, Term};
pub use validator::{validate, validate_str};
