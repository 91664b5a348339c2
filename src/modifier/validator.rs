//! Validation of raw score modifier payloads.
//!
//! The accepted shape is:
//!
//! ```json
//! {
//!   "multiply_score_by": [{"field_name": "reputation", "weight": 1.5}],
//!   "add_to_score": [{"field_name": "rate"}]
//! }
//! ```
//!
//! Both keys are optional but at least one must be present, and a present key
//! must carry a non-empty list. Unknown keys are rejected at every level, so a
//! misspelled `multiply_scores_by` or `field_names` fails loudly instead of
//! silently doing nothing. The first violation found is reported.
//!
//! ```
//! use glaive::modifier::{ModifierConfig, validate};
//! use serde_json::json;
//!
//! let config = ModifierConfig::default();
//! let raw = json!({"add_to_score": [{"field_name": "rate", "weight": 2}]});
//! let modifiers = validate(Some(&raw), &config).unwrap();
//! assert_eq!(modifiers.spec().unwrap().add_terms().len(), 1);
//!
//! assert!(validate(Some(&json!({"add_to_score": []})), &config).is_err());
//! assert!(validate(None, &config).unwrap().is_identity());
//! ```

use serde_json::{Map, Value};

use crate::error::{GlaiveError, Result};
use crate::modifier::config::ModifierConfig;
use crate::modifier::spec::{ADD_TO_SCORE, MULTIPLY_SCORE_BY, ModifierSpec, ScoreModifiers, Term};

const FIELD_NAME: &str = "field_name";
const WEIGHT: &str = "weight";

/// Validate a raw modifier payload.
///
/// `None` and JSON `null` mean no modifiers were requested and yield
/// [`ScoreModifiers::Identity`].
pub fn validate(raw: Option<&Value>, config: &ModifierConfig) -> Result<ScoreModifiers> {
    let object = match raw {
        None | Some(Value::Null) => return Ok(ScoreModifiers::Identity),
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "score modifiers must be a JSON object, got {}",
                json_type(other)
            )));
        }
    };

    if let Some(key) = object
        .keys()
        .find(|key| key.as_str() != MULTIPLY_SCORE_BY && key.as_str() != ADD_TO_SCORE)
    {
        return Err(GlaiveError::invalid_modifier_spec(format!(
            "unknown key '{key}'; expected '{MULTIPLY_SCORE_BY}' and/or '{ADD_TO_SCORE}'"
        )));
    }

    if object.is_empty() {
        return Err(GlaiveError::invalid_modifier_spec(format!(
            "at least one of '{MULTIPLY_SCORE_BY}' or '{ADD_TO_SCORE}' must be provided"
        )));
    }

    let multiply_terms = parse_terms(object, MULTIPLY_SCORE_BY, config)?;
    let add_terms = parse_terms(object, ADD_TO_SCORE, config)?;

    let spec = ModifierSpec::new_unchecked(multiply_terms, add_terms);
    log::debug!(
        "validated score modifiers: {} multiply term(s), {} add term(s)",
        spec.multiply_terms().len(),
        spec.add_terms().len()
    );
    Ok(ScoreModifiers::Apply(spec))
}

/// Parse modifier JSON text and validate it.
///
/// Malformed JSON is reported as an invalid specification since it is just as
/// much a client mistake as a bad shape.
pub fn validate_str(text: &str, config: &ModifierConfig) -> Result<ScoreModifiers> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        GlaiveError::invalid_modifier_spec(format!("score modifiers are not valid JSON: {e}"))
    })?;
    validate(Some(&value), config)
}

impl ScoreModifiers {
    /// See [`validate_str`].
    pub fn from_json_str(text: &str, config: &ModifierConfig) -> Result<Self> {
        validate_str(text, config)
    }
}

fn parse_terms(object: &Map<String, Value>, key: &str, config: &ModifierConfig) -> Result<Vec<Term>> {
    let items = match object.get(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) if items.is_empty() => {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "'{key}' must be a non-empty list of terms"
            )));
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "'{key}' must be a non-empty list of terms, got {}",
                json_type(other)
            )));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_term(item, &format!("{key}[{i}]"), config))
        .collect()
}

fn parse_term(item: &Value, path: &str, config: &ModifierConfig) -> Result<Term> {
    let Value::Object(term) = item else {
        return Err(GlaiveError::invalid_modifier_spec(format!(
            "{path} must be an object with '{FIELD_NAME}' and optional '{WEIGHT}', got {}",
            json_type(item)
        )));
    };

    if let Some(key) = term
        .keys()
        .find(|key| key.as_str() != FIELD_NAME && key.as_str() != WEIGHT)
    {
        return Err(GlaiveError::invalid_modifier_spec(format!(
            "{path} has unknown key '{key}'; expected '{FIELD_NAME}' and optional '{WEIGHT}'"
        )));
    }

    let field_name = match term.get(FIELD_NAME) {
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "{path}.{FIELD_NAME} must be a string, got {}",
                json_type(other)
            )));
        }
        None => {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "{path} is missing '{FIELD_NAME}'"
            )));
        }
    };

    let parsed = match term.get(WEIGHT) {
        None => Term::new(field_name),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(weight) => Term::weighted(field_name, weight),
            None => {
                return Err(GlaiveError::invalid_modifier_spec(format!(
                    "{path}.{WEIGHT} is not representable as a float: {number}"
                )));
            }
        },
        Some(other) => {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "{path}.{WEIGHT} must be a number, got {}",
                json_type(other)
            )));
        }
    };

    parsed.check(path, config)?;
    Ok(parsed)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
