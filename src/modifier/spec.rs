//! Validated score modifier types.
//!
//! A [`ModifierSpec`] can only be obtained through validation, either from raw
//! JSON ([`crate::modifier::validator::validate`]) or from terms built in code
//! ([`ModifierSpec::from_terms`]). Holding one is proof that the invariants
//! below hold:
//!
//! - at least one of the two term lists is non-empty;
//! - every term names a non-empty field other than the identity field.

use serde::Serialize;

use crate::error::{GlaiveError, Result};
use crate::modifier::config::ModifierConfig;

/// Request key holding the multiplicative terms.
pub const MULTIPLY_SCORE_BY: &str = "multiply_score_by";
/// Request key holding the additive terms.
pub const ADD_TO_SCORE: &str = "add_to_score";

/// One weighted field reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
}

impl Term {
    /// Create a term with the implicit weight of `1`.
    pub fn new<S: Into<String>>(field_name: S) -> Self {
        Self {
            field_name: field_name.into(),
            weight: None,
        }
    }

    /// Create a term with an explicit weight.
    pub fn weighted<S: Into<String>>(field_name: S, weight: f64) -> Self {
        Self {
            field_name: field_name.into(),
            weight: Some(weight),
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// The weight as supplied, `None` when it was omitted.
    pub fn declared_weight(&self) -> Option<f64> {
        self.weight
    }

    /// The effective weight.
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    pub(crate) fn check(&self, path: &str, config: &ModifierConfig) -> Result<()> {
        if self.field_name.is_empty() {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "{path}.field_name must not be empty"
            )));
        }
        if self.field_name == config.identity_field {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "{path}.field_name cannot be '{}'; the identity field is not a valid modifier input",
                config.identity_field
            )));
        }
        if let Some(weight) = self.weight
            && !weight.is_finite()
        {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "{path}.weight must be a finite number, got {weight}"
            )));
        }
        Ok(())
    }
}

/// A validated modifier specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierSpec {
    #[serde(rename = "multiply_score_by", skip_serializing_if = "Vec::is_empty")]
    multiply_terms: Vec<Term>,
    #[serde(rename = "add_to_score", skip_serializing_if = "Vec::is_empty")]
    add_terms: Vec<Term>,
}

impl ModifierSpec {
    /// Assemble a specification from terms, enforcing the same invariants as
    /// JSON validation. An empty list stands for "not supplied".
    pub fn from_terms(
        multiply_terms: Vec<Term>,
        add_terms: Vec<Term>,
        config: &ModifierConfig,
    ) -> Result<Self> {
        if multiply_terms.is_empty() && add_terms.is_empty() {
            return Err(GlaiveError::invalid_modifier_spec(format!(
                "at least one of '{MULTIPLY_SCORE_BY}' or '{ADD_TO_SCORE}' must be provided"
            )));
        }
        for (i, term) in multiply_terms.iter().enumerate() {
            term.check(&format!("{MULTIPLY_SCORE_BY}[{i}]"), config)?;
        }
        for (i, term) in add_terms.iter().enumerate() {
            term.check(&format!("{ADD_TO_SCORE}[{i}]"), config)?;
        }
        Ok(Self::new_unchecked(multiply_terms, add_terms))
    }

    pub(crate) fn new_unchecked(multiply_terms: Vec<Term>, add_terms: Vec<Term>) -> Self {
        Self {
            multiply_terms,
            add_terms,
        }
    }

    /// Multiplicative terms in declaration order.
    pub fn multiply_terms(&self) -> &[Term] {
        &self.multiply_terms
    }

    /// Additive terms in declaration order.
    pub fn add_terms(&self) -> &[Term] {
        &self.add_terms
    }

    /// Total number of terms.
    pub fn len(&self) -> usize {
        self.multiply_terms.len() + self.add_terms.len()
    }

    /// Always false for a validated specification.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every field name referenced by a term, in declaration order.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.multiply_terms
            .iter()
            .chain(self.add_terms.iter())
            .map(Term::field_name)
    }
}

/// The outcome of validating a request's modifier payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScoreModifiers {
    /// No modifiers were requested; scores pass through untouched.
    #[default]
    Identity,
    /// A validated specification to apply to every hit.
    Apply(ModifierSpec),
}

impl ScoreModifiers {
    pub fn is_identity(&self) -> bool {
        matches!(self, ScoreModifiers::Identity)
    }

    pub fn spec(&self) -> Option<&ModifierSpec> {
        match self {
            ScoreModifiers::Identity => None,
            ScoreModifiers::Apply(spec) => Some(spec),
        }
    }
}

impl From<ModifierSpec> for ScoreModifiers {
    fn from(spec: ModifierSpec) -> Self {
        ScoreModifiers::Apply(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_weight_defaults_to_one() {
        let term = Term::new("multiply_2");
        assert_eq!(term.declared_weight(), None);
        assert_eq!(term.weight(), 1.0);
        assert_eq!(Term::weighted("add_1", -3.0).weight(), -3.0);
    }

    #[test]
    fn test_from_terms_enforces_invariants() {
        let config = ModifierConfig::default();

        assert!(ModifierSpec::from_terms(vec![], vec![], &config).is_err());
        assert!(ModifierSpec::from_terms(vec![Term::new("_id")], vec![], &config).is_err());
        assert!(ModifierSpec::from_terms(vec![], vec![Term::new("")], &config).is_err());
        assert!(
            ModifierSpec::from_terms(vec![Term::weighted("a", f64::NAN)], vec![], &config)
                .is_err()
        );

        let spec = ModifierSpec::from_terms(
            vec![Term::new("multiply_1")],
            vec![Term::weighted("add_1", 2.0)],
            &config,
        )
        .unwrap();
        assert_eq!(spec.len(), 2);
        assert!(!spec.is_empty());
        assert_eq!(
            spec.referenced_fields().collect::<Vec<_>>(),
            vec!["multiply_1", "add_1"]
        );
    }

    #[test]
    fn test_identity_field_follows_config() {
        let config = ModifierConfig {
            identity_field: "doc_key".to_string(),
        };
        assert!(ModifierSpec::from_terms(vec![Term::new("_id")], vec![], &config).is_ok());
        let err =
            ModifierSpec::from_terms(vec![Term::new("doc_key")], vec![], &config).unwrap_err();
        assert!(err.to_string().contains("multiply_score_by[0].field_name"));
    }

    #[test]
    fn test_serializes_canonical_shape() {
        let spec = ModifierSpec::from_terms(
            vec![Term::new("multiply_2")],
            vec![],
            &ModifierConfig::default(),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"multiply_score_by": [{"field_name": "multiply_2"}]})
        );
    }

    #[test]
    fn test_score_modifiers_default_is_identity() {
        let modifiers = ScoreModifiers::default();
        assert!(modifiers.is_identity());
        assert!(modifiers.spec().is_none());
    }
}
