//! Applying validated score modifiers to a hit.
//!
//! For a hit with base score `s` and document fields `d`:
//!
//! ```text
//! result = s
//! for each multiply term t (declaration order):
//!     if d[t.field] is numeric: result = result * t.weight * d[t.field]
//! addend = 0
//! for each add term t (declaration order):
//!     if d[t.field] is numeric: addend = addend + t.weight * d[t.field]
//! final = max(0.0, result + addend)
//! ```
//!
//! A term whose field is missing or not numeric is skipped. Skipping leaves the
//! running product alone; it does not zero it.

use std::collections::HashMap;

use crate::document::FieldValue;
use crate::modifier::spec::{ModifierSpec, ScoreModifiers, Term};

/// Compute the final score of one hit.
///
/// With [`ScoreModifiers::Identity`] the base score is returned unchanged,
/// bit for bit.
pub fn combine(
    modifiers: &ScoreModifiers,
    fields: &HashMap<String, FieldValue>,
    base_score: f64,
) -> f64 {
    match modifiers {
        ScoreModifiers::Identity => base_score,
        ScoreModifiers::Apply(spec) => spec.apply(fields, base_score),
    }
}

impl ModifierSpec {
    /// Compute the final score of one hit under this specification.
    pub fn apply(&self, fields: &HashMap<String, FieldValue>, base_score: f64) -> f64 {
        debug_assert!(
            !self.is_empty(),
            "score modifiers must be validated before they are applied"
        );

        // Successive multiplication of the running score, in declaration order.
        let mut result = base_score;
        for term in self.multiply_terms() {
            if let Some(value) = numeric_field(fields, term) {
                result = result * term.weight() * value;
            }
        }

        let mut addend = 0.0;
        for term in self.add_terms() {
            if let Some(value) = numeric_field(fields, term) {
                addend += term.weight() * value;
            }
        }

        (result + addend).max(0.0)
    }
}

impl ScoreModifiers {
    /// See [`combine`].
    pub fn apply(&self, fields: &HashMap<String, FieldValue>, base_score: f64) -> f64 {
        combine(self, fields, base_score)
    }
}

fn numeric_field(fields: &HashMap<String, FieldValue>, term: &Term) -> Option<f64> {
    let value = fields.get(term.field_name())?;
    let number = value.as_number();
    if number.is_none() {
        log::trace!(
            "skipping modifier field '{}': {} value is not numeric",
            term.field_name(),
            value.type_name()
        );
    }
    number
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::config::ModifierConfig;

    fn fields(entries: &[(&str, FieldValue)]) -> HashMap<String, FieldValue> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn spec(multiply: Vec<Term>, add: Vec<Term>) -> ScoreModifiers {
        ModifierSpec::from_terms(multiply, add, &ModifierConfig::default())
            .unwrap()
            .into()
    }

    fn canonical() -> ScoreModifiers {
        spec(
            vec![Term::weighted("multiply_1", 1.0), Term::new("multiply_2")],
            vec![Term::weighted("add_1", -3.0), Term::weighted("add_2", 1.0)],
        )
    }

    #[test]
    fn test_identity_is_exact() {
        let doc = fields(&[("multiply_1", FieldValue::Integer(5))]);
        for base in [0.0, 0.123_456_789_012_345_67, -1.5, 1e300, f64::MIN_POSITIVE] {
            let out = combine(&ScoreModifiers::Identity, &doc, base);
            assert_eq!(out.to_bits(), base.to_bits());
        }
    }

    #[test]
    fn test_canonical_example() {
        let doc = fields(&[
            ("multiply_1", FieldValue::Integer(1)),
            ("multiply_2", FieldValue::Float(20.0)),
            ("add_1", FieldValue::Float(1.0)),
            ("add_2", FieldValue::Float(30.0)),
        ]);
        let base = 0.75;
        assert_eq!(combine(&canonical(), &doc, base), 20.0 * base + 27.0);
    }

    #[test]
    fn test_multiply_by_zero_field() {
        let doc = fields(&[
            ("multiply_1", FieldValue::Integer(0)),
            ("multiply_2", FieldValue::Float(20.0)),
            ("add_1", FieldValue::Float(1.0)),
            ("add_2", FieldValue::Float(3.0)),
        ]);
        assert_eq!(combine(&canonical(), &doc, 0.9), 0.0);
    }

    #[test]
    fn test_negative_result_is_floored() {
        let doc = fields(&[
            ("multiply_1", FieldValue::Integer(1)),
            ("multiply_2", FieldValue::Float(-20.0)),
            ("add_1", FieldValue::Float(1.0)),
            ("add_2", FieldValue::Float(3.0)),
        ]);
        assert_eq!(combine(&canonical(), &doc, 0.5), 0.0);
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let doc = fields(&[
            ("multiply_2", FieldValue::Float(20.3)),
            ("add_1", FieldValue::Float(1.2)),
        ]);
        let base = 0.6;
        let expected = base * 20.3 + (-3.0 * 1.2);
        assert!((combine(&canonical(), &doc, base) - expected.max(0.0)).abs() < 1e-12);

        let empty = HashMap::new();
        assert_eq!(combine(&canonical(), &empty, base), base);
    }

    #[test]
    fn test_non_numeric_values_are_skipped_not_zeroed() {
        let modifiers = spec(vec![Term::new("m")], vec![]);
        let base = 0.4;
        for value in [
            FieldValue::Text("0".into()),
            FieldValue::Boolean(false),
            FieldValue::Null,
            FieldValue::List(vec![FieldValue::Integer(0)]),
            FieldValue::Object(HashMap::new()),
        ] {
            let doc = fields(&[("m", value)]);
            assert_eq!(combine(&modifiers, &doc, base), base);
        }
    }

    #[test]
    fn test_field_counts_exactly_when_it_has_a_number() {
        let modifiers = spec(vec![], vec![Term::weighted("a", 2.0)]);
        for value in [
            FieldValue::Integer(-4),
            FieldValue::Float(0.25),
            FieldValue::Text("7".into()),
            FieldValue::Boolean(true),
            FieldValue::Null,
        ] {
            let expected = 1.0 + value.as_number().map_or(0.0, |v| 2.0 * v);
            let doc = fields(&[("a", value)]);
            assert_eq!(combine(&modifiers, &doc, 1.0), expected.max(0.0));
        }
    }

    #[test]
    fn test_add_only_and_multiply_only() {
        let add_only = spec(vec![], vec![Term::weighted("a", 2.0)]);
        let doc = fields(&[("a", FieldValue::Integer(3)), ("m", FieldValue::Float(4.0))]);
        assert_eq!(combine(&add_only, &doc, 1.0), 7.0);

        let multiply_only = spec(vec![Term::weighted("m", 0.5)], vec![]);
        assert_eq!(combine(&multiply_only, &doc, 1.0), 2.0);
    }

    #[test]
    fn test_zero_weight_multiplies_to_zero() {
        let modifiers = spec(
            vec![Term::weighted("multiply_1", 1.0), Term::weighted("multiply_2", 0.0)],
            vec![Term::weighted("add_1", -3.0), Term::weighted("add_2", 1.0)],
        );
        let doc = fields(&[
            ("multiply_1", FieldValue::Integer(1)),
            ("multiply_2", FieldValue::Float(20.0)),
            ("add_1", FieldValue::Float(1.0)),
            ("add_2", FieldValue::Float(30.0)),
        ]);
        assert_eq!(combine(&modifiers, &doc, 0.8), 27.0);
    }

    #[test]
    fn test_sequential_multiplication_order() {
        // 0.1 * 3 * 0.7 differs from 0.1 * (3 * 0.7) in IEEE-754.
        let modifiers = spec(vec![Term::new("a"), Term::new("b")], vec![]);
        let doc = fields(&[("a", FieldValue::Integer(3)), ("b", FieldValue::Float(0.7))]);
        let base = 0.1;
        assert_eq!(combine(&modifiers, &doc, base), (base * 1.0 * 3.0) * 1.0 * 0.7);
    }

    #[test]
    fn test_never_negative() {
        let modifiers = spec(
            vec![Term::weighted("m", -2.0)],
            vec![Term::weighted("a", -10.0)],
        );
        for (m, a, base) in [(1.0, 1.0, 0.5), (-1.0, -1.0, 0.5), (3.0, 0.0, 2.0)] {
            let doc = fields(&[("m", FieldValue::Float(m)), ("a", FieldValue::Float(a))]);
            assert!(combine(&modifiers, &doc, base) >= 0.0);
        }
    }

    #[test]
    fn test_method_forms_agree() {
        let modifiers = canonical();
        let doc = fields(&[("multiply_2", FieldValue::Float(2.531))]);
        let spec = modifiers.spec().unwrap();
        assert_eq!(modifiers.apply(&doc, 0.3), spec.apply(&doc, 0.3));
        assert_eq!(modifiers.apply(&doc, 0.3), combine(&modifiers, &doc, 0.3));
    }
}
