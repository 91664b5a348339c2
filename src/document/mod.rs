//! Document module.
//!
//! Retrieved documents are schema-less maps from field name to
//! [`FieldValue`]. Score modifiers read numeric fields straight out of these
//! maps, so the full document must be available at scoring time.

#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;

// Re-export commonly used types
pub use document::{Document, DocumentBuilder, ID_FIELD};
pub use field_value::FieldValue;
