//! Configuration for score modifier validation.

use serde::{Deserialize, Serialize};

use crate::document::ID_FIELD;
use crate::error::{GlaiveError, Result};

/// Settings consulted while validating a modifier specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierConfig {
    /// Field holding the document identity. Terms may never reference it.
    pub identity_field: String,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            identity_field: ID_FIELD.to_string(),
        }
    }
}

impl ModifierConfig {
    pub fn validate(&self) -> Result<()> {
        if self.identity_field.is_empty() {
            return Err(GlaiveError::invalid_config(
                "modifier.identity_field must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_config_default() {
        let config = ModifierConfig::default();
        assert_eq!(config.identity_field, "_id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_identity_field_rejected() {
        let config = ModifierConfig {
            identity_field: String::new(),
        };
        assert!(config.validate().is_err());
    }
}
