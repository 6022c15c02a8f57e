//! Limits applied to rule sets.
//!
//! A rule set is embedded in a policy document that is hashed, signed and
//! sent over the network, so a loader may bound how much it will accept.
//! Every limit is off by default; a caller opts in through
//! `RuleSet::with_config` or `RuleSet::from_wire_with_config`. Limits can be
//! loaded from a TOML file:
//!
//! ```toml
//! max_rules = 64
//! max_action_len = 128
//! max_expression_len = 4096
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rules::RuleError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSetConfig {
    /// Maximum number of rules in a set (None = unbounded)
    pub max_rules: Option<usize>,

    /// Maximum length of an action name, in bytes (None = unbounded)
    pub max_action_len: Option<usize>,

    /// Maximum length of an expression, in bytes (None = unbounded)
    pub max_expression_len: Option<usize>,
}

impl RuleSetConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, RuleError> {
        let config: RuleSetConfig = toml::from_str(content)
            .map_err(|e| RuleError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RuleError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.max_action_len == Some(0) {
            return Err(RuleError::Config(
                "max_action_len must be greater than zero when set".to_string(),
            ));
        }
        if self.max_rules == Some(0) {
            return Err(RuleError::Config(
                "max_rules must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn check_action(&self, action: &str) -> Result<(), RuleError> {
        if action.is_empty() {
            return Err(RuleError::InvalidAction("action cannot be empty".to_string()));
        }
        match self.max_action_len {
            Some(max) if action.len() > max => Err(RuleError::LimitExceeded(format!(
                "action is {} bytes, limit is {}",
                action.len(),
                max
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_expression(
        &self,
        action: &str,
        expression: &[u8],
    ) -> Result<(), RuleError> {
        match self.max_expression_len {
            Some(max) if expression.len() > max => Err(RuleError::LimitExceeded(format!(
                "expression for {} is {} bytes, limit is {}",
                action,
                expression.len(),
                max
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_count(&self, count: usize) -> Result<(), RuleError> {
        match self.max_rules {
            Some(max) if count > max => Err(RuleError::LimitExceeded(format!(
                "rule set holds {} rules, limit is {}",
                count, max
            ))),
            _ => Ok(()),
        }
    }
}
