//! Calculator configuration
//!
//! Defaults reproduce the stock browser calculator. A JSON document can
//! override any subset of fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

use crate::core::{CalcError, Operator};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but a value is unusable
    #[error("invalid configuration: {message}")]
    Invalid {
        /// What was wrong
        message: String,
    },
}

impl ConfigError {
    /// Creates a validation error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Tokens rendered in the live display in place of a failed result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorTokens {
    /// Shown when an operand does not parse
    pub parse: String,
    /// Shown when dividing by zero
    pub division_by_zero: String,
}

impl Default for ErrorTokens {
    fn default() -> Self {
        Self {
            parse: "Error".to_string(),
            division_by_zero: "Error: Div by 0".to_string(),
        }
    }
}

impl ErrorTokens {
    /// Returns the token for an evaluation error
    #[must_use]
    pub fn token_for(&self, err: &CalcError) -> &str {
        match err {
            CalcError::Parse { .. } => &self.parse,
            CalcError::DivisionByZero => &self.division_by_zero,
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Error tokens for the live display
    pub error_tokens: ErrorTokens,
    /// How long a pressed button keeps its `active` class, in milliseconds
    pub press_feedback_ms: u64,
    /// Replacement labels for operator buttons
    pub operator_labels: BTreeMap<Operator, String>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            error_tokens: ErrorTokens::default(),
            press_feedback_ms: Self::DEFAULT_PRESS_FEEDBACK_MS,
            operator_labels: BTreeMap::new(),
        }
    }
}

impl CalculatorConfig {
    /// Default press feedback window
    pub const DEFAULT_PRESS_FEEDBACK_MS: u64 = 100;

    /// Parses and validates a JSON configuration
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON configuration, falling back to defaults on any error
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            warn!(%err, "falling back to default calculator configuration");
            Self::default()
        })
    }

    /// Serializes the configuration as pretty JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.error_tokens.parse.is_empty() {
            return Err(ConfigError::invalid("parse error token is empty"));
        }
        if self.error_tokens.division_by_zero.is_empty() {
            return Err(ConfigError::invalid("division-by-zero token is empty"));
        }
        if self.press_feedback_ms == 0 {
            return Err(ConfigError::invalid("press_feedback_ms must be positive"));
        }
        if let Some((op, _)) = self
            .operator_labels
            .iter()
            .find(|(_, label)| label.trim().is_empty())
        {
            return Err(ConfigError::invalid(format!(
                "label for {} is empty",
                op.data_action()
            )));
        }
        Ok(())
    }

    /// Sets a label override
    #[must_use]
    pub fn with_operator_label(mut self, op: Operator, label: &str) -> Self {
        self.operator_labels.insert(op, label.to_string());
        self
    }
}
