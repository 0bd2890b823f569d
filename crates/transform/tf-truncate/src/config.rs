//! Configuration loading for the truncate processor.

use crate::rules::{Rule, RuleSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tf_error::{ReaderError, Result, TfError};
use tf_traits::ExpressionEvaluator;
use tracing::debug;

/// Configuration for a truncate processor.
///
/// ```yaml
/// entries:
///   - source_fields: ["message"]
///     length: 5
///   - source_fields: ["tags"]
///     condition: 'status == 200'
///     start: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TruncateConfig {
    /// Truncation rules in application order.
    pub entries: Vec<Rule>,
}

impl TruncateConfig {
    /// Creates a config from rules.
    pub fn new(entries: Vec<Rule>) -> Self {
        Self { entries }
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| TfError::Config(format!("Invalid truncate config: {e}")))
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TfError::Config(format!("Invalid truncate config: {e}")))
    }

    /// Loads a config file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReaderError::NotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ReaderError::Io(format!("Failed to read {}: {e}", path.display())))?;

        debug!(path = %path.display(), "Loading truncate config");

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Validates the structure of every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no entries
    /// - An entry has no source fields, or an empty field name
    /// - An entry has a blank condition
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(TfError::Config("entries must not be empty".to_string()));
        }
        self.rule_set().map(|_| ())
    }

    /// Validates the structure and checks every condition with `evaluator`.
    pub fn validate_with(&self, evaluator: &dyn ExpressionEvaluator) -> Result<()> {
        self.validate()?;
        for (idx, rule) in self.entries.iter().enumerate() {
            if let Some(condition) = &rule.condition {
                evaluator
                    .validate(condition)
                    .map_err(|e| TfError::Config(format!("entry {idx}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Builds the immutable rule set.
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::new(self.entries.clone())
    }
}
