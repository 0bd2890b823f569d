//! Truncation rules and the immutable rule set.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tf_error::{Result, TfError};

/// One truncation instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Fields to truncate, in order. Duplicates are applied again.
    #[serde(alias = "source_keys")]
    pub source_fields: Vec<String>,

    /// Condition deciding per event whether the rule applies.
    #[serde(default, alias = "truncate_when", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Character offset where the kept substring begins.
    #[serde(default, alias = "start_at")]
    pub start: usize,

    /// Maximum number of characters kept; unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl Rule {
    /// Creates an unconditional rule keeping everything from offset 0.
    pub fn new<I, S>(source_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_fields: source_fields.into_iter().map(Into::into).collect(),
            condition: None,
            start: 0,
            length: None,
        }
    }

    /// Sets the condition.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Sets the start offset.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Sets the maximum length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Checks the rule's structural constraints.
    pub fn validate(&self) -> Result<()> {
        if self.source_fields.is_empty() {
            return Err(TfError::Config(
                "source_fields must list at least one field".to_string(),
            ));
        }
        if self.source_fields.iter().any(String::is_empty) {
            return Err(TfError::Config(
                "source_fields must not contain an empty field name".to_string(),
            ));
        }
        if self.condition.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(TfError::Config("condition must not be blank".to_string()));
        }
        Ok(())
    }
}

/// Ordered, immutable sequence of rules.
///
/// Cloning shares the underlying rules, so one set can serve any number of
/// concurrent batches.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Arc<[Rule]>,
}

impl RuleSet {
    /// Builds a rule set, validating every rule.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        for (idx, rule) in rules.iter().enumerate() {
            rule.validate().map_err(|e| match e {
                TfError::Config(reason) => TfError::Config(format!("entry {idx}: {reason}")),
                other => other,
            })?;
        }
        Ok(Self { rules: rules.into() })
    }

    /// Iterates over rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
