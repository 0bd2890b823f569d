//! Conditional gate deciding whether a rule applies to an event.

use crate::rules::Rule;
use std::sync::Arc;
use tf_error::Result;
use tf_traits::ExpressionEvaluator;
use tf_types::Event;

/// Decides per event whether a rule applies.
#[derive(Clone)]
pub struct ConditionalGate {
    evaluator: Arc<dyn ExpressionEvaluator>,
}

impl std::fmt::Debug for ConditionalGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionalGate").finish_non_exhaustive()
    }
}

impl ConditionalGate {
    /// Creates a gate delegating to `evaluator`.
    pub fn new(evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Returns whether `rule` applies to `event`.
    ///
    /// Rules without a condition always apply. Evaluator failures are
    /// returned as errors, never read as `false`.
    pub fn should_apply(&self, rule: &Rule, event: &Event) -> Result<bool> {
        match &rule.condition {
            None => Ok(true),
            Some(condition) => self.evaluator.evaluate_conditional(condition, event),
        }
    }
}
