//! Expression evaluator trait for conditional processing.

use tf_error::Result;
use tf_types::Event;

/// Trait for boolean condition engines.
///
/// Evaluation is a synchronous call that may fail. A failure means the
/// condition could not be decided for this event (malformed expression,
/// missing field, non-boolean result) and must not be read as `false`.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluates `expression` against `event`.
    fn evaluate_conditional(&self, expression: &str, event: &Event) -> Result<bool>;

    /// Checks that `expression` is well formed without evaluating it.
    ///
    /// Called once per condition when rules are loaded.
    fn validate(&self, expression: &str) -> Result<()> {
        let _ = expression;
        Ok(())
    }
}
