//! RhaiEvaluator - the condition evaluator implementation.

use crate::builtin::register_condition_functions;
use crate::conversion::populate_scope;
use parking_lot::RwLock;
use rhai::{Dynamic, Engine, Scope, AST};
use std::collections::HashMap;
use std::sync::Arc;
use tf_error::{Result, TransformError};
use tf_traits::ExpressionEvaluator;
use tf_types::Event;
use tracing::{debug, trace};

/// Rhai-based evaluator for rule conditions.
///
/// Conditions are Rhai expressions (no statements) that must produce a
/// boolean. Each distinct condition is compiled on first use and the AST is
/// shared by every later evaluation, from any thread.
pub struct RhaiEvaluator {
    /// Rhai engine with registered functions.
    engine: Engine,

    /// Compiled conditions keyed by their source text.
    cache: RwLock<HashMap<String, Arc<AST>>>,
}

impl std::fmt::Debug for RhaiEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RhaiEvaluator")
            .field("cached_expressions", &self.cached_expressions())
            .finish_non_exhaustive()
    }
}

impl Default for RhaiEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RhaiEvaluator {
    /// Creates an evaluator with the helper functions registered.
    pub fn new() -> Self {
        let mut engine = Self::create_engine();
        register_condition_functions(&mut engine);

        Self {
            engine,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a Rhai engine with limits on condition complexity.
    fn create_engine() -> Engine {
        let mut engine = Engine::new();

        // Bound the condition only; event values of any size are accepted (0 = unlimited)
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);
        engine.set_max_string_size(0);
        engine.set_max_array_size(0);
        engine.set_max_map_size(0);
        engine.set_max_call_levels(16);

        engine.set_optimization_level(rhai::OptimizationLevel::Full);

        engine
    }

    /// Number of distinct conditions compiled so far.
    pub fn cached_expressions(&self) -> usize {
        self.cache.read().len()
    }

    /// Returns the compiled AST for `expression`, compiling it on first use.
    fn compile(&self, expression: &str) -> std::result::Result<Arc<AST>, String> {
        if let Some(ast) = self.cache.read().get(expression) {
            return Ok(Arc::clone(ast));
        }

        let ast = self
            .engine
            .compile_expression(expression)
            .map(Arc::new)
            .map_err(|e| format!("'{expression}': {e}"))?;

        debug!(expression, "Compiled condition");

        let mut cache = self.cache.write();
        let ast = cache
            .entry(expression.to_string())
            .or_insert_with(|| ast)
            .clone();
        Ok(ast)
    }
}

impl ExpressionEvaluator for RhaiEvaluator {
    fn evaluate_conditional(&self, expression: &str, event: &Event) -> Result<bool> {
        let ast = self.compile(expression).map_err(TransformError::Evaluation)?;

        let mut scope = Scope::new();
        populate_scope(event, &mut scope);

        let result: Dynamic = self
            .engine
            .eval_ast_with_scope(&mut scope, &ast)
            .map_err(|e| TransformError::Evaluation(format!("'{expression}': {e}")))?;

        trace!(expression, result = %result, "Evaluated condition");

        result.as_bool().map_err(|type_name| {
            TransformError::Evaluation(format!(
                "'{expression}' returned {type_name}, expected bool"
            ))
            .into()
        })
    }

    fn validate(&self, expression: &str) -> Result<()> {
        self.compile(expression)
            .map(|_| ())
            .map_err(|e| TransformError::Compilation(e).into())
    }
}
