//! Rhai-based condition evaluation for truncflow.
//!
//! This crate provides [`RhaiEvaluator`], an implementation of
//! [`tf_traits::ExpressionEvaluator`] that decides rule conditions by
//! evaluating Rhai expressions against an event.
//!
//! # Features
//!
//! - **Field variables**: every event field is in scope under its own name
//! - **Whole event**: the event is also available as the map `event`
//! - **Compiled once**: each distinct condition is parsed a single time
//! - **Helper functions**: `length`, `has_key`
//!
//! # Example
//!
//! ```rust,ignore
//! use tf_expression::RhaiEvaluator;
//! use tf_traits::ExpressionEvaluator;
//!
//! let evaluator = RhaiEvaluator::new();
//! let matched = evaluator.evaluate_conditional(r#"status == 200 && level != "DEBUG""#, &event)?;
//! ```

mod builtin;
mod conversion;
mod evaluator;

pub use conversion::{event_to_map, value_to_dynamic};
pub use evaluator::RhaiEvaluator;
