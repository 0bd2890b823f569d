//! Core traits for truncflow.
//!
//! This crate defines the main abstractions for the pipeline:
//! - [`Processor`] - Trait for batch processors (truncation)
//! - [`ExpressionEvaluator`] - Trait for boolean condition engines (Rhai)
//! - [`DiagnosticSink`] - Trait for reporting per-event failures

pub mod diagnostic;
pub mod evaluator;
pub mod processor;

pub use diagnostic::*;
pub use evaluator::*;
pub use processor::*;
