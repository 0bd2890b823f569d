//! Rule-driven field truncation for truncflow pipelines.
//!
//! This crate provides [`TruncateProcessor`], a [`tf_traits::Processor`] that
//! shortens string fields of events according to an ordered list of
//! [`Rule`]s.
//!
//! # Features
//!
//! - **Ordered rules**: rules apply in configuration order; later rules see
//!   the output of earlier ones
//! - **Conditional rules**: a rule may carry a condition decided per event by
//!   an [`tf_traits::ExpressionEvaluator`]
//! - **Strings and lists**: string fields are truncated, and so are the string
//!   elements of list fields
//! - **Failure isolation**: an event that fails stays in the batch, the rest
//!   of the batch carries on
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tf_expression::RhaiEvaluator;
//! use tf_traits::Processor;
//! use tf_truncate::{TruncateConfig, TruncateProcessor};
//!
//! let config = TruncateConfig::from_yaml_str(r#"
//! entries:
//!   - source_fields: ["message"]
//!     length: 5
//!     condition: 'status == 200'
//! "#)?;
//!
//! let processor = TruncateProcessor::from_config(&config, Arc::new(RhaiEvaluator::new()))?;
//! let batch = processor.execute(batch);
//! ```

mod config;
mod dispatch;
mod gate;
mod processor;
mod rules;
mod truncate;

pub use config::TruncateConfig;
pub use dispatch::apply_rule_to_field;
pub use gate::ConditionalGate;
pub use processor::{BatchReport, EventOutcome, TruncateProcessor};
pub use rules::{Rule, RuleSet};
pub use truncate::truncate;
