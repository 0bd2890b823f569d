//! Integration tests for truncflow.
//!
//! These tests load rule files from disk, evaluate conditions with the Rhai
//! evaluator and run whole batches through the truncate processor.
//!
//! ```bash
//! cargo test -p integration-tests
//! ```

mod common;
mod pipeline_test;
mod rules_test;
