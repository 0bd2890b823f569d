//! Core types for truncflow.
//!
//! This crate provides the foundational types used throughout the system:
//! - [`Event`] - Mutable key/value record flowing through the pipeline
//! - [`Value`] - Closed set of field value shapes (string, list, other)
//! - [`ProcessingConfig`] - Batch sizing and parallelism settings

pub mod config;
pub mod event;
pub mod value;

pub use config::*;
pub use event::*;
pub use value::*;
