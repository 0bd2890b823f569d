//! Shared utilities for truncflow CLI binaries.
//!
//! Logging setup and human-readable number formatting used by `tf-truncate`.

pub mod args;
pub mod format;
pub mod logging;

pub use args::{LogFormat, LogLevel};
pub use format::{format_bytes, format_number};
pub use logging::init_logging;
