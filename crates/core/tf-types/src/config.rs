//! Configuration types for batch processing settings.

use serde::{Deserialize, Serialize};
use tf_error::{Result, TfError};

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Number of threads in the rayon pool (1 = sequential)
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Number of events per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl ProcessingConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Returns true if batches should be processed on a thread pool.
    pub fn is_parallel(&self) -> bool {
        self.threads > 1
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(TfError::Config("threads must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(TfError::Config("batch_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

fn default_batch_size() -> usize {
    2000
}
