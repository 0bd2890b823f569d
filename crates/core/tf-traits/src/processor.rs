//! Processor trait for event batch processing.

use tf_types::Event;

/// Trait for batch processors.
///
/// A processor receives a batch of events and returns the same events, in the
/// same order, possibly mutated. Per-event failures are handled inside the
/// processor and never shorten or reorder the batch.
///
/// # Thread Safety
///
/// Processors must be `Send + Sync` as one instance may serve several
/// batches concurrently.
pub trait Processor: Send + Sync {
    /// Processes a batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - Events to process
    ///
    /// # Returns
    ///
    /// The same events, same length and order
    fn execute(&self, batch: Vec<Event>) -> Vec<Event>;

    /// Returns the name of this processor for logging.
    fn name(&self) -> &str {
        "processor"
    }
}
