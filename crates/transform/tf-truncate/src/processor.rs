//! TruncateProcessor - the batch orchestrator.

use crate::config::TruncateConfig;
use crate::dispatch::apply_rule_to_field;
use crate::gate::ConditionalGate;
use crate::rules::RuleSet;
use rayon::prelude::*;
use std::sync::Arc;
use tf_error::{Result, TfError};
use tf_traits::{DiagnosticSink, ExpressionEvaluator, Processor, TracingSink};
use tf_types::Event;
use tracing::{debug, trace};

/// What happened to one event of a batch.
#[derive(Debug)]
pub enum EventOutcome {
    /// Every rule ran.
    Done {
        /// String values rewritten across all rules
        values_truncated: usize,
    },

    /// Rule processing stopped early. The event keeps whatever changes were
    /// made before the failure.
    Failed {
        /// Why processing stopped
        error: TfError,
    },
}

impl EventOutcome {
    /// Returns true for [`EventOutcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Per-event outcomes of one batch, in batch order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<EventOutcome>,
}

impl BatchReport {
    /// Outcomes in batch order.
    pub fn outcomes(&self) -> &[EventOutcome] {
        &self.outcomes
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of events where every rule ran.
    pub fn succeeded(&self) -> usize {
        self.len() - self.failed()
    }

    /// Number of events that stopped on an error.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Total string values rewritten by events that completed.
    pub fn values_truncated(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                EventOutcome::Done { values_truncated } => *values_truncated,
                EventOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Returns true if no event failed.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

/// Processor that truncates event fields according to ordered rules.
///
/// Implements the [`Processor`] trait for use in a pipeline. One instance can
/// serve concurrent batches; all of its state is read-only.
pub struct TruncateProcessor {
    /// Rules in application order.
    rules: RuleSet,

    /// Decides conditional rules.
    gate: ConditionalGate,

    /// Receives per-event failures.
    sink: Arc<dyn DiagnosticSink>,

    /// Process the events of a batch on the rayon pool.
    parallel: bool,

    /// Processor name for logging.
    name: String,
}

impl std::fmt::Debug for TruncateProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TruncateProcessor")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

impl TruncateProcessor {
    /// Creates a processor from an already validated rule set.
    pub fn new(rules: RuleSet, evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        Self {
            rules,
            gate: ConditionalGate::new(evaluator),
            sink: Arc::new(TracingSink),
            parallel: false,
            name: "truncate".to_string(),
        }
    }

    /// Creates a processor from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration has no entries, or an entry is malformed
    /// - A condition is rejected by `evaluator`
    pub fn from_config(
        config: &TruncateConfig,
        evaluator: Arc<dyn ExpressionEvaluator>,
    ) -> Result<Self> {
        config.validate_with(evaluator.as_ref())?;
        let rules = config.rule_set()?;

        debug!(rules = rules.len(), "Created TruncateProcessor");

        Ok(Self::new(rules, evaluator))
    }

    /// Sets where per-event failures are reported.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Enables processing the events of a batch in parallel.
    ///
    /// Output order always matches input order.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the processor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Applies every rule, in order, to one event.
    ///
    /// Stops at the first failure, leaving earlier changes in place.
    ///
    /// # Returns
    ///
    /// Number of string values rewritten
    pub fn process_event(&self, event: &mut Event) -> Result<usize> {
        let mut rewritten = 0;
        for rule in &self.rules {
            if !self.gate.should_apply(rule, event)? {
                continue;
            }
            for field in &rule.source_fields {
                rewritten += apply_rule_to_field(event, field, rule.start, rule.length);
            }
        }
        Ok(rewritten)
    }

    /// Processes a batch in place and reports one outcome per event.
    ///
    /// Failed events are reported to the diagnostic sink and left in the
    /// batch.
    pub fn process_batch(&self, batch: &mut [Event]) -> BatchReport {
        trace!(
            processor = %self.name,
            events = batch.len(),
            rules = self.rules.len(),
            "Applying truncate rules"
        );

        let outcomes: Vec<EventOutcome> = if self.parallel {
            batch
                .par_iter_mut()
                .enumerate()
                .map(|(position, event)| self.run_event(position, event))
                .collect()
        } else {
            batch
                .iter_mut()
                .enumerate()
                .map(|(position, event)| self.run_event(position, event))
                .collect()
        };

        let report = BatchReport { outcomes };
        if !report.is_clean() {
            debug!(
                processor = %self.name,
                failed = report.failed(),
                events = report.len(),
                "Some events failed truncation"
            );
        }
        report
    }

    /// Processes a batch, returning the same events in the same order.
    pub fn process(&self, mut batch: Vec<Event>) -> Vec<Event> {
        self.process_batch(&mut batch);
        batch
    }

    fn run_event(&self, position: usize, event: &mut Event) -> EventOutcome {
        match self.process_event(event) {
            Ok(values_truncated) => EventOutcome::Done { values_truncated },
            Err(error) => {
                self.sink.event_failed(position, event, &error);
                EventOutcome::Failed { error }
            }
        }
    }
}

impl Processor for TruncateProcessor {
    fn execute(&self, batch: Vec<Event>) -> Vec<Event> {
        self.process(batch)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
