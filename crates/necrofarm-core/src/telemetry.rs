//! Activity counter forwarding.
//!
//! Transitions return counter deltas; the dispatcher hands them to a
//! [`TelemetrySink`]. A sink failure is logged and swallowed so telemetry
//! can never fail a player action.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use necrofarm_types::ActivityCounter;

/// Errors a telemetry sink can report.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The sink could not record the increment.
    #[error("telemetry sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for activity counter increments.
pub trait TelemetrySink {
    /// Record one increment of `counter`.
    fn increment(&self, counter: ActivityCounter) -> Result<(), TelemetryError>;
}

/// Discards every increment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn increment(&self, _counter: ActivityCounter) -> Result<(), TelemetryError> {
        Ok(())
    }
}

/// Keeps running totals in memory.
#[derive(Debug, Default)]
pub struct CountingSink {
    counts: Mutex<BTreeMap<ActivityCounter, u64>>,
}

impl CountingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current total for `counter`.
    pub fn count(&self, counter: ActivityCounter) -> u64 {
        self.counts
            .lock()
            .map(|counts| counts.get(&counter).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Snapshot of every non-zero total, keyed by counter name.
    pub fn totals(&self) -> BTreeMap<&'static str, u64> {
        self.counts
            .lock()
            .map(|counts| counts.iter().map(|(c, n)| (c.name(), *n)).collect())
            .unwrap_or_default()
    }
}

impl TelemetrySink for CountingSink {
    fn increment(&self, counter: ActivityCounter) -> Result<(), TelemetryError> {
        let mut counts = self
            .counts
            .lock()
            .map_err(|e| TelemetryError::Unavailable(e.to_string()))?;
        let total = counts.entry(counter).or_insert(0);
        *total = total.saturating_add(1);
        Ok(())
    }
}

/// Send each counter to `sink`, logging failures instead of returning them.
pub(crate) fn forward(sink: &dyn TelemetrySink, counters: &[ActivityCounter]) {
    for counter in counters {
        match sink.increment(*counter) {
            Ok(()) => debug!(counter = counter.name(), "activity recorded"),
            Err(e) => warn!(
                counter = counter.name(),
                error = %e,
                "failed to record activity counter"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSink;

    impl TelemetrySink for BrokenSink {
        fn increment(&self, _counter: ActivityCounter) -> Result<(), TelemetryError> {
            Err(TelemetryError::Unavailable(String::from("offline")))
        }
    }

    #[test]
    fn counting_sink_accumulates() {
        let sink = CountingSink::new();
        forward(
            &sink,
            &[
                ActivityCounter::ZombieFed,
                ActivityCounter::ZombieFed,
                ActivityCounter::ZombiePet,
            ],
        );
        assert_eq!(sink.count(ActivityCounter::ZombieFed), 2);
        assert_eq!(sink.count(ActivityCounter::ZombiePet), 1);
        assert_eq!(sink.count(ActivityCounter::ZombieRaised), 0);
        assert_eq!(sink.totals().get("zombie_fed"), Some(&2));
    }

    #[test]
    fn failing_sink_does_not_propagate() {
        // Completes without panicking or returning an error.
        forward(&BrokenSink, &[ActivityCounter::ZombiePlanted]);
    }
}
