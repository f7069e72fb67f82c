//! Frame sources and the per-tick driver
//!
//! The host supplies state through [`FrameStateSource`]; [`TelemetryDriver`] owns
//! the sender and forwards one sample per tick.

use crate::protocol::{SendStats, SendStatus, TelemetrySender};
use crate::record::TelemetryRecord;

/// Something that can produce a telemetry record once per tick
pub trait FrameStateSource {
    /// Sample the current frame, or `None` when there is nothing to report
    /// (no local car, scene loading, etc.)
    fn sample(&mut self) -> Option<TelemetryRecord>;
}

impl<F> FrameStateSource for F
where
    F: FnMut() -> Option<TelemetryRecord>,
{
    fn sample(&mut self) -> Option<TelemetryRecord> {
        self()
    }
}

/// What happened on a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No sender (bad configuration or already shut down)
    Disabled,
    /// The source had nothing this tick
    NoSample,
    /// A record was transmitted
    Sent,
    /// A record was encoded but not transmitted
    Dropped,
}

/// Per-tick driver tying a source to an optional sender
pub struct TelemetryDriver<S> {
    source: S,
    sender: Option<TelemetrySender>,
}

impl<S: FrameStateSource> TelemetryDriver<S> {
    /// Create a driver. A `None` sender runs with telemetry disabled.
    pub fn new(source: S, sender: Option<TelemetrySender>) -> Self {
        Self { source, sender }
    }

    /// Sample the source and send the record, if telemetry is enabled
    pub fn tick(&mut self) -> TickOutcome {
        let Some(sender) = self.sender.as_mut() else {
            return TickOutcome::Disabled;
        };

        let Some(record) = self.source.sample() else {
            return TickOutcome::NoSample;
        };

        match sender.send(record) {
            SendStatus::Sent => TickOutcome::Sent,
            SendStatus::Dropped => TickOutcome::Dropped,
            SendStatus::Disposed => TickOutcome::Disabled,
        }
    }

    /// Whether a live sender is attached
    pub fn is_enabled(&self) -> bool {
        self.sender.as_ref().is_some_and(|s| !s.is_disposed())
    }

    /// Sender totals, if a sender was ever attached
    pub fn stats(&self) -> Option<SendStats> {
        self.sender.as_ref().map(TelemetrySender::stats)
    }

    /// Borrow the source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Dispose the sender. Later ticks report `Disabled`.
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.sender.as_mut() {
            sender.dispose();
        }
    }
}
