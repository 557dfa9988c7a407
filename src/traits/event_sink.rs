//! Observable log of factory notifications.

use crate::domain::PoolEvent;

/// Receives every [`PoolEvent`] the factory emits, synchronously and in
/// order, after the corresponding state change has committed.
pub trait EventSink {
    /// Records one event.
    fn emit(&mut self, event: PoolEvent);
}

/// Collects events in memory.
impl EventSink for Vec<PoolEvent> {
    fn emit(&mut self, event: PoolEvent) {
        self.push(event);
    }
}

/// Discards events.
impl EventSink for () {
    fn emit(&mut self, _event: PoolEvent) {}
}
