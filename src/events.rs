// src/events.rs
//! Broadcast bus for view lifecycle signals.
//!
//! "Check for a pending application" is triggered in two situations: the
//! jobs view being entered, and the user's attention returning to it. Both
//! are explicit messages on a channel rather than implicit side effects.

use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The jobs view was (re)entered.
    PageEnter,
    /// The user's attention returned to the view.
    FocusRegained,
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        EventBus { tx }
    }

    /// Fire-and-forget: an event with no listeners is dropped.
    pub fn emit(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(UiEvent::PageEnter);
        bus.emit(UiEvent::FocusRegained);

        assert_eq!(rx.try_recv().unwrap(), UiEvent::PageEnter);
        assert_eq!(rx.try_recv().unwrap(), UiEvent::FocusRegained);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn emit_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.emit(UiEvent::FocusRegained);
    }
}
