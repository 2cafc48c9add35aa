//! Process-wide access to the application event bus.
//!
//! Window procedures are plain `extern "system"` functions with no context
//! pointer, so they publish through this static bus. It is initialised once
//! by the platform entry point via `init_event_bus()`.
//!
//! - `Sender` lives in a `OnceLock` (it is `Send + Sync`)
//! - `Receiver` lives in a `Mutex`; only the UI thread drains it

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock};

use super::bus::{EventPublisher, Waker};
use super::types::AppEvent;

static SENDER: OnceLock<(Sender<AppEvent>, Option<Waker>)> = OnceLock::new();
static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Initialize the global event bus.
///
/// Returns `false` (and changes nothing) if it was already initialized.
pub fn init_event_bus(waker: Option<Waker>) -> bool {
    let (sender, receiver) = mpsc::channel();
    if SENDER.set((sender, waker)).is_err() {
        return false;
    }
    RECEIVER.set(Mutex::new(receiver)).is_ok()
}

/// Get a publisher for the global bus, or `None` before initialization.
pub fn publisher() -> Option<EventPublisher> {
    SENDER
        .get()
        .map(|(sender, waker)| EventPublisher::from_sender(sender.clone(), waker.clone()))
}

/// Publish an event to the global bus.
///
/// Dropped with a warning if the bus was never initialized.
pub fn publish(event: AppEvent) {
    match publisher() {
        Some(publisher) => publisher.publish(event),
        None => tracing::warn!("Event bus not initialized; dropping {:?}", event),
    }
}

/// Drain all pending events from the global bus.
pub fn drain_events() -> Vec<AppEvent> {
    let Some(receiver) = RECEIVER.get() else {
        return Vec::new();
    };
    let Ok(receiver) = receiver.lock() else {
        tracing::error!("Event bus receiver mutex poisoned");
        return Vec::new();
    };

    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
