//! Thread-safe event bus using mpsc channels.
//!
//! - Any thread can publish events via `EventPublisher::publish()`
//! - The UI thread drains them via `EventBus::drain()`
//!
//! A publisher can carry a [`Waker`] so the UI thread, blocked in its
//! message loop, learns that something was queued.

use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use super::types::AppEvent;

/// Called after every successful publish to wake the consumer thread.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Thread-safe event bus for marshaling work onto the UI thread.
///
/// Multiple producers, a single consumer (the UI thread).
///
/// # Example
///
/// ```
/// use norsk_lookup::events::{AppEvent, EventBus};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(AppEvent::Quit);
///
/// let events = bus.drain();
/// assert_eq!(events.len(), 1);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
    waker: Option<Waker>,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            waker: None,
        }
    }

    /// Create a bus whose publishers call `waker` after each send.
    pub fn with_waker(waker: Waker) -> Self {
        Self {
            waker: Some(waker),
            ..Self::new()
        }
    }

    /// Get a publisher handle that can be cloned and sent to other threads.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Try to receive the next event without blocking.
    pub fn try_recv(&self) -> Option<AppEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            // The bus holds its own sender, so this only happens mid-teardown.
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<AppEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drain all pending events into a Vec, in publish order.
    pub fn drain(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe event publisher.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
    waker: Option<Waker>,
}

impl EventPublisher {
    /// Create a publisher from an existing sender.
    pub fn from_sender(sender: Sender<AppEvent>, waker: Option<Waker>) -> Self {
        Self { sender, waker }
    }

    /// Publish an event to the bus.
    ///
    /// Non-blocking. If the receiver is gone the app is shutting down and
    /// the event is dropped.
    pub fn publish(&self, event: AppEvent) {
        if self.sender.send(event).is_ok() {
            if let Some(waker) = &self.waker {
                waker();
            }
        }
    }
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher")
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn finished(request: u64) -> AppEvent {
        AppEvent::LookupFinished {
            request,
            display: format!("result {request}"),
        }
    }

    #[test]
    fn test_create_bus() {
        let bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publish_and_receive_multiple_events() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(finished(1));
        publisher.publish(AppEvent::Quit);

        let events = bus.drain();
        assert_eq!(events, vec![finished(1), AppEvent::Quit]);
    }

    #[test]
    fn test_drain_empties_queue() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(finished(1));
        publisher.publish(finished(2));

        assert_eq!(bus.drain().len(), 2);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publish_from_other_threads() {
        let bus = EventBus::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let publisher = bus.publisher();
                std::thread::spawn(move || publisher.publish(finished(i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(bus.drain().len(), 4);
    }

    #[test]
    fn test_waker_runs_once_per_publish() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let bus = EventBus::with_waker(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let publisher = bus.publisher();

        publisher.publish(AppEvent::Quit);
        publisher.clone().publish(AppEvent::Quit);

        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_recv_timeout_returns_none_when_idle() {
        let bus = EventBus::new();
        assert!(bus.recv_timeout(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_try_recv_returns_events_in_order() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(finished(1));
        publisher.publish(finished(2));

        assert_eq!(bus.try_recv(), Some(finished(1)));
        assert_eq!(bus.try_recv(), Some(finished(2)));
        assert_eq!(bus.try_recv(), None);
    }
}
