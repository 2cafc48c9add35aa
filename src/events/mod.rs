//! Event system for marshaling work onto the UI thread.
//!
//! ```text
//! ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐
//! │   Hotkey    │  │   Lookup    │  │   Update    │  │    Popup    │
//! │   monitor   │  │   threads   │  │   checker   │  │   wndproc   │
//! └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘
//!        │ publish()      │ publish()      │ publish()      │ publish()
//!        ▼                ▼                ▼                ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                 EventBus (mpsc channel + waker)                  │
//! └────────────────────────────────┬─────────────────────────────────┘
//!                                  │ drain()
//!                                  ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │             Dispatcher → Coordinator (UI thread only)            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`types`]: `AppEvent`
//! - [`bus`]: `EventBus` and `EventPublisher`
//! - [`global`]: process-wide bus for context-free window procedures

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher, Waker};
pub use global::{drain_events, init_event_bus, publish, publisher};
pub use types::AppEvent;
