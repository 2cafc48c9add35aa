//! Windows implementation: Win32, UI Automation and Direct2D.
//!
//! - `ffi`: thin safe wrappers (key state, displays, UI Automation, strings)
//! - `ui`: the layered popup window, its renderer, and the fatal error dialog
//! - `app`: UI-thread runtime state (coordinator, message window)
//! - `handlers`: drains the event bus into the coordinator

pub mod app;
pub mod ffi;
pub mod handlers;
pub mod ui;
