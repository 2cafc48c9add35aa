//! Popup lifecycle and positioning.
//!
//! States: Empty (no window) and Showing (exactly one window). Every
//! `show` destroys the previous window first, so at most one popup per
//! controller is ever alive.

pub mod controller;
pub mod dismiss;

pub use controller::{PopupController, PopupHost, PopupRequest};
pub use dismiss::{DismissReason, OutsideClickDetector, PopupId};
