//! Platform-specific implementations.
//!
//! Only Windows is implemented. It supplies the real key-state source,
//! the UI Automation selection source, the display provider and the popup
//! host behind the traits defined in the portable modules.

#[cfg(target_os = "windows")]
pub mod windows;
