//! Application state for the Windows UI thread.

pub mod state;

pub use state::*;
