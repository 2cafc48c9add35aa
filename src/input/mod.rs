//! Global hotkey detection by polling key state.

pub mod chord;
pub mod monitor;

pub use chord::{ChordState, ChordTrigger};
pub use monitor::{HotkeyCallback, HotkeyMonitor};
