//! UI components for Windows.

pub mod dialogs;
pub mod popup;

pub use dialogs::*;
pub use popup::*;
