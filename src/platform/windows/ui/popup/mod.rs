//! Popup window and its Direct2D renderer.

pub mod renderer;
pub mod window;

pub use window::{register_popup_class, Win32PopupHost};
