//! Safe wrappers over the Win32 calls the portable modules need.

pub mod accessibility;
pub mod display;
pub mod keyboard;
pub mod strings;

pub use accessibility::{UiaElement, UiaSelectionSource};
pub use display::{cursor_position, list_monitors, monitor_at, scale_at, virtual_screen};
pub use keyboard::AsyncKeyState;
pub use strings::wide;
