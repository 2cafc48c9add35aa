//! Application domain model.
//!
//! Pure data and geometry (no FFI) so everything here runs under plain
//! `cargo test` on any host.

pub mod app_config;
pub mod constants;
pub mod geometry;
pub mod hotkey;
pub mod popup_config;

pub use app_config::AppConfig;
pub use constants::*;
pub use geometry::{monitor_at, place_popup, scale_for_dpi, MonitorInfo, Point, Rect, Size};
pub use hotkey::{Hotkey, KeyStateSource, VirtualKey};
pub use popup_config::{Color, PopupConfig};
