//! Select a Norwegian word anywhere, press Alt+P+N, read the English
//! translation in a small popup next to the cursor.
//!
//! Everything outside `platform` is free of Windows FFI so the core logic
//! (hotkey edge detection, capture fallthrough, popup placement, lookup and
//! update parsing, event routing) runs as normal tests on any host.

pub mod app_dirs;
pub mod capture;
pub mod coordinator;
pub mod error;
pub mod events;
pub(crate) mod http_client;
pub mod input;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod platform;
pub mod popup;
pub mod update;

// Re-export the types most callers need
pub use coordinator::{Coordinator, Flow};
pub use error::AppError;
pub use events::{AppEvent, EventBus, EventPublisher};
pub use model::{AppConfig, Hotkey, Point, PopupConfig};

/// Parse `#RRGGBB` or `#RRGGBBAA` into normalised floats [0..1].
pub fn parse_hex_color(s: &str) -> Option<(f64, f64, f64, f64)> {
    let t = s.trim();
    let t = t.strip_prefix('#').unwrap_or(t);
    let hex = t.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b, a) = match hex.len() {
        6 => (channel(0)?, channel(2)?, channel(4)?, 255u8),
        8 => (channel(0)?, channel(2)?, channel(4)?, channel(6)?),
        _ => return None,
    };
    Some((
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        a as f64 / 255.0,
    ))
}
