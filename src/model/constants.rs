//! Compiled-in defaults.
//!
//! There is no configuration file: every tunable lives here and is copied
//! into the `Default` impls of [`AppConfig`](super::AppConfig) and
//! [`PopupConfig`](super::PopupConfig). Callers override by constructing
//! those structs differently.

use std::time::Duration;

// === Hotkey ===

/// How often the hotkey monitor samples global key state.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long `stop()` waits for the monitor thread by default.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_millis(500);

/// Human-readable name of the default chord.
pub const DEFAULT_HOTKEY_DESCRIPTION: &str = "Alt+P+N";

// === Selection capture ===

/// Pause before querying the focused element so the foreign control has
/// finished updating its selection.
pub const DEFAULT_CAPTURE_SETTLE_DELAY: Duration = Duration::from_millis(50);

// === Lookup ===

/// Maximum number of translations shown per lookup.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Network timeout for the dictionary and update endpoints.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Placeholder shown while a lookup is in flight.
pub const THINKING_TEXT: &str = "Thinking...";

// === Update check ===

/// Delay between startup and the background update check.
pub const DEFAULT_UPDATE_CHECK_DELAY: Duration = Duration::from_secs(10);

/// Minimum time between two non-forced update checks.
pub const UPDATE_CHECK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Release notes longer than this are truncated in the notification.
pub const RELEASE_NOTES_MAX_CHARS: usize = 200;

// === Popup defaults ===

/// Lookup popup background (`#RRGGBB`).
pub const DEFAULT_BACKGROUND: &str = "#1E1E1E";

/// Lookup popup text colour.
pub const DEFAULT_FOREGROUND: &str = "#FFFFFF";

/// Lookup popup border colour.
pub const DEFAULT_BORDER: &str = "#000000";

/// Update popup background.
pub const UPDATE_BACKGROUND: &str = "#2D2D30";

/// Update popup border.
pub const UPDATE_BORDER: &str = "#007ACC";

pub const DEFAULT_FONT_FAMILY: &str = "Consolas";

/// Font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

pub const DEFAULT_PADDING_X: i32 = 12;
pub const DEFAULT_PADDING_Y: i32 = 8;

pub const DEFAULT_BORDER_WIDTH: f32 = 1.0;
pub const DEFAULT_CORNER_RADIUS: f32 = 4.0;

/// Offset of the popup's top-left corner from the anchor point.
pub const DEFAULT_OFFSET_X: i32 = 10;
pub const DEFAULT_OFFSET_Y: i32 = 10;

/// Gap kept between the popup and the monitor edge when it fits.
pub const DEFAULT_EDGE_MARGIN: i32 = 10;

/// Text wider than this wraps.
pub const DEFAULT_MAX_TEXT_WIDTH: f32 = 480.0;

/// How often a visible popup checks for a click outside itself.
pub const DEFAULT_OUTSIDE_CLICK_POLL: Duration = Duration::from_millis(150);

/// The update popup is anchored this far up-left of the monitor centre.
pub const UPDATE_POPUP_CENTER_SHIFT: (i32, i32) = (150, 100);

// === Application identity ===

/// Directory name under `%APPDATA%` for logs and the update cache.
pub const APP_DIR_NAME: &str = "NorskLookup";

/// Display name used in dialogs and window titles.
pub const APP_DISPLAY_NAME: &str = "Norwegian-English Dictionary Lookup";
