//! Popup styling and behaviour.

use std::time::Duration;

use super::constants::*;
use super::hotkey::VirtualKey;
use crate::parse_hex_color;

/// RGBA colour with normalised `f32` channels, as Direct2D wants them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#RRGGBB` / `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let (r, g, b, a) = parse_hex_color(s)?;
        Some(Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
            a: a as f32,
        })
    }

    /// Parse, falling back to `fallback` on malformed input.
    pub fn from_hex_or(s: &str, fallback: Self) -> Self {
        Self::from_hex(s).unwrap_or(fallback)
    }
}

/// Immutable style/behaviour parameters for one kind of popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_width: f32,
    pub corner_radius: f32,
    pub font_family: String,
    /// Points.
    pub font_size: f32,
    pub padding_x: i32,
    pub padding_y: i32,
    /// `None`: stays until dismissed.
    pub auto_close: Option<Duration>,
    /// Interval of the outside-click check.
    pub outside_click_poll: Duration,
    /// Button whose press outside the popup dismisses it.
    pub dismiss_button: VirtualKey,
    pub offset_x: i32,
    pub offset_y: i32,
    pub edge_margin: i32,
    /// Wrap width for the text block, in DIPs.
    pub max_text_width: f32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            background: Color::from_hex_or(DEFAULT_BACKGROUND, Color::BLACK),
            foreground: Color::from_hex_or(DEFAULT_FOREGROUND, Color::WHITE),
            border: Color::from_hex_or(DEFAULT_BORDER, Color::BLACK),
            border_width: DEFAULT_BORDER_WIDTH,
            corner_radius: DEFAULT_CORNER_RADIUS,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            padding_x: DEFAULT_PADDING_X,
            padding_y: DEFAULT_PADDING_Y,
            auto_close: None,
            outside_click_poll: DEFAULT_OUTSIDE_CLICK_POLL,
            dismiss_button: VirtualKey::LBUTTON,
            offset_x: DEFAULT_OFFSET_X,
            offset_y: DEFAULT_OFFSET_Y,
            edge_margin: DEFAULT_EDGE_MARGIN,
            max_text_width: DEFAULT_MAX_TEXT_WIDTH,
        }
    }
}

impl PopupConfig {
    /// Style of the "update available" notification.
    pub fn update_notification() -> Self {
        Self {
            background: Color::from_hex_or(UPDATE_BACKGROUND, Color::BLACK),
            foreground: Color::WHITE,
            border: Color::from_hex_or(UPDATE_BORDER, Color::WHITE),
            border_width: 2.0,
            auto_close: None,
            ..Self::default()
        }
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Font size in DIPs (1pt = 96/72 DIP).
    pub fn font_size_dips(&self) -> f32 {
        self.font_size * 96.0 / 72.0
    }
}
