//! Dismissal signals for a visible popup.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{Point, Rect};

static NEXT_POPUP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one popup window instance.
///
/// Window procedures report events by id; a controller ignores ids it does
/// not currently own, which makes late events from destroyed windows harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupId(u64);

impl PopupId {
    pub fn next() -> Self {
        Self(NEXT_POPUP_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Why a popup closed itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Dismiss button pressed outside the popup bounds.
    OutsideClick,
    /// The popup window lost input focus.
    FocusLost,
    /// The configured auto-close duration elapsed.
    Timeout,
}

/// Detects a press of the dismiss button outside the popup.
///
/// Fed by a recurring poll rather than an input hook: the popup never takes
/// focus, so it receives no click events for other windows. Only an
/// up → down transition counts, so a button already held when the popup
/// appears (for example while finishing a drag-selection) is ignored.
#[derive(Debug, Clone)]
pub struct OutsideClickDetector {
    was_down: bool,
}

impl OutsideClickDetector {
    /// `initially_down`: button state sampled when the popup was shown.
    pub fn new(initially_down: bool) -> Self {
        Self {
            was_down: initially_down,
        }
    }

    /// Feed one poll sample. True when this sample is a fresh press outside
    /// `bounds`.
    pub fn observe(&mut self, button_down: bool, cursor: Point, bounds: &Rect) -> bool {
        let fresh_press = button_down && !self.was_down;
        self.was_down = button_down;
        fresh_press && !bounds.contains(cursor)
    }
}
