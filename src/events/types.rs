//! Application events for inter-thread communication.
//!
//! Background contexts (hotkey monitor, lookup and update threads) and
//! window procedures never touch popup state; they publish one of these and
//! the UI thread applies it. Pure Rust, no FFI.

use crate::model::Point;
use crate::popup::{DismissReason, PopupId};
use crate::update::UpdateInfo;

/// Application-level events, consumed on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // === Background producers ===
    /// The hotkey fired and the focused control had a non-empty selection.
    SelectionCaptured { text: String, cursor: Point },

    /// A dictionary lookup finished; `request` identifies which one.
    LookupFinished { request: u64, display: String },

    /// The update check found a newer release.
    UpdateAvailable(UpdateInfo),

    // === Popup window producers ===
    /// The popup body was clicked.
    PopupClicked { popup: PopupId },

    /// The popup dismissed itself (outside click, focus loss, timeout).
    PopupDismissed { popup: PopupId, reason: DismissReason },

    // === System ===
    /// Interrupt signal or window teardown.
    Quit,
}

impl AppEvent {
    /// Returns a human-readable description of the event for logging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::SelectionCaptured { .. } => "Selection captured",
            AppEvent::LookupFinished { .. } => "Lookup finished",
            AppEvent::UpdateAvailable(_) => "Update available",
            AppEvent::PopupClicked { .. } => "Popup clicked",
            AppEvent::PopupDismissed { .. } => "Popup dismissed",
            AppEvent::Quit => "Quit requested",
        }
    }
}
