//! Selected-text capture from whatever control has keyboard focus.
//!
//! A pure query against the accessibility tree: the clipboard is never
//! touched and no keystrokes are synthesized into the foreign application.
//! The platform supplies a [`SelectionSource`]; this module owns the
//! strategy order and the "any failure means absent" policy.

pub mod strategy;

use std::fmt;
use std::thread;
use std::time::Duration;

pub use strategy::{first_selection, FocusedElement, Strategy};

/// Entry point into the platform accessibility tree.
///
/// Implementations set up any per-thread session lazily, on the thread
/// that calls them, and must tolerate being asked repeatedly.
pub trait SelectionSource {
    type Element: FocusedElement;
    type Error: fmt::Display;

    /// The focused element, or `None` when nothing has focus.
    fn focused_element(&self) -> Result<Option<Self::Element>, Self::Error>;
}

/// Captures the focused control's selection.
pub struct SelectionCapture<S> {
    source: S,
    settle_delay: Duration,
}

impl<S: SelectionSource> SelectionCapture<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            settle_delay: Duration::ZERO,
        }
    }

    /// Wait this long before querying so the target finishes updating its
    /// selection after the hotkey press.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Trimmed, non-empty selected text, or `None`.
    ///
    /// `None` covers "nothing selected", "nothing focused" and every kind of
    /// accessibility failure alike.
    pub fn get_selected_text(&self) -> Option<String> {
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        let element = match self.source.focused_element() {
            Ok(Some(element)) => element,
            Ok(None) => {
                tracing::debug!("No focused element");
                return None;
            }
            Err(err) => {
                tracing::debug!("Focused element query failed: {err}");
                return None;
            }
        };

        let text = first_selection(&element);
        if text.is_none() {
            tracing::debug!("No selection in focused element");
        }
        text
    }
}
