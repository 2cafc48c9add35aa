//! Selection query strategies and their fallthrough.

use std::fmt;

/// One way of asking a control for its selected text, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Rich-text selection ranges (primary text API).
    TextSelection,
    /// Newer text API for controls that do not answer the primary one.
    TextSelection2,
    /// Whole-field value of simple edit controls. Not a true selection.
    Value,
    /// Legacy accessibility value, last resort.
    LegacyValue,
}

impl Strategy {
    /// Fixed priority order.
    pub const ORDER: [Strategy; 4] = [
        Strategy::TextSelection,
        Strategy::TextSelection2,
        Strategy::Value,
        Strategy::LegacyValue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::TextSelection => "TextPattern",
            Strategy::TextSelection2 => "TextPattern2",
            Strategy::Value => "ValuePattern",
            Strategy::LegacyValue => "LegacyIAccessible",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The control that currently has keyboard focus.
pub trait FocusedElement {
    type Error: fmt::Display;

    /// Raw answer of one strategy; trimming and emptiness are handled by
    /// [`first_selection`].
    fn query(&self, strategy: Strategy) -> Result<Option<String>, Self::Error>;
}

/// Try every strategy in [`Strategy::ORDER`]; first non-blank answer wins.
///
/// Errors and blank answers fall through to the next strategy and are
/// only logged at debug level.
pub fn first_selection<E: FocusedElement + ?Sized>(element: &E) -> Option<String> {
    for strategy in Strategy::ORDER {
        match element.query(strategy) {
            Ok(Some(text)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    tracing::debug!(%strategy, chars = trimmed.chars().count(), "Selection found");
                    return Some(trimmed.to_string());
                }
                tracing::debug!(%strategy, "Strategy returned blank text");
            }
            Ok(None) => tracing::debug!(%strategy, "Strategy returned nothing"),
            Err(err) => tracing::debug!(%strategy, "Strategy failed: {err}"),
        }
    }
    None
}
