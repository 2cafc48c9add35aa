//! UI Automation access to the focused control's selection.
//!
//! The automation object is created lazily on whichever thread first asks
//! (the hotkey monitor thread in practice) and cached there. COM is joined
//! as a multithreaded apartment; a thread that already chose a different
//! apartment model is accepted as-is.

use std::cell::RefCell;

use windows::core::{Interface, Result};
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CLSCTX_INPROC_SERVER, COINIT_MULTITHREADED,
};
use windows::Win32::UI::Accessibility::{
    CUIAutomation, IUIAutomation, IUIAutomationElement, IUIAutomationLegacyIAccessiblePattern,
    IUIAutomationTextPattern, IUIAutomationTextPattern2, IUIAutomationTextRangeArray,
    IUIAutomationValuePattern, UIA_LegacyIAccessiblePatternId, UIA_TextPattern2Id,
    UIA_TextPatternId, UIA_ValuePatternId,
};

use crate::capture::{FocusedElement, SelectionSource, Strategy};

thread_local! {
    static AUTOMATION: RefCell<Option<IUIAutomation>> = const { RefCell::new(None) };
}

/// This thread's automation object, creating it on first use.
fn automation() -> Result<IUIAutomation> {
    AUTOMATION.with(|slot| {
        if let Some(uia) = slot.borrow().as_ref() {
            return Ok(uia.clone());
        }
        unsafe {
            let hr = CoInitializeEx(None, COINIT_MULTITHREADED);
            if hr.is_err() && hr != RPC_E_CHANGED_MODE {
                return Err(hr.into());
            }
            let uia: IUIAutomation = CoCreateInstance(&CUIAutomation, None, CLSCTX_INPROC_SERVER)?;
            tracing::debug!("UI Automation session created");
            *slot.borrow_mut() = Some(uia.clone());
            Ok(uia)
        }
    })
}

/// Selection source backed by the system UI Automation tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiaSelectionSource;

impl SelectionSource for UiaSelectionSource {
    type Element = UiaElement;
    type Error = windows::core::Error;

    fn focused_element(&self) -> Result<Option<UiaElement>> {
        let uia = automation()?;
        let element = unsafe { uia.GetFocusedElement()? };
        Ok(Some(UiaElement(element)))
    }
}

/// The focused automation element.
pub struct UiaElement(IUIAutomationElement);

impl FocusedElement for UiaElement {
    type Error = windows::core::Error;

    fn query(&self, strategy: Strategy) -> Result<Option<String>> {
        unsafe {
            match strategy {
                Strategy::TextSelection => {
                    let pattern: IUIAutomationTextPattern =
                        self.0.GetCurrentPattern(UIA_TextPatternId)?.cast()?;
                    first_range_text(&pattern.GetSelection()?)
                }
                Strategy::TextSelection2 => {
                    let pattern: IUIAutomationTextPattern2 =
                        self.0.GetCurrentPattern(UIA_TextPattern2Id)?.cast()?;
                    first_range_text(&pattern.GetSelection()?)
                }
                Strategy::Value => {
                    let pattern: IUIAutomationValuePattern =
                        self.0.GetCurrentPattern(UIA_ValuePatternId)?.cast()?;
                    Ok(Some(pattern.CurrentValue()?.to_string()))
                }
                Strategy::LegacyValue => {
                    let pattern: IUIAutomationLegacyIAccessiblePattern = self
                        .0
                        .GetCurrentPattern(UIA_LegacyIAccessiblePatternId)?
                        .cast()?;
                    Ok(Some(pattern.CurrentValue()?.to_string()))
                }
            }
        }
    }
}

/// Text of the first selected range; multi-range selections use only the first.
unsafe fn first_range_text(ranges: &IUIAutomationTextRangeArray) -> Result<Option<String>> {
    if ranges.Length()? < 1 {
        return Ok(None);
    }
    let range = ranges.GetElement(0)?;
    Ok(Some(range.GetText(-1)?.to_string()))
}
