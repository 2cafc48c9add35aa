//! The popup window and the Win32 [`PopupHost`].
//!
//! Layered, topmost, tool-window, never activated. The window procedure
//! reports clicks and dismissals through the global event bus; the
//! controller on the UI thread decides what to do with them.

use std::cell::RefCell;
use std::collections::HashMap;

use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HMODULE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Direct2D::ID2D1Factory;
use windows::Win32::Graphics::DirectWrite::IDWriteFactory;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, IsWindow, KillTimer, LoadCursorW,
    RegisterClassW, SetTimer, ShowWindow, CS_HREDRAW, CS_VREDRAW, IDC_HAND, MA_NOACTIVATE,
    SW_SHOWNOACTIVATE, WA_INACTIVE, WM_ACTIVATE, WM_DESTROY, WM_LBUTTONDOWN, WM_MOUSEACTIVATE,
    WM_TIMER, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_POPUP,
};

use super::renderer;
use crate::error::PopupError;
use crate::events::{self, AppEvent};
use crate::model::{KeyStateSource, MonitorInfo, Point, PopupConfig, Rect, Size, VirtualKey};
use crate::platform::windows::ffi::{self, AsyncKeyState};
use crate::popup::{DismissReason, OutsideClickDetector, PopupHost, PopupId, PopupRequest};

const POPUP_CLASS: PCWSTR = w!("NorskLookupPopup");

const TIMER_OUTSIDE_CLICK: usize = 1;
const TIMER_AUTO_CLOSE: usize = 2;

/// Per-window bookkeeping, keyed by HWND.
struct PopupWindowState {
    id: PopupId,
    bounds: Rect,
    dismiss_button: VirtualKey,
    detector: OutsideClickDetector,
    /// A dismissal is reported at most once per window.
    dismissed: bool,
}

thread_local! {
    static POPUPS: RefCell<HashMap<isize, PopupWindowState>> = RefCell::new(HashMap::new());
}

fn key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

/// Register the popup window class. Call once on the UI thread.
pub fn register_popup_class(instance: HMODULE) -> windows::core::Result<()> {
    unsafe {
        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(popup_wndproc),
            hInstance: instance.into(),
            hCursor: LoadCursorW(None, IDC_HAND)?,
            lpszClassName: POPUP_CLASS,
            ..Default::default()
        };
        RegisterClassW(&wc);
    }
    Ok(())
}

/// Real windows on the real desktop.
#[derive(Clone)]
pub struct Win32PopupHost {
    instance: HMODULE,
    d2d: ID2D1Factory,
    dwrite: IDWriteFactory,
}

impl Win32PopupHost {
    pub fn new(instance: HMODULE, d2d: ID2D1Factory, dwrite: IDWriteFactory) -> Self {
        Self {
            instance,
            d2d,
            dwrite,
        }
    }
}

impl PopupHost for Win32PopupHost {
    type Window = HWND;

    fn cursor_position(&self) -> Point {
        ffi::cursor_position()
    }

    fn monitor_at(&self, point: Point) -> Option<MonitorInfo> {
        ffi::monitor_at(point)
    }

    fn virtual_screen(&self) -> MonitorInfo {
        ffi::virtual_screen()
    }

    fn measure(&self, text: &str, config: &PopupConfig, anchor: Point) -> Size {
        renderer::measure(&self.dwrite, text, config, ffi::scale_at(anchor))
    }

    fn create(&self, request: &PopupRequest<'_>) -> Result<HWND, PopupError> {
        let bounds = request.bounds;
        let config = request.config;
        // Same monitor as measure(), so layout and window size agree.
        let scale = ffi::scale_at(request.anchor);

        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE,
                POPUP_CLASS,
                w!("Norsk Lookup"),
                WS_POPUP,
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height(),
                None,
                None,
                Some(self.instance.into()),
                None,
            )
        }
        .map_err(|err| PopupError::Create(err.to_string()))?;

        if let Err(err) = renderer::render(
            hwnd,
            &self.d2d,
            &self.dwrite,
            request.text,
            &bounds,
            config,
            scale,
        ) {
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            return Err(err);
        }

        let initially_down = AsyncKeyState.is_down(config.dismiss_button);
        POPUPS.with(|popups| {
            popups.borrow_mut().insert(
                key(hwnd),
                PopupWindowState {
                    id: request.id,
                    bounds,
                    dismiss_button: config.dismiss_button,
                    detector: OutsideClickDetector::new(initially_down),
                    dismissed: false,
                },
            )
        });

        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            SetTimer(
                Some(hwnd),
                TIMER_OUTSIDE_CLICK,
                config.outside_click_poll.as_millis().max(1) as u32,
                None,
            );
            if let Some(after) = config.auto_close {
                SetTimer(
                    Some(hwnd),
                    TIMER_AUTO_CLOSE,
                    after.as_millis().clamp(1, u32::MAX as u128) as u32,
                    None,
                );
            }
        }
        Ok(hwnd)
    }

    fn destroy(&self, hwnd: HWND) {
        unsafe {
            if IsWindow(Some(hwnd)).as_bool() {
                let _ = DestroyWindow(hwnd);
            }
        }
    }
}

fn popup_id(hwnd: HWND) -> Option<PopupId> {
    POPUPS.with(|popups| popups.borrow().get(&key(hwnd)).map(|state| state.id))
}

/// Publish a dismissal for `hwnd` unless one was already published.
fn dismiss(hwnd: HWND, reason: DismissReason) {
    let id = POPUPS.with(|popups| {
        let mut popups = popups.borrow_mut();
        let state = popups.get_mut(&key(hwnd))?;
        if state.dismissed {
            return None;
        }
        state.dismissed = true;
        Some(state.id)
    });
    if let Some(popup) = id {
        unsafe {
            let _ = KillTimer(Some(hwnd), TIMER_OUTSIDE_CLICK);
            let _ = KillTimer(Some(hwnd), TIMER_AUTO_CLOSE);
        }
        events::publish(AppEvent::PopupDismissed { popup, reason });
    }
}

fn poll_outside_click(hwnd: HWND) {
    let cursor = ffi::cursor_position();
    let pressed_outside = POPUPS.with(|popups| {
        let mut popups = popups.borrow_mut();
        let Some(state) = popups.get_mut(&key(hwnd)) else {
            return false;
        };
        let down = AsyncKeyState.is_down(state.dismiss_button);
        state.detector.observe(down, cursor, &state.bounds)
    });
    if pressed_outside {
        dismiss(hwnd, DismissReason::OutsideClick);
    }
}

extern "system" fn popup_wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_MOUSEACTIVATE => LRESULT(MA_NOACTIVATE as isize),

            WM_LBUTTONDOWN => {
                if let Some(popup) = popup_id(hwnd) {
                    events::publish(AppEvent::PopupClicked { popup });
                }
                LRESULT(0)
            }

            WM_ACTIVATE => {
                if (wparam.0 & 0xFFFF) as u32 == WA_INACTIVE {
                    dismiss(hwnd, DismissReason::FocusLost);
                }
                LRESULT(0)
            }

            WM_TIMER => {
                match wparam.0 {
                    TIMER_OUTSIDE_CLICK => poll_outside_click(hwnd),
                    TIMER_AUTO_CLOSE => dismiss(hwnd, DismissReason::Timeout),
                    _ => {}
                }
                LRESULT(0)
            }

            WM_DESTROY => {
                let _ = KillTimer(Some(hwnd), TIMER_OUTSIDE_CLICK);
                let _ = KillTimer(Some(hwnd), TIMER_AUTO_CLOSE);
                POPUPS.with(|popups| popups.borrow_mut().remove(&key(hwnd)));
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
