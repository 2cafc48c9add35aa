//! Windows runtime state.
//!
//! Lives in a thread-local on the UI thread; window procedures and the
//! dispatcher reach it through [`STATE`].

use std::cell::RefCell;

use windows::Win32::Foundation::HWND;

use crate::coordinator::Coordinator;
use crate::platform::windows::ui::popup::Win32PopupHost;

#[derive(Default)]
pub struct WindowsRuntimeState {
    /// Message-only window that receives bus wake-ups.
    pub message_hwnd: HWND,
    /// Installed once startup succeeds; taken again during shutdown.
    pub coordinator: Option<Coordinator<Win32PopupHost>>,
}

thread_local! {
    pub static STATE: RefCell<WindowsRuntimeState> = RefCell::new(WindowsRuntimeState::default());
}
