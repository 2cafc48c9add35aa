//! Fatal startup error dialog.

use windows::core::PCWSTR;
use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

use crate::model::APP_DISPLAY_NAME;
use crate::platform::windows::ffi::wide;

/// Show a modal error box. The process is about to exit.
pub fn show_error_dialog(message: &str) {
    let message = format!(
        "{APP_DISPLAY_NAME} could not start.\n\n{message}\n\nSee the log files for details."
    );

    let title_wide = wide(APP_DISPLAY_NAME);
    let message_wide = wide(&message);

    unsafe {
        MessageBoxW(
            None,
            PCWSTR(message_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}
