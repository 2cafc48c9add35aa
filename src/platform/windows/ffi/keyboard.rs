//! Global key state via `GetAsyncKeyState`.

use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;

use crate::model::{KeyStateSource, VirtualKey};

/// Reads the physical state of any key, regardless of which window has focus.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsyncKeyState;

impl KeyStateSource for AsyncKeyState {
    fn is_down(&self, key: VirtualKey) -> bool {
        // High bit set: key is down right now.
        unsafe { (GetAsyncKeyState(key.code()) as u16 & 0x8000) != 0 }
    }
}
