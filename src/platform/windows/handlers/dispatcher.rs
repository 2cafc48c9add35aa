//! Event dispatcher for Windows.

use windows::Win32::UI::WindowsAndMessaging::{PostQuitMessage, WM_APP};

use crate::coordinator::Flow;
use crate::events;
use crate::platform::windows::app::STATE;

/// Posted to the message window by the bus waker after every publish.
pub const WM_APP_DRAIN: u32 = WM_APP + 1;

/// Drain the global bus into the coordinator.
///
/// Must run on the UI thread. A nested call (a message pumped while the
/// coordinator is busy) returns immediately; the outer call keeps draining
/// until the queue is empty.
pub fn dispatch_events() {
    let busy = STATE.with(|s| s.try_borrow_mut().is_err());
    if busy {
        return;
    }

    loop {
        let pending = events::drain_events();
        if pending.is_empty() {
            break;
        }

        for event in pending {
            let flow = STATE.with(|s| {
                let mut state = s.borrow_mut();
                match state.coordinator.as_mut() {
                    Some(coordinator) => coordinator.handle(event),
                    None => Flow::Continue,
                }
            });
            if flow == Flow::Exit {
                tracing::info!("Quit requested");
                unsafe { PostQuitMessage(0) };
            }
        }
    }
}
