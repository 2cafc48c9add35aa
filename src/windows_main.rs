//! Windows-specific entry point.
//!
//! Startup order: logging, COM and the Direct2D/DirectWrite factories,
//! window classes, the message-only window that receives bus wake-ups,
//! the coordinator, the hotkey monitor, and finally the delayed update
//! check. Then a plain Win32 message loop until `Quit`.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use windows::core::{w, BOOL, HSTRING, PCWSTR};
use windows::Win32::Foundation::{HMODULE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Direct2D::{
    D2D1CreateFactory, ID2D1Factory, D2D1_FACTORY_TYPE_SINGLE_THREADED,
};
use windows::Win32::Graphics::DirectWrite::{
    DWriteCreateFactory, IDWriteFactory, DWRITE_FACTORY_TYPE_SHARED,
};
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::System::Console::{
    SetConsoleCtrlHandler, CTRL_BREAK_EVENT, CTRL_CLOSE_EVENT, CTRL_C_EVENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostMessageW, RegisterClassW, TranslateMessage, HWND_MESSAGE, MSG, SW_SHOWNORMAL,
    WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLOSE, WNDCLASSW,
};

use norsk_lookup::capture::SelectionCapture;
use norsk_lookup::coordinator::{capture_and_publish, spawn_update_check, Coordinator};
use norsk_lookup::error::AppError;
use norsk_lookup::events::{self, AppEvent, EventPublisher, Waker};
use norsk_lookup::input::HotkeyMonitor;
use norsk_lookup::logging;
use norsk_lookup::lookup::LexinClient;
use norsk_lookup::model::{AppConfig, APP_DISPLAY_NAME};
use norsk_lookup::platform::windows::app::STATE;
use norsk_lookup::platform::windows::ffi::{cursor_position, AsyncKeyState, UiaSelectionSource};
use norsk_lookup::platform::windows::handlers::{dispatch_events, WM_APP_DRAIN};
use norsk_lookup::platform::windows::ui::dialogs::show_error_dialog;
use norsk_lookup::platform::windows::ui::popup::{register_popup_class, Win32PopupHost};
use norsk_lookup::update::{UpdateCache, UpdateChecker, CURRENT_VERSION};

const MESSAGE_CLASS: PCWSTR = w!("NorskLookupMessageWindow");

/// Main entry point for Windows.
pub fn run() -> ExitCode {
    if let Err(err) = logging::init() {
        logging::init_stderr_only();
        tracing::warn!("File logging unavailable: {err}");
    }

    match run_app(AppConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Fatal: {err}");
            show_error_dialog(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run_app(config: AppConfig) -> Result<(), AppError> {
    print_startup_info(&config);

    unsafe {
        CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;
    }
    let result = run_initialized(&config);
    unsafe {
        CoUninitialize();
    }
    result
}

fn run_initialized(config: &AppConfig) -> Result<(), AppError> {
    let (d2d, dwrite, instance) = unsafe {
        let d2d: ID2D1Factory = D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)?;
        let dwrite: IDWriteFactory = DWriteCreateFactory(DWRITE_FACTORY_TYPE_SHARED)?;
        let instance = GetModuleHandleW(None)?;
        (d2d, dwrite, instance)
    };

    register_popup_class(instance)?;
    let message_hwnd = create_message_window(instance)?;

    // The waker crosses threads, so it carries the handle as an integer.
    let raw_hwnd = message_hwnd.0 as isize;
    let waker: Waker = Arc::new(move || unsafe {
        let _ = PostMessageW(
            Some(HWND(raw_hwnd as *mut _)),
            WM_APP_DRAIN,
            WPARAM(0),
            LPARAM(0),
        );
    });
    events::init_event_bus(Some(waker));
    let publisher = events::publisher().ok_or(AppError::EventBus)?;

    let host = Win32PopupHost::new(instance, d2d, dwrite);
    let coordinator = Coordinator::new(
        host,
        config,
        Arc::new(LexinClient::new()),
        publisher.clone(),
        Box::new(open_url),
    );
    STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.message_hwnd = message_hwnd;
        state.coordinator = Some(coordinator);
    });

    if let Err(err) = unsafe { SetConsoleCtrlHandler(Some(console_ctrl_handler), true) } {
        tracing::warn!("Ctrl+C handler not installed: {err}");
    }

    let capture = SelectionCapture::new(UiaSelectionSource)
        .with_settle_delay(config.capture_settle_delay);
    let hotkey_publisher = publisher.clone();
    let mut monitor = HotkeyMonitor::single(AsyncKeyState, config.hotkey.clone(), move || {
        capture_and_publish(&capture, cursor_position, &hotkey_publisher);
    })
    .with_poll_interval(config.poll_interval);
    monitor.start()?;

    if let Some(delay) = config.update_check_delay {
        start_update_check(delay, publisher);
    }

    tracing::info!("Monitoring for hotkey presses");
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    tracing::info!("Shutting down");
    if !monitor.stop(config.stop_timeout) {
        tracing::warn!("Hotkey monitor did not stop within {:?}", config.stop_timeout);
    }
    STATE.with(|s| {
        let mut state = s.borrow_mut();
        if let Some(mut coordinator) = state.coordinator.take() {
            coordinator.shutdown();
        }
        state.message_hwnd = HWND::default();
    });
    unsafe {
        let _ = DestroyWindow(message_hwnd);
    }
    Ok(())
}

fn start_update_check(delay: Duration, publisher: EventPublisher) {
    let cache = match UpdateCache::in_app_dir() {
        Ok(cache) => cache,
        Err(err) => {
            tracing::warn!("Update check disabled: {err}");
            return;
        }
    };
    if let Err(err) = spawn_update_check(UpdateChecker::new(cache), delay, publisher) {
        tracing::warn!("Update check not started: {err}");
    }
}

fn print_startup_info(config: &AppConfig) {
    tracing::info!("{APP_DISPLAY_NAME} v{CURRENT_VERSION} started");
    tracing::info!("Hotkey: {}", config.hotkey.description());
    tracing::info!("Select a Norwegian word and press the hotkey to translate it");
    tracing::info!("Press Ctrl+C to exit");
}

fn create_message_window(instance: HMODULE) -> Result<HWND, AppError> {
    unsafe {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(message_wndproc),
            hInstance: instance.into(),
            lpszClassName: MESSAGE_CLASS,
            ..Default::default()
        };
        RegisterClassW(&wc);

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            MESSAGE_CLASS,
            w!("Norsk Lookup"),
            WINDOW_STYLE::default(),
            0,
            0,
            0,
            0,
            Some(HWND_MESSAGE),
            None,
            Some(instance.into()),
            None,
        )?;
        Ok(hwnd)
    }
}

fn open_url(url: &str) {
    let result = unsafe {
        ShellExecuteW(
            None,
            w!("open"),
            &HSTRING::from(url),
            PCWSTR::null(),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };
    // Values above 32 mean success.
    if (result.0 as isize) <= 32 {
        tracing::warn!(url, "Could not open browser");
    }
}

/// Runs on a system thread; only publishes.
unsafe extern "system" fn console_ctrl_handler(ctrl_type: u32) -> BOOL {
    match ctrl_type {
        CTRL_C_EVENT | CTRL_BREAK_EVENT | CTRL_CLOSE_EVENT => {
            events::publish(AppEvent::Quit);
            BOOL(1)
        }
        _ => BOOL(0),
    }
}

extern "system" fn message_wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_APP_DRAIN => {
                dispatch_events();
                LRESULT(0)
            }

            WM_CLOSE => {
                events::publish(AppEvent::Quit);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
