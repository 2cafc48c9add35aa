//! Monitor enumeration, per-monitor DPI and cursor position.

use windows::core::BOOL;
use windows::Win32::Foundation::{LPARAM, POINT, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, MonitorFromPoint, HDC, HMONITOR, MONITORINFO,
    MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::UI::HiDpi::{GetDpiForMonitor, GetDpiForSystem, MDT_EFFECTIVE_DPI};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN,
    SM_YVIRTUALSCREEN,
};

use crate::model::{geometry, scale_for_dpi, MonitorInfo, Point};

/// Every attached monitor's full bounds, in enumeration order.
pub fn list_monitors() -> Vec<MonitorInfo> {
    let mut monitors: Vec<MonitorInfo> = Vec::new();
    unsafe {
        let data = LPARAM(&mut monitors as *mut Vec<MonitorInfo> as isize);
        let _ = EnumDisplayMonitors(None, None, Some(enum_monitor_proc), data);
    }
    monitors
}

unsafe extern "system" fn enum_monitor_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let monitors = &mut *(data.0 as *mut Vec<MonitorInfo>);
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if GetMonitorInfoW(hmonitor, &mut info).as_bool() {
        let r = info.rcMonitor;
        monitors.push(MonitorInfo::new(r.left, r.top, r.right, r.bottom));
    }
    BOOL(1)
}

/// Monitor containing `point`, else the first monitor.
pub fn monitor_at(point: Point) -> Option<MonitorInfo> {
    geometry::monitor_at(&list_monitors(), point)
}

/// Physical pixels per DIP on the monitor nearest `point`. Falls back to
/// the system DPI when the monitor cannot be queried.
pub fn scale_at(point: Point) -> f32 {
    let (mut dpi_x, mut dpi_y) = (0u32, 0u32);
    let queried = unsafe {
        let monitor = MonitorFromPoint(POINT { x: point.x, y: point.y }, MONITOR_DEFAULTTONEAREST);
        GetDpiForMonitor(monitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y)
    };
    match queried {
        Ok(()) => scale_for_dpi(dpi_x),
        Err(err) => {
            tracing::warn!("GetDpiForMonitor failed, using system DPI: {err}");
            scale_for_dpi(unsafe { GetDpiForSystem() })
        }
    }
}

/// Cursor position in virtual-screen pixels; origin if the call fails.
pub fn cursor_position() -> Point {
    let mut pt = POINT::default();
    match unsafe { GetCursorPos(&mut pt) } {
        Ok(()) => Point::new(pt.x, pt.y),
        Err(err) => {
            tracing::warn!("GetCursorPos failed: {err}");
            Point::default()
        }
    }
}

/// Bounding box of all monitors.
pub fn virtual_screen() -> MonitorInfo {
    unsafe {
        let x = GetSystemMetrics(SM_XVIRTUALSCREEN);
        let y = GetSystemMetrics(SM_YVIRTUALSCREEN);
        let w = GetSystemMetrics(SM_CXVIRTUALSCREEN);
        let h = GetSystemMetrics(SM_CYVIRTUALSCREEN);
        MonitorInfo::new(x, y, x + w, y + h)
    }
}
