//! Screen geometry in virtual-screen coordinates.
//!
//! Pure functions only; the Windows display provider feeds them with what
//! `EnumDisplayMonitors` reports.

/// A point in virtual-screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle; `right` and `bottom` are exclusive.
///
/// Used both for physical monitors and for popup bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorInfo {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Popup bounds share the monitor rectangle representation.
pub type Rect = MonitorInfo;

impl MonitorInfo {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2,
            self.top + self.height() / 2,
        )
    }

    /// Half-open containment: left/top inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Point) -> bool {
        self.left <= point.x && point.x < self.right && self.top <= point.y && point.y < self.bottom
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &MonitorInfo) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

/// First monitor containing `point`, else the first enumerated monitor.
///
/// Only `None` when `monitors` is empty. A point can miss every rectangle
/// through DPI rounding at the outer edge of the virtual desktop.
pub fn monitor_at(monitors: &[MonitorInfo], point: Point) -> Option<MonitorInfo> {
    monitors
        .iter()
        .find(|m| m.contains(point))
        .or_else(|| monitors.first())
        .copied()
}

/// Physical pixels per DIP for a monitor reporting `dpi`. A zero DPI
/// (failed query) is treated as 96.
pub fn scale_for_dpi(dpi: u32) -> f32 {
    if dpi == 0 {
        1.0
    } else {
        dpi as f32 / 96.0
    }
}

/// Top-left corner for a popup of `size` anchored at `base + offset`,
/// clamped into `bounds`.
///
/// Keeps `margin` pixels from the edge it was pushed against when there is
/// room; otherwise the popup may touch the edge but never crosses it. A
/// popup larger than `bounds` is pinned to the top-left edge.
pub fn place_popup(
    base: Point,
    offset: (i32, i32),
    size: Size,
    bounds: &MonitorInfo,
    margin: i32,
) -> Point {
    let start = base.offset(offset.0, offset.1);
    Point::new(
        clamp_axis(start.x, size.width, bounds.left, bounds.right, margin),
        clamp_axis(start.y, size.height, bounds.top, bounds.bottom, margin),
    )
}

fn clamp_axis(start: i32, extent: i32, lo: i32, hi: i32, margin: i32) -> i32 {
    let mut v = start;
    if v + extent > hi {
        v = hi - extent - margin;
    }
    if v < lo {
        v = lo + margin;
    }
    v.min(hi - extent).max(lo)
}
