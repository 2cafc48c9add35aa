//! In-memory popup host shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use norsk_lookup::error::PopupError;
use norsk_lookup::model::{MonitorInfo, Point, PopupConfig, Rect, Size};
use norsk_lookup::popup::{PopupHost, PopupId, PopupRequest};

#[derive(Debug, Clone)]
pub struct Shown {
    pub window: u32,
    pub id: PopupId,
    pub text: String,
    pub anchor: Point,
    pub bounds: Rect,
}

#[derive(Debug)]
pub struct Desktop {
    pub cursor: Point,
    pub monitors: Vec<MonitorInfo>,
    pub virtual_screen: MonitorInfo,
    pub popup_size: Size,
    pub fail_create: bool,
    pub shown: Vec<Shown>,
    pub measured_at: Vec<Point>,
    pub live: Vec<u32>,
    next_window: u32,
}

impl Default for Desktop {
    fn default() -> Self {
        Self {
            cursor: Point::new(400, 300),
            monitors: vec![MonitorInfo::new(0, 0, 1920, 1080)],
            virtual_screen: MonitorInfo::new(0, 0, 1920, 1080),
            popup_size: Size::new(200, 50),
            fail_create: false,
            shown: Vec::new(),
            measured_at: Vec::new(),
            live: Vec::new(),
            next_window: 1,
        }
    }
}

/// Cheap to clone; every clone sees the same desktop.
#[derive(Debug, Clone, Default)]
pub struct FakeHost(pub Rc<RefCell<Desktop>>);

impl FakeHost {
    pub fn move_cursor(&self, to: Point) {
        self.0.borrow_mut().cursor = to;
    }

    pub fn last_shown(&self) -> Option<Shown> {
        self.0.borrow().shown.last().cloned()
    }

    pub fn live_count(&self) -> usize {
        self.0.borrow().live.len()
    }

    pub fn shown_count(&self) -> usize {
        self.0.borrow().shown.len()
    }

    /// Text of the only live popup, if exactly one is live.
    pub fn live_text(&self) -> Option<String> {
        let desktop = self.0.borrow();
        match desktop.live.as_slice() {
            [window] => desktop
                .shown
                .iter()
                .find(|s| s.window == *window)
                .map(|s| s.text.clone()),
            _ => None,
        }
    }
}

impl PopupHost for FakeHost {
    type Window = u32;

    fn cursor_position(&self) -> Point {
        self.0.borrow().cursor
    }

    fn monitor_at(&self, point: Point) -> Option<MonitorInfo> {
        norsk_lookup::model::monitor_at(&self.0.borrow().monitors, point)
    }

    fn virtual_screen(&self) -> MonitorInfo {
        self.0.borrow().virtual_screen
    }

    fn measure(&self, _text: &str, _config: &PopupConfig, anchor: Point) -> Size {
        let mut desktop = self.0.borrow_mut();
        desktop.measured_at.push(anchor);
        desktop.popup_size
    }

    fn create(&self, request: &PopupRequest<'_>) -> Result<u32, PopupError> {
        let mut desktop = self.0.borrow_mut();
        if desktop.fail_create {
            return Err(PopupError::Create("window class missing".into()));
        }
        let window = desktop.next_window;
        desktop.next_window += 1;
        desktop.shown.push(Shown {
            window,
            id: request.id,
            text: request.text.to_string(),
            anchor: request.anchor,
            bounds: request.bounds,
        });
        desktop.live.push(window);
        Ok(window)
    }

    fn destroy(&self, window: u32) {
        self.0.borrow_mut().live.retain(|w| *w != window);
    }
}
