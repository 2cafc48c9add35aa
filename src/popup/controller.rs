//! Single-popup controller.
//!
//! Owns zero or one live popup plus the remembered "fixed position". Runs
//! on the UI thread only; other threads go through the event bus.

use super::dismiss::PopupId;
use crate::error::PopupError;
use crate::model::{place_popup, MonitorInfo, Point, PopupConfig, Rect, Size};

/// What the controller needs from the windowing system.
pub trait PopupHost {
    /// Native window handle (or a test stand-in).
    type Window;

    fn cursor_position(&self) -> Point;

    /// Monitor containing `point`, falling back to the first monitor.
    /// `None` only when no monitor could be enumerated.
    fn monitor_at(&self, point: Point) -> Option<MonitorInfo>;

    /// Bounds of the whole virtual desktop.
    fn virtual_screen(&self) -> MonitorInfo;

    /// Outer size of a popup showing `text` with `config`'s style, in the
    /// pixel density of the monitor under `anchor`.
    fn measure(&self, text: &str, config: &PopupConfig, anchor: Point) -> Size;

    fn create(&self, request: &PopupRequest<'_>) -> Result<Self::Window, PopupError>;

    /// Destroying an already-gone window must be harmless.
    fn destroy(&self, window: Self::Window);
}

/// Everything needed to create one popup window.
#[derive(Debug, Clone, Copy)]
pub struct PopupRequest<'a> {
    pub id: PopupId,
    pub text: &'a str,
    /// Point the popup was placed against; picks the monitor DPI.
    pub anchor: Point,
    pub bounds: Rect,
    pub config: &'a PopupConfig,
}

struct LivePopup<W> {
    id: PopupId,
    window: W,
    bounds: Rect,
}

pub struct PopupController<H: PopupHost> {
    host: H,
    config: PopupConfig,
    current: Option<LivePopup<H::Window>>,
    fixed_position: Option<Point>,
}

impl<H: PopupHost> PopupController<H> {
    pub fn new(host: H, config: PopupConfig) -> Self {
        Self {
            host,
            config,
            current: None,
            fixed_position: None,
        }
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_id(&self) -> Option<PopupId> {
        self.current.as_ref().map(|live| live.id)
    }

    pub fn current_bounds(&self) -> Option<Rect> {
        self.current.as_ref().map(|live| live.bounds)
    }

    pub fn fixed_position(&self) -> Option<Point> {
        self.fixed_position
    }

    pub fn owns(&self, id: PopupId) -> bool {
        self.current_id() == Some(id)
    }

    /// Replace whatever is showing with `text`.
    ///
    /// - empty/absent/blank text: close, show nothing
    /// - explicit `position`: anchor there and remember it
    /// - no position while a fixed position is remembered: anchor there
    /// - otherwise: anchor at the cursor
    pub fn show(&mut self, text: Option<&str>, position: Option<Point>) {
        self.destroy_current();

        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            self.fixed_position = None;
            return;
        };

        let base = match position.or(self.fixed_position) {
            Some(anchor) => anchor,
            None => self.host.cursor_position(),
        };
        if position.is_some() {
            self.fixed_position = position;
        }

        let size = self.host.measure(text, &self.config, base);
        let area = self
            .host
            .monitor_at(base)
            .unwrap_or_else(|| self.host.virtual_screen());
        let origin = place_popup(base, self.config.offset(), size, &area, self.config.edge_margin);
        let bounds = Rect::from_origin_size(origin, size);

        let id = PopupId::next();
        let request = PopupRequest {
            id,
            text,
            anchor: base,
            bounds,
            config: &self.config,
        };
        match self.host.create(&request) {
            Ok(window) => {
                tracing::debug!(popup = id.raw(), ?bounds, "Popup shown");
                self.current = Some(LivePopup { id, window, bounds });
            }
            Err(err) => {
                tracing::warn!("Could not show popup: {err}");
                self.fixed_position = None;
            }
        }
    }

    /// Close the popup (if any) and forget the fixed position.
    pub fn close_current(&mut self) {
        self.destroy_current();
        self.fixed_position = None;
    }

    /// The window reported a dismissal. Returns false for ids this
    /// controller does not own (stale or foreign windows).
    pub fn on_dismissed(&mut self, id: PopupId) -> bool {
        if !self.owns(id) {
            return false;
        }
        self.close_current();
        true
    }

    fn destroy_current(&mut self) {
        if let Some(live) = self.current.take() {
            tracing::debug!(popup = live.id.raw(), "Popup destroyed");
            self.host.destroy(live.window);
        }
    }
}

impl<H: PopupHost> Drop for PopupController<H> {
    fn drop(&mut self) {
        self.destroy_current();
    }
}
