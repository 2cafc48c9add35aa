//! Glue between the hotkey thread, the lookup threads and the popups.
//!
//! ```text
//! hotkey thread ── capture_and_publish ──► SelectionCaptured ─┐
//! lookup thread ───────────────────────► LookupFinished ──────┤
//! update thread ───────────────────────► UpdateAvailable ─────┼─► Coordinator::handle (UI thread)
//! popup wndproc ───────────────────────► PopupClicked/...  ───┘
//! ```

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::capture::{SelectionCapture, SelectionSource};
use crate::events::{AppEvent, EventPublisher};
use crate::lookup::{lookup_display, lookup_word, Dictionary};
use crate::model::{AppConfig, Point, THINKING_TEXT, UPDATE_POPUP_CENTER_SHIFT};
use crate::popup::{PopupController, PopupHost, PopupId};
use crate::update::{UpdateChecker, UpdateInfo};

/// Hotkey callback body: capture the selection and hand it to the UI thread.
///
/// Nothing is published when the capture is absent, so an empty selection
/// never flashes a popup. Returns whether an event was published.
pub fn capture_and_publish<S, F>(
    capture: &SelectionCapture<S>,
    cursor: F,
    publisher: &EventPublisher,
) -> bool
where
    S: SelectionSource,
    F: FnOnce() -> Point,
{
    let Some(text) = capture.get_selected_text() else {
        tracing::info!("Hotkey pressed but nothing is selected");
        return false;
    };
    let cursor = cursor();
    tracing::debug!(chars = text.chars().count(), ?cursor, "Selection captured");
    publisher.publish(AppEvent::SelectionCaptured { text, cursor });
    true
}

/// Sleep for `delay`, check once, publish `UpdateAvailable` if newer.
pub fn spawn_update_check(
    checker: UpdateChecker,
    delay: Duration,
    publisher: EventPublisher,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("update-check".into())
        .spawn(move || {
            thread::sleep(delay);
            tracing::debug!("Checking for updates");
            match checker.check_for_updates(false) {
                Some(info) => publisher.publish(AppEvent::UpdateAvailable(info)),
                None => tracing::debug!("No update available"),
            }
        })
}

/// What the platform loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Opens a URL in the user's browser.
pub type UrlOpener = Box<dyn Fn(&str)>;

/// UI-thread state machine. Owns both popup controllers.
pub struct Coordinator<H: PopupHost> {
    lookup_popup: PopupController<H>,
    update_popup: PopupController<H>,
    dictionary: Arc<dyn Dictionary>,
    publisher: EventPublisher,
    max_results: usize,
    latest_request: u64,
    /// Request whose result may still replace the placeholder.
    awaiting: Option<u64>,
    pending_update: Option<UpdateInfo>,
    open_url: UrlOpener,
}

impl<H: PopupHost + Clone> Coordinator<H> {
    pub fn new(
        host: H,
        config: &AppConfig,
        dictionary: Arc<dyn Dictionary>,
        publisher: EventPublisher,
        open_url: UrlOpener,
    ) -> Self {
        Self {
            lookup_popup: PopupController::new(host.clone(), config.lookup_popup.clone()),
            update_popup: PopupController::new(host, config.update_popup.clone()),
            dictionary,
            publisher,
            max_results: config.max_results,
            latest_request: 0,
            awaiting: None,
            pending_update: None,
            open_url,
        }
    }
}

impl<H: PopupHost> Coordinator<H> {
    pub fn lookup_popup(&self) -> &PopupController<H> {
        &self.lookup_popup
    }

    pub fn update_popup(&self) -> &PopupController<H> {
        &self.update_popup
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    pub fn handle(&mut self, event: AppEvent) -> Flow {
        tracing::trace!(event = event.description(), "Handling event");
        match event {
            AppEvent::SelectionCaptured { text, cursor } => self.on_selection(&text, cursor),
            AppEvent::LookupFinished { request, display } => self.on_lookup_finished(request, &display),
            AppEvent::UpdateAvailable(info) => self.on_update_available(info),
            AppEvent::PopupClicked { popup } => self.on_clicked(popup),
            AppEvent::PopupDismissed { popup, reason } => {
                tracing::debug!(popup = popup.raw(), ?reason, "Popup dismissed");
                self.on_dismissed(popup);
            }
            AppEvent::Quit => {
                self.shutdown();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    /// Close every popup.
    pub fn shutdown(&mut self) {
        self.lookup_popup.close_current();
        self.update_popup.close_current();
        self.awaiting = None;
        self.pending_update = None;
    }

    fn on_selection(&mut self, text: &str, cursor: Point) {
        let Some(word) = lookup_word(text) else {
            tracing::info!("Selection has no word to look up");
            return;
        };

        self.latest_request += 1;
        let request = self.latest_request;
        self.awaiting = Some(request);
        self.lookup_popup.show(Some(THINKING_TEXT), Some(cursor));

        let dictionary = Arc::clone(&self.dictionary);
        let publisher = self.publisher.clone();
        let max_results = self.max_results;
        tracing::info!(request, word = %word, "Looking up");
        let spawned = thread::Builder::new()
            .name(format!("lookup-{request}"))
            .spawn(move || {
                let display = lookup_display(dictionary.as_ref(), &word, max_results);
                publisher.publish(AppEvent::LookupFinished { request, display });
            });
        if let Err(err) = spawned {
            tracing::error!("Failed to spawn lookup thread: {err}");
            self.awaiting = None;
            self.lookup_popup.close_current();
        }
    }

    fn on_lookup_finished(&mut self, request: u64, display: &str) {
        if self.awaiting != Some(request) {
            tracing::debug!(request, latest = self.latest_request, "Dropping stale lookup result");
            return;
        }
        self.awaiting = None;
        // No position: reuses the placeholder's anchor.
        self.lookup_popup.show(Some(display), None);
    }

    fn on_update_available(&mut self, info: UpdateInfo) {
        let host = self.update_popup.host();
        let cursor = host.cursor_position();
        let area = host
            .monitor_at(cursor)
            .unwrap_or_else(|| host.virtual_screen());
        let (dx, dy) = UPDATE_POPUP_CENTER_SHIFT;
        let anchor = area.center().offset(-dx, -dy);

        self.update_popup
            .show(Some(&info.format_notification()), Some(anchor));
        self.pending_update = Some(info);
    }

    fn on_clicked(&mut self, popup: PopupId) {
        if self.lookup_popup.owns(popup) {
            self.awaiting = None;
            self.lookup_popup.close_current();
        } else if self.update_popup.owns(popup) {
            if let Some(info) = self.pending_update.take() {
                tracing::info!(url = %info.release_page_url, "Opening release page");
                (self.open_url)(&info.release_page_url);
            }
            self.update_popup.close_current();
        }
    }

    fn on_dismissed(&mut self, popup: PopupId) {
        if self.lookup_popup.on_dismissed(popup) {
            self.awaiting = None;
        } else if self.update_popup.on_dismissed(popup) {
            self.pending_update = None;
        }
    }
}
