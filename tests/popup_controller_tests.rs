mod common;

use common::FakeHost;
use norsk_lookup::model::{MonitorInfo, Point, PopupConfig, THINKING_TEXT};
use norsk_lookup::popup::{PopupController, PopupId};

fn controller() -> (FakeHost, PopupController<FakeHost>) {
    let host = FakeHost::default();
    let controller = PopupController::new(host.clone(), PopupConfig::default());
    (host, controller)
}

// === Anchoring ===

#[test]
fn explicit_position_is_offset_and_remembered() {
    let (host, mut popup) = controller();
    popup.show(Some("hus (noun) → house"), Some(Point::new(500, 400)));

    let shown = host.last_shown().expect("a popup");
    assert_eq!(shown.bounds.origin(), Point::new(510, 410));
    assert_eq!(popup.fixed_position(), Some(Point::new(500, 400)));
    assert_eq!(popup.current_bounds(), Some(shown.bounds));
    assert!(popup.owns(shown.id));
}

#[test]
fn result_replaces_placeholder_at_the_same_anchor() {
    let (host, mut popup) = controller();
    popup.show(Some(THINKING_TEXT), Some(Point::new(500, 400)));
    let placeholder = host.last_shown().expect("placeholder");

    // The user moves the mouse while the lookup runs.
    host.move_cursor(Point::new(1200, 900));
    popup.show(Some("hus (noun) → house"), None);

    let result = host.last_shown().expect("result");
    assert_eq!(result.bounds.origin(), placeholder.bounds.origin());
    assert_ne!(result.id, placeholder.id);
    assert_eq!(host.shown_count(), 2);
    assert_eq!(host.live_count(), 1);
    assert_eq!(host.live_text().as_deref(), Some("hus (noun) → house"));
}

#[test]
fn no_position_and_nothing_remembered_uses_cursor() {
    let (host, mut popup) = controller();
    host.move_cursor(Point::new(100, 100));
    popup.show(Some("bil (noun) → car"), None);

    let shown = host.last_shown().expect("a popup");
    assert_eq!(shown.bounds.origin(), Point::new(110, 110));
    assert_eq!(popup.fixed_position(), None);
}

// === Empty text ===

#[test]
fn empty_or_blank_text_closes_and_forgets_anchor() {
    let (host, mut popup) = controller();
    popup.show(Some(THINKING_TEXT), Some(Point::new(500, 400)));

    popup.show(Some(""), None);
    assert!(!popup.is_showing());
    assert_eq!(popup.fixed_position(), None);
    assert_eq!(host.live_count(), 0);

    popup.show(Some("  \n "), Some(Point::new(10, 10)));
    popup.show(None, Some(Point::new(10, 10)));
    assert!(!popup.is_showing());
    assert_eq!(popup.fixed_position(), None);
    assert_eq!(host.shown_count(), 1);
}

// === Screen edges ===

#[test]
fn bottom_right_corner_pushes_back_inside() {
    let (host, mut popup) = controller();
    host.move_cursor(Point::new(1900, 1060));
    popup.show(Some("ord (noun) → word"), None);

    let bounds = host.last_shown().expect("a popup").bounds;
    assert_eq!(bounds.origin(), Point::new(1710, 1020));
    assert!(MonitorInfo::new(0, 0, 1920, 1080).contains_rect(&bounds));
}

#[test]
fn clamps_to_the_monitor_under_the_anchor() {
    let (host, mut popup) = controller();
    host.0.borrow_mut().monitors = vec![
        MonitorInfo::new(0, 0, 1920, 1080),
        MonitorInfo::new(1920, 0, 3840, 1080),
        MonitorInfo::new(-1920, 0, 0, 1080),
    ];

    popup.show(Some("right"), Some(Point::new(3800, 500)));
    assert_eq!(host.last_shown().unwrap().bounds.origin(), Point::new(3630, 510));

    // Near the right edge of the left monitor: stays on that monitor.
    popup.show(Some("left"), Some(Point::new(-50, 500)));
    assert_eq!(host.last_shown().unwrap().bounds.origin(), Point::new(-210, 510));
}

#[test]
fn sizing_uses_the_monitor_under_the_anchor() {
    let (host, mut popup) = controller();
    host.move_cursor(Point::new(2500, 300));
    popup.show(Some(THINKING_TEXT), Some(Point::new(-800, 200)));

    // The result reuses the remembered anchor, not the cursor.
    popup.show(Some("hus (noun) → house"), None);

    let desktop = host.0.borrow();
    assert_eq!(desktop.measured_at, vec![Point::new(-800, 200); 2]);
    assert!(desktop.shown.iter().all(|s| s.anchor == Point::new(-800, 200)));
}

#[test]
fn cursor_anchor_reaches_measure_and_create() {
    let (host, mut popup) = controller();
    host.move_cursor(Point::new(2500, 300));
    popup.show(Some("bil (noun) → car"), None);

    assert_eq!(host.0.borrow().measured_at, vec![Point::new(2500, 300)]);
    assert_eq!(host.last_shown().unwrap().anchor, Point::new(2500, 300));
}

#[test]
fn no_monitors_falls_back_to_virtual_screen() {
    let (host, mut popup) = controller();
    {
        let mut desktop = host.0.borrow_mut();
        desktop.monitors.clear();
        desktop.virtual_screen = MonitorInfo::new(-1920, 0, 1920, 1080);
    }
    popup.show(Some("hei"), Some(Point::new(-1900, 10)));
    assert_eq!(host.last_shown().unwrap().bounds.origin(), Point::new(-1890, 20));
}

// === Dismissal ===

#[test]
fn stale_dismissal_is_ignored() {
    let (host, mut popup) = controller();
    popup.show(Some("first"), Some(Point::new(500, 400)));
    let first = host.last_shown().unwrap().id;
    popup.show(Some("second"), Some(Point::new(500, 400)));

    assert!(!popup.on_dismissed(first));
    assert!(popup.is_showing());
    assert_eq!(host.live_text().as_deref(), Some("second"));

    assert!(!popup.on_dismissed(PopupId::next()));
    assert!(popup.is_showing());
}

#[test]
fn dismissal_clears_anchor_so_next_show_follows_cursor() {
    let (host, mut popup) = controller();
    popup.show(Some(THINKING_TEXT), Some(Point::new(500, 400)));
    let id = popup.current_id().expect("showing");

    assert!(popup.on_dismissed(id));
    assert!(!popup.is_showing());
    assert_eq!(popup.fixed_position(), None);
    assert_eq!(host.live_count(), 0);

    host.move_cursor(Point::new(50, 60));
    popup.show(Some("late"), None);
    assert_eq!(host.last_shown().unwrap().bounds.origin(), Point::new(60, 70));
}

#[test]
fn failed_create_leaves_nothing_showing() {
    let (host, mut popup) = controller();
    host.0.borrow_mut().fail_create = true;
    popup.show(Some("hus"), Some(Point::new(500, 400)));

    assert!(!popup.is_showing());
    assert_eq!(popup.fixed_position(), None);
    assert_eq!(host.shown_count(), 0);
}

#[test]
fn dropping_the_controller_destroys_its_window() {
    let (host, mut popup) = controller();
    popup.show(Some("hus"), None);
    assert_eq!(host.live_count(), 1);
    drop(popup);
    assert_eq!(host.live_count(), 0);
}
