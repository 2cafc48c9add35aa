use norsk_lookup::model::{Color, PopupConfig};
use norsk_lookup::parse_hex_color;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn parse_hex_rgb() {
    let (r, g, b, a) = parse_hex_color("#FF0080").expect("valid rgb hex");
    assert!(approx_eq(r, 1.0));
    assert!(approx_eq(g, 0.0));
    assert!(approx_eq(b, 128.0 / 255.0));
    assert!(approx_eq(a, 1.0));
}

#[test]
fn parse_hex_rgba() {
    let (r, g, b, a) = parse_hex_color("#33669980").expect("valid rgba hex");
    assert!(approx_eq(r, 51.0 / 255.0));
    assert!(approx_eq(g, 102.0 / 255.0));
    assert!(approx_eq(b, 153.0 / 255.0));
    assert!(approx_eq(a, 128.0 / 255.0));
}

#[test]
fn parse_hex_trims_and_ignores_whitespace() {
    let (r, g, b, a) = parse_hex_color("  ff00FF80  ").expect("valid with whitespace and mixed case");
    assert!(approx_eq(r, 1.0));
    assert!(approx_eq(g, 0.0));
    assert!(approx_eq(b, 1.0));
    assert!(approx_eq(a, 128.0 / 255.0));
}

#[test]
fn parse_hex_invalid_lengths_return_none() {
    assert!(parse_hex_color("#FFF").is_none());
    assert!(parse_hex_color("#FF00").is_none());
    assert!(parse_hex_color("#FF00FF0000").is_none());
}

#[test]
fn parse_hex_invalid_chars_return_none() {
    assert!(parse_hex_color("#GG0000").is_none());
    assert!(parse_hex_color("ZZZZZZZZ").is_none());
    // Multi-byte input must not panic on slicing.
    assert!(parse_hex_color("#ææææææ").is_none());
}

// === Popup colours ===

#[test]
fn popup_colours_come_from_hex() {
    let c = Color::from_hex("#1E1E1E").expect("valid");
    assert!((c.r - 30.0 / 255.0).abs() < 1e-6);
    assert!((c.a - 1.0).abs() < 1e-6);
}

#[test]
fn update_popup_has_a_visible_border() {
    let lookup = PopupConfig::default();
    let update = PopupConfig::update_notification();
    assert!(update.border_width > lookup.border_width);
    assert_ne!(update.background, lookup.background);
    assert_eq!(update.auto_close, None);
}
