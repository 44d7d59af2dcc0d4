//! Color model tests

use hilite::color::{
    hex_to_rgb, normalize_hex, rgb_to_hex, rgb_to_hue, sort_by_hue_descending, ColorError, Rgb,
};

#[test]
fn test_round_trip_to_canonical_form() {
    for (input, canonical) in [
        ("#FFF", "#ffffff"),
        ("abc", "#aabbcc"),
        ("#1E1E1E", "#1e1e1e"),
        ("00ff7f", "#00ff7f"),
    ] {
        assert_eq!(rgb_to_hex(hex_to_rgb(input).unwrap()), canonical);
    }
}

#[test]
fn test_normalize_trims_whitespace() {
    assert_eq!(normalize_hex("  #F0a \n").unwrap(), "#ff00aa");
}

#[test]
fn test_invalid_inputs() {
    for input in ["", "#", "#12", "#12345", "#1234567", "red", "#12345g"] {
        assert!(
            matches!(hex_to_rgb(input), Err(ColorError::InvalidColorFormat(_))),
            "{:?} should be rejected",
            input
        );
    }
}

#[test]
fn test_secondary_hues() {
    assert_eq!(rgb_to_hue(Rgb::new(255, 255, 0)), 60.0);
    assert_eq!(rgb_to_hue(Rgb::new(0, 255, 255)), 180.0);
    assert_eq!(Rgb::new(255, 0, 255).hue(), 300.0);
}

#[test]
fn test_hue_in_range() {
    let hue = rgb_to_hue(Rgb::new(255, 0, 1));
    assert!((0.0..360.0).contains(&hue), "hue {} out of range", hue);
    assert!(hue > 359.0);
}

#[test]
fn test_sort_puts_blue_first_red_last() {
    let sorted = sort_by_hue_descending(&["#ff0000", "#ffff00", "#0000ff", "#00ffff", "#00ff00"]);
    assert_eq!(
        sorted,
        vec!["#0000ff", "#00ffff", "#00ff00", "#ffff00", "#ff0000"]
    );
}

#[test]
fn test_sort_is_idempotent() {
    let once = sort_by_hue_descending(&["#123456", "#ff8800", "#88ff00", "#aa00ff", "#777777"]);
    let twice = sort_by_hue_descending(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_sort_keeps_order_of_equal_hues() {
    // #ff0000, #800000 and #ff8080 all have hue 0
    let a = sort_by_hue_descending(&["#ff0000", "#800000", "#0000ff", "#ff8080"]);
    assert_eq!(a, vec!["#0000ff", "#ff0000", "#800000", "#ff8080"]);

    let b = sort_by_hue_descending(&["#ff8080", "#0000ff", "#800000", "#ff0000"]);
    assert_eq!(b, vec!["#0000ff", "#ff8080", "#800000", "#ff0000"]);
}

#[test]
fn test_sort_accepts_owned_strings() {
    let colors = vec!["#00ff00".to_string(), "#0000ff".to_string()];
    assert_eq!(
        sort_by_hue_descending(&colors),
        vec!["#0000ff".to_string(), "#00ff00".to_string()]
    );
}
