use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::default().validate().is_ok());
    assert!(
        Canvas {
            width: 0,
            height: 1080
        }
        .validate()
        .is_err()
    );
}

#[test]
fn rgba_hex_parses_both_forms() {
    assert_eq!(Rgba8::from_hex("#ff3366").unwrap(), Rgba8::rgb(255, 51, 102));
    assert_eq!(
        Rgba8::from_hex("#FF336680").unwrap(),
        Rgba8::rgba(255, 51, 102, 128)
    );
}

#[test]
fn rgba_hex_rejects_malformed_input() {
    assert!(Rgba8::from_hex("ff3366").is_err());
    assert!(Rgba8::from_hex("#f36").is_err());
    assert!(Rgba8::from_hex("#gggggg").is_err());
    assert!(Rgba8::from_hex("").is_err());
}

#[test]
fn rgba_serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#00ff0080\"").unwrap();
    assert_eq!(c, Rgba8::rgba(0, 255, 0, 128));
    assert_eq!(
        serde_json::to_string(&Rgba8::rgb(1, 2, 3)).unwrap(),
        "\"#010203\""
    );
    assert!(serde_json::from_str::<Rgba8>("\"red\"").is_err());
}

#[test]
fn clamp_time_pins_to_range() {
    assert_eq!(clamp_time(-3.0, 10.0), 0.0);
    assert_eq!(clamp_time(12.0, 10.0), 10.0);
    assert_eq!(clamp_time(4.5, 10.0), 4.5);
    assert_eq!(clamp_time(4.5, 0.0), 0.0);
    assert_eq!(clamp_time(f64::NAN, 10.0), 0.0);
    assert_eq!(clamp_time(4.5, f64::NAN), 0.0);
}

#[test]
fn time_ratio_guards_unknown_duration() {
    assert_eq!(time_ratio(5.0, 0.0), 0.0);
    assert_eq!(time_ratio(5.0, f64::NAN), 0.0);
    assert_eq!(time_ratio(5.0, 10.0), 0.5);
    assert_eq!(time_ratio(50.0, 10.0), 1.0);
}

#[test]
fn timecode_is_zero_padded() {
    assert_eq!(format_timecode(0.0), "00:00");
    assert_eq!(format_timecode(65.9), "01:05");
    assert_eq!(format_timecode(3725.0), "1:02:05");
    assert_eq!(format_timecode(f64::NAN), "00:00");
    assert_eq!(format_timecode(-1.0), "00:00");
}
