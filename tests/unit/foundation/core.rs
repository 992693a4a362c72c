use super::*;

#[test]
fn time_arithmetic_saturates() {
    let t = TimeMs(100);
    assert_eq!(t.after(DurationMs(50)), TimeMs(150));
    assert_eq!(t.since(TimeMs(40)), DurationMs(60));
    assert_eq!(TimeMs(10).since(TimeMs(40)), DurationMs::ZERO);
    assert_eq!(DurationMs(5).saturating_sub(DurationMs(9)), DurationMs::ZERO);
}

#[test]
fn duration_secs_conversions() {
    assert_eq!(DurationMs(1500).as_secs_f64(), 1.5);
    assert_eq!(DurationMs::from_secs_f64(0.4), DurationMs(400));
    assert_eq!(DurationMs::from_secs_f64(-1.0), DurationMs::ZERO);
}

#[test]
fn viewport_mobile_breakpoint() {
    assert!(Viewport::new(767.0, 800.0).unwrap().is_mobile());
    assert!(!Viewport::new(768.0, 800.0).unwrap().is_mobile());
    assert!(Viewport::new(f64::NAN, 1.0).is_err());
    assert!(Viewport::new(-1.0, 1.0).is_err());
}

#[test]
fn hex_colors_parse_and_print() {
    assert_eq!(Rgba8::from_hex("#e5e7eb").unwrap(), Rgba8::rgb(0xe5, 0xe7, 0xeb));
    assert_eq!(Rgba8::from_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::from_hex("#00000080").unwrap().a, 0x80);
    assert_eq!(Rgba8::rgb(0xdf, 0x95, 0xff).to_string(), "#df95ff");
    assert!(Rgba8::from_hex("e5e7eb").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
}

#[test]
fn colors_serialize_as_hex_strings() {
    let json = serde_json::to_string(&Rgba8::BLACK).unwrap();
    assert_eq!(json, "\"#000000\"");
    let back: Rgba8 = serde_json::from_str("\"#ffaa95\"").unwrap();
    assert_eq!(back, Rgba8::rgb(0xff, 0xaa, 0x95));
}
