use super::*;

#[test]
fn active_card_sits_at_the_top_of_the_arc() {
    let p = ArcLayout::desktop().place(0);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 0.0);
    assert_eq!(p.rotation_deg, 0.0);
    assert_eq!(p.scale, 1.0);
    assert_eq!(p.opacity, 1.0);
    assert_eq!(p.z_index, 100);
}

#[test]
fn placement_follows_arc_formulas() {
    let layout = ArcLayout::desktop();
    let p = layout.place(2);
    let rad = 12f64.to_radians();
    assert!((p.x - rad.sin() * 800.0).abs() < 1e-9);
    assert!((p.y - (800.0 - rad.cos() * 800.0)).abs() < 1e-9);
    assert!((p.rotation_deg - 18.0).abs() < 1e-9);
    assert!((p.scale - 0.8).abs() < 1e-9);
    assert!((p.opacity - 0.6).abs() < 1e-9);
    assert_eq!(p.z_index, 98);

    let mirrored = layout.place(-2);
    assert!((mirrored.x + p.x).abs() < 1e-9);
    assert_eq!(mirrored.y, p.y);
    assert_eq!(mirrored.z_index, p.z_index);
}

#[test]
fn scale_and_opacity_floor() {
    let p = ArcLayout::desktop().place(4);
    assert!((p.scale - 0.7).abs() < 1e-9);
    assert!((p.opacity - 0.3).abs() < 1e-9);
    let far = ArcLayout::desktop().place(40);
    assert_eq!(far.scale, 0.7);
    assert_eq!(far.opacity, 0.3);
}

#[test]
fn viewport_selects_layout() {
    let layouts = ResponsiveLayout::default();
    let mobile = Viewport::new(390.0, 844.0).unwrap();
    let desktop = Viewport::new(1440.0, 900.0).unwrap();
    assert_eq!(layouts.for_viewport(&mobile).window_radius, 2);
    assert_eq!(layouts.for_viewport(&mobile).radius, 300.0);
    assert_eq!(layouts.for_viewport(&desktop).window_radius, 4);
    assert_eq!(layouts.for_viewport(&desktop).angle_step_deg, 6.0);
}

#[test]
fn validate_rejects_bad_radius() {
    let bad = ArcLayout {
        radius: 0.0,
        ..ArcLayout::desktop()
    };
    assert!(bad.validate().is_err());
    assert!(ResponsiveLayout::default().validate().is_ok());
}

#[test]
fn negative_decay_is_rejected() {
    let growing = ArcLayout {
        scale_decay: -0.1,
        ..ArcLayout::desktop()
    };
    assert!(matches!(growing.validate(), Err(MotionError::Validation(_))));

    let brightening = ArcLayout {
        opacity_decay: -0.2,
        ..ArcLayout::mobile()
    };
    assert!(brightening.validate().is_err());

    let flat = ArcLayout {
        scale_decay: 0.0,
        opacity_decay: 0.0,
        ..ArcLayout::desktop()
    };
    flat.validate().unwrap();
    assert_eq!(flat.place(3).scale, flat.place(0).scale);
}
