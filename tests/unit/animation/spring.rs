use super::*;

#[test]
fn damping_regimes() {
    assert_eq!(SpringConfig::new(100.0, 10.0, 1.0).regime(), DampingRegime::Under);
    assert_eq!(SpringConfig::new(100.0, 20.0, 1.0).regime(), DampingRegime::Critical);
    assert_eq!(SpringConfig::new(50.0, 20.0, 1.5).regime(), DampingRegime::Over);
    assert!((SpringConfig::new(120.0, 14.0, 1.0).damping_ratio() - 0.639).abs() < 1e-3);
}

#[test]
fn validate_rejects_bad_parameters() {
    assert!(SpringConfig::default().validate().is_ok());
    assert!(SpringConfig::new(0.0, 10.0, 1.0).validate().is_err());
    assert!(SpringConfig::new(100.0, -1.0, 1.0).validate().is_err());
    assert!(SpringConfig::new(100.0, 10.0, f64::NAN).validate().is_err());
}

#[test]
fn numeric_spring_tracks_analytic_response() {
    let cfg = SpringConfig::new(100.0, 10.0, 1.0).with_rest_delta(0.0);
    let mut s = Spring::new(cfg, 0.0);
    s.set_target(1.0);
    for ms in [100u64, 300, 600] {
        let mut s2 = s.clone();
        s2.step(DurationMs(ms));
        let expected = spring_step(ms as f64 / 1000.0, 100.0, 10.0, 1.0);
        assert!(
            (s2.value() - expected).abs() < 0.02,
            "t={ms}ms numeric={} analytic={expected}",
            s2.value()
        );
    }
}

#[test]
fn stepping_is_independent_of_slicing() {
    let cfg = SpringConfig::new(120.0, 14.0, 1.0);
    let mut a = Spring::new(cfg, 0.0);
    let mut b = Spring::new(cfg, 0.0);
    a.set_target(100.0);
    b.set_target(100.0);
    a.step(DurationMs(160));
    for _ in 0..10 {
        b.step(DurationMs(16));
    }
    assert_eq!(a.value(), b.value());
    assert_eq!(a.velocity(), b.velocity());
}

#[test]
fn spring_settles_exactly_on_target() {
    let mut s = Spring::new(SpringConfig::new(100.0, 20.0, 1.0), 12.0);
    s.set_target(0.0);
    s.step(DurationMs(5_000));
    assert!(s.is_at_rest());
    assert_eq!(s.value(), 0.0);
}

#[test]
fn jump_clears_motion() {
    let mut s = Spring::new(SpringConfig::default(), 0.0);
    s.set_target(5.0);
    s.step(DurationMs(50));
    assert!(s.velocity() != 0.0);
    s.jump(3.0);
    assert!(s.is_at_rest());
    assert_eq!(s.target(), 3.0);
}

#[test]
fn analytic_step_endpoints() {
    for (k, c, m) in [(100.0, 10.0, 1.0), (100.0, 20.0, 1.0), (50.0, 20.0, 1.5)] {
        assert!(spring_step(0.0, k, c, m).abs() < 1e-9);
        assert!((spring_step(10.0, k, c, m) - 1.0).abs() < 1e-3);
    }
}
