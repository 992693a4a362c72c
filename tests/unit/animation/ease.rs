use super::*;

const ALL: [Ease; 9] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::STANDARD,
    Ease::EASE_OUT,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!((ease.apply(0.0) - 0.0).abs() < 1e-9, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn standard_curve_leads_linear_in_the_middle() {
    // cubic-bezier(0.25, 0.1, 0.25, 1) is front-loaded: at x = 0.5 it is well past halfway.
    let y = Ease::STANDARD.apply(0.5);
    assert!(y > 0.75 && y < 0.85, "y = {y}");
}

#[test]
fn linear_bezier_is_identity() {
    let ease = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    for x in [0.1, 0.3, 0.5, 0.9] {
        assert!((ease.apply(x) - x).abs() < 1e-6);
    }
}

#[test]
fn bezier_validity_rejects_out_of_range_x() {
    assert!(Ease::STANDARD.is_valid());
    assert!(
        !Ease::CubicBezier {
            x1: 1.5,
            y1: 0.0,
            x2: 0.5,
            y2: 1.0
        }
        .is_valid()
    );
}

#[test]
fn serde_uses_snake_case_names() {
    let v: Ease = serde_json::from_str("\"in_out_quad\"").unwrap();
    assert_eq!(v, Ease::InOutQuad);
    let v: Ease = serde_json::from_str(
        "{\"cubic_bezier\": {\"x1\": 0.25, \"y1\": 0.1, \"x2\": 0.25, \"y2\": 1.0}}",
    )
    .unwrap();
    assert_eq!(v, Ease::STANDARD);
}
