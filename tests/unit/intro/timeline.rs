use super::*;

fn track() -> PhaseTrack<f64> {
    PhaseTrack::new(0.0)
        .then(TimedPhase::new(DurationMs(0), DurationMs(100), 10.0, Ease::Linear))
        .unwrap()
        .then(TimedPhase::new(DurationMs(50), DurationMs(200), 30.0, Ease::Linear))
        .unwrap()
}

#[test]
fn phases_chain_from_previous_end() {
    let t = track();
    assert_eq!(t.total(), DurationMs(350));
    assert_eq!(t.sample(DurationMs(0)), 0.0);
    assert_eq!(t.sample(DurationMs(50)), 5.0);
    assert_eq!(t.sample(DurationMs(120)), 10.0);
    assert_eq!(t.sample(DurationMs(250)), 20.0);
    assert_eq!(t.sample(DurationMs(10_000)), 30.0);
}

#[test]
fn segments_resolve_offsets_and_endpoints() {
    let segs = track().segments();
    assert_eq!(segs.len(), 2);
    assert_eq!((segs[1].begin, segs[1].end), (DurationMs(150), DurationMs(350)));
    assert_eq!((segs[1].from, segs[1].to), (10.0, 30.0));
}

#[test]
fn boundaries_walk_the_track() {
    let t = track();
    let mut at = DurationMs::ZERO;
    let mut seen = Vec::new();
    let mut next = t.first_boundary();
    while let Some((delay, b)) = next {
        at = at.saturating_add(delay);
        seen.push((at, b));
        next = t.next_boundary(b);
    }
    assert_eq!(
        seen,
        vec![
            (DurationMs(0), Boundary::Begin(0)),
            (DurationMs(100), Boundary::End(0)),
            (DurationMs(150), Boundary::Begin(1)),
            (DurationMs(350), Boundary::End(1)),
        ]
    );
    assert!(t.is_last(Boundary::End(1)));
    assert!(!t.is_last(Boundary::End(0)));
}

#[test]
fn zero_duration_phase_jumps() {
    let t = PhaseTrack::new(1.0)
        .then(TimedPhase::new(DurationMs(40), DurationMs(0), 0.0, Ease::Linear))
        .unwrap();
    assert_eq!(t.sample(DurationMs(39)), 1.0);
    assert_eq!(t.sample(DurationMs(40)), 0.0);
}

#[test]
fn rejects_invalid_ease() {
    let bad = Ease::CubicBezier {
        x1: 2.0,
        y1: 0.0,
        x2: 0.5,
        y2: 1.0,
    };
    assert!(
        PhaseTrack::new(0.0)
            .then(TimedPhase::new(DurationMs(0), DurationMs(10), 1.0, bad))
            .is_err()
    );
}
