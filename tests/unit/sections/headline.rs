use super::*;

fn rotator() -> WordRotator {
    WordRotator::new(HeadlineConfig::default()).unwrap()
}

#[test]
fn idle_until_started() {
    let mut r = rotator();
    assert!(r.frame(TimeMs(1_000)).is_none());
    assert_eq!(r.advance(TimeMs(10_000)), None);
    assert_eq!(r.next_due(), None);
    assert_eq!(r.word(), "Interfaces");
}

#[test]
fn swaps_every_interval_and_wraps() {
    let mut r = rotator();
    r.start(TimeMs(100));
    assert_eq!(r.next_due(), Some(TimeMs(2_100)));
    assert_eq!(r.advance(TimeMs(2_099)), None);

    let mut seen = Vec::new();
    for k in 1..=6 {
        let at = TimeMs(100 + 2_000 * k);
        assert_eq!(r.next_due(), Some(at));
        seen.push(r.advance(at).unwrap());
    }
    assert_eq!(seen, [1, 2, 3, 4, 0, 1]);
    assert_eq!(r.word(), "Experiences");
}

#[test]
fn late_advance_lands_on_the_authored_word() {
    let mut a = rotator();
    let mut b = rotator();
    a.start(TimeMs::ZERO);
    b.start(TimeMs::ZERO);
    a.advance(TimeMs(11_000));
    let mut t = 0;
    while t < 11_000 {
        t += 16;
        b.advance(TimeMs(t.min(11_000)));
    }
    assert_eq!(a.index(), 0);
    assert_eq!(a.index(), b.index());
    assert_eq!(a.next_due(), Some(TimeMs(12_000)));
    assert_eq!(a.next_due(), b.next_due());
}

#[test]
fn first_word_enters_from_below() {
    let mut r = rotator();
    r.start(TimeMs::ZERO);

    let f = r.frame(TimeMs::ZERO).unwrap();
    assert_eq!(f.word, "Interfaces");
    assert_eq!(f.opacity, 0.0);
    assert_eq!(f.y, 20.0);

    let mid = r.frame(TimeMs(250)).unwrap();
    assert!((mid.opacity - 0.5).abs() < 1e-3);
    assert!((mid.y - 10.0).abs() < 1e-2);

    let f = r.frame(TimeMs(500)).unwrap();
    assert_eq!(f.opacity, 1.0);
    assert_eq!(f.y, 0.0);
}

#[test]
fn swap_waits_for_the_exit() {
    let mut r = rotator();
    r.start(TimeMs::ZERO);
    r.advance(TimeMs(2_000));

    let leaving = r.frame(TimeMs(2_250)).unwrap();
    assert_eq!(leaving.index, 0);
    assert!((leaving.opacity - 0.5).abs() < 1e-3);
    assert!((leaving.y + 10.0).abs() < 1e-2);

    let entering = r.frame(TimeMs(2_500)).unwrap();
    assert_eq!(entering.word, "Experiences");
    assert_eq!(entering.opacity, 0.0);
    assert_eq!(entering.y, 20.0);

    let shown = r.frame(TimeMs(3_000)).unwrap();
    assert_eq!(shown.index, 1);
    assert_eq!(shown.opacity, 1.0);
    assert_eq!(shown.y, 0.0);
}

#[test]
fn teardown_stops_the_cycle() {
    let mut r = rotator();
    r.start(TimeMs::ZERO);
    r.advance(TimeMs(2_000));
    r.teardown();
    assert_eq!(r.next_due(), None);
    assert_eq!(r.advance(TimeMs(100_000)), None);
    assert_eq!(r.index(), 1);
}

#[test]
fn rejects_bad_configs() {
    let empty = HeadlineConfig {
        words: Vec::new(),
        ..HeadlineConfig::default()
    };
    assert!(WordRotator::new(empty).is_err());

    let crowded = HeadlineConfig {
        transition: DurationMs(1_500),
        ..HeadlineConfig::default()
    };
    assert!(crowded.validate().is_err());

    let frozen = HeadlineConfig {
        interval: DurationMs::ZERO,
        transition: DurationMs::ZERO,
        ..HeadlineConfig::default()
    };
    assert!(frozen.validate().is_err());
}
