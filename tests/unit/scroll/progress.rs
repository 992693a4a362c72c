use super::*;

fn source() -> ScrollProgressSource {
    ScrollProgressSource::new(Viewport::new(1440.0, 800.0).unwrap())
}

fn region() -> Rect {
    Rect::new(0.0, 2000.0, 1440.0, 3000.0)
}

#[test]
fn progress_is_zero_without_geometry() {
    let mut s = source();
    let id = s.subscribe(ScrollOffset::enter_exit(), ProgressRange::Unit);
    assert!(s.on_scroll(2100.0).is_empty());
    assert_eq!(s.progress(id), 0.0);

    let changed = s.on_layout(region());
    assert_eq!(changed.as_slice(), &[id]);
    assert!((s.progress(id) - 0.5).abs() < 1e-9);

    s.clear_layout();
    assert_eq!(s.progress(id), 0.0);
}

#[test]
fn clamps_to_unit_and_extended_ranges() {
    let mut s = source();
    s.on_layout(region());
    let unit = s.subscribe(ScrollOffset::enter_exit(), ProgressRange::Unit);
    let wide = s.subscribe(
        ScrollOffset::enter_exit(),
        ProgressRange::Extended { min: -0.2, max: 1.2 },
    );

    s.on_scroll(0.0);
    assert_eq!(s.progress(unit), 0.0);
    assert!((s.progress(wide) + 0.2).abs() < 1e-9);

    s.on_scroll(1200.0);
    assert_eq!(s.progress(unit), 0.0);

    s.on_scroll(3000.0);
    assert_eq!(s.progress(unit), 1.0);

    s.on_scroll(9000.0);
    assert_eq!(s.progress(unit), 1.0);
    assert!((s.progress(wide) - 1.2).abs() < 1e-9);
}

#[test]
fn independent_offsets_on_one_region() {
    let mut s = source();
    s.on_layout(region());
    let reveal = s.subscribe(
        ScrollOffset::parse("start 60%", "start -10%").unwrap(),
        ProgressRange::Unit,
    );
    let dark = s.subscribe(
        ScrollOffset::parse("start 100px", "end 100px").unwrap(),
        ProgressRange::Unit,
    );

    // reveal spans 1520..2080, dark spans 1900..2900.
    let changed = s.on_scroll(1800.0);
    assert_eq!(changed.as_slice(), &[reveal]);
    assert!((s.progress(reveal) - 0.5).abs() < 1e-9);
    assert_eq!(s.progress(dark), 0.0);

    let changed = s.on_scroll(2400.0);
    assert_eq!(changed.len(), 2);
    assert_eq!(s.progress(reveal), 1.0);
    assert!((s.progress(dark) - 0.5).abs() < 1e-9);
}

#[test]
fn resize_recomputes() {
    let mut s = source();
    s.on_layout(region());
    let id = s.subscribe(ScrollOffset::enter_exit(), ProgressRange::Unit);
    s.on_scroll(1600.0);
    let before = s.progress(id);
    let changed = s.on_resize(Viewport::new(1440.0, 1200.0).unwrap());
    assert_eq!(changed.as_slice(), &[id]);
    assert!(s.progress(id) > before);
}

#[test]
fn degenerate_span_is_a_step() {
    assert_eq!(compute_progress(99.0, (100.0, 100.0), ProgressRange::Unit), 0.0);
    assert_eq!(compute_progress(100.0, (100.0, 100.0), ProgressRange::Unit), 1.0);
    assert_eq!(compute_progress(101.0, (100.0, 100.0), ProgressRange::Unit), 1.0);
}

#[test]
fn range_validation() {
    assert!(ProgressRange::Unit.validate().is_ok());
    assert!(ProgressRange::Extended { min: 1.0, max: 0.0 }.validate().is_err());
}
