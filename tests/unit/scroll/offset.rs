use super::*;

#[test]
fn parses_keywords_percentages_and_pixels() {
    assert_eq!("start".parse::<Edge>().unwrap(), Edge::Start);
    assert_eq!("center".parse::<Edge>().unwrap(), Edge::Center);
    assert_eq!("60%".parse::<Edge>().unwrap(), Edge::Percent(60.0));
    assert_eq!("-10%".parse::<Edge>().unwrap(), Edge::Percent(-10.0));
    assert_eq!("100px".parse::<Edge>().unwrap(), Edge::Pixels(100.0));
    assert_eq!("0.5".parse::<Edge>().unwrap(), Edge::Percent(50.0));
    assert!("middle".parse::<Edge>().is_err());
    assert!("NaN%".parse::<Edge>().is_err());
}

#[test]
fn intersection_forms() {
    let i: Intersection = "start 60%".parse().unwrap();
    assert_eq!(i.target, Edge::Start);
    assert_eq!(i.viewport, Edge::Percent(60.0));
    let single: Intersection = "end".parse().unwrap();
    assert_eq!(single.viewport, Edge::End);
    assert!("start end start".parse::<Intersection>().is_err());
    assert!("".parse::<Intersection>().is_err());
}

#[test]
fn scroll_range_for_work_reveal() {
    // Region at y=2000, 1000 tall, viewport 800 tall.
    let region = Rect::new(0.0, 2000.0, 1440.0, 3000.0);
    let o = ScrollOffset::parse("start 60%", "start -10%").unwrap();
    let (a, b) = o.scroll_range(region, 800.0);
    assert!((a - 1520.0).abs() < 1e-9);
    assert!((b - 2080.0).abs() < 1e-9);
}

#[test]
fn scroll_range_for_enter_exit() {
    let region = Rect::new(0.0, 2000.0, 1440.0, 3000.0);
    let (a, b) = ScrollOffset::enter_exit().scroll_range(region, 800.0);
    assert_eq!((a, b), (1200.0, 3000.0));
}

#[test]
fn serde_uses_string_pairs() {
    let o: ScrollOffset = serde_json::from_str("[\"start 100px\", \"end 100px\"]").unwrap();
    assert_eq!(o.start.viewport, Edge::Pixels(100.0));
    let json = serde_json::to_string(&o).unwrap();
    assert_eq!(json, "[\"start 100px\",\"end 100px\"]");
    assert!(serde_json::from_str::<ScrollOffset>("[\"start\", \"sideways\"]").is_err());
}
