use super::*;

fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn engine(len: usize) -> CarouselEngine {
    CarouselEngine::new(CarouselConfig::default(), len, &desktop()).unwrap()
}

#[test]
fn rejects_empty_content() {
    assert!(CarouselEngine::new(CarouselConfig::default(), 0, &desktop()).is_err());
}

#[test]
fn window_offsets_are_exactly_the_radius() {
    let e = engine(6);
    let offsets: Vec<i64> = e.rendered().iter().map(|c| c.placement.offset).collect();
    assert_eq!(offsets, (-4..=4).collect::<Vec<_>>());

    let mobile =
        CarouselEngine::new(CarouselConfig::default(), 6, &Viewport::new(390.0, 844.0).unwrap())
            .unwrap();
    let offsets: Vec<i64> = mobile.rendered().iter().map(|c| c.placement.offset).collect();
    assert_eq!(offsets, vec![-2, -1, 0, 1, 2]);
}

#[test]
fn active_card_has_max_scale_opacity_and_top_z() {
    let e = engine(6);
    let cards = e.rendered();
    let active = cards.iter().find(|c| c.is_active).unwrap();
    assert_eq!(active.placement.offset, 0);
    for c in &cards {
        assert!(c.placement.scale <= active.placement.scale);
        assert!(c.placement.opacity <= active.placement.opacity);
        if !c.is_active {
            assert!(c.placement.z_index < active.placement.z_index);
        }
    }
}

#[test]
fn content_index_wraps_both_ways() {
    let e = engine(6);
    assert_eq!(e.content_index(7), 1);
    assert_eq!(e.content_index(-1), 5);
    assert_eq!(e.content_index(-4), 2);
}

#[test]
fn auto_advances_once_per_interval() {
    let mut e = engine(6);
    e.start(TimeMs::ZERO);
    assert_eq!(e.advance(TimeMs(3_999)), None);
    assert_eq!(e.advance(TimeMs(4_000)), Some(1));
    assert_eq!(e.advance(TimeMs(12_000)), Some(3));
    assert_eq!(e.next_due(), Some(TimeMs(16_000)));
    for _ in 0..4 {
        let now = e.next_due().unwrap();
        e.advance(now);
    }
    assert_eq!(e.state().active_index, 7);
    assert_eq!(e.active_content_index(), 1);
}

#[test]
fn hover_pauses_without_catch_up() {
    let mut e = engine(6);
    e.start(TimeMs::ZERO);
    e.advance(TimeMs(1_000));
    e.hover_enter();
    assert_eq!(e.advance(TimeMs(11_000)), None);
    assert_eq!(e.state().active_index, 0);
    assert!(e.state().is_hovered);

    e.hover_leave(TimeMs(11_000));
    assert_eq!(e.advance(TimeMs(14_999)), None);
    assert_eq!(e.advance(TimeMs(15_000)), Some(1));
}

#[test]
fn new_cards_appear_at_their_target_and_old_ones_drop() {
    let mut e = engine(6);
    e.start(TimeMs::ZERO);
    e.advance(TimeMs(4_000));

    let cards = e.rendered();
    let keys: Vec<i64> = cards.iter().map(|c| c.window_index).collect();
    assert_eq!(keys, (-3..=5).collect::<Vec<_>>());

    let entering = cards.iter().find(|c| c.window_index == 5).unwrap();
    assert_eq!(entering.placement, e.layout().place(4));

    // The former active card is still springing towards offset -1.
    let previous = cards.iter().find(|c| c.window_index == 0).unwrap();
    assert_eq!(previous.placement.offset, -1);
    assert_eq!(previous.placement.x, 0.0);
    assert!(!e.is_settled());

    e.step_motion(DurationMs(5_000));
    assert!(e.is_settled());
    let settled = e.rendered();
    let previous = settled.iter().find(|c| c.window_index == 0).unwrap();
    assert_eq!(previous.placement, e.layout().place(-1));
}

#[test]
fn viewport_change_resizes_window() {
    let mut e = engine(6);
    e.set_viewport(&Viewport::new(390.0, 844.0).unwrap());
    assert_eq!(e.rendered().len(), 5);
    assert_eq!(e.window(), -2..=2);
    e.set_viewport(&desktop());
    assert_eq!(e.rendered().len(), 9);
}

#[test]
fn reset_and_teardown() {
    let mut e = engine(6);
    e.start(TimeMs::ZERO);
    e.advance(TimeMs(8_000));
    e.reset();
    assert_eq!(e.state().active_index, 0);
    e.teardown();
    assert_eq!(e.next_due(), None);
    assert_eq!(e.advance(TimeMs(100_000)), None);
    e.hover_leave(TimeMs(100_000));
    assert_eq!(e.next_due(), None);
}
