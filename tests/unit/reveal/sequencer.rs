use super::*;
use crate::runtime::signal::{Notifier, oneshot};

fn sequencer(config: RevealConfig) -> (Notifier<TimeMs>, RevealSequencer) {
    let (tx, rx) = oneshot();
    let mut seq = RevealSequencer::new(config, rx);
    seq.start(TimeMs::ZERO);
    (tx, seq)
}

fn entered(events: &RevealEvents) -> Vec<(RevealState, TimeMs)> {
    events
        .iter()
        .filter_map(|e| match e {
            RevealEvent::Entered { state, at } => Some((*state, *at)),
            _ => None,
        })
        .collect()
}

#[test]
fn completion_at_zero_reaches_each_step_on_time() {
    let (tx, mut seq) = sequencer(RevealConfig::default());
    tx.notify(TimeMs::ZERO);

    assert!(seq.advance(TimeMs(199)).is_empty());
    assert_eq!(seq.state(), RevealState::Hidden);

    seq.advance(TimeMs(200));
    assert_eq!(seq.state(), RevealState::IntroPlaying);
    seq.advance(TimeMs(799));
    assert_eq!(seq.state(), RevealState::IntroPlaying);
    seq.advance(TimeMs(800));
    assert_eq!(seq.state(), RevealState::HeadlineVisible);
    assert!(seq.is_scroll_locked());

    let events = seq.advance(TimeMs(1_400));
    assert_eq!(seq.state(), RevealState::FullyRevealed);
    assert!(events.contains(&RevealEvent::ScrollLockChanged { locked: false }));
    assert!(!seq.is_scroll_locked());
    assert_eq!(seq.entered_at(RevealState::FullyRevealed), Some(TimeMs(1_400)));
}

#[test]
fn late_advance_visits_every_step_in_order() {
    let (tx, mut seq) = sequencer(RevealConfig::default());
    tx.notify(TimeMs(1_000));
    let events = seq.advance(TimeMs(60_000));
    assert_eq!(
        entered(&events),
        vec![
            (RevealState::IntroPlaying, TimeMs(1_200)),
            (RevealState::HeadlineVisible, TimeMs(1_800)),
            (RevealState::FullyRevealed, TimeMs(2_400)),
        ]
    );
    assert!(entered(&seq.advance(TimeMs(120_000))).is_empty());
}

#[test]
fn lock_holds_iff_not_fully_revealed() {
    let (tx, mut seq) = sequencer(RevealConfig::default());
    let view = seq.scroll_lock_view();
    tx.notify(TimeMs::ZERO);
    for t in (0..2_000).step_by(50) {
        seq.advance(TimeMs(t));
        assert_eq!(view.is_locked(), seq.state() < RevealState::FullyRevealed);
    }
}

#[test]
fn stalls_without_completion_signal() {
    let (_tx, mut seq) = sequencer(RevealConfig::default());
    assert!(seq.advance(TimeMs(600_000)).is_empty());
    assert_eq!(seq.state(), RevealState::Hidden);
    assert!(seq.is_scroll_locked());
    assert!(seq.is_waiting_for_intro());
}

#[test]
fn intro_timeout_forces_reveal() {
    let config = RevealConfig {
        intro_timeout: Some(DurationMs(5_000)),
        ..RevealConfig::default()
    };
    let (tx, mut seq) = sequencer(config);
    let events = seq.advance(TimeMs(10_000));
    assert!(events.contains(&RevealEvent::IntroTimedOut { at: TimeMs(5_000) }));
    assert_eq!(seq.state(), RevealState::FullyRevealed);
    assert_eq!(seq.entered_at(RevealState::IntroPlaying), Some(TimeMs(5_200)));

    // A late completion changes nothing.
    tx.notify(TimeMs(11_000));
    assert!(seq.advance(TimeMs(20_000)).iter().all(|e| !matches!(e, RevealEvent::Entered { .. })));
}

#[test]
fn completion_before_timeout_cancels_it() {
    let config = RevealConfig {
        intro_timeout: Some(DurationMs(5_000)),
        ..RevealConfig::default()
    };
    let (tx, mut seq) = sequencer(config);
    tx.notify(TimeMs(100));
    let events = seq.advance(TimeMs(10_000));
    assert!(!events.iter().any(|e| matches!(e, RevealEvent::IntroTimedOut { .. })));
    assert_eq!(seq.entered_at(RevealState::IntroPlaying), Some(TimeMs(300)));
}

#[test]
fn pill_auto_expands_then_collapses() {
    let (tx, mut seq) = sequencer(RevealConfig::default());
    tx.notify(TimeMs::ZERO);
    seq.advance(TimeMs(1_400));
    assert!(!seq.pill_expanded());

    let events = seq.advance(TimeMs(1_900));
    assert!(events.contains(&RevealEvent::PillExpanded(true)));
    assert!(seq.pill_expanded());

    let events = seq.advance(TimeMs(3_900));
    assert!(events.contains(&RevealEvent::PillExpanded(false)));
    assert!(!seq.pill_expanded());
}

#[test]
fn pill_stays_collapsed_on_mobile() {
    let (tx, mut seq) = sequencer(RevealConfig::default());
    seq.set_mobile(true);
    tx.notify(TimeMs::ZERO);
    let events = seq.advance(TimeMs(10_000));
    assert!(!events.iter().any(|e| matches!(e, RevealEvent::PillExpanded(_))));
    assert!(seq.set_pill_hovered(true).is_empty());
    assert!(!seq.pill_expanded());
}

#[test]
fn hover_expands_pill_once_headline_is_visible() {
    let (tx, mut seq) = sequencer(RevealConfig::default());
    assert!(seq.set_pill_hovered(true).is_empty());
    tx.notify(TimeMs::ZERO);
    seq.advance(TimeMs(800));
    assert_eq!(seq.set_pill_hovered(true).as_slice(), &[RevealEvent::PillExpanded(true)]);
    assert_eq!(seq.set_pill_hovered(false).as_slice(), &[RevealEvent::PillExpanded(false)]);
}

#[test]
fn teardown_cancels_pending_steps() {
    let (tx, mut seq) = sequencer(RevealConfig::default());
    tx.notify(TimeMs::ZERO);
    seq.advance(TimeMs(200));
    seq.teardown();
    assert_eq!(seq.next_due(), None);
    seq.advance(TimeMs(10_000));
    assert_eq!(seq.state(), RevealState::IntroPlaying);
}
