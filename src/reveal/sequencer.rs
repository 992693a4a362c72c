use smallvec::SmallVec;

use crate::{
    foundation::core::{DurationMs, TimeMs},
    runtime::{signal::Listener, timers::TimerQueue},
    scroll::lock::{ScrollLock, ScrollLockView},
};

/// Discrete page reveal step. Only ever moves forward, one step at a time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RevealState {
    Hidden = 0,
    IntroPlaying = 1,
    HeadlineVisible = 2,
    FullyRevealed = 3,
}

impl RevealState {
    pub const ALL: [Self; 4] = [
        Self::Hidden,
        Self::IntroPlaying,
        Self::HeadlineVisible,
        Self::FullyRevealed,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::IntroPlaying),
            Self::IntroPlaying => Some(Self::HeadlineVisible),
            Self::HeadlineVisible => Some(Self::FullyRevealed),
            Self::FullyRevealed => None,
        }
    }

    pub fn step(self) -> u8 {
        self as u8
    }

    pub fn scroll_locked(self) -> bool {
        self < Self::FullyRevealed
    }
}

/// Reveal timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Completion signal to `IntroPlaying`.
    pub settle_delay: DurationMs,
    /// `IntroPlaying` to `HeadlineVisible`.
    pub headline_delay: DurationMs,
    /// `HeadlineVisible` to `FullyRevealed`.
    pub full_reveal_delay: DurationMs,
    pub pill_expand_delay: DurationMs,
    pub pill_expand_duration: DurationMs,
    /// Treat the intro as complete after this long without a completion signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_timeout: Option<DurationMs>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            settle_delay: DurationMs(200),
            headline_delay: DurationMs(600),
            full_reveal_delay: DurationMs(600),
            pill_expand_delay: DurationMs(500),
            pill_expand_duration: DurationMs(2_000),
            intro_timeout: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealEvent {
    Entered { state: RevealState, at: TimeMs },
    ScrollLockChanged { locked: bool },
    PillExpanded(bool),
    IntroTimedOut { at: TimeMs },
}

pub type RevealEvents = SmallVec<[RevealEvent; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealTimer {
    Enter(RevealState),
    IntroTimeout,
    PillExpand,
    PillCollapse,
}

/// Drives [`RevealState`] from the intro completion signal through timed steps, and owns the
/// scroll lock derived from it.
#[derive(Debug)]
pub struct RevealSequencer {
    config: RevealConfig,
    state: RevealState,
    entered_at: [Option<TimeMs>; 4],
    lock: ScrollLock,
    completion: Option<Listener<TimeMs>>,
    timers: TimerQueue<RevealTimer>,
    pill_auto: bool,
    pill_hovered: bool,
    mobile: bool,
}

impl RevealSequencer {
    /// `completion` yields the time the intro finished.
    pub fn new(config: RevealConfig, completion: Listener<TimeMs>) -> Self {
        let mut entered_at = [None; 4];
        entered_at[0] = Some(TimeMs::ZERO);
        Self {
            config,
            state: RevealState::Hidden,
            entered_at,
            lock: ScrollLock::new(),
            completion: Some(completion),
            timers: TimerQueue::new(),
            pill_auto: false,
            pill_hovered: false,
            mobile: false,
        }
    }

    /// Arms the optional intro timeout.
    pub fn start(&mut self, now: TimeMs) {
        self.entered_at[0] = Some(now);
        if let (Some(timeout), Some(_)) = (self.config.intro_timeout, &self.completion) {
            self.timers
                .schedule(now, timeout, RevealTimer::IntroTimeout);
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn advance(&mut self, now: TimeMs) -> RevealEvents {
        let mut events = RevealEvents::new();

        if let Some(at) = self.completion.as_mut().and_then(Listener::try_recv) {
            tracing::debug!(at = at.0, "intro completion received");
            self.on_completion(at);
        }

        while let Some((due, timer)) = self.timers.pop_due(now) {
            match timer {
                RevealTimer::Enter(target) => self.enter(target, due, &mut events),
                RevealTimer::IntroTimeout => {
                    if self.completion.is_some() {
                        tracing::warn!(at = due.0, "intro completion never arrived; forcing reveal");
                        events.push(RevealEvent::IntroTimedOut { at: due });
                        self.on_completion(due);
                    }
                }
                RevealTimer::PillExpand => {
                    self.set_pill(|s| s.pill_auto = true, &mut events);
                    self.timers.schedule(
                        due,
                        self.config.pill_expand_duration,
                        RevealTimer::PillCollapse,
                    );
                }
                RevealTimer::PillCollapse => self.set_pill(|s| s.pill_auto = false, &mut events),
            }
        }

        events
    }

    fn on_completion(&mut self, at: TimeMs) {
        self.completion = None;
        self.timers
            .cancel_where(|t| *t == RevealTimer::IntroTimeout);
        self.timers.schedule(
            at,
            self.config.settle_delay,
            RevealTimer::Enter(RevealState::IntroPlaying),
        );
    }

    fn enter(&mut self, target: RevealState, at: TimeMs, events: &mut RevealEvents) {
        if self.state.next() != Some(target) {
            return;
        }
        self.state = target;
        self.entered_at[target as usize] = Some(at);
        tracing::debug!(step = target.step(), state = ?target, at = at.0, "reveal step");
        events.push(RevealEvent::Entered { state: target, at });

        if self.lock.sync(target) {
            tracing::debug!(locked = self.lock.is_locked(), "scroll lock changed");
            events.push(RevealEvent::ScrollLockChanged {
                locked: self.lock.is_locked(),
            });
        }

        match target {
            RevealState::Hidden => {}
            RevealState::IntroPlaying => {
                self.timers.schedule(
                    at,
                    self.config.headline_delay,
                    RevealTimer::Enter(RevealState::HeadlineVisible),
                );
            }
            RevealState::HeadlineVisible => {
                self.timers.schedule(
                    at,
                    self.config.full_reveal_delay,
                    RevealTimer::Enter(RevealState::FullyRevealed),
                );
            }
            RevealState::FullyRevealed => {
                if !self.mobile {
                    self.timers
                        .schedule(at, self.config.pill_expand_delay, RevealTimer::PillExpand);
                }
            }
        }
    }

    fn set_pill(&mut self, f: impl FnOnce(&mut Self), events: &mut RevealEvents) {
        let before = self.pill_expanded();
        f(self);
        let after = self.pill_expanded();
        if before != after {
            events.push(RevealEvent::PillExpanded(after));
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn entered_at(&self, state: RevealState) -> Option<TimeMs> {
        self.entered_at[state as usize]
    }

    pub fn scroll_lock_view(&self) -> ScrollLockView {
        self.lock.view()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn pill_expanded(&self) -> bool {
        self.pill_auto || self.pill_hovered
    }

    /// Hovering the headline pill expands it. Ignored on mobile.
    pub fn set_pill_hovered(&mut self, hovered: bool) -> RevealEvents {
        let mut events = RevealEvents::new();
        if self.mobile || self.state < RevealState::HeadlineVisible {
            return events;
        }
        self.set_pill(|s| s.pill_hovered = hovered, &mut events);
        events
    }

    /// Mobile layouts never expand the pill.
    pub fn set_mobile(&mut self, mobile: bool) -> RevealEvents {
        let mut events = RevealEvents::new();
        self.mobile = mobile;
        if mobile {
            self.timers.cancel_where(|t| {
                matches!(t, RevealTimer::PillExpand | RevealTimer::PillCollapse)
            });
            self.set_pill(
                |s| {
                    s.pill_auto = false;
                    s.pill_hovered = false;
                },
                &mut events,
            );
        }
        events
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.timers.next_due()
    }

    pub fn is_waiting_for_intro(&self) -> bool {
        self.completion.is_some()
    }

    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.completion = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/sequencer.rs"]
mod tests;
