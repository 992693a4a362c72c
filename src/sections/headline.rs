use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::{
        core::{DurationMs, TimeMs},
        error::{MotionError, MotionResult},
        math::wrap_index,
    },
    runtime::timers::{TimerId, TimerQueue},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeadlineConfig {
    pub words: Vec<String>,
    /// Time each word is shown before the next one replaces it.
    pub interval: DurationMs,
    /// Length of the exit and of the following enter.
    pub transition: DurationMs,
    /// Entering words rise from `+slide` px; leaving words exit to `-slide` px.
    pub slide: f64,
    pub ease: Ease,
}

impl Default for HeadlineConfig {
    fn default() -> Self {
        Self {
            words: ["Interfaces", "Experiences", "Products", "Animations", "Websites"]
                .map(str::to_owned)
                .to_vec(),
            interval: DurationMs(2_000),
            transition: DurationMs(500),
            slide: 20.0,
            ease: Ease::EASE_IN_OUT,
        }
    }
}

impl HeadlineConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.words.is_empty() {
            return Err(MotionError::validation("headline needs at least one word"));
        }
        if self.interval == DurationMs::ZERO {
            return Err(MotionError::validation("headline interval must be > 0"));
        }
        // Exit then enter must finish before the next swap.
        if self.transition.saturating_add(self.transition) > self.interval {
            return Err(MotionError::validation(
                "headline transition must fit twice into the interval",
            ));
        }
        if !self.slide.is_finite() {
            return Err(MotionError::validation("headline slide must be finite"));
        }
        if !self.ease.is_valid() {
            return Err(MotionError::validation(format!(
                "invalid headline easing {:?}",
                self.ease
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WordTick;

/// The one visible word span at an instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeadlineFrame {
    pub index: usize,
    pub word: String,
    pub opacity: f64,
    pub y: f64,
}

/// Cycles the headline's trailing word on a fixed interval.
///
/// A swap first lets the outgoing word exit, then the incoming word enters; only one word is
/// visible at a time.
#[derive(Debug)]
pub struct WordRotator {
    config: HeadlineConfig,
    timers: TimerQueue<WordTick>,
    tick: Option<TimerId>,
    step: i64,
    changed_at: Option<TimeMs>,
}

impl WordRotator {
    pub fn new(config: HeadlineConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            timers: TimerQueue::new(),
            tick: None,
            step: 0,
            changed_at: None,
        })
    }

    /// Show the first word; the first swap lands one interval after `now`. Idempotent.
    pub fn start(&mut self, now: TimeMs) {
        if self.changed_at.is_some() {
            return;
        }
        self.changed_at = Some(now);
        self.arm(now);
    }

    fn arm(&mut self, from: TimeMs) {
        if let Some(id) = self.tick.take() {
            self.timers.cancel(id);
        }
        self.tick = Some(self.timers.schedule(from, self.config.interval, WordTick));
    }

    /// Returns the new word index if it moved.
    pub fn advance(&mut self, now: TimeMs) -> Option<usize> {
        let before = self.step;
        while let Some((due, WordTick)) = self.timers.pop_due(now) {
            self.tick = None;
            self.step += 1;
            self.changed_at = Some(due);
            tracing::trace!(index = self.index(), at = due.0, "headline word changed");
            self.arm(due);
        }
        (self.step != before).then(|| self.index())
    }

    pub fn index(&self) -> usize {
        wrap_index(self.step, self.config.words.len())
    }

    pub fn word(&self) -> &str {
        &self.config.words[self.index()]
    }

    pub fn is_started(&self) -> bool {
        self.changed_at.is_some()
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.timers.next_due()
    }

    /// `None` before [`WordRotator::start`].
    pub fn frame(&self, now: TimeMs) -> Option<HeadlineFrame> {
        let changed = self.changed_at?;
        let c = &self.config;
        let since = now.since(changed);
        // The very first word has nothing to wait for.
        let exit = if self.step == 0 {
            DurationMs::ZERO
        } else {
            c.transition
        };

        if since < exit {
            let index = wrap_index(self.step - 1, c.words.len());
            let leaving = Tween::new(0.0, 1.0, c.transition, c.ease).sample(since);
            return Some(HeadlineFrame {
                index,
                word: c.words[index].clone(),
                opacity: 1.0 - leaving,
                y: -c.slide * leaving,
            });
        }

        let entering = Tween::new(0.0, 1.0, c.transition, c.ease).sample(since.saturating_sub(exit));
        Some(HeadlineFrame {
            index: self.index(),
            word: self.word().to_owned(),
            opacity: entering,
            y: c.slide * (1.0 - entering),
        })
    }

    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.tick = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/headline.rs"]
mod tests;
