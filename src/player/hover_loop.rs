use crate::{
    foundation::{
        core::{DurationMs, TimeMs},
        error::{MotionError, MotionResult},
    },
    player::command::AnimationPlayer,
    runtime::timers::TimerQueue,
};

/// Frame layout and timing of the navigation badge animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub total_frames: u32,
    pub fps: f64,
    /// Length of the tail segment played on hover.
    pub tail_secs: f64,
    /// Delay between stopping and starting the tail.
    pub restart_delay: DurationMs,
    /// Extra wait after the tail before holding its last frame.
    pub hold_slack: DurationMs,
    /// Delay between mounting and starting the head loop.
    pub mount_delay: DurationMs,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            total_frames: 480,
            fps: 29.97,
            tail_secs: 2.0,
            restart_delay: DurationMs(10),
            hold_slack: DurationMs(100),
            mount_delay: DurationMs(100),
        }
    }
}

impl BadgeConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.total_frames < 2 {
            return Err(MotionError::validation("badge needs at least two frames"));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(MotionError::validation("badge fps must be > 0"));
        }
        if !(self.tail_secs.is_finite() && self.tail_secs >= 0.0) {
            return Err(MotionError::validation("badge tail_secs must be >= 0"));
        }
        Ok(())
    }

    /// First frame of the tail segment; the head loop runs up to it.
    pub fn tail_start(&self) -> u32 {
        let start = (f64::from(self.total_frames) - self.tail_secs * self.fps).floor();
        (start.max(0.0) as u32).min(self.last_frame())
    }

    pub fn last_frame(&self) -> u32 {
        self.total_frames.saturating_sub(1)
    }

    /// Wait after starting the tail before holding the last frame.
    pub fn hold_delay(&self) -> DurationMs {
        let frames = f64::from(self.last_frame() - self.tail_start());
        DurationMs::from_secs_f64(frames / self.fps).saturating_add(self.hold_slack)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BadgeTimer {
    StartHead,
    StartTail,
    Hold,
}

/// Loops an animation's head segment, plays its tail on hover and holds the final frame.
#[derive(Debug)]
pub struct HoverLoop<P> {
    config: BadgeConfig,
    player: P,
    timers: TimerQueue<BadgeTimer>,
    hovered: bool,
}

impl<P: AnimationPlayer> HoverLoop<P> {
    pub fn new(config: BadgeConfig, player: P) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            player,
            timers: TimerQueue::new(),
            hovered: false,
        })
    }

    pub fn mount(&mut self, now: TimeMs) {
        self.timers
            .schedule(now, self.config.mount_delay, BadgeTimer::StartHead);
    }

    pub fn hover_start(&mut self, now: TimeMs) {
        self.hovered = true;
        self.timers
            .cancel_where(|t| matches!(t, BadgeTimer::Hold | BadgeTimer::StartTail));
        self.player.stop();
        self.timers
            .schedule(now, self.config.restart_delay, BadgeTimer::StartTail);
        tracing::trace!(at = now.0, "badge hover start");
    }

    pub fn hover_end(&mut self, now: TimeMs) {
        self.hovered = false;
        self.timers.cancel_where(|t| {
            matches!(t, BadgeTimer::Hold | BadgeTimer::StartTail | BadgeTimer::StartHead)
        });
        self.player.stop();
        self.play_head();
        tracing::trace!(at = now.0, "badge hover end");
    }

    /// The player finished a non-looping run.
    pub fn on_complete(&mut self) {
        self.play_head();
    }

    pub fn advance(&mut self, now: TimeMs) {
        while let Some((due, timer)) = self.timers.pop_due(now) {
            match timer {
                BadgeTimer::StartHead => self.play_head(),
                BadgeTimer::StartTail => {
                    self.player.play_segment(
                        self.config.tail_start(),
                        self.config.last_frame(),
                        false,
                    );
                    self.timers
                        .schedule(due, self.config.hold_delay(), BadgeTimer::Hold);
                }
                BadgeTimer::Hold => self.player.seek_and_hold(self.config.last_frame()),
            }
        }
    }

    fn play_head(&mut self) {
        self.player.play_segment(0, self.config.tail_start(), true);
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.timers.next_due()
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/hover_loop.rs"]
mod tests;
