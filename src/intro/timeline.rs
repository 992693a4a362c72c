use crate::{
    animation::{ease::Ease, mapper::Lerp},
    foundation::{
        core::DurationMs,
        error::{MotionError, MotionResult},
    },
};

/// One authored step of a track: wait `delay`, then animate to `to` over `duration`.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedPhase<T> {
    pub delay: DurationMs,
    pub duration: DurationMs,
    pub to: T,
    pub ease: Ease,
}

impl<T> TimedPhase<T> {
    pub fn new(delay: DurationMs, duration: DurationMs, to: T, ease: Ease) -> Self {
        Self {
            delay,
            duration,
            to,
            ease,
        }
    }
}

/// A phase resolved against its track: absolute offsets from track start plus both endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseSegment<T> {
    pub begin: DurationMs,
    pub end: DurationMs,
    pub from: T,
    pub to: T,
    pub ease: Ease,
}

/// Phase boundaries a running track reports as timers fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Boundary {
    Begin(usize),
    End(usize),
}

/// Sequential phases animating one value. Each phase starts from where the previous one ended.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTrack<T> {
    initial: T,
    phases: Vec<TimedPhase<T>>,
}

impl<T: Lerp + Clone> PhaseTrack<T> {
    pub fn new(initial: T) -> Self {
        Self {
            initial,
            phases: Vec::new(),
        }
    }

    pub fn then(mut self, phase: TimedPhase<T>) -> MotionResult<Self> {
        if !phase.ease.is_valid() {
            return Err(MotionError::animation(format!(
                "invalid easing {:?} in phase {}",
                phase.ease,
                self.phases.len()
            )));
        }
        self.phases.push(phase);
        Ok(self)
    }

    pub fn initial(&self) -> &T {
        &self.initial
    }

    pub fn phases(&self) -> &[TimedPhase<T>] {
        &self.phases
    }

    /// End of the last phase, measured from track start.
    pub fn total(&self) -> DurationMs {
        self.phases.iter().fold(DurationMs::ZERO, |t, p| {
            t.saturating_add(p.delay).saturating_add(p.duration)
        })
    }

    pub fn segments(&self) -> Vec<PhaseSegment<T>> {
        let mut out = Vec::with_capacity(self.phases.len());
        let mut t = DurationMs::ZERO;
        let mut from = self.initial.clone();
        for p in &self.phases {
            let begin = t.saturating_add(p.delay);
            let end = begin.saturating_add(p.duration);
            out.push(PhaseSegment {
                begin,
                end,
                from: from.clone(),
                to: p.to.clone(),
                ease: p.ease,
            });
            from = p.to.clone();
            t = end;
        }
        out
    }

    pub fn sample(&self, elapsed: DurationMs) -> T {
        let mut t = DurationMs::ZERO;
        let mut value = self.initial.clone();
        for p in &self.phases {
            let begin = t.saturating_add(p.delay);
            let end = begin.saturating_add(p.duration);
            if elapsed < begin {
                return value;
            }
            if elapsed < end {
                let progress = elapsed.saturating_sub(begin).0 as f64 / p.duration.0 as f64;
                return T::lerp(&value, &p.to, p.ease.apply(progress));
            }
            value = p.to.clone();
            t = end;
        }
        value
    }

    /// First boundary of the track: how long after starting, and which.
    pub fn first_boundary(&self) -> Option<(DurationMs, Boundary)> {
        self.phases.first().map(|p| (p.delay, Boundary::Begin(0)))
    }

    /// Boundary that follows `b`, with the delay from `b` firing.
    pub fn next_boundary(&self, b: Boundary) -> Option<(DurationMs, Boundary)> {
        match b {
            Boundary::Begin(i) => self.phases.get(i).map(|p| (p.duration, Boundary::End(i))),
            Boundary::End(i) => self
                .phases
                .get(i + 1)
                .map(|p| (p.delay, Boundary::Begin(i + 1))),
        }
    }

    pub fn is_last(&self, b: Boundary) -> bool {
        b == Boundary::End(self.phases.len().saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/timeline.rs"]
mod tests;
