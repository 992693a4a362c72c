use crate::{
    animation::{ease::Ease, mapper::Lerp},
    foundation::core::DurationMs,
};

/// Fixed-duration interpolation from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub duration: DurationMs,
    pub ease: Ease,
}

impl<T: Lerp + Clone> Tween<T> {
    pub fn new(from: T, to: T, duration: DurationMs, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
        }
    }

    /// Eased progress in `[0, 1]`. A zero-length tween is complete immediately.
    pub fn progress(&self, elapsed: DurationMs) -> f64 {
        if self.duration.0 == 0 {
            return 1.0;
        }
        let t = elapsed.0 as f64 / self.duration.0 as f64;
        self.ease.apply(t)
    }

    pub fn sample(&self, elapsed: DurationMs) -> T {
        T::lerp(&self.from, &self.to, self.progress(elapsed))
    }

    pub fn is_finished(&self, elapsed: DurationMs) -> bool {
        elapsed >= self.duration
    }
}
