use crate::foundation::core::{DurationMs, TimeMs};

/// Monotonic virtual clock driven by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now: TimeMs,
}

impl VirtualClock {
    pub fn new(start: TimeMs) -> Self {
        Self { now: start }
    }

    pub fn now(&self) -> TimeMs {
        self.now
    }

    pub fn advance(&mut self, by: DurationMs) -> TimeMs {
        self.now = self.now.after(by);
        self.now
    }

    /// Move to `t`. Times in the past are ignored; the clock never runs backwards.
    pub fn advance_to(&mut self, t: TimeMs) -> TimeMs {
        self.now = self.now.max(t);
        self.now
    }
}
