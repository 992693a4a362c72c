use std::collections::BTreeMap;

use crate::foundation::core::{DurationMs, TimeMs};

/// Handle returned by [`TimerQueue::schedule`], used to cancel a pending timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Cancellable one-shot timers carrying a typed payload.
///
/// Timers fire in `(due, scheduling order)` order. A component owns its queue, so dropping the
/// component drops every pending timer with it.
#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    pending: BTreeMap<(TimeMs, TimerId), E>,
    next_id: u64,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, now: TimeMs, delay: DurationMs, event: E) -> TimerId {
        self.schedule_at(now.after(delay), event)
    }

    pub fn schedule_at(&mut self, due: TimeMs, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((due, id), event);
        id
    }

    /// Returns the payload if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        let key = self.pending.keys().find(|(_, k)| *k == id).copied()?;
        self.pending.remove(&key)
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Cancel every pending timer whose payload matches.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&E) -> bool) {
        self.pending.retain(|_, e| !pred(e));
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.keys().any(|(_, k)| *k == id)
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest timer due at or before `now`, with its due time.
    ///
    /// Call in a loop: handlers may schedule follow-up timers that are themselves already due.
    pub fn pop_due(&mut self, now: TimeMs) -> Option<(TimeMs, E)> {
        let (due, _) = *self.pending.keys().next()?;
        if due > now {
            return None;
        }
        self.pending
            .pop_first()
            .map(|((due, _), event)| (due, event))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
