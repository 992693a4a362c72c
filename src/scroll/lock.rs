use std::{cell::Cell, rc::Rc};

use crate::reveal::sequencer::RevealState;

/// Page scroll lock, derived 1:1 from the reveal step.
///
/// The only way to change it is [`ScrollLock::sync`]; everyone else holds a [`ScrollLockView`].
#[derive(Debug)]
pub struct ScrollLock {
    locked: Rc<Cell<bool>>,
}

impl ScrollLock {
    /// Starts locked, matching [`RevealState::Hidden`].
    pub fn new() -> Self {
        Self {
            locked: Rc::new(Cell::new(RevealState::Hidden.scroll_locked())),
        }
    }

    /// Returns true if the lock flipped.
    pub fn sync(&mut self, state: RevealState) -> bool {
        let locked = state.scroll_locked();
        self.locked.replace(locked) != locked
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    pub fn view(&self) -> ScrollLockView {
        ScrollLockView {
            locked: Rc::clone(&self.locked),
        }
    }
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle onto a [`ScrollLock`].
#[derive(Clone, Debug)]
pub struct ScrollLockView {
    locked: Rc<Cell<bool>>,
}

impl ScrollLockView {
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }
}

/// Document scroll position that honors the lock.
#[derive(Clone, Debug)]
pub struct ScrollViewport {
    lock: ScrollLockView,
    scroll_y: f64,
    max_scroll: f64,
}

impl ScrollViewport {
    pub fn new(lock: ScrollLockView) -> Self {
        Self {
            lock,
            scroll_y: 0.0,
            max_scroll: 0.0,
        }
    }

    /// Returns the applied position, or `None` while scrolling is locked.
    pub fn request_scroll(&mut self, y: f64) -> Option<f64> {
        if self.lock.is_locked() || !y.is_finite() {
            return None;
        }
        self.scroll_y = y.clamp(0.0, self.max_scroll);
        Some(self.scroll_y)
    }

    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = max_scroll.max(0.0);
        self.scroll_y = self.scroll_y.min(self.max_scroll);
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/lock.rs"]
mod tests;
