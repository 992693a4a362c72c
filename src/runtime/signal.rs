use std::{cell::RefCell, rc::Rc};

/// Create a single-threaded one-shot channel.
///
/// [`Notifier::notify`] consumes the sender, so a value can be sent at most once. The listener
/// yields it at most once.
pub fn oneshot<T>() -> (Notifier<T>, Listener<T>) {
    let slot = Rc::new(RefCell::new(Slot::Empty));
    (
        Notifier {
            slot: Rc::clone(&slot),
        },
        Listener { slot },
    )
}

#[derive(Debug)]
enum Slot<T> {
    Empty,
    Sent(T),
    Taken,
}

#[derive(Debug)]
pub struct Notifier<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Notifier<T> {
    pub fn notify(self, value: T) {
        let mut slot = self.slot.borrow_mut();
        if matches!(*slot, Slot::Empty) {
            *slot = Slot::Sent(value);
        }
    }
}

#[derive(Debug)]
pub struct Listener<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Listener<T> {
    pub fn try_recv(&mut self) -> Option<T> {
        let mut slot = self.slot.borrow_mut();
        match std::mem::replace(&mut *slot, Slot::Taken) {
            Slot::Sent(v) => Some(v),
            Slot::Empty => {
                *slot = Slot::Empty;
                None
            }
            Slot::Taken => None,
        }
    }

    /// True once the value has been received.
    pub fn is_consumed(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Taken)
    }

    /// True when the notifier was dropped without sending; nothing can arrive anymore.
    pub fn is_closed(&self) -> bool {
        Rc::strong_count(&self.slot) == 1 && matches!(*self.slot.borrow(), Slot::Empty)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/signal.rs"]
mod tests;
