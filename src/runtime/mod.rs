pub(crate) mod clock;
pub(crate) mod frame;
pub(crate) mod signal;
pub(crate) mod timers;
