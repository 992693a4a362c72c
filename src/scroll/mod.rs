pub(crate) mod lock;
pub(crate) mod offset;
pub(crate) mod progress;
