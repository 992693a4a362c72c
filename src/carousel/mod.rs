pub(crate) mod engine;
pub(crate) mod layout;
pub(crate) mod media;
