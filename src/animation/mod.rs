pub(crate) mod ease;
pub(crate) mod mapper;
pub(crate) mod spring;
pub(crate) mod tween;
