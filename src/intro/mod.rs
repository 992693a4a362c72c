pub(crate) mod callout;
pub(crate) mod choreography;
pub(crate) mod timeline;
