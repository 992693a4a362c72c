pub(crate) mod headline;
pub(crate) mod skills;
pub(crate) mod video_grid;
pub(crate) mod work;
