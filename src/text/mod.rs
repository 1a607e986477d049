pub(crate) mod fit;
pub(crate) mod fonts;
pub(crate) mod mono;
pub(crate) mod shaper;
