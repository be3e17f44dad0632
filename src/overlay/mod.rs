pub(crate) mod icons;
pub(crate) mod painting;
