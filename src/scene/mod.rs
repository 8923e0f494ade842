pub(crate) mod convert;
pub(crate) mod model;
