//! Container decoding: format sniffing, archive and protobuf readers, image resolution.

pub(crate) mod archive;
pub(crate) mod inflate;
pub(crate) mod parser;
pub(crate) mod raster;
pub(crate) mod schema;
pub(crate) mod wire;
