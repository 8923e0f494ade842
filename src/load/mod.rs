//! Loading documents from bytes, files and URLs, with a byte cache in front of the network.

pub(crate) mod cache;
pub(crate) mod fetch;
pub(crate) mod loader;
