//! Frame compositing and drawing surfaces.

pub(crate) mod compositor;
pub(crate) mod cpu;
pub(crate) mod matte;
pub(crate) mod overrides;
pub(crate) mod recording;
pub(crate) mod scale;
pub(crate) mod surface;
