//! SVGA vector-animation decoding, playback and frame compositing.
//!
//! The crate turns an SVGA container (a zlib-compressed protobuf blob or a small ZIP archive)
//! into an immutable [`Document`], drives it with a [`PlaybackState`] and draws any frame
//! through a [`FrameCompositor`] onto a [`DrawSurface`].
//!
//! # Pipeline overview
//!
//! 1. **Load**: bytes, a file or a URL (cache in front of the network) via [`SvgaLoader`]
//! 2. **Decode**: `bytes -> Document` via [`SvgaParser`] (images are decoded up front, in parallel)
//! 3. **Play**: `PlaybackState::advance_frame(delta_nanos)` moves the current frame
//! 4. **Render**: `FrameCompositor::render(frame, canvas, scale, overrides, surface)`
//!
//! [`CpuSurface`] is a ready-made raster surface producing premultiplied RGBA8 frames and
//! [`RecordingSurface`] captures the draw calls for inspection.
#![forbid(unsafe_code)]

mod decode;
mod foundation;
mod load;
mod path;
mod playback;
mod render;
mod scene;

pub use decode::archive::{ArchiveEntry, ZIP_MAGIC, is_zip, read_entries};
pub use decode::inflate::{FlateInflater, Inflater};
pub use decode::parser::{MOVIE_BINARY, MOVIE_SPEC, SvgaParser, is_image_candidate};
pub use decode::raster::{ImageRasterDecoder, RasterDecoder, RasterImage, decode_image};
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba, Size, Vec2, affine_from_parts};
pub use foundation::error::{SvgaError, SvgaResult};
#[cfg(feature = "http")]
pub use load::fetch::HttpFetcher;
pub use load::cache::{ByteCache, CACHE_DIR_ENV, FsByteCache, MemoryByteCache, cache_key};
pub use load::fetch::ByteFetcher;
pub use load::loader::{LoadHandle, LoadSource, SvgaLoader};
pub use path::geometry::{build_bezpath, parse_bezpath};
pub use path::parser::{PathCommand, arity, parse_path};
pub use path::printer::{format_float, print_path};
pub use playback::config::{FillMode, FrameRange, PlaybackConfig};
pub use playback::state::{EventCallback, PlaybackPhase, PlaybackState, StepCallback};
pub use render::compositor::FrameCompositor;
pub use render::cpu::{CpuSurface, FrameRgba};
pub use render::matte::MatteFlags;
pub use render::overrides::{DynamicDrawer, DynamicOverrides, TextStyle};
pub use render::recording::{DrawOp, RecordingSurface};
pub use render::scale::{ContentScale, ScaleResult, compute_scale_result};
pub use render::surface::{BlendMode, DrawSurface, StrokeStyle};
pub use scene::convert::{DEFAULT_FPS, document_from_raw};
pub use scene::model::{
    AudioCue, Dash, Document, DocumentSummary, Frame, LineCap, LineJoin, MATTE_SUFFIX, Shape,
    ShapeGeometry, ShapeKind, ShapeStyle, Sprite,
};

#[cfg(test)]
#[path = "../tests/unit/support/fixtures.rs"]
pub(crate) mod test_support;
