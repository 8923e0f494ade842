use std::io::Read as _;

use crate::foundation::error::{SvgaError, SvgaResult};

/// Decompression collaborator.
///
/// `inflate` handles zlib-wrapped streams (the schema blob); `inflate_raw` handles headerless
/// deflate streams (archive entries) and is optional.
pub trait Inflater: Send + Sync {
    fn inflate(&self, data: &[u8]) -> SvgaResult<Vec<u8>>;

    fn supports_raw(&self) -> bool {
        false
    }

    fn inflate_raw(&self, _data: &[u8]) -> SvgaResult<Vec<u8>> {
        Err(SvgaError::decompression("raw deflate is not supported"))
    }
}

/// `flate2`-backed inflater supporting both zlib and raw deflate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlateInflater;

impl Inflater for FlateInflater {
    fn inflate(&self, data: &[u8]) -> SvgaResult<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len().saturating_mul(4));
        flate2::read::ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| SvgaError::decompression(format!("zlib: {e}")))?;
        Ok(out)
    }

    fn supports_raw(&self) -> bool {
        true
    }

    fn inflate_raw(&self, data: &[u8]) -> SvgaResult<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len().saturating_mul(4));
        flate2::read::DeflateDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| SvgaError::decompression(format!("deflate: {e}")))?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/inflate.rs"]
mod tests;
