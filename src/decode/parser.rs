use std::{collections::HashMap, sync::Arc};

use rayon::prelude::*;

use crate::{
    decode::{
        archive::{self, RawInflate},
        inflate::{FlateInflater, Inflater},
        raster::{ImageRasterDecoder, RasterDecoder, RasterImage},
        schema::RawMovie,
    },
    foundation::error::{SvgaError, SvgaResult},
    scene::{convert::document_from_raw, model::Document},
};

/// Archive entry holding the schema payload.
pub const MOVIE_BINARY: &str = "movie.binary";
/// Legacy JSON descriptor; never treated as an image.
pub const MOVIE_SPEC: &str = "movie.spec";

const ID3_MAGIC: [u8; 3] = [0x49, 0x44, 0x33];

/// Container decoder: sniffs the format, decodes the schema and resolves images.
///
/// Decoding is all-or-nothing for the document, best-effort for individual images.
#[derive(Clone)]
pub struct SvgaParser {
    inflater: Arc<dyn Inflater>,
    rasters: Arc<dyn RasterDecoder>,
}

impl Default for SvgaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SvgaParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgaParser")
            .field("raw_inflate", &self.inflater.supports_raw())
            .finish_non_exhaustive()
    }
}

impl SvgaParser {
    pub fn new() -> Self {
        Self {
            inflater: Arc::new(FlateInflater),
            rasters: Arc::new(ImageRasterDecoder),
        }
    }

    pub fn with_inflater(mut self, inflater: Arc<dyn Inflater>) -> Self {
        self.inflater = inflater;
        self
    }

    pub fn with_raster_decoder(mut self, rasters: Arc<dyn RasterDecoder>) -> Self {
        self.rasters = rasters;
        self
    }

    pub fn raster_decoder(&self) -> &Arc<dyn RasterDecoder> {
        &self.rasters
    }

    /// True for buffers longer than 4 bytes starting with the archive magic.
    pub fn is_zip_file(bytes: &[u8]) -> bool {
        archive::is_zip(bytes)
    }

    /// Decode either container kind.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn decode_bytes(&self, bytes: &[u8]) -> SvgaResult<Document> {
        if Self::is_zip_file(bytes) {
            self.parse_archive(bytes)
        } else {
            self.parse_schema_blob(bytes)
        }
    }

    /// Decode a zlib-compressed schema blob.
    pub fn parse_schema_blob(&self, bytes: &[u8]) -> SvgaResult<Document> {
        self.schema_blob(bytes)
            .map_err(|e| e.with_stage("Failed to parse Protobuf SVGA"))
    }

    /// Decode an archive containing `movie.binary` and image entries.
    pub fn parse_archive(&self, bytes: &[u8]) -> SvgaResult<Document> {
        self.archive(bytes).map_err(|e| match e {
            SvgaError::MissingRequiredEntry(_) => e,
            e => e.with_stage("Failed to parse ZIP SVGA"),
        })
    }

    fn schema_blob(&self, bytes: &[u8]) -> SvgaResult<Document> {
        if bytes.is_empty() {
            return Err(SvgaError::decompression("empty input"));
        }
        let inflated = self.inflater.inflate(bytes)?;
        let raw = RawMovie::from_bytes(&inflated)?;

        let embedded: HashMap<&str, &[u8]> = raw
            .images
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        let images = self.decode_images(embedded);
        tracing::debug!(images = images.len(), sprites = raw.sprites.len(), "decoded schema blob");

        Ok(document_from_raw(raw, images))
    }

    fn archive(&self, bytes: &[u8]) -> SvgaResult<Document> {
        let inflater = self.inflater.as_ref();
        let raw_fn: RawInflate<'_> = &|b: &[u8]| inflater.inflate_raw(b);
        let raw_inflate = inflater.supports_raw().then_some(raw_fn);
        let entries = archive::read_entries(bytes, raw_inflate)?;

        let movie = entries
            .iter()
            .rev()
            .find(|e| e.name == MOVIE_BINARY)
            .ok_or_else(|| SvgaError::missing_entry("ZIP does not contain movie.binary"))?;
        let raw = RawMovie::from_bytes(&movie.data)?;

        let mut files: HashMap<&str, &[u8]> = HashMap::new();
        for e in &entries {
            if e.name == MOVIE_BINARY || e.name == MOVIE_SPEC {
                continue;
            }
            let key = e.name.rsplit_once('.').map_or(e.name.as_str(), |(k, _)| k);
            files.insert(key, e.data.as_slice());
        }
        let mut images = self.decode_images(files);

        let fallback: HashMap<&str, &[u8]> = raw
            .images
            .iter()
            .filter(|(k, _)| !images.contains_key(k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        images.extend(self.decode_images(fallback));
        tracing::debug!(
            entries = entries.len(),
            images = images.len(),
            "decoded archive"
        );

        Ok(document_from_raw(raw, images))
    }

    /// Decode candidate images in parallel. Audio payloads, tiny blobs and failures are dropped.
    fn decode_images(&self, sources: HashMap<&str, &[u8]>) -> HashMap<String, RasterImage> {
        sources
            .into_par_iter()
            .filter(|(key, bytes)| {
                let keep = is_image_candidate(bytes);
                if !keep {
                    tracing::trace!(key, "skip non-image payload");
                }
                keep
            })
            .filter_map(|(key, bytes)| match self.rasters.decode(bytes) {
                Ok(img) => Some((key.to_owned(), img)),
                Err(err) => {
                    tracing::debug!(key, %err, "drop undecodable image");
                    None
                }
            })
            .collect()
    }
}

/// At least 4 bytes and not tagged as ID3 audio.
pub fn is_image_candidate(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..3] != ID3_MAGIC
}

#[cfg(test)]
#[path = "../../tests/unit/decode/parser.rs"]
mod tests;
