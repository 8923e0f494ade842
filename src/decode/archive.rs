//! Sequential reader for the local file headers of a ZIP-like archive.
//!
//! Only STORED and DEFLATE entries are supported; the central directory is never consulted.

use byteorder::{ByteOrder, LittleEndian};

use crate::foundation::error::SvgaResult;

/// Archive magic: `PK\x03\x04`.
pub const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4B50;
const LOCAL_HEADER_LEN: usize = 30;
const METHOD_STORED: u16 = 0;
const METHOD_DEFLATE: u16 = 8;

/// True when the buffer is longer than 4 bytes and starts with [`ZIP_MAGIC`].
pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.len() > 4 && bytes[..4] == ZIP_MAGIC
}

/// One materialized archive entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// Raw-deflate capability used for method 8 entries.
pub type RawInflate<'a> = &'a dyn Fn(&[u8]) -> SvgaResult<Vec<u8>>;

/// Read every acceptable entry.
///
/// Scanning stops at the first non-matching signature or truncated header/payload. Entries
/// with empty names, names containing `/` or `../`, or unsupported methods are skipped.
/// DEFLATE entries are dropped when `raw_inflate` is `None`; inflate failures propagate.
pub fn read_entries(
    bytes: &[u8],
    raw_inflate: Option<RawInflate<'_>>,
) -> SvgaResult<Vec<ArchiveEntry>> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    while pos + LOCAL_HEADER_LEN <= bytes.len() {
        let header = &bytes[pos..pos + LOCAL_HEADER_LEN];
        if LittleEndian::read_u32(&header[0..4]) != LOCAL_HEADER_SIGNATURE {
            break;
        }
        let method = LittleEndian::read_u16(&header[8..10]);
        let compressed = LittleEndian::read_u32(&header[18..22]) as usize;
        let name_len = usize::from(LittleEndian::read_u16(&header[26..28]));
        let extra_len = usize::from(LittleEndian::read_u16(&header[28..30]));

        let name_start = pos + LOCAL_HEADER_LEN;
        let data_start = name_start + name_len + extra_len;
        let Some(data_end) = data_start.checked_add(compressed) else {
            break;
        };
        if data_end > bytes.len() {
            break;
        }

        let name = String::from_utf8_lossy(&bytes[name_start..name_start + name_len]).into_owned();
        let payload = &bytes[data_start..data_end];
        pos = data_end;

        if name.is_empty() || name.contains('/') || name.contains("../") {
            tracing::debug!(name, "skip archive entry with unsafe name");
            continue;
        }

        let data = match (method, raw_inflate) {
            (METHOD_STORED, _) => payload.to_vec(),
            (METHOD_DEFLATE, Some(inflate)) => inflate(payload)?,
            (METHOD_DEFLATE, None) => {
                tracing::debug!(name, "skip deflate entry: no raw inflater");
                continue;
            }
            (other, _) => {
                tracing::debug!(name, method = other, "skip entry with unsupported method");
                continue;
            }
        };
        out.push(ArchiveEntry { name, data });
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/archive.rs"]
mod tests;
