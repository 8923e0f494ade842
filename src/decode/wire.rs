//! Minimal protobuf wire-format reader.
//!
//! Only what the SVGA schema needs: varints, 32/64-bit fixed values and length-delimited
//! payloads. Group wire types are rejected.

use crate::foundation::error::{SvgaError, SvgaResult};

/// One decoded field value, borrowing length-delimited payloads from the input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum WireValue<'a> {
    Varint(u64),
    Fixed64(u64),
    Bytes(&'a [u8]),
    Fixed32(u32),
}

impl<'a> WireValue<'a> {
    pub(crate) fn as_f32(self, field: &str) -> SvgaResult<f32> {
        match self {
            Self::Fixed32(bits) => Ok(f32::from_bits(bits)),
            _ => Err(wrong_type(field, "fixed32")),
        }
    }

    /// `int32` fields are sign-extended varints.
    pub(crate) fn as_i32(self, field: &str) -> SvgaResult<i32> {
        match self {
            Self::Varint(v) => Ok(v as i64 as i32),
            _ => Err(wrong_type(field, "varint")),
        }
    }

    pub(crate) fn as_bytes(self, field: &str) -> SvgaResult<&'a [u8]> {
        match self {
            Self::Bytes(b) => Ok(b),
            _ => Err(wrong_type(field, "length-delimited")),
        }
    }

    pub(crate) fn as_string(self, field: &str) -> SvgaResult<String> {
        let bytes = self.as_bytes(field)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| SvgaError::schema(format!("field '{field}' is not valid UTF-8")))
    }
}

fn wrong_type(field: &str, expected: &str) -> SvgaError {
    SvgaError::schema(format!("field '{field}' expected {expected} wire type"))
}

/// Sequential field reader over one message payload.
pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Next `(field_number, value)`, or `None` at the end of the payload.
    pub(crate) fn next_field(&mut self) -> SvgaResult<Option<(u32, WireValue<'a>)>> {
        if self.pos >= self.buf.len() {
            return Ok(None);
        }
        let key = self.read_varint()?;
        let field = u32::try_from(key >> 3)
            .map_err(|_| SvgaError::schema("field number out of range"))?;
        if field == 0 {
            return Err(SvgaError::schema("field number 0 is invalid"));
        }

        let value = match key & 0x7 {
            0 => WireValue::Varint(self.read_varint()?),
            1 => WireValue::Fixed64(u64::from_le_bytes(self.take_array::<8>()?)),
            2 => {
                let len = usize::try_from(self.read_varint()?)
                    .map_err(|_| SvgaError::schema("length prefix out of range"))?;
                WireValue::Bytes(self.take(len)?)
            }
            5 => WireValue::Fixed32(u32::from_le_bytes(self.take_array::<4>()?)),
            other => {
                return Err(SvgaError::schema(format!(
                    "unsupported wire type {other} for field {field}"
                )));
            }
        };
        Ok(Some((field, value)))
    }

    fn read_varint(&mut self) -> SvgaResult<u64> {
        let mut out = 0u64;
        for shift in (0..64).step_by(7) {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or_else(|| SvgaError::schema("truncated varint"))?;
            self.pos += 1;
            out |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(out);
            }
        }
        Err(SvgaError::schema("varint longer than 10 bytes"))
    }

    fn take(&mut self, len: usize) -> SvgaResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| SvgaError::schema("truncated length-delimited field"))?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> SvgaResult<[u8; N]> {
        let bytes = self
            .take(N)
            .map_err(|_| SvgaError::schema("truncated fixed-width field"))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/wire.rs"]
mod tests;
