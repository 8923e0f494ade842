//! Fixture builders shared by unit and integration tests: protobuf messages, zlib blobs,
//! stored/deflated archives and tiny PNGs.
#![allow(dead_code)]

use std::io::Write as _;

/// Protobuf message writer.
#[derive(Clone, Debug, Default)]
pub struct Msg {
    buf: Vec<u8>,
}

impl Msg {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&mut self, field: u32, wire: u8) {
        self.raw_varint((u64::from(field) << 3) | u64::from(wire));
    }

    fn raw_varint(&mut self, mut v: u64) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.push(byte);
                break;
            }
            self.buf.push(byte | 0x80);
        }
    }

    pub fn varint(mut self, field: u32, v: u64) -> Self {
        self.key(field, 0);
        self.raw_varint(v);
        self
    }

    pub fn int32(self, field: u32, v: i32) -> Self {
        self.varint(field, v as i64 as u64)
    }

    pub fn float(mut self, field: u32, v: f32) -> Self {
        self.key(field, 5);
        self.buf.extend_from_slice(&v.to_bits().to_le_bytes());
        self
    }

    pub fn fixed64(mut self, field: u32, v: u64) -> Self {
        self.key(field, 1);
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn bytes(mut self, field: u32, v: &[u8]) -> Self {
        self.key(field, 2);
        self.raw_varint(v.len() as u64);
        self.buf.extend_from_slice(v);
        self
    }

    pub fn string(self, field: u32, v: &str) -> Self {
        self.bytes(field, v.as_bytes())
    }

    pub fn msg(self, field: u32, m: Msg) -> Self {
        self.bytes(field, &m.buf)
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

pub fn params(w: f32, h: f32, fps: i32, frames: i32) -> Msg {
    Msg::new()
        .float(1, w)
        .float(2, h)
        .int32(3, fps)
        .int32(4, frames)
}

pub fn layout(x: f32, y: f32, w: f32, h: f32) -> Msg {
    Msg::new()
        .float(1, x)
        .float(2, y)
        .float(3, w)
        .float(4, h)
}

pub fn transform(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Msg {
    Msg::new()
        .float(1, a)
        .float(2, b)
        .float(3, c)
        .float(4, d)
        .float(5, tx)
        .float(6, ty)
}

/// Frame with alpha, a `w`×`h` layout at the origin and an optional translation.
pub fn frame(alpha: f32, w: f32, h: f32, tx: f32, ty: f32) -> Msg {
    Msg::new()
        .float(1, alpha)
        .msg(2, layout(0.0, 0.0, w, h))
        .msg(3, transform(1.0, 0.0, 0.0, 1.0, tx, ty))
}

pub fn image_entry(key: &str, bytes: &[u8]) -> Msg {
    Msg::new().string(1, key).bytes(2, bytes)
}

pub fn sprite(image_key: Option<&str>, matte_key: Option<&str>, frames: Vec<Msg>) -> Msg {
    let mut m = Msg::new();
    if let Some(k) = image_key {
        m = m.string(1, k);
    }
    for f in frames {
        m = m.msg(2, f);
    }
    if let Some(k) = matte_key {
        m = m.string(3, k);
    }
    m
}

/// MovieEntity with params, images and sprites.
pub fn movie(
    version: &str,
    params_msg: Msg,
    images: &[(&str, &[u8])],
    sprites: Vec<Msg>,
) -> Msg {
    let mut m = Msg::new().string(1, version).msg(2, params_msg);
    for (k, v) in images {
        m = m.msg(3, image_entry(k, v));
    }
    for s in sprites {
        m = m.msg(4, s);
    }
    m
}

pub fn zlib(bytes: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(bytes).expect("zlib write");
    enc.finish().expect("zlib finish")
}

pub fn raw_deflate(bytes: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(bytes).expect("deflate write");
    enc.finish().expect("deflate finish")
}

/// One archive local entry: name, method (0 stored / 8 deflate) and the already-encoded payload.
pub fn zip_entry(out: &mut Vec<u8>, name: &str, method: u16, payload: &[u8]) {
    out.extend_from_slice(&0x0403_4B50u32.to_le_bytes());
    out.extend_from_slice(&20u16.to_le_bytes()); // version needed
    out.extend_from_slice(&0u16.to_le_bytes()); // flags
    out.extend_from_slice(&method.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // mod time
    out.extend_from_slice(&0u16.to_le_bytes()); // mod date
    out.extend_from_slice(&0u32.to_le_bytes()); // crc32, unchecked
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size, unchecked
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra length
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(payload);
}

pub fn stored_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, data) in entries {
        zip_entry(&mut out, name, 0, data);
    }
    // Central directory signature ends the local-header scan.
    out.extend_from_slice(&0x0201_4B50u32.to_le_bytes());
    out
}

/// Solid-colour PNG of the given size.
pub fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Bytes starting with the ID3 tag that marks embedded audio.
pub fn mp3_like() -> Vec<u8> {
    let mut out = b"ID3".to_vec();
    out.extend_from_slice(&[4, 0, 0, 0, 0, 0, 0]);
    out
}
