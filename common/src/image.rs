//! # Palm Image
//!
//! The raw upload ([`PalmImage`]) and its validated form ([`PreparedImage`]).
//!
//! Format detection works on magic bytes only; decoding and re-encoding
//! happen in `palmist-core`.

use serde::{Deserialize, Serialize};

/// 10 MiB, the upload limit.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PalmImage {
    bytes: Vec<u8>,
}

impl PalmImage {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            [b'B', b'M', ..] => Some(Self::Bmp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scales down so neither side exceeds `max_side`, keeping the aspect ratio.
    pub fn fit_within(&self, max_side: u32) -> Self {
        if max_side == 0 || (self.width <= max_side && self.height <= max_side) {
            return *self;
        }
        let scale = f64::min(
            max_side as f64 / self.width as f64,
            max_side as f64 / self.height as f64,
        );
        Self {
            width: ((self.width as f64 * scale).round() as u32).max(1),
            height: ((self.height as f64 * scale).round() as u32).max(1),
        }
    }

    /// Height over width, `None` for degenerate sizes.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.width > 0 && self.height > 0).then(|| self.height as f64 / self.width as f64)
    }
}

/// An upload that passed validation, scaled and re-encoded as JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    /// Format of the upload.
    pub source_format: ImageFormat,
    pub original: Dimensions,
    /// Size of `bytes`, bounded by `maxImageSize`.
    pub target: Dimensions,
    pub quality: f32,
    /// JPEG encoding at `target` size.
    pub bytes: Vec<u8>,
}
