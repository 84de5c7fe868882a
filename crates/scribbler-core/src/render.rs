//! # Content Generation
//!
//! The generator seam between "some text" and "an opaque image artifact".
//! The history engine never inspects artifact contents, so the contract is
//! only: given a text and target dimensions, produce encoded image bytes or
//! fail without side effects.
//!
//! The concrete [`GradientScribe`] renders a deterministic 24-bit BMP whose
//! colors and band pattern are derived from an integer hash of the text.
//! Glyph rasterization is deliberately out of scope; two different texts
//! still produce visibly different backgrounds.

use crate::primitives::{MAX_IMAGE_DIMENSION, MAX_TEXT_LENGTH};
use crate::types::{Artifact, ScribbleError};

// =============================================================================
// GENERATOR TRAIT
// =============================================================================

/// Produces a new artifact from a text input and target dimensions.
///
/// # Extension Point
///
/// Implementors must be pure with respect to engine state: a failed render
/// mutates nothing, and the engine commits only artifacts that rendered
/// successfully.
pub trait ContentGenerator {
    /// Render `text` into an encoded image of `width` x `height` pixels.
    fn render(&self, text: &str, width: u32, height: u32) -> Result<Artifact, ScribbleError>;
}

// =============================================================================
// GRADIENT SCRIBE
// =============================================================================

/// Deterministic BMP renderer.
///
/// Vertical gradient between two colors derived from the text hash, with a
/// center band whose per-column perturbation cycles through the text bytes.
/// Integer arithmetic only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientScribe;

impl GradientScribe {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ContentGenerator for GradientScribe {
    fn render(&self, text: &str, width: u32, height: u32) -> Result<Artifact, ScribbleError> {
        if width == 0 || height == 0 {
            return Err(ScribbleError::GenerationFailed(format!(
                "Zero-area image: {}x{}",
                width, height
            )));
        }
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(ScribbleError::GenerationFailed(format!(
                "Image dimensions {}x{} exceed maximum {}",
                width, height, MAX_IMAGE_DIMENSION
            )));
        }
        if text.len() > MAX_TEXT_LENGTH {
            return Err(ScribbleError::GenerationFailed(format!(
                "Text length {} bytes exceeds maximum {}",
                text.len(),
                MAX_TEXT_LENGTH
            )));
        }

        let hash = fnv1a64(text.as_bytes());
        let top = Rgb::from_bits(hash);
        let bottom = Rgb::from_bits(hash >> 24);

        Ok(Artifact::new(encode_bmp(
            width,
            height,
            text.as_bytes(),
            top,
            bottom,
        )))
    }
}

// =============================================================================
// PIXEL MATH (integer only)
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    fn from_bits(bits: u64) -> Self {
        Self {
            r: (bits & 0xFF) as u8,
            g: ((bits >> 8) & 0xFF) as u8,
            b: ((bits >> 16) & 0xFF) as u8,
        }
    }

    /// Blend toward `other` by `num/den`.
    fn blend(self, other: Rgb, num: u32, den: u32) -> Rgb {
        Rgb {
            r: lerp(self.r, other.r, num, den),
            g: lerp(self.g, other.g, num, den),
            b: lerp(self.b, other.b, num, den),
        }
    }
}

fn lerp(a: u8, b: u8, num: u32, den: u32) -> u8 {
    let span = i64::from(b) - i64::from(a);
    let value = i64::from(a) + span * i64::from(num) / i64::from(den.max(1));
    value.clamp(0, 255) as u8
}

/// FNV-1a, 64-bit. Deterministic text fingerprint; not cryptographic.
fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

// =============================================================================
// BMP ENCODING
// =============================================================================

/// Byte offset of pixel data: 14-byte file header + 40-byte info header.
const BMP_DATA_OFFSET: u32 = 54;

/// Encode a 24bpp bottom-up BMP.
///
/// Rows are padded to 4-byte boundaries; pixels are stored BGR.
fn encode_bmp(width: u32, height: u32, text: &[u8], top: Rgb, bottom: Rgb) -> Vec<u8> {
    let row_size = (width * 3).div_ceil(4) * 4;
    let pixel_bytes = row_size * height;
    let file_size = BMP_DATA_OFFSET + pixel_bytes;

    let mut out = Vec::with_capacity(file_size as usize);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&BMP_DATA_OFFSET.to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&pixel_bytes.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    let band_top = height / 3;
    let band_bottom = height.saturating_sub(height / 3);
    let padding = (row_size - width * 3) as usize;

    // Bottom-up row order
    for row in (0..height).rev() {
        let base = top.blend(bottom, row, height.saturating_sub(1));
        let in_band = !text.is_empty() && row >= band_top && row < band_bottom;
        for col in 0..width {
            let mut pixel = base;
            if in_band {
                let byte = text[(col as usize) % text.len()];
                pixel.g ^= byte;
            }
            out.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }

    out
}

// =============================================================================
// TESTS
// =============================================================================
