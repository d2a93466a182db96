//! PNG decode/encode with deterministic output.
//!
//! Decoding normalizes every supported PNG color type to RGBA8 so the rest
//! of the crate only ever sees one pixel layout. Encoding uses fixed
//! compression settings so the same bitmap always produces byte-identical
//! files, and exported data is fingerprinted with BLAKE3.

use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType, Transformations};
use thiserror::Error;

use crate::bitmap::Bitmap;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Unsupported pixel layout: {0}")]
    UnsupportedLayout(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            // No filtering keeps the output byte-stable across encoder
            // heuristics
            filter: FilterType::NoFilter,
        }
    }
}

/// Decode a PNG file into an RGBA8 bitmap.
///
/// Grayscale, grayscale+alpha, RGB, indexed, and 16-bit images are all
/// normalized to 8-bit RGBA.
pub fn decode_png(path: &Path) -> Result<Bitmap, CodecError> {
    let file = std::fs::File::open(path)?;
    let mut decoder = png::Decoder::new(std::io::BufReader::new(file));
    decoder.set_transformations(Transformations::normalize_to_color8());

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (width, height) = (info.width, info.height);
    let data = match info.color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(buf.len() / 3 * 4);
            for px in buf.chunks_exact(3) {
                rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
            rgba
        }
        ColorType::GrayscaleAlpha => {
            let mut rgba = Vec::with_capacity(buf.len() * 2);
            for px in buf.chunks_exact(2) {
                rgba.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
            rgba
        }
        ColorType::Grayscale => {
            let mut rgba = Vec::with_capacity(buf.len() * 4);
            for &g in &buf {
                rgba.extend_from_slice(&[g, g, g, 255]);
            }
            rgba
        }
        other => {
            return Err(CodecError::UnsupportedLayout(format!(
                "{other:?} after normalization"
            )))
        }
    };

    Ok(Bitmap::from_rgba8(width, height, data))
}

/// Encode a bitmap as PNG into a byte vector.
pub fn encode_png_to_vec(bitmap: &Bitmap, config: &PngConfig) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, bitmap.width, bitmap.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bitmap.data)?;
    writer.finish()?;

    Ok(out)
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode a bitmap, write it to `path`, and return the BLAKE3 hash of the
/// written bytes.
pub fn write_png_with_hash(
    bitmap: &Bitmap,
    path: &Path,
    config: &PngConfig,
) -> Result<String, CodecError> {
    let data = encode_png_to_vec(bitmap, config)?;
    let hash = hash_png(&data);
    std::fs::write(path, &data)?;
    Ok(hash)
}
