use std::io::Cursor;

use anyhow::{Context, Result};
use image::codecs::jpeg::{JpegDecoder, JpegEncoder};
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageDecoder};
use tracing::{debug, warn};

const MIN_QUALITY: u8 = 40;
const QUALITY_STEP: u8 = 10;

/// Upload limits of a container photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownscaleLimits {
    pub max_bytes: usize,
    pub max_edge: u32,
    pub start_quality: u8,
}

impl Default for DownscaleLimits {
    fn default() -> Self {
        Self {
            max_bytes: 700 * 1024,
            max_edge: 1280,
            start_quality: 80,
        }
    }
}

/// Returns JPEG bytes that fit `limits`.
///
/// A small photo without EXIF rotation, or a small file that is not a
/// JPEG at all, is returned untouched. Anything
/// else is decoded, halved until its longest edge fits, turned upright and
/// re-encoded with decreasing quality.
pub fn downscale_jpeg_if_needed(raw: Vec<u8>, limits: DownscaleLimits) -> Result<Vec<u8>> {
    let orientation = match JpegDecoder::new(Cursor::new(raw.as_slice())) {
        Ok(mut header) => rotation_of(header.orientation().unwrap_or(Orientation::NoTransforms)),
        Err(err) if raw.len() <= limits.max_bytes => {
            debug!(bytes = raw.len(), error = %err, "photo is not a jpeg, sent as stored");
            return Ok(raw);
        }
        Err(err) => return Err(err).context("read jpeg header"),
    };
    if raw.len() <= limits.max_bytes && orientation == Orientation::NoTransforms {
        return Ok(raw);
    }

    let decoder = JpegDecoder::new(Cursor::new(raw.as_slice())).context("read jpeg header")?;
    let (width, height) = decoder.dimensions();
    let mut image = DynamicImage::from_decoder(decoder).context("decode jpeg")?;

    let sample = sample_size(width.max(height).max(1), limits.max_edge);
    if sample > 1 {
        image = image.resize_exact(
            (width / sample).max(1),
            (height / sample).max(1),
            FilterType::Triangle,
        );
    }
    image.apply_orientation(orientation);

    Ok(compress(&DynamicImage::ImageRgb8(image.to_rgb8()), limits)?.bytes)
}

/// Only quarter turns are honored; mirrored orientations are left as is.
fn rotation_of(orientation: Orientation) -> Orientation {
    match orientation {
        Orientation::Rotate90 | Orientation::Rotate180 | Orientation::Rotate270 => orientation,
        _ => Orientation::NoTransforms,
    }
}

/// Smallest power of two that brings `longest` within `max_edge`.
fn sample_size(longest: u32, max_edge: u32) -> u32 {
    let mut sample = 1;
    while longest / sample > max_edge {
        sample *= 2;
    }
    sample
}

struct Compressed {
    bytes: Vec<u8>,
    quality: u8,
}

fn encode(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
        .context("encode jpeg")?;
    Ok(out)
}

/// Steps quality down by 10 from the start value while the output is
/// oversized, never going below 40.
fn compress(image: &DynamicImage, limits: DownscaleLimits) -> Result<Compressed> {
    let mut quality = limits.start_quality;
    loop {
        let bytes = encode(image, quality)?;

        let next = quality.saturating_sub(QUALITY_STEP);
        if bytes.len() <= limits.max_bytes || next < MIN_QUALITY {
            if bytes.len() > limits.max_bytes {
                let (w, h) = image.dimensions();
                warn!(bytes = bytes.len(), width = w, height = h, quality, "photo still oversized after compression");
            }
            return Ok(Compressed { bytes, quality });
        }
        quality = next;
    }
}
