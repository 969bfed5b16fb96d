//! Profile-image compression.
//!
//! The avatar flow accepts an arbitrary image file, caps its longest side,
//! and re-encodes it as JPEG under a byte budget by walking the quality
//! down. Matches the limits the original uploader enforced.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use crate::domain::errors::ImageError;

/// Longest allowed side of the stored avatar, in pixels.
pub const MAX_DIMENSION: u32 = 1920;
/// Encoded size budget: 0.55 MB.
pub const MAX_ENCODED_BYTES: usize = (55 * 1024 * 1024) / 100;

const QUALITY_STEPS: &[u8] = &[85, 75, 65, 50, 35, 20];

/// A compressed avatar ready to store.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// JPEG payload.
    pub bytes: Vec<u8>,
    /// Final pixel width.
    pub width: u32,
    /// Final pixel height.
    pub height: u32,
    /// JPEG quality the encoder settled on.
    pub quality: u8,
}

impl CompressedImage {
    /// Encoded size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Loads and compresses the image at `path`.
///
/// # Errors
/// Returns [`ImageError`] when the file cannot be read, decoded, or
/// re-encoded. Callers treat any error as "keep the previous image".
pub fn compress_profile_image(path: &Path) -> Result<CompressedImage, ImageError> {
    let bytes = std::fs::read(path)?;
    debug!(path = ?path, size = bytes.len(), "Loaded profile image");

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| ImageError::decode(e.to_string()))?;

    compress(&decoded)
}

fn compress(decoded: &DynamicImage) -> Result<CompressedImage, ImageError> {
    let (width, height) = decoded.dimensions();
    let resized = if width.max(height) > MAX_DIMENSION {
        decoded.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Triangle)
    } else {
        decoded.clone()
    };

    // JPEG has no alpha channel.
    let rgb = resized.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut last: Option<CompressedImage> = None;
    for &quality in QUALITY_STEPS {
        let mut buffer = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buffer, quality)
            .encode_image(&rgb)
            .map_err(|e| ImageError::encode(e.to_string()))?;

        let bytes = buffer.into_inner();
        let encoded = CompressedImage {
            bytes,
            width,
            height,
            quality,
        };
        if encoded.len() <= MAX_ENCODED_BYTES {
            debug!(
                quality,
                size = encoded.len(),
                "Profile image compressed within budget"
            );
            return Ok(encoded);
        }
        last = Some(encoded);
    }

    // Even the lowest quality overshot; keep the smallest attempt rather
    // than fail the upload.
    let encoded = last.ok_or_else(|| ImageError::encode("no encode attempts made"))?;
    warn!(
        size = encoded.len(),
        budget = MAX_ENCODED_BYTES,
        "Profile image exceeds size budget at minimum quality"
    );
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        DynamicImage::ImageRgb8(buffer)
    }

    #[test]
    fn test_small_image_keeps_dimensions() {
        let compressed = compress(&gradient(320, 200)).expect("compress");
        assert_eq!((compressed.width, compressed.height), (320, 200));
        assert!(!compressed.is_empty());
        assert!(compressed.len() <= MAX_ENCODED_BYTES);
    }

    #[test]
    fn test_oversized_image_is_downscaled() {
        let compressed = compress(&gradient(2500, 1000)).expect("compress");
        assert_eq!(compressed.width, MAX_DIMENSION);
        assert_eq!(compressed.height, 768);
    }

    #[test]
    fn test_portrait_image_caps_height() {
        let compressed = compress(&gradient(1000, 2500)).expect("compress");
        assert_eq!(compressed.height, MAX_DIMENSION);
        assert_eq!(compressed.width, 768);
    }

    #[test]
    fn test_compress_from_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("avatar.png");
        gradient(64, 64).save(&path).expect("save png");

        let compressed = compress_profile_image(&path).expect("compress");
        assert!(compressed.len() <= MAX_ENCODED_BYTES);
        assert_eq!((compressed.width, compressed.height), (64, 64));
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let result = compress_profile_image(Path::new("/nonexistent/avatar.png"));
        assert!(matches!(result, Err(ImageError::Read(_))));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("not-an-image.png");
        std::fs::write(&path, b"definitely not image data").expect("write");

        let result = compress_profile_image(&path);
        assert!(matches!(result, Err(ImageError::Decode { .. })));
    }
}
