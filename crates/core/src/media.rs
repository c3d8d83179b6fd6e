//! Pre-upload image processing: best-effort compression and storage
//! path derivation.
//!
//! Compression is lossy and advisory. The pipeline uploads whatever
//! this module hands back; a decode or encode failure falls back to
//! the original bytes rather than aborting the submission.

use std::ffi::OsStr;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Longest image side after compression, in pixels.
pub const MAX_DIMENSION_PX: u32 = 1920;

/// Target encoded size after compression.
pub const MAX_ENCODED_BYTES: usize = 1024 * 1024;

/// JPEG quality steps tried in order until the size target is met.
const QUALITY_STEPS: [u8; 6] = [85, 75, 65, 55, 45, 35];

/// Length of the random storage-path suffix.
const SUFFIX_LEN: usize = 6;

/// Outcome of a compression attempt.
#[derive(Debug)]
pub enum CompressionResult {
    /// Re-encoded JPEG bytes, downscaled to fit [`MAX_DIMENSION_PX`].
    Compressed(Vec<u8>),
    /// The original bytes should be uploaded unchanged, either because
    /// they already fit the targets or because compression failed.
    Unmodified,
}

/// Compress an image toward the size and dimension targets.
///
/// Never fails: anything that cannot be decoded or re-encoded is
/// reported as [`CompressionResult::Unmodified`] with a warning log.
pub fn compress_image(bytes: &[u8]) -> CompressionResult {
    match try_compress(bytes) {
        Ok(Some(out)) => CompressionResult::Compressed(out),
        Ok(None) => CompressionResult::Unmodified,
        Err(e) => {
            tracing::warn!(error = %e, "image compression failed, uploading original");
            CompressionResult::Unmodified
        }
    }
}

/// `Ok(None)` means the input already fits both targets.
fn try_compress(bytes: &[u8]) -> Result<Option<Vec<u8>>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let longest = img.width().max(img.height());
    if longest <= MAX_DIMENSION_PX && bytes.len() <= MAX_ENCODED_BYTES {
        return Ok(None);
    }

    let img = if longest > MAX_DIMENSION_PX {
        img.thumbnail(MAX_DIMENSION_PX, MAX_DIMENSION_PX)
    } else {
        img
    };

    // JPEG carries no alpha channel; flatten before encoding.
    let rgb = img.to_rgb8();

    let mut smallest: Option<Vec<u8>> = None;
    for quality in QUALITY_STEPS {
        let mut out = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
        encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
        if out.len() <= MAX_ENCODED_BYTES {
            return Ok(Some(out));
        }
        smallest = Some(out);
    }

    // Size target missed even at the lowest quality step; ship the
    // smallest encoding we produced rather than give up.
    Ok(smallest)
}

/// Derive a unique storage path for an uploaded file.
///
/// `{folder}/{upload_millis}-{suffix}.{ext}` with the original file
/// extension preserved (lowercased); files with no extension get `jpg`.
pub fn storage_path(folder: &str, file_name: &str, upload_millis: i64, suffix: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "jpg".to_string());
    format!("{folder}/{upload_millis}-{suffix}.{ext}")
}

/// Random alphanumeric suffix for storage paths.
pub fn random_suffix() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use image::{ImageFormat, RgbImage};

    /// Encode a synthetic gradient as PNG at the given dimensions.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn oversized_image_is_downscaled_to_limit() {
        let input = png_bytes(2400, 1200);
        match compress_image(&input) {
            CompressionResult::Compressed(out) => {
                let decoded = image::load_from_memory(&out).unwrap();
                assert!(decoded.width().max(decoded.height()) <= MAX_DIMENSION_PX);
                assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
            }
            CompressionResult::Unmodified => panic!("expected compression"),
        }
    }

    #[test]
    fn small_image_passes_through_unmodified() {
        let input = png_bytes(640, 480);
        assert!(matches!(
            compress_image(&input),
            CompressionResult::Unmodified
        ));
    }

    #[test]
    fn corrupt_input_falls_back_to_original() {
        let garbage = vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x01];
        assert!(matches!(
            compress_image(&garbage),
            CompressionResult::Unmodified
        ));
    }

    #[test]
    fn storage_path_preserves_extension() {
        let path = storage_path("projects", "Stage Setup.PNG", 1718000000000, "a1b2c3");
        assert_eq!(path, "projects/1718000000000-a1b2c3.png");
    }

    #[test]
    fn storage_path_defaults_extension_when_missing() {
        let path = storage_path("before-after", "photo", 1718000000000, "zzzzzz");
        assert_eq!(path, "before-after/1718000000000-zzzzzz.jpg");
    }

    #[test]
    fn random_suffixes_differ() {
        let a = random_suffix();
        let b = random_suffix();
        assert_eq!(a.len(), SUFFIX_LEN);
        assert_ne!(a, b);
    }
}
