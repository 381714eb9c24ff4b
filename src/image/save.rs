//! Image saving utilities.

use std::path::Path;

use crate::error::{Error, Result};

use super::{RgbImage, WEBP_MAX_DIMENSION};

/// Encode `img` as lossy WebP and write it to `path`.
///
/// # Arguments
///
/// * `img` - RGB canvas to encode
/// * `path` - Output file path. The parent directory must already exist.
/// * `quality` - WebP quality (1-100)
///
/// # Errors
///
/// Returns [`Error::ImageEncode`] if the canvas exceeds the WebP size limit or
/// the encoder fails, and [`Error::ImageSave`] if the file cannot be written.
pub fn save_webp<P: AsRef<Path>>(img: &RgbImage, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();
    let (width, height) = img.dimensions();

    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(Error::ImageEncode {
            path: path.to_path_buf(),
            reason: format!(
                "{width}x{height} exceeds the WebP limit of {WEBP_MAX_DIMENSION} pixels per side"
            ),
        });
    }

    let encoded = webp::Encoder::from_rgb(img.as_raw(), width, height)
        .encode_simple(false, f32::from(quality))
        .map_err(|err| Error::ImageEncode {
            path: path.to_path_buf(),
            reason: format!("{err:?}"),
        })?;

    std::fs::write(path, &*encoded).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Wrote {} ({width}x{height}, {} bytes)",
        path.display(),
        encoded.len()
    );

    Ok(())
}
