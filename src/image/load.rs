//! Image loading utilities.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};

use super::RgbImage;

/// Load an image from disk and convert it to 8-bit RGB.
///
/// The format is detected from the file contents, so a misnamed file still
/// loads. Alpha channels are dropped and palettes expanded.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file cannot be opened or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();

    let img = image::ImageReader::open(path)
        .and_then(image::ImageReader::with_guessed_format)
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(source),
        })?
        .decode()
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img.into_rgb8())
}

/// Load every path in order.
///
/// The whole batch fails on the first image that cannot be decoded.
///
/// # Errors
///
/// Returns the [`Error::ImageLoad`] of the first failing path.
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<RgbImage>> {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Loading [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_image(path)?);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(images)
}
