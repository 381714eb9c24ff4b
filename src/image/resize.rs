//! Width normalization.

use image::imageops::{self, FilterType};
use indicatif::{ProgressBar, ProgressStyle};

use super::RgbImage;

/// Narrowest width among `images`, or `None` when there are no images.
#[must_use]
pub fn target_width(images: &[RgbImage]) -> Option<u32> {
    images.iter().map(RgbImage::width).min()
}

/// Height of an image of `width`x`height` once scaled to `target` width,
/// preserving aspect ratio. Rounded to the nearest pixel, never below 1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scaled_height(width: u32, height: u32, target: u32) -> u32 {
    if width == target {
        return height;
    }

    // Safe: target <= width, so the result never exceeds height
    let scaled = (f64::from(height) * f64::from(target) / f64::from(width)).round();
    (scaled as u32).max(1)
}

/// Rescale every image to the narrowest input width.
///
/// Uses Lanczos3 so that downscaled images do not alias. Images that are
/// already at the target width are returned unchanged.
#[must_use]
pub fn normalize_widths(images: Vec<RgbImage>) -> Vec<RgbImage> {
    let Some(target) = target_width(&images) else {
        return images;
    };

    tracing::info!("Normalizing {} images to width {target}", images.len());

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Resizing [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let resized = images
        .into_iter()
        .map(|img| {
            let (width, height) = img.dimensions();
            let out = if width == target {
                img
            } else {
                let new_height = scaled_height(width, height, target);
                imageops::resize(&img, target, new_height, FilterType::Lanczos3)
            };
            pb.inc(1);
            out
        })
        .collect();

    pb.finish_and_clear();
    resized
}
