//! Composition of a split group onto a single canvas.

use image::imageops;

use crate::image::RgbImage;

use super::split::SplitGroup;

/// Paste the images of `group` top to bottom onto a fresh canvas.
///
/// The canvas is as wide as the first member and as tall as the group. Each
/// image is placed at the running sum of the heights above it, so members
/// must already share the same width.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn compose(images: &[RgbImage], group: &SplitGroup) -> RgbImage {
    let members = &images[group.range()];
    let width = members.first().map_or(0, RgbImage::width);

    // Safe: callers reject groups taller than the WebP limit before encoding,
    // and a single RgbImage cannot be taller than u32::MAX
    let mut canvas = RgbImage::new(width, group.height as u32);

    let mut y_offset = 0i64;
    for img in members {
        imageops::replace(&mut canvas, img, 0, y_offset);
        y_offset += i64::from(img.height());
    }

    canvas
}
