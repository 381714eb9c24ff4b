//! Image loading, resizing, and saving utilities.

mod load;
mod resize;
mod save;

pub use load::{load_image, load_images};
pub use resize::{normalize_widths, scaled_height, target_width};
pub use save::save_webp;

/// Decoded 8-bit RGB raster. Every input is converted to this before stacking.
pub type RgbImage = image::RgbImage;

/// Largest width or height the WebP format can represent.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Extension written for every output file.
pub const OUTPUT_EXTENSION: &str = "webp";
