//! Load, normalize, split, and write pipeline.

mod canvas;
mod naming;
mod split;
mod stitch;

pub use canvas::compose;
pub use naming::{OutputNamer, OUTPUT_STEM};
pub use split::{plan_groups, SplitGroup, SplitPolicy};
pub use stitch::{Config, Stitcher, DEFAULT_MAX_HEIGHT, DEFAULT_QUALITY};
