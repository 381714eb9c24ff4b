//! # `stitchstack`
//!
//! Stack images vertically into WebP files.
//!
//! Every input is converted to RGB and scaled to the narrowest input width.
//! WebP cannot represent images taller than 16383 pixels, so a stack taller
//! than the configured limit is split into several contiguous parts.
//!
//! ## Example
//!
//! ```no_run
//! use stitchstack::{Config, InputSet, Stitcher};
//!
//! # fn main() -> stitchstack::Result<()> {
//! let inputs = InputSet::from_directory("screenshots")?;
//! let stitcher = Stitcher::new(Config::default())?;
//!
//! for path in stitcher.stitch(&inputs)? {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod input;
pub mod pipeline;

pub use error::{Error, Result};
pub use input::InputSet;
pub use pipeline::{Config, SplitPolicy, Stitcher};
