//! Custom error types for stitchstack.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the stitchstack library.
#[derive(Error, Debug)]
pub enum Error {
    /// The command line did not describe a usable set of inputs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Failed to enumerate a directory or read a list of input paths.
    #[error("failed to read inputs from {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The WebP encoder rejected a canvas.
    #[error("failed to encode image for {path}: {reason}")]
    ImageEncode { path: PathBuf, reason: String },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for this kind of failure.
    ///
    /// * `2` - invalid arguments or configuration
    /// * `3` - an input could not be read or decoded
    /// * `4` - an output could not be encoded or written
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) | Self::InvalidParameter { .. } => 2,
            Self::InputRead { .. } | Self::ImageLoad { .. } => 3,
            Self::ImageEncode { .. } | Self::ImageSave { .. } => 4,
        }
    }
}

/// Result type alias for stitchstack operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let invalid = Error::InvalidArgument("need two images".to_string());
        let decode = Error::ImageLoad {
            path: PathBuf::from("a.png"),
            source: image::ImageError::IoError(std::io::Error::other("truncated")),
        };
        let encode = Error::ImageEncode {
            path: PathBuf::from("out.webp"),
            reason: "too large".to_string(),
        };

        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(decode.exit_code(), 3);
        assert_eq!(encode.exit_code(), 4);
    }

    #[test]
    fn test_display_includes_path() {
        let err = Error::ImageSave {
            path: PathBuf::from("/tmp/out.webp"),
            source: std::io::Error::other("disk full"),
        };

        assert_eq!(
            err.to_string(),
            "failed to save image to /tmp/out.webp: disk full"
        );
    }
}
