//! Main stitching pipeline.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::image::{self, RgbImage, WEBP_MAX_DIMENSION};
use crate::input::InputSet;

use super::canvas::compose;
use super::naming::OutputNamer;
use super::split::{plan_groups, SplitGroup, SplitPolicy};

/// Tallest output written by default. Kept below [`WEBP_MAX_DIMENSION`].
pub const DEFAULT_MAX_HEIGHT: u32 = 16000;

/// WebP quality used by default.
pub const DEFAULT_QUALITY: u8 = 90;

/// Configuration for the stitching pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum height of a single output image, in pixels.
    pub max_height: u32,

    /// Output WebP quality (1-100).
    pub quality: u8,

    /// How stacks taller than `max_height` are divided.
    pub policy: SplitPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
            policy: SplitPolicy::default(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=WEBP_MAX_DIMENSION).contains(&self.max_height) {
            return Err(Error::InvalidParameter {
                name: "max_height".to_string(),
                reason: format!("must be between 1 and {WEBP_MAX_DIMENSION}"),
            });
        }

        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidParameter {
                name: "quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }
}

/// Stacks images vertically into one or more WebP files.
pub struct Stitcher {
    config: Config,
}

impl Stitcher {
    /// Create a new stitcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::debug!("Initializing stitcher with config: {config:?}");

        Ok(Self { config })
    }

    /// Stitch `inputs` and write the result beside the first input.
    ///
    /// Returns the written paths in part order.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be decoded or an output cannot be
    /// written. Decoding failures and groups too large for WebP abort the run
    /// before anything is written.
    pub fn stitch(&self, inputs: &InputSet) -> Result<Vec<PathBuf>> {
        tracing::info!("Loading {} images", inputs.len());
        let images = image::normalize_widths(image::load_images(inputs.paths())?);

        let namer = OutputNamer::new(inputs.output_dir());

        self.write_stack(&images, &namer)
    }

    /// Stitch a list of paths, dropping those that are missing or carry an
    /// unsupported extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if fewer than [`crate::input::MIN_INPUTS`] paths
    /// remain, otherwise the errors of [`Stitcher::stitch`].
    pub fn stitch_paths(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        self.stitch(&InputSet::from_paths(paths.iter().cloned())?)
    }

    /// Split normalized `images` and write one file per group.
    ///
    /// Every group is checked against the WebP size limit before the first
    /// file is written.
    ///
    /// # Errors
    ///
    /// Returns an error if a group cannot be encoded or written.
    pub fn write_stack(&self, images: &[RgbImage], namer: &OutputNamer) -> Result<Vec<PathBuf>> {
        let heights: Vec<u32> = images.iter().map(RgbImage::height).collect();
        let groups = plan_groups(&heights, self.config.max_height, self.config.policy);
        let outputs = namer.paths(groups.len());
        let width = images.first().map_or(0, RgbImage::width);

        for (group, path) in groups.iter().zip(&outputs) {
            check_encodable(width, group, path)?;
        }

        tracing::info!(
            "Writing {} output file(s) to {}",
            groups.len(),
            namer.dir().display()
        );

        for (group, path) in groups.iter().zip(&outputs) {
            self.write_group(images, group, path)?;
        }

        Ok(outputs)
    }

    fn write_group(&self, images: &[RgbImage], group: &SplitGroup, path: &Path) -> Result<()> {
        if group.height > u64::from(self.config.max_height) {
            tracing::warn!(
                "Image {} alone is {} pixels tall, above the limit of {}",
                group.start,
                group.height,
                self.config.max_height
            );
        }

        let canvas = compose(images, group);
        image::save_webp(&canvas, path, self.config.quality)?;

        tracing::info!(
            "Saved {} ({} images, {}x{})",
            path.display(),
            group.len(),
            canvas.width(),
            canvas.height()
        );

        Ok(())
    }
}

/// Reject a `width`-wide canvas for `group` that WebP cannot represent.
fn check_encodable(width: u32, group: &SplitGroup, path: &Path) -> Result<()> {
    if width > WEBP_MAX_DIMENSION || group.height > u64::from(WEBP_MAX_DIMENSION) {
        return Err(Error::ImageEncode {
            path: path.to_path_buf(),
            reason: format!(
                "images {}..{} stack to {width}x{}, above the WebP limit of {WEBP_MAX_DIMENSION}",
                group.start, group.end, group.height
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::image::Rgb;

    use crate::pipeline::OUTPUT_STEM;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb(color))
            .save(&path)
            .unwrap();
        path
    }

    fn dimensions(path: &Path) -> (u32, u32) {
        ::image::image_dimensions(path).unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let too_tall = Config {
            max_height: WEBP_MAX_DIMENSION + 1,
            ..Config::default()
        };
        assert!(matches!(
            Stitcher::new(too_tall),
            Err(Error::InvalidParameter { .. })
        ));

        let zero_quality = Config {
            quality: 0,
            ..Config::default()
        };
        assert!(zero_quality.validate().is_err());
    }

    #[test]
    fn test_single_output_normalizes_width() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = InputSet::from_paths([
            write_png(dir.path(), "1.png", 100, 300, [255, 0, 0]),
            write_png(dir.path(), "2.png", 200, 300, [0, 255, 0]),
            write_png(dir.path(), "3.png", 150, 300, [0, 0, 255]),
        ])
        .unwrap();
        let stitcher = Stitcher::new(Config::default()).unwrap();

        let outputs = stitcher.stitch(&inputs).unwrap();

        assert_eq!(outputs, vec![dir.path().join("stitched_output.webp")]);
        assert_eq!(dimensions(&outputs[0]), (100, 650));
    }

    #[test]
    fn test_second_run_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = InputSet::from_paths([
            write_png(dir.path(), "a.png", 10, 10, [0, 0, 0]),
            write_png(dir.path(), "b.png", 10, 10, [255, 255, 255]),
        ])
        .unwrap();
        let stitcher = Stitcher::new(Config::default()).unwrap();

        let first = stitcher.stitch(&inputs).unwrap();
        let second = stitcher.stitch(&inputs).unwrap();
        let third = stitcher.stitch(&inputs).unwrap();

        assert_eq!(first, vec![dir.path().join("stitched_output.webp")]);
        assert_eq!(second, vec![dir.path().join("stitched_output_1.webp")]);
        assert_eq!(third, vec![dir.path().join("stitched_output_2.webp")]);
    }

    #[test]
    fn test_split_into_balanced_parts() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..10)
            .map(|i| write_png(dir.path(), &format!("{i:02}.png"), 8, 40, [0, 0, 0]))
            .collect();
        let stitcher = Stitcher::new(Config {
            max_height: 320,
            ..Config::default()
        })
        .unwrap();

        let outputs = stitcher.stitch_paths(&paths).unwrap();

        assert_eq!(
            outputs,
            vec![
                dir.path().join("stitched_output_part1.webp"),
                dir.path().join("stitched_output_part2.webp"),
            ]
        );
        for output in &outputs {
            assert_eq!(dimensions(output), (8, 200));
        }
    }

    #[test]
    fn test_split_with_greedy_policy() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..10)
            .map(|i| write_png(dir.path(), &format!("{i:02}.png"), 8, 40, [0, 0, 0]))
            .collect();
        let stitcher = Stitcher::new(Config {
            max_height: 320,
            policy: SplitPolicy::Greedy,
            ..Config::default()
        })
        .unwrap();

        let outputs = stitcher.stitch_paths(&paths).unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(dimensions(&outputs[0]), (8, 320));
        assert_eq!(dimensions(&outputs[1]), (8, 80));
    }

    #[test]
    fn test_too_few_inputs_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let only = write_png(dir.path(), "only.png", 10, 10, [0, 0, 0]);
        let stitcher = Stitcher::new(Config::default()).unwrap();

        let err = stitcher.stitch_paths(&[only]).unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(!dir.path().join("stitched_output.webp").exists());
    }

    #[test]
    fn test_decode_error_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", 10, 10, [0, 0, 0]);
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"garbage").unwrap();
        let stitcher = Stitcher::new(Config::default()).unwrap();

        let err = stitcher.stitch_paths(&[good, bad]).unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(!dir.path().join("stitched_output.webp").exists());
    }

    fn outputs_in(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(OUTPUT_STEM))
            .collect()
    }

    #[test]
    fn test_oversized_group_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_png(dir.path(), "1.png", 8, 100, [0, 0, 0]),
            write_png(dir.path(), "2.png", 8, WEBP_MAX_DIMENSION + 117, [0, 0, 0]),
        ];
        let stitcher = Stitcher::new(Config::default()).unwrap();

        let err = stitcher.stitch_paths(&paths).unwrap_err();

        assert!(matches!(err, Error::ImageEncode { .. }));
        assert_eq!(err.exit_code(), 4);
        assert!(outputs_in(dir.path()).is_empty());
    }

    #[test]
    fn test_lone_image_above_max_height_is_written_whole() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_png(dir.path(), "1.png", 8, 50, [0, 0, 0]),
            write_png(dir.path(), "2.png", 8, 150, [255, 255, 255]),
        ];
        let stitcher = Stitcher::new(Config {
            max_height: 100,
            ..Config::default()
        })
        .unwrap();

        let outputs = stitcher.stitch_paths(&paths).unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(dimensions(&outputs[0]), (8, 50));
        assert_eq!(dimensions(&outputs[1]), (8, 150));
    }
}
