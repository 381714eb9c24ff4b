//! Collision-avoiding output file names.

use std::path::{Path, PathBuf};

use crate::image::OUTPUT_EXTENSION;

/// Stem shared by every output file.
pub const OUTPUT_STEM: &str = "stitched_output";

/// Picks output paths in a directory without overwriting existing files.
///
/// Probing is sequential and not atomic: two runs writing into the same
/// directory at the same time can still pick the same name.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir: PathBuf,
}

impl OutputNamer {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Paths for `parts` output files.
    ///
    /// A single part is written to `stitched_output.webp`, falling back to
    /// `stitched_output_1.webp`, `stitched_output_2.webp`, ... Several parts
    /// are named `stitched_output_part1.webp` onwards; if any of those exist
    /// the whole set moves to `stitched_output_1_part1.webp` and so on, so
    /// that parts of one run always share a prefix.
    #[must_use]
    pub fn paths(&self, parts: usize) -> Vec<PathBuf> {
        (0usize..)
            .map(|counter| self.candidate(counter, parts))
            .find(|candidate| candidate.iter().all(|path| !path.exists()))
            .unwrap_or_default()
    }

    fn candidate(&self, counter: usize, parts: usize) -> Vec<PathBuf> {
        let prefix = if counter == 0 {
            OUTPUT_STEM.to_string()
        } else {
            format!("{OUTPUT_STEM}_{counter}")
        };

        if parts == 1 {
            return vec![self.file(&prefix)];
        }

        (1..=parts)
            .map(|part| self.file(&format!("{prefix}_part{part}")))
            .collect()
    }

    fn file(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
