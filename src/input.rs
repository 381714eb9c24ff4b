//! Discovery and filtering of input image paths.

use std::ffi::OsStr;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Extensions accepted as inputs. Matching is case-sensitive.
pub const VALID_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// Fewest images worth stitching.
pub const MIN_INPUTS: usize = 2;

/// List-file path that reads from standard input.
pub const STDIN_LIST: &str = "-";

/// Whether `path` ends in one of [`VALID_EXTENSIONS`].
#[must_use]
pub fn has_valid_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| VALID_EXTENSIONS.iter().any(|valid| valid[1..] == *ext))
}

/// Ordered set of at least [`MIN_INPUTS`] existing image paths.
///
/// The order determines stacking order and part numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet {
    paths: Vec<PathBuf>,
}

impl InputSet {
    /// Build from command line arguments.
    ///
    /// A single argument must name a directory whose immediate children are
    /// used. Several arguments are treated as an explicit list of files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no arguments were given, a single
    /// argument is not a directory, or fewer than [`MIN_INPUTS`] paths survive
    /// filtering.
    pub fn from_args(args: &[PathBuf]) -> Result<Self> {
        match args {
            [] => Err(Error::InvalidArgument(
                "no input images or directory given".to_string(),
            )),
            [dir] => {
                if !dir.is_dir() {
                    return Err(Error::InvalidArgument(format!(
                        "not a valid directory: {}",
                        dir.display()
                    )));
                }
                Self::from_directory(dir)
            }
            files => Self::from_paths(files.iter().cloned()),
        }
    }

    /// Use the immediate children of `dir`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputRead`] if the directory itself cannot be listed and
    /// [`Error::InvalidArgument`] if it holds fewer than [`MIN_INPUTS`] images.
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let mut children = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => children.push(entry.into_path()),
                // Unreadable children, such as dangling symlinks, are skipped
                // like any other non-file entry.
                Err(err) if err.depth() > 0 => {
                    tracing::debug!("Skipping unreadable entry in {}: {err}", dir.display());
                }
                Err(err) => {
                    return Err(Error::InputRead {
                        path: dir.to_path_buf(),
                        source: err.into(),
                    })
                }
            }
        }

        let paths = filter_paths(children);
        if paths.len() < MIN_INPUTS {
            return Err(Error::InvalidArgument(format!(
                "directory {} should have at least {MIN_INPUTS} images",
                dir.display()
            )));
        }

        Ok(Self { paths })
    }

    /// Use an explicit, ordered list of files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if fewer than [`MIN_INPUTS`] paths
    /// exist and carry a valid extension.
    pub fn from_paths<I>(paths: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let paths = filter_paths(paths.into_iter().map(Into::into));
        if paths.len() < MIN_INPUTS {
            return Err(Error::InvalidArgument(format!(
                "need at least {MIN_INPUTS} existing images with one of the extensions {VALID_EXTENSIONS:?}"
            )));
        }

        Ok(Self { paths })
    }

    /// Read newline-separated paths from `list`, or from stdin when `list`
    /// is [`STDIN_LIST`].
    ///
    /// Surrounding whitespace is trimmed and blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputRead`] if the list cannot be read, otherwise the
    /// errors of [`InputSet::from_paths`].
    pub fn from_list_file<P: AsRef<Path>>(list: P) -> Result<Self> {
        let list = list.as_ref();
        let read_err = |source| Error::InputRead {
            path: list.to_path_buf(),
            source,
        };

        let contents = if list == Path::new(STDIN_LIST) {
            let mut lines = Vec::new();
            for line in io::stdin().lock().lines() {
                lines.push(line.map_err(read_err)?);
            }
            lines.join("\n")
        } else {
            std::fs::read_to_string(list).map_err(read_err)?
        };

        Self::from_list(&contents)
    }

    /// Parse newline-separated paths.
    ///
    /// # Errors
    ///
    /// See [`InputSet::from_paths`].
    pub fn from_list(contents: &str) -> Result<Self> {
        Self::from_paths(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Paths in stacking order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false`; kept for symmetry with [`InputSet::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Directory that outputs are written to: the parent of the first input.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        self.paths[0].parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Keep existing regular files with a valid extension, in order.
fn filter_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| {
            if !path.is_file() {
                tracing::debug!("Skipping {}: not a file", path.display());
                return false;
            }
            if !has_valid_extension(path) {
                tracing::debug!("Skipping {}: unsupported extension", path.display());
                return false;
            }
            true
        })
        .collect()
}
