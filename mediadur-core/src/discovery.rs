//! File discovery module for finding media files to probe.
//!
//! Inputs may be files or folders. Files are passed through when their
//! extension is recognised (case-insensitive) or when `allow_all` is set.
//! Folders contribute their immediate children, or every file beneath them
//! when `recurse` is set. Folders themselves are never yielded.
//!
//! Discovery is lazy: paths are produced one at a time in directory-listing
//! order, so callers needing a stable order must sort downstream.

use crate::config::MEDIA_FILE_EXTENSIONS;
use crate::error::CoreError;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One path or a list of paths given to discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPaths {
    Single(PathBuf),
    List(Vec<PathBuf>),
}

impl InputPaths {
    /// Flattens the input into the list of paths to visit, in order.
    pub fn paths(self) -> Vec<PathBuf> {
        match self {
            InputPaths::Single(path) => vec![path],
            InputPaths::List(paths) => paths,
        }
    }
}

impl From<PathBuf> for InputPaths {
    fn from(path: PathBuf) -> Self {
        InputPaths::Single(path)
    }
}

impl From<&Path> for InputPaths {
    fn from(path: &Path) -> Self {
        InputPaths::Single(path.to_path_buf())
    }
}

impl From<&str> for InputPaths {
    fn from(path: &str) -> Self {
        InputPaths::Single(PathBuf::from(path))
    }
}

impl From<Vec<PathBuf>> for InputPaths {
    fn from(paths: Vec<PathBuf>) -> Self {
        InputPaths::List(paths)
    }
}

impl From<Vec<&str>> for InputPaths {
    fn from(paths: Vec<&str>) -> Self {
        InputPaths::List(paths.into_iter().map(PathBuf::from).collect())
    }
}

/// Returns true if the path's extension is one of [`MEDIA_FILE_EXTENSIONS`].
#[must_use]
pub fn has_media_file_extension(path: &Path) -> bool {
    has_extension_in(path, MEDIA_FILE_EXTENSIONS)
}

/// Returns true if the path's extension matches one of `extensions`, ignoring case.
#[must_use]
pub fn has_extension_in<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| {
            extensions
                .iter()
                .any(|known| known.as_ref().eq_ignore_ascii_case(ext_str))
        })
        .unwrap_or(false)
}

/// Decides which files discovery yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFilter {
    extensions: Vec<String>,
    allow_all: bool,
}

impl MediaFilter {
    pub fn new(extensions: Vec<String>, allow_all: bool) -> Self {
        Self {
            extensions,
            allow_all,
        }
    }

    /// True when `allow_all` is set or the extension is in the list.
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        self.allow_all || has_extension_in(path, &self.extensions)
    }
}

/// Discovers media files under `inputs` using the built-in extension list.
///
/// # Examples
///
/// ```rust,no_run
/// use mediadur_core::discover_media_files;
///
/// for path in discover_media_files("/path/to/footage", false, true) {
///     println!("{}", path.display());
/// }
/// ```
pub fn discover_media_files(
    inputs: impl Into<InputPaths>,
    allow_all: bool,
    recurse: bool,
) -> MediaFiles {
    let extensions = MEDIA_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    discover_media_files_with(inputs, extensions, allow_all, recurse)
}

/// Discovers media files under `inputs`, matching against `extensions`.
pub fn discover_media_files_with(
    inputs: impl Into<InputPaths>,
    extensions: Vec<String>,
    allow_all: bool,
    recurse: bool,
) -> MediaFiles {
    MediaFiles {
        pending: inputs.into().paths().into_iter(),
        walker: None,
        filter: MediaFilter::new(extensions, allow_all),
        recurse,
    }
}

/// Lazy iterator over discovered media file paths.
pub struct MediaFiles {
    pending: std::vec::IntoIter<PathBuf>,
    walker: Option<walkdir::IntoIter>,
    filter: MediaFilter,
    recurse: bool,
}

impl MediaFiles {
    fn next_from_walker(&mut self) -> Option<PathBuf> {
        let walker = self.walker.as_mut()?;
        for entry in walker.by_ref() {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.into_path();
                    if self.filter.accepts(&path) {
                        return Some(path);
                    }
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_default();
                    let err = CoreError::Discovery { path, source: err };
                    log::warn!("{err}");
                }
            }
        }
        self.walker = None;
        None
    }
}

impl Iterator for MediaFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(path) = self.next_from_walker() {
                return Some(path);
            }

            let input = self.pending.next()?;
            if input.is_file() {
                if self.filter.accepts(&input) {
                    return Some(input);
                }
                log::debug!("Ignoring non-media file: {}", input.display());
            } else if input.is_dir() {
                let max_depth = if self.recurse { usize::MAX } else { 1 };
                self.walker = Some(
                    WalkDir::new(&input)
                        .min_depth(1)
                        .max_depth(max_depth)
                        .follow_links(true)
                        .into_iter(),
                );
            } else {
                log::debug!("Input path does not exist: {}", input.display());
            }
        }
    }
}
