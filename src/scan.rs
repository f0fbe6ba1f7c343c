//! Discovery of TIFF files under a root directory.
//!
//! The default layout is one level of grouping folders below the root:
//!
//! ```text
//! root/
//! ├── batch-01/
//! │   ├── page-001.tif   <- read
//! │   └── notes.txt
//! ├── batch-02/
//! │   └── page-002.TIF   <- read
//! └── stray.tif          <- ignored unless recursive
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::ScanError;

/// Depth of files inside the root's immediate subdirectories.
const GROUPED_FILE_DEPTH: usize = 2;

/// What to look for while walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extension without the leading dot, compared case-insensitively
    pub extension: String,

    /// Walk the whole tree instead of only the immediate subdirectories
    pub recursive: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: crate::config::DEFAULT_EXTENSION.to_string(),
            recursive: false,
        }
    }
}

/// Collect matching files under `root`, sorted by path.
///
/// Unreadable entries below the root are logged and skipped so that one bad
/// folder does not hide the rest of the tree.
pub fn discover(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let walker = if options.recursive {
        WalkDir::new(root).min_depth(1)
    } else {
        WalkDir::new(root)
            .min_depth(GROUPED_FILE_DEPTH)
            .max_depth(GROUPED_FILE_DEPTH)
    };

    let mut files = Vec::new();
    for entry in walker.sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(ScanError::Walk {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), &options.extension) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(
        root = %root.display(),
        count = files.len(),
        "discovered files"
    );
    Ok(files)
}

/// Whether `path` ends in `.{extension}`, ignoring ASCII case.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
