//! Configuration management for tiff-meta.
//!
//! Settings come from command-line arguments via clap, with environment
//! variable fallbacks using the `TIFF_META_` prefix:
//!
//! - `TIFF_META_ROOT` - Root directory to scan (required)
//! - `TIFF_META_EXTENSION` - File extension to match (default: tif)
//! - `TIFF_META_RECURSIVE` - Walk the whole tree (default: false)
//! - `TIFF_META_CONCURRENCY` - Files read in parallel (default: 8)
//! - `TIFF_META_FORMAT` - Output format, `text` or `json` (default: text)
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use tiff_meta::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! println!("Scanning {}", config.root.display());
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::scan::ScanOptions;

// =============================================================================
// Default Values
// =============================================================================

/// Default file extension to match.
pub const DEFAULT_EXTENSION: &str = "tif";

/// Default number of files read in parallel.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Upper bound on parallel reads.
pub const MAX_CONCURRENCY: usize = 1024;

// =============================================================================
// Output Format
// =============================================================================

/// How per-file results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per file; failures go to the log
    #[default]
    Text,
    /// One JSON object per line, failures included
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// tiff-meta - Print pixel dimensions and DPI of TIFF files.
///
/// Looks for TIFF files under ROOT and reads width, height and resolution
/// straight from each file's header and first IFD.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiff-meta")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Root directory to scan.
    ///
    /// Without --recursive, only files directly inside ROOT's immediate
    /// subdirectories are read.
    #[arg(env = "TIFF_META_ROOT")]
    pub root: PathBuf,

    /// File extension to match, case-insensitively (leading dot optional).
    #[arg(long, default_value = DEFAULT_EXTENSION, env = "TIFF_META_EXTENSION")]
    pub extension: String,

    /// Walk the whole directory tree below ROOT.
    #[arg(short, long, default_value_t = false, env = "TIFF_META_RECURSIVE")]
    pub recursive: bool,

    /// Maximum number of files read in parallel.
    #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY, env = "TIFF_META_CONCURRENCY")]
    pub concurrency: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "TIFF_META_FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        let extension = self.normalized_extension();
        if extension.is_empty() {
            return Err("extension must not be empty".to_string());
        }
        if extension.contains(['/', '\\', '.']) {
            return Err(format!(
                "extension must be a single suffix like 'tif', got '{}'",
                self.extension
            ));
        }

        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(format!(
                "concurrency must be between 1 and {}",
                MAX_CONCURRENCY
            ));
        }

        Ok(())
    }

    /// Extension without a leading dot, lowercased.
    pub fn normalized_extension(&self) -> String {
        self.extension
            .trim()
            .trim_start_matches('.')
            .to_ascii_lowercase()
    }

    /// Discovery options derived from this configuration.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extension: self.normalized_extension(),
            recursive: self.recursive,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
