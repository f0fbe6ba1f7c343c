//! # tiff-meta
//!
//! Reads pixel dimensions and resolution from TIFF files by parsing the
//! header and first Image File Directory directly, without an image decoder.
//!
//! Only four tags are ever resolved: ImageWidth (256), ImageLength (257),
//! XResolution (282) and YResolution (283). Files are accessed through the
//! [`RangeReader`] trait, so the reader fetches just the few small windows it
//! needs: the header, the IFD, and the two resolution rationals.
//!
//! ## Architecture
//!
//! - [`io`] - byte-range readers (local file, in-memory) and endian helpers
//! - [`mod@format`] - TIFF header, IFD and value parsing
//! - [`scan`] - discovery of TIFF files under a root directory
//! - [`batch`] - parallel extraction over many files
//! - [`report`] - text and JSON rendering of results
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiff_meta::read_tiff_metadata_from_path;
//!
//! #[tokio::main]
//! async fn main() {
//!     match read_tiff_metadata_from_path("scans/page-001.tif").await {
//!         Ok(meta) => println!("{}x{} @ {} dpi", meta.width, meta.height, meta.x_resolution),
//!         Err(e) => eprintln!("{} ({})", e, e.kind()),
//!     }
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod report;
pub mod scan;

// Re-export commonly used types
pub use batch::{extract_all, BatchSummary, FileReport};
pub use config::{Config, OutputFormat};
pub use error::{ErrorKind, IoError, MetadataError, ScanError, Stage, TiffError};
pub use format::tiff::{
    read_tiff_metadata, read_tiff_metadata_from_path, ByteOrder, FieldType, IfdEntry,
    ImageMetadata, Rational, TagTable, TiffHeader, TiffTag, ValueReader,
};
pub use io::{FileRangeReader, MemoryRangeReader, RangeReader};
pub use scan::{discover, ScanOptions};
