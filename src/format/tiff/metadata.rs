//! Image metadata extraction.
//!
//! [`read_tiff_metadata`] drives the whole pipeline for one file:
//!
//! 1. Read and validate the 8-byte header (byte order, magic 42, IFD offset)
//! 2. Read the 2-byte entry count at the IFD offset
//! 3. Read the full IFD window and keep the recognized entries
//! 4. Resolve width and height from the window
//! 5. Fetch XResolution and YResolution concurrently
//!
//! Any failure stops the pipeline; a partial record is never returned.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{MetadataError, Stage, TiffError};
use crate::io::{FileRangeReader, RangeReader};

use super::parser::{
    ifd_size, parse_entry_count, TagTable, TiffHeader, IFD_COUNT_SIZE, TIFF_HEADER_SIZE,
};
use super::tags::TiffTag;
use super::values::ValueReader;

/// Dimensions and resolution of a TIFF image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageMetadata {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Horizontal resolution, pixels per resolution unit
    pub x_resolution: f64,

    /// Vertical resolution, pixels per resolution unit
    pub y_resolution: f64,
}

impl ImageMetadata {
    pub fn new(width: u32, height: u32, x_resolution: f64, y_resolution: f64) -> Self {
        Self {
            width,
            height,
            x_resolution,
            y_resolution,
        }
    }
}

/// Read width, height and resolution from a TIFF byte source.
///
/// Only the header and the first IFD are consulted.
pub async fn read_tiff_metadata<R: RangeReader + ?Sized>(
    reader: &R,
) -> Result<ImageMetadata, MetadataError> {
    let identifier = reader.identifier();
    let at = |stage: Stage| {
        move |source: TiffError| MetadataError::new(identifier, stage, source)
    };

    // Header
    let header_bytes = reader
        .read_at(0, TIFF_HEADER_SIZE)
        .await
        .map_err(|e| at(Stage::Header)(e.into()))?;
    let header = TiffHeader::parse(&header_bytes).map_err(at(Stage::Header))?;
    let byte_order = header.byte_order;
    let ifd_offset = u64::from(header.first_ifd_offset);
    debug!(file = identifier, ?byte_order, ifd_offset, "parsed TIFF header");

    // Entry count
    let count_bytes = reader
        .read_at(ifd_offset, IFD_COUNT_SIZE)
        .await
        .map_err(|e| at(Stage::EntryCount)(e.into()))?;
    let entry_count =
        parse_entry_count(&count_bytes, byte_order).map_err(at(Stage::EntryCount))?;

    // Directory
    let ifd_bytes = reader
        .read_at(ifd_offset, ifd_size(entry_count))
        .await
        .map_err(|e| at(Stage::Directory)(e.into()))?;
    let table = TagTable::parse(&ifd_bytes, byte_order).map_err(at(Stage::Directory))?;
    debug!(
        file = identifier,
        entry_count,
        recognized = table.len(),
        "parsed first IFD"
    );

    let values = ValueReader::new(reader, byte_order, &ifd_bytes);

    // Dimensions
    let width = values
        .dimension(&table, TiffTag::ImageWidth)
        .map_err(at(Stage::Dimensions))?;
    let height = values
        .dimension(&table, TiffTag::ImageLength)
        .map_err(at(Stage::Dimensions))?;

    // Resolution: the two reads are independent
    let (x_resolution, y_resolution) = tokio::try_join!(
        values.resolution(&table, TiffTag::XResolution),
        values.resolution(&table, TiffTag::YResolution),
    )
    .map_err(at(Stage::Resolution))?;

    Ok(ImageMetadata::new(width, height, x_resolution, y_resolution))
}

/// Open a local file and read its metadata.
pub async fn read_tiff_metadata_from_path(
    path: impl AsRef<Path>,
) -> Result<ImageMetadata, MetadataError> {
    let path = path.as_ref();
    let reader = FileRangeReader::open(path).await.map_err(|e| {
        MetadataError::new(path.display().to_string(), Stage::Open, e.into())
    })?;
    read_tiff_metadata(&reader).await
}
