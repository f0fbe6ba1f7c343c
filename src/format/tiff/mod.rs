//! TIFF metadata reader.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF files declare their endianness (II = little-endian, MM = big-endian)
//!   in the header. All multi-byte values must be read respecting this order.
//!
//! - **IFD (Image File Directory)**: A list of 12-byte tagged entries. Only the first IFD
//!   is read, and only ImageWidth, ImageLength, XResolution and YResolution are kept.
//!
//! - **Inline vs offset values**: SHORT and LONG dimensions live inside the entry's
//!   4-byte value field. RATIONAL resolutions are 8 bytes and always live at an offset.

mod metadata;
mod parser;
mod tags;
mod values;

pub use metadata::{read_tiff_metadata, read_tiff_metadata_from_path, ImageMetadata};
pub use parser::{
    ifd_size, parse_entry_count, ByteOrder, IfdEntry, TagTable, TiffHeader, IFD_COUNT_SIZE,
    IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE, TIFF_HEADER_SIZE,
};
pub use tags::{FieldType, TiffTag};
pub use values::{resolve_dimension, resolve_rational, Rational, ValueReader, RATIONAL_SIZE};
