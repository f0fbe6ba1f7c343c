//! TIFF header and first-IFD parsing.
//!
//! # TIFF Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes)
//! ```
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:        Entry count N
//! Bytes 2..2+N*12:  N entries of 12 bytes each
//!                   (2 tag + 2 type + 4 count + 4 value/offset)
//! Last 4 bytes:     Offset of the next IFD (never followed here)
//! ```

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::TiffError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_uint_be, read_uint_le};

use super::tags::{FieldType, TiffTag};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of the entry count field at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of one IFD entry
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the next-IFD offset at the end of an IFD
pub const IFD_NEXT_OFFSET_SIZE: usize = 4;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF file.
///
/// TIFF files declare their byte order in the first two bytes of the header.
/// All multi-byte values in the file must be read respecting this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read a `length`-byte unsigned integer (1 to 4) at `offset`.
    ///
    /// # Panics
    /// Panics if `length` is outside 1..=4 or the window runs past the end of
    /// `bytes`. Callers size their windows before decoding, so either case is
    /// a bug in the caller.
    #[inline]
    pub fn read_uint(self, bytes: &[u8], offset: usize, length: usize) -> u32 {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= bytes.len())
            .unwrap_or_else(|| {
                panic!(
                    "read of {length} bytes at offset {offset} exceeds buffer of {} bytes",
                    bytes.len()
                )
            });
        let window = &bytes[offset..end];
        match self {
            ByteOrder::LittleEndian => read_uint_le(window),
            ByteOrder::BigEndian => read_uint_be(window),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the file
    pub byte_order: ByteOrder,

    /// Offset to the first IFD in the file
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from raw bytes.
    ///
    /// Only the first 8 bytes are inspected; extra bytes are ignored.
    ///
    /// # Errors
    /// - `Truncated` if fewer than 8 bytes are available
    /// - `InvalidMagic` if byte order bytes are not II or MM
    /// - `InvalidVersion` if version is not 42
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::Truncated {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        // Read as little-endian: we're matching fixed byte patterns here
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidMagic(magic)),
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(TiffError::InvalidVersion(version));
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]);

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// IFD
// =============================================================================

/// Read the entry count at the start of an IFD.
///
/// # Errors
/// `Truncated` if fewer than 2 bytes are available.
pub fn parse_entry_count(bytes: &[u8], byte_order: ByteOrder) -> Result<u16, TiffError> {
    if bytes.len() < IFD_COUNT_SIZE {
        return Err(TiffError::Truncated {
            required: IFD_COUNT_SIZE as u64,
            actual: bytes.len() as u64,
        });
    }
    Ok(byte_order.read_u16(&bytes[..IFD_COUNT_SIZE]))
}

/// Total size of an IFD with `entry_count` entries, including the entry
/// count and the trailing next-IFD offset.
#[inline]
pub const fn ifd_size(entry_count: u16) -> usize {
    IFD_COUNT_SIZE + entry_count as usize * IFD_ENTRY_SIZE + IFD_NEXT_OFFSET_SIZE
}

/// A single recognized IFD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag identifying this entry
    pub tag: TiffTag,

    /// Raw field type code
    pub field_type: u16,

    /// Number of values
    pub count: u32,

    /// Value/offset field decoded as a u32 under the file's byte order
    pub value_offset: u32,

    /// Byte offset of this entry within the IFD window
    pub entry_offset: usize,
}

impl IfdEntry {
    /// Field type, if it is one this crate names.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.field_type)
    }

    /// Offset of the raw 4-byte value field within the IFD window.
    #[inline]
    pub const fn value_field_offset(&self) -> usize {
        self.entry_offset + 8
    }
}

/// Recognized entries of the first IFD, keyed by tag.
///
/// Only tags in the [`TiffTag`] allow-list can be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    entries: BTreeMap<TiffTag, IfdEntry>,
}

impl TagTable {
    /// Parse an IFD window.
    ///
    /// `bytes` must start at the IFD's entry count. Unrecognized tags are
    /// dropped. If a recognized tag repeats, the later entry wins.
    ///
    /// # Errors
    /// `Truncated` if the window is shorter than `2 + N*12 + 4` bytes.
    pub fn parse(bytes: &[u8], byte_order: ByteOrder) -> Result<Self, TiffError> {
        let entry_count = parse_entry_count(bytes, byte_order)?;
        let required = ifd_size(entry_count);
        if bytes.len() < required {
            return Err(TiffError::Truncated {
                required: required as u64,
                actual: bytes.len() as u64,
            });
        }

        let mut entries = BTreeMap::new();
        for i in 0..entry_count as usize {
            let entry_offset = IFD_COUNT_SIZE + i * IFD_ENTRY_SIZE;
            let tag_raw = byte_order.read_uint(bytes, entry_offset, 2) as u16;

            let Some(tag) = TiffTag::from_u16(tag_raw) else {
                trace!(tag = tag_raw, "skipping unrecognized tag");
                continue;
            };

            let entry = IfdEntry {
                tag,
                field_type: byte_order.read_uint(bytes, entry_offset + 2, 2) as u16,
                count: byte_order.read_uint(bytes, entry_offset + 4, 4),
                value_offset: byte_order.read_uint(bytes, entry_offset + 8, 4),
                entry_offset,
            };
            entries.insert(tag, entry);
        }

        Ok(Self { entries })
    }

    /// Get the entry for a tag, if present.
    #[inline]
    pub fn get(&self, tag: TiffTag) -> Option<&IfdEntry> {
        self.entries.get(&tag)
    }

    /// Get the entry for a tag, failing with `MissingTag` when absent.
    pub fn require(&self, tag: TiffTag) -> Result<&IfdEntry, TiffError> {
        self.get(tag).ok_or(TiffError::MissingTag(tag.name()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = &IfdEntry> {
        self.entries.values()
    }
}

// =============================================================================
// Tests
// =============================================================================
