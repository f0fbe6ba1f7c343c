//! TIFF tag value resolution.
//!
//! Dimension tags (SHORT or LONG) are stored inline in their IFD entry, so
//! they resolve from the IFD window already in memory. Resolution tags are
//! RATIONAL, which never fits in the 4-byte value field: the entry holds a
//! file-absolute offset to an 8-byte numerator/denominator pair that needs a
//! separate range read.

use tracing::debug;

use crate::error::TiffError;
use crate::io::RangeReader;

use super::parser::{ByteOrder, IfdEntry, TagTable};
use super::tags::{FieldType, TiffTag};

/// Size of an encoded RATIONAL value
pub const RATIONAL_SIZE: usize = 8;

// =============================================================================
// Rational
// =============================================================================

/// An unsigned TIFF RATIONAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    /// Decode a rational from the first 8 bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if fewer than 8 bytes are given.
    pub fn decode(bytes: &[u8], byte_order: ByteOrder) -> Self {
        Self {
            numerator: byte_order.read_uint(bytes, 0, 4),
            denominator: byte_order.read_uint(bytes, 4, 4),
        }
    }

    /// Quotient as a float.
    ///
    /// Returns `None` for a zero denominator instead of infinity or NaN.
    pub fn to_f64(self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(f64::from(self.numerator) / f64::from(self.denominator))
        }
    }
}

// =============================================================================
// Free-standing resolvers
// =============================================================================

/// Resolve an ImageWidth / ImageLength entry to its pixel count.
///
/// SHORT values are taken from the low 16 bits of the decoded value field.
/// The TIFF spec left-justifies a SHORT in the field, which puts it in the
/// high half for big-endian files; this reader keeps the low-half rule for
/// every byte order. Any other type rereads the 4-byte value field from
/// `ifd_bytes` as a u32.
pub fn resolve_dimension(entry: &IfdEntry, ifd_bytes: &[u8], byte_order: ByteOrder) -> u32 {
    if entry.field_type == FieldType::Short as u16 {
        entry.value_offset & 0xFFFF
    } else {
        byte_order.read_uint(ifd_bytes, entry.value_field_offset(), 4)
    }
}

/// Fetch and decode the rational stored at a file-absolute `offset`.
///
/// # Errors
/// - `Io` if the read fails
/// - `Truncated` if the file ends before the 8-byte value
/// - `MalformedRational` if the denominator is zero
pub async fn resolve_rational<R: RangeReader + ?Sized>(
    reader: &R,
    offset: u32,
    byte_order: ByteOrder,
    tag: TiffTag,
) -> Result<f64, TiffError> {
    let bytes = reader.read_at(u64::from(offset), RATIONAL_SIZE).await?;
    if bytes.len() < RATIONAL_SIZE {
        return Err(TiffError::Truncated {
            required: RATIONAL_SIZE as u64,
            actual: bytes.len() as u64,
        });
    }

    let rational = Rational::decode(&bytes, byte_order);
    debug!(
        tag = tag.name(),
        offset,
        numerator = rational.numerator,
        denominator = rational.denominator,
        "decoded rational"
    );

    rational.to_f64().ok_or(TiffError::MalformedRational {
        tag: tag.name(),
        numerator: rational.numerator,
    })
}

// =============================================================================
// ValueReader
// =============================================================================

/// Resolves tag values for one file.
///
/// Binds the byte source, the file's byte order and the first IFD's window,
/// and checks that each requested tag exists before touching its fields.
pub struct ValueReader<'a, R: RangeReader + ?Sized> {
    reader: &'a R,
    byte_order: ByteOrder,
    ifd_bytes: &'a [u8],
}

impl<'a, R: RangeReader + ?Sized> ValueReader<'a, R> {
    /// Create a new ValueReader.
    pub fn new(reader: &'a R, byte_order: ByteOrder, ifd_bytes: &'a [u8]) -> Self {
        Self {
            reader,
            byte_order,
            ifd_bytes,
        }
    }

    /// Get the byte order.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Resolve a dimension tag (ImageWidth or ImageLength).
    pub fn dimension(&self, table: &TagTable, tag: TiffTag) -> Result<u32, TiffError> {
        let entry = table.require(tag)?;
        Ok(resolve_dimension(entry, self.ifd_bytes, self.byte_order))
    }

    /// Resolve a resolution tag (XResolution or YResolution).
    pub async fn resolution(&self, table: &TagTable, tag: TiffTag) -> Result<f64, TiffError> {
        let entry = table.require(tag)?;
        resolve_rational(self.reader, entry.value_offset, self.byte_order, tag).await
    }
}
