use async_trait::async_trait;
use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from a file-like resource.
///
/// The TIFF reader only ever needs a handful of small windows from a file
/// (header, IFD, two rationals), so it works against this abstraction rather
/// than loading whole files. Implementations must be thread-safe.
#[async_trait]
pub trait RangeReader: Send + Sync {
    /// Read up to `len` bytes starting at `offset`.
    ///
    /// The result is shorter than `len` only when the resource ends before
    /// `offset + len`, and empty when `offset` is at or past the end. Callers
    /// decide whether a short window is an error.
    async fn read_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the resource in bytes.
    fn size(&self) -> u64;

    /// Get a unique identifier for this resource (for logging and error context).
    fn identifier(&self) -> &str;
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// TIFF files can be either little-endian or big-endian, determined by the
// marker at the start of the file. These helpers back `ByteOrder`.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian unsigned integer of 1 to 4 bytes.
///
/// # Panics
/// Panics if the slice is empty or longer than 4 bytes.
#[inline]
pub fn read_uint_le(bytes: &[u8]) -> u32 {
    assert!(
        (1..=4).contains(&bytes.len()),
        "unsigned read width must be 1-4 bytes, got {}",
        bytes.len()
    );
    bytes
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Read a big-endian unsigned integer of 1 to 4 bytes.
///
/// # Panics
/// Panics if the slice is empty or longer than 4 bytes.
#[inline]
pub fn read_uint_be(bytes: &[u8]) -> u32 {
    assert!(
        (1..=4).contains(&bytes.len()),
        "unsigned read width must be 1-4 bytes, got {}",
        bytes.len()
    );
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}
