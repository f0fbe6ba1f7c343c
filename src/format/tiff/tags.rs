//! TIFF tag and field type definitions.
//!
//! This module defines the vocabulary for TIFF parsing:
//! - Field types that determine how values are encoded
//! - The closed set of tags this crate resolves

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// Only the types that can appear on the tags we resolve are named here.
/// Entries with other types are still parsed; their raw type code is kept on
/// the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers: numerator then denominator (8 bytes)
    Rational = 5,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Rational => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for types this crate does not name.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            _ => None,
        }
    }
}

// =============================================================================
// TIFF Tags
// =============================================================================

/// TIFF tags recognized by the metadata reader.
///
/// This is the allow-list applied while parsing an IFD: entries whose tag is
/// not listed here are dropped and never reach value resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum TiffTag {
    /// Image width in pixels
    ImageWidth = 256,

    /// Image height (length) in pixels
    ImageLength = 257,

    /// Pixels per resolution unit along the width
    XResolution = 282,

    /// Pixels per resolution unit along the height
    YResolution = 283,
}

impl TiffTag {
    /// Every recognized tag, in numeric order.
    pub const ALL: [TiffTag; 4] = [
        TiffTag::ImageWidth,
        TiffTag::ImageLength,
        TiffTag::XResolution,
        TiffTag::YResolution,
    ];

    /// Look up a tag by its numeric identifier.
    ///
    /// Returns `None` for any tag outside the allow-list.
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            256 => Some(TiffTag::ImageWidth),
            257 => Some(TiffTag::ImageLength),
            282 => Some(TiffTag::XResolution),
            283 => Some(TiffTag::YResolution),
            _ => None,
        }
    }

    /// Numeric tag identifier.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Name used in error messages and logs.
    pub const fn name(self) -> &'static str {
        match self {
            TiffTag::ImageWidth => "ImageWidth",
            TiffTag::ImageLength => "ImageLength",
            TiffTag::XResolution => "XResolution",
            TiffTag::YResolution => "YResolution",
        }
    }
}
