//! Binary format parsers.
//!
//! Only classic TIFF is supported, and only far enough to read image
//! dimensions and resolution from the first IFD.

pub mod tiff;
