//! End-to-end metadata extraction tests over synthetic TIFF buffers.
//!
//! Tests verify:
//! - Little-endian and big-endian files decode to the same record
//! - SHORT and LONG dimensions resolve correctly
//! - Truncated, malformed and incomplete files fail with the right kind and stage
//! - Only the expected byte ranges are read

use tiff_meta::error::{ErrorKind, IoError, Stage, TiffError};
use tiff_meta::{read_tiff_metadata, ImageMetadata, MemoryRangeReader};

use super::test_utils::{
    reference_tiff, ByteOrderType, Dim, FailingReader, TiffBuilder, TrackingMockReader,
};

const BOTH_ORDERS: [ByteOrderType; 2] = [ByteOrderType::LittleEndian, ByteOrderType::BigEndian];

async fn read(data: Vec<u8>) -> Result<ImageMetadata, tiff_meta::MetadataError> {
    let reader = MemoryRangeReader::new(data, "synthetic.tif");
    read_tiff_metadata(&reader).await
}

// =============================================================================
// Successful Reads
// =============================================================================

#[tokio::test]
async fn test_little_endian_reference_file() {
    let data = reference_tiff(ByteOrderType::LittleEndian);
    assert_eq!(&data[0..2], b"II");

    let metadata = read(data).await.unwrap();
    assert_eq!(metadata, ImageMetadata::new(800, 600, 300.0, 300.0));
}

#[tokio::test]
async fn test_big_endian_matches_little_endian() {
    let le = read(reference_tiff(ByteOrderType::LittleEndian)).await.unwrap();

    let be_data = reference_tiff(ByteOrderType::BigEndian);
    assert_eq!(&be_data[0..2], b"MM");
    let be = read(be_data).await.unwrap();

    assert_eq!(le, be);
}

#[tokio::test]
async fn test_short_dimensions() {
    for order in BOTH_ORDERS {
        let data = TiffBuilder::new(order)
            .width(Some(Dim::Short(1024)))
            .height(Some(Dim::Short(768)))
            .build();

        let metadata = read(data).await.unwrap();
        assert_eq!(metadata.width, 1024);
        assert_eq!(metadata.height, 768);
    }
}

#[tokio::test]
async fn test_long_dimensions_beyond_u16() {
    for order in BOTH_ORDERS {
        let data = TiffBuilder::new(order)
            .width(Some(Dim::Long(100_000)))
            .height(Some(Dim::Long(80_000)))
            .build();

        let metadata = read(data).await.unwrap();
        assert_eq!(metadata.width, 100_000);
        assert_eq!(metadata.height, 80_000);
    }
}

#[tokio::test]
async fn test_left_justified_short_in_big_endian_reads_low_half() {
    // A TIFF 6.0 writer puts a big-endian SHORT in the high half of the
    // value field. The reader always masks the low 16 bits, so this reads 0.
    let data = TiffBuilder::new(ByteOrderType::BigEndian)
        .width(Some(Dim::ShortLeftJustified(640)))
        .build();
    assert_eq!(read(data).await.unwrap().width, 0);

    // Little-endian left-justified placement is the low half already
    let data = TiffBuilder::new(ByteOrderType::LittleEndian)
        .width(Some(Dim::ShortLeftJustified(640)))
        .build();
    assert_eq!(read(data).await.unwrap().width, 640);
}

#[tokio::test]
async fn test_fractional_resolution() {
    for order in BOTH_ORDERS {
        let data = TiffBuilder::new(order)
            .x_resolution(Some((720_000, 10_000)))
            .y_resolution(Some((1, 3)))
            .build();

        let metadata = read(data).await.unwrap();
        assert_eq!(metadata.x_resolution, 72.0);
        assert!((metadata.y_resolution - 1.0 / 3.0).abs() < f64::EPSILON);
    }
}

#[tokio::test]
async fn test_unrelated_tags_are_ignored() {
    for order in BOTH_ORDERS {
        let data = TiffBuilder::new(order)
            .extra_tag(259, 3, 1, 1) // Compression
            .extra_tag(262, 3, 1, 2) // PhotometricInterpretation
            .extra_tag(296, 3, 1, 2) // ResolutionUnit
            .extra_tag(305, 2, 40, 9999) // Software, out-of-line ASCII
            .build();

        let metadata = read(data).await.unwrap();
        assert_eq!(metadata, ImageMetadata::new(800, 600, 300.0, 300.0));
    }
}

// =============================================================================
// Read Pattern
// =============================================================================

#[tokio::test]
async fn test_read_pattern() {
    let builder = TiffBuilder::new(ByteOrderType::LittleEndian);
    let rational_area = u64::from(builder.rational_area_offset());
    let reader = TrackingMockReader::new(builder.build(), "tracked.tif");

    read_tiff_metadata(&reader).await.unwrap();

    assert_eq!(reader.request_count(), 5);
    let mut requests = reader.get_requests().await;

    // Header, entry count and IFD are read in order
    assert_eq!(&requests[..3], &[(0, 8), (8, 2), (8, 54)]);

    // The two rationals are fetched together, in either order
    requests[3..].sort();
    assert_eq!(
        &requests[3..],
        &[(rational_area, 8), (rational_area + 8, 8)]
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_truncated_to_four_bytes() {
    let mut data = reference_tiff(ByteOrderType::LittleEndian);
    data.truncate(4);

    let err = read(data).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    assert_eq!(err.stage, Stage::Header);
}

#[tokio::test]
async fn test_empty_file() {
    let err = read(Vec::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    assert_eq!(err.stage, Stage::Header);
}

#[tokio::test]
async fn test_unknown_byte_order_marker() {
    let mut data = reference_tiff(ByteOrderType::LittleEndian);
    data[0] = b'X';
    data[1] = b'X';

    let err = read(data).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert!(matches!(err.source, TiffError::InvalidMagic(0x5858)));
}

#[tokio::test]
async fn test_wrong_magic_number() {
    let mut data = reference_tiff(ByteOrderType::BigEndian);
    data[3] = 43; // BigTIFF

    let err = read(data).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert!(matches!(err.source, TiffError::InvalidVersion(43)));
}

#[tokio::test]
async fn test_truncated_ifd() {
    for order in BOTH_ORDERS {
        let mut data = reference_tiff(order);
        // Header + count + 3 of 4 entries
        data.truncate(8 + 2 + 3 * 12);

        let err = read(data).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
        assert_eq!(err.stage, Stage::Directory);
    }
}

#[tokio::test]
async fn test_truncated_rational() {
    let mut data = reference_tiff(ByteOrderType::LittleEndian);
    data.truncate(data.len() - 3);

    let err = read(data).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    assert_eq!(err.stage, Stage::Resolution);
}

#[tokio::test]
async fn test_missing_x_resolution() {
    for order in BOTH_ORDERS {
        let data = TiffBuilder::new(order).x_resolution(None).build();

        let result = read(data).await;
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingTag);
        assert_eq!(err.stage, Stage::Resolution);
        assert!(matches!(err.source, TiffError::MissingTag("XResolution")));
    }
}

#[tokio::test]
async fn test_missing_dimensions() {
    let data = TiffBuilder::new(ByteOrderType::LittleEndian)
        .width(None)
        .build();
    let err = read(data).await.unwrap_err();
    assert_eq!(err.stage, Stage::Dimensions);
    assert!(matches!(err.source, TiffError::MissingTag("ImageWidth")));

    let data = TiffBuilder::new(ByteOrderType::BigEndian)
        .height(None)
        .build();
    let err = read(data).await.unwrap_err();
    assert!(matches!(err.source, TiffError::MissingTag("ImageLength")));
}

#[tokio::test]
async fn test_empty_ifd_reports_missing_tag() {
    let data = TiffBuilder::new(ByteOrderType::LittleEndian)
        .width(None)
        .height(None)
        .x_resolution(None)
        .y_resolution(None)
        .build();
    assert_eq!(data.len(), 8 + 6);

    let err = read(data).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTag);
}

#[tokio::test]
async fn test_zero_denominator() {
    for order in BOTH_ORDERS {
        let data = TiffBuilder::new(order).y_resolution(Some((300, 0))).build();

        let err = read(data).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRational);
        assert!(matches!(
            err.source,
            TiffError::MalformedRational {
                tag: "YResolution",
                numerator: 300
            }
        ));
    }
}

#[tokio::test]
async fn test_io_failure_is_not_reinterpreted() {
    let err = read_tiff_metadata(&FailingReader).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.stage, Stage::Header);
    assert!(matches!(err.source, TiffError::Io(IoError::Read { .. })));
}
