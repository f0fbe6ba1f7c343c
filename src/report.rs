//! Rendering of per-file results.

use std::path::Path;

use serde::Serialize;

use crate::batch::FileReport;
use crate::error::MetadataError;
use crate::format::tiff::ImageMetadata;

/// File name used in report lines, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Text line for a successful read.
pub fn metadata_line(name: &str, metadata: &ImageMetadata) -> String {
    format!(
        "File: {}, Width: {}, Height: {}, DPI X: {}, DPI Y: {}",
        name, metadata.width, metadata.height, metadata.x_resolution, metadata.y_resolution
    )
}

/// Text line for a failed read.
pub fn error_line(name: &str, err: &MetadataError) -> String {
    format!("Error reading metadata for file {}: {}", name, err.source)
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    file: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a ImageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Serialize)]
struct JsonError {
    kind: &'static str,
    stage: String,
    message: String,
}

/// One-line JSON object for a report, success or failure.
pub fn json_line(report: &FileReport) -> serde_json::Result<String> {
    let (metadata, error) = match &report.outcome {
        Ok(metadata) => (Some(metadata), None),
        Err(err) => (
            None,
            Some(JsonError {
                kind: err.kind().as_str(),
                stage: err.stage.to_string(),
                message: err.source.to_string(),
            }),
        ),
    };

    serde_json::to_string(&JsonRecord {
        file: display_name(&report.path),
        path: report.path.display().to_string(),
        metadata,
        error,
    })
}
