use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::RangeReader;
use crate::error::IoError;

/// Local-file implementation of RangeReader.
///
/// The file size is read once on creation. Every range read opens its own
/// handle, so concurrent reads against the same file do not contend on a
/// shared cursor, and each handle is closed as soon as the read completes,
/// fails, or its future is dropped.
#[derive(Debug, Clone)]
pub struct FileRangeReader {
    path: PathBuf,
    size: u64,
    identifier: String,
}

impl FileRangeReader {
    /// Create a new FileRangeReader for the given path.
    ///
    /// Returns an error if the file does not exist or is inaccessible.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref().to_path_buf();
        let identifier = path.display().to_string();

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| IoError::from_std(&identifier, &e))?;

        if !metadata.is_file() {
            return Err(IoError::Read {
                identifier,
                message: "not a regular file".to_string(),
            });
        }

        Ok(Self {
            path,
            size: metadata.len(),
            identifier,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RangeReader for FileRangeReader {
    async fn read_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        if len == 0 || offset >= self.size {
            return Ok(Bytes::new());
        }

        let map_err = |e: std::io::Error| IoError::from_std(&self.identifier, &e);

        let mut file = File::open(&self.path).await.map_err(map_err)?;
        file.seek(SeekFrom::Start(offset)).await.map_err(map_err)?;

        // read_to_end keeps pulling chunks until `len` bytes or EOF
        let mut buf = Vec::with_capacity(len);
        file.take(len as u64)
            .read_to_end(&mut buf)
            .await
            .map_err(map_err)?;

        Ok(Bytes::from(buf))
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
