use crate::constants::MAX_FILE_SIZE;
use crate::error::{CompressionError, Result};
use image::ImageFormat;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A user-selected image, held in memory.
///
/// Cloning is cheap: the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads an image file from disk, the way a file picker would hand it over.
    ///
    /// # Returns
    /// * `Ok(SourceFile)` named after the path's file name
    /// * `Err(CompressionError)` if the path is missing, not a file, or larger than `MAX_FILE_SIZE`
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        // Check file size before reading to avoid loading huge files
        if metadata.len() > MAX_FILE_SIZE {
            return Err(CompressionError::FileTooLarge(metadata.len(), MAX_FILE_SIZE));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = fs::read(path)?;

        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// MIME type sniffed from the content, if it is a known image format
    pub fn mime_type(&self) -> &'static str {
        image::guess_format(&self.bytes)
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream")
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Output of a compression run
#[derive(Clone, PartialEq, Eq)]
pub struct CompressedFile {
    bytes: Arc<[u8]>,
    format: ImageFormat,
}

impl CompressedFile {
    pub fn new(bytes: impl Into<Arc<[u8]>>, format: ImageFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

impl fmt::Debug for CompressedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedFile")
            .field("format", &self.format)
            .field("size", &self.bytes.len())
            .finish()
    }
}
