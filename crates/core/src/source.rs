//! Document source abstraction.
//!
//! The importer only needs "read the whole document as text". The
//! [`DocumentSource`] trait abstracts where that text comes from so the same
//! pipeline serves local files, upload bodies and tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Extensions accepted by [`has_interchange_extension`], lower case.
pub const INTERCHANGE_EXTENSIONS: &[&str] = &["ged", "gedcom"];

/// Anything that can hand over the full contents of one document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Read the entire document. Bytes that are not valid UTF-8 are an
    /// `InvalidData` error.
    async fn read_text(&self) -> Result<String, std::io::Error>;

    /// Human-readable name for logs.
    fn describe(&self) -> String;
}

/// Filesystem-backed source.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn read_text(&self) -> Result<String, std::io::Error> {
        let bytes = tokio::fs::read(&self.path).await?;
        decode(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory source for upload bodies and testing.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn read_text(&self) -> Result<String, std::io::Error> {
        decode(self.bytes.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

fn decode(bytes: Vec<u8>) -> Result<String, std::io::Error> {
    String::from_utf8(bytes).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("document is not valid UTF-8 text: {}", e),
        )
    })
}

/// Whether `path` ends in `.ged` or `.gedcom`, ignoring case.
pub fn has_interchange_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            INTERCHANGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interchange_extensions_ignore_case() {
        assert!(has_interchange_extension(Path::new("tree.ged")));
        assert!(has_interchange_extension(Path::new("/a/b/Tree.GEDCOM")));
        assert!(!has_interchange_extension(Path::new("tree.txt")));
        assert!(!has_interchange_extension(Path::new("ged")));
        assert!(!has_interchange_extension(Path::new("tree.ged.bak")));
    }

    #[tokio::test]
    async fn in_memory_read_text() {
        let source = InMemorySource::new("upload.ged", "0 HEAD\n");
        assert_eq!(source.read_text().await.unwrap(), "0 HEAD\n");
        assert_eq!(source.describe(), "upload.ged");
    }

    #[tokio::test]
    async fn in_memory_rejects_invalid_utf8() {
        let source = InMemorySource::new("bad.ged", vec![0x30, 0x20, 0xff, 0xfe]);
        let err = source.read_text().await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let source = FileSource::new("/definitely/not/here.ged");
        let err = source.read_text().await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
