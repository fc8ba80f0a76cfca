use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

use crate::domain::catalog::{RawSpot, records_from_document};
use crate::domain::ports::CatalogSource;

/// JSON catalog document on the local filesystem, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> anyhow::Result<Vec<RawSpot>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read catalog {}", self.path.display()))?;

        let doc: serde_json::Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("malformed catalog {}", self.path.display()))?;

        records_from_document(doc)
            .with_context(|| format!("malformed catalog {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_bare_array() {
        let file = write_temp(r#"[{"id": "a", "name": "A"}, {"id": 7, "name": "B"}]"#);
        let spots = FileCatalogSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(spots.len(), 2);
    }

    #[tokio::test]
    async fn reads_wrapped_document() {
        let file = write_temp(r#"{"spots": [{"name": "A", "tags": "x,y"}]}"#);
        let spots = FileCatalogSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(spots.len(), 1);
    }

    #[tokio::test]
    async fn odd_records_do_not_sink_the_catalog() {
        let file = write_temp(
            r#"[{"id": "a", "name": "A"}, {"id": "b", "name": "B", "tags": ["y", 3]}, {"id": "c", "name": "C", "phone": 1234}]"#,
        );
        let spots = FileCatalogSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(spots.len(), 3);
        assert_eq!(spots[2].phone.as_deref(), Some("1234"));
    }

    #[tokio::test]
    async fn malformed_document_is_an_error() {
        let file = write_temp("{not json");
        let err = FileCatalogSource::new(file.path()).fetch().await.unwrap_err();
        assert!(err.to_string().contains("malformed catalog"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("absent.json"));
        assert!(source.fetch().await.is_err());
    }
}
