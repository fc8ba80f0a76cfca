//! Catalog sources.

mod file;

pub use file::FileCatalogSource;

use async_trait::async_trait;

use crate::domain::catalog::RawSpot;
use crate::domain::ports::CatalogSource;

/// Fixed catalog held in memory; used when no catalog file is configured
/// and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    spots: Vec<RawSpot>,
}

impl StaticCatalogSource {
    #[must_use]
    pub fn new(spots: Vec<RawSpot>) -> Self {
        Self { spots }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> anyhow::Result<Vec<RawSpot>> {
        Ok(self.spots.clone())
    }
}
