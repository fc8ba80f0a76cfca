//! Outbound ports implemented by the infrastructure layer.

use std::sync::Arc;

use async_trait::async_trait;
use spot_discovery_sdk::models::FavoriteItem;

use super::catalog::RawSpot;

/// Supplies the full catalog as one snapshot per load.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Vec<RawSpot>>;
}

/// Durable slot for the favorites collection.
///
/// `save_all` overwrites the whole collection; there are no partial writes.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Empty when nothing was ever saved. Corrupt data is an error.
    async fn load_all(&self) -> anyhow::Result<Vec<FavoriteItem>>;

    async fn save_all(&self, items: &[FavoriteItem]) -> anyhow::Result<()>;
}

/// Hands out the favorites slot of a profile. `None` is the shared slot used
/// by anonymous callers.
pub trait FavoritesSlots: Send + Sync {
    fn slot(&self, profile: Option<&str>) -> Arc<dyn FavoritesRepository>;
}
