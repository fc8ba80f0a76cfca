use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spot_discovery_sdk::models::FavoriteItem;

use crate::domain::ports::{FavoritesRepository, FavoritesSlots};

use super::KvStorage;

/// Stored shape of a favorite: a JSON array of these under one key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

impl From<FavoriteRecord> for FavoriteItem {
    fn from(r: FavoriteRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            category: r.category,
            thumbnail_url: r.thumbnail_url,
        }
    }
}

impl From<&FavoriteItem> for FavoriteRecord {
    fn from(f: &FavoriteItem) -> Self {
        Self {
            id: f.id.clone(),
            name: f.name.clone(),
            category: f.category.clone(),
            thumbnail_url: f.thumbnail_url.clone(),
        }
    }
}

/// Favorites kept as one JSON document in a key-value slot.
pub struct KvFavoritesRepository {
    kv: Arc<dyn KvStorage>,
    key: String,
}

impl KvFavoritesRepository {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStorage>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }
}

#[async_trait]
impl FavoritesRepository for KvFavoritesRepository {
    async fn load_all(&self) -> anyhow::Result<Vec<FavoriteItem>> {
        let Some(raw) = self.kv.read(&self.key).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<FavoriteRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("malformed favorites under '{}'", self.key))?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn save_all(&self, items: &[FavoriteItem]) -> anyhow::Result<()> {
        let records: Vec<FavoriteRecord> = items.iter().map(Into::into).collect();
        let json = serde_json::to_string(&records).context("failed to encode favorites")?;
        self.kv.write(&self.key, &json).await
    }
}

/// One key-value slot per profile: `<key>` for anonymous callers,
/// `<key>-<profile>` otherwise.
pub struct KvFavoritesSlots {
    kv: Arc<dyn KvStorage>,
    key: String,
}

impl KvFavoritesSlots {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStorage>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    fn slot_key(&self, profile: Option<&str>) -> String {
        match profile {
            None => self.key.clone(),
            Some(profile) => format!("{}-{}", self.key, encode_profile(profile)),
        }
    }
}

impl FavoritesSlots for KvFavoritesSlots {
    fn slot(&self, profile: Option<&str>) -> Arc<dyn FavoritesRepository> {
        Arc::new(KvFavoritesRepository::new(
            self.kv.clone(),
            self.slot_key(profile),
        ))
    }
}

/// Key-safe, injective form of a profile id: ASCII letters, digits and `-`
/// pass through, anything else becomes `_<hex>_`.
fn encode_profile(profile: &str) -> String {
    profile
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_string()
            } else {
                format!("_{:x}_", u32::from(c))
            }
        })
        .collect()
}
