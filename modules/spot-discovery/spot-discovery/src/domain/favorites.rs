//! Favorites store: a durable local set of favorited spot summaries.
//!
//! Each profile owns its own set. Signed-in callers are keyed by user id;
//! anonymous callers share the default slot.
//!
//! Memory and storage are reconciled on `load` and after every `toggle`.
//! Toggles are optimistic: a failed write is logged and reported, and the
//! in-memory change stays.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use spot_discovery_sdk::models::{FavoriteItem, ToggleOutcome};
use spot_discovery_sdk::session::SessionContext;
use tokio::sync::Mutex;

use super::error::DomainError;
use super::fields::FavoriteFields;
use super::ports::{FavoritesRepository, FavoritesSlots};

pub struct FavoritesStore {
    repo: Arc<dyn FavoritesRepository>,
    // Held across the write so snapshots reach storage in toggle order.
    items: Mutex<Vec<FavoriteItem>>,
}

fn canonical_id(id: &str) -> Option<String> {
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_owned())
}

impl FavoritesStore {
    #[must_use]
    pub fn new(repo: Arc<dyn FavoritesRepository>) -> Self {
        Self {
            repo,
            items: Mutex::new(Vec::new()),
        }
    }

    /// Replace the in-memory set with the persisted one.
    ///
    /// Unreadable or corrupt data yields an empty set.
    #[tracing::instrument(skip_all)]
    pub async fn load(&self) -> Vec<FavoriteItem> {
        let stored = match self.repo.load_all().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favorites; starting empty");
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let loaded: Vec<FavoriteItem> = stored
            .into_iter()
            .filter_map(|item| {
                let id = canonical_id(&item.id)?;
                seen.insert(id.clone())
                    .then_some(FavoriteItem { id, ..item })
            })
            .collect();

        tracing::debug!(count = loaded.len(), "favorites loaded");
        let mut items = self.items.lock().await;
        items.clone_from(&loaded);
        loaded
    }

    pub async fn list(&self) -> Vec<FavoriteItem> {
        self.items.lock().await.clone()
    }

    pub async fn is_favorite(&self, id: Option<&str>) -> bool {
        let Some(id) = id.and_then(canonical_id) else {
            return false;
        };
        self.items.lock().await.iter().any(|f| f.id == id)
    }

    /// Remove the entry with `item.id` if present, otherwise add `item`.
    ///
    /// # Errors
    /// Returns `DomainError::Validation` when the item has no id; nothing is
    /// changed in that case.
    #[tracing::instrument(skip_all, fields(id = %item.id))]
    pub async fn toggle(&self, item: FavoriteItem) -> Result<ToggleOutcome, DomainError> {
        let id = canonical_id(&item.id).ok_or_else(|| {
            DomainError::validation(FavoriteFields::ID, "spot has no id and cannot be favorited")
        })?;

        let mut items = self.items.lock().await;
        let is_favorite = if let Some(pos) = items.iter().position(|f| f.id == id) {
            items.remove(pos);
            false
        } else {
            items.push(FavoriteItem { id, ..item });
            true
        };

        let persisted = match self.repo.save_all(&items).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist favorites; keeping in-memory state");
                false
            }
        };

        Ok(ToggleOutcome {
            favorites: items.clone(),
            is_favorite,
            persisted,
        })
    }
}

/// Profile key of a session; `None` for anonymous callers.
fn profile_of(ctx: &SessionContext) -> Option<String> {
    if ctx.is_anonymous() {
        return None;
    }
    ctx.user_id()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
}

/// Per-profile favorites stores, each loaded from its slot on first use.
pub struct FavoritesRegistry {
    slots: Arc<dyn FavoritesSlots>,
    stores: Mutex<HashMap<Option<String>, Arc<FavoritesStore>>>,
}

impl FavoritesRegistry {
    #[must_use]
    pub fn new(slots: Arc<dyn FavoritesSlots>) -> Self {
        Self {
            slots,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Store of the caller's profile.
    pub async fn for_session(&self, ctx: &SessionContext) -> Arc<FavoritesStore> {
        let profile = profile_of(ctx);
        let mut stores = self.stores.lock().await;
        if let Some(store) = stores.get(&profile) {
            return store.clone();
        }

        let store = Arc::new(FavoritesStore::new(self.slots.slot(profile.as_deref())));
        store.load().await;
        tracing::debug!(signed_in = profile.is_some(), "favorites profile opened");
        stores.insert(profile, store.clone());
        store
    }
}
