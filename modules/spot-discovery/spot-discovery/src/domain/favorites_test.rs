#[cfg(test)]
mod tests {
    use super::super::*;
    use async_trait::async_trait;
    use error::DomainError;
    use favorites::{FavoritesRegistry, FavoritesStore};
    use fields::FavoriteFields;
    use spot_discovery_sdk::session::SessionContext;
    use std::collections::HashMap;
    use parking_lot::Mutex;
    use spot_discovery_sdk::models::FavoriteItem;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tracing_test::traced_test;

    #[derive(Default)]
    struct MockRepository {
        stored: Mutex<Vec<FavoriteItem>>,
        writes: Mutex<Vec<Vec<FavoriteItem>>>,
        fail_load: bool,
        fail_save: AtomicBool,
    }

    #[async_trait]
    impl ports::FavoritesRepository for MockRepository {
        async fn load_all(&self) -> anyhow::Result<Vec<FavoriteItem>> {
            if self.fail_load {
                anyhow::bail!("expected value at line 1 column 1");
            }
            Ok(self.stored.lock().clone())
        }

        async fn save_all(&self, items: &[FavoriteItem]) -> anyhow::Result<()> {
            if self.fail_save.load(Ordering::SeqCst) {
                anyhow::bail!("quota exceeded");
            }
            *self.stored.lock() = items.to_vec();
            self.writes.lock().push(items.to_vec());
            Ok(())
        }
    }

    fn item(id: &str) -> FavoriteItem {
        FavoriteItem {
            id: id.to_owned(),
            name: format!("Spot {id}"),
            category: "attraction".to_owned(),
            thumbnail_url: None,
        }
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_set() {
        let repo = Arc::new(MockRepository::default());
        let store = FavoritesStore::new(repo.clone());
        store.toggle(item("a")).await.unwrap();
        let before = store.list().await;

        let added = store.toggle(item("b")).await.unwrap();
        assert!(added.is_favorite);
        assert!(added.persisted);
        assert!(store.is_favorite(Some("b")).await);

        let removed = store.toggle(item("b")).await.unwrap();
        assert!(!removed.is_favorite);
        assert_eq!(store.list().await, before);
        assert_eq!(*repo.stored.lock(), before);
    }

    #[tokio::test]
    async fn writes_follow_toggle_order() {
        let repo = Arc::new(MockRepository::default());
        let store = FavoritesStore::new(repo.clone());

        store.toggle(item("a")).await.unwrap();
        store.toggle(item("b")).await.unwrap();
        store.toggle(item("a")).await.unwrap();

        let ids: Vec<Vec<String>> = repo
            .writes
            .lock()
            .iter()
            .map(|w| w.iter().map(|f| f.id.clone()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["a"], vec!["a", "b"], vec!["b"]]);
    }

    #[tokio::test]
    async fn blank_id_is_rejected_without_change() {
        let repo = Arc::new(MockRepository::default());
        let store = FavoritesStore::new(repo.clone());

        let err = store.toggle(item("   ")).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == FavoriteFields::ID));
        assert!(store.list().await.is_empty());
        assert!(repo.writes.lock().is_empty());
    }

    #[tokio::test]
    async fn ids_are_trimmed() {
        let store = FavoritesStore::new(Arc::new(MockRepository::default()));

        store.toggle(item(" s1 ")).await.unwrap();

        assert!(store.is_favorite(Some("s1")).await);
        assert!(store.is_favorite(Some("  s1")).await);
        assert!(!store.is_favorite(Some("")).await);
        assert!(!store.is_favorite(None).await);
    }

    #[tokio::test]
    async fn load_collapses_duplicates() {
        let repo = MockRepository::default();
        *repo.stored.lock() = vec![item("a"), item(" a"), item(""), item("b")];
        let store = FavoritesStore::new(Arc::new(repo));

        let loaded = store.load().await;

        let ids: Vec<&str> = loaded.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.list().await, loaded);
    }

    #[tokio::test]
    #[traced_test]
    async fn corrupt_storage_loads_empty() {
        let store = FavoritesStore::new(Arc::new(MockRepository {
            fail_load: true,
            ..MockRepository::default()
        }));

        assert!(store.load().await.is_empty());
        assert!(!store.is_favorite(Some("a")).await);
        assert!(logs_contain("failed to load favorites"));
    }

    #[tokio::test]
    #[traced_test]
    async fn persist_failure_keeps_memory_change() {
        let repo = Arc::new(MockRepository::default());
        repo.fail_save.store(true, Ordering::SeqCst);
        let store = FavoritesStore::new(repo.clone());

        let outcome = store.toggle(item("a")).await.unwrap();

        assert!(outcome.is_favorite);
        assert!(!outcome.persisted);
        assert!(store.is_favorite(Some("a")).await);
        assert!(repo.stored.lock().is_empty());
        assert!(logs_contain("failed to persist favorites"));
    }

    #[derive(Default)]
    struct MockSlots {
        repos: Mutex<HashMap<Option<String>, Arc<MockRepository>>>,
    }

    impl ports::FavoritesSlots for MockSlots {
        fn slot(&self, profile: Option<&str>) -> Arc<dyn ports::FavoritesRepository> {
            self.repos
                .lock()
                .entry(profile.map(ToOwned::to_owned))
                .or_default()
                .clone()
        }
    }

    #[tokio::test]
    async fn sessions_get_their_own_store() {
        let slots = Arc::new(MockSlots::default());
        let registry = FavoritesRegistry::new(slots.clone());
        let alice = SessionContext::user("alice", "Alice");
        let bob = SessionContext::user("bob", "Bob");

        registry.for_session(&alice).await.toggle(item("s1")).await.unwrap();

        assert!(registry.for_session(&alice).await.is_favorite(Some("s1")).await);
        assert!(registry.for_session(&bob).await.list().await.is_empty());
        assert!(registry.for_session(&SessionContext::anonymous()).await.list().await.is_empty());
        assert_eq!(slots.repos.lock()[&Some("alice".to_owned())].stored.lock().len(), 1);
    }

    #[tokio::test]
    async fn blank_user_id_uses_default_slot() {
        let slots = Arc::new(MockSlots::default());
        let registry = FavoritesRegistry::new(slots.clone());

        registry
            .for_session(&SessionContext::user("  ", "Ghost"))
            .await
            .toggle(item("s2"))
            .await
            .unwrap();

        let anonymous = registry.for_session(&SessionContext::anonymous()).await;
        assert!(anonymous.is_favorite(Some("s2")).await);
        assert!(slots.repos.lock().contains_key(&None));
    }
}
