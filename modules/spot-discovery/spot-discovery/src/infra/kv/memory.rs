use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::KvStorage;

#[derive(Debug, Default)]
pub struct InMemoryKvStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStorage for InMemoryKvStorage {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.slots.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
