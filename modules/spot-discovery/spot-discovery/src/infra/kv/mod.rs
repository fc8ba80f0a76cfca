//! Key-value persistence for small local documents (favorites).

mod favorites_repo;
mod file;
mod memory;

pub use favorites_repo::{KvFavoritesRepository, KvFavoritesSlots};
pub use file::FileKvStorage;
pub use memory::InMemoryKvStorage;

use async_trait::async_trait;

/// String slots addressed by key. A write replaces the whole value.
#[async_trait]
pub trait KvStorage: Send + Sync {
    /// `None` when the key was never written.
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
