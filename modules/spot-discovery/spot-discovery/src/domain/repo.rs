use async_trait::async_trait;
use spot_discovery_sdk::models::{Rating, Review};
use uuid::Uuid;

/// Review row to be created; the repository assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub user_id: String,
    pub user_name: String,
    pub user_photo_url: Option<String>,
    pub text: String,
    pub rating: Rating,
}

/// Per-spot review collections.
#[async_trait]
pub trait ReviewsRepository: Send + Sync {
    async fn list(&self, spot_id: &str) -> anyhow::Result<Vec<Review>>;

    async fn find(&self, spot_id: &str, review_id: Uuid) -> anyhow::Result<Option<Review>>;

    async fn insert_comment(&self, spot_id: &str, review: NewReview) -> anyhow::Result<Review>;

    /// Atomically insert a vote row unless `(spot_id, user_id)` already has
    /// one. Returns `None` when a vote already exists.
    async fn try_insert_vote(
        &self,
        spot_id: &str,
        review: NewReview,
    ) -> anyhow::Result<Option<Review>>;

    /// Replace the text of a row. `None` if the row does not exist.
    async fn update_text(
        &self,
        spot_id: &str,
        review_id: Uuid,
        text: &str,
    ) -> anyhow::Result<Option<Review>>;

    /// Returns whether a row was removed.
    async fn delete(&self, spot_id: &str, review_id: Uuid) -> anyhow::Result<bool>;
}
