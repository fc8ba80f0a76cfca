use std::collections::HashMap;

use async_trait::async_trait;
use spot_discovery_sdk::models::Review;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repo::{NewReview, ReviewsRepository};

/// Process-local review collections, used when no database is configured.
#[derive(Default)]
pub struct InMemoryReviewsRepository {
    by_spot: RwLock<HashMap<String, Vec<Review>>>,
}

impl InMemoryReviewsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn materialize(spot_id: &str, review: NewReview) -> Review {
    Review {
        id: Uuid::new_v4(),
        spot_id: spot_id.to_owned(),
        user_id: review.user_id,
        user_name: review.user_name,
        user_photo_url: review.user_photo_url,
        text: review.text,
        rating: review.rating,
        created_at: OffsetDateTime::now_utc(),
    }
}

#[async_trait]
impl ReviewsRepository for InMemoryReviewsRepository {
    async fn list(&self, spot_id: &str) -> anyhow::Result<Vec<Review>> {
        Ok(self
            .by_spot
            .read()
            .await
            .get(spot_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find(&self, spot_id: &str, review_id: Uuid) -> anyhow::Result<Option<Review>> {
        Ok(self
            .by_spot
            .read()
            .await
            .get(spot_id)
            .and_then(|rows| rows.iter().find(|r| r.id == review_id).cloned()))
    }

    async fn insert_comment(&self, spot_id: &str, review: NewReview) -> anyhow::Result<Review> {
        let row = materialize(spot_id, review);
        self.by_spot
            .write()
            .await
            .entry(spot_id.to_owned())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn try_insert_vote(
        &self,
        spot_id: &str,
        review: NewReview,
    ) -> anyhow::Result<Option<Review>> {
        // Check and insert under one write guard.
        let mut by_spot = self.by_spot.write().await;
        let rows = by_spot.entry(spot_id.to_owned()).or_default();
        if rows
            .iter()
            .any(|r| r.user_id == review.user_id && r.is_vote())
        {
            return Ok(None);
        }
        let row = materialize(spot_id, review);
        rows.push(row.clone());
        Ok(Some(row))
    }

    async fn update_text(
        &self,
        spot_id: &str,
        review_id: Uuid,
        text: &str,
    ) -> anyhow::Result<Option<Review>> {
        let mut by_spot = self.by_spot.write().await;
        let row = by_spot
            .get_mut(spot_id)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == review_id));
        Ok(row.map(|r| {
            text.clone_into(&mut r.text);
            r.clone()
        }))
    }

    async fn delete(&self, spot_id: &str, review_id: Uuid) -> anyhow::Result<bool> {
        let mut by_spot = self.by_spot.write().await;
        let Some(rows) = by_spot.get_mut(spot_id) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|r| r.id != review_id);
        Ok(rows.len() != before)
    }
}
