use spot_discovery_sdk::models::{Rating, Review};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::repo::NewReview;
use crate::infra::storage::entity::Model as ReviewEntity;

/// Rows written before timestamps were recorded sort as "now".
impl From<ReviewEntity> for Review {
    fn from(rhs: ReviewEntity) -> Self {
        Self {
            id: rhs.id,
            spot_id: rhs.spot_id,
            user_id: rhs.user_id,
            user_name: rhs.user_name,
            user_photo_url: rhs.user_photo_url,
            text: rhs.text,
            rating: Rating::parse(&rhs.rating),
            created_at: rhs.created_at.unwrap_or_else(OffsetDateTime::now_utc),
        }
    }
}

/// Build a fresh row. `vote_owner` is filled only for votes so the unique
/// `(spot_id, vote_owner)` index applies to them alone.
#[must_use]
pub fn new_review_entity(spot_id: &str, review: NewReview, is_vote: bool) -> ReviewEntity {
    ReviewEntity {
        id: Uuid::new_v4(),
        spot_id: spot_id.to_owned(),
        vote_owner: is_vote.then(|| review.user_id.clone()),
        user_id: review.user_id,
        user_name: review.user_name,
        user_photo_url: review.user_photo_url,
        text: review.text,
        rating: review.rating.as_str().to_owned(),
        created_at: Some(OffsetDateTime::now_utc()),
    }
}
