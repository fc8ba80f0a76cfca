use anyhow::Context;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use spot_discovery_sdk::models::Review;
use uuid::Uuid;

use crate::domain::repo::{NewReview, ReviewsRepository};

use super::entity::{self, Entity as ReviewEntity};
use super::mapper::new_review_entity;

pub struct SeaOrmReviewsRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewsRepository for SeaOrmReviewsRepository {
    async fn list(&self, spot_id: &str) -> anyhow::Result<Vec<Review>> {
        let rows = ReviewEntity::find()
            .filter(entity::Column::SpotId.eq(spot_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .with_context(|| format!("failed to list reviews of spot '{spot_id}'"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, spot_id: &str, review_id: Uuid) -> anyhow::Result<Option<Review>> {
        let row = ReviewEntity::find_by_id(review_id)
            .filter(entity::Column::SpotId.eq(spot_id))
            .one(&self.db)
            .await
            .context("failed to load review")?;

        Ok(row.map(Into::into))
    }

    async fn insert_comment(&self, spot_id: &str, review: NewReview) -> anyhow::Result<Review> {
        let model = new_review_entity(spot_id, review, false);

        ReviewEntity::insert(model.clone().into_active_model())
            .exec_without_returning(&self.db)
            .await
            .context("failed to insert comment")?;

        Ok(model.into())
    }

    async fn try_insert_vote(
        &self,
        spot_id: &str,
        review: NewReview,
    ) -> anyhow::Result<Option<Review>> {
        let model = new_review_entity(spot_id, review, true);

        // Zero rows inserted means the unique (spot_id, vote_owner) index
        // already holds this user's vote.
        let inserted = ReviewEntity::insert(model.clone().into_active_model())
            .on_conflict(
                OnConflict::columns([entity::Column::SpotId, entity::Column::VoteOwner])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("failed to insert vote")?;

        Ok((inserted > 0).then(|| model.into()))
    }

    async fn update_text(
        &self,
        spot_id: &str,
        review_id: Uuid,
        text: &str,
    ) -> anyhow::Result<Option<Review>> {
        let result = ReviewEntity::update_many()
            .col_expr(entity::Column::Text, Expr::value(text))
            .filter(entity::Column::Id.eq(review_id))
            .filter(entity::Column::SpotId.eq(spot_id))
            .exec(&self.db)
            .await
            .context("failed to update review text")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find(spot_id, review_id).await
    }

    async fn delete(&self, spot_id: &str, review_id: Uuid) -> anyhow::Result<bool> {
        let result = ReviewEntity::delete_many()
            .filter(entity::Column::Id.eq(review_id))
            .filter(entity::Column::SpotId.eq(spot_id))
            .exec(&self.db)
            .await
            .context("failed to delete review")?;

        Ok(result.rows_affected > 0)
    }
}
