use std::sync::Arc;

use async_trait::async_trait;
use spot_discovery_sdk::{
    CatalogStatus, CategoryFilter, Course, FavoriteItem, HomeFeed, Review, SearchCriteria,
    SearchOutcome, SessionContext, Spot, SpotDiscoveryApi, SpotsError, TagOption, ToggleOutcome,
    VoteDirection, VoteSummary,
};
use uuid::Uuid;

use crate::domain::catalog::CatalogStore;
use crate::domain::courses::CourseRegistry;
use crate::domain::favorites::FavoritesRegistry;
use crate::domain::reviews::ReviewService;
use crate::domain::sample::home_feed_with;
use crate::domain::search::search;
use crate::domain::tags::TagRegistry;

/// In-process implementation of [`SpotDiscoveryApi`] over the domain services.
pub struct LocalClient {
    catalog: Arc<CatalogStore>,
    courses: Arc<CourseRegistry>,
    tags: Arc<TagRegistry>,
    favorites: Arc<FavoritesRegistry>,
    reviews: Arc<ReviewService>,
    home_sample_size: usize,
}

impl LocalClient {
    #[must_use]
    pub fn new(
        catalog: Arc<CatalogStore>,
        courses: Arc<CourseRegistry>,
        tags: Arc<TagRegistry>,
        favorites: Arc<FavoritesRegistry>,
        reviews: Arc<ReviewService>,
        home_sample_size: usize,
    ) -> Self {
        Self {
            catalog,
            courses,
            tags,
            favorites,
            reviews,
            home_sample_size,
        }
    }
}

#[async_trait]
impl SpotDiscoveryApi for LocalClient {
    async fn catalog_status(&self) -> CatalogStatus {
        self.catalog.status()
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome, SpotsError> {
        let snapshot = self.catalog.snapshot();
        Ok(search(&snapshot.spots, criteria, &self.courses))
    }

    async fn get_spot(&self, id: &str) -> Result<Spot, SpotsError> {
        self.catalog
            .find_by_key(id)
            .ok_or_else(|| SpotsError::not_found("Spot"))
    }

    async fn home_feed(&self) -> Result<HomeFeed, SpotsError> {
        let snapshot = self.catalog.snapshot();
        Ok(home_feed_with(
            &snapshot.spots,
            self.home_sample_size,
            &mut rand::rng(),
        ))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, SpotsError> {
        Ok(self.courses.list().to_vec())
    }

    async fn get_course(&self, id: &str) -> Result<Course, SpotsError> {
        self.courses
            .get(id)
            .cloned()
            .ok_or_else(|| SpotsError::not_found("Course"))
    }

    async fn list_tags(&self, category: CategoryFilter) -> Result<Vec<TagOption>, SpotsError> {
        Ok(self.tags.for_category(category).to_vec())
    }

    async fn list_favorites(&self, ctx: &SessionContext) -> Result<Vec<FavoriteItem>, SpotsError> {
        Ok(self.favorites.for_session(ctx).await.list().await)
    }

    async fn is_favorite(&self, ctx: &SessionContext, id: Option<&str>) -> bool {
        self.favorites.for_session(ctx).await.is_favorite(id).await
    }

    async fn toggle_favorite(
        &self,
        ctx: &SessionContext,
        item: FavoriteItem,
    ) -> Result<ToggleOutcome, SpotsError> {
        self.favorites
            .for_session(ctx)
            .await
            .toggle(item)
            .await
            .map_err(Into::into)
    }

    async fn list_reviews(&self, spot_id: &str) -> Result<Vec<Review>, SpotsError> {
        self.reviews.list(spot_id).await.map_err(Into::into)
    }

    async fn visible_reviews(&self, spot_id: &str) -> Result<Vec<Review>, SpotsError> {
        self.reviews.visible_reviews(spot_id).await.map_err(Into::into)
    }

    async fn add_vote(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        direction: VoteDirection,
    ) -> Result<Review, SpotsError> {
        self.reviews
            .add_vote(ctx, spot_id, direction)
            .await
            .map_err(Into::into)
    }

    async fn add_comment(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        text: &str,
    ) -> Result<Review, SpotsError> {
        self.reviews
            .add_comment(ctx, spot_id, text)
            .await
            .map_err(Into::into)
    }

    async fn edit_comment(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        review_id: Uuid,
        text: &str,
    ) -> Result<Review, SpotsError> {
        self.reviews
            .edit_comment(ctx, spot_id, review_id, text)
            .await
            .map_err(Into::into)
    }

    async fn delete_review(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        review_id: Uuid,
    ) -> Result<(), SpotsError> {
        self.reviews
            .delete_review(ctx, spot_id, review_id)
            .await
            .map_err(Into::into)
    }

    async fn vote_summary(&self, ctx: &SessionContext, spot_id: &str) -> VoteSummary {
        self.reviews.aggregate(ctx, spot_id).await
    }
}
