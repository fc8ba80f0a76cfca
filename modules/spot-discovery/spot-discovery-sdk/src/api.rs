//! `SpotDiscoveryApi` trait definition.
//!
//! This trait defines the public API for the spot-discovery module.
//! Personalized operations take a [`SessionContext`] carrying the caller's
//! identity explicitly.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::SpotsError;
use crate::models::{
    CatalogStatus, CategoryFilter, Course, FavoriteItem, HomeFeed, Review, SearchCriteria,
    SearchOutcome, Spot, TagOption, ToggleOutcome, VoteDirection, VoteSummary,
};
use crate::session::SessionContext;

/// Public API trait for the spot-discovery module.
#[async_trait]
pub trait SpotDiscoveryApi: Send + Sync {
    /// Current catalog load state.
    async fn catalog_status(&self) -> CatalogStatus;

    /// Run the filtering pipeline over the current catalog snapshot.
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome, SpotsError>;

    /// Look up a single spot by id, or by name for spots without one.
    async fn get_spot(&self, id: &str) -> Result<Spot, SpotsError>;

    /// Randomized recommendation blocks.
    async fn home_feed(&self) -> Result<HomeFeed, SpotsError>;

    async fn list_courses(&self) -> Result<Vec<Course>, SpotsError>;

    async fn get_course(&self, id: &str) -> Result<Course, SpotsError>;

    /// Tag chips offered for a category filter.
    async fn list_tags(&self, category: CategoryFilter) -> Result<Vec<TagOption>, SpotsError>;

    /// Favorites of the caller's profile.
    async fn list_favorites(&self, ctx: &SessionContext) -> Result<Vec<FavoriteItem>, SpotsError>;

    /// Never fails; blank ids are never favorites.
    async fn is_favorite(&self, ctx: &SessionContext, id: Option<&str>) -> bool;

    /// Flip the favorite state of `item.id` in the caller's profile.
    async fn toggle_favorite(
        &self,
        ctx: &SessionContext,
        item: FavoriteItem,
    ) -> Result<ToggleOutcome, SpotsError>;

    /// All review rows of a spot, newest first.
    async fn list_reviews(&self, spot_id: &str) -> Result<Vec<Review>, SpotsError>;

    /// Only the comment rows of a spot, newest first.
    async fn visible_reviews(&self, spot_id: &str) -> Result<Vec<Review>, SpotsError>;

    async fn add_vote(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        direction: VoteDirection,
    ) -> Result<Review, SpotsError>;

    async fn add_comment(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        text: &str,
    ) -> Result<Review, SpotsError>;

    async fn edit_comment(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        review_id: Uuid,
        text: &str,
    ) -> Result<Review, SpotsError>;

    async fn delete_review(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        review_id: Uuid,
    ) -> Result<(), SpotsError>;

    /// Vote counts plus the caller's own vote. Degrades to zero counts.
    async fn vote_summary(&self, ctx: &SessionContext, spot_id: &str) -> VoteSummary;
}
