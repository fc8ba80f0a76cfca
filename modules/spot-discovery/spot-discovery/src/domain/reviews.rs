//! Review & rating aggregation.
//!
//! A spot's review collection holds two kinds of rows: votes (empty text,
//! `up`/`down`) and comments (non-empty text, rating `none`). Each user gets
//! at most one vote per spot and any number of comments. Only comments are
//! shown in the review feed; only votes move the counts.

use std::sync::Arc;

use spot_discovery_sdk::models::{Rating, Review, UserVoteState, VoteDirection, VoteSummary};
use spot_discovery_sdk::session::{Identity, SessionContext};
use uuid::Uuid;

use super::error::DomainError;
use super::fields::ReviewFields;
use super::repo::{NewReview, ReviewsRepository};

pub struct ServiceConfig {
    pub max_comment_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_comment_length: 1000,
        }
    }
}

/// Vote counts over `reviews` and the vote of `user_id`, if any.
#[must_use]
pub fn summarize(reviews: &[Review], user_id: Option<&str>) -> VoteSummary {
    let mut summary = VoteSummary::default();
    for review in reviews {
        match review.rating {
            Rating::Up => summary.up_count += 1,
            Rating::Down => summary.down_count += 1,
            Rating::None => {}
        }
    }

    summary.user_vote = user_id
        .and_then(|uid| {
            reviews
                .iter()
                .find(|r| r.user_id == uid && r.is_vote())
        })
        .map_or(UserVoteState::None, |r| match r.rating {
            Rating::Up => UserVoteState::Up,
            Rating::Down => UserVoteState::Down,
            Rating::None => UserVoteState::None,
        });

    summary
}

/// Rows rendered in the review feed: comments only, order preserved.
#[must_use]
pub fn visible(reviews: &[Review]) -> Vec<Review> {
    reviews.iter().filter(|r| r.is_comment()).cloned().collect()
}

/// Newest first; ties keep their storage order.
pub fn sort_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub struct ReviewService {
    repo: Arc<dyn ReviewsRepository>,
    config: ServiceConfig,
}

impl ReviewService {
    #[must_use]
    pub fn new(repo: Arc<dyn ReviewsRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// All rows of a spot, newest first.
    ///
    /// # Errors
    /// `Validation` for a blank spot id, `Persistence` on storage failure.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, spot_id: &str) -> Result<Vec<Review>, DomainError> {
        let spot_id = require_spot(spot_id)?;
        let mut reviews = self.repo.list(spot_id).await?;
        sort_newest_first(&mut reviews);
        Ok(reviews)
    }

    /// Comment rows of a spot, newest first.
    ///
    /// # Errors
    /// Same as [`ReviewService::list`].
    pub async fn visible_reviews(&self, spot_id: &str) -> Result<Vec<Review>, DomainError> {
        Ok(visible(&self.list(spot_id).await?))
    }

    /// Cast the caller's single vote on a spot.
    ///
    /// # Errors
    /// `Unauthenticated` without identity, `DuplicateVote` if the caller has
    /// already voted on this spot.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn add_vote(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        direction: VoteDirection,
    ) -> Result<Review, DomainError> {
        let spot_id = require_spot(spot_id)?;
        let identity = require_identity(ctx)?;

        let row = new_row(identity, String::new(), direction.into());
        match self.repo.try_insert_vote(spot_id, row).await? {
            Some(review) => {
                tracing::info!(review_id = %review.id, "vote recorded");
                Ok(review)
            }
            None => Err(DomainError::DuplicateVote {
                spot_id: spot_id.to_owned(),
            }),
        }
    }

    /// Post a comment. Comments never affect vote counts.
    ///
    /// # Errors
    /// `Unauthenticated` without identity, `Validation` for blank or
    /// over-long text.
    #[tracing::instrument(skip(self, ctx, text))]
    pub async fn add_comment(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        text: &str,
    ) -> Result<Review, DomainError> {
        let spot_id = require_spot(spot_id)?;
        let identity = require_identity(ctx)?;
        let text = self.validate_text(text)?;

        let review = self
            .repo
            .insert_comment(spot_id, new_row(identity, text, Rating::None))
            .await?;
        tracing::info!(review_id = %review.id, "comment added");
        Ok(review)
    }

    /// Replace the text of the caller's own comment.
    ///
    /// # Errors
    /// `NotFound` for an unknown review, `NotOwner` when the caller did not
    /// write it, `Validation` for blank text or when the row is a vote.
    #[tracing::instrument(skip(self, ctx, text))]
    pub async fn edit_comment(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        review_id: Uuid,
        text: &str,
    ) -> Result<Review, DomainError> {
        let spot_id = require_spot(spot_id)?;
        let identity = require_identity(ctx)?;
        let existing = self.find_owned(spot_id, review_id, identity).await?;

        if !existing.is_comment() {
            return Err(DomainError::validation(
                ReviewFields::REVIEW_ID,
                "only comments can be edited",
            ));
        }
        let text = self.validate_text(text)?;

        self.repo
            .update_text(spot_id, review_id, &text)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))
    }

    /// Delete one of the caller's own rows (vote or comment).
    ///
    /// # Errors
    /// `NotFound` for an unknown review, `NotOwner` when the caller did not
    /// write it.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn delete_review(
        &self,
        ctx: &SessionContext,
        spot_id: &str,
        review_id: Uuid,
    ) -> Result<(), DomainError> {
        let spot_id = require_spot(spot_id)?;
        let identity = require_identity(ctx)?;
        self.find_owned(spot_id, review_id, identity).await?;

        if self.repo.delete(spot_id, review_id).await? {
            tracing::info!("review deleted");
            Ok(())
        } else {
            Err(DomainError::not_found("Review"))
        }
    }

    /// Vote counts and the caller's own vote. Never fails: storage errors
    /// degrade to zero counts.
    pub async fn aggregate(&self, ctx: &SessionContext, spot_id: &str) -> VoteSummary {
        match self.list(spot_id).await {
            Ok(reviews) => summarize(&reviews, ctx.user_id()),
            Err(e) => {
                tracing::warn!(error = %e, spot_id, "vote aggregation failed; reporting zero counts");
                VoteSummary::default()
            }
        }
    }

    async fn find_owned(
        &self,
        spot_id: &str,
        review_id: Uuid,
        identity: &Identity,
    ) -> Result<Review, DomainError> {
        let review = self
            .repo
            .find(spot_id, review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))?;

        if review.user_id != identity.user_id {
            tracing::warn!(%review_id, "review mutation by non-owner rejected");
            return Err(DomainError::NotOwner { review_id });
        }
        Ok(review)
    }

    fn validate_text(&self, text: &str) -> Result<String, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::validation(ReviewFields::TEXT, "must not be empty"));
        }
        if text.chars().count() > self.config.max_comment_length {
            return Err(DomainError::validation(
                ReviewFields::TEXT,
                format!(
                    "exceeds maximum length of {}",
                    self.config.max_comment_length
                ),
            ));
        }
        Ok(text.to_owned())
    }
}

fn require_spot(spot_id: &str) -> Result<&str, DomainError> {
    let spot_id = spot_id.trim();
    if spot_id.is_empty() {
        return Err(DomainError::validation(ReviewFields::SPOT_ID, "must not be empty"));
    }
    Ok(spot_id)
}

fn require_identity(ctx: &SessionContext) -> Result<&Identity, DomainError> {
    ctx.identity().ok_or(DomainError::Unauthenticated)
}

fn new_row(identity: &Identity, text: String, rating: Rating) -> NewReview {
    NewReview {
        user_id: identity.user_id.clone(),
        user_name: identity.user_name.clone(),
        user_photo_url: identity.user_photo_url.clone(),
        text,
        rating,
    }
}
