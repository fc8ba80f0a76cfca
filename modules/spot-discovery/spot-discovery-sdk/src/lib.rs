//! Spot Discovery SDK
//!
//! Public API trait, models and errors of the spot-discovery module. Consumers
//! depend on this crate only; the implementation lives in `spot-discovery`.

pub mod api;
pub mod errors;
pub mod models;
pub mod session;

pub use api::SpotDiscoveryApi;
pub use errors::SpotsError;
pub use models::{
    CatalogStatus, CategoryFilter, Course, CourseDay, CourseItem, FavoriteItem, HomeFeed, Rating,
    Review, ReviewPurpose, SearchCriteria, SearchOutcome, Spot, SpotCategory, TagOption,
    ToggleOutcome, UserVoteState, VoteDirection, VoteSummary,
};
pub use session::{Identity, SessionContext};
