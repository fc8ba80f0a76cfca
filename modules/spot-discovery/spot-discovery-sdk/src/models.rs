//! Public models for the spot-discovery module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the spot-discovery module and its consumers. Serialization shapes
//! live next to the adapters that need them (REST DTOs, storage records).

use std::collections::BTreeSet;
use std::fmt;

use time::OffsetDateTime;
use uuid::Uuid;

/// Spot category as used by the catalog and the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpotCategory {
    Attraction,
    Stay,
    Food,
    #[default]
    Unknown,
}

impl SpotCategory {
    /// Parse a catalog category string. Anything unrecognized is `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "attraction" => Self::Attraction,
            "stay" => Self::Stay,
            "food" => Self::Food,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attraction => "attraction",
            Self::Stay => "stay",
            Self::Food => "food",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SpotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest in canonical shape.
///
/// Spots are produced once per catalog load by the ingestion boundary and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spot {
    /// Absent for legacy rows; see [`Spot::key`].
    pub id: Option<String>,
    pub name: String,
    pub category: SpotCategory,
    pub address: String,
    /// Trimmed, non-empty and deduplicated, in first-seen order.
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub description_short: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub price_info: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Spot {
    /// Stable key for the spot: its id, or the name for legacy rows.
    #[must_use]
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Summary suitable for the favorites store, if the spot has an id.
    #[must_use]
    pub fn to_favorite(&self) -> Option<FavoriteItem> {
        self.id.as_ref().map(|id| FavoriteItem {
            id: id.clone(),
            name: self.name.clone(),
            category: self.category.as_str().to_owned(),
            thumbnail_url: self.thumbnail_url.clone(),
        })
    }
}

/// Category selection for a search. `All` passes everything through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(SpotCategory),
}

impl CategoryFilter {
    /// Parse a requested category. Unrecognized values select everything.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match SpotCategory::parse(raw) {
            SpotCategory::Unknown => Self::All,
            category => Self::Only(category),
        }
    }
}

/// Search criteria applied by the filtering pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub category: CategoryFilter,
    /// Selected tags. Empty means no tag is selected; several tags match any.
    pub tags: Vec<String>,
    pub query: String,
    pub course_id: Option<String>,
}

impl SearchCriteria {
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }
}

/// Result of a search.
///
/// `tag_was_applied` lets callers tell "no tag selected" apart from
/// "tag selected, nothing matched".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    pub spots: Vec<Spot>,
    pub tag_was_applied: bool,
}

/// Randomized recommendation blocks for the landing page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeFeed {
    pub popular: Vec<Spot>,
    pub attractions: Vec<Spot>,
    pub stays: Vec<Spot>,
    pub foods: Vec<Spot>,
}

/// Selectable tag chip offered for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    pub key: String,
    pub icon: Option<String>,
}

/// Curated itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub label: String,
    pub subtitle: String,
    pub description: String,
    pub days: Vec<CourseDay>,
    /// Spot names belonging to the course, matched by exact equality.
    pub members: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDay {
    pub day: u32,
    pub title: String,
    pub items: Vec<CourseItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseItem {
    pub time_label: String,
    pub title: String,
    pub spot_name: Option<String>,
    pub description: Option<String>,
}

/// Favorited spot summary. Stale copies of name/category/thumbnail are fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub thumbnail_url: Option<String>,
}

/// Result of a favorites toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub favorites: Vec<FavoriteItem>,
    /// Whether the toggled id is a favorite after the call.
    pub is_favorite: bool,
    /// `false` when the in-memory change could not be written to storage.
    pub persisted: bool,
}

/// Rating carried by a review row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rating {
    Up,
    Down,
    #[default]
    None,
}

impl Rating {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::None => "none",
        }
    }
}

/// Direction of a vote; a vote is never `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteDirection {
    Up,
    Down,
}

impl From<VoteDirection> for Rating {
    fn from(d: VoteDirection) -> Self {
        match d {
            VoteDirection::Up => Self::Up,
            VoteDirection::Down => Self::Down,
        }
    }
}

/// What a review row is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPurpose {
    Comment,
    Vote,
    /// Empty text and no rating; never produced by the aggregator.
    Empty,
}

/// A row of a spot's review collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub spot_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_photo_url: Option<String>,
    pub text: String,
    pub rating: Rating,
    pub created_at: OffsetDateTime,
}

impl Review {
    #[must_use]
    pub fn purpose(&self) -> ReviewPurpose {
        if !self.text.is_empty() {
            ReviewPurpose::Comment
        } else if self.rating == Rating::None {
            ReviewPurpose::Empty
        } else {
            ReviewPurpose::Vote
        }
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.purpose() == ReviewPurpose::Comment
    }

    #[must_use]
    pub fn is_vote(&self) -> bool {
        self.purpose() == ReviewPurpose::Vote
    }
}

/// The caller's own vote on a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserVoteState {
    #[default]
    None,
    Up,
    Down,
}

impl UserVoteState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Aggregate vote counts for a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteSummary {
    pub up_count: u64,
    pub down_count: u64,
    pub user_vote: UserVoteState,
}

/// Catalog load state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Failed {
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(text: &str, rating: Rating) -> Review {
        Review {
            id: Uuid::new_v4(),
            spot_id: "s1".to_owned(),
            user_id: "u1".to_owned(),
            user_name: "tester".to_owned(),
            user_photo_url: None,
            text: text.to_owned(),
            rating,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn category_parse_is_lenient() {
        assert_eq!(SpotCategory::parse(" Food "), SpotCategory::Food);
        assert_eq!(SpotCategory::parse("stay"), SpotCategory::Stay);
        assert_eq!(SpotCategory::parse("museum"), SpotCategory::Unknown);
    }

    #[test]
    fn unknown_category_filter_selects_all() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("bogus"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("attraction"),
            CategoryFilter::Only(SpotCategory::Attraction)
        );
    }

    #[test]
    fn review_purpose_follows_text_then_rating() {
        assert_eq!(review("nice", Rating::None).purpose(), ReviewPurpose::Comment);
        assert_eq!(review("", Rating::Up).purpose(), ReviewPurpose::Vote);
        assert_eq!(review("", Rating::None).purpose(), ReviewPurpose::Empty);
    }

    #[test]
    fn spot_key_falls_back_to_name() {
        let legacy = Spot {
            name: "Old Pier".to_owned(),
            ..Spot::default()
        };
        assert_eq!(legacy.key(), "Old Pier");
        assert!(legacy.to_favorite().is_none());
    }
}
