use serde::{Deserialize, Serialize};
use spot_discovery_sdk::models::{
    CatalogStatus, CategoryFilter, Course, CourseDay, CourseItem, FavoriteItem, HomeFeed, Review,
    SearchCriteria, SearchOutcome, Spot, TagOption, ToggleOutcome, VoteDirection, VoteSummary,
};

use crate::domain::time_ago::RelativeAge;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotDto {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub address: String,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub description_short: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub price_info: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<Spot> for SpotDto {
    fn from(s: Spot) -> Self {
        Self {
            id: s.id,
            name: s.name,
            category: s.category.as_str().to_owned(),
            address: s.address,
            tags: s.tags,
            thumbnail_url: s.thumbnail_url,
            description_short: s.description_short,
            opening_hours: s.opening_hours,
            phone: s.phone,
            price_info: s.price_info,
            lat: s.lat,
            lng: s.lng,
        }
    }
}

fn spots(list: Vec<Spot>) -> Vec<SpotDto> {
    list.into_iter().map(Into::into).collect()
}

/// Query string of `GET /spots`. `tags` is comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub category: Option<String>,
    pub tags: Option<String>,
    pub q: Option<String>,
    pub course: Option<String>,
}

impl From<SearchQuery> for SearchCriteria {
    fn from(q: SearchQuery) -> Self {
        Self {
            category: q
                .category
                .as_deref()
                .map_or(CategoryFilter::All, CategoryFilter::parse),
            tags: q.tags.as_deref().map_or_else(Vec::new, |t| {
                t.split(',').map(ToOwned::to_owned).collect()
            }),
            query: q.q.unwrap_or_default(),
            course_id: q.course.filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Query string of `GET /tags`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagsQuery {
    pub category: Option<String>,
}

impl TagsQuery {
    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        self.category
            .as_deref()
            .map_or(CategoryFilter::All, CategoryFilter::parse)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagDto {
    pub key: String,
    pub icon: Option<String>,
}

impl From<TagOption> for TagDto {
    fn from(t: TagOption) -> Self {
        Self {
            key: t.key,
            icon: t.icon,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub spots: Vec<SpotDto>,
    pub tag_was_applied: bool,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(o: SearchOutcome) -> Self {
        Self {
            spots: spots(o.spots),
            tag_was_applied: o.tag_was_applied,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeFeedDto {
    pub popular: Vec<SpotDto>,
    pub attractions: Vec<SpotDto>,
    pub stays: Vec<SpotDto>,
    pub foods: Vec<SpotDto>,
}

impl From<HomeFeed> for HomeFeedDto {
    fn from(h: HomeFeed) -> Self {
        Self {
            popular: spots(h.popular),
            attractions: spots(h.attractions),
            stays: spots(h.stays),
            foods: spots(h.foods),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseItemDto {
    pub time: String,
    pub title: String,
    pub spot_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDayDto {
    pub day: u32,
    pub title: String,
    pub items: Vec<CourseItemDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDto {
    pub id: String,
    pub label: String,
    pub subtitle: String,
    pub description: String,
    pub days: Vec<CourseDayDto>,
    pub members: Vec<String>,
}

impl From<CourseItem> for CourseItemDto {
    fn from(i: CourseItem) -> Self {
        Self {
            time: i.time_label,
            title: i.title,
            spot_name: i.spot_name,
            description: i.description,
        }
    }
}

impl From<CourseDay> for CourseDayDto {
    fn from(d: CourseDay) -> Self {
        Self {
            day: d.day,
            title: d.title,
            items: d.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Course> for CourseDto {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            label: c.label,
            subtitle: c.subtitle,
            description: c.description,
            days: c.days.into_iter().map(Into::into).collect(),
            members: c.members.into_iter().collect(),
        }
    }
}

/// Favorite summary; also the body of `POST /favorites/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl From<FavoriteItem> for FavoriteDto {
    fn from(f: FavoriteItem) -> Self {
        Self {
            id: f.id,
            name: f.name,
            category: f.category,
            thumbnail_url: f.thumbnail_url,
        }
    }
}

impl From<FavoriteDto> for FavoriteItem {
    fn from(f: FavoriteDto) -> Self {
        Self {
            id: f.id,
            name: f.name,
            category: f.category,
            thumbnail_url: f.thumbnail_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStateDto {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub favorites: Vec<FavoriteDto>,
    pub is_favorite: bool,
    pub persisted: bool,
}

impl From<ToggleOutcome> for ToggleResponse {
    fn from(t: ToggleOutcome) -> Self {
        Self {
            favorites: t.favorites.into_iter().map(Into::into).collect(),
            is_favorite: t.is_favorite,
            persisted: t.persisted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub spot_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_photo_url: Option<String>,
    pub text: String,
    pub rating: String,
    pub created_at: String,
    /// Human-readable age, e.g. "3 minutes ago".
    pub age: String,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        let created_at = r
            .created_at
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        Self {
            id: r.id.to_string(),
            age: RelativeAge::since(r.created_at).to_string(),
            spot_id: r.spot_id,
            user_id: r.user_id,
            user_name: r.user_name,
            user_photo_url: r.user_photo_url,
            text: r.text,
            rating: r.rating.as_str().to_owned(),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirectionDto {
    Up,
    Down,
}

impl From<VoteDirectionDto> for VoteDirection {
    fn from(d: VoteDirectionDto) -> Self {
        match d {
            VoteDirectionDto::Up => Self::Up,
            VoteDirectionDto::Down => Self::Down,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub direction: VoteDirectionDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummaryDto {
    pub up_count: u64,
    pub down_count: u64,
    pub user_vote: String,
}

impl From<VoteSummary> for VoteSummaryDto {
    fn from(v: VoteSummary) -> Self {
        Self {
            up_count: v.up_count,
            down_count: v.down_count,
            user_vote: v.user_vote.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatusDto {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<CatalogStatus> for CatalogStatusDto {
    fn from(s: CatalogStatus) -> Self {
        match s {
            CatalogStatus::Loading => Self {
                status: "loading",
                reason: None,
            },
            CatalogStatus::Ready => Self {
                status: "ready",
                reason: None,
            },
            CatalogStatus::Failed { reason } => Self {
                status: "failed",
                reason: Some(reason),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spot_discovery_sdk::models::SpotCategory;

    #[test]
    fn search_query_splits_tags_and_parses_category() {
        let criteria: SearchCriteria = SearchQuery {
            category: Some("FOOD".to_owned()),
            tags: Some("sea,view".to_owned()),
            q: Some("jeju".to_owned()),
            course: Some("  ".to_owned()),
        }
        .into();

        assert_eq!(criteria.category, CategoryFilter::Only(SpotCategory::Food));
        assert_eq!(criteria.tags, vec!["sea", "view"]);
        assert_eq!(criteria.query, "jeju");
        assert_eq!(criteria.course_id, None);
    }

    #[test]
    fn empty_query_selects_everything() {
        let criteria: SearchCriteria = SearchQuery::default().into();
        assert_eq!(criteria, SearchCriteria::default());
    }

    #[test]
    fn catalog_status_reason_only_when_failed() {
        let ready = serde_json::to_value(CatalogStatusDto::from(CatalogStatus::Ready)).unwrap();
        assert_eq!(ready, serde_json::json!({ "status": "ready" }));

        let failed = serde_json::to_value(CatalogStatusDto::from(CatalogStatus::Failed {
            reason: "timeout".to_owned(),
        }))
        .unwrap();
        assert_eq!(failed["reason"], "timeout");
    }
}
