//! Multi-criteria filtering pipeline.
//!
//! Stages run in a fixed order (category, tag, free text, course). Each stage
//! only narrows its input and keeps catalog order; nothing is sorted.

use spot_discovery_sdk::models::{CategoryFilter, SearchCriteria, SearchOutcome, Spot, SpotCategory};

use super::courses::CourseRegistry;
use super::normalize::normalize;

/// Run the full pipeline over `catalog`.
#[must_use]
pub fn search(catalog: &[Spot], criteria: &SearchCriteria, courses: &CourseRegistry) -> SearchOutcome {
    let selected_tags: Vec<&str> = criteria
        .tags
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    let tag_was_applied = !selected_tags.is_empty();

    let query = criteria.query.trim();
    let needle = (!query.is_empty()).then(|| normalize(Some(query)));

    let members = criteria
        .course_id
        .as_deref()
        .and_then(|id| courses.members(id));

    let spots: Vec<Spot> = catalog
        .iter()
        .filter(|s| matches_category(s, criteria.category))
        .filter(|s| !tag_was_applied || matches_any_tag(s, &selected_tags))
        .filter(|s| needle.as_deref().is_none_or(|n| matches_text(s, n)))
        .filter(|s| members.is_none_or(|m| m.contains(&s.name)))
        .cloned()
        .collect();

    tracing::debug!(
        catalog = catalog.len(),
        matched = spots.len(),
        tag_was_applied,
        "search completed"
    );

    SearchOutcome {
        spots,
        tag_was_applied,
    }
}

fn matches_category(spot: &Spot, filter: CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => spot.category == category,
    }
}

fn matches_any_tag(spot: &Spot, selected: &[&str]) -> bool {
    spot.tags.iter().any(|t| selected.contains(&t.as_str()))
}

/// `needle` must already be normalized.
fn matches_text(spot: &Spot, needle: &str) -> bool {
    normalize(Some(&spot.name)).contains(needle)
        || normalize(Some(&spot.address)).contains(needle)
        || spot
            .tags
            .iter()
            .any(|t| normalize(Some(t)).contains(needle))
}

/// Catalog split by category, each part in catalog order.
#[derive(Debug, Clone, Default)]
pub struct CategoryPartition {
    pub attractions: Vec<Spot>,
    pub stays: Vec<Spot>,
    pub foods: Vec<Spot>,
}

#[must_use]
pub fn partition_by_category(catalog: &[Spot]) -> CategoryPartition {
    let mut parts = CategoryPartition::default();
    for spot in catalog {
        match spot.category {
            SpotCategory::Attraction => parts.attractions.push(spot.clone()),
            SpotCategory::Stay => parts.stays.push(spot.clone()),
            SpotCategory::Food => parts.foods.push(spot.clone()),
            SpotCategory::Unknown => {}
        }
    }
    parts
}
