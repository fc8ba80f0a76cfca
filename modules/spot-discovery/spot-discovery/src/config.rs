use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::courses::CourseConfig;
use crate::domain::tags::TagsConfig;

/// Storage key of the favorites slot.
pub const FAVORITES_STORAGE_KEY: &str = "jeju-favorites";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpotDiscoveryConfig {
    /// JSON catalog document. Without it the catalog starts empty.
    pub catalog_path: Option<PathBuf>,
    pub favorites: FavoritesConfig,
    pub reviews: ReviewsConfig,
    pub assets: AssetConfig,
    pub home: HomeConfig,
    /// Overrides the built-in courses when present.
    pub courses: Option<Vec<CourseConfig>>,
    /// Overrides the built-in tag lists when present.
    pub tags: Option<TagsConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FavoritesConfig {
    /// Directory holding the key-value slots. In-memory when unset.
    pub dir: Option<PathBuf>,
    pub key: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: FAVORITES_STORAGE_KEY.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewsConfig {
    /// e.g. `sqlite://reviews.db?mode=rwc`. In-memory repository when unset.
    pub database_url: Option<String>,
    pub max_comment_length: usize,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_comment_length: default_max_comment_length(),
        }
    }
}

fn default_max_comment_length() -> usize {
    1000
}

/// How spot thumbnails are resolved from display names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    pub base_path: String,
    pub extension: String,
    /// Prefer the name-derived local image over the catalog's own URL.
    pub prefer_local: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_path: "/spotimage".to_owned(),
            extension: "jpg".to_owned(),
            prefer_local: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    pub sample_size: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { sample_size: 4 }
    }
}
