//! Selectable tag chips per category.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use spot_discovery_sdk::models::{CategoryFilter, SpotCategory, TagOption};

const BUILTIN_TAGS: &str = include_str!("../../assets/tags.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TagConfig {
    pub key: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Tag lists as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    pub default: Vec<TagConfig>,
    pub stay: Vec<TagConfig>,
    pub food: Vec<TagConfig>,
}

/// Parse the tag lists shipped with the module.
///
/// # Errors
/// Returns an error if the embedded YAML document is malformed.
pub fn builtin_tags_config() -> anyhow::Result<TagsConfig> {
    serde_saphyr::from_str(BUILTIN_TAGS).map_err(|e| anyhow::anyhow!("invalid built-in tags: {e}"))
}

/// Trimmed keys, blanks dropped, first occurrence kept.
fn tag_list(configs: &[TagConfig]) -> Vec<TagOption> {
    let mut seen = HashSet::new();
    configs
        .iter()
        .filter_map(|t| {
            let key = t.key.trim();
            if key.is_empty() || !seen.insert(key.to_owned()) {
                return None;
            }
            Some(TagOption {
                key: key.to_owned(),
                icon: t.icon.clone().filter(|i| !i.trim().is_empty()),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    default: Vec<TagOption>,
    stay: Vec<TagOption>,
    food: Vec<TagOption>,
}

impl TagRegistry {
    #[must_use]
    pub fn from_config(config: &TagsConfig) -> Self {
        Self {
            default: tag_list(&config.default),
            stay: tag_list(&config.stay),
            food: tag_list(&config.food),
        }
    }

    /// Registry of the built-in tag lists.
    ///
    /// # Errors
    /// Returns an error if the embedded lists cannot be parsed.
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(Self::from_config(&builtin_tags_config()?))
    }

    /// Stay and food have their own lists; everything else gets the default.
    #[must_use]
    pub fn for_category(&self, category: CategoryFilter) -> &[TagOption] {
        match category {
            CategoryFilter::Only(SpotCategory::Stay) => &self.stay,
            CategoryFilter::Only(SpotCategory::Food) => &self.food,
            CategoryFilter::All
            | CategoryFilter::Only(SpotCategory::Attraction | SpotCategory::Unknown) => {
                &self.default
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::non_ascii_literal)]
mod tests {
    use super::*;

    fn keys(tags: &[TagOption]) -> Vec<&str> {
        tags.iter().map(|t| t.key.as_str()).collect()
    }

    #[test]
    fn builtin_lists_follow_category() {
        let registry = TagRegistry::builtin().unwrap();

        let stay = registry.for_category(CategoryFilter::Only(SpotCategory::Stay));
        assert_eq!(stay.len(), 9);
        assert_eq!(stay[0].key, "럭셔리");
        assert_eq!(stay[0].icon.as_deref(), Some("💎"));

        let food = registry.for_category(CategoryFilter::Only(SpotCategory::Food));
        assert!(keys(food).contains(&"흑돼지"));

        let attraction = registry.for_category(CategoryFilter::Only(SpotCategory::Attraction));
        assert_eq!(attraction, registry.for_category(CategoryFilter::All));
        assert_eq!(keys(attraction).first(), Some(&"휴식"));
    }

    #[test]
    fn builtin_lists_have_no_pseudo_tags() {
        let registry = TagRegistry::builtin().unwrap();
        for category in [
            CategoryFilter::All,
            CategoryFilter::Only(SpotCategory::Stay),
            CategoryFilter::Only(SpotCategory::Food),
        ] {
            assert!(!keys(registry.for_category(category)).contains(&"더보기"));
        }
    }

    #[test]
    fn config_lists_are_cleaned() {
        let yaml = r"
default:
  - key: ' quiet '
  - key: quiet
    icon: x
  - key: '  '
food:
  - key: noodles
    icon: ''
";
        let config: TagsConfig = serde_saphyr::from_str(yaml).unwrap();
        let registry = TagRegistry::from_config(&config);

        let default = registry.for_category(CategoryFilter::All);
        assert_eq!(keys(default), vec!["quiet"]);
        assert_eq!(default[0].icon, None);

        let food = registry.for_category(CategoryFilter::Only(SpotCategory::Food));
        assert_eq!(food[0].icon, None);
        assert!(registry.for_category(CategoryFilter::Only(SpotCategory::Stay)).is_empty());
    }
}
