//! Static curated courses.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use spot_discovery_sdk::models::{Course, CourseDay, CourseItem};

const BUILTIN_COURSES: &str = include_str!("../../assets/courses.yaml");

/// Course definition as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourseConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub days: Vec<CourseDayConfig>,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourseDayConfig {
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub items: Vec<CourseItemConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourseItemConfig {
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub spot: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&CourseConfig> for Course {
    fn from(c: &CourseConfig) -> Self {
        Self {
            id: c.id.clone(),
            label: c.label.clone(),
            subtitle: c.subtitle.clone(),
            description: c.description.clone(),
            days: c
                .days
                .iter()
                .map(|d| CourseDay {
                    day: d.day,
                    title: d.title.clone(),
                    items: d
                        .items
                        .iter()
                        .map(|i| CourseItem {
                            time_label: i.time.clone(),
                            title: i.title.clone(),
                            spot_name: i.spot.clone(),
                            description: i.description.clone(),
                        })
                        .collect(),
                })
                .collect(),
            members: c.members.iter().cloned().collect::<BTreeSet<_>>(),
        }
    }
}

/// Parse the course definitions shipped with the module.
///
/// # Errors
/// Returns an error if the embedded YAML document is malformed.
pub fn builtin_course_configs() -> anyhow::Result<Vec<CourseConfig>> {
    serde_saphyr::from_str(BUILTIN_COURSES)
        .map_err(|e| anyhow::anyhow!("invalid built-in courses: {e}"))
}

/// Lookup of courses by id, keeping definition order for listings.
#[derive(Debug, Clone, Default)]
pub struct CourseRegistry {
    courses: Vec<Course>,
    by_id: HashMap<String, usize>,
}

impl CourseRegistry {
    /// Build from configuration. A repeated id keeps its first definition.
    #[must_use]
    pub fn from_config(configs: &[CourseConfig]) -> Self {
        let mut registry = Self::default();
        for cfg in configs {
            if registry.by_id.contains_key(&cfg.id) {
                tracing::warn!(course_id = %cfg.id, "duplicate course id ignored");
                continue;
            }
            registry
                .by_id
                .insert(cfg.id.clone(), registry.courses.len());
            registry.courses.push(cfg.into());
        }
        registry
    }

    /// Registry of the built-in courses.
    ///
    /// # Errors
    /// Returns an error if the embedded definitions cannot be parsed.
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(Self::from_config(&builtin_course_configs()?))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.by_id.get(id).map(|&idx| &self.courses[idx])
    }

    #[must_use]
    pub fn list(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn members(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.get(id).map(|c| &c.members)
    }
}

#[cfg(test)]
#[allow(clippy::non_ascii_literal)]
mod tests {
    use super::*;

    fn course(id: &str, members: &[&str]) -> CourseConfig {
        CourseConfig {
            id: id.to_owned(),
            label: id.to_uppercase(),
            subtitle: String::new(),
            description: String::new(),
            days: Vec::new(),
            members: members.iter().map(|m| (*m).to_owned()).collect(),
        }
    }

    #[test]
    fn builtin_courses_cover_four_directions() {
        let registry = CourseRegistry::builtin().unwrap();
        let ids: Vec<&str> = registry.list().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["east", "west", "south", "north"]);

        let east = registry.get("east").unwrap();
        assert!(east.members.contains("성산일출봉"));
        assert_eq!(east.days.first().map(|d| d.day), Some(1));
        assert_eq!(
            east.days[0].items[0].spot_name.as_deref(),
            Some("성산일출봉")
        );
    }

    #[test]
    fn first_definition_wins_on_duplicate_id() {
        let registry =
            CourseRegistry::from_config(&[course("east", &["A"]), course("east", &["B"])]);
        assert_eq!(registry.list().len(), 1);
        assert!(registry.members("east").unwrap().contains("A"));
    }

    #[test]
    fn unknown_course_is_absent() {
        let registry = CourseRegistry::from_config(&[course("west", &[])]);
        assert!(registry.get("nowhere").is_none());
        assert!(registry.members("west").unwrap().is_empty());
    }

    #[test]
    fn config_parses_from_yaml() {
        let yaml = r"
- id: mini
  label: Mini
  days:
    - day: 1
      title: Only day
      items:
        - time: AM
          title: Walk
          spot: Pier
  members: [Pier]
";
        let configs: Vec<CourseConfig> = serde_saphyr::from_str(yaml).unwrap();
        let registry = CourseRegistry::from_config(&configs);
        let mini = registry.get("mini").unwrap();
        assert_eq!(mini.days[0].items[0].time_label, "AM");
        assert!(mini.members.contains("Pier"));
    }
}
