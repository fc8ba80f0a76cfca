//! Catalog ingestion and the in-memory catalog snapshot.
//!
//! Raw records tolerate the shapes found in exported catalogs (tags as an
//! array or a comma-joined string, numeric ids, missing coordinates). They are
//! normalized exactly once here; everything downstream sees [`Spot`].
//! Scalar text fields given as numbers or booleans are read as strings, and a
//! record that still cannot be read is skipped on its own.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::bail;
use arc_swap::ArcSwap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use spot_discovery_sdk::models::{CatalogStatus, Spot, SpotCategory};
use tokio_util::sync::CancellationToken;

use crate::config::AssetConfig;

use super::normalize::resolve_thumbnail;
use super::ports::CatalogSource;

/// Catalog record as found in the source document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSpot {
    pub id: Option<RawId>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Option<RawTags>,
    #[serde(alias = "imageUrl", deserialize_with = "lenient_text")]
    pub thumbnail_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description_short: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub opening_hours: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub price_info: Option<String>,
    pub lat: Option<RawCoord>,
    pub lng: Option<RawCoord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// Tags as an array of scalars or a comma-joined string.
#[derive(Debug, Clone)]
pub enum RawTags {
    List(Vec<Value>),
    Joined(String),
}

/// String form of a JSON scalar. Null, arrays and objects have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RawTags>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(RawTags::List(items)),
        other => scalar_text(&other).map(RawTags::Joined),
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCoord {
    Number(f64),
    Text(String),
}

impl RawCoord {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
        .filter(|v: &f64| v.is_finite())
    }
}

/// Canonical tag list: trimmed, non-empty, deduplicated in first-seen order.
#[must_use]
pub fn canonical_tags(raw: Option<&RawTags>) -> Vec<String> {
    let candidates: Vec<String> = match raw {
        None => Vec::new(),
        Some(RawTags::List(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(RawTags::Joined(joined)) => joined.split(',').map(ToOwned::to_owned).collect(),
    };

    let mut seen = HashSet::new();
    candidates
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .map(ToOwned::to_owned)
        .collect()
}

/// Split a catalog document (a bare array or `{ "spots": [...] }`) into raw
/// records. Records that cannot be read are logged and skipped.
///
/// # Errors
/// Fails only when the document itself has neither shape.
pub fn records_from_document(doc: Value) -> anyhow::Result<Vec<RawSpot>> {
    let items = match doc {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("spots") {
            Some(Value::Array(items)) => items,
            _ => bail!("catalog object has no \"spots\" array"),
        },
        _ => bail!("catalog must be an array or an object with a \"spots\" array"),
    };

    let total = items.len();
    let records: Vec<RawSpot> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match RawSpot::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable catalog record");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(total, kept = records.len(), "catalog records skipped");
    }
    Ok(records)
}

fn canonical_id(raw: Option<&RawId>) -> Option<String> {
    let id = match raw? {
        RawId::Text(s) => s.trim().to_owned(),
        RawId::Number(n) => n.to_string(),
    };
    (!id.is_empty()).then_some(id)
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Convert raw records into canonical spots, preserving catalog order.
#[must_use]
pub fn ingest(raw: Vec<RawSpot>, assets: &AssetConfig) -> Vec<Spot> {
    raw.into_iter()
        .map(|r| {
            let name = r.name.unwrap_or_default().trim().to_owned();
            let thumbnail_url = resolve_thumbnail(&name, r.thumbnail_url.as_deref(), assets);
            Spot {
                id: canonical_id(r.id.as_ref()),
                category: SpotCategory::parse(r.category.as_deref().unwrap_or_default()),
                address: r.address.unwrap_or_default().trim().to_owned(),
                tags: canonical_tags(r.tags.as_ref()),
                thumbnail_url,
                description_short: non_blank(r.description_short),
                opening_hours: non_blank(r.opening_hours),
                phone: non_blank(r.phone),
                price_info: non_blank(r.price_info),
                lat: r.lat.as_ref().and_then(RawCoord::value),
                lng: r.lng.as_ref().and_then(RawCoord::value),
                name,
            }
        })
        .collect()
}

/// Immutable view of the catalog handed to readers.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub status: CatalogStatus,
    pub spots: Vec<Spot>,
}

/// Result of a catalog refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    /// The request was cancelled while in flight; the result was ignored.
    Discarded,
    Failed,
}

/// Holds the current catalog snapshot and reloads it from a source.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    assets: AssetConfig,
    snapshot: ArcSwap<CatalogSnapshot>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>, assets: AssetConfig) -> Self {
        Self {
            source,
            assets,
            snapshot: ArcSwap::from_pointee(CatalogSnapshot::default()),
        }
    }

    /// Fetch the catalog wholesale and swap it in, unless `cancel` fired
    /// while the fetch was outstanding.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, cancel: &CancellationToken) -> LoadOutcome {
        let fetched = self.source.fetch().await;

        if cancel.is_cancelled() {
            tracing::debug!("catalog request cancelled; ignoring late result");
            return LoadOutcome::Discarded;
        }

        match fetched {
            Ok(raw) => {
                let spots = ingest(raw, &self.assets);
                let count = spots.len();
                self.snapshot.store(Arc::new(CatalogSnapshot {
                    status: CatalogStatus::Ready,
                    spots,
                }));
                tracing::info!(count, "catalog loaded");
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                // A failed reload keeps the last good spots; only the status changes.
                let spots = self.snapshot.load().spots.clone();
                tracing::warn!(error = %e, kept = spots.len(), "catalog load failed");
                self.snapshot.store(Arc::new(CatalogSnapshot {
                    status: CatalogStatus::Failed {
                        reason: e.to_string(),
                    },
                    spots,
                }));
                LoadOutcome::Failed
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.load_full()
    }

    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        self.snapshot.load().status.clone()
    }

    /// Look a spot up by its [`Spot::key`]: the id, or the name of a legacy
    /// row without one.
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<Spot> {
        let key = key.trim();
        self.snapshot
            .load()
            .spots
            .iter()
            .find(|s| s.key() == key)
            .cloned()
    }
}
