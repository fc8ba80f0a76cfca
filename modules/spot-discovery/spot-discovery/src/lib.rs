//! Spot Discovery Module Implementation
//!
//! Catalog search, favorites and reviews for points of interest. The public
//! API is defined in `spot-discovery-sdk` and re-exported here.

pub use spot_discovery_sdk::{
    CatalogStatus, FavoriteItem, Review, SearchCriteria, SearchOutcome, SessionContext, Spot,
    SpotDiscoveryApi, SpotsError, VoteSummary,
};

pub mod module;
pub use module::{Adapters, SpotDiscoveryModule};
pub use domain::catalog::LoadOutcome;

pub mod config;
pub use config::SpotDiscoveryConfig;

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
