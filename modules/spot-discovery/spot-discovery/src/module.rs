use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use spot_discovery_sdk::api::SpotDiscoveryApi;
use spot_discovery_sdk::session::SessionContext;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::rest::routes;
use crate::config::SpotDiscoveryConfig;
use crate::domain::catalog::{CatalogStore, LoadOutcome};
use crate::domain::courses::CourseRegistry;
use crate::domain::favorites::FavoritesRegistry;
use crate::domain::ports::CatalogSource;
use crate::domain::repo::ReviewsRepository;
use crate::domain::reviews::{ReviewService, ServiceConfig};
use crate::domain::tags::TagRegistry;
use crate::infra::catalog::{FileCatalogSource, StaticCatalogSource};
use crate::infra::kv::{FileKvStorage, InMemoryKvStorage, KvFavoritesSlots, KvStorage};
use crate::infra::storage::memory_repo::InMemoryReviewsRepository;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmReviewsRepository;
use crate::local_client::LocalClient;

/// Outbound collaborators of the module.
pub struct Adapters {
    pub catalog: Arc<dyn CatalogSource>,
    pub kv: Arc<dyn KvStorage>,
    pub reviews: Arc<dyn ReviewsRepository>,
}

impl Adapters {
    /// Select adapters from configuration: files and a database where
    /// configured, in-memory stand-ins otherwise.
    ///
    /// # Errors
    /// Fails when the review database cannot be reached or migrated.
    pub async fn from_config(config: &SpotDiscoveryConfig) -> anyhow::Result<Self> {
        let catalog: Arc<dyn CatalogSource> = if let Some(path) = &config.catalog_path {
            Arc::new(FileCatalogSource::new(path))
        } else {
            warn!("no catalog_path configured; catalog will be empty");
            Arc::new(StaticCatalogSource::default())
        };

        let kv: Arc<dyn KvStorage> = if let Some(dir) = &config.favorites.dir {
            Arc::new(FileKvStorage::new(dir))
        } else {
            info!("favorites kept in memory only");
            Arc::new(InMemoryKvStorage::new())
        };

        let reviews: Arc<dyn ReviewsRepository> =
            if let Some(url) = &config.reviews.database_url {
                let mut opts = ConnectOptions::new(url.clone());
                opts.sqlx_logging(false);
                let db = Database::connect(opts)
                    .await
                    .context("failed to connect to review database")?;

                info!("running review database migrations");
                Migrator::up(&db, None)
                    .await
                    .context("review database migration failed")?;
                Arc::new(SeaOrmReviewsRepository::new(db))
            } else {
                info!("reviews kept in memory only");
                Arc::new(InMemoryReviewsRepository::new())
            };

        Ok(Self {
            catalog,
            kv,
            reviews,
        })
    }
}

/// Wired spot-discovery module: domain services plus their adapters.
pub struct SpotDiscoveryModule {
    catalog: Arc<CatalogStore>,
    client: Arc<LocalClient>,
}

fn course_registry(config: &SpotDiscoveryConfig) -> anyhow::Result<CourseRegistry> {
    match &config.courses {
        Some(courses) => Ok(CourseRegistry::from_config(courses)),
        None => CourseRegistry::builtin(),
    }
}

fn tag_registry(config: &SpotDiscoveryConfig) -> anyhow::Result<TagRegistry> {
    match &config.tags {
        Some(tags) => Ok(TagRegistry::from_config(tags)),
        None => TagRegistry::builtin(),
    }
}

impl SpotDiscoveryModule {
    /// # Errors
    /// See [`Adapters::from_config`] and [`SpotDiscoveryModule::with_adapters`].
    pub async fn init(
        config: &SpotDiscoveryConfig,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Self> {
        let adapters = Adapters::from_config(config).await?;
        Self::with_adapters(config, adapters, cancel).await
    }

    /// Build the services, restore the anonymous favorites and run the first
    /// catalog load.
    ///
    /// A failed catalog load is not an error here; it shows up as the
    /// catalog status.
    ///
    /// # Errors
    /// Fails when the course or tag definitions cannot be parsed.
    pub async fn with_adapters(
        config: &SpotDiscoveryConfig,
        adapters: Adapters,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Self> {
        info!("initializing spot-discovery module");

        let courses = Arc::new(course_registry(config)?);
        let course_count = courses.list().len();
        let tags = Arc::new(tag_registry(config)?);
        let catalog = Arc::new(CatalogStore::new(
            adapters.catalog,
            config.assets.clone(),
        ));

        let favorites = Arc::new(FavoritesRegistry::new(Arc::new(KvFavoritesSlots::new(
            adapters.kv,
            config.favorites.key.clone(),
        ))));
        let restored = favorites
            .for_session(&SessionContext::anonymous())
            .await
            .list()
            .await
            .len();

        let reviews = Arc::new(ReviewService::new(
            adapters.reviews,
            ServiceConfig {
                max_comment_length: config.reviews.max_comment_length,
            },
        ));

        if let LoadOutcome::Failed = catalog.refresh(cancel).await {
            warn!("starting with an empty catalog");
        }

        let client = Arc::new(LocalClient::new(
            catalog.clone(),
            courses,
            tags,
            favorites,
            reviews,
            config.home.sample_size,
        ));

        info!(
            courses = course_count,
            favorites = restored,
            "spot-discovery module initialized"
        );
        Ok(Self { catalog, client })
    }

    /// Validate configuration without starting anything: course and tag
    /// definitions must parse and the catalog must be readable.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub async fn check(config: &SpotDiscoveryConfig) -> anyhow::Result<()> {
        let courses = course_registry(config)?;
        tag_registry(config)?;
        if let Some(path) = &config.catalog_path {
            let raw = FileCatalogSource::new(path).fetch().await?;
            info!(spots = raw.len(), courses = courses.list().len(), "configuration is valid");
        }
        Ok(())
    }

    #[must_use]
    pub fn api(&self) -> Arc<dyn SpotDiscoveryApi> {
        self.client.clone()
    }

    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.api())
    }

    /// Reload the catalog wholesale.
    pub async fn refresh_catalog(&self, cancel: &CancellationToken) -> LoadOutcome {
        self.catalog.refresh(cancel).await
    }
}
