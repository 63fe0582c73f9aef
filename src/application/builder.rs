use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::application::errors::OfferCollectionError;
use crate::application::offer_collection::{
    CollectionDependencies, CollectionOptions, OfferCollection,
};
use crate::config::Config;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Identifier;
use crate::infrastructure::events::TracingEventDispatcher;
use crate::infrastructure::persistence::{PostgresFetchStrategy, PostgresSellerClassification};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid metadata: {0}")]
    Metadata(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Creates offer collections sharing one set of services.
///
/// Every collection created carries the factory's default seller type, if
/// any, applied eagerly.
#[derive(Clone)]
pub struct OfferCollectionFactory {
    dependencies: CollectionDependencies,
    options: CollectionOptions,
    default_seller_type: Option<String>,
}

impl OfferCollectionFactory {
    pub fn new(dependencies: CollectionDependencies, options: CollectionOptions) -> Self {
        Self {
            dependencies,
            options,
            default_seller_type: None,
        }
    }

    pub fn with_default_seller_type(mut self, seller_type: Option<String>) -> Self {
        self.default_seller_type = seller_type;
        self
    }

    /// Wire PostgreSQL-backed services from configuration
    pub async fn from_config(config: &Config) -> Result<Self, BuildError> {
        config.validate().map_err(BuildError::Config)?;
        let pool = connect_with_retry(config).await?;
        Self::from_pool(config, pool)
    }

    /// Wire PostgreSQL-backed services on an existing pool
    pub fn from_pool(config: &Config, pool: PgPool) -> Result<Self, BuildError> {
        let metadata = config.metadata_resolver()?;
        let attribute_set_table = Identifier::new(config.attribute_set_table.as_str())?;

        let dependencies = CollectionDependencies {
            metadata: Arc::new(metadata),
            classification: Arc::new(PostgresSellerClassification::new(
                pool.clone(),
                attribute_set_table,
                config.seller_entity_type.clone(),
            )),
            fetch: Arc::new(PostgresFetchStrategy::new(pool)),
            events: Arc::new(TracingEventDispatcher),
        };

        Ok(Self::new(dependencies, config.collection_options())
            .with_default_seller_type(config.default_seller_type.clone()))
    }

    /// New collection, restricted to the default seller type when one is set
    pub async fn create(&self) -> Result<OfferCollection, OfferCollectionError> {
        OfferCollection::for_seller_type(
            self.dependencies.clone(),
            self.options,
            self.default_seller_type.as_deref(),
        )
        .await
    }

    /// New collection restricted to `seller_type` instead of the default
    pub async fn create_for_seller_type(
        &self,
        seller_type: Option<&str>,
    ) -> Result<OfferCollection, OfferCollectionError> {
        OfferCollection::for_seller_type(self.dependencies.clone(), self.options, seller_type).await
    }

    pub fn dependencies(&self) -> &CollectionDependencies {
        &self.dependencies
    }

    pub fn options(&self) -> CollectionOptions {
        self.options
    }

    pub fn default_seller_type(&self) -> Option<&str> {
        self.default_seller_type.as_deref()
    }
}

/// Connect the pool, retrying with exponential backoff
async fn connect_with_retry(config: &Config) -> Result<PgPool, sqlx::Error> {
    let mut retries = 3;
    let mut delay = Duration::from_secs(1);

    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .min_connections(config.db_min_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout_secs)))
            .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime_secs)))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) if retries > 0 => {
                retries -= 1;
                tracing::warn!(
                    "Database connection failed, retrying in {:?} ({} retries left): {}",
                    delay,
                    retries,
                    e
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => {
                tracing::error!("Failed to connect to database after retries: {}", e);
                return Err(e);
            }
        }
    };

    info!(
        "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
        config.db_max_connections,
        config.db_min_connections,
        config.db_acquire_timeout_secs,
        config.db_idle_timeout_secs,
        config.db_max_lifetime_secs
    );

    Ok(pool)
}
