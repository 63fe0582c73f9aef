use async_trait::async_trait;
use thiserror::Error;

use crate::application::query::OfferSelect;
use crate::domain::entities::Offer;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unsupported query: {0}")]
    Unsupported(String),
}

/// Port executing an accumulated offer SELECT and hydrating its rows
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Fetch the offers selected, honouring order and pagination
    async fn fetch_all(&self, select: &OfferSelect) -> Result<Vec<Offer>, FetchError>;

    /// Count the offers matching the select's filters, ignoring pagination
    async fn fetch_count(&self, select: &OfferSelect) -> Result<i64, FetchError>;
}
