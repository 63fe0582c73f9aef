use async_trait::async_trait;
use thiserror::Error;

use crate::domain::value_objects::SellerType;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Port mapping seller-type labels to attribute-set identifiers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SellerClassification: Send + Sync {
    /// `Ok(None)` when no classification carries that label
    async fn attribute_set_id_by_name(
        &self,
        seller_type: &SellerType,
    ) -> Result<Option<i64>, ClassificationError>;
}
