//! Error type surfaced by offer collections.

use thiserror::Error;

use crate::application::ports::{ClassificationError, FetchError, MetadataError};

#[derive(Debug, Error)]
pub enum OfferCollectionError {
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Seller classification not found: {0}")]
    SellerClassificationMissing(String),

    #[error("Seller classification lookup failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Collection is already loaded and can no longer be modified")]
    AlreadyMaterialized,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::EntityKind;

    #[test]
    fn test_from_metadata_error() {
        let err: OfferCollectionError = MetadataError::NotFound(EntityKind::Seller).into();

        assert!(matches!(err, OfferCollectionError::Metadata(_)));
        assert_eq!(
            err.to_string(),
            "Metadata error: Metadata not found for entity: seller"
        );
    }

    #[test]
    fn test_from_fetch_error() {
        let err: OfferCollectionError =
            FetchError::Unsupported("join against unknown table warehouse".to_string()).into();

        assert!(matches!(err, OfferCollectionError::Fetch(_)));
        assert!(err.to_string().contains("warehouse"));
    }

    #[test]
    fn test_from_classification_error() {
        let err: OfferCollectionError =
            ClassificationError::Database(sqlx::Error::PoolTimedOut).into();

        assert!(matches!(err, OfferCollectionError::Classification(_)));
        assert!(err
            .to_string()
            .starts_with("Seller classification lookup failed: Database error"));
    }

    #[test]
    fn test_seller_classification_missing_display() {
        let err = OfferCollectionError::SellerClassificationMissing("wholesaler".to_string());
        assert_eq!(err.to_string(), "Seller classification not found: wholesaler");
    }
}
