use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::Identifier;
#[cfg(test)]
use mockall::automock;

/// Logical entities whose physical location is resolved through metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Offer,
    Seller,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Offer => write!(f, "offer"),
            EntityKind::Seller => write!(f, "seller"),
        }
    }
}

/// Physical table and primary-key column of an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityMetadata {
    entity_table: Identifier,
    identifier_field: Identifier,
}

impl EntityMetadata {
    pub fn new(entity_table: Identifier, identifier_field: Identifier) -> Self {
        Self {
            entity_table,
            identifier_field,
        }
    }

    pub fn entity_table(&self) -> &Identifier {
        &self.entity_table
    }

    pub fn identifier_field(&self) -> &Identifier {
        &self.identifier_field
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata not found for entity: {0}")]
    NotFound(EntityKind),
}

/// Port resolving logical entities to their physical table
#[cfg_attr(test, automock)]
pub trait MetadataResolver: Send + Sync {
    fn get_metadata(&self, entity: EntityKind) -> Result<EntityMetadata, MetadataError>;
}
