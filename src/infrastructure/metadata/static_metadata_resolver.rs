use std::collections::HashMap;

use crate::application::ports::{EntityKind, EntityMetadata, MetadataError, MetadataResolver};

/// Table-driven metadata resolver
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataResolver {
    entries: HashMap<EntityKind, EntityMetadata>,
}

impl StaticMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: EntityKind, metadata: EntityMetadata) -> Self {
        self.register(entity, metadata);
        self
    }

    /// Register or replace the metadata of `entity`
    pub fn register(&mut self, entity: EntityKind, metadata: EntityMetadata) {
        self.entries.insert(entity, metadata);
    }
}

impl MetadataResolver for StaticMetadataResolver {
    fn get_metadata(&self, entity: EntityKind) -> Result<EntityMetadata, MetadataError> {
        self.entries
            .get(&entity)
            .cloned()
            .ok_or(MetadataError::NotFound(entity))
    }
}
