mod event_dispatcher;
mod fetch_strategy;
mod metadata_resolver;
mod seller_classification;

pub use event_dispatcher::{CollectionEvent, CollectionEventDispatcher};
pub use fetch_strategy::{FetchError, FetchStrategy};
pub use metadata_resolver::{EntityKind, EntityMetadata, MetadataError, MetadataResolver};
pub use seller_classification::{ClassificationError, SellerClassification};

#[cfg(test)]
pub use event_dispatcher::MockCollectionEventDispatcher;
#[cfg(test)]
pub use fetch_strategy::MockFetchStrategy;
#[cfg(test)]
pub use metadata_resolver::MockMetadataResolver;
#[cfg(test)]
pub use seller_classification::MockSellerClassification;
