mod static_metadata_resolver;

pub use static_metadata_resolver::StaticMetadataResolver;
