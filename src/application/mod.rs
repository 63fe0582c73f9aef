pub mod builder;
pub mod errors;
pub mod offer_collection;
pub mod ports;
pub mod query;
