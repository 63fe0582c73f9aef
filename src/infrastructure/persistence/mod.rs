mod postgres_fetch_strategy;
mod postgres_seller_classification;
mod query_builder;

pub use postgres_fetch_strategy::PostgresFetchStrategy;
pub use postgres_seller_classification::PostgresSellerClassification;
pub use query_builder::QueryBuilder;
