//! # OfferCatalog - Offer query building
//!
//! Builds parameterized SQL SELECT statements over commerce offers, filtered
//! by product, seller, seller type and validity date, and executes them
//! through pluggable fetch strategies.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Offer and seller entities, validated value objects
//! - **Application**: The offer collection, its SELECT model and ports
//! - **Infrastructure**: PostgreSQL and in-memory adapters, metadata, events
//!
//! ## Key Features
//!
//! - Conjunctive, chainable filters with bound parameters only
//! - Seller-type filtering through a metadata-resolved seller join
//! - Open-ended validity windows (NULL start or end date)
//! - Collections freeze once loaded
//!
//! ## Example Usage
//!
//! ```no_run
//! use offer_catalog::{application::builder::OfferCollectionFactory, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let factory = OfferCollectionFactory::from_config(&config).await?;
//!
//! let mut offers = factory.create_for_seller_type(Some("retailer")).await?;
//! offers
//!     .add_product_filter(10)?
//!     .add_date_filter(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())?;
//!
//! for offer in offers.load().await? {
//!     println!("{} sold by {}", offer.id(), offer.seller_id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use application::errors::OfferCollectionError;
pub use application::offer_collection::{CollectionDependencies, CollectionOptions, OfferCollection};
pub use application::{ports, query};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
