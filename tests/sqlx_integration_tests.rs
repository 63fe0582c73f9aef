//! Integration tests using SQLx's #[sqlx::test] macro
//!
//! Each test gets an isolated database with the offer schema migrated and
//! the scenario rows loaded. Requires DATABASE_URL to point at a server.

use sqlx::PgPool;

use offer_catalog::application::builder::OfferCollectionFactory;
use offer_catalog::query::SortDirection;
use offer_catalog::value_objects::{OfferField, OfferId};
use offer_catalog::{Config, OfferCollectionError};

fn test_config(strict_seller_type: bool) -> Config {
    Config {
        database_url: "postgres://localhost/offers".to_string(),
        db_max_connections: 5,
        db_min_connections: 1,
        db_acquire_timeout_secs: 30,
        db_idle_timeout_secs: 600,
        db_max_lifetime_secs: 1800,
        offer_table: "offer".to_string(),
        offer_id_field: "offer_id".to_string(),
        seller_table: "seller_entity".to_string(),
        seller_id_field: "entity_id".to_string(),
        attribute_set_table: "attribute_set".to_string(),
        seller_entity_type: "seller".to_string(),
        default_seller_type: None,
        strict_seller_type,
    }
}

fn factory(pool: PgPool) -> OfferCollectionFactory {
    OfferCollectionFactory::from_pool(&test_config(false), pool).expect("Failed to wire factory")
}

fn ids(offers: &[offer_catalog::entities::Offer]) -> Vec<i64> {
    let mut ids: Vec<i64> = offers.iter().map(|offer| offer.id().value()).collect();
    ids.sort_unstable();
    ids
}

fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod sqlx_tests {
    use super::*;

    #[sqlx::test(migrations = "tests/migrations", fixtures("offers"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_product_and_date_filter(pool: PgPool) {
        let mut offers = factory(pool).create().await.unwrap();
        offers
            .add_product_filter(10)
            .unwrap()
            .add_date_filter(date(2024, 6, 1))
            .unwrap();

        assert_eq!(ids(offers.load().await.unwrap()), vec![1, 2]);
    }

    #[sqlx::test(migrations = "tests/migrations", fixtures("offers"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_date_outside_bounded_windows(pool: PgPool) {
        let mut offers = factory(pool).create().await.unwrap();
        offers.add_date_filter(date(2025, 1, 1)).unwrap();

        assert_eq!(ids(offers.load().await.unwrap()), vec![1]);
    }

    #[sqlx::test(migrations = "tests/migrations", fixtures("offers"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_seller_type_joins_seller_table(pool: PgPool) {
        let factory = factory(pool);
        let mut offers = factory.create_for_seller_type(Some("retailer")).await.unwrap();

        assert!(offers.select().to_sql().contains("INNER JOIN \"seller_entity\""));
        assert_eq!(ids(offers.load().await.unwrap()), vec![1, 3]);

        let unavailable = offers.get_item_by_id(OfferId::new(3)).unwrap();
        assert!(!unavailable.is_available());
    }

    #[sqlx::test(migrations = "tests/migrations", fixtures("offers"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_seller_type_scoped_to_entity_type(pool: PgPool) {
        // attribute set 9 is also named "retailer" but belongs to customers
        let mut offers = factory(pool)
            .create_for_seller_type(Some("retailer"))
            .await
            .unwrap();

        let binds = offers.select().binds();
        assert_eq!(
            serde_json::to_value(binds).unwrap(),
            serde_json::json!([5])
        );
        assert_eq!(offers.load().await.unwrap().len(), 2);
    }

    #[sqlx::test(migrations = "tests/migrations", fixtures("offers"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_seller_type(pool: PgPool) {
        let mut lenient = factory(pool.clone())
            .create_for_seller_type(Some("nonexistent"))
            .await
            .unwrap();
        assert!(lenient.select().joins().is_empty());
        assert_eq!(lenient.load().await.unwrap().len(), 3);

        let strict = OfferCollectionFactory::from_pool(&test_config(true), pool)
            .unwrap()
            .create_for_seller_type(Some("nonexistent"))
            .await;
        assert!(matches!(
            strict,
            Err(OfferCollectionError::SellerClassificationMissing(_))
        ));
    }

    #[sqlx::test(migrations = "tests/migrations", fixtures("offers"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_order_page_and_count(pool: PgPool) {
        let mut offers = factory(pool).create().await.unwrap();
        offers
            .set_order(OfferField::ProductId, SortDirection::Desc)
            .unwrap()
            .set_page_size(Some(2))
            .unwrap()
            .set_current_page(1)
            .unwrap();

        assert_eq!(offers.count().await.unwrap(), 3);

        let page = offers.load().await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].product_id(), 11);
    }

    #[sqlx::test(migrations = "tests/migrations", fixtures("offers"))]
    #[ignore = "requires DATABASE_URL"]
    async fn test_open_ended_windows_hydrate_as_none(pool: PgPool) {
        let mut offers = factory(pool).create().await.unwrap();
        offers.add_seller_filter(1).unwrap();
        offers.load().await.unwrap();

        let open = offers.get_item_by_id(OfferId::new(1)).unwrap();
        assert_eq!(open.start_date(), None);
        assert_eq!(open.end_date(), None);

        let bounded = offers.get_item_by_id(OfferId::new(3)).unwrap();
        assert_eq!(bounded.start_date(), None);
        assert_eq!(bounded.end_date(), Some(date(2023, 12, 31)));
    }
}
