//! Shared fixtures for collection tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use offer_catalog::entities::{Offer, Seller};
use offer_catalog::infrastructure::events::RecordingEventDispatcher;
use offer_catalog::infrastructure::memory::InMemoryOfferStore;
use offer_catalog::infrastructure::metadata::StaticMetadataResolver;
use offer_catalog::ports::{EntityKind, EntityMetadata};
use offer_catalog::value_objects::{Identifier, OfferId};
use offer_catalog::{CollectionDependencies, CollectionOptions, OfferCollection};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn offer_metadata() -> EntityMetadata {
    EntityMetadata::new(
        Identifier::new("offer").unwrap(),
        Identifier::new("offer_id").unwrap(),
    )
}

pub fn seller_metadata() -> EntityMetadata {
    EntityMetadata::new(
        Identifier::new("seller_entity").unwrap(),
        Identifier::new("entity_id").unwrap(),
    )
}

/// o1: product 10, seller 1, open window
/// o2: product 10, seller 2, 2024-01-01..2024-12-31
/// o3: product 11, seller 1, open start, ends 2023-12-31
pub fn scenario_offers() -> Vec<Offer> {
    vec![
        Offer::new(OfferId::new(1), 10, 1),
        Offer::new(OfferId::new(2), 10, 2)
            .with_validity(Some(date(2024, 1, 1)), Some(date(2024, 12, 31)))
            .unwrap(),
        Offer::new(OfferId::new(3), 11, 1)
            .with_validity(None, Some(date(2023, 12, 31)))
            .unwrap(),
    ]
}

/// Sellers s1 (attribute set 5, "retailer") and s2 (attribute set 7, "wholesaler")
pub fn store_with(offers: Vec<Offer>) -> Arc<InMemoryOfferStore> {
    Arc::new(
        InMemoryOfferStore::new(seller_metadata())
            .with_offers(offers)
            .with_seller(Seller::new(1, 5))
            .with_seller(Seller::new(2, 7))
            .with_attribute_set("retailer", 5)
            .with_attribute_set("wholesaler", 7),
    )
}

pub fn scenario_store() -> Arc<InMemoryOfferStore> {
    store_with(scenario_offers())
}

pub fn dependencies(
    store: Arc<InMemoryOfferStore>,
    events: Arc<RecordingEventDispatcher>,
) -> CollectionDependencies {
    CollectionDependencies {
        metadata: Arc::new(
            StaticMetadataResolver::new()
                .with_entity(EntityKind::Offer, offer_metadata())
                .with_entity(EntityKind::Seller, seller_metadata()),
        ),
        classification: store.clone(),
        fetch: store,
        events,
    }
}

pub fn collection(store: Arc<InMemoryOfferStore>) -> OfferCollection {
    OfferCollection::new(
        dependencies(store, Arc::new(RecordingEventDispatcher::new())),
        CollectionOptions::default(),
    )
    .unwrap()
}

/// Sorted offer ids, for set comparisons
pub fn ids(offers: &[Offer]) -> Vec<i64> {
    let mut ids: Vec<i64> = offers.iter().map(|offer| offer.id().value()).collect();
    ids.sort_unstable();
    ids
}
