/// Offer select benchmarks
/// Measures SQL rendering and in-memory evaluation of filtered collections
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tokio::runtime::Runtime;

use offer_catalog::entities::{Offer, Seller};
use offer_catalog::infrastructure::events::RecordingEventDispatcher;
use offer_catalog::infrastructure::memory::InMemoryOfferStore;
use offer_catalog::infrastructure::metadata::StaticMetadataResolver;
use offer_catalog::infrastructure::persistence::QueryBuilder;
use offer_catalog::ports::{EntityKind, EntityMetadata};
use offer_catalog::query::SortDirection;
use offer_catalog::value_objects::{Identifier, OfferField, OfferId};
use offer_catalog::{CollectionDependencies, CollectionOptions, OfferCollection};

fn metadata(table: &str, field: &str) -> EntityMetadata {
    EntityMetadata::new(Identifier::new(table).unwrap(), Identifier::new(field).unwrap())
}

fn store(offer_count: i64) -> Arc<InMemoryOfferStore> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let offers = (1..=offer_count).map(|id| {
        let start = (id % 3 != 0).then(|| base + chrono::Duration::days(id % 200));
        let end = (id % 5 != 0).then(|| base + chrono::Duration::days(200 + id % 200));
        Offer::new(OfferId::new(id), id % 50, id % 4 + 1)
            .with_validity(start, end)
            .unwrap()
    });

    Arc::new(
        InMemoryOfferStore::new(metadata("seller_entity", "entity_id"))
            .with_offers(offers)
            .with_seller(Seller::new(1, 5))
            .with_seller(Seller::new(2, 7))
            .with_seller(Seller::new(3, 5))
            .with_seller(Seller::new(4, 7))
            .with_attribute_set("retailer", 5)
            .with_attribute_set("wholesaler", 7),
    )
}

fn dependencies(store: Arc<InMemoryOfferStore>) -> CollectionDependencies {
    CollectionDependencies {
        metadata: Arc::new(
            StaticMetadataResolver::new()
                .with_entity(EntityKind::Offer, metadata("offer", "offer_id"))
                .with_entity(EntityKind::Seller, metadata("seller_entity", "entity_id")),
        ),
        classification: store.clone(),
        fetch: store,
        events: Arc::new(RecordingEventDispatcher::new()),
    }
}

async fn filtered_collection(store: Arc<InMemoryOfferStore>) -> OfferCollection {
    let mut collection = OfferCollection::for_seller_type(
        dependencies(store),
        CollectionOptions::default(),
        Some("retailer"),
    )
    .await
    .unwrap();
    collection
        .add_product_filter(10)
        .unwrap()
        .add_date_filter(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .unwrap()
        .set_order(OfferField::StartDate, SortDirection::Desc)
        .unwrap()
        .set_page_size(Some(20))
        .unwrap();
    collection
}

fn rendering_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let collection = rt.block_on(filtered_collection(store(0)));
    let select = collection.select();

    let mut group = c.benchmark_group("select_rendering");
    group.bench_function("to_sql", |b| b.iter(|| select.to_sql()));
    group.bench_function("sqlx_query_builder", |b| {
        b.iter(|| QueryBuilder::offers(select).into_sql())
    });
    group.bench_function("count_query_builder", |b| {
        b.iter(|| QueryBuilder::offer_count(select).into_sql())
    });
    group.finish();
}

fn evaluation_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("in_memory_load");
    group.measurement_time(Duration::from_secs(5));

    for size in [100i64, 1_000, 10_000] {
        let store = store(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("filtered_load", size), &store, |b, store| {
            b.to_async(&rt).iter(|| {
                let store = store.clone();
                async move {
                    let mut collection = filtered_collection(store).await;
                    collection.load().await.unwrap().len()
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, rendering_benchmarks, evaluation_benchmarks);
criterion_main!(benches);
