mod in_memory_offer_store;

pub use in_memory_offer_store::InMemoryOfferStore;
