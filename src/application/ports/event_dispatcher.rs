use serde::Serialize;
#[cfg(test)]
use mockall::automock;

/// Lifecycle events of an offer collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CollectionEvent {
    LoadBefore { model: &'static str, sql: String },
    LoadAfter { model: &'static str, item_count: usize },
}

impl CollectionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionEvent::LoadBefore { .. } => "offer_collection_load_before",
            CollectionEvent::LoadAfter { .. } => "offer_collection_load_after",
        }
    }
}

/// Port notified around collection materialization
#[cfg_attr(test, automock)]
pub trait CollectionEventDispatcher: Send + Sync {
    fn dispatch(&self, event: &CollectionEvent);
}
