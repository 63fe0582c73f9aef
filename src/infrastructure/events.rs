//! Collection event dispatcher implementations

use parking_lot::Mutex;
use tracing::debug;

use crate::application::ports::{CollectionEvent, CollectionEventDispatcher};

/// Logs collection events through `tracing`
pub struct TracingEventDispatcher;

impl CollectionEventDispatcher for TracingEventDispatcher {
    fn dispatch(&self, event: &CollectionEvent) {
        match event {
            CollectionEvent::LoadBefore { model, sql } => {
                debug!(event = event.name(), model, sql = %sql, "Collection event")
            }
            CollectionEvent::LoadAfter { model, item_count } => {
                debug!(event = event.name(), model, item_count, "Collection event")
            }
        }
    }
}

/// Keeps dispatched events, for callers that inspect them afterwards
#[derive(Default)]
pub struct RecordingEventDispatcher {
    events: Mutex<Vec<CollectionEvent>>,
}

impl RecordingEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CollectionEvent> {
        self.events.lock().clone()
    }
}

impl CollectionEventDispatcher for RecordingEventDispatcher {
    fn dispatch(&self, event: &CollectionEvent) {
        self.events.lock().push(event.clone());
    }
}
