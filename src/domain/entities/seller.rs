use serde::{Deserialize, Serialize};

/// Seller entity as seen by offer queries: identity plus classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    id: i64,
    attribute_set_id: i64,
}

impl Seller {
    pub fn new(id: i64, attribute_set_id: i64) -> Self {
        Self {
            id,
            attribute_set_id,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn attribute_set_id(&self) -> i64 {
        self.attribute_set_id
    }
}
