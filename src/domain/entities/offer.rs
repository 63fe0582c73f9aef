use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::OfferId;

/// Offer entity - a time-bounded association between a product and a seller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    id: OfferId,
    product_id: i64,
    seller_id: i64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    is_available: bool,
}

impl Offer {
    /// Create an offer with an open validity window
    pub fn new(id: OfferId, product_id: i64, seller_id: i64) -> Self {
        Self {
            id,
            product_id,
            seller_id,
            start_date: None,
            end_date: None,
            is_available: true,
        }
    }

    /// Reconstruct from storage
    pub fn reconstruct(
        id: OfferId,
        product_id: i64,
        seller_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        is_available: bool,
    ) -> Self {
        Self {
            id,
            product_id,
            seller_id,
            start_date,
            end_date,
            is_available,
        }
    }

    /// Restrict the validity window. `None` leaves that side open.
    pub fn with_validity(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(DomainError::InvalidValidityWindow { start, end });
            }
        }

        self.start_date = start_date;
        self.end_date = end_date;
        Ok(self)
    }

    /// True when `date` falls inside the validity window, bounds included
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= date)
            && self.end_date.map_or(true, |end| end >= date)
    }

    // Getters
    pub fn id(&self) -> OfferId {
        self.id
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn seller_id(&self) -> i64 {
        self.seller_id
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }
}
