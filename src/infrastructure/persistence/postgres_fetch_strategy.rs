use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::application::ports::{FetchError, FetchStrategy};
use crate::application::query::OfferSelect;
use crate::domain::entities::Offer;
use crate::domain::value_objects::{OfferField, OfferId};

use super::QueryBuilder;

/// Optional availability flag, hydrated when the offer table carries it
const IS_AVAILABLE_FIELD: &str = "is_available";

pub struct PostgresFetchStrategy {
    pool: PgPool,
}

impl PostgresFetchStrategy {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FetchStrategy for PostgresFetchStrategy {
    async fn fetch_all(&self, select: &OfferSelect) -> Result<Vec<Offer>, FetchError> {
        let mut builder = QueryBuilder::offers(select);
        let rows = builder.build().fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| hydrate(row, select))
            .collect()
    }

    async fn fetch_count(&self, select: &OfferSelect) -> Result<i64, FetchError> {
        let mut builder = QueryBuilder::offer_count(select);
        let (count,) = builder
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Map an offer row onto the entity. Integer columns are expected as BIGINT.
fn hydrate(row: &PgRow, select: &OfferSelect) -> Result<Offer, FetchError> {
    let id: i64 = row.try_get(select.identifier_field().as_str())?;
    let product_id: i64 = row.try_get(OfferField::ProductId.column_name())?;
    let seller_id: i64 = row.try_get(OfferField::SellerId.column_name())?;
    let start_date: Option<NaiveDate> = row.try_get(OfferField::StartDate.column_name())?;
    let end_date: Option<NaiveDate> = row.try_get(OfferField::EndDate.column_name())?;

    let is_available = match row.try_get::<Option<bool>, _>(IS_AVAILABLE_FIELD) {
        Ok(value) => value.unwrap_or(true),
        Err(sqlx::Error::ColumnNotFound(_)) => true,
        Err(e) => return Err(e.into()),
    };

    Ok(Offer::reconstruct(
        OfferId::new(id),
        product_id,
        seller_id,
        start_date,
        end_date,
        is_available,
    ))
}
