use sqlx::Postgres;

use crate::application::query::{BindValue, OfferSelect, Projection, SqlSink};

/// Builds executable sqlx queries from an [`OfferSelect`]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Row query, ordered and paginated
    pub fn offers(select: &OfferSelect) -> sqlx::QueryBuilder<'static, Postgres> {
        Self::build(select, Projection::Rows)
    }

    /// `COUNT(*)` query over the same filters
    pub fn offer_count(select: &OfferSelect) -> sqlx::QueryBuilder<'static, Postgres> {
        Self::build(select, Projection::Count)
    }

    fn build(
        select: &OfferSelect,
        projection: Projection,
    ) -> sqlx::QueryBuilder<'static, Postgres> {
        let mut builder = sqlx::QueryBuilder::new("");
        select.write_to(projection, &mut PgSink(&mut builder));
        builder
    }
}

struct PgSink<'b>(&'b mut sqlx::QueryBuilder<'static, Postgres>);

impl SqlSink for PgSink<'_> {
    fn push_sql(&mut self, sql: &str) {
        self.0.push(sql);
    }

    fn push_bind(&mut self, value: &BindValue) {
        match value {
            BindValue::Int(value) => self.0.push_bind(*value),
            BindValue::Date(value) => self.0.push_bind(*value),
        };
    }
}
