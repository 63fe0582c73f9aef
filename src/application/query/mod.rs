//! Parameterized SELECT model for offer collections.
//!
//! Identifiers and bound values are kept apart: identifiers are validated
//! [`Identifier`](crate::domain::value_objects::Identifier)s rendered quoted,
//! values only ever reach a [`SqlSink`] through `push_bind`.

mod condition;
mod select;

pub use condition::{BindValue, ColumnRef, CompareOp, Condition};
pub use select::{
    Join, OfferSelect, Ordering, Projection, SortDirection, MAIN_TABLE_ALIAS,
};

/// Receiver of rendered SQL fragments
pub trait SqlSink {
    fn push_sql(&mut self, sql: &str);
    fn push_bind(&mut self, value: &BindValue);
}

/// SQL text with PostgreSQL `$n` placeholders and the values they bind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSql {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

impl SqlSink for RenderedSql {
    fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    fn push_bind(&mut self, value: &BindValue) {
        self.binds.push(value.clone());
        self.sql.push_str(&format!("${}", self.binds.len()));
    }
}
