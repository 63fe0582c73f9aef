use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::value_objects::Identifier;

use super::SqlSink;

/// Value bound as a query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    Int(i64),
    Date(NaiveDate),
}

impl std::fmt::Display for BindValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindValue::Int(value) => write!(f, "{}", value),
            BindValue::Date(value) => write!(f, "{}", value),
        }
    }
}

/// Column qualified by the table name or alias it is read from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: Identifier,
    pub column: Identifier,
}

impl ColumnRef {
    pub fn new(table: Identifier, column: Identifier) -> Self {
        Self { table, column }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table.quoted(), self.column.quoted())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    LtEq,
    GtEq,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::LtEq => "<=",
            CompareOp::GtEq => ">=",
        }
    }
}

/// WHERE predicate. Top-level conditions of a select are ANDed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Compare {
        column: ColumnRef,
        op: CompareOp,
        value: BindValue,
    },
    IsNull(ColumnRef),
    /// Disjunction, rendered parenthesised
    AnyOf(Vec<Condition>),
}

impl Condition {
    pub fn eq(column: ColumnRef, value: BindValue) -> Self {
        Condition::Compare {
            column,
            op: CompareOp::Eq,
            value,
        }
    }

    pub fn compare(column: ColumnRef, op: CompareOp, value: BindValue) -> Self {
        Condition::Compare { column, op, value }
    }

    pub fn is_null(column: ColumnRef) -> Self {
        Condition::IsNull(column)
    }

    pub fn any_of(conditions: Vec<Condition>) -> Self {
        Condition::AnyOf(conditions)
    }

    pub(crate) fn write_to<S: SqlSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Condition::Compare { column, op, value } => {
                sink.push_sql(&format!("{} {} ", column, op.as_sql()));
                sink.push_bind(value);
            }
            Condition::IsNull(column) => {
                sink.push_sql(&format!("{} IS NULL", column));
            }
            Condition::AnyOf(conditions) => {
                sink.push_sql("(");
                for (index, condition) in conditions.iter().enumerate() {
                    if index > 0 {
                        sink.push_sql(" OR ");
                    }
                    condition.write_to(sink);
                }
                sink.push_sql(")");
            }
        }
    }
}
