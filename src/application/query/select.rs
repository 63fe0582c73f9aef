use serde::{Deserialize, Serialize};

use crate::application::ports::EntityMetadata;
use crate::domain::value_objects::Identifier;

use super::{BindValue, ColumnRef, Condition, RenderedSql, SqlSink};

/// Alias under which the offer table is selected
pub const MAIN_TABLE_ALIAS: &str = "main_table";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

/// `INNER JOIN table ON left = right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: Identifier,
    pub left: ColumnRef,
    pub right: ColumnRef,
}

impl Join {
    pub fn inner(table: Identifier, left: ColumnRef, right: ColumnRef) -> Self {
        Self { table, left, right }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub column: ColumnRef,
    pub direction: SortDirection,
}

/// What the rendered statement returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Offer rows, ordered and paginated
    Rows,
    /// `COUNT(*)` over the filtered rows, ignoring order and pagination
    Count,
}

/// Accumulating SELECT over the offer table.
///
/// Joins are rendered in the FROM clause, so a join is always emitted before
/// any WHERE predicate that references the joined table. Conditions are kept
/// in insertion order and ANDed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferSelect {
    table: Identifier,
    identifier_field: Identifier,
    alias: Identifier,
    joins: Vec<Join>,
    conditions: Vec<Condition>,
    orderings: Vec<Ordering>,
    page_size: Option<u32>,
    current_page: u32,
}

impl OfferSelect {
    pub fn new(offer_metadata: &EntityMetadata) -> Self {
        Self {
            table: offer_metadata.entity_table().clone(),
            identifier_field: offer_metadata.identifier_field().clone(),
            alias: Identifier::from_static(MAIN_TABLE_ALIAS),
            joins: Vec::new(),
            conditions: Vec::new(),
            orderings: Vec::new(),
            page_size: None,
            current_page: 1,
        }
    }

    /// Column of the main table, qualified by its alias
    pub fn main_column(&self, column: Identifier) -> ColumnRef {
        ColumnRef::new(self.alias.clone(), column)
    }

    pub fn has_join(&self, table: &Identifier) -> bool {
        self.joins.iter().any(|join| &join.table == table)
    }

    /// Add an inner join. Returns false when the table is already joined.
    pub fn join_inner(&mut self, join: Join) -> bool {
        if self.has_join(&join.table) {
            return false;
        }
        self.joins.push(join);
        true
    }

    /// Add a conjunctive predicate. Returns false when an identical predicate
    /// is already present.
    pub fn and_where(&mut self, condition: Condition) -> bool {
        if self.conditions.contains(&condition) {
            return false;
        }
        self.conditions.push(condition);
        true
    }

    /// Sort by `column`. Sorting again on the same column replaces its
    /// direction and keeps its position.
    pub fn order_by(&mut self, column: ColumnRef, direction: SortDirection) {
        match self.orderings.iter_mut().find(|o| o.column == column) {
            Some(existing) => existing.direction = direction,
            None => self.orderings.push(Ordering { column, direction }),
        }
    }

    pub fn set_page_size(&mut self, page_size: Option<u32>) {
        self.page_size = page_size.filter(|size| *size > 0);
    }

    /// 1-based; values below 1 select the first page
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn table(&self) -> &Identifier {
        &self.table
    }

    pub fn identifier_field(&self) -> &Identifier {
        &self.identifier_field
    }

    pub fn alias(&self) -> &Identifier {
        &self.alias
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    pub fn limit(&self) -> Option<i64> {
        self.page_size.map(i64::from)
    }

    pub fn offset(&self) -> Option<i64> {
        self.page_size
            .map(|size| i64::from(size) * i64::from(self.current_page - 1))
    }

    /// Emit the statement fragment by fragment
    pub fn write_to<S: SqlSink + ?Sized>(&self, projection: Projection, sink: &mut S) {
        match projection {
            Projection::Rows => sink.push_sql(&format!("SELECT {}.* FROM ", self.alias.quoted())),
            Projection::Count => sink.push_sql("SELECT COUNT(*) FROM "),
        }
        sink.push_sql(&format!("{} AS {}", self.table.quoted(), self.alias.quoted()));

        for join in &self.joins {
            sink.push_sql(&format!(
                " INNER JOIN {} ON {} = {}",
                join.table.quoted(),
                join.left,
                join.right
            ));
        }

        for (index, condition) in self.conditions.iter().enumerate() {
            sink.push_sql(if index == 0 { " WHERE " } else { " AND " });
            condition.write_to(sink);
        }

        if projection == Projection::Count {
            return;
        }

        if !self.orderings.is_empty() {
            let clauses: Vec<String> = self
                .orderings
                .iter()
                .map(|o| format!("{} {}", o.column, o.direction.as_sql()))
                .collect();
            sink.push_sql(&format!(" ORDER BY {}", clauses.join(", ")));
        }

        if let (Some(limit), Some(offset)) = (self.limit(), self.offset()) {
            sink.push_sql(" LIMIT ");
            sink.push_bind(&BindValue::Int(limit));
            sink.push_sql(" OFFSET ");
            sink.push_bind(&BindValue::Int(offset));
        }
    }

    pub fn render(&self, projection: Projection) -> RenderedSql {
        let mut rendered = RenderedSql::default();
        self.write_to(projection, &mut rendered);
        rendered
    }

    /// SQL text with `$n` placeholders
    pub fn to_sql(&self) -> String {
        self.render(Projection::Rows).sql
    }

    /// Bound values in placeholder order
    pub fn binds(&self) -> Vec<BindValue> {
        self.render(Projection::Rows).binds
    }
}

impl std::fmt::Display for OfferSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}
