//! Scoped read queries.
//!
//! A [`ScopedQuery`] targets one [`Table`] (plus optional left joins) and
//! accumulates predicates, ordering, projection and paging. Identifiers are
//! only ever taken from static [`Table`] descriptors and are always quoted;
//! values are always bound parameters.
//!
//! Rows come back as JSON objects built with `jsonb_build_object`, so the
//! projection can change per request without a matching Rust struct.

use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::QueryError;

/// A table as the query layer sees it.
///
/// `columns` is the allow-list of publicly readable columns. Anything not
/// listed (password hashes, for instance) can never be projected, filtered
/// or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub alias: &'static str,
    pub columns: &'static [&'static str],
}

impl Table {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Comma-separated column list for `RETURNING` / plain `SELECT` clauses.
    pub fn column_list(&self) -> String {
        self.columns.join(", ")
    }

    /// Looks up `column` and returns the descriptor's own `'static` copy.
    pub fn column(&self, column: &str) -> Result<ColumnRef, QueryError> {
        self.columns
            .iter()
            .find(|c| **c == column)
            .map(|c| ColumnRef::new(self.alias, *c))
            .ok_or_else(|| QueryError::UnknownColumn {
                alias: self.alias.to_string(),
                column: column.to_string(),
            })
    }
}

/// A column qualified with its table alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub alias: &'static str,
    pub column: &'static str,
}

impl ColumnRef {
    pub const fn new(alias: &'static str, column: &'static str) -> Self {
        Self { alias, column }
    }

    fn sql(&self) -> String {
        format!("{}.{}", quote(self.alias), quote(self.column))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Uuid(Uuid),
    Bool(bool),
    Text(String),
}

impl From<Uuid> for BindValue {
    fn from(value: Uuid) -> Self {
        BindValue::Uuid(value)
    }
}

impl From<bool> for BindValue {
    fn from(value: bool) -> Self {
        BindValue::Bool(value)
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
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

#[derive(Debug, Clone, PartialEq)]
struct Predicate {
    column: ColumnRef,
    /// Compare `column::text` against a text bind.
    as_text: bool,
    value: BindValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Join {
    table: Table,
    /// Column on the base table holding the joined row's id.
    foreign_key: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopedQuery {
    table: Table,
    joins: Vec<Join>,
    predicates: Vec<Predicate>,
    order: Vec<(ColumnRef, SortDirection)>,
    projection: Option<Vec<ColumnRef>>,
    offset: Option<i64>,
    limit: Option<i64>,
}

impl ScopedQuery {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            joins: Vec::new(),
            predicates: Vec::new(),
            order: Vec::new(),
            projection: None,
            offset: None,
            limit: None,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn alias(&self) -> &'static str {
        self.table.alias
    }

    /// `LEFT JOIN joined ON joined.id = base.foreign_key`. Soft-deleted
    /// joined rows are treated as absent.
    pub fn left_join(mut self, table: Table, foreign_key: &'static str) -> Self {
        self.joins.push(Join { table, foreign_key });
        self
    }

    /// Typed equality on a base-table column. Intended for the mandatory
    /// scope (`school_id`, `id`), which callers name statically.
    pub fn where_eq(mut self, column: &'static str, value: impl Into<BindValue>) -> Self {
        self.predicates.push(Predicate {
            column: ColumnRef::new(self.table.alias, column),
            as_text: false,
            value: value.into(),
        });
        self
    }

    /// `is_deleted = false` on the base table.
    pub fn not_deleted(self) -> Self {
        self.where_eq("is_deleted", false)
    }

    /// Equality between a column rendered as text and an untyped string.
    pub fn where_text_eq(mut self, column: ColumnRef, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate {
            column,
            as_text: true,
            value: BindValue::Text(value.into()),
        });
        self
    }

    /// Replaces any existing ordering with a single primary term.
    pub fn order_by(mut self, column: ColumnRef, direction: SortDirection) -> Self {
        self.order.clear();
        self.order.push((column, direction));
        self
    }

    /// Appends a secondary ordering term.
    pub fn add_order_by(mut self, column: ColumnRef, direction: SortDirection) -> Self {
        self.order.push((column, direction));
        self
    }

    pub fn select(mut self, columns: Vec<ColumnRef>) -> Self {
        self.projection = Some(columns);
        self
    }

    pub fn skip(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn take(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resolves `column` or `alias.column` against the base table and joins.
    pub fn resolve(&self, name: &str) -> Result<ColumnRef, QueryError> {
        match name.split_once('.') {
            Some((alias, column)) => self
                .tables()
                .find(|t| t.alias == alias)
                .ok_or_else(|| QueryError::UnknownAlias(alias.to_string()))?
                .column(column),
            None => self.table.column(name),
        }
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn order_terms(&self) -> &[(ColumnRef, SortDirection)] {
        &self.order
    }

    pub fn projection(&self) -> Option<&[ColumnRef]> {
        self.projection.as_deref()
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// Builds the row query: projection, joins, predicates, order and paging.
    pub fn select_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT jsonb_build_object(");

        let columns = self.projected_columns();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(format!("'{}', {}", self.output_key(column), column.sql()));
        }
        builder.push(")");

        self.push_from(&mut builder);
        self.push_where(&mut builder);

        if !self.order.is_empty() {
            builder.push(" ORDER BY ");
            let terms: Vec<String> = self
                .order
                .iter()
                .map(|(column, direction)| format!("{} {}", column.sql(), direction.as_sql()))
                .collect();
            builder.push(terms.join(", "));
        }

        if let Some(limit) = self.limit {
            builder.push(format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            builder.push(format!(" OFFSET {}", offset));
        }

        builder
    }

    /// Builds `SELECT COUNT(*)` over the same scope, ignoring order and paging.
    pub fn count_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*)");
        self.push_from(&mut builder);
        self.push_where(&mut builder);
        builder
    }

    pub async fn fetch_all(&self, db: &PgPool) -> Result<Vec<Value>, sqlx::Error> {
        let mut builder = self.select_builder();
        builder.build_query_scalar::<Value>().fetch_all(db).await
    }

    pub async fn fetch_optional(&self, db: &PgPool) -> Result<Option<Value>, sqlx::Error> {
        let mut builder = self.select_builder();
        builder.build_query_scalar::<Value>().fetch_optional(db).await
    }

    pub async fn count(&self, db: &PgPool) -> Result<i64, sqlx::Error> {
        let mut builder = self.count_builder();
        builder.build_query_scalar::<i64>().fetch_one(db).await
    }

    fn tables(&self) -> impl Iterator<Item = &Table> {
        std::iter::once(&self.table).chain(self.joins.iter().map(|j| &j.table))
    }

    fn projected_columns(&self) -> Vec<ColumnRef> {
        match &self.projection {
            Some(columns) => columns.clone(),
            None => self
                .table
                .columns
                .iter()
                .map(|c| ColumnRef::new(self.table.alias, *c))
                .collect(),
        }
    }

    fn output_key(&self, column: &ColumnRef) -> String {
        if column.alias == self.table.alias {
            column.column.to_string()
        } else {
            format!("{}.{}", column.alias, column.column)
        }
    }

    fn push_from(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        builder.push(format!(
            " FROM {} AS {}",
            quote(self.table.name),
            quote(self.table.alias)
        ));

        for join in &self.joins {
            let joined_id = ColumnRef::new(join.table.alias, "id");
            let foreign_key = ColumnRef::new(self.table.alias, join.foreign_key);
            builder.push(format!(
                " LEFT JOIN {} AS {} ON {} = {}",
                quote(join.table.name),
                quote(join.table.alias),
                joined_id.sql(),
                foreign_key.sql()
            ));
            if join.table.has_column("is_deleted") {
                builder.push(format!(
                    " AND {} = FALSE",
                    ColumnRef::new(join.table.alias, "is_deleted").sql()
                ));
            }
        }
    }

    fn push_where(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(predicate.column.sql());
            if predicate.as_text {
                builder.push("::text");
            }
            builder.push(" = ");
            match &predicate.value {
                BindValue::Uuid(value) => builder.push_bind(*value),
                BindValue::Bool(value) => builder.push_bind(*value),
                BindValue::Text(value) => builder.push_bind(value.clone()),
            };
        }
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}
