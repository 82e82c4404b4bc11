//! Query-string driven composition over a [`ScopedQuery`].
//!
//! List endpoints accept the same control parameters:
//!
//! | key | format | effect |
//! |-----|--------|--------|
//! | `sort` | `col[:dir],col[:dir]` | ordering; `dir` is `desc` or anything else for ascending |
//! | `fields` | `col,alias.col` | projection; the base `id` is always included |
//! | `page` | integer >= 1 | page number, default 1 |
//! | `limit` | integer >= 1 | page size, default 100, capped at 1000 |
//!
//! Every other non-empty key is an equality filter on a base-table column.
//! The composer only shapes the query; running it is the caller's job.

use std::collections::BTreeMap;

use campus_core::PageRequest;
use tracing::debug;

use crate::error::QueryError;
use crate::scoped::{ColumnRef, ScopedQuery, SortDirection};

/// Raw query-string pairs, ordered by key so composed SQL is deterministic.
pub type QueryParams = BTreeMap<String, String>;

/// Control keys that are never treated as filters.
pub const RESERVED_KEYS: [&str; 4] = ["page", "sort", "limit", "fields"];

#[derive(Debug)]
pub struct ApiQuery<'p> {
    query: ScopedQuery,
    params: &'p QueryParams,
    page: PageRequest,
}

impl<'p> ApiQuery<'p> {
    /// `base` must already carry the tenant and soft-delete predicates.
    pub fn new(base: ScopedQuery, params: &'p QueryParams) -> Self {
        Self {
            query: base,
            params,
            page: PageRequest::default(),
        }
    }

    pub fn filter(mut self) -> Result<Self, QueryError> {
        for (key, value) in self.params {
            if RESERVED_KEYS.contains(&key.as_str()) || value.is_empty() {
                continue;
            }
            let column = self.query.resolve(key)?;
            debug!(filter.column = %key, "Applying equality filter");
            self.query = self.query.where_text_eq(column, value.as_str());
        }
        Ok(self)
    }

    pub fn sort(mut self) -> Result<Self, QueryError> {
        let mut terms = Vec::new();

        if let Some(sort) = self.param("sort") {
            for segment in sort.split(',') {
                let (name, direction) = match segment.split_once(':') {
                    Some((name, direction)) => (name.trim(), direction.trim()),
                    None => (segment.trim(), ""),
                };
                if name.is_empty() {
                    continue;
                }
                let direction = if direction.eq_ignore_ascii_case("desc") {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                terms.push((self.query.resolve(name)?, direction));
            }
        }

        if terms.is_empty() {
            let created_at = ColumnRef::new(self.query.alias(), "created_at");
            self.query = self.query.order_by(created_at, SortDirection::Desc);
            return Ok(self);
        }

        for (i, (column, direction)) in terms.into_iter().enumerate() {
            self.query = if i == 0 {
                self.query.order_by(column, direction)
            } else {
                self.query.add_order_by(column, direction)
            };
        }
        Ok(self)
    }

    pub fn limit_fields(mut self) -> Result<Self, QueryError> {
        let Some(fields) = self.param("fields") else {
            return Ok(self);
        };

        let mut columns = Vec::new();
        for name in fields.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let column = self.query.resolve(name)?;
            if !columns.contains(&column) {
                columns.push(column);
            }
        }

        if columns.is_empty() {
            return Ok(self);
        }

        let id = ColumnRef::new(self.query.alias(), "id");
        if !columns.contains(&id) {
            columns.insert(0, id);
        }
        self.query = self.query.select(columns);
        Ok(self)
    }

    /// Never fails: unusable `page` / `limit` values fall back to defaults.
    pub fn paginate(mut self) -> Self {
        self.page = PageRequest::parse(self.param("page"), self.param("limit"));
        self.query = self.query.skip(self.page.skip()).take(self.page.limit);
        self
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn query(&self) -> &ScopedQuery {
        &self.query
    }

    pub fn into_query(self) -> ScopedQuery {
        self.query
    }

    fn param(&self, key: &str) -> Option<&'p str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoped::Table;
    use uuid::Uuid;

    const STUDENTS: Table = Table {
        name: "students",
        alias: "student",
        columns: &[
            "id",
            "school_id",
            "name",
            "age",
            "class_id",
            "is_deleted",
            "created_at",
        ],
    };

    const CLASSES: Table = Table {
        name: "classes",
        alias: "class",
        columns: &["id", "class_name", "is_deleted"],
    };

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base() -> ScopedQuery {
        ScopedQuery::new(STUDENTS)
            .where_eq("school_id", Uuid::new_v4())
            .not_deleted()
    }

    fn compose(pairs: &[(&str, &str)]) -> Result<ScopedQuery, QueryError> {
        let params = params(pairs);
        let composed = ApiQuery::new(base(), &params)
            .filter()?
            .sort()?
            .limit_fields()?
            .paginate();
        Ok(composed.into_query())
    }

    fn col(column: &'static str) -> ColumnRef {
        ColumnRef::new("student", column)
    }

    #[test]
    fn test_reserved_keys_add_no_predicates() {
        let query = compose(&[
            ("page", "2"),
            ("sort", "name"),
            ("limit", "5"),
            ("fields", "name"),
        ])
        .unwrap();
        assert_eq!(query.predicate_count(), base().predicate_count());
    }

    #[test]
    fn test_non_empty_filters_are_added_and_empty_skipped() {
        let query = compose(&[("name", "Ada"), ("age", ""), ("class_id", "abc")]).unwrap();
        assert_eq!(query.predicate_count(), base().predicate_count() + 2);

        let sql = query.select_builder().sql().to_string();
        assert!(sql.contains("\"student\".\"class_id\"::text = $3"));
        assert!(sql.contains("\"student\".\"name\"::text = $4"));
        assert!(!sql.contains("\"age\"::text"));
    }

    #[test]
    fn test_sort_terms_keep_their_order() {
        let query = compose(&[("sort", "name:desc,age:asc")]).unwrap();
        assert_eq!(
            query.order_terms(),
            &[
                (col("name"), SortDirection::Desc),
                (col("age"), SortDirection::Asc)
            ]
        );
    }

    #[test]
    fn test_sort_direction_parsing() {
        let query = compose(&[("sort", "name:DESC, age , ,created_at:sideways")]).unwrap();
        assert_eq!(
            query.order_terms(),
            &[
                (col("name"), SortDirection::Desc),
                (col("age"), SortDirection::Asc),
                (col("created_at"), SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let expected = [(col("created_at"), SortDirection::Desc)];
        assert_eq!(compose(&[]).unwrap().order_terms(), &expected);
        assert_eq!(compose(&[("sort", "")]).unwrap().order_terms(), &expected);
        assert_eq!(compose(&[("sort", " , ")]).unwrap().order_terms(), &expected);
    }

    #[test]
    fn test_page_two_limit_ten() {
        let query = compose(&[("page", "2"), ("limit", "10")]).unwrap();
        assert_eq!(query.offset(), Some(10));
        assert_eq!(query.limit(), Some(10));
    }

    #[test]
    fn test_non_numeric_page_is_first_page() {
        let params = params(&[("page", "abc")]);
        let composed = ApiQuery::new(base(), &params).paginate();
        assert_eq!(composed.page().page, 1);
        assert_eq!(composed.query().offset(), Some(0));
        assert_eq!(composed.query().limit(), Some(100));
    }

    #[test]
    fn test_limit_is_capped() {
        let query = compose(&[("limit", "100000")]).unwrap();
        assert_eq!(query.limit(), Some(1000));
    }

    #[test]
    fn test_fields_projection_includes_id() {
        let query = compose(&[("fields", "name, age")]).unwrap();
        assert_eq!(
            query.projection(),
            Some(&[col("id"), col("name"), col("age")][..])
        );
    }

    #[test]
    fn test_fields_with_alias_and_explicit_id() {
        let params = params(&[("fields", "class.class_name,id,name,name")]);
        let base = base().left_join(CLASSES, "class_id");
        let query = ApiQuery::new(base, &params)
            .limit_fields()
            .unwrap()
            .into_query();

        assert_eq!(
            query.projection(),
            Some(
                &[
                    ColumnRef::new("class", "class_name"),
                    col("id"),
                    col("name")
                ][..]
            )
        );
    }

    #[test]
    fn test_empty_fields_keep_default_projection() {
        assert!(compose(&[("fields", ",")]).unwrap().projection().is_none());
    }

    #[test]
    fn test_unknown_columns_are_rejected() {
        assert_eq!(
            compose(&[("password", "x")]).unwrap_err(),
            QueryError::UnknownColumn {
                alias: "student".to_string(),
                column: "password".to_string()
            }
        );
        assert!(compose(&[("sort", "shoe_size:desc")]).is_err());
        assert_eq!(
            compose(&[("fields", "teacher.name")]).unwrap_err(),
            QueryError::UnknownAlias("teacher".to_string())
        );
    }

    #[test]
    fn test_full_statement() {
        let params = params(&[
            ("name", "Ada"),
            ("sort", "age:desc"),
            ("fields", "name"),
            ("page", "3"),
            ("limit", "20"),
        ]);
        let query = ApiQuery::new(ScopedQuery::new(STUDENTS).not_deleted(), &params)
            .filter()
            .and_then(ApiQuery::sort)
            .and_then(ApiQuery::limit_fields)
            .unwrap()
            .paginate()
            .into_query();

        assert_eq!(
            query.select_builder().sql(),
            "SELECT jsonb_build_object('id', \"student\".\"id\", 'name', \"student\".\"name\") \
             FROM \"students\" AS \"student\" \
             WHERE \"student\".\"is_deleted\" = $1 AND \"student\".\"name\"::text = $2 \
             ORDER BY \"student\".\"age\" DESC LIMIT 20 OFFSET 40"
        );
    }
}
