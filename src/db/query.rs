//! Helpers shared by the paged listing queries.

use sea_orm::sea_query::{Alias, Expr, IntoIden};
use sea_orm::{Condition, Order};

use crate::domain::SortOrder;

/// Accumulates optional predicates and combines them with AND.
///
/// ```rust
/// use assetdesk::db::query::ConditionBuilder;
/// use assetdesk::entities::assets;
/// use sea_orm::ColumnTrait;
///
/// let search: Option<&str> = None;
/// let condition = ConditionBuilder::new()
///     .and(assets::Column::AssetName.is_not_null())
///     .and_if(search, |term| assets::Column::AssetName.contains(term))
///     .build();
/// assert_eq!(condition.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConditionBuilder {
    condition: Condition,
}

impl Default for ConditionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            condition: Condition::all(),
        }
    }

    #[must_use]
    pub fn and<C>(mut self, clause: C) -> Self
    where
        C: Into<sea_orm::sea_query::ConditionExpression>,
    {
        self.condition = self.condition.add(clause);
        self
    }

    /// Adds the clause built from `value` only when it is present.
    #[must_use]
    pub fn and_if<T, C, F>(self, value: Option<T>, build: F) -> Self
    where
        F: FnOnce(T) -> C,
        C: Into<sea_orm::sea_query::ConditionExpression>,
    {
        match value {
            Some(value) => self.and(build(value)),
            None => self,
        }
    }

    #[must_use]
    pub fn build(self) -> Condition {
        self.condition
    }
}

/// Column of a table joined under an alias, e.g. `user_to.username`.
pub fn aliased<C>(table: &str, column: C) -> Expr
where
    C: IntoIden + 'static,
{
    Expr::col((Alias::new(table), column))
}

/// `%term%` pattern for LIKE; `%` and `_` in the term are not escaped.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    format!("%{term}%")
}

/// Non-blank search term, trimmed.
#[must_use]
pub fn search_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|term| !term.is_empty())
}

#[must_use]
pub const fn order_of(sort: SortOrder) -> Order {
    if sort.is_ascending() {
        Order::Asc
    } else {
        Order::Desc
    }
}

/// Largest row offset that still binds as a sqlite integer.
const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// One-based page number as the zero-based index the paginator wants.
///
/// Pages below 1 become the first page. Pages whose offset
/// (`index * page_size`) would exceed the largest sqlite integer are clamped
/// to the last addressable page, which is simply empty.
#[must_use]
pub fn page_index(page_number: Option<u64>, page_size: u64) -> u64 {
    let index = page_number.unwrap_or(1).max(1) - 1;
    index.min(MAX_OFFSET / page_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::assets;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryTrait};

    #[test]
    fn skips_absent_clauses() {
        let status: Option<i32> = None;
        let condition = ConditionBuilder::new()
            .and_if(status, |s| assets::Column::Status.eq(s))
            .build();
        assert!(condition.is_empty());
    }

    #[test]
    fn combines_present_clauses_with_and() {
        let sql = assets::Entity::find()
            .filter(
                ConditionBuilder::new()
                    .and(assets::Column::AssetCode.eq("LA000001"))
                    .and_if(Some("lap"), |t| assets::Column::AssetName.like(contains_pattern(t)))
                    .build(),
            )
            .build(sea_orm::DatabaseBackend::Sqlite)
            .to_string();

        assert!(sql.contains(r#""assets"."asset_code" = 'LA000001' AND "assets"."asset_name" LIKE '%lap%'"#));
    }

    #[test]
    fn search_term_trims_blank() {
        assert_eq!(search_term(Some("  ")), None);
        assert_eq!(search_term(Some(" lap ")), Some("lap"));
        assert_eq!(search_term(None), None);
    }

    #[test]
    fn page_index_is_zero_based() {
        assert_eq!(page_index(None, 15), 0);
        assert_eq!(page_index(Some(0), 15), 0);
        assert_eq!(page_index(Some(3), 15), 2);
    }

    #[test]
    fn page_index_keeps_offset_in_range() {
        for size in [1, 15, 100] {
            let index = page_index(Some(u64::MAX), size);
            let offset = index.checked_mul(size).expect("offset fits in u64");
            assert!(offset <= MAX_OFFSET);
        }
        assert_eq!(page_index(Some(u64::MAX), 0), MAX_OFFSET);
    }
}
