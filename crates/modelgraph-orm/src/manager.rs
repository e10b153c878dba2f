//! Asynchronous query execution.
//!
//! The [`Manager`] trait is the execution seam: the schema layer hands it a
//! finished [`Query`] and suspends until rows come back. Cancellation and
//! timeouts belong to the surrounding task scheduler and the database
//! driver; this layer defines no policy of its own.
//!
//! [`MemoryManager`] is an in-memory implementation backing the test
//! suites. It honors filters, ordering, and pagination over stored rows.

use crate::model::ModelDescriptor;
use crate::query::Query;
use crate::value::Value;
use async_trait::async_trait;
use modelgraph_core::{GraphError, GraphResult};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

/// A single result row: ordered column/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Creates a row from parallel column and value lists.
    ///
    /// # Panics
    ///
    /// Panics if the lists have different lengths.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        assert_eq!(columns.len(), values.len(), "column/value length mismatch");
        Self { columns, values }
    }

    /// Returns the value in the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Renders the row as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(c, v)| (c.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl serde::Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The asynchronous execution manager.
///
/// `execute` runs a built query and returns its rows; `get` looks a single
/// row up by primary key, signalling a miss with
/// [`GraphError::DoesNotExist`]. Execution failures are reported through
/// the returned result and are not retried here.
#[async_trait]
pub trait Manager: Send + Sync {
    /// Executes a built query, returning all matching rows.
    async fn execute(&self, query: &Query) -> GraphResult<Vec<Row>>;

    /// Fetches one row of `model` by primary key.
    async fn get(&self, model: &ModelDescriptor, pk: &Value) -> GraphResult<Row>;
}

/// An in-memory [`Manager`] holding rows per model.
///
/// Joins and row aggregation are accepted but have no effect: rows are
/// stored flat, so there is no fan-out to collapse. Filters understand the
/// `field__op` lookups `ne`, `gt`, `gte`, `lt`, `lte`, `contains`, and
/// `in`; a bare field name means equality.
#[derive(Debug, Default)]
pub struct MemoryManager {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row to the named model's table.
    pub fn insert(&self, model: &str, row: Row) {
        self.tables
            .write()
            .expect("memory manager lock poisoned")
            .entry(model.to_string())
            .or_default()
            .push(row);
    }

    fn matches(row: &Row, lookup: &str, expected: &Value) -> bool {
        let (field, op) = split_lookup(lookup);
        let Some(actual) = row.get(field) else {
            return false;
        };
        match op {
            "exact" => actual == expected,
            "ne" => actual != expected,
            "gt" => actual.partial_cmp(expected) == Some(Ordering::Greater),
            "gte" => matches!(
                actual.partial_cmp(expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            "lt" => actual.partial_cmp(expected) == Some(Ordering::Less),
            "lte" => matches!(
                actual.partial_cmp(expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            "contains" => match (actual, expected) {
                (Value::String(a), Value::String(e)) => a.contains(e.as_str()),
                _ => false,
            },
            "in" => match expected {
                Value::List(options) => options.contains(actual),
                _ => false,
            },
            _ => false,
        }
    }

    fn compare(a: &Row, b: &Row, query: &Query) -> Ordering {
        for term in &query.order_by {
            let ord = match (a.get(&term.field), b.get(&term.field)) {
                (Some(x), Some(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            let ord = if term.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// Splits a lookup expression into field name and operator, defaulting to
/// `exact` when no recognized `__op` suffix is present.
fn split_lookup(lookup: &str) -> (&str, &str) {
    if let Some((field, op)) = lookup.rsplit_once("__") {
        if matches!(op, "exact" | "ne" | "gt" | "gte" | "lt" | "lte" | "contains" | "in") {
            return (field, op);
        }
    }
    (lookup, "exact")
}

#[async_trait]
impl Manager for MemoryManager {
    async fn execute(&self, query: &Query) -> GraphResult<Vec<Row>> {
        let tables = self.tables.read().expect("memory manager lock poisoned");
        let mut rows: Vec<Row> = tables.get(&query.model).cloned().unwrap_or_default();
        drop(tables);

        rows.retain(|row| {
            query
                .filters
                .iter()
                .all(|f| Self::matches(row, &f.lookup, &f.value))
        });
        if !query.order_by.is_empty() {
            rows.sort_by(|a, b| Self::compare(a, b, query));
        }
        if let (Some(page), Some(per)) = (query.page, query.paginate_by) {
            let offset = page
                .saturating_sub(1)
                .checked_mul(per)
                .ok_or_else(|| GraphError::Database("pagination offset overflow".to_string()))?;
            let start =
                usize::try_from(offset).map_err(|e| GraphError::Database(e.to_string()))?;
            let per = usize::try_from(per).map_err(|e| GraphError::Database(e.to_string()))?;
            rows = rows.into_iter().skip(start).take(per).collect();
        }
        Ok(rows)
    }

    async fn get(&self, model: &ModelDescriptor, pk: &Value) -> GraphResult<Row> {
        let tables = self.tables.read().expect("memory manager lock poisoned");
        tables
            .get(&model.name)
            .and_then(|rows| rows.iter().find(|r| r.get(model.pk_field()) == Some(pk)))
            .cloned()
            .ok_or_else(|| {
                GraphError::DoesNotExist(format!(
                    "{} with {}={pk}",
                    model.name,
                    model.pk_field()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldDef, FieldKind};
    use crate::query::OrderBy;

    fn row(id: i64, name: &str, damage: i64) -> Row {
        Row::new(
            vec!["id".to_string(), "name".to_string(), "damage".to_string()],
            vec![Value::Int(id), Value::from(name), Value::Int(damage)],
        )
    }

    fn seeded() -> MemoryManager {
        let manager = MemoryManager::new();
        manager.insert("weapon", row(1, "sword", 10));
        manager.insert("weapon", row(2, "stick", 2));
        manager.insert("weapon", row(3, "axe", 7));
        manager
    }

    #[test]
    fn test_row_get_and_json() {
        let r = row(1, "sword", 10);
        assert_eq!(r.get("name"), Some(&Value::from("sword")));
        assert_eq!(r.get("missing"), None);
        assert_eq!(
            r.to_json(),
            serde_json::json!({"id": 1, "name": "sword", "damage": 10})
        );
    }

    #[test]
    fn test_split_lookup() {
        assert_eq!(split_lookup("damage__gt"), ("damage", "gt"));
        assert_eq!(split_lookup("name"), ("name", "exact"));
        // An unknown suffix is part of the field name, passed through as-is.
        assert_eq!(split_lookup("related__name"), ("related__name", "exact"));
    }

    #[tokio::test]
    async fn test_execute_filters() {
        let manager = seeded();
        let q = Query::new("weapon").filter("damage__gt", 5_i64);
        let rows = manager.execute(&q).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_comparison_lookups() {
        let manager = seeded();
        for (lookup, expected) in [
            ("damage__ne", 2),
            ("damage__gte", 2),
            ("damage__lt", 1),
            ("damage__lte", 2),
        ] {
            let q = Query::new("weapon").filter(lookup, 7_i64);
            let rows = manager.execute(&q).await.unwrap();
            assert_eq!(rows.len(), expected, "lookup {lookup}");
        }
    }

    #[tokio::test]
    async fn test_execute_contains_lookup() {
        let manager = seeded();
        let q = Query::new("weapon").filter("name__contains", "st");
        let rows = manager.execute(&q).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&Value::from("stick")));

        // Containment is defined for strings only; other variants match
        // nothing rather than erroring.
        let q = Query::new("weapon").filter("damage__contains", 1_i64);
        assert!(manager.execute(&q).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_in_lookup() {
        let manager = seeded();
        let q = Query::new("weapon").filter(
            "name__in",
            Value::List(vec![Value::from("sword"), Value::from("axe")]),
        );
        let rows = manager.execute(&q).await.unwrap();
        assert_eq!(rows.len(), 2);

        // A non-list operand matches nothing.
        let q = Query::new("weapon").filter("name__in", "sword");
        assert!(manager.execute(&q).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_orders_descending() {
        let manager = seeded();
        let q = Query::new("weapon").order_by(vec![OrderBy::desc("damage")]);
        let rows = manager.execute(&q).await.unwrap();
        let damages: Vec<_> = rows.iter().map(|r| r.get("damage").cloned()).collect();
        assert_eq!(
            damages,
            vec![Some(Value::Int(10)), Some(Value::Int(7)), Some(Value::Int(2))]
        );
    }

    #[tokio::test]
    async fn test_execute_paginates() {
        let manager = seeded();
        let q = Query::new("weapon")
            .order_by(vec![OrderBy::asc("id")])
            .paginate(2, 2);
        let rows = manager.execute(&q).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id"), Some(&Value::Int(3)));
    }

    #[tokio::test]
    async fn test_execute_rejects_overflowing_page() {
        let manager = seeded();
        let q = Query::new("weapon").paginate(u64::MAX, 2);
        let err = manager.execute(&q).await.unwrap_err();
        assert!(matches!(err, GraphError::Database(_)));
    }

    #[tokio::test]
    async fn test_execute_unknown_model_is_empty() {
        let manager = seeded();
        let rows = manager.execute(&Query::new("monster")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_get_hit_and_miss() {
        let manager = seeded();
        let model = ModelDescriptor::new("weapon")
            .field(FieldDef::new("id", FieldKind::PrimaryKey))
            .field(FieldDef::new("name", FieldKind::Char));

        let found = manager.get(&model, &Value::Int(2)).await.unwrap();
        assert_eq!(found.get("name"), Some(&Value::from("stick")));

        let missing = manager.get(&model, &Value::Int(99)).await;
        assert!(matches!(missing, Err(GraphError::DoesNotExist(_))));
    }
}
