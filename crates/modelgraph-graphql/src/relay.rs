//! Global identifiers, cursors, and the connection shape.
//!
//! A node's global identifier is `base64("{TypeName}:{pk}")`, opaque to
//! clients but reversible by [`get_node`]. Edge cursors encode the row's
//! offset in its result list; they are positional, not keyset cursors, so
//! they stay valid only for one ordering of one result set.

use crate::registry::TypeRegistry;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use modelgraph_core::{GraphError, GraphResult};
use modelgraph_orm::manager::{Manager, Row};
use modelgraph_orm::value::Value;
use serde::Serialize;

/// Prefix baked into every offset cursor.
const CURSOR_PREFIX: &str = "arrayconnection:";

/// Encodes a node's global identifier from its type name and primary key.
///
/// # Examples
///
/// ```
/// use modelgraph_graphql::relay::{from_global_id, to_global_id};
///
/// let id = to_global_id("WeaponNode", "3");
/// assert_eq!(from_global_id(&id).unwrap(), ("WeaponNode".to_string(), "3".to_string()));
/// ```
pub fn to_global_id(type_name: &str, pk: &str) -> String {
    STANDARD.encode(format!("{type_name}:{pk}"))
}

/// Decodes a global identifier back into type name and primary key.
///
/// # Errors
///
/// Returns [`GraphError::InvalidGlobalId`] when the input is not base64,
/// not UTF-8, or lacks the `type:pk` shape.
pub fn from_global_id(global_id: &str) -> GraphResult<(String, String)> {
    let invalid = || GraphError::InvalidGlobalId(global_id.to_string());
    let decoded = STANDARD.decode(global_id).map_err(|_| invalid())?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;
    let (type_name, pk) = decoded.split_once(':').ok_or_else(invalid)?;
    if type_name.is_empty() {
        return Err(invalid());
    }
    Ok((type_name.to_string(), pk.to_string()))
}

/// Encodes the cursor for a row at the given offset.
pub fn cursor(offset: usize) -> String {
    STANDARD.encode(format!("{CURSOR_PREFIX}{offset}"))
}

/// Pagination summary for one connection page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether a page precedes this one.
    pub has_previous_page: bool,
    /// Whether a page follows this one.
    pub has_next_page: bool,
    /// Cursor of the first edge, when any.
    pub start_cursor: Option<String>,
    /// Cursor of the last edge, when any.
    pub end_cursor: Option<String>,
}

/// One row and its positional cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// The row itself.
    pub node: Row,
    /// The row's cursor within this result set.
    pub cursor: String,
}

/// A page of rows in connection shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// The page's edges in result order.
    pub edges: Vec<Edge>,
    /// Pagination summary.
    pub page_info: PageInfo,
}

impl Connection {
    fn edges(rows: Vec<Row>) -> Vec<Edge> {
        rows.into_iter()
            .enumerate()
            .map(|(i, node)| Edge {
                cursor: cursor(i),
                node,
            })
            .collect()
    }

    fn page_info(edges: &[Edge], has_previous: bool, has_next: bool) -> PageInfo {
        PageInfo {
            has_previous_page: has_previous,
            has_next_page: has_next,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        }
    }

    /// Wraps an unpaginated result set. The whole set is one page.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let edges = Self::edges(rows);
        let page_info = Self::page_info(&edges, false, false);
        Self { edges, page_info }
    }

    /// Wraps one page of a paginated result set.
    ///
    /// `page` is 1-based. A full page signals that a next page may exist;
    /// without a total count this can report one spurious trailing page
    /// when the set's size is an exact multiple of the page size.
    pub fn from_page(rows: Vec<Row>, page: u64, paginate_by: u64) -> Self {
        let has_next =
            usize::try_from(paginate_by).map_or(false, |per| per > 0 && rows.len() == per);
        let edges = Self::edges(rows);
        let page_info = Self::page_info(&edges, page > 1, has_next);
        Self { edges, page_info }
    }

    /// The number of edges on this page.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the page has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Looks a node up by its global identifier.
///
/// A well-formed identifier naming an unregistered type, or a registered
/// type whose row is gone, resolves to `Ok(None)` rather than an error;
/// stale identifiers are an expected client-side condition. A malformed
/// identifier and execution failures still fail.
pub async fn get_node(
    manager: &dyn Manager,
    registry: &TypeRegistry,
    global_id: &str,
) -> GraphResult<Option<Row>> {
    let (type_name, pk) = from_global_id(global_id)?;
    let Some(object_type) = registry.get(&type_name) else {
        tracing::debug!(%type_name, "node lookup for unregistered type");
        return Ok(None);
    };
    let pk = pk
        .parse::<i64>()
        .map_or_else(|_| Value::String(pk), Value::Int);
    match manager.get(&object_type.model, &pk).await {
        Ok(row) => Ok(Some(row)),
        Err(GraphError::DoesNotExist(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
