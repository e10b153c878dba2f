//! Relation wrappers and the connection field.
//!
//! [`ModelField`] represents a relation to a generated object type that may
//! not exist yet; the registry resolves it to a concrete type or a skip
//! signal once every type is registered.
//!
//! [`ConnectionField`] exposes an ORM-backed collection as a
//! cursor-paginated connection. It assembles a query from the requested
//! sub-fields and call-time arguments, hands it to the async execution
//! manager, and wraps the returned rows in the connection shape.

use crate::object::ModelObjectType;
use crate::registry::TypeRegistry;
use crate::relay::Connection;
use crate::selection::{requested_models, Selection};
use crate::types::{Argument, ScalarKind, TypeSpec};
use modelgraph_core::utils::text::to_snake_case;
use modelgraph_core::{GraphError, GraphResult};
use modelgraph_orm::fields::FieldKind;
use modelgraph_orm::manager::{Manager, Row};
use modelgraph_orm::model::{ModelDescriptor, ModelRef, ModelRegistry};
use modelgraph_orm::query::{JoinKind, OrderBy, Query};
use modelgraph_orm::value::Value;
use std::collections::BTreeMap;

/// Argument name for the ordering list.
pub const ORDER_BY_FIELD: &str = "order_by";
/// Argument name for the 1-based page number.
pub const PAGE_FIELD: &str = "page";
/// Argument name for the page size.
pub const PAGINATE_BY_FIELD: &str = "paginate_by";

// ── Model field wrapper ──────────────────────────────────────────────────

/// A relation to another generated object type, by model name.
///
/// Stored as [`TypeSpec::Deferred`] on converted fields until the registry
/// resolution pass runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
    /// The related model's name.
    pub model: String,
    /// Whether this is the reverse (one-to-many) side of the relation.
    pub reverse: bool,
}

/// The outcome of resolving a [`ModelField`] against the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelFieldResolution {
    /// The relation resolved to a concrete type.
    Resolved(TypeSpec),
    /// No type exists for the related model; omit the field.
    Skip,
}

impl ModelField {
    /// A forward (single-reference) relation.
    pub fn forward(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reverse: false,
        }
    }

    /// A reverse (one-to-many) relation.
    pub fn reverse(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reverse: true,
        }
    }

    /// Resolves this relation against the type registry.
    ///
    /// A reverse relation becomes a connection when the related type
    /// supports node identity and a plain list otherwise; a forward
    /// relation becomes a direct reference. When no type is registered for
    /// the related model, the field is skipped — unless the referencing
    /// type restricts its field set, in which case the omission cannot be
    /// what the developer meant and resolution fails.
    pub fn resolve(
        &self,
        parent: &ModelObjectType,
        registry: &TypeRegistry,
    ) -> GraphResult<ModelFieldResolution> {
        match registry.get_for_model(&self.model) {
            Some(target) => {
                let spec = if self.reverse {
                    if target.node {
                        TypeSpec::Connection(target.name.clone())
                    } else {
                        TypeSpec::List(Box::new(TypeSpec::Object(target.name.clone())))
                    }
                } else {
                    TypeSpec::Object(target.name.clone())
                };
                Ok(ModelFieldResolution::Resolved(spec))
            }
            None if parent.options.only_fields.is_some() => Err(GraphError::UnregisteredType {
                model: self.model.clone(),
                parent: parent.name.clone(),
            }),
            None => Ok(ModelFieldResolution::Skip),
        }
    }
}

// ── Filtering arguments ──────────────────────────────────────────────────

/// Derives the filter-argument schema from a model's fields.
///
/// Every non-relation field with a scalar mapping yields one argument of
/// that scalar kind; a forward foreign key yields an `{name}_id` argument
/// of identifier kind. `only` restricts the set to the named model fields.
pub fn filtering_args(model: &ModelDescriptor, only: Option<&[String]>) -> Vec<Argument> {
    let mut args = Vec::new();
    for field in &model.fields {
        if let Some(only) = only {
            if !only.contains(&field.name) {
                continue;
            }
        }
        let arg = match &field.kind {
            FieldKind::Char
            | FieldKind::Text
            | FieldKind::FixedChar
            | FieldKind::Blob
            | FieldKind::Time
            | FieldKind::Uuid => Argument::new(&field.name, TypeSpec::Scalar(ScalarKind::String)),
            FieldKind::PrimaryKey => Argument::new(&field.name, TypeSpec::Scalar(ScalarKind::Id)),
            FieldKind::SmallInteger
            | FieldKind::Integer
            | FieldKind::BigInteger
            | FieldKind::Timestamp => Argument::new(&field.name, TypeSpec::Scalar(ScalarKind::Int)),
            FieldKind::Boolean => Argument::new(&field.name, TypeSpec::Scalar(ScalarKind::Boolean)),
            FieldKind::Decimal | FieldKind::Float => {
                Argument::new(&field.name, TypeSpec::Scalar(ScalarKind::Float))
            }
            FieldKind::Date | FieldKind::DateTime => {
                Argument::new(&field.name, TypeSpec::Scalar(ScalarKind::DateTime))
            }
            FieldKind::ForeignKey { .. } => Argument::new(
                format!("{}_id", field.name),
                TypeSpec::Scalar(ScalarKind::Id),
            ),
            FieldKind::Bare | FieldKind::ReverseRelation { .. } => continue,
        };
        args.push(arg);
    }
    args
}

// ── Connection field ─────────────────────────────────────────────────────

/// Call-time arguments for a connection field.
///
/// Filter values use the same verbatim lookup syntax the ORM understands
/// (`name`, `damage__gt`, ...). Ordering names may arrive in an external
/// naming convention; they are snake-cased before field resolution.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Filter lookups and their values.
    pub filters: BTreeMap<String, Value>,
    /// Requested ordering; `None` falls back to the field's default.
    pub order_by: Option<Vec<String>>,
    /// Requested 1-based page number.
    pub page: Option<u64>,
    /// Requested page size.
    pub paginate_by: Option<u64>,
}

impl ConnectionArgs {
    /// Creates empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter lookup.
    #[must_use]
    pub fn filter(mut self, lookup: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(lookup.into(), value.into());
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn order_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn paginate_by(mut self, paginate_by: u64) -> Self {
        self.paginate_by = Some(paginate_by);
        self
    }
}

/// What a connection field resolves against.
#[derive(Debug, Clone)]
pub enum ConnectionSource {
    /// The field's bound model; a query is built and executed.
    Model,
    /// An already-materialized row list (e.g. fetched via attribute
    /// access); query building is bypassed and the rows pass through.
    Rows(Vec<Row>),
}

/// A cursor-paginated connection over one generated object type.
///
/// The argument schema and pagination defaults are fixed at construction;
/// per-call arguments are transient.
#[derive(Debug, Clone)]
pub struct ConnectionField {
    type_name: String,
    model: ModelRef,
    args: Vec<Argument>,
    order_by: Option<Vec<String>>,
    page: Option<u64>,
    paginate_by: Option<u64>,
}

impl ConnectionField {
    /// Creates a connection field over `object_type`, taking filter names
    /// and query defaults from the type's options.
    pub fn new(object_type: &ModelObjectType) -> Self {
        let options = &object_type.options;
        let mut args = filtering_args(&object_type.model, options.filters.as_deref());
        args.push(Argument::new(
            ORDER_BY_FIELD,
            TypeSpec::List(Box::new(TypeSpec::Scalar(ScalarKind::String))),
        ));
        args.push(Argument::new(PAGE_FIELD, TypeSpec::Scalar(ScalarKind::Int)));
        args.push(Argument::new(
            PAGINATE_BY_FIELD,
            TypeSpec::Scalar(ScalarKind::Int),
        ));
        Self {
            type_name: object_type.name.clone(),
            model: ModelRef::clone(&object_type.model),
            args,
            order_by: options.order_by.clone(),
            page: options.page,
            paginate_by: options.paginate_by,
        }
    }

    /// Overrides the default ordering.
    #[must_use]
    pub fn order_by_default<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the default page number.
    #[must_use]
    pub const fn page_default(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Overrides the default page size.
    #[must_use]
    pub const fn paginate_by_default(mut self, paginate_by: u64) -> Self {
        self.paginate_by = Some(paginate_by);
        self
    }

    /// The generated type this field is bound to.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The model backing this field.
    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    /// The field's argument schema: one argument per filterable model
    /// field plus `order_by`, `page`, and `paginate_by`.
    pub fn arguments(&self) -> &[Argument] {
        &self.args
    }

    /// Whether `name` is the stored column of one of the model's foreign
    /// keys. The column carries an `_id` suffix the declared field name
    /// lacks, and it is the name the filter-argument schema advertises.
    fn is_fk_column(&self, name: &str) -> bool {
        name.strip_suffix("_id")
            .map_or(false, |base| self.model.foreign_keys().any(|fk| fk.name == base))
    }

    fn order(&self, query: Query, order: &[String]) -> GraphResult<Query> {
        let mut terms = Vec::with_capacity(order.len());
        for item in order {
            let parsed = OrderBy::parse(item);
            let field = to_snake_case(&parsed.field);
            if self.model.field_named(&field).is_none() && !self.is_fk_column(&field) {
                return Err(GraphError::UnknownField {
                    model: self.model.name.clone(),
                    field,
                });
            }
            terms.push(OrderBy {
                field,
                descending: parsed.descending,
            });
        }
        Ok(query.order_by(terms))
    }

    const fn effective_pagination(&self, args: &ConnectionArgs) -> (Option<u64>, Option<u64>) {
        let page = match args.page {
            Some(p) => Some(p),
            None => self.page,
        };
        let paginate_by = match args.paginate_by {
            Some(p) => Some(p),
            None => self.paginate_by,
        };
        (page, paginate_by)
    }

    /// Builds the query for one call.
    ///
    /// Steps, each skipped when its input is empty: join every related
    /// model the requested sub-field tree implies (left outer, to avoid
    /// N+1 queries), apply filter lookups verbatim, resolve and apply
    /// ordering, apply pagination (only when both page and page size are
    /// present), and mark the query to aggregate rows per root entity when
    /// joins can fan out.
    pub fn build_query(
        &self,
        args: &ConnectionArgs,
        selection: &Selection,
        models: &ModelRegistry,
    ) -> GraphResult<Query> {
        let related = requested_models(selection, &self.model, models);
        let mut query = Query::new(&self.model.name)
            .select(related.iter().map(|m| m.name.clone()));
        for model in &related {
            query = query.join(&model.name, JoinKind::LeftOuter);
        }
        for (lookup, value) in &args.filters {
            query = query.filter(lookup, value.clone());
        }
        let order = args.order_by.as_ref().or(self.order_by.as_ref());
        if let Some(order) = order {
            query = self.order(query, order)?;
        }
        let (page, paginate_by) = self.effective_pagination(args);
        if let (Some(page), Some(paginate_by)) = (page, paginate_by) {
            query = query.paginate(page, paginate_by);
        }
        if !related.is_empty() {
            query = query.aggregate_rows();
        }
        tracing::debug!(
            model = %self.model.name,
            joins = related.len(),
            filters = args.filters.len(),
            ?page,
            ?paginate_by,
            "built connection query"
        );
        Ok(query)
    }

    /// Resolves this field to a connection.
    ///
    /// For a [`ConnectionSource::Model`] source the built query is handed
    /// to the manager; the call suspends until rows are available.
    /// Execution failures propagate unchanged. An already-materialized
    /// source bypasses query building entirely.
    pub async fn resolve(
        &self,
        manager: &dyn Manager,
        source: ConnectionSource,
        args: &ConnectionArgs,
        selection: &Selection,
        models: &ModelRegistry,
    ) -> GraphResult<Connection> {
        match source {
            ConnectionSource::Rows(rows) => Ok(Connection::from_rows(rows)),
            ConnectionSource::Model => {
                let query = self.build_query(args, selection, models)?;
                let rows = manager.execute(&query).await?;
                match (query.page, query.paginate_by) {
                    (Some(page), Some(paginate_by)) => {
                        Ok(Connection::from_page(rows, page, paginate_by))
                    }
                    _ => Ok(Connection::from_rows(rows)),
                }
            }
        }
    }
}
