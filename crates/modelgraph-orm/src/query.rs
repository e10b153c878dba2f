//! The chainable query value.
//!
//! [`Query`] is a description of a select, threaded through
//! filter → join → order → paginate → aggregate steps. Every step consumes
//! the query and returns a new one; a query is never shared across
//! concurrent resolutions, so no synchronization is needed. Execution is
//! entirely the [`Manager`](crate::manager::Manager)'s concern.

use crate::value::Value;

/// The join strategy for a related model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum JoinKind {
    /// Plain inner join.
    Inner,
    /// Left outer join; rows without a related row survive.
    LeftOuter,
}

/// A join onto a related model.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Join {
    /// The related model name.
    pub model: String,
    /// The join strategy.
    pub kind: JoinKind,
}

/// A single filter predicate.
///
/// The lookup expression is passed through verbatim to the execution layer:
/// a plain field name means equality, and `field__op` suffixes (`__gt`,
/// `__lte`, ...) carry the comparison operator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Filter {
    /// The lookup expression, e.g. `name` or `damage__gt`.
    pub lookup: String,
    /// The comparison value.
    pub value: Value,
}

/// One ordering term.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderBy {
    /// The model field to order by.
    pub field: String,
    /// Whether to sort descending.
    pub descending: bool,
}

impl OrderBy {
    /// Creates an ascending ordering term.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Creates a descending ordering term.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Parses an ordering term from its textual form, where a leading `-`
    /// means descending.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgraph_orm::query::OrderBy;
    ///
    /// assert_eq!(OrderBy::parse("-name"), OrderBy::desc("name"));
    /// assert_eq!(OrderBy::parse("damage"), OrderBy::asc("damage"));
    /// ```
    pub fn parse(s: &str) -> Self {
        s.strip_prefix('-').map_or_else(|| Self::asc(s), Self::desc)
    }
}

/// A description of a select over one model and its joined relations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Query {
    /// The root model name.
    pub model: String,
    /// The models whose columns are selected (root plus joined relations).
    pub select: Vec<String>,
    /// Joined related models.
    pub joins: Vec<Join>,
    /// Filter predicates, combined with AND.
    pub filters: Vec<Filter>,
    /// Ordering terms.
    pub order_by: Vec<OrderBy>,
    /// 1-based page number; pagination applies only when `paginate_by` is
    /// also present.
    pub page: Option<u64>,
    /// Page size.
    pub paginate_by: Option<u64>,
    /// Whether the execution layer should collapse fanned-out join rows
    /// back to one row per root entity.
    pub aggregate_rows: bool,
}

impl Query {
    /// Creates a query selecting the given model.
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            select: vec![model.clone()],
            model,
            joins: Vec::new(),
            filters: Vec::new(),
            order_by: Vec::new(),
            page: None,
            paginate_by: None,
            aggregate_rows: false,
        }
    }

    /// Adds related models to the select list.
    #[must_use]
    pub fn select(mut self, models: impl IntoIterator<Item = String>) -> Self {
        for m in models {
            if !self.select.contains(&m) {
                self.select.push(m);
            }
        }
        self
    }

    /// Joins a related model.
    #[must_use]
    pub fn join(mut self, model: impl Into<String>, kind: JoinKind) -> Self {
        self.joins.push(Join {
            model: model.into(),
            kind,
        });
        self
    }

    /// Adds a filter predicate. The lookup expression is kept verbatim.
    #[must_use]
    pub fn filter(mut self, lookup: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            lookup: lookup.into(),
            value: value.into(),
        });
        self
    }

    /// Sets the ordering, replacing any previous ordering.
    #[must_use]
    pub fn order_by(mut self, terms: Vec<OrderBy>) -> Self {
        self.order_by = terms;
        self
    }

    /// Applies pagination. `page` is 1-based.
    #[must_use]
    pub const fn paginate(mut self, page: u64, paginate_by: u64) -> Self {
        self.page = Some(page);
        self.paginate_by = Some(paginate_by);
        self
    }

    /// Marks the query to aggregate one row per root entity.
    #[must_use]
    pub const fn aggregate_rows(mut self) -> Self {
        self.aggregate_rows = true;
        self
    }
}
