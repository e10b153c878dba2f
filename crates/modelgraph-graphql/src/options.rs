//! Per-type configuration.
//!
//! [`TypeOptions`] carries the inclusion/exclusion lists, the filter
//! argument names, and the query defaults for one generated object type.
//! It is constructed once at type-declaration time and read-only afterward.

use std::collections::BTreeSet;

/// Configuration for a model-backed object type.
#[derive(Debug, Clone, Default)]
pub struct TypeOptions {
    /// When set, only these field names are exposed.
    pub only_fields: Option<BTreeSet<String>>,
    /// Field names that are always dropped. When node identity is enabled
    /// the identity field is force-added here.
    pub exclude_fields: BTreeSet<String>,
    /// Names of model fields that accept filter arguments; `None` means all
    /// filterable fields.
    pub filters: Option<Vec<String>>,
    /// Default ordering for connection fields over this type.
    pub order_by: Option<Vec<String>>,
    /// Default 1-based page number.
    pub page: Option<u64>,
    /// Default page size.
    pub paginate_by: Option<u64>,
}

impl TypeOptions {
    /// Creates empty options (expose everything, no defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the exposed fields to the given names.
    #[must_use]
    pub fn only_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Adds names to the exclusion list.
    #[must_use]
    pub fn exclude_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Restricts which model fields accept filter arguments.
    #[must_use]
    pub fn filters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the default ordering.
    #[must_use]
    pub fn order_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the default page number.
    #[must_use]
    pub const fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the default page size.
    #[must_use]
    pub const fn paginate_by(mut self, paginate_by: u64) -> Self {
        self.paginate_by = Some(paginate_by);
        self
    }

    /// Whether a field with the given name passes the inclusion/exclusion
    /// rules: the inclusion pass runs first, the exclusion pass second.
    pub fn includes(&self, name: &str) -> bool {
        let in_only = self
            .only_fields
            .as_ref()
            .map_or(true, |only| only.contains(name));
        in_only && !self.exclude_fields.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_includes_everything() {
        let opts = TypeOptions::new();
        assert!(opts.includes("name"));
        assert!(opts.includes("anything"));
    }

    #[test]
    fn test_only_fields_restricts() {
        let opts = TypeOptions::new().only_fields(["name"]);
        assert!(opts.includes("name"));
        assert!(!opts.includes("age"));
    }

    #[test]
    fn test_exclude_fields_drops() {
        let opts = TypeOptions::new().exclude_fields(["age"]);
        assert!(opts.includes("name"));
        assert!(!opts.includes("age"));
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        let opts = TypeOptions::new()
            .only_fields(["name", "age"])
            .exclude_fields(["age"]);
        assert!(opts.includes("name"));
        assert!(!opts.includes("age"));
    }

    #[test]
    fn test_defaults() {
        let opts = TypeOptions::new()
            .order_by(["-name"])
            .page(1)
            .paginate_by(25);
        assert_eq!(opts.order_by.as_deref(), Some(&["-name".to_string()][..]));
        assert_eq!(opts.page, Some(1));
        assert_eq!(opts.paginate_by, Some(25));
    }
}
