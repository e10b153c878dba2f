//! Field descriptors for ORM models.
//!
//! [`FieldKind`] is the category of a model field — the schema layer
//! dispatches on the category, never on the field name. [`FieldDef`]
//! captures the per-field metadata the schema layer reads: name, category,
//! help text, nullability, and an optional choice list.

use crate::value::Value;

/// The category of a model field.
///
/// Relational categories carry the related model's name. `ReverseRelation`
/// is never declared on a model; it is synthesized by
/// [`ModelRegistry::reverse_fields`](crate::model::ModelRegistry::reverse_fields)
/// from foreign keys on other models.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum FieldKind {
    /// Variable-length string.
    Char,
    /// Unlimited-length text.
    Text,
    /// Fixed-length string.
    FixedChar,
    /// Raw binary data.
    Blob,
    /// Time of day.
    Time,
    /// UUID column.
    Uuid,
    /// Auto-incrementing primary key.
    PrimaryKey,
    /// 16-bit signed integer.
    SmallInteger,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    BigInteger,
    /// Unix timestamp stored as an integer.
    Timestamp,
    /// Boolean (true/false).
    Boolean,
    /// Fixed-precision decimal number.
    Decimal,
    /// 64-bit floating-point number.
    Float,
    /// Date without time.
    Date,
    /// Date and time.
    DateTime,
    /// Untyped column with no declared category.
    Bare,
    /// Many-to-one relationship.
    ForeignKey {
        /// The target model name.
        to: String,
        /// The name used for the reverse accessor on the target model.
        related_name: Option<String>,
    },
    /// The implicit one-to-many accessor on the target side of a foreign key.
    ReverseRelation {
        /// The model that declares the foreign key.
        to: String,
    },
}

impl FieldKind {
    /// Returns a short lowercase name for this category, used in error
    /// messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Text => "text",
            Self::FixedChar => "fixed char",
            Self::Blob => "blob",
            Self::Time => "time",
            Self::Uuid => "uuid",
            Self::PrimaryKey => "primary key",
            Self::SmallInteger => "small integer",
            Self::Integer => "integer",
            Self::BigInteger => "big integer",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Bare => "bare",
            Self::ForeignKey { .. } => "foreign key",
            Self::ReverseRelation { .. } => "reverse relation",
        }
    }

    /// Returns `true` if this category references another model.
    pub const fn is_relation(&self) -> bool {
        matches!(self, Self::ForeignKey { .. } | Self::ReverseRelation { .. })
    }
}

/// One entry in a field's choice list.
///
/// Choice lists may nest: a [`Choice::Group`] holds further entries under a
/// display label. Groups flatten recursively when converted to an
/// enumeration; the group label itself never becomes a member.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Choice {
    /// A selectable value with its display label.
    Item {
        /// The stored value.
        value: Value,
        /// The human-readable label the enum member name derives from.
        label: String,
    },
    /// A labelled group of further choices.
    Group {
        /// The group's display label (not a member).
        label: String,
        /// The entries within the group.
        items: Vec<Choice>,
    },
}

impl Choice {
    /// Creates a plain choice entry.
    pub fn item(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::Item {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Creates a labelled group of choices.
    pub fn group(label: impl Into<String>, items: Vec<Self>) -> Self {
        Self::Group {
            label: label.into(),
            items,
        }
    }
}

/// Complete definition of a model field as seen by the schema layer.
///
/// Constructed once at model-declaration time and immutable afterwards.
///
/// # Examples
///
/// ```
/// use modelgraph_orm::fields::{FieldDef, FieldKind};
///
/// let f = FieldDef::new("name", FieldKind::Char).help_text("Display name");
/// assert_eq!(f.name, "name");
/// assert!(!f.null);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldDef {
    /// The field's attribute name.
    pub name: String,
    /// The field category.
    pub kind: FieldKind,
    /// Human-readable help text, copied onto converted field descriptions.
    pub help_text: String,
    /// Whether NULL is allowed.
    pub null: bool,
    /// Allowed values; empty means the field is unconstrained.
    pub choices: Vec<Choice>,
}

impl FieldDef {
    /// Creates a new `FieldDef` with defaults (non-null, no help text, no
    /// choices).
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            help_text: String::new(),
            null: false,
            choices: Vec::new(),
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Allows NULL values.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Sets the choice list.
    #[must_use]
    pub fn choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    /// Shorthand for a foreign key field.
    pub fn foreign_key(
        name: impl Into<String>,
        to: impl Into<String>,
        related_name: Option<&str>,
    ) -> Self {
        Self::new(
            name,
            FieldKind::ForeignKey {
                to: to.into(),
                related_name: related_name.map(String::from),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_def_defaults() {
        let f = FieldDef::new("damage", FieldKind::Integer);
        assert_eq!(f.name, "damage");
        assert_eq!(f.kind, FieldKind::Integer);
        assert!(f.help_text.is_empty());
        assert!(!f.null);
        assert!(f.choices.is_empty());
    }

    #[test]
    fn test_field_def_builder() {
        let f = FieldDef::new("alive", FieldKind::Boolean)
            .nullable()
            .help_text("Still breathing");
        assert!(f.null);
        assert_eq!(f.help_text, "Still breathing");
    }

    #[test]
    fn test_foreign_key_shorthand() {
        let f = FieldDef::foreign_key("material", "material", Some("weapons"));
        match f.kind {
            FieldKind::ForeignKey { ref to, ref related_name } => {
                assert_eq!(to, "material");
                assert_eq!(related_name.as_deref(), Some("weapons"));
            }
            _ => panic!("expected foreign key"),
        }
        assert!(f.kind.is_relation());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::Bare.name(), "bare");
        assert_eq!(FieldKind::PrimaryKey.name(), "primary key");
        assert_eq!(
            FieldKind::ReverseRelation { to: "weapon".into() }.name(),
            "reverse relation"
        );
    }

    #[test]
    fn test_choice_constructors() {
        let group = Choice::group(
            "sizes",
            vec![Choice::item("s", "small"), Choice::item("l", "large")],
        );
        match group {
            Choice::Group { ref label, ref items } => {
                assert_eq!(label, "sizes");
                assert_eq!(items.len(), 2);
            }
            Choice::Item { .. } => panic!("expected group"),
        }
    }
}
