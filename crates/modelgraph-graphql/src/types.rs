//! Field-type values for generated object types.
//!
//! A converted model field is described by a [`FieldSpec`]: a [`TypeSpec`]
//! plus description and nullability. Relation fields start out as
//! [`TypeSpec::Deferred`] — the related object type may not exist yet when
//! a type is built — and are rewritten to `Object`, `List`, or `Connection`
//! by the registry's resolution pass once every type is registered.

use crate::fields::ModelField;

/// The scalar kinds a model field can convert to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ScalarKind {
    /// UTF-8 text.
    String,
    /// An opaque identifier.
    Id,
    /// A signed integer.
    Int,
    /// A floating-point number.
    Float,
    /// True/false.
    Boolean,
    /// A point in time.
    DateTime,
}

impl ScalarKind {
    /// The scalar's type name as it appears in a schema.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Id => "ID",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
        }
    }
}

/// One member of an enumeration type.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumValue {
    /// The CONST_CASE member name.
    pub name: String,
    /// The underlying stored value.
    pub value: serde_json::Value,
}

/// An enumeration type generated from a field's choice list.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumType {
    /// The type name, `{MODEL}_{FIELD}` const-cased.
    pub name: String,
    /// Description, copied from the field's help text.
    pub description: String,
    /// The members in choice-list order.
    pub values: Vec<EnumValue>,
}

impl EnumType {
    /// Returns the member with the given name.
    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// The type of a converted field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    /// A scalar kind.
    Scalar(ScalarKind),
    /// An enumeration generated from choices.
    Enum(EnumType),
    /// A resolved reference to a generated object type, by type name.
    Object(String),
    /// A list of the inner type.
    List(Box<TypeSpec>),
    /// A cursor-paginated connection over a generated object type.
    Connection(String),
    /// A relation whose target type has not been resolved yet.
    Deferred(ModelField),
}

impl TypeSpec {
    /// Returns `true` if this spec still awaits registry resolution.
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

/// A complete field declaration on a generated object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// The field's type.
    pub of_type: TypeSpec,
    /// Human-readable description.
    pub description: String,
    /// Whether the field is declared non-null.
    pub non_null: bool,
}

impl FieldSpec {
    /// Creates a nullable field of the given type.
    pub const fn new(of_type: TypeSpec) -> Self {
        Self {
            of_type,
            description: String::new(),
            non_null: false,
        }
    }

    /// Creates a nullable scalar field.
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::new(TypeSpec::Scalar(kind))
    }

    /// Marks the field non-null.
    #[must_use]
    pub const fn non_null(mut self) -> Self {
        self.non_null = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A named argument accepted by a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The argument name.
    pub name: String,
    /// The argument's type.
    pub of_type: TypeSpec,
}

impl Argument {
    /// Creates an argument.
    pub fn new(name: impl Into<String>, of_type: TypeSpec) -> Self {
        Self {
            name: name.into(),
            of_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_names() {
        assert_eq!(ScalarKind::Id.name(), "ID");
        assert_eq!(ScalarKind::DateTime.name(), "DateTime");
    }

    #[test]
    fn test_field_spec_builder() {
        let f = FieldSpec::scalar(ScalarKind::Int)
            .non_null()
            .with_description("hit points");
        assert!(f.non_null);
        assert_eq!(f.description, "hit points");
        assert_eq!(f.of_type, TypeSpec::Scalar(ScalarKind::Int));
    }

    #[test]
    fn test_enum_value_lookup() {
        let e = EnumType {
            name: "WEAPON_KIND".to_string(),
            description: String::new(),
            values: vec![EnumValue {
                name: "BLUNT".to_string(),
                value: serde_json::json!(1),
            }],
        };
        assert!(e.value("BLUNT").is_some());
        assert!(e.value("SHARP").is_none());
    }

    #[test]
    fn test_is_deferred() {
        let spec = TypeSpec::Deferred(ModelField::forward("material"));
        assert!(spec.is_deferred());
        assert!(!TypeSpec::Scalar(ScalarKind::Id).is_deferred());
    }
}
