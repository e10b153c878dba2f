//! Conversion from ORM field descriptors to field-type values.
//!
//! Dispatch is by field category, never by name. A field carrying a choice
//! list converts to an enumeration instead of its scalar kind; the
//! enumeration is recorded in the [`EnumRegistry`] owned by the
//! schema-construction context, keyed by `(model, field)` so same-named
//! fields on different models cannot collide.
//!
//! Every mapped category except boolean produces a non-null field; an
//! unmapped category is a hard failure at schema-construction time.

use crate::fields::ModelField;
use crate::types::{EnumType, EnumValue, FieldSpec, ScalarKind, TypeSpec};
use modelgraph_core::utils::text::to_const_case;
use modelgraph_core::{GraphError, GraphResult};
use modelgraph_orm::fields::{Choice, FieldDef, FieldKind};
use modelgraph_orm::model::ModelDescriptor;
use std::collections::BTreeMap;

/// The enumeration types generated during schema construction.
///
/// Keyed by `(model name, field name)`.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    enums: BTreeMap<(String, String), EnumType>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the enumeration generated for the given model field.
    pub fn get(&self, model: &str, field: &str) -> Option<&EnumType> {
        self.enums.get(&(model.to_string(), field.to_string()))
    }

    /// Returns the number of registered enumerations.
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    /// Returns `true` if no enumerations have been generated.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    fn insert(&mut self, model: &str, field: &str, enum_type: EnumType) {
        self.enums
            .insert((model.to_string(), field.to_string()), enum_type);
    }
}

/// Flattens a choice list into enumeration members.
///
/// Nested groups flatten recursively; group labels themselves never become
/// members. Member names are the CONST_CASE form of each item's label.
fn convert_choices(choices: &[Choice], out: &mut Vec<EnumValue>) {
    for choice in choices {
        match choice {
            Choice::Item { value, label } => out.push(EnumValue {
                name: to_const_case(label),
                value: value.to_json(),
            }),
            Choice::Group { items, .. } => convert_choices(items, out),
        }
    }
}

/// Converts one model field to a field-type value.
///
/// Fields with a non-empty choice list become enumerations named
/// `{MODEL}_{FIELD}`; everything else dispatches on the field category.
/// Relation categories produce a deferred [`ModelField`] resolved later
/// against the type registry.
///
/// # Errors
///
/// Returns [`GraphError::UnsupportedField`] for a category with no mapping.
pub fn convert_field(
    model: &ModelDescriptor,
    field: &FieldDef,
    enums: &mut EnumRegistry,
) -> GraphResult<FieldSpec> {
    if !field.choices.is_empty() {
        let mut values = Vec::new();
        convert_choices(&field.choices, &mut values);
        let enum_type = EnumType {
            name: to_const_case(&format!("{}_{}", model.name, field.name)),
            description: field.help_text.clone(),
            values,
        };
        enums.insert(&model.name, &field.name, enum_type.clone());
        return Ok(FieldSpec::new(TypeSpec::Enum(enum_type))
            .with_description(field.help_text.clone()));
    }

    let spec = match &field.kind {
        FieldKind::Char
        | FieldKind::Text
        | FieldKind::FixedChar
        | FieldKind::Blob
        | FieldKind::Time
        | FieldKind::Uuid => FieldSpec::scalar(ScalarKind::String).non_null(),
        FieldKind::PrimaryKey => FieldSpec::scalar(ScalarKind::Id).non_null(),
        FieldKind::SmallInteger
        | FieldKind::Integer
        | FieldKind::BigInteger
        | FieldKind::Timestamp => FieldSpec::scalar(ScalarKind::Int).non_null(),
        // Boolean is the one mapped category deliberately left nullable.
        FieldKind::Boolean => FieldSpec::scalar(ScalarKind::Boolean),
        FieldKind::Decimal | FieldKind::Float => FieldSpec::scalar(ScalarKind::Float).non_null(),
        FieldKind::Date | FieldKind::DateTime => {
            FieldSpec::scalar(ScalarKind::DateTime).non_null()
        }
        FieldKind::ForeignKey { to, .. } => {
            FieldSpec::new(TypeSpec::Deferred(ModelField::forward(to))).non_null()
        }
        FieldKind::ReverseRelation { to } => {
            FieldSpec::new(TypeSpec::Deferred(ModelField::reverse(to)))
        }
        FieldKind::Bare => {
            return Err(GraphError::UnsupportedField {
                field: format!("{}.{}", model.name, field.name),
                kind: field.kind.name().to_string(),
            })
        }
    };
    Ok(spec.with_description(field.help_text.clone()))
}
