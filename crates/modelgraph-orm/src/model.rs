//! Model descriptors and the model registry.
//!
//! [`ModelDescriptor`] is the per-model metadata the schema layer consumes:
//! a name and an ordered list of declared fields. [`ModelRegistry`] is the
//! ORM's model set; besides lookup it synthesizes reverse-relation
//! descriptors from foreign keys declared on other models.

use crate::fields::{FieldDef, FieldKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A shared handle to a model descriptor.
pub type ModelRef = Arc<ModelDescriptor>;

/// Metadata describing one ORM model.
///
/// Immutable once declared. Field order is the declaration order, which the
/// generated object type preserves.
///
/// # Examples
///
/// ```
/// use modelgraph_orm::fields::{FieldDef, FieldKind};
/// use modelgraph_orm::model::ModelDescriptor;
///
/// let weapon = ModelDescriptor::new("weapon")
///     .field(FieldDef::new("id", FieldKind::PrimaryKey))
///     .field(FieldDef::new("name", FieldKind::Char))
///     .field(FieldDef::foreign_key("material", "material", Some("weapons")));
/// assert_eq!(weapon.pk_field(), "id");
/// assert!(weapon.field_named("name").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// The model name in lowercase (e.g. "weapon").
    pub name: String,
    /// Declared fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl ModelDescriptor {
    /// Creates an empty descriptor for the named model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field declaration.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the declared field with the given name.
    pub fn field_named(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the name of the primary key field, defaulting to `id` when
    /// no field has the primary-key category.
    pub fn pk_field(&self) -> &str {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::PrimaryKey)
            .map_or("id", |f| f.name.as_str())
    }

    /// Returns the forward foreign-key fields of this model.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::ForeignKey { .. }))
    }
}

/// The set of models known to the ORM.
///
/// Reverse relations are not declared anywhere; they exist because some
/// other model points a foreign key at you. The registry is therefore the
/// only place they can be synthesized from.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelRef>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model and returns the shared handle to it.
    pub fn register(&mut self, model: ModelDescriptor) -> ModelRef {
        let model = Arc::new(model);
        self.models.insert(model.name.clone(), Arc::clone(&model));
        model
    }

    /// Looks up a model by name.
    pub fn get(&self, name: &str) -> Option<ModelRef> {
        self.models.get(name).cloned()
    }

    /// Iterates over all registered models in name order.
    pub fn models(&self) -> impl Iterator<Item = &ModelRef> {
        self.models.values()
    }

    /// Synthesizes reverse-relation field descriptors for `model`.
    ///
    /// For every foreign key on another registered model that targets
    /// `model`, this produces a [`FieldKind::ReverseRelation`] descriptor
    /// named after the foreign key's `related_name`, falling back to
    /// `{other}_set`.
    pub fn reverse_fields(&self, model: &ModelDescriptor) -> Vec<FieldDef> {
        let mut reverse = Vec::new();
        for other in self.models.values() {
            if other.name == model.name {
                continue;
            }
            for fk in other.foreign_keys() {
                let FieldKind::ForeignKey { to, related_name } = &fk.kind else {
                    continue;
                };
                if to != &model.name {
                    continue;
                }
                let name = related_name
                    .clone()
                    .unwrap_or_else(|| format!("{}_set", other.name));
                reverse.push(FieldDef::new(
                    name,
                    FieldKind::ReverseRelation {
                        to: other.name.clone(),
                    },
                ));
            }
        }
        reverse
    }
}
