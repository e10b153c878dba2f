//! The registry of generated object types.
//!
//! Types register one at a time, in any order; relation fields between them
//! stay deferred until [`TypeRegistry::resolve`] runs. Resolution is a
//! separate pass so that mutually-referencing types never see a
//! half-constructed registry.

use crate::convert::EnumRegistry;
use crate::fields::ModelFieldResolution;
use crate::object::{build_object_type, ModelObjectType, TypeDeclaration};
use crate::types::TypeSpec;
use modelgraph_core::{GraphError, GraphResult};
use modelgraph_orm::model::ModelRegistry;
use std::collections::BTreeMap;

/// All generated object types, keyed by backing model.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Object types by model name.
    types: BTreeMap<String, ModelObjectType>,
    /// Type name → model name.
    names: BTreeMap<String, String>,
    /// Enumerations generated while building the types.
    enums: EnumRegistry,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the declared type and registers it.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::DuplicateType`] when a type of the same
    /// name — or a second type for the same model — is already registered,
    /// or propagates construction failures from [`build_object_type`].
    pub fn register(
        &mut self,
        decl: TypeDeclaration,
        models: &ModelRegistry,
    ) -> GraphResult<&ModelObjectType> {
        if self.names.contains_key(&decl.name) {
            return Err(GraphError::DuplicateType(format!("type `{}`", decl.name)));
        }
        if let Some(model) = &decl.model {
            if self.types.contains_key(&model.name) {
                return Err(GraphError::DuplicateType(format!(
                    "model `{}`",
                    model.name
                )));
            }
        }
        let object_type = build_object_type(decl, models, &mut self.enums)?;
        let model_name = object_type.model.name.clone();
        self.names
            .insert(object_type.name.clone(), model_name.clone());
        tracing::debug!(
            type_name = %object_type.name,
            model = %model_name,
            fields = object_type.fields.len(),
            "registered object type"
        );
        Ok(self.types.entry(model_name).or_insert(object_type))
    }

    /// Returns the type generated for the given model.
    pub fn get_for_model(&self, model: &str) -> Option<&ModelObjectType> {
        self.types.get(model)
    }

    /// Returns the type with the given type name.
    pub fn get(&self, name: &str) -> Option<&ModelObjectType> {
        self.names.get(name).and_then(|m| self.types.get(m))
    }

    /// Returns the registered types in model-name order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelObjectType> {
        self.types.values()
    }

    /// The enumerations generated during type construction.
    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    /// Resolves every deferred relation field.
    ///
    /// Runs a read pass collecting the rewrite for each deferred field,
    /// then applies them: a resolved relation gets its concrete type, a
    /// skipped one is removed from its type. Call this once after the last
    /// [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::UnregisteredType`] when a relation targets
    /// an unregistered model from a type with a restricted field set.
    pub fn resolve(&mut self) -> GraphResult<()> {
        let mut rewrites: Vec<(String, String, Option<TypeSpec>)> = Vec::new();
        for object_type in self.types.values() {
            for (field_name, spec) in &object_type.fields {
                let TypeSpec::Deferred(model_field) = &spec.of_type else {
                    continue;
                };
                let rewrite = match model_field.resolve(object_type, self)? {
                    ModelFieldResolution::Resolved(resolved) => Some(resolved),
                    ModelFieldResolution::Skip => None,
                };
                rewrites.push((
                    object_type.model.name.clone(),
                    field_name.clone(),
                    rewrite,
                ));
            }
        }

        for (model, field, rewrite) in rewrites {
            let Some(object_type) = self.types.get_mut(&model) else {
                continue;
            };
            match rewrite {
                Some(resolved) => {
                    if let Some((_, spec)) = object_type
                        .fields
                        .iter_mut()
                        .find(|(name, _)| *name == field)
                    {
                        spec.of_type = resolved;
                    }
                }
                None => {
                    tracing::debug!(
                        type_name = %object_type.name,
                        field = %field,
                        "dropping relation field with no registered target type"
                    );
                    object_type.fields.retain(|(name, _)| *name != field);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TypeOptions;
    use modelgraph_orm::fields::{FieldDef, FieldKind};
    use modelgraph_orm::model::ModelDescriptor;

    fn models() -> ModelRegistry {
        let mut models = ModelRegistry::new();
        models.register(
            ModelDescriptor::new("material")
                .field(FieldDef::new("id", FieldKind::PrimaryKey))
                .field(FieldDef::new("name", FieldKind::Char)),
        );
        models.register(
            ModelDescriptor::new("weapon")
                .field(FieldDef::new("id", FieldKind::PrimaryKey))
                .field(FieldDef::new("name", FieldKind::Char))
                .field(FieldDef::foreign_key("material", "material", Some("weapons"))),
        );
        models
    }

    #[test]
    fn test_register_and_lookup() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::new("Weapon", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap();
        assert!(registry.get_for_model("weapon").is_some());
        assert_eq!(registry.get("Weapon").unwrap().model.name, "weapon");
        assert!(registry.get("Material").is_none());
    }

    #[test]
    fn test_duplicate_type_name_rejected() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::new("Weapon", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap();
        let err = registry
            .register(
                TypeDeclaration::new("Weapon", models.get("material").unwrap()),
                &models,
            )
            .unwrap_err();
        assert!(matches!(&err, GraphError::DuplicateType(what) if what.contains("Weapon")));
    }

    #[test]
    fn test_second_type_for_same_model_rejected() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::new("Weapon", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap();
        let err = registry
            .register(
                TypeDeclaration::node("WeaponNode", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap_err();
        assert!(matches!(&err, GraphError::DuplicateType(what) if what.contains("weapon")));
    }

    #[test]
    fn test_resolve_rewrites_forward_relation() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::new("Weapon", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap();
        registry
            .register(
                TypeDeclaration::new("Material", models.get("material").unwrap()),
                &models,
            )
            .unwrap();
        registry.resolve().unwrap();

        let weapon = registry.get("Weapon").unwrap();
        assert_eq!(
            weapon.field("material").unwrap().of_type,
            TypeSpec::Object("Material".to_string())
        );
    }

    #[test]
    fn test_resolve_reverse_relation_to_node_is_connection() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::node("WeaponNode", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap();
        registry
            .register(
                TypeDeclaration::new("Material", models.get("material").unwrap()),
                &models,
            )
            .unwrap();
        registry.resolve().unwrap();

        let material = registry.get("Material").unwrap();
        assert_eq!(
            material.field("weapons").unwrap().of_type,
            TypeSpec::Connection("WeaponNode".to_string())
        );
    }

    #[test]
    fn test_resolve_reverse_relation_to_plain_type_is_list() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::new("Weapon", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap();
        registry
            .register(
                TypeDeclaration::new("Material", models.get("material").unwrap()),
                &models,
            )
            .unwrap();
        registry.resolve().unwrap();

        let material = registry.get("Material").unwrap();
        assert_eq!(
            material.field("weapons").unwrap().of_type,
            TypeSpec::List(Box::new(TypeSpec::Object("Weapon".to_string())))
        );
    }

    #[test]
    fn test_resolve_drops_relation_without_target() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::new("Weapon", models.get("weapon").unwrap()),
                &models,
            )
            .unwrap();
        registry.resolve().unwrap();

        // No Material type is registered, so the relation field vanishes.
        let weapon = registry.get("Weapon").unwrap();
        assert!(weapon.field("material").is_none());
        assert!(weapon.field("name").is_some());
    }

    #[test]
    fn test_resolve_fails_for_restricted_type_with_missing_target() {
        let models = models();
        let mut registry = TypeRegistry::new();
        registry
            .register(
                TypeDeclaration::new("Weapon", models.get("weapon").unwrap())
                    .options(TypeOptions::new().only_fields(["name", "material"])),
                &models,
            )
            .unwrap();
        let err = registry.resolve().unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnregisteredType { model, parent }
                if model == "material" && parent == "Weapon"
        ));
    }
}
