//! Construction of model-backed object types.
//!
//! [`build_object_type`] is the explicit build step invoked at
//! type-registration time: it takes a [`TypeDeclaration`] and returns a
//! finished [`ModelObjectType`] with every exposed model field converted.
//! Relation fields come back deferred; the registry resolves them once all
//! types are registered, so types may reference each other out of order.

use crate::convert::{convert_field, EnumRegistry};
use crate::options::TypeOptions;
use crate::types::FieldSpec;
use modelgraph_core::{GraphError, GraphResult};
use modelgraph_orm::fields::FieldDef;
use modelgraph_orm::model::{ModelRef, ModelRegistry};
use std::collections::BTreeSet;

/// A declaration of a model-backed object type, before construction.
///
/// # Examples
///
/// ```
/// use modelgraph_graphql::object::TypeDeclaration;
/// use modelgraph_graphql::options::TypeOptions;
/// use modelgraph_orm::fields::{FieldDef, FieldKind};
/// use modelgraph_orm::model::ModelRegistry;
///
/// let mut models = ModelRegistry::new();
/// let weapon = models.register(
///     modelgraph_orm::model::ModelDescriptor::new("weapon")
///         .field(FieldDef::new("id", FieldKind::PrimaryKey))
///         .field(FieldDef::new("name", FieldKind::Char)),
/// );
///
/// let decl = TypeDeclaration::node("WeaponNode", weapon)
///     .options(TypeOptions::new().paginate_by(20));
/// ```
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    /// The generated type's name.
    pub name: String,
    /// The backing model; required for non-node and node types alike.
    pub model: Option<ModelRef>,
    /// Inclusion/exclusion lists and query defaults.
    pub options: TypeOptions,
    /// Whether the type participates in node identity.
    pub node: bool,
    /// Explicitly declared fields; these shadow auto-converted ones.
    pub fields: Vec<(String, FieldSpec)>,
}

impl TypeDeclaration {
    /// Declares a plain object type backed by `model`.
    pub fn new(name: impl Into<String>, model: ModelRef) -> Self {
        Self {
            name: name.into(),
            model: Some(model),
            options: TypeOptions::new(),
            node: false,
            fields: Vec::new(),
        }
    }

    /// Declares a node-identified object type backed by `model`.
    pub fn node(name: impl Into<String>, model: ModelRef) -> Self {
        let mut decl = Self::new(name, model);
        decl.node = true;
        decl
    }

    /// Declares a type without a model. Construction of such a type fails;
    /// this exists so the failure surfaces as a descriptive error rather
    /// than at the declaration site.
    pub fn without_model(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            options: TypeOptions::new(),
            node: false,
            fields: Vec::new(),
        }
    }

    /// Sets the type's options.
    #[must_use]
    pub fn options(mut self, options: TypeOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds an explicit field declaration.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }
}

/// A constructed model-backed object type.
#[derive(Debug, Clone)]
pub struct ModelObjectType {
    /// The type name.
    pub name: String,
    /// The backing model.
    pub model: ModelRef,
    /// The options the type was declared with (identity field already
    /// excluded for node types).
    pub options: TypeOptions,
    /// The type's fields: explicit declarations first, then converted
    /// model fields in declaration order.
    pub fields: Vec<(String, FieldSpec)>,
    /// Whether the type participates in node identity.
    pub node: bool,
    /// Implemented interfaces.
    pub interfaces: Vec<String>,
}

impl ModelObjectType {
    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Returns the field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// Name of the node identity field supplied by the `Node` interface.
const IDENTITY_FIELD: &str = "id";

/// Name of the node identity interface.
pub const NODE_INTERFACE: &str = "Node";

/// Builds a [`ModelObjectType`] from its declaration.
///
/// The field set is the model's declared fields plus reverse-relation
/// fields synthesized from other models' foreign keys, filtered by the
/// inclusion pass (`only_fields`) and then the exclusion pass
/// (`exclude_fields`); explicitly declared fields are never overwritten.
/// Node types additionally exclude the identity field (the `Node`
/// interface supplies its own) and gain the interface.
///
/// # Errors
///
/// Fails with [`GraphError::MissingModel`] when the declaration has no
/// model, or with [`GraphError::UnsupportedField`] when an exposed field
/// has no type mapping.
pub fn build_object_type(
    decl: TypeDeclaration,
    models: &ModelRegistry,
    enums: &mut EnumRegistry,
) -> GraphResult<ModelObjectType> {
    let model = decl
        .model
        .ok_or_else(|| GraphError::MissingModel(decl.name.clone()))?;

    let mut options = decl.options;
    let mut interfaces = Vec::new();
    if decl.node {
        options.exclude_fields.insert(IDENTITY_FIELD.to_string());
        interfaces.push(NODE_INTERFACE.to_string());
    }

    // Model fields first, then synthesized reverse relations; a reverse
    // accessor with the same name replaces the declared field.
    let mut all_fields: Vec<FieldDef> = model.fields.clone();
    for reverse in models.reverse_fields(&model) {
        if let Some(existing) = all_fields.iter_mut().find(|f| f.name == reverse.name) {
            *existing = reverse;
        } else {
            all_fields.push(reverse);
        }
    }

    let declared: BTreeSet<&str> = decl.fields.iter().map(|(n, _)| n.as_str()).collect();

    let mut fields = decl.fields.clone();
    for field in &all_fields {
        if declared.contains(field.name.as_str()) || !options.includes(&field.name) {
            continue;
        }
        let spec = convert_field(&model, field, enums)?;
        fields.push((field.name.clone(), spec));
    }

    Ok(ModelObjectType {
        name: decl.name,
        model,
        options,
        fields,
        node: decl.node,
        interfaces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScalarKind, TypeSpec};
    use modelgraph_orm::fields::FieldKind;
    use modelgraph_orm::model::ModelDescriptor;

    fn models() -> ModelRegistry {
        let mut models = ModelRegistry::new();
        models.register(
            ModelDescriptor::new("monster")
                .field(FieldDef::new("id", FieldKind::PrimaryKey))
                .field(FieldDef::new("name", FieldKind::Char))
                .field(FieldDef::new("age", FieldKind::Integer))
                .field(FieldDef::foreign_key("weapon", "weapon", Some("monsters"))),
        );
        models.register(
            ModelDescriptor::new("weapon")
                .field(FieldDef::new("id", FieldKind::PrimaryKey))
                .field(FieldDef::new("name", FieldKind::Char)),
        );
        models
    }

    fn build(decl: TypeDeclaration, models: &ModelRegistry) -> GraphResult<ModelObjectType> {
        build_object_type(decl, models, &mut EnumRegistry::new())
    }

    #[test]
    fn test_all_fields_by_default() {
        let models = models();
        let t = build(
            TypeDeclaration::new("Monster", models.get("monster").unwrap()),
            &models,
        )
        .unwrap();
        assert_eq!(t.field_names(), vec!["id", "name", "age", "weapon"]);
        assert!(t.interfaces.is_empty());
    }

    #[test]
    fn test_only_fields_restricts() {
        let models = models();
        let t = build(
            TypeDeclaration::new("Monster", models.get("monster").unwrap())
                .options(TypeOptions::new().only_fields(["name"])),
            &models,
        )
        .unwrap();
        assert_eq!(t.field_names(), vec!["name"]);
    }

    #[test]
    fn test_exclude_fields_drops() {
        let models = models();
        let t = build(
            TypeDeclaration::new("Monster", models.get("monster").unwrap())
                .options(TypeOptions::new().exclude_fields(["age"])),
            &models,
        )
        .unwrap();
        assert_eq!(t.field_names(), vec!["id", "name", "weapon"]);
    }

    #[test]
    fn test_node_excludes_identity_and_adds_interface() {
        let models = models();
        let t = build(
            TypeDeclaration::node("MonsterNode", models.get("monster").unwrap()),
            &models,
        )
        .unwrap();
        assert!(!t.field_names().contains(&"id"));
        assert_eq!(t.interfaces, vec!["Node".to_string()]);
        assert!(t.node);
    }

    #[test]
    fn test_explicit_declarations_shadow_converted() {
        let models = models();
        let t = build(
            TypeDeclaration::new("Monster", models.get("monster").unwrap())
                .field("name", FieldSpec::scalar(ScalarKind::Id)),
            &models,
        )
        .unwrap();
        // Exactly one `name` field, and it is the explicit one.
        let names: Vec<_> = t.field_names().into_iter().filter(|n| *n == "name").collect();
        assert_eq!(names.len(), 1);
        assert_eq!(
            t.field("name").unwrap().of_type,
            TypeSpec::Scalar(ScalarKind::Id)
        );
    }

    #[test]
    fn test_reverse_fields_appear() {
        let models = models();
        let t = build(
            TypeDeclaration::new("Weapon", models.get("weapon").unwrap()),
            &models,
        )
        .unwrap();
        assert!(t.field_names().contains(&"monsters"));
        assert!(t.field("monsters").unwrap().of_type.is_deferred());
    }

    #[test]
    fn test_missing_model_fails() {
        let models = models();
        let err = build(TypeDeclaration::without_model("Ghost"), &models).unwrap_err();
        assert!(matches!(err, GraphError::MissingModel(name) if name == "Ghost"));
    }
}
