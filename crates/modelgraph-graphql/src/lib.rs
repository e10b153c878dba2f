//! # modelgraph-graphql
//!
//! The schema layer: generates GraphQL-style object types, enumerations,
//! connections, and node lookups from ORM model descriptors.
//!
//! Types are built in two explicit steps. [`TypeRegistry::register`] runs
//! the construction pass for one declaration — converting every exposed
//! model field, synthesizing reverse relations, and recording generated
//! enumerations — while relation fields stay deferred. Once every type is
//! registered, [`TypeRegistry::resolve`] rewrites the deferred fields to
//! concrete object, list, or connection types.
//!
//! ## Module Overview
//!
//! - [`types`] - Field-type values: scalars, enumerations, [`TypeSpec`]
//! - [`convert`] - Model-field conversion and the enumeration registry
//! - [`options`] - Per-type configuration ([`TypeOptions`])
//! - [`object`] - [`TypeDeclaration`] and object-type construction
//! - [`registry`] - The [`TypeRegistry`] and its resolution pass
//! - [`fields`] - Deferred relation fields and the [`ConnectionField`]
//! - [`selection`] - Requested sub-field introspection
//! - [`relay`] - Global identifiers, cursors, and the connection shape
//!
//! ## Example
//!
//! ```
//! use modelgraph_graphql::object::TypeDeclaration;
//! use modelgraph_graphql::registry::TypeRegistry;
//! use modelgraph_orm::fields::{FieldDef, FieldKind};
//! use modelgraph_orm::model::{ModelDescriptor, ModelRegistry};
//!
//! let mut models = ModelRegistry::new();
//! let weapon = models.register(
//!     ModelDescriptor::new("weapon")
//!         .field(FieldDef::new("id", FieldKind::PrimaryKey))
//!         .field(FieldDef::new("name", FieldKind::Char)),
//! );
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(TypeDeclaration::node("WeaponNode", weapon), &models)?;
//! registry.resolve()?;
//!
//! let weapon_type = registry.get("WeaponNode").unwrap();
//! assert_eq!(weapon_type.field_names(), vec!["name"]);
//! # Ok::<(), modelgraph_core::GraphError>(())
//! ```

pub mod convert;
pub mod fields;
pub mod object;
pub mod options;
pub mod registry;
pub mod relay;
pub mod selection;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use convert::{convert_field, EnumRegistry};
pub use fields::{
    ConnectionArgs, ConnectionField, ConnectionSource, ModelField, ModelFieldResolution,
};
pub use object::{build_object_type, ModelObjectType, TypeDeclaration, NODE_INTERFACE};
pub use options::TypeOptions;
pub use registry::TypeRegistry;
pub use relay::{from_global_id, get_node, to_global_id, Connection, Edge, PageInfo};
pub use selection::{requested_models, Selection};
pub use types::{Argument, EnumType, EnumValue, FieldSpec, ScalarKind, TypeSpec};
