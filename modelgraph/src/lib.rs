//! # modelgraph
//!
//! Expose ORM models as GraphQL-style object types, connections, and node
//! lookups.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `modelgraph` to get everything, or depend on
//! individual crates for finer-grained control.
//!
//! ## Example
//!
//! ```
//! use modelgraph::graphql::{TypeDeclaration, TypeRegistry};
//! use modelgraph::orm::fields::{FieldDef, FieldKind};
//! use modelgraph::orm::model::{ModelDescriptor, ModelRegistry};
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
//! # Ok::<(), modelgraph::core::GraphError>(())
//! ```

/// Error types, text utilities, and logging setup.
pub use modelgraph_core as core;

/// Model descriptors, values, the chainable query, and async execution.
pub use modelgraph_orm as orm;

/// Object-type generation, the type registry, connections, and node
/// lookups.
pub use modelgraph_graphql as graphql;
