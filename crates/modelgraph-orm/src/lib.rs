//! # modelgraph-orm
//!
//! The ORM surface consumed by the modelgraph schema layer. This crate
//! defines the descriptors and values the schema builder reads — it is the
//! boundary between the ORM ecosystem and the query-graph ecosystem, not a
//! full ORM.
//!
//! ## Module Overview
//!
//! - [`value`] - The backend-agnostic [`Value`](value::Value) enum
//! - [`fields`] - Field descriptors ([`FieldDef`](fields::FieldDef)), field
//!   categories, and choice lists
//! - [`model`] - [`ModelDescriptor`](model::ModelDescriptor) and the
//!   [`ModelRegistry`](model::ModelRegistry) with reverse-relation synthesis
//! - [`query`] - The chainable [`Query`](query::Query) value
//! - [`manager`] - The async [`Manager`](manager::Manager) execution trait,
//!   [`Row`](manager::Row), and an in-memory manager for tests

pub mod fields;
pub mod manager;
pub mod model;
pub mod query;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use fields::{Choice, FieldDef, FieldKind};
pub use manager::{Manager, MemoryManager, Row};
pub use model::{ModelDescriptor, ModelRef, ModelRegistry};
pub use query::{Filter, Join, JoinKind, OrderBy, Query};
pub use value::Value;
