//! # modelgraph-core
//!
//! Core error types, text utilities, and logging setup for the modelgraph
//! workspace. This crate has no dependency on the ORM or schema layers and
//! provides the foundation for the other crates.
//!
//! ## Modules
//!
//! - [`error`] - The [`GraphError`](error::GraphError) enum and result alias
//! - [`utils`] - Text helpers for enum member and field name conversion
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{GraphError, GraphResult};
