//! Error types for the modelgraph workspace.
//!
//! This module provides the [`GraphError`] enum covering everything that can
//! go wrong while constructing a schema from ORM models or resolving a
//! connection field. Structural and configuration errors surface at
//! schema-construction time; data errors (a node lookup that finds nothing)
//! are converted to typed absence by the caller; execution-layer failures
//! are carried through unchanged in [`GraphError::Database`].

use thiserror::Error;

/// The primary error type for the modelgraph workspace.
#[derive(Error, Debug)]
pub enum GraphError {
    // ── Schema-construction errors (fail fast, developer-facing) ────────

    /// A model field has a category with no registered field-type mapping.
    #[error("don't know how to convert model field `{field}` ({kind})")]
    UnsupportedField {
        /// The field name, qualified with its model (e.g. `weapon.payload`).
        field: String,
        /// The field category that has no mapping.
        kind: String,
    },

    /// A model-backed object type was declared without a model.
    #[error("object type `{0}` must be declared with a model")]
    MissingModel(String),

    /// A relation points at a model with no generated type while the
    /// referencing type restricts its field set.
    #[error(
        "model `{model}` is not accessible by the schema; register an object \
         type for it or exclude the field on `{parent}`"
    )]
    UnregisteredType {
        /// The related model that has no generated type.
        model: String,
        /// The referencing type that uses `only_fields`.
        parent: String,
    },

    /// An ordering or filtering name resolved to no field on the model.
    #[error("model `{model}` has no field named `{field}`")]
    UnknownField {
        /// The model name.
        model: String,
        /// The unresolved field name.
        field: String,
    },

    /// An object type registration collided with an existing one, either
    /// by type name or by backing model.
    #[error("duplicate object type registration: {0}")]
    DuplicateType(String),

    // ── Per-request errors ───────────────────────────────────────────────

    /// A node identifier could not be decoded.
    #[error("invalid global id: {0}")]
    InvalidGlobalId(String),

    /// An identifier lookup matched no row. Node resolution converts this
    /// to an absent result rather than surfacing it to the caller.
    #[error("object does not exist: {0}")]
    DoesNotExist(String),

    /// A raw execution-layer failure, passed through unchanged.
    #[error("database error: {0}")]
    Database(String),
}

/// A convenient result alias using [`GraphError`].
pub type GraphResult<T> = Result<T, GraphError>;
