//! Utility helpers shared across the modelgraph crates.

pub mod text;

pub use text::{to_const_case, to_snake_case};
