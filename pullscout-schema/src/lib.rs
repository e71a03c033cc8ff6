//! Structural schema model and derivation for pullscout tools.
//!
//! Every tool input and output type describes itself through a closed set of
//! shapes: scalars, homogeneous lists, and objects with named properties.
//! The [`ToolSchema`] trait derives that description without hand-written
//! metadata; the companion derive macro covers named-field structs and
//! unit-variant enums.

#![warn(missing_docs, clippy::pedantic)]

mod generate;
mod model;

pub use generate::{SchemaTracker, ToolSchema};
pub use model::{ObjectSchema, Property, ScalarKind, StructuralSchema};

/// Derive macro implementing [`ToolSchema`] for named-field structs and
/// unit-variant enums.
pub use pullscout_schema_macros::ToolSchema;
