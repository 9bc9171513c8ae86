//! Core model types.
//!
//! This module contains the read-only view of a service model the auth
//! integration works from:
//! - Shape identifiers
//! - JSON AST loading and merging
//! - The top-down containment index
//! - The trait query facade

pub mod index;
pub mod model;
pub mod query;
pub mod shape_id;
pub mod traits;

pub use index::TopDownIndex;
pub use model::{Model, ModelAssembler, ModelError, Shape, ShapeKind};
pub use query::ModelQuery;
pub use shape_id::{ShapeId, ShapeIdParseError};
