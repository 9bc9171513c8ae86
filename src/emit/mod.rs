//! Rendering of auth decisions into TypeScript sources.

pub mod dependency;
pub mod writer;

pub use dependency::{DependencyKind, PackageDependency};
pub use writer::{Import, TypeScriptWriter};
