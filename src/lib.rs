//! sigwire - SigV4 auth wiring for generated TypeScript service clients
//!
//! This crate decides, from a Smithy service model, which signing plugins a
//! generated client applies, how its default credential provider is
//! bootstrapped per runtime, and which support files the token-issuing
//! service bundles.

pub mod auth;
pub mod core;
pub mod emit;
pub mod ops;
pub mod util;

/// Model fixtures for sigwire unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::auth::{LanguageTarget, PluginDescriptor, ServiceFacts};
pub use crate::core::{Model, ModelQuery, ShapeId};
pub use crate::ops::AuthPlan;
