//! Test utilities for sigwire unit tests.
//!
//! This module provides a builder for small Smithy JSON AST models so tests
//! can describe a service in a line or two instead of hand-writing JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use sigwire::test_support::ModelFixture;
//!
//! #[test]
//! fn test_example() {
//!     let model = ModelFixture::service("ex#Svc")
//!         .signed()
//!         .operation("GetThing")
//!         .optional_operation("Ping")
//!         .build();
//!     // Query the model...
//! }
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::core::traits::{AWS_SERVICE, OPTIONAL_AUTH, SIGV4};
use crate::core::{Model, ShapeId};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Builder for a single-service model.
#[derive(Debug, Clone)]
pub struct ModelFixture {
    service: ShapeId,
    sdk_id: Option<String>,
    signed: bool,
    operations: Vec<(String, bool)>,
    renames: Vec<(String, String)>,
}

impl ModelFixture {
    /// Start a fixture for the given service id (`namespace#Name`).
    pub fn service(id: &str) -> Self {
        ModelFixture {
            service: id.parse().expect("fixture service id must be valid"),
            sdk_id: None,
            signed: false,
            operations: Vec::new(),
            renames: Vec::new(),
        }
    }

    /// Set the `aws.api#service` sdkId.
    pub fn sdk_id(mut self, sdk_id: &str) -> Self {
        self.sdk_id = Some(sdk_id.to_string());
        self
    }

    /// Apply the SigV4 trait to the service.
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Add an operation that requires authentication.
    pub fn operation(mut self, name: &str) -> Self {
        self.operations.push((name.to_string(), false));
        self
    }

    /// Add an operation carrying the optional-auth trait.
    pub fn optional_operation(mut self, name: &str) -> Self {
        self.operations.push((name.to_string(), true));
        self
    }

    /// Rename one of the fixture's operations within the service.
    pub fn renamed(mut self, name: &str, new_name: &str) -> Self {
        self.renames.push((name.to_string(), new_name.to_string()));
        self
    }

    /// Get the service id.
    pub fn service_id(&self) -> ShapeId {
        self.service.clone()
    }

    /// Get the id of one of the fixture's operations.
    pub fn operation_id(&self, name: &str) -> ShapeId {
        ShapeId::new(self.service.namespace(), name)
    }

    /// Render the fixture as a JSON AST document.
    pub fn to_value(&self) -> Value {
        let mut shapes = Map::new();

        let mut service_traits = Map::new();
        if let Some(sdk_id) = &self.sdk_id {
            service_traits.insert(AWS_SERVICE.to_string(), json!({ "sdkId": sdk_id }));
        }
        if self.signed {
            let name = self.service.name().to_lowercase();
            service_traits.insert(SIGV4.to_string(), json!({ "name": name }));
        }

        let targets: Vec<Value> = self
            .operations
            .iter()
            .map(|(name, _)| json!({ "target": self.operation_id(name).to_string() }))
            .collect();

        let rename: Map<String, Value> = self
            .renames
            .iter()
            .map(|(name, new_name)| (self.operation_id(name).to_string(), json!(new_name)))
            .collect();

        shapes.insert(
            self.service.to_string(),
            json!({
                "type": "service",
                "version": "2020-01-01",
                "operations": targets,
                "rename": rename,
                "traits": service_traits,
            }),
        );

        for (name, optional) in &self.operations {
            let mut traits = Map::new();
            if *optional {
                traits.insert(OPTIONAL_AUTH.to_string(), json!({}));
            }
            shapes.insert(
                self.operation_id(name).to_string(),
                json!({ "type": "operation", "traits": traits }),
            );
        }

        json!({ "smithy": "2.0", "shapes": shapes })
    }

    /// Render the fixture as a JSON AST string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).expect("fixture serializes")
    }

    /// Load the fixture into a model.
    pub fn build(&self) -> Model {
        Model::from_json_str(&self.to_json()).expect("fixture model loads")
    }

    /// Write this fixture to a `<file_name>` under `dir`.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        std::fs::write(&path, self.to_json())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_builds_model() {
        let fixture = ModelFixture::service("ex#Svc")
            .signed()
            .operation("A")
            .optional_operation("B");
        let model = fixture.build();
        assert_eq!(model.service_ids().count(), 1);
        assert!(model.shape(&fixture.operation_id("B")).is_some());
    }

    #[test]
    fn test_fixture_write_to() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = ModelFixture::service("ex#Svc")
            .write_to(tmp.path(), "model.json")
            .unwrap();
        let loaded = Model::load(&[path]).unwrap();
        assert_eq!(loaded.service_ids().count(), 1);
    }
}
