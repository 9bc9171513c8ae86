//! Smithy JSON AST models.
//!
//! A [`Model`] is assembled from one or more JSON AST documents and is
//! read-only afterwards. Only the parts of a shape that matter for auth
//! wiring are kept: its kind, its traits and its containment edges.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::index::TopDownIndex;
use crate::core::shape_id::{ShapeId, ShapeIdParseError};
use crate::core::traits::ServiceTrait;
use crate::core::traits::AWS_SERVICE;

/// Error while loading a model.
#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("failed to read model file: {}", path.display())]
    #[diagnostic(code(sigwire::model::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model `{origin}`")]
    #[diagnostic(
        code(sigwire::model::parse),
        help("models must be Smithy JSON AST documents with a top-level `shapes` object")
    )]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid shape id `{id}` in `{origin}`")]
    #[diagnostic(code(sigwire::model::shape_id))]
    InvalidShapeId {
        id: String,
        origin: String,
        #[source]
        source: ShapeIdParseError,
    },

    #[error("conflicting definitions for shape `{id}` (second one in `{origin}`)")]
    #[diagnostic(
        code(sigwire::model::conflict),
        help("each shape may only be defined once across all model files")
    )]
    Conflict { id: ShapeId, origin: String },

    #[error("no model files found under {}", path.display())]
    #[diagnostic(
        code(sigwire::model::empty),
        help("pass a Smithy JSON AST file or a directory containing `*.json` files")
    )]
    NoModelFiles { path: PathBuf },

    #[error("service `{name}` not found in model")]
    #[diagnostic(
        code(sigwire::model::service_not_found),
        help("available services: {available}")
    )]
    ServiceNotFound { name: String, available: String },
}

/// The kind of a shape, as far as containment is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Service,
    Resource,
    Operation,
    /// Any other shape type (structures, members, simple types...)
    #[serde(other)]
    Other,
}

/// Reference to another shape (`{"target": "ns#Name"}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    pub target: ShapeId,
}

/// A shape definition from the JSON AST.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,

    /// Applied traits, keyed by absolute trait id
    #[serde(default)]
    pub traits: BTreeMap<String, Value>,

    #[serde(default)]
    pub operations: Vec<Target>,

    #[serde(default)]
    pub resources: Vec<Target>,

    #[serde(default)]
    pub collection_operations: Vec<Target>,

    /// Service-local names for shapes in the closure (`rename` on services)
    #[serde(default)]
    pub rename: BTreeMap<ShapeId, String>,

    // Resource lifecycle operations
    #[serde(default)]
    pub create: Option<Target>,
    #[serde(default)]
    pub put: Option<Target>,
    #[serde(default)]
    pub read: Option<Target>,
    #[serde(default)]
    pub update: Option<Target>,
    #[serde(default)]
    pub delete: Option<Target>,
    #[serde(default)]
    pub list: Option<Target>,
}

impl Shape {
    /// Check whether the shape carries a trait.
    pub fn has_trait(&self, trait_id: &str) -> bool {
        self.traits.contains_key(trait_id)
    }

    /// Shapes bound to this one through containment edges.
    ///
    /// Empty for anything that is not a service or resource.
    pub fn children(&self) -> impl Iterator<Item = &ShapeId> + '_ {
        let lifecycle = [
            &self.create,
            &self.put,
            &self.read,
            &self.update,
            &self.delete,
            &self.list,
        ];

        self.operations
            .iter()
            .chain(&self.collection_operations)
            .chain(&self.resources)
            .chain(lifecycle.into_iter().flatten())
            .map(|t| &t.target)
    }
}

#[derive(Debug, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    shapes: BTreeMap<String, Shape>,
}

/// Assembles a [`Model`] from several documents.
#[derive(Debug, Default)]
pub struct ModelAssembler {
    shapes: BTreeMap<ShapeId, Shape>,
}

impl ModelAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        ModelAssembler::default()
    }

    /// Add a JSON AST document. `origin` is used in error messages.
    pub fn add_document(&mut self, origin: &str, json: &str) -> Result<&mut Self, ModelError> {
        let doc: ModelDocument = serde_json::from_str(json).map_err(|source| ModelError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        for (raw_id, shape) in doc.shapes {
            let id: ShapeId = raw_id
                .parse()
                .map_err(|source| ModelError::InvalidShapeId {
                    id: raw_id.clone(),
                    origin: origin.to_string(),
                    source,
                })?;

            match self.shapes.get(&id) {
                Some(existing) if *existing != shape => {
                    return Err(ModelError::Conflict {
                        id,
                        origin: origin.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    self.shapes.insert(id, shape);
                }
            }
        }

        Ok(self)
    }

    /// Add a model file, or every `*.json` file under a directory.
    pub fn add_path(&mut self, path: &Path) -> Result<&mut Self, ModelError> {
        if path.is_dir() {
            let files = json_files(path);
            if files.is_empty() {
                return Err(ModelError::NoModelFiles {
                    path: path.to_path_buf(),
                });
            }
            for file in files {
                self.add_file(&file)?;
            }
        } else {
            self.add_file(path)?;
        }
        Ok(self)
    }

    fn add_file(&mut self, path: &Path) -> Result<(), ModelError> {
        let contents = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loading model {}", path.display());
        self.add_document(&path.display().to_string(), &contents)?;
        Ok(())
    }

    /// Finish assembly and index the model.
    pub fn assemble(self) -> Model {
        let index = TopDownIndex::new(&self.shapes);
        Model {
            shapes: self.shapes,
            index,
        }
    }
}

/// Find model files under a directory, in a stable order.
fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable model path: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// An immutable, indexed model.
#[derive(Debug)]
pub struct Model {
    shapes: BTreeMap<ShapeId, Shape>,
    index: TopDownIndex,
}

impl Model {
    /// Load a model from a single JSON AST string.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let mut assembler = ModelAssembler::new();
        assembler.add_document("<string>", json)?;
        Ok(assembler.assemble())
    }

    /// Load and merge models from files or directories.
    pub fn load(paths: &[PathBuf]) -> Result<Self, ModelError> {
        let mut assembler = ModelAssembler::new();
        for path in paths {
            assembler.add_path(path)?;
        }
        Ok(assembler.assemble())
    }

    /// Get a shape by id.
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the model has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the containment index.
    pub fn index(&self) -> &TopDownIndex {
        &self.index
    }

    /// Iterate over service shape ids in sorted order.
    pub fn service_ids(&self) -> impl Iterator<Item = &ShapeId> + '_ {
        self.shapes
            .iter()
            .filter(|(_, shape)| shape.kind == ShapeKind::Service)
            .map(|(id, _)| id)
    }

    /// Read the `aws.api#service` trait of a shape.
    pub fn service_trait(&self, id: &ShapeId) -> Option<ServiceTrait> {
        self.shape(id)
            .and_then(|shape| shape.traits.get(AWS_SERVICE))
            .and_then(ServiceTrait::from_value)
    }

    /// Get the name of a shape as seen from a service, honoring its `rename` map.
    pub fn contextual_name(&self, service: &ShapeId, shape: &ShapeId) -> String {
        self.shape(service)
            .and_then(|s| s.rename.get(shape))
            .cloned()
            .unwrap_or_else(|| shape.name().to_string())
    }

    /// Find a service by absolute id, shape name or SDK id.
    pub fn find_service(&self, name: &str) -> Result<ShapeId, ModelError> {
        let found = self.service_ids().find(|id| {
            id.to_string() == name
                || id.name() == name
                || self
                    .service_trait(id)
                    .is_some_and(|t| t.sdk_id == name)
        });

        found.cloned().ok_or_else(|| ModelError::ServiceNotFound {
            name: name.to_string(),
            available: self
                .service_ids()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sts_model, ModelFixture};

    #[test]
    fn test_load_single_document() {
        let model = Model::from_json_str(&sts_model()).unwrap();
        let services: Vec<_> = model.service_ids().collect();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name(), "AWSSecurityTokenServiceV20110615");
    }

    #[test]
    fn test_unknown_shape_members_are_ignored() {
        let json = r#"{
            "smithy": "2.0",
            "shapes": {
                "ex#Input": {
                    "type": "structure",
                    "members": {"name": {"target": "smithy.api#String"}}
                }
            }
        }"#;
        let model = Model::from_json_str(json).unwrap();
        let shape = model.shape(&"ex#Input".parse().unwrap()).unwrap();
        assert_eq!(shape.kind, ShapeKind::Other);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Model::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ModelError::Parse { .. }));
    }

    #[test]
    fn test_invalid_shape_id() {
        let err = Model::from_json_str(r#"{"shapes": {"Nope": {"type": "string"}}}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidShapeId { .. }));
    }

    #[test]
    fn test_identical_redefinition_is_accepted() {
        let doc = ModelFixture::service("ex#Svc").signed().operation("Ping").to_json();
        let mut assembler = ModelAssembler::new();
        assembler.add_document("a.json", &doc).unwrap();
        assembler.add_document("b.json", &doc).unwrap();
        let model = assembler.assemble();
        assert_eq!(model.service_ids().count(), 1);
    }

    #[test]
    fn test_conflicting_redefinition_is_rejected() {
        let a = ModelFixture::service("ex#Svc").signed().to_json();
        let b = ModelFixture::service("ex#Svc").to_json();
        let mut assembler = ModelAssembler::new();
        assembler.add_document("a.json", &a).unwrap();
        let err = assembler.add_document("b.json", &b).unwrap_err();
        assert!(matches!(err, ModelError::Conflict { .. }));
    }

    #[test]
    fn test_find_service_by_name_and_sdk_id() {
        let model = Model::from_json_str(&sts_model()).unwrap();
        let by_sdk = model.find_service("STS").unwrap();
        let by_name = model.find_service("AWSSecurityTokenServiceV20110615").unwrap();
        let by_id = model.find_service(&by_sdk.to_string()).unwrap();
        assert_eq!(by_sdk, by_name);
        assert_eq!(by_sdk, by_id);

        let err = model.find_service("S3").unwrap_err();
        assert!(err.to_string().contains("S3"));
    }

    #[test]
    fn test_contextual_name_applies_rename() {
        let fixture = ModelFixture::service("ex#Svc")
            .operation("GetThing")
            .operation("Ping")
            .renamed("GetThing", "FetchThing");
        let model = fixture.build();
        let svc = fixture.service_id();

        assert_eq!(
            model.contextual_name(&svc, &fixture.operation_id("GetThing")),
            "FetchThing"
        );
        assert_eq!(model.contextual_name(&svc, &fixture.operation_id("Ping")), "Ping");
    }

    #[test]
    fn test_load_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let nested = tmp.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            tmp.path().join("a.json"),
            ModelFixture::service("ex#Alpha").signed().to_json(),
        )
        .unwrap();
        std::fs::write(
            nested.join("b.json"),
            ModelFixture::service("ex#Beta").to_json(),
        )
        .unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let model = Model::load(&[tmp.path().to_path_buf()]).unwrap();
        let names: Vec<_> = model.service_ids().map(|id| id.name().to_string()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_load_empty_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Model::load(&[tmp.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, ModelError::NoModelFiles { .. }));
    }
}
