//! Read-only trait queries over a loaded model.
//!
//! The auth rules only ever ask these questions, so any model loader can
//! drive them by implementing [`ModelQuery`].

use crate::core::model::Model;
use crate::core::shape_id::ShapeId;

/// Trait-presence and containment queries.
///
/// Answers for unknown shapes are `false`, empty or `None`, never errors.
pub trait ModelQuery {
    /// Check whether a shape carries a trait.
    fn has_trait(&self, shape: &ShapeId, trait_id: &str) -> bool;

    /// Get every operation contained by a service, transitively.
    fn contained_operations(&self, service: &ShapeId) -> Vec<ShapeId>;

    /// Get the name of a shape in the context of a service.
    fn contextual_name(&self, service: &ShapeId, shape: &ShapeId) -> String;

    /// Get the declared short identifier of a service.
    fn sdk_id(&self, service: &ShapeId) -> Option<String>;

    /// Get every service in the model.
    fn services(&self) -> Vec<ShapeId>;
}

impl ModelQuery for Model {
    fn has_trait(&self, shape: &ShapeId, trait_id: &str) -> bool {
        self.shape(shape).is_some_and(|s| s.has_trait(trait_id))
    }

    fn contained_operations(&self, service: &ShapeId) -> Vec<ShapeId> {
        self.index().contained_operations(service)
    }

    fn contextual_name(&self, service: &ShapeId, shape: &ShapeId) -> String {
        Model::contextual_name(self, service, shape)
    }

    fn sdk_id(&self, service: &ShapeId) -> Option<String> {
        self.service_trait(service).map(|t| t.sdk_id)
    }

    fn services(&self) -> Vec<ShapeId> {
        self.service_ids().cloned().collect()
    }
}
