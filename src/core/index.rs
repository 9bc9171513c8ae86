//! Top-down containment index.
//!
//! Services bind operations and resources; resources bind lifecycle
//! operations, instance/collection operations and child resources. The index
//! records these edges once so "which operations does this service contain"
//! becomes a graph walk.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::core::model::{Shape, ShapeKind};
use crate::core::shape_id::ShapeId;

#[derive(Debug, Clone)]
struct Node {
    id: ShapeId,
    kind: ShapeKind,
}

/// Containment graph over services, resources and operations.
#[derive(Debug, Clone, Default)]
pub struct TopDownIndex {
    graph: DiGraph<Node, ()>,
    nodes: HashMap<ShapeId, NodeIndex>,
}

impl TopDownIndex {
    /// Build the index from a shape table.
    ///
    /// Targets that are not defined in the table are skipped.
    pub fn new(shapes: &BTreeMap<ShapeId, Shape>) -> Self {
        let mut index = TopDownIndex::default();

        for (id, shape) in shapes {
            if matches!(shape.kind, ShapeKind::Service | ShapeKind::Resource) {
                let from = index.node(id, shape.kind);
                for child in shape.children() {
                    let Some(child_shape) = shapes.get(child) else {
                        tracing::debug!("{} binds undefined shape {}", id, child);
                        continue;
                    };
                    let to = index.node(child, child_shape.kind);
                    if !index.graph.contains_edge(from, to) {
                        index.graph.add_edge(from, to, ());
                    }
                }
            }
        }

        index
    }

    fn node(&mut self, id: &ShapeId, kind: ShapeKind) -> NodeIndex {
        if let Some(&node) = self.nodes.get(id) {
            return node;
        }
        let node = self.graph.add_node(Node {
            id: id.clone(),
            kind,
        });
        self.nodes.insert(id.clone(), node);
        node
    }

    /// Get every operation reachable from a service or resource, sorted by id.
    ///
    /// Unknown shapes contain nothing.
    pub fn contained_operations(&self, root: &ShapeId) -> Vec<ShapeId> {
        let Some(&start) = self.nodes.get(root) else {
            return Vec::new();
        };

        let mut found = BTreeSet::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(node) = dfs.next(&self.graph) {
            let weight = &self.graph[node];
            if node != start && weight.kind == ShapeKind::Operation {
                found.insert(weight.id.clone());
            }
        }

        found.into_iter().collect()
    }
}
