//! Pick proxies derived from deformed mesh geometry.

use super::{Dimension, Shape, ShapeKind};
use crate::error::{WidgetError, WidgetResult};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named set of vertex weights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexGroup {
    pub name: String,
    /// Vertex index to weight. Vertices not listed have weight zero.
    pub weights: HashMap<usize, f64>,
}

impl VertexGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weights: HashMap::new(),
        }
    }

    /// Assign the same weight to several vertices.
    pub fn with_weight(mut self, vertices: impl IntoIterator<Item = usize>, weight: f64) -> Self {
        for index in vertices {
            self.weights.insert(index, weight);
        }
        self
    }

    pub fn weight(&self, vertex: usize) -> f64 {
        self.weights.get(&vertex).copied().unwrap_or(0.0)
    }
}

/// Snapshot of a mesh after deformation, in world space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluatedMesh {
    pub name: String,
    pub positions: Vec<DVec3>,
    pub triangles: Vec<[usize; 3]>,
    pub vertex_groups: Vec<VertexGroup>,
}

impl EvaluatedMesh {
    pub fn vertex_group(&self, name: &str) -> Option<&VertexGroup> {
        self.vertex_groups.iter().find(|g| g.name == name)
    }
}

/// Vertex-group restriction for a mesh pick proxy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshFilter {
    /// Groups to keep. Empty means every triangle.
    pub vertex_groups: Vec<String>,
    pub threshold: f64,
    /// Scale around the proxy's own centroid.
    pub scale: f64,
}

impl MeshFilter {
    pub fn new(vertex_groups: Vec<String>, threshold: f64, scale: f64) -> Self {
        Self {
            vertex_groups,
            threshold,
            scale,
        }
    }

    pub fn apply(&self, mesh: &EvaluatedMesh) -> WidgetResult<Shape> {
        generate_from_mesh(mesh, &self.vertex_groups, self.threshold, self.scale)
    }
}

/// Build a 3D pick proxy from the current state of `mesh`.
///
/// With no vertex groups every triangle is kept. Otherwise a triangle is kept
/// only if each of its vertices has a weight above `weight_threshold` in at
/// least one of the groups. The result is scaled around its own centroid.
///
/// Nothing is cached: callers are expected to pass a freshly evaluated mesh
/// every time the pose may have changed.
pub fn generate_from_mesh(
    mesh: &EvaluatedMesh,
    vertex_groups: &[String],
    weight_threshold: f64,
    scale: f64,
) -> WidgetResult<Shape> {
    let groups = vertex_groups
        .iter()
        .map(|name| {
            mesh.vertex_group(name).ok_or_else(|| {
                WidgetError::Configuration(format!(
                    "mesh '{}' has no vertex group '{}'",
                    mesh.name, name
                ))
            })
        })
        .collect::<WidgetResult<Vec<_>>>()?;

    let in_scope = |vertex: usize| {
        groups.is_empty() || groups.iter().any(|g| g.weight(vertex) > weight_threshold)
    };

    let mut vertices = Vec::new();
    for triangle in &mesh.triangles {
        if !triangle.iter().all(|&v| in_scope(v)) {
            continue;
        }
        for &index in triangle {
            let position = mesh.positions.get(index).ok_or_else(|| {
                WidgetError::Configuration(format!(
                    "mesh '{}' references missing vertex {}",
                    mesh.name, index
                ))
            })?;
            vertices.push(*position);
        }
    }

    let shape = Shape::from_triangles(ShapeKind::Mesh, Dimension::Solid, vertices);
    Ok(match shape.centroid() {
        Some(centroid) => shape
            .offset(-centroid)
            .scaled_uniform(scale)
            .offset(centroid),
        None => shape,
    })
}
