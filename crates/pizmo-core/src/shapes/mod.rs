//! Proxy geometry for widgets.
//!
//! Every shape is a plain triangle list: three consecutive vertices form one
//! triangle. Flat shapes live in the z = 0 plane and are uploaded with two
//! components per vertex, solid shapes with three.

mod frame;
mod mesh;
mod templates;

pub use frame::frame_vertices;
pub use mesh::{generate_from_mesh, EvaluatedMesh, MeshFilter, VertexGroup};
pub use templates::{circle, sphere, CIRCLE_SEGMENTS, SPHERE_RINGS, SPHERE_SEGMENTS};

use crate::error::{WidgetError, WidgetResult};
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// Which generator produced a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Triangle,
    Quad,
    Rect,
    Cross,
    Circle,
    Sphere,
    /// Caller supplied vertices.
    Custom,
    /// Derived from an evaluated mesh.
    Mesh,
}

impl ShapeKind {
    /// Check if this kind is generated procedurally (no external data needed).
    pub fn is_procedural(self) -> bool {
        !matches!(self, ShapeKind::Custom | ShapeKind::Mesh)
    }
}

/// Number of components per vertex when uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dimension {
    /// Two components, z is always zero.
    #[default]
    Flat,
    /// Three components.
    Solid,
}

/// An immutable triangle list.
///
/// Transforms (`scaled`, `offset`, `centered`) return a derived shape and
/// leave the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    kind: ShapeKind,
    dimension: Dimension,
    vertices: Vec<DVec3>,
}

impl Shape {
    /// Build a shape from a triangle list.
    ///
    /// Fails if the vertex count is not a multiple of three.
    pub fn new(kind: ShapeKind, dimension: Dimension, vertices: Vec<DVec3>) -> WidgetResult<Self> {
        if vertices.len() % 3 != 0 {
            return Err(WidgetError::Configuration(format!(
                "{:?} shape has {} vertices, expected a multiple of 3",
                kind,
                vertices.len()
            )));
        }
        Ok(Self::from_triangles(kind, dimension, vertices))
    }

    /// Build a flat custom shape from 2D coordinates.
    pub fn from_flat(points: &[[f64; 2]]) -> WidgetResult<Self> {
        let vertices = points.iter().map(|p| DVec3::new(p[0], p[1], 0.0)).collect();
        Self::new(ShapeKind::Custom, Dimension::Flat, vertices)
    }

    /// Build a shape from vertices already known to form whole triangles.
    pub(crate) fn from_triangles(kind: ShapeKind, dimension: Dimension, vertices: Vec<DVec3>) -> Self {
        debug_assert_eq!(vertices.len() % 3, 0);
        Self {
            kind,
            dimension,
            vertices,
        }
    }

    /// An empty shape of the given kind.
    pub fn empty(kind: ShapeKind, dimension: Dimension) -> Self {
        Self::from_triangles(kind, dimension, Vec::new())
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.vertices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Component-wise scale around the origin.
    pub fn scaled(&self, factor: DVec3) -> Self {
        self.map(|v| v * factor)
    }

    /// Uniform scale around the origin.
    pub fn scaled_uniform(&self, factor: f64) -> Self {
        self.scaled(DVec3::splat(factor))
    }

    /// Translate every vertex.
    pub fn offset(&self, delta: DVec3) -> Self {
        self.map(|v| v + delta)
    }

    /// Move the shape so its bounding box is centered on the origin.
    pub fn centered(&self) -> Self {
        match self.bounds() {
            Some((min, max)) => {
                let half_extent = (max - min) * 0.5;
                self.offset(-(min + half_extent))
            }
            None => self.clone(),
        }
    }

    /// Apply an affine transform to every vertex.
    pub fn transformed(&self, matrix: DMat4) -> Self {
        self.map(|v| matrix.transform_point3(v))
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty shape.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }

    /// Mean of all vertex positions.
    pub fn centroid(&self) -> Option<DVec3> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: DVec3 = self.vertices.iter().copied().sum();
        Some(sum / self.vertices.len() as f64)
    }

    /// Flatten to the float buffer expected by custom-shape drawing.
    pub fn to_vertex_buffer(&self) -> Vec<f32> {
        match self.dimension {
            Dimension::Flat => self
                .vertices
                .iter()
                .flat_map(|v| [v.x as f32, v.y as f32])
                .collect(),
            Dimension::Solid => self
                .vertices
                .iter()
                .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
        }
    }

    fn map(&self, f: impl Fn(DVec3) -> DVec3) -> Self {
        Self {
            kind: self.kind,
            dimension: self.dimension,
            vertices: self.vertices.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Generate a procedural shape, scale it, then translate it.
pub fn generate(kind: ShapeKind, scale: DVec3, offset: DVec3) -> WidgetResult<Shape> {
    let base = match kind {
        ShapeKind::Triangle => templates::flat(kind, &templates::TRIANGLE),
        ShapeKind::Quad => templates::flat(kind, &templates::QUAD),
        ShapeKind::Rect => templates::flat(kind, &templates::RECT),
        ShapeKind::Cross => templates::flat(kind, &templates::CROSS),
        ShapeKind::Circle => circle(CIRCLE_SEGMENTS)?,
        ShapeKind::Sphere => sphere(SPHERE_RINGS, SPHERE_SEGMENTS)?,
        ShapeKind::Custom | ShapeKind::Mesh => {
            return Err(WidgetError::Configuration(format!(
                "{:?} shapes cannot be generated procedurally",
                kind
            )));
        }
    };
    Ok(base.scaled(scale).offset(offset))
}

/// Generate the frame (ring) variant of a procedural shape.
pub fn generate_frame(kind: ShapeKind, thickness: f64, scale: DVec3, offset: DVec3) -> WidgetResult<Shape> {
    Ok(frame_vertices(kind, thickness)?.scaled(scale).offset(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    const BASE_KINDS: [ShapeKind; 6] = [
        ShapeKind::Triangle,
        ShapeKind::Quad,
        ShapeKind::Rect,
        ShapeKind::Cross,
        ShapeKind::Circle,
        ShapeKind::Sphere,
    ];

    fn approx_eq(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_base_shapes_are_whole_triangles() {
        for kind in BASE_KINDS {
            let shape = generate(kind, DVec3::ONE, DVec3::ZERO).unwrap();
            assert!(!shape.is_empty(), "{:?}", kind);
            assert_eq!(shape.vertex_count() % 3, 0, "{:?}", kind);
            assert_eq!(shape.triangle_count() * 3, shape.vertex_count());
        }
    }

    #[test]
    fn test_base_triangles_have_distinct_vertices() {
        for kind in BASE_KINDS {
            let shape = generate(kind, DVec3::ONE, DVec3::ZERO).unwrap();
            for [a, b, c] in shape.triangles() {
                assert!(!approx_eq(a, b) && !approx_eq(b, c) && !approx_eq(a, c), "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_scale_roundtrip() {
        let factor = DVec3::new(2.5, 0.4, 3.0);
        for kind in BASE_KINDS {
            let shape = generate(kind, DVec3::ONE, DVec3::ZERO).unwrap();
            let back = shape.scaled(factor).scaled(factor.recip());
            for (a, b) in shape.vertices().iter().zip(back.vertices()) {
                assert!(approx_eq(*a, *b));
            }
        }
    }

    #[test]
    fn test_scale_does_not_mutate_original() {
        let shape = generate(ShapeKind::Quad, DVec3::ONE, DVec3::ZERO).unwrap();
        let copy = shape.clone();
        let _ = shape.scaled_uniform(4.0);
        assert_eq!(shape, copy);
    }

    #[test]
    fn test_generate_applies_scale_then_offset() {
        let shape = generate(ShapeKind::Quad, DVec3::splat(0.25), DVec3::new(1.0, 2.0, 0.0)).unwrap();
        let (min, max) = shape.bounds().unwrap();
        assert!(approx_eq(min, DVec3::new(1.0, 2.0, 0.0)));
        assert!(approx_eq(max, DVec3::new(1.25, 2.25, 0.0)));
    }

    #[test]
    fn test_centered_quad() {
        let shape = generate(ShapeKind::Quad, DVec3::ONE, DVec3::ZERO).unwrap().centered();
        let (min, max) = shape.bounds().unwrap();
        assert!(approx_eq(min, DVec3::new(-0.5, -0.5, 0.0)));
        assert!(approx_eq(max, DVec3::new(0.5, 0.5, 0.0)));
    }

    #[test]
    fn test_vertex_buffer_layout() {
        let flat = generate(ShapeKind::Triangle, DVec3::ONE, DVec3::ZERO).unwrap();
        assert_eq!(flat.to_vertex_buffer().len(), flat.vertex_count() * 2);

        let solid = generate(ShapeKind::Sphere, DVec3::ONE, DVec3::ZERO).unwrap();
        assert_eq!(solid.to_vertex_buffer().len(), solid.vertex_count() * 3);
    }

    #[test]
    fn test_custom_vertices_must_form_triangles() {
        assert!(Shape::from_flat(&[[0.0, 0.0], [1.0, 0.0]]).is_err());
        let shape = Shape::from_flat(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Custom);
        assert_eq!(shape.triangle_count(), 1);
    }

    #[test]
    fn test_non_procedural_kinds_rejected() {
        assert!(matches!(
            generate(ShapeKind::Mesh, DVec3::ONE, DVec3::ZERO),
            Err(WidgetError::Configuration(_))
        ));
    }
}
