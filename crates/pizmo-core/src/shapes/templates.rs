//! Fixed triangle templates and parametric primitives.

use super::{Dimension, Shape, ShapeKind};
use crate::error::{WidgetError, WidgetResult};
use glam::DVec3;
use std::f64::consts::{PI, TAU};

/// Default number of segments for circles.
pub const CIRCLE_SEGMENTS: usize = 24;
/// Default number of latitude bands for spheres.
pub const SPHERE_RINGS: usize = 8;
/// Default number of longitude segments for spheres.
pub const SPHERE_SEGMENTS: usize = 16;

pub(crate) const TRIANGLE: [[f64; 2]; 3] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

pub(crate) const QUAD: [[f64; 2]; 6] = [
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
];

pub(crate) const RECT: [[f64; 2]; 6] = [
    [-0.5, -1.0],
    [-0.5, 1.0],
    [0.5, 1.0],
    [0.5, 1.0],
    [0.5, -1.0],
    [-0.5, -1.0],
];

/// Vertical bar (the rect) plus a horizontal bar.
pub(crate) const CROSS: [[f64; 2]; 12] = [
    [-0.5, -1.0],
    [-0.5, 1.0],
    [0.5, 1.0],
    [0.5, 1.0],
    [0.5, -1.0],
    [-0.5, -1.0],
    [-1.0, -0.5],
    [-1.0, 0.5],
    [1.0, 0.5],
    [1.0, 0.5],
    [1.0, -0.5],
    [-1.0, -0.5],
];

// Clockwise outlines, used to build frames.
pub(crate) const TRIANGLE_OUTLINE: [[f64; 2]; 3] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

pub(crate) const QUAD_OUTLINE: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

pub(crate) const RECT_OUTLINE: [[f64; 2]; 4] = [[-0.5, -1.0], [-0.5, 1.0], [0.5, 1.0], [0.5, -1.0]];

pub(crate) const CROSS_OUTLINE: [[f64; 2]; 12] = [
    [-0.5, -1.0],
    [-0.5, -0.5],
    [-1.0, -0.5],
    [-1.0, 0.5],
    [-0.5, 0.5],
    [-0.5, 1.0],
    [0.5, 1.0],
    [0.5, 0.5],
    [1.0, 0.5],
    [1.0, -0.5],
    [0.5, -0.5],
    [0.5, -1.0],
];

pub(crate) fn lift(points: &[[f64; 2]]) -> Vec<DVec3> {
    points.iter().map(|p| DVec3::new(p[0], p[1], 0.0)).collect()
}

pub(crate) fn flat(kind: ShapeKind, points: &[[f64; 2]]) -> Shape {
    Shape::from_triangles(kind, Dimension::Flat, lift(points))
}

/// Points on the unit circle, counter-clockwise from +x.
pub(crate) fn circle_outline(segments: usize) -> Vec<DVec3> {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            DVec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect()
}

/// Unit disk as a fan of `segments` triangles around the origin.
///
/// Both components use the same angle; scaling is applied afterwards with
/// [`Shape::scaled`] so x and y stay consistent.
pub fn circle(segments: usize) -> WidgetResult<Shape> {
    if segments < 3 {
        return Err(WidgetError::Configuration(format!(
            "circle needs at least 3 segments, got {}",
            segments
        )));
    }
    let outline = circle_outline(segments);
    let mut vertices = Vec::with_capacity(segments * 3);
    for i in 0..segments {
        vertices.push(DVec3::ZERO);
        vertices.push(outline[i]);
        vertices.push(outline[(i + 1) % segments]);
    }
    Ok(Shape::from_triangles(ShapeKind::Circle, Dimension::Flat, vertices))
}

/// Unit UV sphere. Pole bands emit one triangle per segment.
pub fn sphere(rings: usize, segments: usize) -> WidgetResult<Shape> {
    if rings < 2 || segments < 3 {
        return Err(WidgetError::Configuration(format!(
            "sphere needs at least 2 rings and 3 segments, got {}x{}",
            rings, segments
        )));
    }
    let point = |ring: usize, segment: usize| {
        let polar = PI * ring as f64 / rings as f64;
        let azimuth = TAU * (segment % segments) as f64 / segments as f64;
        DVec3::new(
            polar.sin() * azimuth.cos(),
            polar.sin() * azimuth.sin(),
            polar.cos(),
        )
    };

    let mut vertices = Vec::new();
    for ring in 0..rings {
        for segment in 0..segments {
            let a = point(ring, segment);
            let b = point(ring, segment + 1);
            let c = point(ring + 1, segment + 1);
            let d = point(ring + 1, segment);
            if ring != 0 {
                vertices.extend([a, b, c]);
            }
            if ring != rings - 1 {
                vertices.extend([a, c, d]);
            }
        }
    }
    Ok(Shape::from_triangles(ShapeKind::Sphere, Dimension::Solid, vertices))
}
