//! Ring ("frame") variants of the outline shapes.

use super::templates::{
    circle_outline, lift, CROSS_OUTLINE, QUAD_OUTLINE, RECT_OUTLINE, TRIANGLE_OUTLINE,
};
use super::{Dimension, Shape, ShapeKind, CIRCLE_SEGMENTS};
use crate::error::{WidgetError, WidgetResult};
use glam::DVec3;

/// Build a ring between the outline of `kind` and a copy shrunk by
/// `1 - thickness` around the outline's center.
///
/// Each outline edge yields a trapezoid of two triangles, so the inner and
/// outer contours keep the same winding. A thickness of zero collapses the
/// ring onto the outline.
pub fn frame_vertices(kind: ShapeKind, thickness: f64) -> WidgetResult<Shape> {
    if !(0.0..=1.0).contains(&thickness) {
        return Err(WidgetError::Configuration(format!(
            "frame thickness must be within [0, 1], got {}",
            thickness
        )));
    }

    let (outer, center) = match kind {
        ShapeKind::Triangle => outline_with_center(lift(&TRIANGLE_OUTLINE)),
        ShapeKind::Quad => outline_with_center(lift(&QUAD_OUTLINE)),
        ShapeKind::Rect => outline_with_center(lift(&RECT_OUTLINE)),
        ShapeKind::Cross => outline_with_center(lift(&CROSS_OUTLINE)),
        ShapeKind::Circle => (circle_outline(CIRCLE_SEGMENTS), DVec3::ZERO),
        _ => {
            return Err(WidgetError::Configuration(format!(
                "{:?} shapes have no frame variant",
                kind
            )));
        }
    };

    let inner: Vec<DVec3> = outer
        .iter()
        .map(|&v| center + (v - center) * (1.0 - thickness))
        .collect();

    let n = outer.len();
    let mut vertices = Vec::with_capacity(n * 6);
    for i in 0..n {
        let j = (i + 1) % n;
        vertices.extend([outer[i], outer[j], inner[j]]);
        vertices.extend([inner[j], inner[i], outer[i]]);
    }
    Ok(Shape::from_triangles(kind, Dimension::Flat, vertices))
}

fn outline_with_center(outline: Vec<DVec3>) -> (Vec<DVec3>, DVec3) {
    let (min, max) = outline
        .iter()
        .fold((outline[0], outline[0]), |(min, max), &v| (min.min(v), max.max(v)));
    (outline, (min + max) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMED: [ShapeKind; 5] = [
        ShapeKind::Triangle,
        ShapeKind::Quad,
        ShapeKind::Rect,
        ShapeKind::Cross,
        ShapeKind::Circle,
    ];

    #[test]
    fn test_zero_thickness_collapses_ring() {
        for kind in FRAMED {
            let frame = frame_vertices(kind, 0.0).unwrap();
            for [a, b, c] in frame.triangles() {
                // Every trapezoid triangle has a repeated corner when inner == outer.
                let degenerate = (a - b).length() < 1e-12
                    || (b - c).length() < 1e-12
                    || (a - c).length() < 1e-12;
                assert!(degenerate, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_frame_triangle_count() {
        let frame = frame_vertices(ShapeKind::Quad, 0.2).unwrap();
        assert_eq!(frame.triangle_count(), 8);
        let frame = frame_vertices(ShapeKind::Circle, 0.2).unwrap();
        assert_eq!(frame.triangle_count(), CIRCLE_SEGMENTS * 2);
    }

    #[test]
    fn test_frame_contours_share_winding() {
        // Signed area of every outer-edge triangle has the same sign as the
        // matching inner-edge triangle.
        let frame = frame_vertices(ShapeKind::Rect, 0.3).unwrap();
        let area = |[a, b, c]: [DVec3; 3]| (b - a).truncate().perp_dot((c - a).truncate());
        let tris: Vec<_> = frame.triangles().collect();
        for pair in tris.chunks_exact(2) {
            assert!(area(pair[0]).signum() == area(pair[1]).signum());
        }
    }

    #[test]
    fn test_inner_contour_is_scaled() {
        let frame = frame_vertices(ShapeKind::Circle, 0.25).unwrap();
        let [outer, _, inner] = frame.triangles().next().unwrap();
        assert!((outer.length() - 1.0).abs() < 1e-12);
        assert!((inner.length() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_thickness() {
        assert!(frame_vertices(ShapeKind::Quad, 1.5).is_err());
        assert!(frame_vertices(ShapeKind::Sphere, 0.1).is_err());
    }
}
