//! View transforms for the 3D viewport hosting the widgets.

use glam::{DMat4, DVec3, DVec4};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// View state of the viewport the widgets are drawn in.
///
/// Converts between world space, view space (x right, y up, z toward the
/// viewer) and region pixels (y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    /// World to view transform.
    pub view_matrix: DMat4,
    /// View to clip transform.
    pub projection: DMat4,
    /// Region size in pixels.
    pub viewport: Size,
    /// Orbit pivot of the view, in world space.
    pub view_location: DVec3,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::orthographic(DMat4::IDENTITY, 1.0, Size::new(1000.0, 1000.0))
    }
}

impl ViewContext {
    /// Create a view context.
    pub fn new(view_matrix: DMat4, projection: DMat4, viewport: Size, view_location: DVec3) -> Self {
        Self {
            view_matrix,
            projection,
            viewport,
            view_location,
        }
    }

    /// Orthographic view showing `half_extent` world units above and below
    /// the center, with the aspect taken from `viewport`.
    pub fn orthographic(view_matrix: DMat4, half_extent: f64, viewport: Size) -> Self {
        let aspect = if viewport.height > 0.0 {
            viewport.width / viewport.height
        } else {
            1.0
        };
        let projection = DMat4::orthographic_rh(
            -half_extent * aspect,
            half_extent * aspect,
            -half_extent,
            half_extent,
            -1000.0,
            1000.0,
        );
        Self::new(view_matrix, projection, viewport, DVec3::ZERO)
    }

    /// View to world transform.
    pub fn view_inverse(&self) -> DMat4 {
        self.view_matrix.inverse()
    }

    /// Space for view-aligned widgets: the view orientation, anchored at the
    /// view pivot.
    pub fn widget_space(&self) -> DMat4 {
        let mut space = self.view_inverse();
        space.w_axis = self.view_location.extend(1.0);
        space
    }

    /// Project a world position to region pixels.
    ///
    /// Returns `None` for points behind the viewer.
    pub fn world_to_screen(&self, world: DVec3) -> Option<Point> {
        let clip: DVec4 = self.projection * self.view_matrix * world.extend(1.0);
        if clip.w <= f64::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Point::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.width,
            (1.0 - ndc.y) * 0.5 * self.viewport.height,
        ))
    }

    /// Convert a region-pixel delta into a world offset in the view plane
    /// through the view pivot.
    ///
    /// A point at the pivot moved by the result lands `delta` pixels away on
    /// screen, whatever the zoom. Falls back to one unit per pixel when the
    /// view cannot be inverted.
    pub fn screen_delta_to_world(&self, delta: Vec2) -> DVec3 {
        let fallback = || self.view_to_world(DVec3::new(delta.x, -delta.y, 0.0));
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return fallback();
        }
        let view_projection = self.projection * self.view_matrix;
        let clip = view_projection * self.view_location.extend(1.0);
        if clip.w.abs() <= f64::EPSILON || view_projection.determinant().abs() <= f64::EPSILON {
            return fallback();
        }

        let ndc = clip.truncate() / clip.w;
        let ndc_delta = DVec3::new(
            2.0 * delta.x / self.viewport.width,
            -2.0 * delta.y / self.viewport.height,
            0.0,
        );
        let inverse = view_projection.inverse();
        inverse.project_point3(ndc + ndc_delta) - inverse.project_point3(ndc)
    }

    /// Convert a view-space direction into world space.
    pub fn view_to_world(&self, direction: DVec3) -> DVec3 {
        self.view_inverse().transform_vector3(direction)
    }
}
