//! Trackball rotation model.
//!
//! Screen points are lifted onto a virtual surface: a sphere near the center
//! of the reference rectangle and a hyperbolic sheet beyond it. The two meet
//! at `d = radius / sqrt(2)` with matching depth, so arbitrarily long drags
//! never hit a singularity.

use glam::{DQuat, DVec3};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2, TAU};

/// Default trackball radius in normalized rectangle units.
pub const DEFAULT_RADIUS: f64 = 1.1;

/// Default divisor applied to the chord angle.
pub const DEFAULT_DAMPING: f64 = 2.0;

/// Axis and angle of a trackball drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackballRotation {
    /// Not normalized; zero when the two vectors are parallel.
    pub axis: DVec3,
    /// Radians, within `[-PI, PI)`.
    pub angle: f64,
}

impl TrackballRotation {
    /// Quaternion for this rotation, identity if the axis is degenerate.
    pub fn to_quat(self) -> DQuat {
        let axis = self.axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            DQuat::IDENTITY
        } else {
            DQuat::from_axis_angle(axis, self.angle)
        }
    }
}

/// Trackball parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trackball {
    pub radius: f64,
    /// The raw chord angle is divided by this.
    pub damping: f64,
}

impl Default for Trackball {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            damping: DEFAULT_DAMPING,
        }
    }
}

impl Trackball {
    pub fn new(radius: f64, damping: f64) -> Self {
        Self { radius, damping }
    }

    /// Lift `point` onto the trackball surface of `rect`.
    ///
    /// Coordinates are normalized by half the rectangle's shorter side so the
    /// mapping stays uniform whatever the aspect. Screen y grows downward,
    /// the returned y grows upward.
    pub fn vector(&self, rect: Rect, point: Point) -> DVec3 {
        let center = rect.center();
        let half = rect.width().abs().min(rect.height().abs()) / 2.0;
        let half = if half > f64::EPSILON { half } else { 1.0 };

        let x = (point.x - center.x) / half;
        let y = (center.y - point.y) / half;
        DVec3::new(x, y, surface_depth(x.hypot(y), self.radius))
    }

    /// Rotation carrying `from` onto `to`.
    ///
    /// The angle grows linearly with the chord between the two vectors rather
    /// than with the true angle between them.
    pub fn rotation(&self, from: DVec3, to: DVec3) -> TrackballRotation {
        let axis = from.cross(to);
        let chord = (to - from).length();
        let raw = chord / (2.0 * self.radius) * PI;
        TrackballRotation {
            axis,
            angle: wrap_angle(raw / self.damping),
        }
    }
}

/// [`Trackball::vector`] for an explicit radius.
pub fn trackball_vector(rect: Rect, point: Point, radius: f64) -> DVec3 {
    Trackball::new(radius, DEFAULT_DAMPING).vector(rect, point)
}

/// [`Trackball::rotation`] with the default parameters, as `(axis, angle)`.
pub fn rotation_between(from: DVec3, to: DVec3) -> (DVec3, f64) {
    let rotation = Trackball::default().rotation(from, to);
    (rotation.axis, rotation.angle)
}

/// Wrap an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

fn surface_depth(distance: f64, radius: f64) -> f64 {
    if distance < radius / SQRT_2 {
        sphere_depth(distance, radius)
    } else {
        hyperbolic_depth(distance, radius)
    }
}

fn sphere_depth(distance: f64, radius: f64) -> f64 {
    (radius * radius - distance * distance).sqrt()
}

fn hyperbolic_depth(distance: f64, radius: f64) -> f64 {
    let t = radius / SQRT_2;
    t * t / distance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_rect() -> Rect {
        Rect::new(-1.0, -1.0, 1.0, 1.0)
    }

    #[test]
    fn test_center_points_straight_out() {
        let v = trackball_vector(unit_rect(), Point::ZERO, DEFAULT_RADIUS);
        assert!(v.x.abs() < 1e-12 && v.y.abs() < 1e-12);
        assert!((v.z - DEFAULT_RADIUS).abs() < 1e-12);
    }

    #[test]
    fn test_branches_meet_at_boundary() {
        let r = DEFAULT_RADIUS;
        let d = r / SQRT_2;
        let on_sphere = DVec3::new(d, 0.0, sphere_depth(d, r));
        let on_sheet = DVec3::new(d, 0.0, hyperbolic_depth(d, r));
        assert!((on_sphere.length() - r).abs() < 1e-6);
        assert!((on_sheet.length() - r).abs() < 1e-6);

        let diagonal = d / SQRT_2;
        let v = trackball_vector(unit_rect(), Point::new(diagonal, diagonal), r);
        assert!((v.length() - r).abs() < 1e-6);
    }

    #[test]
    fn test_far_points_stay_finite() {
        let v = trackball_vector(unit_rect(), Point::new(500.0, -300.0), DEFAULT_RADIUS);
        assert!(v.z > 0.0 && v.z.is_finite());
    }

    #[test]
    fn test_aspect_uses_shorter_side() {
        let wide = Rect::new(-4.0, -1.0, 4.0, 1.0);
        let v = trackball_vector(wide, Point::new(0.5, 0.0), DEFAULT_RADIUS);
        assert!((v.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_screen_y_is_flipped() {
        let v = trackball_vector(unit_rect(), Point::new(0.0, -0.5), DEFAULT_RADIUS);
        assert!((v.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_angle_continuity() {
        let eps = 1e-3;
        assert!((wrap_angle(PI + eps) - (-PI + eps)).abs() < 1e-9);
        assert!((wrap_angle(-PI - eps) - (PI - eps)).abs() < 1e-9);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_angle(3.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_between_parallel_vectors() {
        let v = DVec3::new(0.0, 0.0, DEFAULT_RADIUS);
        let (axis, angle) = rotation_between(v, v);
        assert_eq!(axis, DVec3::ZERO);
        assert!(angle.abs() < 1e-12);
        let rotation = TrackballRotation { axis, angle };
        assert_eq!(rotation.to_quat(), DQuat::IDENTITY);
    }

    #[test]
    fn test_horizontal_drag_rotates_about_vertical_axis() {
        let ball = Trackball::default();
        let from = ball.vector(unit_rect(), Point::ZERO);
        let to = ball.vector(unit_rect(), Point::new(0.3, 0.0));
        let rotation = ball.rotation(from, to);
        let axis = rotation.axis.normalize();
        assert!((axis.y - 1.0).abs() < 1e-9);
        let expected = (to - from).length() / (2.0 * ball.radius) * PI / ball.damping;
        assert!((rotation.angle - expected).abs() < 1e-12);
    }
}
