//! Drag sessions and the pose changes they produce.

use crate::input::Modifiers;
use crate::scene::{Bone, BonePose, TransformLocks};
use crate::trackball::{Trackball, TrackballRotation};
use crate::view::ViewContext;
use glam::{DQuat, DVec3};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest uniform scale factor a drag can produce.
pub const MIN_SCALE_FACTOR: f64 = 0.01;

/// Transform applied to the bound bone while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragAction {
    /// Select only.
    #[default]
    None,
    Translate,
    Rotate,
    Scale,
}

/// Tunable drag constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragTuning {
    /// Mouse travel, in pixels, for a scale change of one.
    pub pixels_per_unit: f64,
    /// Divisor applied to deltas and angles in precise mode.
    pub precise_divisor: f64,
    /// Translation and scale deltas snap to multiples of this.
    pub snap_increment: f64,
    /// Rotation angles snap to multiples of this, in radians.
    pub snap_angle: f64,
    /// Side of the square trackball area around the press point, in pixels.
    pub trackball_extent: f64,
    pub trackball: Trackball,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            pixels_per_unit: 100.0,
            precise_divisor: 10.0,
            snap_increment: 0.1,
            snap_angle: 15f64.to_radians(),
            trackball_extent: 200.0,
            trackball: Trackball::default(),
        }
    }
}

impl DragTuning {
    /// Convert a pixel delta into scene units, applying precise and snap
    /// modifiers in that order.
    pub fn scaled_delta(&self, pixels: Vec2, modifiers: Modifiers) -> Vec2 {
        let mut delta = pixels / self.pixels_per_unit;
        if modifiers.precise() {
            delta = delta / self.precise_divisor;
        }
        if modifiers.snap() {
            delta = Vec2::new(
                snap_to_increment(delta.x, self.snap_increment),
                snap_to_increment(delta.y, self.snap_increment),
            );
        }
        delta
    }

    /// Apply precise and snap modifiers to a world-space translation.
    pub fn scaled_offset(&self, offset: DVec3, modifiers: Modifiers) -> DVec3 {
        let mut offset = offset;
        if modifiers.precise() {
            offset /= self.precise_divisor;
        }
        if modifiers.snap() {
            offset = DVec3::new(
                snap_to_increment(offset.x, self.snap_increment),
                snap_to_increment(offset.y, self.snap_increment),
                snap_to_increment(offset.z, self.snap_increment),
            );
        }
        offset
    }

    /// Apply precise and snap modifiers to a rotation angle.
    pub fn scaled_angle(&self, angle: f64, modifiers: Modifiers) -> f64 {
        let mut angle = angle;
        if modifiers.precise() {
            angle /= self.precise_divisor;
        }
        if modifiers.snap() {
            angle = snap_to_increment(angle, self.snap_angle);
        }
        angle
    }

    /// Trackball reference area for a drag starting at `start`.
    pub fn trackball_rect(&self, start: Point) -> Rect {
        Rect::from_center_size(start, Size::new(self.trackball_extent, self.trackball_extent))
    }
}

/// Round `value` to the nearest multiple of `increment`.
pub fn snap_to_increment(value: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}

/// Scratch state of one press-and-drag interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Pointer position at press time.
    pub start: Point,
    /// Latest pointer position.
    pub current: Point,
    pub action: DragAction,
    /// Bone pose at press time; every drag tick starts again from it.
    pub initial_pose: BonePose,
    /// Trackball vector at press time, for rotating drags.
    pub initial_vector: Option<DVec3>,
    pub trackball_rect: Rect,
}

impl DragSession {
    pub fn new(start: Point, action: DragAction, initial_pose: BonePose, tuning: &DragTuning) -> Self {
        let trackball_rect = tuning.trackball_rect(start);
        let initial_vector =
            (action == DragAction::Rotate).then(|| tuning.trackball.vector(trackball_rect, start));
        Self {
            start,
            current: start,
            action,
            initial_pose,
            initial_vector,
            trackball_rect,
        }
    }

    /// Pixel delta since the press.
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }

    /// Pose produced by the current pointer position.
    pub fn pose(&self, bone: &Bone, modifiers: Modifiers, view: &ViewContext, tuning: &DragTuning) -> BonePose {
        match self.action {
            DragAction::None => self.initial_pose,
            DragAction::Translate => {
                let offset = tuning.scaled_offset(view.screen_delta_to_world(self.delta()), modifiers);
                translate_pose(bone, &self.initial_pose, offset)
            }
            DragAction::Rotate => {
                let from = self
                    .initial_vector
                    .unwrap_or_else(|| tuning.trackball.vector(self.trackball_rect, self.start));
                let to = tuning.trackball.vector(self.trackball_rect, self.current);
                let mut rotation = tuning.trackball.rotation(from, to);
                rotation.angle = tuning.scaled_angle(rotation.angle, modifiers);
                rotate_pose(bone, &self.initial_pose, rotation, view)
            }
            DragAction::Scale => {
                let delta = tuning.scaled_delta(self.delta(), modifiers);
                scale_pose(bone, &self.initial_pose, delta)
            }
        }
    }
}

/// Move the bone by a world offset on its unlocked axes.
pub fn translate_pose(bone: &Bone, initial: &BonePose, offset: DVec3) -> BonePose {
    let local = TransformLocks::mask(bone.locks.location, bone.world_to_local(offset));
    BonePose {
        location: initial.location + local,
        ..*initial
    }
}

/// Compose a view-space trackball rotation onto the bone's rotation.
///
/// Locked rotation axes are removed from the rotation axis; if nothing is
/// left the pose is unchanged.
pub fn rotate_pose(bone: &Bone, initial: &BonePose, rotation: TrackballRotation, view: &ViewContext) -> BonePose {
    let world_axis = view.view_to_world(rotation.axis);
    let local_axis = TransformLocks::mask(bone.locks.rotation, bone.world_to_local(world_axis));
    let axis = local_axis.normalize_or_zero();
    if axis == DVec3::ZERO {
        return *initial;
    }
    let delta = DQuat::from_axis_angle(axis, rotation.angle);
    BonePose {
        rotation: (delta * initial.rotation).normalize(),
        ..*initial
    }
}

/// Scale the bone uniformly by the horizontal component of the drag
/// direction times the drag length.
pub fn scale_pose(bone: &Bone, initial: &BonePose, delta: Vec2) -> BonePose {
    let length = delta.hypot();
    if length <= f64::EPSILON {
        return *initial;
    }
    let direction_x = delta.x / length;
    let factor = (1.0 + direction_x * length).max(MIN_SCALE_FACTOR);
    BonePose {
        scale: TransformLocks::merge(bone.locks.scale, initial.scale, initial.scale * factor),
        ..*initial
    }
}
