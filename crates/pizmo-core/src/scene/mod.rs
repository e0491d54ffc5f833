//! Scene data source the widgets read from and pose.
//!
//! Bones and meshes are owned by the host. Widgets only keep names and look
//! them up again every time they need them, so a renamed or deleted bone
//! surfaces as [`WidgetError::MissingBone`] instead of a dangling reference.

mod memory;

pub use memory::MemoryScene;

use crate::error::{WidgetError, WidgetResult};
use crate::shapes::EvaluatedMesh;
use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Pose channels of a bone, relative to its pose space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonePose {
    pub location: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Default for BonePose {
    fn default() -> Self {
        Self {
            location: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

/// Per-axis transform locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformLocks {
    pub location: [bool; 3],
    pub rotation: [bool; 3],
    pub scale: [bool; 3],
}

impl TransformLocks {
    /// Zero the components of `v` whose axis is locked.
    pub fn mask(locks: [bool; 3], v: DVec3) -> DVec3 {
        DVec3::new(
            if locks[0] { 0.0 } else { v.x },
            if locks[1] { 0.0 } else { v.y },
            if locks[2] { 0.0 } else { v.z },
        )
    }

    /// Take locked components from `original`, the rest from `updated`.
    pub fn merge(locks: [bool; 3], original: DVec3, updated: DVec3) -> DVec3 {
        DVec3::new(
            if locks[0] { original.x } else { updated.x },
            if locks[1] { original.y } else { updated.y },
            if locks[2] { original.z } else { updated.z },
        )
    }
}

/// Snapshot of a pose bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Head position in world space.
    pub head: DVec3,
    /// World transform of the space the pose channels are expressed in.
    pub matrix: DMat4,
    pub pose: BonePose,
    pub selected: bool,
    pub hidden: bool,
    /// Bone layer membership as a bit mask.
    pub layers: u32,
    pub locks: TransformLocks,
}

impl Bone {
    /// Create an unselected, unlocked bone on the first layer.
    pub fn new(name: impl Into<String>, head: DVec3) -> Self {
        Self {
            name: name.into(),
            head,
            matrix: DMat4::from_translation(head),
            pose: BonePose::default(),
            selected: false,
            hidden: false,
            layers: 1,
            locks: TransformLocks::default(),
        }
    }

    /// Check if the bone is drawn given the viewport's visible layers.
    pub fn is_visible(&self, visible_layers: u32) -> bool {
        !self.hidden && self.layers & visible_layers != 0
    }

    /// Convert a world direction into the bone's pose space.
    pub fn world_to_local(&self, direction: DVec3) -> DVec3 {
        self.matrix.inverse().transform_vector3(direction)
    }
}

/// Host scene queried by widget groups.
///
/// Reads are snapshots. Writes are limited to bone selection and pose
/// channels, the only things a widget changes.
pub trait Scene {
    /// Identity of the armature object the widgets are bound to.
    fn armature(&self) -> &str;

    /// Names of all bones, in armature order.
    fn bone_names(&self) -> Vec<String>;

    /// Look up a bone by name.
    fn bone(&self, name: &str) -> Option<Bone>;

    /// Layers currently shown in the viewport.
    fn visible_layers(&self) -> u32;

    /// Current, deformed state of a mesh object.
    fn evaluated_mesh(&self, object: &str) -> Option<EvaluatedMesh>;

    /// Select a bone. Without `extend` every other bone is deselected first.
    fn select_bone(&mut self, name: &str, extend: bool) -> WidgetResult<()>;

    /// Overwrite the pose channels of a bone.
    fn set_pose(&mut self, name: &str, pose: BonePose) -> WidgetResult<()>;

    /// Names of the selected bones.
    fn selected_bones(&self) -> Vec<String> {
        self.bone_names()
            .into_iter()
            .filter(|name| self.bone(name).is_some_and(|b| b.selected))
            .collect()
    }

    /// Look up a bone, failing with [`WidgetError::MissingBone`].
    fn require_bone(&self, name: &str) -> WidgetResult<Bone> {
        self.bone(name)
            .ok_or_else(|| WidgetError::MissingBone(name.to_string()))
    }
}
