//! In-memory scene implementation.

use super::{Bone, BonePose, Scene};
use crate::error::{WidgetError, WidgetResult};
use crate::shapes::EvaluatedMesh;
use std::collections::HashMap;

/// In-memory scene for testing and headless use.
#[derive(Debug, Clone)]
pub struct MemoryScene {
    armature: String,
    bones: Vec<Bone>,
    meshes: HashMap<String, EvaluatedMesh>,
    visible_layers: u32,
}

impl MemoryScene {
    /// Create an empty scene bound to `armature`, all layers visible.
    pub fn new(armature: impl Into<String>) -> Self {
        Self {
            armature: armature.into(),
            bones: Vec::new(),
            meshes: HashMap::new(),
            visible_layers: u32::MAX,
        }
    }

    /// Add a bone, replacing any bone with the same name.
    pub fn with_bone(mut self, bone: Bone) -> Self {
        self.insert_bone(bone);
        self
    }

    /// Add a mesh object keyed by its name.
    pub fn with_mesh(mut self, mesh: EvaluatedMesh) -> Self {
        self.insert_mesh(mesh);
        self
    }

    pub fn insert_bone(&mut self, bone: Bone) {
        match self.bones.iter_mut().find(|b| b.name == bone.name) {
            Some(existing) => *existing = bone,
            None => self.bones.push(bone),
        }
    }

    pub fn insert_mesh(&mut self, mesh: EvaluatedMesh) {
        self.meshes.insert(mesh.name.clone(), mesh);
    }

    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut EvaluatedMesh> {
        self.meshes.get_mut(name)
    }

    pub fn bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        self.bones.iter_mut().find(|b| b.name == name)
    }

    pub fn remove_bone(&mut self, name: &str) -> Option<Bone> {
        let index = self.bones.iter().position(|b| b.name == name)?;
        Some(self.bones.remove(index))
    }

    /// Rebind the scene to another armature object.
    pub fn set_armature(&mut self, armature: impl Into<String>) {
        self.armature = armature.into();
    }

    pub fn set_visible_layers(&mut self, layers: u32) {
        self.visible_layers = layers;
    }
}

impl Scene for MemoryScene {
    fn armature(&self) -> &str {
        &self.armature
    }

    fn bone_names(&self) -> Vec<String> {
        self.bones.iter().map(|b| b.name.clone()).collect()
    }

    fn bone(&self, name: &str) -> Option<Bone> {
        self.bones.iter().find(|b| b.name == name).cloned()
    }

    fn visible_layers(&self) -> u32 {
        self.visible_layers
    }

    fn evaluated_mesh(&self, object: &str) -> Option<EvaluatedMesh> {
        self.meshes.get(object).cloned()
    }

    fn select_bone(&mut self, name: &str, extend: bool) -> WidgetResult<()> {
        if !self.bones.iter().any(|b| b.name == name) {
            return Err(WidgetError::MissingBone(name.to_string()));
        }
        for bone in &mut self.bones {
            if bone.name == name {
                bone.selected = true;
            } else if !extend {
                bone.selected = false;
            }
        }
        Ok(())
    }

    fn set_pose(&mut self, name: &str, pose: BonePose) -> WidgetResult<()> {
        let bone = self
            .bone_mut(name)
            .ok_or_else(|| WidgetError::MissingBone(name.to_string()))?;
        bone.pose = pose;
        Ok(())
    }
}
