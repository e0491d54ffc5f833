//! Widget configuration store.
//!
//! The settings UI writes here and widget groups read from here. Every edit
//! raises the registered [`DirtyFlag`]s so the next refresh rebuilds.

use crate::error::WidgetResult;
use crate::shapes::ShapeKind;
use crate::widget::DragAction;
use kurbo::Vec2;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Shared "configuration changed" signal.
///
/// Everything runs on the host's main thread, so a plain `Rc<Cell>` is enough.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Rc<Cell<bool>>);

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) {
        self.0.set(true);
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Read and clear the flag.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// How a bone is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    None,
    Shape,
    Mesh,
}

/// Procedural shape selectable from the settings UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayShape {
    #[default]
    None,
    Circle,
    Quad,
    Sphere,
}

impl DisplayShape {
    pub fn kind(self) -> Option<ShapeKind> {
        match self {
            DisplayShape::None => None,
            DisplayShape::Circle => Some(ShapeKind::Circle),
            DisplayShape::Quad => Some(ShapeKind::Quad),
            DisplayShape::Sphere => Some(ShapeKind::Sphere),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

/// Per-bone widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub display: DisplayType,
    #[serde(default)]
    pub shape: DisplayShape,
    /// Draw the shape as a ring instead of a filled area.
    #[serde(default)]
    pub frame: bool,
    #[serde(default = "default_frame_thickness")]
    pub frame_thickness: f64,
    /// Anchor the widget at the bone head.
    #[serde(default = "default_true")]
    pub follow_bone: bool,
    #[serde(default = "default_primary_action")]
    pub primary_action: DragAction,
    #[serde(default = "default_secondary_action")]
    pub secondary_action: DragAction,
    #[serde(default = "default_one")]
    pub scale: f64,
    #[serde(default)]
    pub offset: Vec2,
    /// Mesh object used when `display` is `mesh`.
    #[serde(default)]
    pub mesh: Option<String>,
    #[serde(default)]
    pub vertex_groups: Vec<String>,
    #[serde(default = "default_weight_threshold")]
    pub weight_threshold: f64,
}

fn default_frame_thickness() -> f64 {
    0.2
}

fn default_primary_action() -> DragAction {
    DragAction::Rotate
}

fn default_secondary_action() -> DragAction {
    DragAction::Translate
}

fn default_weight_threshold() -> f64 {
    0.5
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            display: DisplayType::None,
            shape: DisplayShape::None,
            frame: false,
            frame_thickness: default_frame_thickness(),
            follow_bone: true,
            primary_action: default_primary_action(),
            secondary_action: default_secondary_action(),
            scale: 1.0,
            offset: Vec2::ZERO,
            mesh: None,
            vertex_groups: Vec::new(),
            weight_threshold: default_weight_threshold(),
        }
    }
}

impl WidgetConfig {
    /// A procedural shape widget.
    pub fn shape(shape: DisplayShape) -> Self {
        Self {
            display: DisplayType::Shape,
            shape,
            ..Self::default()
        }
    }

    /// A mesh pick-proxy widget.
    pub fn mesh(object: impl Into<String>, vertex_groups: Vec<String>) -> Self {
        Self {
            display: DisplayType::Mesh,
            mesh: Some(object.into()),
            vertex_groups,
            ..Self::default()
        }
    }
}

/// Per-armature display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmatureConfig {
    /// Show the root selector widget.
    pub root_widget: bool,
    /// Bone selected when the root selector is pressed.
    pub root_bone: Option<String>,
    pub base_color: [f32; 3],
    pub selected_color: [f32; 3],
    pub highlight_color: [f32; 3],
    pub alpha: f32,
    pub selected_alpha: f32,
    pub highlight_alpha: f32,
    /// Size of procedural widgets, multiplied with each bone's own scale.
    pub widget_scale: f64,
}

impl Default for ArmatureConfig {
    fn default() -> Self {
        Self {
            root_widget: false,
            root_bone: None,
            base_color: [0.3, 0.6, 0.7],
            selected_color: [0.25, 0.25, 0.5],
            highlight_color: [0.75, 0.75, 1.0],
            alpha: 0.25,
            selected_alpha: 0.5,
            highlight_alpha: 0.4,
            widget_scale: 0.25,
        }
    }
}

impl ArmatureConfig {
    pub fn base(&self) -> Color {
        rgba(self.base_color, self.alpha)
    }

    pub fn selected(&self) -> Color {
        rgba(self.selected_color, self.selected_alpha)
    }

    pub fn highlight(&self) -> Color {
        rgba(self.highlight_color, self.highlight_alpha)
    }
}

fn rgba(rgb: [f32; 3], alpha: f32) -> Color {
    Color::new([rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0)])
}

/// All widget settings of one armature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Global toggle: when off, no widget is drawn or picked.
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    armature: ArmatureConfig,
    #[serde(default)]
    bones: BTreeMap<String, WidgetConfig>,
    #[serde(skip)]
    watchers: Vec<DirtyFlag>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            armature: ArmatureConfig::default(),
            bones: BTreeMap::new(),
            watchers: Vec::new(),
        }
    }
}

impl WidgetSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from JSON.
    pub fn from_json(json: &str) -> WidgetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register a flag raised on every edit.
    pub fn watch(&mut self, flag: DirtyFlag) {
        self.watchers.push(flag);
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.notify();
    }

    pub fn armature(&self) -> &ArmatureConfig {
        &self.armature
    }

    pub fn set_armature(&mut self, config: ArmatureConfig) {
        self.armature = config;
        self.notify();
    }

    pub fn bone(&self, name: &str) -> Option<&WidgetConfig> {
        self.bones.get(name)
    }

    /// Configured bones, ordered by name.
    pub fn bones(&self) -> impl Iterator<Item = (&str, &WidgetConfig)> {
        self.bones.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn set_bone(&mut self, name: impl Into<String>, config: WidgetConfig) {
        self.bones.insert(name.into(), config);
        self.notify();
    }

    /// Edit a bone's configuration in place, creating a default one first.
    pub fn edit_bone(&mut self, name: &str, edit: impl FnOnce(&mut WidgetConfig)) {
        edit(self.bones.entry(name.to_string()).or_default());
        self.notify();
    }

    pub fn remove_bone(&mut self, name: &str) -> Option<WidgetConfig> {
        let removed = self.bones.remove(name);
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    fn notify(&self) {
        for flag in &self.watchers {
            flag.mark();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_raise_watchers() {
        let flag = DirtyFlag::new();
        let mut settings = WidgetSettings::new();
        settings.watch(flag.clone());
        assert!(!flag.is_set());

        settings.edit_bone("hand.L", |c| c.shape = DisplayShape::Circle);
        assert!(flag.take());
        assert!(!flag.is_set());

        settings.remove_bone("missing");
        assert!(!flag.is_set());
        settings.remove_bone("hand.L");
        assert!(flag.is_set());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "bones": {
                "torso": { "display": "shape", "shape": "quad" },
                "hand.L": { "display": "mesh", "mesh": "body", "vertex_groups": ["DEF-hand.L"] }
            }
        }"#;
        let settings = WidgetSettings::from_json(json).unwrap();
        assert!(settings.enabled());
        assert_eq!(settings.armature().widget_scale, 0.25);

        let torso = settings.bone("torso").unwrap();
        assert_eq!(torso.shape, DisplayShape::Quad);
        assert!(torso.follow_bone);
        assert_eq!(torso.primary_action, DragAction::Rotate);
        assert_eq!(torso.scale, 1.0);

        let hand = settings.bone("hand.L").unwrap();
        assert_eq!(hand.display, DisplayType::Mesh);
        assert_eq!(hand.weight_threshold, 0.5);
    }

    #[test]
    fn test_json_roundtrip_keeps_bones() {
        let mut settings = WidgetSettings::new();
        settings.set_bone("root", WidgetConfig::shape(DisplayShape::Circle));
        let restored = WidgetSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(restored.bone("root"), settings.bone("root"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(WidgetSettings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_display_shape_kinds() {
        assert_eq!(DisplayShape::None.kind(), None);
        assert_eq!(DisplayShape::Quad.kind(), Some(ShapeKind::Quad));
    }

    #[test]
    fn test_colors_carry_alpha() {
        let config = ArmatureConfig::default();
        assert!((config.base().components[3] - 0.25).abs() < 1e-6);
        assert!(config.selected().components[3] > config.base().components[3]);
    }
}
