//! A single interactive handle bound to one bone.

use super::drag::{DragAction, DragSession, DragTuning};
use super::state::{ColorState, DragState};
use crate::error::{WidgetError, WidgetResult};
use crate::input::Modifiers;
use crate::scene::Scene;
use crate::settings::{ArmatureConfig, WidgetSettings};
use crate::shapes::{Dimension, MeshFilter, Shape, ShapeKind};
use crate::view::ViewContext;
use glam::{DMat4, DVec3};
use kurbo::{Point, Vec2};
use peniko::Color;
use uuid::Uuid;

/// Unique identifier for widgets.
pub type WidgetId = Uuid;

/// What the widget acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Selects and poses this bone.
    Bone(String),
    /// Root selector; optionally selects a designated bone when pressed.
    Root { bone: Option<String> },
}

/// Where the widget geometry comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeSource {
    /// Fixed geometry built once.
    Procedural(Shape),
    /// Rebuilt from the deformed mesh on every refresh and drag tick.
    MeshDerived { object: String, filter: MeshFilter },
    None,
}

/// Placement of view-aligned widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetTransform {
    /// Offset inside the widget space, in scene units.
    pub offset: Vec2,
    pub scale: f64,
    /// View-aligned space, refreshed every frame.
    pub space: DMat4,
    /// World position replacing the space origin when following a bone.
    pub anchor: Option<DVec3>,
}

impl Default for WidgetTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            space: DMat4::IDENTITY,
            anchor: None,
        }
    }
}

impl WidgetTransform {
    /// Shape to world transform.
    pub fn matrix(&self) -> DMat4 {
        let mut space = self.space;
        if let Some(anchor) = self.anchor {
            space.w_axis = anchor.extend(1.0);
        }
        space
            * DMat4::from_translation(DVec3::new(self.offset.x, self.offset.y, 0.0))
            * DMat4::from_scale(DVec3::splat(self.scale))
    }
}

/// An on-screen proxy for a bone.
#[derive(Debug, Clone)]
pub struct WidgetEntity {
    id: WidgetId,
    binding: Binding,
    source: ShapeSource,
    /// Latest mesh-derived geometry; empty for other sources.
    derived: Shape,
    pub transform: WidgetTransform,
    follow_bone: bool,
    primary_action: DragAction,
    secondary_action: DragAction,
    color: ColorState,
    hovered: bool,
    drag: DragState,
    visible: bool,
    marked_for_removal: bool,
}

impl WidgetEntity {
    fn new(binding: Binding, source: ShapeSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            binding,
            source,
            derived: Shape::empty(ShapeKind::Mesh, Dimension::Solid),
            transform: WidgetTransform::default(),
            follow_bone: false,
            primary_action: DragAction::Rotate,
            secondary_action: DragAction::Translate,
            color: ColorState::Normal,
            hovered: false,
            drag: DragState::Idle,
            visible: true,
            marked_for_removal: false,
        }
    }

    /// A widget drawing a fixed shape for `bone`.
    pub fn procedural(bone: impl Into<String>, shape: Shape) -> Self {
        Self::new(Binding::Bone(bone.into()), ShapeSource::Procedural(shape))
    }

    /// A widget picking on the part of `object` selected by `filter`.
    ///
    /// The geometry is empty until the first refresh.
    pub fn mesh(bone: impl Into<String>, object: impl Into<String>, filter: MeshFilter) -> Self {
        let mut entity = Self::new(
            Binding::Bone(bone.into()),
            ShapeSource::MeshDerived {
                object: object.into(),
                filter,
            },
        );
        entity.follow_bone = true;
        entity
    }

    /// The root selector widget.
    pub fn root(bone: Option<String>, shape: Shape) -> Self {
        let mut entity = Self::new(Binding::Root { bone }, ShapeSource::Procedural(shape));
        entity.primary_action = DragAction::None;
        entity.secondary_action = DragAction::None;
        entity
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.transform.offset = offset;
        self
    }

    pub fn with_follow_bone(mut self, follow: bool) -> Self {
        self.follow_bone = follow;
        self
    }

    pub fn with_actions(mut self, primary: DragAction, secondary: DragAction) -> Self {
        self.primary_action = primary;
        self.secondary_action = secondary;
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Bone posed by this widget. `None` for the root selector.
    pub fn bone_name(&self) -> Option<&str> {
        match &self.binding {
            Binding::Bone(name) => Some(name),
            Binding::Root { .. } => None,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.binding, Binding::Root { .. })
    }

    pub fn source(&self) -> &ShapeSource {
        &self.source
    }

    /// Current geometry in widget space (world space for mesh widgets).
    pub fn shape(&self) -> &Shape {
        match &self.source {
            ShapeSource::Procedural(shape) => shape,
            ShapeSource::MeshDerived { .. } | ShapeSource::None => &self.derived,
        }
    }

    pub fn follow_bone(&self) -> bool {
        self.follow_bone
    }

    pub fn primary_action(&self) -> DragAction {
        self.primary_action
    }

    pub fn secondary_action(&self) -> DragAction {
        self.secondary_action
    }

    pub fn color_state(&self) -> ColorState {
        self.color
    }

    /// Draw color for the current color state.
    pub fn color(&self, armature: &ArmatureConfig) -> Color {
        match self.color {
            ColorState::Normal => armature.base(),
            ColorState::Highlighted => armature.highlight(),
            ColorState::Selected => armature.selected(),
        }
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Check if the widget should be drawn and picked.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        if self.color != ColorState::Selected {
            self.color = ColorState::resolve(false, hovered);
        }
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }

    pub fn mark_for_removal(&mut self) {
        self.marked_for_removal = true;
        self.drag = DragState::Idle;
    }

    /// Shape to world transform.
    pub fn matrix_world(&self) -> DMat4 {
        match self.source {
            ShapeSource::MeshDerived { .. } => DMat4::IDENTITY,
            _ => self.transform.matrix(),
        }
    }

    /// Geometry in world space.
    pub fn world_shape(&self) -> Shape {
        self.shape().transformed(self.matrix_world())
    }

    /// Per-frame update: placement, color, visibility and mesh geometry.
    ///
    /// A missing bone marks the widget for removal.
    pub fn sync(&mut self, scene: &dyn Scene, settings: &WidgetSettings, view: &ViewContext) -> WidgetResult<()> {
        self.transform.space = view.widget_space();

        let bone = match self.binding.clone() {
            Binding::Bone(name) => match scene.bone(&name) {
                Some(bone) => Some(bone),
                None => {
                    self.mark_for_removal();
                    return Err(WidgetError::MissingBone(name));
                }
            },
            Binding::Root { bone } => bone.and_then(|name| scene.bone(&name)),
        };

        let selected = bone.as_ref().is_some_and(|b| b.selected);
        self.color = ColorState::resolve(selected, self.hovered);
        self.transform.anchor = if self.follow_bone {
            bone.as_ref().map(|b| b.head)
        } else {
            None
        };

        let regenerated = self.regenerate(scene);
        let bone_visible = bone
            .as_ref()
            .is_none_or(|b| b.is_visible(scene.visible_layers()));
        self.visible = settings.enabled() && bone_visible && !self.shape().is_empty();
        regenerated
    }

    /// Rebuild mesh-derived geometry from the current deformed mesh.
    pub fn regenerate(&mut self, scene: &dyn Scene) -> WidgetResult<()> {
        let ShapeSource::MeshDerived { object, filter } = &self.source else {
            return Ok(());
        };

        let shape = scene
            .evaluated_mesh(object)
            .ok_or_else(|| WidgetError::Configuration(format!("mesh object '{}' not found", object)))
            .and_then(|mesh| filter.apply(&mesh));

        match shape {
            Ok(shape) => {
                self.derived = shape;
                if self.derived.is_empty() {
                    self.visible = false;
                    return Err(WidgetError::EmptyProxyGeometry(self.label()));
                }
                Ok(())
            }
            Err(e) => {
                self.derived = Shape::empty(ShapeKind::Mesh, Dimension::Solid);
                self.visible = false;
                Err(e)
            }
        }
    }

    /// Check if a region-pixel position lies on the widget.
    pub fn hit_test(&self, view: &ViewContext, point: Point) -> bool {
        if !self.visible {
            return false;
        }
        let matrix = self.matrix_world();
        self.shape().triangles().any(|[a, b, c]| {
            let project = |v: DVec3| view.world_to_screen(matrix.transform_point3(v));
            match (project(a), project(b), project(c)) {
                (Some(a), Some(b), Some(c)) => point_in_triangle(point, a, b, c),
                _ => false,
            }
        })
    }

    /// Pointer pressed on the widget: select the bone and arm a drag.
    pub fn press(
        &mut self,
        scene: &mut dyn Scene,
        position: Point,
        modifiers: Modifiers,
        tuning: &DragTuning,
    ) -> WidgetResult<()> {
        match self.binding.clone() {
            Binding::Bone(name) => {
                if let Err(e) = scene.select_bone(&name, modifiers.additive()) {
                    self.mark_for_removal();
                    return Err(e);
                }
                let bone = scene.require_bone(&name)?;
                let action = if modifiers.secondary() {
                    self.secondary_action
                } else {
                    self.primary_action
                };
                self.drag = DragState::Armed(DragSession::new(position, action, bone.pose, tuning));
            }
            Binding::Root { bone } => {
                if let Some(name) = bone {
                    if let Err(e) = scene.select_bone(&name, modifiers.additive()) {
                        log::warn!("Root widget bone unavailable: {}", e);
                    }
                }
                let session = DragSession::new(position, DragAction::None, Default::default(), tuning);
                self.drag = DragState::Armed(session);
            }
        }
        Ok(())
    }

    /// Pointer moved while pressed: pose the bone from the drag so far.
    pub fn drag(
        &mut self,
        scene: &mut dyn Scene,
        position: Point,
        modifiers: Modifiers,
        view: &ViewContext,
        tuning: &DragTuning,
    ) -> WidgetResult<()> {
        let mut session = match std::mem::take(&mut self.drag) {
            DragState::Idle => return Ok(()),
            DragState::Armed(session) | DragState::Dragging(session) => session,
        };
        session.current = position;

        if let Binding::Bone(name) = self.binding.clone() {
            let bone = match scene.require_bone(&name) {
                Ok(bone) => bone,
                Err(e) => {
                    self.mark_for_removal();
                    return Err(e);
                }
            };
            let pose = session.pose(&bone, modifiers, view, tuning);
            if pose != bone.pose {
                scene.set_pose(&name, pose)?;
            }
        }
        self.drag = DragState::Dragging(session);

        match self.regenerate(&*scene) {
            Ok(()) | Err(WidgetError::EmptyProxyGeometry(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Pointer released or focus lost. The pose is kept as is.
    pub fn release(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => None,
            DragState::Armed(session) | DragState::Dragging(session) => Some(session),
        }
    }

    /// Name used in diagnostics.
    pub fn label(&self) -> String {
        match &self.binding {
            Binding::Bone(name) => name.clone(),
            Binding::Root { .. } => "<root>".to_string(),
        }
    }
}

fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = (b - a).cross(p - a);
    let d2 = (c - b).cross(p - b);
    let d3 = (a - c).cross(p - c);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
