//! Widget group keeping a viewport's widgets in sync with the rig.

use super::drag::DragTuning;
use super::entity::{WidgetEntity, WidgetId};
use crate::error::{WidgetError, WidgetResult};
use crate::input::{MouseButton, PointerEvent};
use crate::queue::{ImportQueue, Stock, StockPayload, WidgetKind};
use crate::scene::Scene;
use crate::settings::{ArmatureConfig, DirtyFlag, DisplayType, WidgetConfig, WidgetSettings};
use crate::shapes::{generate, generate_frame, MeshFilter, Shape, ShapeKind};
use crate::view::ViewContext;
use glam::DVec3;
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Horizontal distance between a bone head and a widget adopted for it.
const ADOPT_OFFSET: f64 = 2.0;

/// The drag in progress, if any.
#[derive(Debug, Clone)]
struct ActiveDrag {
    id: WidgetId,
    /// Offsets at press time, when the root selector moves the layout.
    layout_origin: Vec<(WidgetId, Vec2)>,
}

/// All widgets of one viewport.
///
/// Entities are owned here and rebuilt from the settings whenever the bound
/// armature changes or the dirty flag is raised. Only one entity can be
/// dragged at a time.
#[derive(Debug, Default)]
pub struct WidgetGroup {
    entities: Vec<WidgetEntity>,
    dirty: DirtyFlag,
    /// Armature the entities were built for.
    bound: Option<String>,
    hovered: Option<WidgetId>,
    active: Option<ActiveDrag>,
    tuning: DragTuning,
    /// Last error logged per widget label, so persistent failures log once.
    reported: HashMap<String, String>,
}

impl WidgetGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(mut self, tuning: DragTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn tuning(&self) -> &DragTuning {
        &self.tuning
    }

    /// Flag to register with [`WidgetSettings::watch`].
    pub fn dirty_flag(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    /// Request a full rebuild on the next refresh.
    pub fn mark_dirty(&self) {
        self.dirty.mark();
    }

    pub fn entities(&self) -> &[WidgetEntity] {
        &self.entities
    }

    pub fn entity(&self, id: WidgetId) -> Option<&WidgetEntity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    fn entity_mut(&mut self, id: WidgetId) -> Option<&mut WidgetEntity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn entity_for_bone(&self, bone: &str) -> Option<&WidgetEntity> {
        self.entities.iter().find(|e| e.bone_name() == Some(bone))
    }

    /// The root selector, if present.
    pub fn root(&self) -> Option<&WidgetEntity> {
        self.entities.iter().find(|e| e.is_root())
    }

    /// Names of the bones that have a widget.
    pub fn bone_names(&self) -> Vec<&str> {
        self.entities.iter().filter_map(|e| e.bone_name()).collect()
    }

    pub fn has_bone(&self, bone: &str) -> bool {
        self.entity_for_bone(bone).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Widget currently pressed or dragged.
    pub fn active(&self) -> Option<WidgetId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// Drop every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.hovered = None;
        self.active = None;
    }

    /// Bring the widgets up to date. Call once per redraw.
    ///
    /// Rebuilds from `settings` (and drains `queue`) when the armature changed,
    /// the dirty flag was raised, or no entity exists; then refreshes placement,
    /// color and geometry of every entity. Failures are logged per entity and
    /// never stop the refresh.
    pub fn refresh(
        &mut self,
        scene: &dyn Scene,
        settings: &WidgetSettings,
        queue: &mut ImportQueue,
        view: &ViewContext,
    ) {
        let dirty = self.dirty.take();
        let rebound = self.bound.as_deref() != Some(scene.armature());
        if dirty || rebound {
            if !self.entities.is_empty() {
                log::debug!(
                    "Clearing {} widgets (dirty: {}, rebound: {})",
                    self.entities.len(),
                    dirty,
                    rebound
                );
            }
            self.clear();
            self.reported.clear();
            self.bound = Some(scene.armature().to_string());
        }

        if self.entities.is_empty() {
            self.rebuild(scene, settings);
            self.import(scene, settings, queue);
        }

        let reported = &mut self.reported;
        for entity in &mut self.entities {
            let label = entity.label();
            match entity.sync(scene, settings, view) {
                Ok(()) => {
                    reported.remove(&label);
                }
                Err(e) => {
                    report_once(reported, &label, &e);
                }
            }
        }
        self.remove_marked();
    }

    /// Route a pointer event. Returns `true` if a widget consumed it.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        scene: &mut dyn Scene,
        settings: &WidgetSettings,
        view: &ViewContext,
    ) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                modifiers,
            } => {
                if self.active.is_some() {
                    return true;
                }
                let Some(index) = self.pick(view, position) else {
                    return false;
                };

                let tuning = self.tuning;
                // Pressing the root selector may change the selection.
                let selected = if self.entities[index].is_root() {
                    scene.selected_bones()
                } else {
                    Vec::new()
                };
                let entity = &mut self.entities[index];
                if let Err(e) = entity.press(scene, position, modifiers, &tuning) {
                    report(&entity.label(), &e);
                    return true;
                }
                let id = entity.id();

                let layout_origin = if entity.is_root() {
                    self.adopt(&*scene, settings.armature(), selected);
                    self.entities
                        .iter()
                        .map(|e| (e.id(), e.transform.offset))
                        .collect()
                } else {
                    Vec::new()
                };
                self.active = Some(ActiveDrag { id, layout_origin });
                true
            }
            PointerEvent::Down { .. } => false,
            PointerEvent::Move {
                position,
                modifiers,
            } => match self.active.clone() {
                None => {
                    self.update_hover(view, position);
                    false
                }
                Some(active) => {
                    let tuning = self.tuning;
                    let Some(entity) = self.entity_mut(active.id) else {
                        self.active = None;
                        return false;
                    };
                    if let Err(e) = entity.drag(scene, position, modifiers, view, &tuning) {
                        report(&entity.label(), &e);
                        entity.release();
                        self.active = None;
                        return true;
                    }
                    if active.layout_origin.is_empty() {
                        return true;
                    }
                    if let Some(start) = entity.drag_state().session().map(|s| s.start) {
                        let world = tuning.scaled_offset(view.screen_delta_to_world(position - start), modifiers);
                        let local = view.widget_space().inverse().transform_vector3(world);
                        self.move_layout(&active.layout_origin, Vec2::new(local.x, local.y));
                    }
                    true
                }
            },
            PointerEvent::Up { .. } | PointerEvent::Cancel => match self.active.take() {
                Some(active) => {
                    if let Some(entity) = self.entity_mut(active.id) {
                        entity.release();
                    }
                    true
                }
                None => false,
            },
        }
    }

    /// Topmost visible entity under `position`.
    fn pick(&self, view: &ViewContext, position: Point) -> Option<usize> {
        self.entities
            .iter()
            .rposition(|e| e.hit_test(view, position))
    }

    fn update_hover(&mut self, view: &ViewContext, position: Point) {
        let hovered = self.pick(view, position).map(|i| self.entities[i].id());
        if hovered == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.and_then(|id| self.entity_mut(id)) {
            old.set_hovered(false);
        }
        if let Some(new) = hovered.and_then(|id| self.entity_mut(id)) {
            new.set_hovered(true);
        }
        self.hovered = hovered;
    }

    fn move_layout(&mut self, origin: &[(WidgetId, Vec2)], delta: Vec2) {
        for (id, offset) in origin {
            if let Some(entity) = self.entity_mut(*id) {
                entity.transform.offset = *offset + delta;
            }
        }
    }

    /// Give every bone in `bones` without a widget a quad beside its head.
    /// The root selector's own bone is never adopted.
    fn adopt(&mut self, scene: &dyn Scene, armature: &ArmatureConfig, bones: Vec<String>) {
        for name in bones {
            if self.has_bone(&name) || armature.root_bone.as_deref() == Some(name.as_str()) {
                continue;
            }
            let Some(bone) = scene.bone(&name) else {
                continue;
            };
            match procedural_shape(ShapeKind::Quad, armature.widget_scale) {
                Ok(shape) => {
                    log::info!("Adding widget for selected bone '{}'", name);
                    let offset = Vec2::new(bone.head.x + ADOPT_OFFSET, bone.head.z);
                    self.entities
                        .push(WidgetEntity::procedural(name, shape).with_offset(offset));
                }
                Err(e) => report(&name, &e),
            }
        }
    }

    fn rebuild(&mut self, scene: &dyn Scene, settings: &WidgetSettings) {
        let armature = settings.armature();
        if armature.root_widget {
            match procedural_shape(ShapeKind::Cross, armature.widget_scale) {
                Ok(shape) => self
                    .entities
                    .push(WidgetEntity::root(armature.root_bone.clone(), shape)),
                Err(e) => report("<root>", &e),
            }
        }

        for (name, config) in settings.bones() {
            if self.has_bone(name) {
                continue;
            }
            match build_configured(name, config, scene, armature) {
                Ok(Some(entity)) => self.entities.push(entity),
                Ok(None) => {}
                Err(e) => {
                    report_once(&mut self.reported, name, &e);
                }
            }
        }
        log::debug!("Built {} widgets for '{}'", self.entities.len(), scene.armature());
    }

    fn import(&mut self, scene: &dyn Scene, settings: &WidgetSettings, queue: &mut ImportQueue) {
        let requests = queue.drain();
        if requests.is_empty() {
            return;
        }
        log::info!("Importing {} queued widgets", requests.len());

        for stock in requests {
            match stock.kind {
                WidgetKind::Operator => {
                    if self.root().is_some() {
                        log::debug!("Root widget already present, skipping queued operator");
                        continue;
                    }
                    let kind = if stock.shape.is_procedural() {
                        stock.shape
                    } else {
                        ShapeKind::Cross
                    };
                    let bone = (!stock.bone_name.is_empty()).then(|| stock.bone_name.clone());
                    match procedural_shape(kind, settings.armature().widget_scale) {
                        Ok(shape) => self.entities.push(
                            WidgetEntity::root(bone, shape).with_offset(stock.position.to_vec2()),
                        ),
                        Err(e) => report("<root>", &e),
                    }
                }
                WidgetKind::Bone => {
                    if self.has_bone(&stock.bone_name) {
                        log::debug!("Bone '{}' already has a widget", stock.bone_name);
                        continue;
                    }
                    if scene.bone(&stock.bone_name).is_none() {
                        log::debug!("Dropping queued widget for absent bone '{}'", stock.bone_name);
                        continue;
                    }
                    match build_from_stock(&stock, scene, settings.armature()) {
                        Ok(entity) => self.entities.push(entity),
                        Err(e) => report(&stock.bone_name, &e),
                    }
                }
            }
        }
    }

    fn remove_marked(&mut self) {
        let before = self.entities.len();
        self.entities.retain(|e| !e.is_marked_for_removal());
        if self.entities.len() == before {
            return;
        }
        if let Some(id) = self.hovered {
            if self.entity(id).is_none() {
                self.hovered = None;
            }
        }
        if let Some(id) = self.active() {
            if self.entity(id).is_none() {
                self.active = None;
            }
        }
    }
}

/// Centered procedural shape at the armature's widget size.
fn procedural_shape(kind: ShapeKind, size: f64) -> WidgetResult<Shape> {
    Ok(generate(kind, DVec3::splat(size), DVec3::ZERO)?.centered())
}

/// Mesh entity with its first geometry; empty geometry is allowed.
fn mesh_entity(bone: &str, object: &str, filter: MeshFilter, scene: &dyn Scene) -> WidgetResult<WidgetEntity> {
    let mut entity = WidgetEntity::mesh(bone, object, filter);
    match entity.regenerate(scene) {
        Ok(()) | Err(WidgetError::EmptyProxyGeometry(_)) => Ok(entity),
        Err(e) => Err(e),
    }
}

fn build_configured(
    name: &str,
    config: &WidgetConfig,
    scene: &dyn Scene,
    armature: &ArmatureConfig,
) -> WidgetResult<Option<WidgetEntity>> {
    let entity = match config.display {
        DisplayType::None => return Ok(None),
        DisplayType::Mesh => {
            let object = config.mesh.as_deref().ok_or_else(|| {
                WidgetError::Configuration(format!("bone '{}' displays a mesh but none is set", name))
            })?;
            scene.require_bone(name)?;
            let filter = MeshFilter::new(config.vertex_groups.clone(), config.weight_threshold, config.scale);
            mesh_entity(name, object, filter, scene)?
        }
        DisplayType::Shape => {
            let Some(kind) = config.shape.kind() else {
                return Ok(None);
            };
            scene.require_bone(name)?;
            let size = DVec3::splat(armature.widget_scale * config.scale);
            let shape = if config.frame && kind != ShapeKind::Sphere {
                generate_frame(kind, config.frame_thickness, size, DVec3::ZERO)?
            } else {
                if config.frame {
                    log::warn!("Bone '{}': spheres have no frame variant, drawing filled", name);
                }
                generate(kind, size, DVec3::ZERO)?
            };
            WidgetEntity::procedural(name, shape.centered()).with_follow_bone(config.follow_bone)
        }
    };
    Ok(Some(
        entity
            .with_offset(config.offset)
            .with_actions(config.primary_action, config.secondary_action),
    ))
}

fn build_from_stock(stock: &Stock, scene: &dyn Scene, armature: &ArmatureConfig) -> WidgetResult<WidgetEntity> {
    let entity = match (stock.shape, &stock.payload) {
        (
            ShapeKind::Mesh,
            StockPayload::Mesh {
                object,
                vertex_groups,
                threshold,
            },
        ) => {
            let filter = MeshFilter::new(vertex_groups.clone(), *threshold, 1.0);
            mesh_entity(&stock.bone_name, object, filter, scene)?
        }
        (ShapeKind::Custom, StockPayload::Vertices(vertices)) => {
            WidgetEntity::procedural(stock.bone_name.clone(), Shape::from_flat(vertices)?)
        }
        (kind, _) if kind.is_procedural() => {
            WidgetEntity::procedural(stock.bone_name.clone(), procedural_shape(kind, armature.widget_scale)?)
        }
        (kind, _) => {
            return Err(WidgetError::Configuration(format!(
                "{:?} request for '{}' has no matching payload",
                kind, stock.bone_name
            )));
        }
    };
    Ok(entity
        .with_offset(stock.position.to_vec2())
        .with_follow_bone(stock.bone_follow || stock.shape == ShapeKind::Mesh))
}

/// Log `error` unless it is the last one logged for `label`.
fn report_once(reported: &mut HashMap<String, String>, label: &str, error: &WidgetError) -> bool {
    let message = error.to_string();
    if reported.get(label) == Some(&message) {
        return false;
    }
    report(label, error);
    reported.insert(label.to_string(), message);
    true
}

fn report(label: &str, error: &WidgetError) {
    match error {
        WidgetError::EmptyProxyGeometry(_) => log::debug!("Widget '{}' hidden: {}", label, error),
        WidgetError::MissingBone(_) => log::warn!("Removing widget '{}': {}", label, error),
        _ => log::warn!("Skipping widget '{}': {}", label, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::scene::{Bone, MemoryScene};
    use crate::settings::DisplayShape;

    fn scene() -> MemoryScene {
        MemoryScene::new("rig")
            .with_bone(Bone::new("root", DVec3::ZERO))
            .with_bone(Bone::new("hand", DVec3::new(0.5, 0.0, 0.0)))
    }

    fn down(position: Point) -> PointerEvent {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    fn moved(position: Point) -> PointerEvent {
        PointerEvent::Move {
            position,
            modifiers: Modifiers::NONE,
        }
    }

    fn up(position: Point) -> PointerEvent {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_press_drag_release() {
        let mut scene = scene();
        let view = ViewContext::default();
        let mut settings = WidgetSettings::new();
        settings.set_bone(
            "hand",
            WidgetConfig {
                follow_bone: false,
                primary_action: crate::widget::DragAction::Translate,
                ..WidgetConfig::shape(DisplayShape::Quad)
            },
        );
        let mut group = WidgetGroup::new();
        group.refresh(&scene, &settings, &mut ImportQueue::new(), &view);
        assert_eq!(group.len(), 1);

        let center = Point::new(500.0, 500.0);
        assert!(group.handle_pointer(down(center), &mut scene, &settings, &view));
        assert_eq!(scene.selected_bones(), vec!["hand".to_string()]);
        assert!(group.active().is_some());

        assert!(group.handle_pointer(moved(Point::new(550.0, 500.0)), &mut scene, &settings, &view));
        let location = scene.bone("hand").unwrap().pose.location;
        assert!((location.x - 0.1).abs() < 1e-9);

        assert!(group.handle_pointer(up(Point::new(550.0, 500.0)), &mut scene, &settings, &view));
        assert!(group.active().is_none());
        assert!(group.entities()[0].drag_state().is_idle());
    }

    #[test]
    fn test_press_outside_is_not_consumed() {
        let mut scene = scene();
        let view = ViewContext::default();
        let mut settings = WidgetSettings::new();
        settings.set_bone("hand", WidgetConfig::shape(DisplayShape::Quad));
        let mut group = WidgetGroup::new();
        group.refresh(&scene, &settings, &mut ImportQueue::new(), &view);

        assert!(!group.handle_pointer(down(Point::new(10.0, 10.0)), &mut scene, &settings, &view));
        assert!(group.active().is_none());
    }

    #[test]
    fn test_hover_highlights() {
        let mut scene = scene();
        let view = ViewContext::default();
        let mut settings = WidgetSettings::new();
        settings.set_bone(
            "root",
            WidgetConfig {
                follow_bone: false,
                ..WidgetConfig::shape(DisplayShape::Circle)
            },
        );
        let mut group = WidgetGroup::new();
        group.refresh(&scene, &settings, &mut ImportQueue::new(), &view);

        group.handle_pointer(moved(Point::new(500.0, 500.0)), &mut scene, &settings, &view);
        let id = group.hovered().unwrap();
        assert_eq!(
            group.entity(id).unwrap().color_state(),
            crate::widget::ColorState::Highlighted
        );

        group.handle_pointer(moved(Point::new(5.0, 5.0)), &mut scene, &settings, &view);
        assert!(group.hovered().is_none());
        assert_eq!(
            group.entity(id).unwrap().color_state(),
            crate::widget::ColorState::Normal
        );
    }

    #[test]
    fn test_root_selector_adopts_selected_bones_and_moves_layout() {
        let mut scene = scene();
        scene.select_bone("hand", false).unwrap();
        let view = ViewContext::default();
        let mut settings = WidgetSettings::new();
        settings.set_armature(ArmatureConfig {
            root_widget: true,
            ..ArmatureConfig::default()
        });
        let mut group = WidgetGroup::new();
        group.refresh(&scene, &settings, &mut ImportQueue::new(), &view);
        assert!(group.root().is_some());
        assert_eq!(group.len(), 1);

        let center = Point::new(500.0, 500.0);
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        let press = PointerEvent::Down {
            position: center,
            button: MouseButton::Left,
            modifiers: shift,
        };
        assert!(group.handle_pointer(press, &mut scene, &settings, &view));
        assert!(group.has_bone("hand"));
        let adopted = group.entity_for_bone("hand").unwrap().transform.offset;
        assert!((adopted.x - 2.5).abs() < 1e-12);

        // 100 pixels are 0.2 units in the default view.
        group.handle_pointer(moved(Point::new(600.0, 450.0)), &mut scene, &settings, &view);
        let moved_offset = group.entity_for_bone("hand").unwrap().transform.offset;
        assert!((moved_offset.x - 2.7).abs() < 1e-9);
        assert!((moved_offset.y - 0.1).abs() < 1e-9);
        let root_offset = group.root().unwrap().transform.offset;
        assert!((root_offset.x - 0.2).abs() < 1e-9);

        group.handle_pointer(PointerEvent::Cancel, &mut scene, &settings, &view);
        assert!(group.active().is_none());
    }

    #[test]
    fn test_root_press_adopts_selection_before_selecting_root_bone() {
        let mut scene = scene().with_bone(Bone::new("foot", DVec3::new(0.2, 0.0, -1.0)));
        scene.select_bone("hand", false).unwrap();
        scene.select_bone("foot", true).unwrap();
        let view = ViewContext::default();
        let mut settings = WidgetSettings::new();
        settings.set_armature(ArmatureConfig {
            root_widget: true,
            root_bone: Some("root".to_string()),
            ..ArmatureConfig::default()
        });
        let mut group = WidgetGroup::new();
        group.refresh(&scene, &settings, &mut ImportQueue::new(), &view);

        assert!(group.handle_pointer(down(Point::new(500.0, 500.0)), &mut scene, &settings, &view));

        let mut names = group.bone_names();
        names.sort_unstable();
        assert_eq!(names, vec!["foot", "hand"]);
        assert!(!group.has_bone("root"));
        assert_eq!(scene.selected_bones(), vec!["root".to_string()]);
        let foot = group.entity_for_bone("foot").unwrap().transform.offset;
        assert!((foot.x - 2.2).abs() < 1e-12);
        assert!((foot.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_once_suppresses_repeats() {
        let mut reported = HashMap::new();
        let missing = WidgetError::MissingBone("hand".to_string());
        assert!(report_once(&mut reported, "hand", &missing));
        assert!(!report_once(&mut reported, "hand", &missing));
        assert!(report_once(&mut reported, "foot", &missing));

        let other = WidgetError::Configuration("mesh 'body' has no vertex group 'x'".to_string());
        assert!(report_once(&mut reported, "hand", &other));
    }

    #[test]
    fn test_persistent_errors_are_remembered_until_fixed() {
        let body = crate::shapes::EvaluatedMesh {
            name: "body".to_string(),
            positions: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            triangles: vec![[0, 1, 2]],
            vertex_groups: vec![crate::shapes::VertexGroup::new("DEF-hand").with_weight([0, 1, 2], 1.0)],
        };
        let mut scene = scene().with_mesh(body);
        let view = ViewContext::default();
        let mut settings = WidgetSettings::new();
        settings.set_bone("hand", WidgetConfig::mesh("body", vec!["DEF-hand".to_string()]));
        settings.set_bone("ghost", WidgetConfig::shape(DisplayShape::Quad));
        let mut group = WidgetGroup::new();
        let mut queue = ImportQueue::new();

        group.refresh(&scene, &settings, &mut queue, &view);
        assert!(group.has_bone("hand"));
        assert_eq!(group.reported.len(), 1);
        assert!(group.reported.contains_key("ghost"));

        // Rebuilding with the same configuration does not log "ghost" again.
        let ghost = WidgetError::MissingBone("ghost".to_string());
        assert!(!report_once(&mut group.reported, "ghost", &ghost));

        let groups = std::mem::take(&mut scene.mesh_mut("body").unwrap().vertex_groups);
        group.refresh(&scene, &settings, &mut queue, &view);
        group.refresh(&scene, &settings, &mut queue, &view);
        assert!(group.reported.contains_key("hand"));
        assert!(!group.entity_for_bone("hand").unwrap().is_visible());

        scene.mesh_mut("body").unwrap().vertex_groups = groups;
        group.refresh(&scene, &settings, &mut queue, &view);
        assert!(!group.reported.contains_key("hand"));
        assert!(group.entity_for_bone("hand").unwrap().is_visible());
    }

    #[test]
    fn test_missing_mesh_is_skipped_not_fatal() {
        let scene = scene();
        let mut settings = WidgetSettings::new();
        settings.set_bone("hand", WidgetConfig::mesh("body", Vec::new()));
        settings.set_bone("root", WidgetConfig::shape(DisplayShape::Quad));
        let mut group = WidgetGroup::new();
        group.refresh(&scene, &settings, &mut ImportQueue::new(), &ViewContext::default());
        assert_eq!(group.bone_names(), vec!["root"]);
    }

    #[test]
    fn test_rebind_clears_entities() {
        let mut scene = scene();
        let view = ViewContext::default();
        let mut queue = ImportQueue::new();
        queue.enqueue(Stock::bone(ShapeKind::Quad, "hand", Point::ZERO));
        let settings = WidgetSettings::new();
        let mut group = WidgetGroup::new();

        group.refresh(&scene, &settings, &mut queue, &view);
        assert!(group.has_bone("hand"));

        scene.set_armature("other_rig");
        group.refresh(&scene, &settings, &mut queue, &view);
        assert!(group.is_empty());
    }
}
