//! Ready-made import requests for common rigs.

use crate::error::WidgetResult;
use crate::queue::{ImportQueue, Stock};
use crate::shapes::{generate, ShapeKind};
use glam::DVec3;
use kurbo::Point;

/// Weight a vertex needs to count as part of a rigify control.
pub const RIGIFY_WEIGHT_THRESHOLD: f64 = 0.5;

/// Sided rigify controls and the deform group they pick on. `{side}` is
/// replaced by `L` and `R`.
const RIGIFY_SIDE_CONTROLS: &[(&str, &str)] = &[
    ("toe.{side}", "DEF-toe.{side}"),
    ("foot_ik.{side}", "DEF-foot.{side}"),
    ("thigh_ik.{side}", "DEF-thigh.{side}.001"),
    ("shoulder.{side}", "DEF-shoulder.{side}"),
    ("upper_arm_fk.{side}", "DEF-upper_arm.{side}.001"),
    ("forearm_fk.{side}", "DEF-forearm.{side}.001"),
    ("hand_fk.{side}", "DEF-palm.02.{side}"),
    ("thumb.01_master.{side}", "DEF-thumb.02.{side}"),
    ("f_index.01_master.{side}", "DEF-f_index.02.{side}"),
    ("f_middle.01_master.{side}", "DEF-f_middle.02.{side}"),
    ("f_ring.01_master.{side}", "DEF-f_ring.02.{side}"),
    ("f_pinky.01_master.{side}", "DEF-f_pinky.02.{side}"),
];

/// Spine controls; each entry lists every group the control picks on.
const RIGIFY_SPINE_CONTROLS: &[(&str, &[&str])] = &[
    ("torso", &["DEF-pelvis.L", "DEF-pelvis.R"]),
    ("hips", &["DEF-spine.001"]),
    ("chest", &["DEF-spine.003"]),
    ("neck", &["DEF-spine.004"]),
    ("head", &["DEF-spine.006"]),
];

const SIDES: [&str; 2] = ["L", "R"];

/// Queue a unit quad picker for each `(bone, position)` pair.
pub fn queue_picker_controls(queue: &mut ImportQueue, controls: &[(&str, Point)]) -> WidgetResult<()> {
    let quad: Vec<[f64; 2]> = generate(ShapeKind::Quad, DVec3::ONE, DVec3::ZERO)?
        .vertices()
        .iter()
        .map(|v| [v.x, v.y])
        .collect();
    for (bone, position) in controls {
        queue.enqueue(Stock::vertices(*bone, quad.clone(), *position));
    }
    Ok(())
}

/// Queue mesh pickers for a rigify rig skinned to `object`, plus a quad
/// for its `root` bone.
pub fn queue_rigify_controls(queue: &mut ImportQueue, object: &str) {
    for side in SIDES {
        for (control, group) in RIGIFY_SIDE_CONTROLS {
            queue.enqueue(Stock::mesh(
                control.replace("{side}", side),
                object,
                vec![group.replace("{side}", side)],
                RIGIFY_WEIGHT_THRESHOLD,
            ));
        }
    }

    for (control, groups) in RIGIFY_SPINE_CONTROLS {
        queue.enqueue(Stock::mesh(
            *control,
            object,
            groups.iter().map(|g| g.to_string()).collect(),
            RIGIFY_WEIGHT_THRESHOLD,
        ));
    }

    queue.enqueue(Stock::bone(ShapeKind::Quad, "root", Point::new(-0.5, -0.5)).with_bone_follow(true));
    log::debug!("Queued rigify controls for '{}'", object);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::StockPayload;

    #[test]
    fn test_picker_controls_use_quad_vertices() {
        let mut queue = ImportQueue::new();
        queue_picker_controls(
            &mut queue,
            &[("ms-root", Point::new(2.0, 0.0)), ("fk-bone_9", Point::new(2.0, 2.0))],
        )
        .unwrap();

        let requests = queue.drain();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].bone_name, "fk-bone_9");
        assert_eq!(requests[1].position, Point::new(2.0, 2.0));
        match &requests[0].payload {
            StockPayload::Vertices(vertices) => assert_eq!(vertices.len(), 6),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_rigify_controls_cover_both_sides() {
        let mut queue = ImportQueue::new();
        queue_rigify_controls(&mut queue, "body");

        let requests = queue.drain();
        assert_eq!(requests.len(), 2 * RIGIFY_SIDE_CONTROLS.len() + RIGIFY_SPINE_CONTROLS.len() + 1);

        let hand = requests.iter().find(|s| s.bone_name == "hand_fk.R").unwrap();
        assert_eq!(
            hand.payload,
            StockPayload::Mesh {
                object: "body".to_string(),
                vertex_groups: vec!["DEF-palm.02.R".to_string()],
                threshold: RIGIFY_WEIGHT_THRESHOLD,
            }
        );

        let root = requests.last().unwrap();
        assert_eq!(root.bone_name, "root");
        assert_eq!(root.shape, ShapeKind::Quad);
        assert!(root.bone_follow);
    }
}
