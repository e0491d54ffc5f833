//! Import queue for widgets requested by rig-setup scripts.
//!
//! Scripts enqueue requests before a widget group exists; the group drains
//! the queue once on its next rebuild. The queue is an ordinary value passed
//! to the group, so each session decides who owns it.

use crate::shapes::ShapeKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What a requested widget does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Select and pose a bone.
    #[default]
    Bone,
    /// Root selector: adopt selected bones and move the whole layout.
    Operator,
}

/// Shape-specific data of a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum StockPayload {
    #[default]
    None,
    /// Flat triangle list for [`ShapeKind::Custom`].
    Vertices(Vec<[f64; 2]>),
    /// Mesh object and vertex groups for [`ShapeKind::Mesh`].
    Mesh {
        object: String,
        vertex_groups: Vec<String>,
        threshold: f64,
    },
}

/// A pending widget-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub kind: WidgetKind,
    pub shape: ShapeKind,
    pub bone_name: String,
    /// Screen-space offset of the widget.
    pub position: Point,
    #[serde(default)]
    pub bone_follow: bool,
    #[serde(default)]
    pub payload: StockPayload,
}

impl Stock {
    /// A bone widget with a procedural shape.
    pub fn bone(shape: ShapeKind, bone_name: impl Into<String>, position: Point) -> Self {
        Self {
            kind: WidgetKind::Bone,
            shape,
            bone_name: bone_name.into(),
            position,
            bone_follow: false,
            payload: StockPayload::None,
        }
    }

    /// A bone widget picking on part of a mesh.
    pub fn mesh(
        bone_name: impl Into<String>,
        object: impl Into<String>,
        vertex_groups: Vec<String>,
        threshold: f64,
    ) -> Self {
        Self {
            kind: WidgetKind::Bone,
            shape: ShapeKind::Mesh,
            bone_name: bone_name.into(),
            position: Point::ZERO,
            bone_follow: true,
            payload: StockPayload::Mesh {
                object: object.into(),
                vertex_groups,
                threshold,
            },
        }
    }

    /// A bone widget drawn from explicit vertices.
    pub fn vertices(bone_name: impl Into<String>, vertices: Vec<[f64; 2]>, position: Point) -> Self {
        Self {
            kind: WidgetKind::Bone,
            shape: ShapeKind::Custom,
            bone_name: bone_name.into(),
            position,
            bone_follow: false,
            payload: StockPayload::Vertices(vertices),
        }
    }

    pub fn with_bone_follow(mut self, follow: bool) -> Self {
        self.bone_follow = follow;
        self
    }
}

/// Ordered queue of widget requests.
#[derive(Debug, Clone, Default)]
pub struct ImportQueue {
    requests: VecDeque<Stock>,
}

impl ImportQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, request: Stock) {
        self.requests.push_back(request);
    }

    /// Enqueue a request from its parts.
    pub fn push(
        &mut self,
        kind: WidgetKind,
        shape: ShapeKind,
        bone_name: impl Into<String>,
        position: Point,
        payload: StockPayload,
    ) {
        self.enqueue(Stock {
            kind,
            shape,
            bone_name: bone_name.into(),
            position,
            bone_follow: false,
            payload,
        });
    }

    /// Take every pending request, oldest first.
    pub fn drain(&mut self) -> Vec<Stock> {
        self.requests.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stock> {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = ImportQueue::new();
        queue.enqueue(Stock::bone(ShapeKind::Quad, "ms-root", Point::new(2.0, 0.0)));
        queue.enqueue(Stock::bone(ShapeKind::Quad, "fk-bone_9", Point::new(2.0, 2.0)));
        queue.push(
            WidgetKind::Operator,
            ShapeKind::Cross,
            "",
            Point::ZERO,
            StockPayload::None,
        );

        let drained = queue.drain();
        let names: Vec<_> = drained.iter().map(|s| s.bone_name.as_str()).collect();
        assert_eq!(names, vec!["ms-root", "fk-bone_9", ""]);
        assert_eq!(drained[2].kind, WidgetKind::Operator);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = ImportQueue::new();
        queue.enqueue(Stock::mesh("torso", "body", vec!["DEF-spine".to_string()], 0.5));
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_mesh_request_follows_bone() {
        let stock = Stock::mesh("head", "body", Vec::new(), 0.5);
        assert!(stock.bone_follow);
        assert_eq!(stock.shape, ShapeKind::Mesh);
    }
}
