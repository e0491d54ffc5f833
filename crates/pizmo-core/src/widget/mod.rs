//! Widget system for posing bones through on-screen proxies.
//!
//! - [`WidgetEntity`]: one handle bound to one bone, with its geometry,
//!   color state and drag session
//! - [`WidgetGroup`]: the entities of one viewport, kept in sync with the
//!   settings, the scene selection and the import queue
//!
//! Bones stay host data. Widgets only hold their names.

mod drag;
mod entity;
mod group;
mod state;

pub use drag::{
    rotate_pose, scale_pose, snap_to_increment, translate_pose, DragAction, DragSession,
    DragTuning, MIN_SCALE_FACTOR,
};
pub use entity::{Binding, ShapeSource, WidgetEntity, WidgetId, WidgetTransform};
pub use group::WidgetGroup;
pub use state::{ColorState, DragState};
