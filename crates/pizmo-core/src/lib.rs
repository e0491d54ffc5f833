//! PizMo Core Library
//!
//! Host-agnostic core of the bone picker widgets: proxy geometry, trackball
//! rotation, the widget state machine and the per-viewport widget group.
//! The host supplies bones and meshes through [`Scene`] and forwards pointer
//! events; drawing is left to the host.

pub mod error;
pub mod input;
pub mod presets;
pub mod queue;
pub mod scene;
pub mod settings;
pub mod shapes;
pub mod trackball;
pub mod view;
pub mod widget;

pub use error::{WidgetError, WidgetResult};
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use queue::{ImportQueue, Stock, StockPayload, WidgetKind};
pub use scene::{Bone, BonePose, MemoryScene, Scene, TransformLocks};
pub use settings::{ArmatureConfig, DirtyFlag, DisplayShape, DisplayType, WidgetConfig, WidgetSettings};
pub use shapes::{generate, generate_frame, Dimension, Shape, ShapeKind};
pub use trackball::{Trackball, TrackballRotation};
pub use view::ViewContext;
pub use widget::{ColorState, DragAction, DragState, DragTuning, WidgetEntity, WidgetGroup, WidgetId};
