//! Error types shared by the widget core.

use thiserror::Error;

/// Errors raised while building or driving widgets.
///
/// None of these are fatal for a widget group: the per-frame refresh logs
/// them and carries on with the remaining entities.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The bound bone was renamed or deleted.
    #[error("Bone not found: {0}")]
    MissingBone(String),
    /// A widget configuration refers to something that does not exist.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A mesh filter left no triangles to draw or pick.
    #[error("Empty proxy geometry for bone: {0}")]
    EmptyProxyGeometry(String),
    /// Settings could not be (de)serialized.
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
