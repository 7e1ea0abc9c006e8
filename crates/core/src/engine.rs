//! Drag engine capability and notification types

use dash_grid_types::WidgetId;
use serde::{Deserialize, Serialize};

/// Notification emitted by a drag engine.
///
/// Engines deliver these serially, in the order the user produces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragEvent {
    /// A widget was picked up
    Start { source: WidgetId },
    /// The widget was released, over `target` or over nothing
    End {
        source: WidgetId,
        target: Option<WidgetId>,
    },
    /// The engine aborted the drag (escape key, pointer lost)
    Cancel { source: WidgetId },
}

impl DragEvent {
    /// The widget being dragged
    pub fn source(&self) -> &WidgetId {
        match self {
            DragEvent::Start { source }
            | DragEvent::End { source, .. }
            | DragEvent::Cancel { source } => source,
        }
    }
}

/// Capability a UI toolkit provides for sensing drags.
///
/// Hit-testing, pointer capture and animation all live behind this trait.
/// The engine reports what happened through [`DragEvent`]s handed to
/// [`crate::DragAdapter::handle`].
pub trait DragEngine {
    /// Make the region rendered for `id` draggable and a drop target
    fn register_draggable(&mut self, id: &WidgetId);
}
