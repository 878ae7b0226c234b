//! Panel events emitted by the selection engine
//!
//! The engine does not know about animation. It emits discrete events in the
//! order the presentation layer must apply them; timing is added later by
//! [`PickerApp`](crate::app::PickerApp).

use crate::types::NodeId;

use super::options::OptionSet;

/// What the option panel should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Show the panel for a type with these options
    Opened { type_id: NodeId, options: OptionSet },
    /// Hide the panel of a type
    Closed { type_id: NodeId },
    /// Replace the content of the open panel (filter changed)
    Refreshed { type_id: NodeId, options: OptionSet },
}

impl PanelEvent {
    pub fn type_id(&self) -> NodeId {
        match self {
            PanelEvent::Opened { type_id, .. }
            | PanelEvent::Closed { type_id }
            | PanelEvent::Refreshed { type_id, .. } => *type_id,
        }
    }

    /// Options to render, if the event carries content
    pub fn options(&self) -> Option<&OptionSet> {
        match self {
            PanelEvent::Opened { options, .. } | PanelEvent::Refreshed { options, .. } => {
                Some(options)
            }
            PanelEvent::Closed { .. } => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PanelEvent::Closed { .. })
    }
}
