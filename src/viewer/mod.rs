//! Boundary to the embedded 3D viewer
//!
//! The picker never touches geometry. It asks the viewer to show or hide
//! whole object instances, and forwards an occasional translate request.
//!
//! # Components
//!
//! - [`Viewer`] - Outbound capabilities (show, hide, translate)
//! - [`ViewerBridge`] - Channel-backed [`Viewer`] for hosts that own the real
//!   viewer; also carries inbound [`ViewerEvent`]s such as the node map
//! - [`MockViewer`] - Recording [`Viewer`] for tests and the CLI driver
//! - [`Visibility`] - A single show/hide instruction emitted by the engine
//!
//! # Example
//!
//! ```ignore
//! use scene_picker::viewer::{ViewerBridge, ViewerEvent};
//!
//! let (bridge, cmd_rx, event_tx) = ViewerBridge::new();
//!
//! // Host side: forward the viewer's callbacks
//! event_tx.send(ViewerEvent::NodeMap(Ok(nodes)))?;
//!
//! // Host side: apply commands to the real viewer
//! for cmd in cmd_rx.try_iter() {
//!     match cmd {
//!         ViewerCommand::Show(id) => api.show(id),
//!         ViewerCommand::Hide(id) => api.hide(id),
//!         ViewerCommand::Translate { .. } => { /* ... */ }
//!     }
//! }
//! ```

pub mod bridge;
pub mod mock_viewer;

pub use bridge::{ViewerBridge, ViewerCommand, ViewerEvent};
pub use mock_viewer::{MockViewer, ViewerCall};

use crate::config::TranslateSettings;
use crate::types::{NodeId, Vec3};

/// A show/hide instruction for one object instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Show(NodeId),
    Hide(NodeId),
}

impl Visibility {
    pub fn node(&self) -> NodeId {
        match self {
            Visibility::Show(id) | Visibility::Hide(id) => *id,
        }
    }

    pub fn is_show(&self) -> bool {
        matches!(self, Visibility::Show(_))
    }
}

/// Counters for calls issued to a viewer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerStats {
    pub shows: u64,
    pub hides: u64,
    pub translates: u64,
    /// Calls that could not be delivered (bridge host disconnected)
    pub dropped: u64,
}

impl ViewerStats {
    pub fn total_calls(&self) -> u64 {
        self.shows + self.hides + self.translates
    }
}

/// Outbound viewer capabilities.
///
/// Calls are fire-and-forget and assumed to succeed for valid ids. The
/// viewer's translate result comes back asynchronously, see
/// [`ViewerEvent::Translated`].
pub trait Viewer {
    /// Make an object instance visible
    fn show(&mut self, node: NodeId);

    /// Hide an object instance
    fn hide(&mut self, node: NodeId);

    /// Move an object instance by `offset`
    fn translate(&mut self, node: NodeId, offset: Vec3, settings: &TranslateSettings);

    /// Apply a batch of instructions in order
    fn apply(&mut self, instructions: &[Visibility]) {
        for instruction in instructions {
            match *instruction {
                Visibility::Show(id) => self.show(id),
                Visibility::Hide(id) => self.hide(id),
            }
        }
    }
}

impl<V: Viewer + ?Sized> Viewer for Box<V> {
    fn show(&mut self, node: NodeId) {
        (**self).show(node)
    }

    fn hide(&mut self, node: NodeId) {
        (**self).hide(node)
    }

    fn translate(&mut self, node: NodeId, offset: Vec3, settings: &TranslateSettings) {
        (**self).translate(node, offset, settings)
    }
}
