//! Channel boundary between the picker and the host that owns the viewer.
//!
//! The viewer lives outside the picker (typically behind an iframe API with
//! callbacks). The host forwards the viewer's callbacks as [`ViewerEvent`]s
//! and applies the [`ViewerCommand`]s it receives. The picker side holds a
//! [`ViewerBridge`], which implements [`Viewer`] by sending commands.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::config::{Easing, TranslateSettings};
use crate::types::{NodeId, NodeMap, Vec3};

use super::{Viewer, ViewerStats};

/// Commands sent from the picker to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    /// Make an instance visible.
    Show(NodeId),
    /// Hide an instance.
    Hide(NodeId),
    /// Translate an instance.
    Translate {
        node: NodeId,
        offset: Vec3,
        duration_secs: f64,
        easing: Easing,
    },
}

/// Events sent from the host to the picker.
#[derive(Debug, Clone)]
pub enum ViewerEvent {
    /// The viewer finished loading and accepts API calls.
    Ready,
    /// The one-shot node map, or the viewer's error message.
    NodeMap(Result<NodeMap, String>),
    /// Completion of a translate call.
    Translated {
        node: NodeId,
        result: Result<Vec3, String>,
    },
    /// The viewer reported an error outside any request.
    Error(String),
}

/// Channel capacity for events (host → picker).
///
/// Commands (picker → host) are unbounded: the host drains them only after
/// the picker returns, so a whole initialize batch must fit.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Picker-side handle for communicating with the viewer host.
pub struct ViewerBridge {
    cmd_tx: Sender<ViewerCommand>,
    event_rx: Receiver<ViewerEvent>,
    stats: ViewerStats,
}

impl ViewerBridge {
    /// Create a new bridge: `(bridge_for_picker, cmd_rx, event_tx)`.
    ///
    /// The host owns `cmd_rx` and `event_tx`.
    pub fn new() -> (Self, Receiver<ViewerCommand>, Sender<ViewerEvent>) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (event_tx, event_rx) = bounded(EVENT_CHANNEL_CAPACITY);
        (
            Self {
                cmd_tx,
                event_rx,
                stats: ViewerStats::default(),
            },
            cmd_rx,
            event_tx,
        )
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<ViewerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Try to receive a single event without blocking.
    pub fn try_recv(&self) -> Option<ViewerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Send a command without blocking; returns false if the host is gone.
    pub fn send_command(&mut self, cmd: ViewerCommand) -> bool {
        match self.cmd_tx.send(cmd) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Viewer host disconnected, dropping {:?}", err.0);
                self.stats.dropped += 1;
                false
            }
        }
    }

    pub fn stats(&self) -> &ViewerStats {
        &self.stats
    }
}

impl Viewer for ViewerBridge {
    fn show(&mut self, node: NodeId) {
        if self.send_command(ViewerCommand::Show(node)) {
            self.stats.shows += 1;
        }
    }

    fn hide(&mut self, node: NodeId) {
        if self.send_command(ViewerCommand::Hide(node)) {
            self.stats.hides += 1;
        }
    }

    fn translate(&mut self, node: NodeId, offset: Vec3, settings: &TranslateSettings) {
        let cmd = ViewerCommand::Translate {
            node,
            offset,
            duration_secs: settings.duration_secs,
            easing: settings.easing,
        };
        if self.send_command(cmd) {
            self.stats.translates += 1;
        }
    }
}
