//! Picker application: one embedded widget
//!
//! [`PickerApp`] ties the pieces together for a single model:
//!
//! 1. waits for the viewer's one-shot node map
//! 2. builds the [`SceneIndex`] and initializes the [`SelectionEngine`]
//! 3. dispatches [`PickerAction`]s from the presentation layer, forwarding
//!    visibility instructions to the [`Viewer`] and returning panel events
//!    with their presentation delay
//!
//! A failed or missing node map leaves the widget without a picker. There is
//! no retry.

use std::rc::Rc;
use std::time::Duration;

use crate::config::PickerConfig;
use crate::engine::{PanelEvent, SelectionEngine};
use crate::error::{PickerError, Result};
use crate::grammar::NameGrammar;
use crate::scene::{SceneIndex, TypeGroup};
use crate::types::{NodeId, NodeMap, Vec3};
use crate::viewer::{Viewer, ViewerBridge, ViewerEvent};

/// Where the widget is in its startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    /// Viewer not answered yet
    AwaitingNodeMap,
    Ready,
    /// Node map failed or could not be indexed; terminal
    Failed(String),
}

/// User actions routed from the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum PickerAction {
    /// Option button clicked
    SelectOption { type_id: NodeId, option: NodeId },
    /// Filter button clicked
    ToggleFilterTag(String),
    /// Reset every filter button
    ClearFilterTags,
    /// Type button clicked
    OpenPanel(NodeId),
    /// Click outside the panel
    ClosePanel,
    /// Move an object instance (passthrough to the viewer)
    Translate { node: NodeId, offset: Vec3 },
}

/// A panel event with the delay before it should be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledPanelEvent {
    pub delay: Duration,
    pub event: PanelEvent,
}

impl ScheduledPanelEvent {
    pub fn immediate(event: PanelEvent) -> Self {
        Self {
            delay: Duration::ZERO,
            event,
        }
    }
}

pub struct PickerApp<V: Viewer> {
    config: PickerConfig,
    grammar: NameGrammar,
    viewer: V,
    engine: SelectionEngine,
    lifecycle: Lifecycle,
}

impl<V: Viewer> PickerApp<V> {
    pub fn new(config: PickerConfig, viewer: V) -> Self {
        let grammar = NameGrammar::from_config(&config);
        Self {
            config,
            grammar,
            viewer,
            engine: SelectionEngine::new(),
            lifecycle: Lifecycle::AwaitingNodeMap,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    /// The scene index, once the node map has been indexed
    pub fn index(&self) -> Option<&SceneIndex> {
        self.engine.index().ok()
    }

    /// Types to render as buttons; empty until ready
    pub fn type_buttons(&self) -> Vec<&TypeGroup> {
        self.engine.option_types().unwrap_or_default()
    }

    /// Filter buttons; empty until ready or without a filter group
    pub fn filter_tags(&self) -> &[String] {
        self.index().map_or(&[][..], |index| index.filter_tags())
    }

    /// Handle the viewer's node-map answer.
    ///
    /// Only the first answer counts; later ones are logged and ignored.
    pub fn handle_node_map(&mut self, result: std::result::Result<NodeMap, String>) -> Result<()> {
        if self.lifecycle != Lifecycle::AwaitingNodeMap {
            tracing::debug!("Ignoring node map in state {:?}", self.lifecycle);
            return Ok(());
        }

        let nodes = match result {
            Ok(nodes) => nodes,
            Err(message) => {
                tracing::warn!("Viewer failed to deliver the node map: {}", message);
                self.lifecycle = Lifecycle::Failed(message.clone());
                return Err(PickerError::Viewer(message));
            }
        };

        let index = match SceneIndex::build(&nodes, &self.grammar, &self.config.scene_root_name) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("Cannot index node map: {}", e);
                self.lifecycle = Lifecycle::Failed(e.to_string());
                return Err(e.into());
            }
        };

        let instructions = self.engine.initialize(Rc::new(index))?;
        self.viewer.apply(&instructions);
        self.lifecycle = Lifecycle::Ready;
        tracing::info!("Picker ready ({} nodes)", nodes.len());
        Ok(())
    }

    /// Handle one inbound viewer event.
    pub fn handle_event(&mut self, event: ViewerEvent) -> Result<()> {
        match event {
            ViewerEvent::Ready => {
                tracing::debug!("Viewer ready");
                Ok(())
            }
            ViewerEvent::NodeMap(result) => self.handle_node_map(result),
            ViewerEvent::Translated { node, result } => {
                match result {
                    Ok(position) => tracing::debug!("Translated {} to {:?}", node, position),
                    Err(e) => tracing::warn!("Translate of {} failed: {}", node, e),
                }
                Ok(())
            }
            ViewerEvent::Error(message) => {
                tracing::warn!("Viewer error: {}", message);
                Ok(())
            }
        }
    }

    /// Apply a user action.
    pub fn dispatch(&mut self, action: PickerAction) -> Result<Vec<ScheduledPanelEvent>> {
        match action {
            PickerAction::SelectOption { type_id, option } => {
                let instructions = self.engine.select_option(type_id, option)?;
                self.viewer.apply(&instructions);
                Ok(Vec::new())
            }
            PickerAction::ToggleFilterTag(tag) => {
                let refreshed = self.engine.toggle_filter_tag(&tag)?;
                Ok(self.schedule(refreshed))
            }
            PickerAction::ClearFilterTags => {
                let refreshed = self.engine.clear_filter_tags()?;
                Ok(self.schedule(refreshed))
            }
            PickerAction::OpenPanel(type_id) => {
                let events = self.engine.open_panel(type_id)?;
                Ok(self.schedule(events))
            }
            PickerAction::ClosePanel => {
                let closed = self.engine.close_panel()?;
                Ok(self.schedule(closed))
            }
            PickerAction::Translate { node, offset } => {
                self.viewer.translate(node, offset, &self.config.translate);
                Ok(Vec::new())
            }
        }
    }

    /// An `Opened` right after a `Closed` waits for the close transition.
    fn schedule(&self, events: impl IntoIterator<Item = PanelEvent>) -> Vec<ScheduledPanelEvent> {
        let transition = self.config.panel_transition();
        let mut scheduled: Vec<ScheduledPanelEvent> = Vec::new();

        for event in events {
            let after_close = scheduled.last().is_some_and(|prev| prev.event.is_closed());
            let delay = if after_close && matches!(event, PanelEvent::Opened { .. }) {
                transition
            } else {
                Duration::ZERO
            };
            scheduled.push(ScheduledPanelEvent { delay, event });
        }
        scheduled
    }
}

impl PickerApp<ViewerBridge> {
    /// Drain and handle every pending event from the bridge.
    ///
    /// All events are handled; the first error is returned.
    pub fn process_viewer_events(&mut self) -> Result<()> {
        let mut first_error = None;
        for event in self.viewer.drain() {
            if let Err(e) = self.handle_event(event) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

// ==================== Tests ====================
