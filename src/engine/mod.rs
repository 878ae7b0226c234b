//! Selection engine: the picker's only mutable state
//!
//! The engine starts **uninitialized**. [`SelectionEngine::initialize`] is the
//! only way out of that state; every other operation returns
//! [`PickerError::NotReady`] until it has run.
//!
//! Once ready, the engine guarantees that every type has exactly one visible
//! option. Selecting an option re-derives the show/hide instructions for the
//! whole type, so repeating a selection is harmless.
//!
//! Filtering only changes what is *offered* in a panel. It never changes what
//! is shown in the 3D view.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = SelectionEngine::new();
//! viewer.apply(&engine.initialize(index)?);
//!
//! viewer.apply(&engine.select_option(leg, classic)?);
//! engine.toggle_filter_tag("woven")?;
//! let offered = engine.compute_options(leg)?;
//! ```

pub mod events;
pub mod options;

pub use events::PanelEvent;
pub use options::{OptionEntry, OptionSet};

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{PickerError, Result};
use crate::scene::{Diagnostic, Diagnostics, OptionNode, SceneIndex, TypeGroup};
use crate::types::NodeId;
use crate::viewer::Visibility;

/// Mutable selection state, valid once the engine is ready
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Type node → visible option node
    pub visible_option: HashMap<NodeId, NodeId>,
    /// Active filter tags in the order they were switched on
    pub active_filter_tags: Vec<String>,
    /// Type whose option panel is open
    pub active_panel_type: Option<NodeId>,
}

#[derive(Debug)]
struct Ready {
    index: Rc<SceneIndex>,
    state: SelectionState,
}

/// Ignored-action diagnostics retained by the engine
pub const ACTION_DIAGNOSTICS_LIMIT: usize = 256;

/// Owner of "which option is visible" and "which filters are active".
#[derive(Debug)]
pub struct SelectionEngine {
    ready: Option<Ready>,
    diagnostics: Diagnostics,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self {
            ready: None,
            diagnostics: Diagnostics::with_limit(ACTION_DIAGNOSTICS_LIMIT),
        }
    }
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.is_some()
    }

    /// Make every type's first option visible and hide the rest.
    ///
    /// Returns one show followed by the sibling hides per type, in scene
    /// order.
    pub fn initialize(&mut self, index: impl Into<Rc<SceneIndex>>) -> Result<Vec<Visibility>> {
        if self.ready.is_some() {
            return Err(PickerError::AlreadyInitialized);
        }

        let index = index.into();
        let mut state = SelectionState::default();
        let mut instructions = Vec::new();

        for group in index.type_groups() {
            let first = group.default_option().node_id;
            state.visible_option.insert(group.node_id, first);
            instructions.extend(visibility_for(group, first));
        }

        tracing::info!(
            "Selection engine ready: {} types, {} instructions",
            index.type_groups().len(),
            instructions.len()
        );

        self.ready = Some(Ready { index, state });
        Ok(instructions)
    }

    fn ready(&self) -> Result<&Ready> {
        self.ready.as_ref().ok_or(PickerError::NotReady)
    }

    fn ready_mut(&mut self) -> Result<&mut Ready> {
        self.ready.as_mut().ok_or(PickerError::NotReady)
    }

    pub fn index(&self) -> Result<&SceneIndex> {
        Ok(&self.ready()?.index)
    }

    /// Shared handle to the index the engine was initialized with
    pub fn index_handle(&self) -> Result<Rc<SceneIndex>> {
        Ok(Rc::clone(&self.ready()?.index))
    }

    pub fn state(&self) -> Result<&SelectionState> {
        Ok(&self.ready()?.state)
    }

    /// Diagnostics for ignored actions; the most recent
    /// [`ACTION_DIAGNOSTICS_LIMIT`] are retained
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Make `option` the visible option of `type_id`.
    ///
    /// An option that does not belong to the type is ignored: the result is
    /// empty and a diagnostic is recorded. Callers may dispatch without
    /// validating ids first.
    pub fn select_option(&mut self, type_id: NodeId, option: NodeId) -> Result<Vec<Visibility>> {
        let ready = self.ready.as_mut().ok_or(PickerError::NotReady)?;

        let Some(group) = ready.index.find_type(type_id).filter(|g| g.contains(option)) else {
            self.diagnostics
                .record(Diagnostic::UnknownSelection { type_id, option });
            return Ok(Vec::new());
        };

        let instructions = visibility_for(group, option);
        ready.state.visible_option.insert(type_id, option);
        tracing::debug!("Selected option {} of type {}", option, type_id);
        Ok(instructions)
    }

    /// Switch a filter tag on or off.
    ///
    /// Returns a [`PanelEvent::Refreshed`] for the open panel, if any. Tags
    /// outside the catalog are ignored.
    pub fn toggle_filter_tag(&mut self, tag: &str) -> Result<Option<PanelEvent>> {
        let ready = self.ready.as_mut().ok_or(PickerError::NotReady)?;

        if !ready.index.has_filter_tag(tag) {
            self.diagnostics.record(Diagnostic::UnknownFilterTag {
                tag: tag.to_string(),
            });
            return Ok(None);
        }

        let active = &mut ready.state.active_filter_tags;
        if let Some(pos) = active.iter().position(|t| t == tag) {
            active.remove(pos);
            tracing::debug!("Filter tag {:?} off", tag);
        } else {
            active.push(tag.to_string());
            tracing::debug!("Filter tag {:?} on", tag);
        }

        self.refresh_open_panel()
    }

    /// Switch every filter tag off.
    pub fn clear_filter_tags(&mut self) -> Result<Option<PanelEvent>> {
        let ready = self.ready_mut()?;
        if ready.state.active_filter_tags.is_empty() {
            return Ok(None);
        }
        ready.state.active_filter_tags.clear();
        self.refresh_open_panel()
    }

    fn refresh_open_panel(&self) -> Result<Option<PanelEvent>> {
        let ready = self.ready()?;
        Ok(ready.state.active_panel_type.map(|type_id| PanelEvent::Refreshed {
            type_id,
            options: offered_options(&ready.index, &ready.state, type_id),
        }))
    }

    pub fn active_filter_tags(&self) -> Result<&[String]> {
        Ok(&self.ready()?.state.active_filter_tags)
    }

    /// Options offered for `type_id` under the active filter tags.
    ///
    /// An unknown type yields an empty set.
    pub fn compute_options(&self, type_id: NodeId) -> Result<OptionSet> {
        let ready = self.ready()?;
        Ok(offered_options(&ready.index, &ready.state, type_id))
    }

    /// Currently visible option of a type; `None` for unknown types
    pub fn visible_option(&self, type_id: NodeId) -> Result<Option<&OptionNode>> {
        let ready = self.ready()?;
        Ok(ready
            .state
            .visible_option
            .get(&type_id)
            .and_then(|option| ready.index.find_option(type_id, *option)))
    }

    /// Types to render as buttons
    pub fn option_types(&self) -> Result<Vec<&TypeGroup>> {
        Ok(self.ready()?.index.option_types().collect())
    }

    pub fn active_panel(&self) -> Result<Option<NodeId>> {
        Ok(self.ready()?.state.active_panel_type)
    }

    /// Toggle the option panel of `type_id`.
    ///
    /// - nothing open: `[Opened(type_id)]`
    /// - same type open: `[Closed(type_id)]`
    /// - other type open: `[Closed(other), Opened(type_id)]`
    pub fn open_panel(&mut self, type_id: NodeId) -> Result<Vec<PanelEvent>> {
        let ready = self.ready.as_mut().ok_or(PickerError::NotReady)?;

        if ready.index.find_type(type_id).is_none() {
            self.diagnostics.record(Diagnostic::UnknownType { type_id });
            return Ok(Vec::new());
        }

        let mut events = Vec::with_capacity(2);
        match ready.state.active_panel_type {
            Some(open) if open == type_id => {
                ready.state.active_panel_type = None;
                events.push(PanelEvent::Closed { type_id });
            }
            current => {
                if let Some(open) = current {
                    events.push(PanelEvent::Closed { type_id: open });
                }
                ready.state.active_panel_type = Some(type_id);
                events.push(PanelEvent::Opened {
                    type_id,
                    options: offered_options(&ready.index, &ready.state, type_id),
                });
            }
        }

        tracing::debug!("Panel request for {}: {} events", type_id, events.len());
        Ok(events)
    }

    /// Close whichever panel is open.
    pub fn close_panel(&mut self) -> Result<Option<PanelEvent>> {
        let ready = self.ready_mut()?;
        Ok(ready
            .state
            .active_panel_type
            .take()
            .map(|type_id| PanelEvent::Closed { type_id }))
    }
}

/// Show `visible`, hide every other option of the group.
fn visibility_for(group: &TypeGroup, visible: NodeId) -> Vec<Visibility> {
    group
        .options
        .iter()
        .map(|o| {
            if o.node_id == visible {
                Visibility::Show(o.node_id)
            } else {
                Visibility::Hide(o.node_id)
            }
        })
        .collect()
}

fn offered_options(index: &SceneIndex, state: &SelectionState, type_id: NodeId) -> OptionSet {
    let mut set = OptionSet::new();
    let Some(group) = index.find_type(type_id) else {
        return set;
    };

    let filtering = !state.active_filter_tags.is_empty();
    for option in &group.options {
        if filtering && !option.matches_any(&state.active_filter_tags) {
            continue;
        }
        set.insert(option.name.clone(), option.clone());
    }
    set
}
