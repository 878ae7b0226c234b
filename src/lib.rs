//! # scene-picker: variant picker core for an embedded 3D viewer
//!
//! Lets a user pick visual variants of the sub-parts of a single 3D model.
//! The model is authored with a naming convention; the picker discovers the
//! structure from the viewer's scene graph and toggles object visibility
//! through the viewer's show/hide calls.
//!
//! ## Naming convention
//!
//! Names are space-separated tokens, optionally followed by a viewer-appended
//! `_NN` suffix:
//!
//! ```text
//! GLTF_SceneRootNode
//! ├── Leg                         type
//! │   ├── Leg ModernA_01          option "ModernA", untagged
//! │   └── Leg Classic # woven_02  option "Classic", tags {woven}
//! └── #                           filter group
//!     ├── # woven_03              filter tag "woven"
//!     └── # carved_04             filter tag "carved"
//! ```
//!
//! ## Architecture
//!
//! - **grammar**: [`NameGrammar`] parses and classifies raw node names
//! - **scene**: [`SceneIndex`] is the immutable classified view of the graph
//! - **engine**: [`SelectionEngine`] owns the visible option per type, the
//!   active filter tags and the open panel
//! - **viewer**: the [`Viewer`] boundary, with a channel bridge and a mock
//! - **app**: [`PickerApp`] wires one widget together
//!
//! ## Example
//!
//! ```ignore
//! use scene_picker::{PickerAction, PickerApp, PickerConfig, ViewerBridge};
//!
//! let (bridge, cmd_rx, event_tx) = ViewerBridge::new();
//! let mut app = PickerApp::new(PickerConfig::load_or_default("picker.toml"), bridge);
//!
//! // The host forwards the viewer's node map, then the picker initializes
//! app.process_viewer_events()?;
//!
//! for event in app.dispatch(PickerAction::OpenPanel(leg))? {
//!     render_after(event.delay, event.event);
//! }
//! ```

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod scene;
pub mod types;
pub mod viewer;

pub use app::{Lifecycle, PickerAction, PickerApp, ScheduledPanelEvent};
pub use config::PickerConfig;
pub use engine::{OptionSet, PanelEvent, SelectionEngine};
pub use error::{PickerError, Result};
pub use grammar::{GrammarError, NameGrammar};
pub use scene::{BuildError, Diagnostic, Diagnostics, SceneIndex};
pub use types::{NodeId, NodeMap, SceneNode, Vec3};
pub use viewer::{MockViewer, Viewer, ViewerBridge, ViewerCommand, ViewerEvent, Visibility};
