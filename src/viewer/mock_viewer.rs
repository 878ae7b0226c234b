//! Recording viewer for tests and offline runs
//!
//! [`MockViewer`] stands in for the embedded viewer. It records every call in
//! order and keeps track of which instances are currently visible, so tests
//! can assert on both the instruction stream and its end state.
//!
//! Every node starts out visible, like a freshly loaded model in the real
//! viewer; [`MockViewer::with_hidden`] changes that starting point.

use std::collections::HashSet;

use crate::config::TranslateSettings;
use crate::types::{NodeId, Vec3};

use super::{Viewer, ViewerStats};

/// A recorded viewer call
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCall {
    Show(NodeId),
    Hide(NodeId),
    Translate {
        node: NodeId,
        offset: Vec3,
        settings: TranslateSettings,
    },
}

/// Viewer that records calls instead of driving a real scene
#[derive(Debug, Default)]
pub struct MockViewer {
    calls: Vec<ViewerCall>,
    hidden: HashSet<NodeId>,
    stats: ViewerStats,
}

impl MockViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given nodes hidden
    pub fn with_hidden(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.hidden.extend(nodes);
        self
    }

    /// Calls in the order they were made
    pub fn calls(&self) -> &[ViewerCall] {
        &self.calls
    }

    /// Forget recorded calls, keeping visibility state
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn is_visible(&self, node: NodeId) -> bool {
        !self.hidden.contains(&node)
    }

    /// Which of `candidates` are visible, in the given order
    pub fn visible_among(&self, candidates: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
        candidates
            .into_iter()
            .filter(|id| self.is_visible(*id))
            .collect()
    }

    pub fn stats(&self) -> &ViewerStats {
        &self.stats
    }
}

impl Viewer for MockViewer {
    fn show(&mut self, node: NodeId) {
        self.hidden.remove(&node);
        self.stats.shows += 1;
        self.calls.push(ViewerCall::Show(node));
    }

    fn hide(&mut self, node: NodeId) {
        self.hidden.insert(node);
        self.stats.hides += 1;
        self.calls.push(ViewerCall::Hide(node));
    }

    fn translate(&mut self, node: NodeId, offset: Vec3, settings: &TranslateSettings) {
        self.stats.translates += 1;
        self.calls.push(ViewerCall::Translate {
            node,
            offset,
            settings: settings.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_start_visible() {
        let viewer = MockViewer::new();
        assert!(viewer.is_visible(NodeId(1)));
    }

    #[test]
    fn test_show_hide_track_state() {
        let mut viewer = MockViewer::new().with_hidden([NodeId(1), NodeId(2)]);
        viewer.show(NodeId(1));
        viewer.hide(NodeId(3));

        assert_eq!(
            viewer.visible_among([NodeId(1), NodeId(2), NodeId(3)]),
            vec![NodeId(1)]
        );
        assert_eq!(viewer.stats().shows, 1);
        assert_eq!(viewer.stats().hides, 1);
    }

    #[test]
    fn test_translate_is_recorded() {
        let mut viewer = MockViewer::new();
        let settings = TranslateSettings::default();
        viewer.translate(NodeId(5), Vec3::ZERO, &settings);

        assert_eq!(viewer.stats().translates, 1);
        assert!(matches!(
            viewer.calls()[0],
            ViewerCall::Translate { node: NodeId(5), .. }
        ));
    }

    #[test]
    fn test_clear_calls_keeps_state() {
        let mut viewer = MockViewer::new();
        viewer.hide(NodeId(1));
        viewer.clear_calls();

        assert!(viewer.calls().is_empty());
        assert!(!viewer.is_visible(NodeId(1)));
    }
}
