//! Mock construction helpers

use mockall::mock;
use scene_picker::config::{PickerConfig, TranslateSettings};
use scene_picker::types::{NodeId, Vec3};
use scene_picker::{PickerApp, Viewer, ViewerBridge};

use crossbeam_channel::{Receiver, Sender};
use scene_picker::viewer::{ViewerCommand, ViewerEvent};

mock! {
    pub HostViewer {}

    impl Viewer for HostViewer {
        fn show(&mut self, node: NodeId);
        fn hide(&mut self, node: NodeId);
        fn translate(&mut self, node: NodeId, offset: Vec3, settings: &TranslateSettings);
    }
}

/// An app wired to a bridge, plus the host ends of its channels
pub fn create_bridged_app() -> (
    PickerApp<ViewerBridge>,
    Receiver<ViewerCommand>,
    Sender<ViewerEvent>,
) {
    let (bridge, cmd_rx, event_tx) = ViewerBridge::new();
    (
        PickerApp::new(PickerConfig::default(), bridge),
        cmd_rx,
        event_tx,
    )
}
