//! Integration tests for the index → engine selection workflow

mod common;

use common::builders::{furniture_scene, SceneBuilder};
use common::{hidden, shown};
use scene_picker::scene::DiagnosticKind;
use scene_picker::types::NodeId;
use scene_picker::{Diagnostic, NameGrammar, PanelEvent, PickerError, SceneIndex, SelectionEngine};

fn ready(scene: &SceneBuilder) -> SelectionEngine {
    let mut engine = SelectionEngine::new();
    engine.initialize(scene.index()).unwrap();
    engine
}

#[test]
fn test_filter_scenario() {
    let scene = furniture_scene();
    let leg = scene.id("Leg_01");
    let mut engine = SelectionEngine::new();
    let instructions = engine.initialize(scene.index()).unwrap();

    assert_eq!(shown(&instructions), vec![scene.id("Leg ModernA_01")]);
    assert_eq!(hidden(&instructions), vec![scene.id("Leg Classic # woven_02")]);
    assert_eq!(engine.index().unwrap().filter_tags(), ["woven", "carved"]);
    assert_eq!(engine.visible_option(leg).unwrap().unwrap().name, "ModernA");

    engine.toggle_filter_tag("woven").unwrap();
    assert_eq!(engine.active_filter_tags().unwrap(), ["woven"]);
    assert_eq!(engine.compute_options(leg).unwrap().names(), vec!["Classic"]);

    // Filtering never touches the 3D view
    assert_eq!(engine.visible_option(leg).unwrap().unwrap().name, "ModernA");
}

#[test]
fn test_tagged_option_under_filters() {
    let scene = SceneBuilder::new()
        .type_group("Leg", &["Leg ModernA # woven"])
        .filter_group(&["# woven", "# carved"]);
    let leg = scene.id("Leg");
    let mut engine = ready(&scene);

    let option = engine.compute_options(leg).unwrap();
    let modern = option.get("ModernA").unwrap();
    assert_eq!(modern.filter_tags.iter().collect::<Vec<_>>(), ["woven"]);

    engine.toggle_filter_tag("woven").unwrap();
    assert!(engine.compute_options(leg).unwrap().contains_name("ModernA"));

    engine.toggle_filter_tag("woven").unwrap();
    engine.toggle_filter_tag("carved").unwrap();
    assert!(engine.compute_options(leg).unwrap().is_empty());
}

#[test]
fn test_mismatched_option_is_excluded() {
    let scene = SceneBuilder::new().type_group(
        "Seat",
        &["Seat Plain_01", "Arm ModernA_01", "Seat Cushion_02"],
    );
    let index = scene.index();

    let seat = index.find_type(scene.id("Seat")).unwrap();
    let names: Vec<_> = seat.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Plain", "Cushion"]);

    assert!(index.diagnostics().contains(&Diagnostic::NamingConventionViolation {
        type_name: "Seat".to_string(),
        node: scene.id("Arm ModernA_01"),
        raw_name: "Arm ModernA_01".to_string(),
    }));
}

#[test]
fn test_empty_type_is_omitted() {
    let scene = SceneBuilder::new()
        .type_group("Backrest", &[])
        .type_group("Leg", &["Leg A"]);
    let index = scene.index();

    assert_eq!(index.type_groups().len(), 1);
    assert!(index.find_type(scene.id("Backrest")).is_none());
    assert_eq!(index.diagnostics().count(DiagnosticKind::EmptyType), 1);
}

#[test]
fn test_scene_without_filter_group() {
    let scene = SceneBuilder::new().type_group("Leg", &["Leg A", "Leg B"]);
    let mut engine = ready(&scene);

    assert!(engine.index().unwrap().filter_tags().is_empty());
    assert!(engine.toggle_filter_tag("woven").unwrap().is_none());
    assert_eq!(engine.compute_options(scene.id("Leg")).unwrap().len(), 2);
}

#[test]
fn test_duplicate_filter_groups_first_wins() {
    let scene = SceneBuilder::new()
        .type_group("Leg", &["Leg A # woven"])
        .filter_group(&["# woven"])
        .group("#_02", &["# carved"]);
    let index = scene.index();

    assert_eq!(index.filter_tags(), ["woven"]);
    assert_eq!(index.diagnostics().count(DiagnosticKind::DuplicateFilterRoot), 1);
}

#[test]
fn test_missing_scene_root() {
    let scene = SceneBuilder::with_root_name("Root").type_group("Leg", &["Leg A"]);
    let err = SceneIndex::build(&scene.nodes(), &NameGrammar::default(), "GLTF_SceneRootNode")
        .unwrap_err();
    assert!(err.to_string().contains("GLTF_SceneRootNode"));
}

#[test]
fn test_selection_switches_visible_option() {
    let scene = SceneBuilder::new().type_group("Leg", &["Leg A", "Leg B", "Leg C"]);
    let leg = scene.id("Leg");
    let mut engine = ready(&scene);

    let instructions = engine.select_option(leg, scene.id("Leg C")).unwrap();
    assert_eq!(shown(&instructions), vec![scene.id("Leg C")]);
    assert_eq!(hidden(&instructions), vec![scene.id("Leg A"), scene.id("Leg B")]);

    // Not an option of this type
    assert!(engine.select_option(leg, NodeId(999)).unwrap().is_empty());
    assert_eq!(engine.visible_option(leg).unwrap().unwrap().node_id, scene.id("Leg C"));
}

#[test]
fn test_panel_flow() {
    let scene = SceneBuilder::new()
        .type_group("Leg", &["Leg A"])
        .type_group("Seat", &["Seat A"]);
    let (leg, seat) = (scene.id("Leg"), scene.id("Seat"));
    let mut engine = ready(&scene);

    let events = engine.open_panel(leg).unwrap();
    assert!(matches!(&events[..], [PanelEvent::Opened { type_id, .. }] if *type_id == leg));

    let events = engine.open_panel(seat).unwrap();
    assert_eq!(events[0], PanelEvent::Closed { type_id: leg });
    assert_eq!(events[1].type_id(), seat);

    assert_eq!(engine.close_panel().unwrap(), Some(PanelEvent::Closed { type_id: seat }));
    assert_eq!(engine.active_panel().unwrap(), None);
}

#[test]
fn test_duplicate_type_names_share_one_button() {
    let scene = SceneBuilder::new()
        .type_group("Leg_01", &["Leg A"])
        .type_group("Leg_02", &["Leg B"]);
    let mut engine = SelectionEngine::new();
    let instructions = engine.initialize(scene.index()).unwrap();

    assert_eq!(engine.option_types().unwrap().len(), 1);
    // Both types are still initialized
    assert_eq!(shown(&instructions).len(), 2);
}

#[test]
fn test_engine_requires_initialize() {
    let engine = SelectionEngine::new();
    assert!(matches!(engine.option_types(), Err(PickerError::NotReady)));
}

#[test]
fn test_fixture_scene() {
    let nodes = common::load_fixture("chair_node_map.json");
    let index = SceneIndex::build(&nodes, &NameGrammar::default(), "GLTF_SceneRootNode").unwrap();

    let names: Vec<_> = index.type_groups().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Leg", "Seat"]);
    assert_eq!(index.filter_tags(), ["woven", "carved"]);

    let diagnostics = index.diagnostics();
    assert_eq!(diagnostics.count(DiagnosticKind::NamingConventionViolation), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::EmptyType), 1);

    let mut engine = SelectionEngine::new();
    engine.initialize(index).unwrap();
    engine.toggle_filter_tag("carved").unwrap();
    assert_eq!(engine.compute_options(NodeId(10)).unwrap().names(), vec!["Turned"]);
    assert!(engine.compute_options(NodeId(20)).unwrap().is_empty());
}
