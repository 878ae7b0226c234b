//! scene-picker - offline driver
//!
//! Loads a node-map snapshot exported from the viewer, runs it through the
//! picker against a recording viewer, and prints what the widget would show.
//!
//! Usage: `scene-picker <node-map.json> [config.toml]`

use anyhow::{bail, Context};
use scene_picker::{
    config::PickerConfig,
    types::node_map_from_json,
    viewer::MockViewer,
    PickerApp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,scene_picker=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(node_map_path) = args.next() else {
        bail!("usage: scene-picker <node-map.json> [config.toml]");
    };

    let config = match args.next() {
        Some(path) => PickerConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => PickerConfig::default(),
    };

    let json = std::fs::read_to_string(&node_map_path)
        .with_context(|| format!("Failed to read node map {}", node_map_path))?;
    let nodes = node_map_from_json(&json).context("Invalid node map")?;
    tracing::info!("Loaded {} nodes from {}", nodes.len(), node_map_path);

    let mut app = PickerApp::new(config, MockViewer::new());
    app.handle_node_map(Ok(nodes))
        .context("Failed to initialize the picker")?;

    let Some(index) = app.index() else {
        bail!("picker did not become ready");
    };

    println!("Types:");
    for group in app.type_buttons() {
        let visible = app
            .engine()
            .visible_option(group.node_id)?
            .map_or("-", |o| o.name.as_str());
        println!(
            "  {} {} ({} options, showing {})",
            group.node_id,
            group.name,
            group.options.len(),
            visible
        );
        for option in &group.options {
            let tags: Vec<&str> = option.filter_tags.iter().map(String::as_str).collect();
            println!("    {} {} [{}]", option.node_id, option.name, tags.join(" "));
        }
    }

    println!("Filter tags: {}", index.filter_tags().join(", "));

    if index.diagnostics().is_empty() {
        println!("Diagnostics: none");
    } else {
        println!("Diagnostics:");
        for diagnostic in index.diagnostics() {
            println!("  {}", diagnostic);
        }
    }

    let stats = app.viewer().stats();
    println!("Viewer calls: {} shows, {} hides", stats.shows, stats.hides);

    Ok(())
}
