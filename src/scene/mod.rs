//! Classified view of the viewer's scene graph
//!
//! [`SceneIndex::build`] runs once on the node-map snapshot and produces an
//! immutable index of the picker taxonomy:
//!
//! - [`TypeGroup`]s, in scene order, each with its valid [`OptionNode`]s
//! - the optional [`FilterCatalog`] declared by the `#` group
//! - the [`Diagnostics`] collected along the way
//!
//! Only a missing scene root is fatal. Every other naming problem excludes the
//! offending node, records a diagnostic and carries on with its siblings.

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;

use crate::config::PickerConfig;
use crate::grammar::{GrammarError, NameGrammar, NodeKind, ParentContext};
use crate::types::{NodeId, NodeMap, SceneNode};

/// Fatal errors while building the index
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("no scene root named {sentinel:?} in the node map")]
    NoSceneRoot { sentinel: String },
}

/// One selectable variant of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionNode {
    /// Display name, e.g. `"ModernA"`
    pub name: String,
    pub node_id: NodeId,
    /// Tags after the filter marker; empty for untagged options
    pub filter_tags: BTreeSet<String>,
}

impl OptionNode {
    pub fn is_tagged(&self) -> bool {
        !self.filter_tags.is_empty()
    }

    /// Whether any of the option's tags is in `active`
    pub fn matches_any<'a>(&self, active: impl IntoIterator<Item = &'a String>) -> bool {
        active.into_iter().any(|tag| self.filter_tags.contains(tag))
    }
}

/// A category of interchangeable parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGroup {
    pub name: String,
    pub node_id: NodeId,
    /// Never empty
    pub options: Vec<OptionNode>,
}

impl TypeGroup {
    pub fn find_option(&self, option: NodeId) -> Option<&OptionNode> {
        self.options.iter().find(|o| o.node_id == option)
    }

    pub fn contains(&self, option: NodeId) -> bool {
        self.find_option(option).is_some()
    }

    /// The option shown by default
    pub fn default_option(&self) -> &OptionNode {
        &self.options[0]
    }
}

/// Tags declared by the filter group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCatalog {
    pub root: NodeId,
    pub tags: Vec<String>,
}

impl FilterCatalog {
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Immutable classified scene.
#[derive(Debug, Clone)]
pub struct SceneIndex {
    root: NodeId,
    types: Vec<TypeGroup>,
    type_lookup: HashMap<NodeId, usize>,
    /// Indices into `types` of the first type carrying each name
    button_types: Vec<usize>,
    filter: Option<FilterCatalog>,
    diagnostics: Diagnostics,
}

impl SceneIndex {
    /// Build using the naming constants of `config`
    pub fn build_with_config(nodes: &NodeMap, config: &PickerConfig) -> Result<Self, BuildError> {
        Self::build(
            nodes,
            &NameGrammar::from_config(config),
            &config.scene_root_name,
        )
    }

    /// Classify the node map.
    ///
    /// `scene_root_name` is compared against raw names, suffix included.
    pub fn build(
        nodes: &NodeMap,
        grammar: &NameGrammar,
        scene_root_name: &str,
    ) -> Result<Self, BuildError> {
        let mut diagnostics = Diagnostics::new();
        let root = find_scene_root(nodes, scene_root_name, &mut diagnostics)?;

        let mut types = Vec::new();
        let mut filter: Option<FilterCatalog> = None;

        for child in &root.children {
            let token = match grammar.parse(&child.raw_name) {
                Ok(token) => token,
                Err(_) => {
                    diagnostics.record(Diagnostic::EmptyName {
                        node: child.id,
                        raw_name: child.raw_name.clone(),
                    });
                    continue;
                }
            };

            let classified = grammar.classify(token, ParentContext::SceneRoot);
            match classified.kind {
                NodeKind::FilterGroup => match &filter {
                    Some(existing) => diagnostics.record(Diagnostic::DuplicateFilterRoot {
                        node: child.id,
                        kept: existing.root,
                    }),
                    None => {
                        filter = Some(build_filter_catalog(child, grammar, &mut diagnostics));
                    }
                },
                NodeKind::Type => {
                    let name = classified.token.primary;
                    let options = build_options(child, &name, grammar, &mut diagnostics);
                    if options.is_empty() {
                        diagnostics.record(Diagnostic::EmptyType {
                            type_name: name,
                            node: child.id,
                        });
                        continue;
                    }
                    types.push(TypeGroup {
                        name,
                        node_id: child.id,
                        options,
                    });
                }
                NodeKind::Option | NodeKind::FilterTag => {
                    unreachable!("scene root children are types or filter groups")
                }
            }
        }

        let type_lookup = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.node_id, i))
            .collect();

        let mut seen: HashMap<&str, NodeId> = HashMap::new();
        let mut button_types = Vec::new();
        for (i, group) in types.iter().enumerate() {
            match seen.get(group.name.as_str()) {
                Some(&kept) => diagnostics.record(Diagnostic::DuplicateTypeName {
                    type_name: group.name.clone(),
                    node: group.node_id,
                    kept,
                }),
                None => {
                    seen.insert(&group.name, group.node_id);
                    button_types.push(i);
                }
            }
        }

        tracing::info!(
            "Indexed scene root {}: {} types, {} filter tags, {} diagnostics",
            root.id,
            types.len(),
            filter.as_ref().map_or(0, |f| f.tags.len()),
            diagnostics.len()
        );

        Ok(Self {
            root: root.id,
            types,
            type_lookup,
            button_types,
            filter,
            diagnostics,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Every type with at least one valid option, in scene order
    pub fn type_groups(&self) -> &[TypeGroup] {
        &self.types
    }

    /// Types to render as buttons: like [`type_groups`](Self::type_groups),
    /// but a repeated type name only keeps its first type.
    pub fn option_types(&self) -> impl Iterator<Item = &TypeGroup> {
        self.button_types.iter().map(move |&i| &self.types[i])
    }

    /// Declared filter tags, empty when the model has no filter group
    pub fn filter_tags(&self) -> &[String] {
        self.filter.as_ref().map_or(&[][..], |f| f.tags.as_slice())
    }

    pub fn filter_catalog(&self) -> Option<&FilterCatalog> {
        self.filter.as_ref()
    }

    pub fn has_filter_tag(&self, tag: &str) -> bool {
        self.filter.as_ref().is_some_and(|f| f.contains(tag))
    }

    pub fn find_type(&self, type_id: NodeId) -> Option<&TypeGroup> {
        self.type_lookup.get(&type_id).map(|&i| &self.types[i])
    }

    pub fn find_option(&self, type_id: NodeId, option: NodeId) -> Option<&OptionNode> {
        self.find_type(type_id)?.find_option(option)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

fn find_scene_root<'a>(
    nodes: &'a NodeMap,
    sentinel: &str,
    diagnostics: &mut Diagnostics,
) -> Result<&'a SceneNode, BuildError> {
    let mut candidates = nodes.values().filter(|n| n.raw_name == sentinel);
    let root = candidates.next().ok_or_else(|| BuildError::NoSceneRoot {
        sentinel: sentinel.to_string(),
    })?;

    for extra in candidates {
        diagnostics.record(Diagnostic::DuplicateSceneRoot {
            node: extra.id,
            kept: root.id,
        });
    }
    Ok(root)
}

fn build_filter_catalog(
    group: &SceneNode,
    grammar: &NameGrammar,
    diagnostics: &mut Diagnostics,
) -> FilterCatalog {
    let mut tags = Vec::new();
    let mut seen = HashSet::new();

    for child in &group.children {
        let tag = grammar
            .parse(&child.raw_name)
            .map(|token| grammar.classify(token, ParentContext::FilterGroup))
            .and_then(|classified| grammar.filter_tag(&classified.token));

        match tag {
            Ok(tag) if seen.insert(tag.clone()) => tags.push(tag),
            Ok(tag) => diagnostics.record(Diagnostic::DuplicateFilterTag {
                tag,
                node: child.id,
            }),
            Err(GrammarError::EmptyName { raw_name }) => {
                diagnostics.record(Diagnostic::EmptyName {
                    node: child.id,
                    raw_name,
                })
            }
            Err(_) => diagnostics.record(Diagnostic::MissingFilterTag {
                node: child.id,
                raw_name: child.raw_name.clone(),
            }),
        }
    }

    FilterCatalog {
        root: group.id,
        tags,
    }
}

fn build_options(
    group: &SceneNode,
    type_name: &str,
    grammar: &NameGrammar,
    diagnostics: &mut Diagnostics,
) -> Vec<OptionNode> {
    let mut options = Vec::with_capacity(group.children.len());

    for child in &group.children {
        let parts = grammar
            .parse(&child.raw_name)
            .map(|token| grammar.classify(token, ParentContext::Type(type_name)))
            .and_then(|classified| grammar.option_parts(&classified.token, type_name));

        match parts {
            Ok(parts) => options.push(OptionNode {
                name: parts.name,
                node_id: child.id,
                filter_tags: parts.filter_tags,
            }),
            Err(GrammarError::EmptyName { raw_name }) => {
                diagnostics.record(Diagnostic::EmptyName {
                    node: child.id,
                    raw_name,
                })
            }
            Err(GrammarError::TypeMismatch { raw_name, .. }) => {
                diagnostics.record(Diagnostic::NamingConventionViolation {
                    type_name: type_name.to_string(),
                    node: child.id,
                    raw_name,
                })
            }
            Err(GrammarError::MissingOptionName { raw_name }) => {
                diagnostics.record(Diagnostic::MissingOptionName {
                    type_name: type_name.to_string(),
                    node: child.id,
                    raw_name,
                })
            }
            Err(GrammarError::MissingFilterTag { .. }) => {
                unreachable!("option parsing never asks for a filter tag")
            }
        }
    }

    options
}
