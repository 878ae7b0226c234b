//! Recoverable problems found while indexing the scene or handling actions
//!
//! Nothing in here aborts processing: a model that only partly follows the
//! naming convention still produces a usable picker, and the collected
//! diagnostics tell the model author what was skipped.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::NodeId;

/// A single recoverable problem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An option's leading token does not match its type
    #[error("option {raw_name:?} ({node}) does not start with type name {type_name:?}")]
    NamingConventionViolation {
        type_name: String,
        node: NodeId,
        raw_name: String,
    },

    /// A node name yields zero tokens
    #[error("node {node} has an empty name {raw_name:?}")]
    EmptyName { node: NodeId, raw_name: String },

    /// An option carries only its type token
    #[error("option {raw_name:?} ({node}) of type {type_name:?} has no option name")]
    MissingOptionName {
        type_name: String,
        node: NodeId,
        raw_name: String,
    },

    /// A filter group child carries only the marker
    #[error("filter tag node {raw_name:?} ({node}) has no tag")]
    MissingFilterTag { node: NodeId, raw_name: String },

    /// A type ended up without valid options and is not offered
    #[error("type {type_name:?} ({node}) has no valid options")]
    EmptyType { type_name: String, node: NodeId },

    /// A second filter group under the scene root
    #[error("filter group {node} ignored, {kept} is already the filter root")]
    DuplicateFilterRoot { node: NodeId, kept: NodeId },

    /// A second node named like the scene root
    #[error("scene root candidate {node} ignored, using {kept}")]
    DuplicateSceneRoot { node: NodeId, kept: NodeId },

    /// Two types share a name; only the first gets a button
    #[error("type {type_name:?} ({node}) shares its name with {kept}")]
    DuplicateTypeName {
        type_name: String,
        node: NodeId,
        kept: NodeId,
    },

    /// The filter group declares the same tag twice
    #[error("filter tag {tag:?} declared again by {node}")]
    DuplicateFilterTag { tag: String, node: NodeId },

    /// `select_option` with an option outside the type
    #[error("option {option} is not an option of type {type_id}, selection ignored")]
    UnknownSelection { type_id: NodeId, option: NodeId },

    /// `open_panel` with an id that is not an indexed type
    #[error("{type_id} is not a known type, panel request ignored")]
    UnknownType { type_id: NodeId },

    /// `toggle_filter_tag` with a tag outside the catalog
    #[error("filter tag {tag:?} is not in the catalog, toggle ignored")]
    UnknownFilterTag { tag: String },
}

/// Coarse category of a [`Diagnostic`], for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    NamingConventionViolation,
    EmptyName,
    MissingOptionName,
    MissingFilterTag,
    EmptyType,
    DuplicateFilterRoot,
    DuplicateSceneRoot,
    DuplicateTypeName,
    DuplicateFilterTag,
    UnknownSelection,
    UnknownType,
    UnknownFilterTag,
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::NamingConventionViolation { .. } => DiagnosticKind::NamingConventionViolation,
            Diagnostic::EmptyName { .. } => DiagnosticKind::EmptyName,
            Diagnostic::MissingOptionName { .. } => DiagnosticKind::MissingOptionName,
            Diagnostic::MissingFilterTag { .. } => DiagnosticKind::MissingFilterTag,
            Diagnostic::EmptyType { .. } => DiagnosticKind::EmptyType,
            Diagnostic::DuplicateFilterRoot { .. } => DiagnosticKind::DuplicateFilterRoot,
            Diagnostic::DuplicateSceneRoot { .. } => DiagnosticKind::DuplicateSceneRoot,
            Diagnostic::DuplicateTypeName { .. } => DiagnosticKind::DuplicateTypeName,
            Diagnostic::DuplicateFilterTag { .. } => DiagnosticKind::DuplicateFilterTag,
            Diagnostic::UnknownSelection { .. } => DiagnosticKind::UnknownSelection,
            Diagnostic::UnknownType { .. } => DiagnosticKind::UnknownType,
            Diagnostic::UnknownFilterTag { .. } => DiagnosticKind::UnknownFilterTag,
        }
    }

    /// Whether the problem is in the authored model rather than a runtime action
    pub fn is_authoring_issue(&self) -> bool {
        !matches!(
            self.kind(),
            DiagnosticKind::UnknownSelection
                | DiagnosticKind::UnknownType
                | DiagnosticKind::UnknownFilterTag
        )
    }
}

/// Ordered log of diagnostics.
///
/// Unlimited by default. With [`Diagnostics::with_limit`] only the most recent
/// entries are retained; per-kind counts still cover everything recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    limit: Option<usize>,
    totals: HashMap<DiagnosticKind, usize>,
    evicted: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` entries, evicting the oldest
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Record a diagnostic. Authoring issues are logged at warn level,
    /// ignored actions at debug level.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_authoring_issue() {
            tracing::warn!("{}", diagnostic);
        } else {
            tracing::debug!("{}", diagnostic);
        }
        *self.totals.entry(diagnostic.kind()).or_insert(0) += 1;
        self.entries.push(diagnostic);

        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
                self.evicted += excess;
            }
        }
    }

    /// Retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Entries evicted by the limit
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Everything ever recorded, evicted entries included
    pub fn total(&self) -> usize {
        self.entries.len() + self.evicted
    }

    /// Number of recorded entries of a kind, evicted entries included
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.totals.get(&kind).copied().unwrap_or(0)
    }

    pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.entries.contains(diagnostic)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
