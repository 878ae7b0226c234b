//! Naming-convention grammar for scene nodes
//!
//! Model authors encode the picker's structure in node names. This module is
//! the only place that looks at those strings; everything downstream works
//! with the typed values produced here.
//!
//! ```text
//! GLTF_SceneRootNode
//! +-- Leg                          (type)
//! |   +-- Leg ModernA_01           (option "ModernA", no tags)
//! |   +-- Leg Classic # woven_02   (option "Classic", tags {woven})
//! +-- #                            (filter group)
//!     +-- # woven_03               (filter tag "woven")
//!     +-- carved_04                (filter tag "carved")
//! ```
//!
//! The viewer appends a `_NN` disambiguation suffix to every name, so the
//! display name is everything before the first suffix delimiter. Authored
//! names never contain the delimiter themselves.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::PickerConfig;

/// Default token that marks the filter group and separates option tags
pub const DEFAULT_FILTER_MARKER: &str = "#";

/// Default delimiter of the viewer-appended suffix
pub const DEFAULT_SUFFIX_DELIMITER: char = '_';

/// Errors produced while parsing or interpreting a node name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("name {raw_name:?} has no tokens")]
    EmptyName { raw_name: String },

    #[error("option {raw_name:?} does not start with its type name {expected:?}")]
    TypeMismatch { raw_name: String, expected: String },

    #[error("option {raw_name:?} has no option name after the type token")]
    MissingOptionName { raw_name: String },

    #[error("filter tag node {raw_name:?} has no tag token")]
    MissingFilterTag { raw_name: String },
}

/// Tokenized display name of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameToken {
    /// Original raw name, kept for diagnostics
    pub raw_name: String,
    /// First token
    pub primary: String,
    /// Remaining tokens, in order
    pub rest: Vec<String>,
}

impl NameToken {
    /// All tokens including the primary one
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.rest.iter().map(String::as_str))
    }
}

/// Position of a node in the picker taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Type,
    Option,
    FilterGroup,
    FilterTag,
}

/// What a node hangs under, which decides how it is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentContext<'a> {
    SceneRoot,
    FilterGroup,
    Type(&'a str),
}

/// A classified node name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: NodeKind,
    pub token: NameToken,
}

/// Option name and tags extracted from an option's tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionParts {
    /// Display name: tokens between the type token and the filter marker
    pub name: String,
    /// Tags after the filter marker
    pub filter_tags: BTreeSet<String>,
}

/// Parser for the node naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameGrammar {
    filter_marker: String,
    suffix_delimiter: char,
}

impl Default for NameGrammar {
    fn default() -> Self {
        Self {
            filter_marker: DEFAULT_FILTER_MARKER.to_string(),
            suffix_delimiter: DEFAULT_SUFFIX_DELIMITER,
        }
    }
}

impl NameGrammar {
    pub fn new(filter_marker: impl Into<String>, suffix_delimiter: char) -> Self {
        Self {
            filter_marker: filter_marker.into(),
            suffix_delimiter,
        }
    }

    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(config.filter_marker.clone(), config.suffix_delimiter)
    }

    pub fn filter_marker(&self) -> &str {
        &self.filter_marker
    }

    pub fn is_filter_marker(&self, token: &str) -> bool {
        token == self.filter_marker
    }

    /// Strip the viewer suffix: `"Leg ModernA_01"` -> `"Leg ModernA"`
    pub fn display_name<'a>(&self, raw_name: &'a str) -> &'a str {
        raw_name
            .split(self.suffix_delimiter)
            .next()
            .unwrap_or_default()
    }

    /// Split a raw node name into tokens.
    pub fn parse(&self, raw_name: &str) -> Result<NameToken, GrammarError> {
        let mut tokens = self.display_name(raw_name).split_whitespace();
        let primary = tokens.next().ok_or_else(|| GrammarError::EmptyName {
            raw_name: raw_name.to_string(),
        })?;

        Ok(NameToken {
            raw_name: raw_name.to_string(),
            primary: primary.to_string(),
            rest: tokens.map(str::to_string).collect(),
        })
    }

    /// Classify a token by its shape and where it hangs in the hierarchy.
    pub fn classify(&self, token: NameToken, parent: ParentContext<'_>) -> Classified {
        let kind = match parent {
            ParentContext::FilterGroup => NodeKind::FilterTag,
            ParentContext::Type(_) => NodeKind::Option,
            ParentContext::SceneRoot if self.is_filter_marker(&token.primary) => {
                NodeKind::FilterGroup
            }
            ParentContext::SceneRoot => NodeKind::Type,
        };
        Classified { kind, token }
    }

    /// Extract the option name and filter tags of an option under `type_name`.
    pub fn option_parts(
        &self,
        token: &NameToken,
        type_name: &str,
    ) -> Result<OptionParts, GrammarError> {
        if token.primary != type_name {
            return Err(GrammarError::TypeMismatch {
                raw_name: token.raw_name.clone(),
                expected: type_name.to_string(),
            });
        }

        let marker = token
            .rest
            .iter()
            .position(|t| self.is_filter_marker(t))
            .unwrap_or(token.rest.len());

        let name = token.rest[..marker].join(" ");
        if name.is_empty() {
            return Err(GrammarError::MissingOptionName {
                raw_name: token.raw_name.clone(),
            });
        }

        let filter_tags = token
            .rest
            .iter()
            .skip(marker + 1)
            .filter(|t| !self.is_filter_marker(t))
            .cloned()
            .collect();

        Ok(OptionParts { name, filter_tags })
    }

    /// Tag declared by a child of the filter group.
    ///
    /// Authors write tags either bare (`carved`) or prefixed with the marker
    /// (`# woven`); the marker is skipped.
    pub fn filter_tag(&self, token: &NameToken) -> Result<String, GrammarError> {
        token
            .tokens()
            .find(|t| !self.is_filter_marker(t))
            .map(str::to_string)
            .ok_or_else(|| GrammarError::MissingFilterTag {
                raw_name: token.raw_name.clone(),
            })
    }
}
