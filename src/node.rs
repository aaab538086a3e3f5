//! Trie node kinds and per-segment behavior.
//!
//! The four concrete segment matchers plus the root form a closed set of
//! variants selected by [`NodeKind`]. Each variant owns the matching and
//! URI-building logic for one segment shape; the tree algorithms in
//! [`crate::trie`] never need to know which variant they are talking to.
//!
//! ## Priorities
//!
//! Children of a node are kept sorted descending by priority so that more
//! specific matchers are always tried before more general ones:
//!
//! | Kind            | Base priority |
//! |-----------------|---------------|
//! | Exact           | 100^4         |
//! | PathParamRegex  | 100^3         |
//! | PathParam       | 100^2         |
//! | CatchAll        | 100^1         |
//! | Root            | 100^0         |
//!
//! Prefix and suffix lengths are added on top so that among two param nodes
//! the more constrained one wins, but the base is large enough that no
//! affix length can ever promote a node past the next kind up.

use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::RouterError;
use crate::params::{ExtractedParam, RegexParams, UriParams};
use crate::strlib::extract_uri_param;

/// Index of a node inside the trie's arena.
///
/// Parent links are stored as ids, never as owning references; they are used
/// only for ancestor-param validation and the reverse walks that rebuild
/// URIs and pattern text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Sentinel segment text (and param name) of an unnamed catch-all.
pub const CATCH_ALL_PARAM_NAME: &str = "**";

const PRIORITY_BASE: u64 = 100;

/// The closed set of segment matcher variants.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Tree root; matches nothing itself, only delegates to children.
    Root,
    /// Consumes the entire remaining input as `param_name`.
    CatchAll {
        param_name: Arc<str>,
    },
    /// Extracts a parameter between a literal prefix and suffix.
    PathParam {
        param_name: Arc<str>,
        prefix: String,
        suffix: String,
    },
    /// A [`NodeKind::PathParam`] whose extracted value must additionally
    /// satisfy an anchored regex. `source` keeps the pattern body as written
    /// so the original route text can be reconstructed.
    PathParamRegex {
        param_name: Arc<str>,
        prefix: String,
        suffix: String,
        regex: Regex,
        source: String,
    },
    /// Matches a literal segment verbatim.
    Exact {
        pattern: String,
    },
}

/// Outcome of testing one node kind against the head of the remaining input.
#[derive(Debug)]
pub(crate) enum SegmentMatch<'u> {
    /// Segment did not match; the node and its subtree are skipped.
    None,
    /// Segment consumed the whole remaining input; the node's own
    /// controllers are the match result.
    Terminal { params: UriParams },
    /// Segment matched with input left over; children take the rest.
    Descend { rest: &'u str, params: UriParams },
}

impl NodeKind {
    fn ordinal(&self) -> u32 {
        match self {
            NodeKind::Root => 0,
            NodeKind::CatchAll { .. } => 1,
            NodeKind::PathParam { .. } => 2,
            NodeKind::PathParamRegex { .. } => 3,
            NodeKind::Exact { .. } => 4,
        }
    }

    /// Sort key among siblings: kind base plus affix lengths.
    pub fn priority(&self) -> u64 {
        let base = PRIORITY_BASE.pow(self.ordinal());
        match self {
            NodeKind::PathParam { prefix, suffix, .. }
            | NodeKind::PathParamRegex { prefix, suffix, .. } => {
                base + prefix.len() as u64 + suffix.len() as u64
            }
            _ => base,
        }
    }

    /// Name of the parameter this kind extracts, if any.
    pub fn param_name(&self) -> Option<&Arc<str>> {
        match self {
            NodeKind::CatchAll { param_name }
            | NodeKind::PathParam { param_name, .. }
            | NodeKind::PathParamRegex { param_name, .. } => Some(param_name),
            _ => None,
        }
    }

    /// Structural equality used by insertion to merge equivalent children.
    ///
    /// A trie keeps at most one catch-all per parent, so catch-alls compare
    /// equal by kind alone regardless of param name.
    pub fn equals(&self, other: &NodeKind) -> bool {
        match (self, other) {
            (NodeKind::Root, NodeKind::Root) => true,
            (NodeKind::CatchAll { .. }, NodeKind::CatchAll { .. }) => true,
            (
                NodeKind::PathParam { prefix, suffix, .. },
                NodeKind::PathParam {
                    prefix: other_prefix,
                    suffix: other_suffix,
                    ..
                },
            ) => prefix == other_prefix && suffix == other_suffix,
            (
                NodeKind::PathParamRegex {
                    prefix,
                    suffix,
                    regex,
                    ..
                },
                NodeKind::PathParamRegex {
                    prefix: other_prefix,
                    suffix: other_suffix,
                    regex: other_regex,
                    ..
                },
            ) => {
                prefix == other_prefix
                    && suffix == other_suffix
                    && regex.as_str() == other_regex.as_str()
            }
            (NodeKind::Exact { pattern }, NodeKind::Exact { pattern: other_pattern }) => {
                pattern == other_pattern
            }
            _ => false,
        }
    }

    /// Unique textual name, used in error messages and logging.
    pub fn name(&self) -> String {
        match self {
            NodeKind::Root => "Root".to_string(),
            NodeKind::CatchAll { param_name } => format!("CatchAll::{param_name}"),
            NodeKind::PathParam {
                param_name,
                prefix,
                suffix,
            } => format!("PathParam::{param_name}::'{prefix}'::'{suffix}'"),
            NodeKind::PathParamRegex {
                param_name,
                prefix,
                suffix,
                regex,
                ..
            } => format!(
                "PathParamRegex::{param_name}::'{}'::'{prefix}'::'{suffix}'",
                regex.as_str()
            ),
            NodeKind::Exact { pattern } => format!("ExactMatch::{pattern}"),
        }
    }

    /// Test this kind against the head of `input`.
    pub(crate) fn match_segment<'u>(&self, input: &'u str, params: &UriParams) -> SegmentMatch<'u> {
        match self {
            NodeKind::Root => SegmentMatch::Descend {
                rest: input,
                params: params.clone(),
            },
            NodeKind::Exact { pattern } => {
                if let Some(rest) = input.strip_prefix(pattern.as_str()) {
                    if rest.is_empty() {
                        SegmentMatch::Terminal {
                            params: params.clone(),
                        }
                    } else {
                        SegmentMatch::Descend {
                            rest,
                            params: params.clone(),
                        }
                    }
                } else {
                    SegmentMatch::None
                }
            }
            NodeKind::PathParam {
                param_name,
                prefix,
                suffix,
            } => match extract_uri_param(input, prefix, suffix) {
                Some(extracted) => {
                    let params = params.with_param(ExtractedParam::new(
                        Arc::clone(param_name),
                        extracted.value,
                    ));
                    if extracted.rest.is_empty() {
                        SegmentMatch::Terminal { params }
                    } else {
                        SegmentMatch::Descend {
                            rest: extracted.rest,
                            params,
                        }
                    }
                }
                None => SegmentMatch::None,
            },
            NodeKind::PathParamRegex {
                param_name,
                prefix,
                suffix,
                regex,
                ..
            } => match extract_uri_param(input, prefix, suffix) {
                Some(extracted) => match regex.captures(extracted.value) {
                    Some(captures) => {
                        let groups = captures
                            .iter()
                            .map(|group| {
                                group.map(|m| m.as_str().to_string()).unwrap_or_default()
                            })
                            .collect();
                        let params = params.with_regex_param(
                            ExtractedParam::new(Arc::clone(param_name), extracted.value),
                            RegexParams {
                                name: Arc::clone(param_name),
                                groups,
                            },
                        );
                        if extracted.rest.is_empty() {
                            SegmentMatch::Terminal { params }
                        } else {
                            SegmentMatch::Descend {
                                rest: extracted.rest,
                                params,
                            }
                        }
                    }
                    // Value fails the pattern: a non-match, not an error, so
                    // sibling alternatives still get a chance.
                    None => SegmentMatch::None,
                },
                None => SegmentMatch::None,
            },
            NodeKind::CatchAll { param_name } => SegmentMatch::Terminal {
                params: params
                    .with_param(ExtractedParam::new(Arc::clone(param_name), input)),
            },
        }
    }

    /// This node's contribution to a reverse-generated URI.
    pub(crate) fn make_uri_segment(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<String, RouterError> {
        match self {
            NodeKind::Root => Ok(String::new()),
            NodeKind::Exact { pattern } => Ok(pattern.clone()),
            NodeKind::PathParam {
                param_name,
                prefix,
                suffix,
            } => {
                let value = params.get(param_name.as_ref()).ok_or_else(|| {
                    RouterError::MakeUriMissingParam {
                        node: self.name(),
                        param_name: param_name.to_string(),
                    }
                })?;
                Ok(format!("{prefix}{value}{suffix}"))
            }
            NodeKind::PathParamRegex {
                param_name,
                prefix,
                suffix,
                regex,
                ..
            } => {
                let value = params.get(param_name.as_ref()).ok_or_else(|| {
                    RouterError::MakeUriMissingParam {
                        node: self.name(),
                        param_name: param_name.to_string(),
                    }
                })?;
                if !regex.is_match(value) {
                    return Err(RouterError::MakeUriRegexFail {
                        node: self.name(),
                        param_name: param_name.to_string(),
                        value: value.clone(),
                        pattern: regex.as_str().to_string(),
                    });
                }
                Ok(format!("{prefix}{value}{suffix}"))
            }
            NodeKind::CatchAll { param_name } => params
                .get(param_name.as_ref())
                .cloned()
                .ok_or_else(|| RouterError::MakeUriMissingParam {
                    node: self.name(),
                    param_name: param_name.to_string(),
                }),
        }
    }

    /// This node's contribution to the reconstructed route pattern text.
    ///
    /// Regex segments render the pattern body as originally written, not the
    /// anchored form the matcher compiled.
    pub(crate) fn uri_template(&self) -> String {
        match self {
            NodeKind::Root => String::new(),
            NodeKind::Exact { pattern } => pattern.clone(),
            NodeKind::PathParam {
                param_name,
                prefix,
                suffix,
            } => format!("{prefix}{{{param_name}}}{suffix}"),
            NodeKind::PathParamRegex {
                param_name,
                prefix,
                suffix,
                source,
                ..
            } => format!("{prefix}{{{param_name}:{source}}}{suffix}"),
            NodeKind::CatchAll { param_name } => {
                if param_name.as_ref() == CATCH_ALL_PARAM_NAME {
                    CATCH_ALL_PARAM_NAME.to_string()
                } else {
                    format!("{{*{param_name}}}")
                }
            }
        }
    }
}

/// One vertex of the trie.
///
/// The arena in [`crate::trie::Trie`] owns all nodes; children and the
/// parent back-reference are arena indices.
#[derive(Debug, Clone)]
pub struct Node<C> {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    /// Child ids, sorted descending by the child's priority
    pub(crate) children: Vec<NodeId>,
    /// Controllers, sorted descending by priority
    pub(crate) controllers: Vec<C>,
}

impl<C> Node<C> {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            controllers: Vec::new(),
        }
    }

    /// The segment matcher variant of this node.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Textual name used in errors and logging.
    pub fn name(&self) -> String {
        self.kind.name()
    }

    /// Controllers on this node, highest priority first.
    pub fn controllers(&self) -> &[C] {
        &self.controllers
    }
}
