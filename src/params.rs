//! Extracted path parameters and the copy-on-write accumulator passed down
//! a match traversal.
//!
//! Every node that extracts a parameter produces a *new* [`UriParams`]
//! (clone-and-extend), never mutating the set passed in. A failed match in
//! one branch therefore cannot leak extracted values into a sibling branch.

use serde::Serialize;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most route patterns have well under 8 parameters, so the common case
/// stays on the stack.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the match hot path.
///
/// Param names are `Arc<str>` cloned from the static node tree; values are
/// per-match `String`s extracted from the URI.
pub type ParamVec = SmallVec<[ExtractedParam; MAX_INLINE_PARAMS]>;

/// One `(name, value)` pair extracted from a URI segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedParam {
    /// Parameter name, shared with the owning node
    pub name: Arc<str>,
    /// Value extracted from the matched URI
    pub value: String,
}

impl ExtractedParam {
    pub fn new(name: Arc<str>, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Capture groups produced by one regex-constrained segment.
///
/// `groups[0]` is the whole match; parenthesized groups follow in order.
/// Groups that did not participate in the match are recorded as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegexParams {
    /// Parameter name of the regex segment that produced the groups
    pub name: Arc<str>,
    /// Whole match followed by each capture group
    pub groups: SmallVec<[String; 3]>,
}

/// Ordered parameters accumulated root-to-leaf during one match attempt.
///
/// Immutable per attempt: [`UriParams::with_param`] and
/// [`UriParams::with_regex_param`] return extended copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UriParams {
    /// `(name, value)` pairs in extraction order
    pub path_params: ParamVec,
    /// Regex capture groups keyed by the extracting segment's param name
    pub regex_params: SmallVec<[RegexParams; 2]>,
}

impl UriParams {
    /// Empty parameter set, the seed for a fresh match traversal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter value by name.
    ///
    /// Last write wins: with duplicate names at different depths the deepest
    /// extraction is returned. The trie rejects duplicate names along one
    /// path at registration time, so this only matters for hand-built sets.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|p| p.name.as_ref() == name)
            .map(|p| p.value.as_str())
    }

    /// Capture groups recorded by the regex segment named `name`.
    pub fn regex_groups(&self, name: &str) -> Option<&[String]> {
        self.regex_params
            .iter()
            .rfind(|r| r.name.as_ref() == name)
            .map(|r| r.groups.as_slice())
    }

    /// Number of extracted path parameters.
    pub fn len(&self) -> usize {
        self.path_params.len()
    }

    /// True when no parameter has been extracted yet.
    pub fn is_empty(&self) -> bool {
        self.path_params.is_empty()
    }

    /// Copy-on-write extension with one extracted parameter.
    pub fn with_param(&self, param: ExtractedParam) -> Self {
        let mut copied = self.clone();
        copied.path_params.push(param);
        copied
    }

    /// Copy-on-write extension with one extracted parameter plus the capture
    /// groups its regex produced.
    pub fn with_regex_param(&self, param: ExtractedParam, regex_params: RegexParams) -> Self {
        let mut copied = self.clone();
        copied.path_params.push(param);
        copied.regex_params.push(regex_params);
        copied
    }
}
