//! Segment grammar parser / node factory.
//!
//! Turns one URI pattern segment (the text between path separators, with the
//! separator still attached for non-terminal segments) into a [`NodeKind`].
//! The grammar rules are tried in a fixed priority order because a generic
//! rule would otherwise shadow a more specific one: catch-all first, then
//! regex-constrained params, then plain params, with a literal segment as
//! the fallback.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::errors::RouterError;
use crate::node::{NodeKind, CATCH_ALL_PARAM_NAME};

/// Named catch-all: `{*name}` where name is alphanumeric with `-` and `_`.
static CATCH_ALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{\*([a-zA-Z0-9_-]+)\}$").expect("catch-all grammar regex should be valid")
});

/// Plain param: optional brace- and separator-free prefix, `{name}` with
/// optional inner whitespace, optional brace-free suffix.
static PATH_PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^{}/]*)\{\s*([a-zA-Z0-9_-]+)\s*\}([^{}]*)$")
        .expect("path param grammar regex should be valid")
});

/// Regex param: like the plain param grammar but with `:pattern` after the
/// name. The pattern body is free-form and validated by compilation.
static PATH_PARAM_REGEX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^{}/]*)\{\s*([a-zA-Z0-9_-]+)\s*:(.*)\}([^{}]*)$")
        .expect("regex param grammar regex should be valid")
});

/// Parse one pattern segment into a node kind.
///
/// Rules are tried in fixed order: unnamed catch-all sentinel, named
/// catch-all, regex param, plain param, exact literal fallback. An
/// uncompilable regex body, or a segment no rule accepts, is an
/// [`RouterError::InvalidPattern`].
pub fn parse_segment(segment: &str) -> Result<NodeKind, RouterError> {
    let rules: [fn(&str) -> Result<Option<NodeKind>, RouterError>; 4] = [
        try_catch_all,
        try_regex_param,
        try_path_param,
        try_exact,
    ];

    for rule in rules {
        if let Some(kind) = rule(segment)? {
            return Ok(kind);
        }
    }

    Err(RouterError::InvalidPattern {
        segment: segment.to_string(),
        reason: "cannot construct node: segment matches no grammar rule".to_string(),
    })
}

fn try_catch_all(segment: &str) -> Result<Option<NodeKind>, RouterError> {
    if segment == CATCH_ALL_PARAM_NAME {
        return Ok(Some(NodeKind::CatchAll {
            param_name: Arc::from(CATCH_ALL_PARAM_NAME),
        }));
    }
    Ok(CATCH_ALL_RE.captures(segment).map(|captures| {
        NodeKind::CatchAll {
            param_name: Arc::from(captures[1].trim()),
        }
    }))
}

fn try_regex_param(segment: &str) -> Result<Option<NodeKind>, RouterError> {
    let Some(captures) = PATH_PARAM_REGEX_RE.captures(segment) else {
        return Ok(None);
    };
    let source = captures[3].trim().to_string();
    let regex = compile_anchored(&source).map_err(|e| RouterError::InvalidPattern {
        segment: segment.to_string(),
        reason: format!("regex body failed to compile: {e}"),
    })?;
    Ok(Some(NodeKind::PathParamRegex {
        param_name: Arc::from(captures[2].trim()),
        prefix: captures[1].to_string(),
        suffix: captures[4].to_string(),
        regex,
        source,
    }))
}

fn try_path_param(segment: &str) -> Result<Option<NodeKind>, RouterError> {
    Ok(PATH_PARAM_RE.captures(segment).map(|captures| {
        NodeKind::PathParam {
            param_name: Arc::from(captures[2].trim()),
            prefix: captures[1].to_string(),
            suffix: captures[3].to_string(),
        }
    }))
}

/// Literal fallback. Refuses the catch-all sentinel: that segment belongs to
/// the first rule, so seeing it here means the rule list is inconsistent.
fn try_exact(segment: &str) -> Result<Option<NodeKind>, RouterError> {
    if segment == CATCH_ALL_PARAM_NAME {
        return Ok(None);
    }
    Ok(Some(NodeKind::Exact {
        pattern: segment.to_string(),
    }))
}

/// Compile a regex body with `^`/`$` anchoring.
///
/// A `$` is still appended when the body ends with an escaped `\$`, since
/// that is a literal dollar sign rather than an anchor.
fn compile_anchored(source: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(source.len() + 2);
    if !source.starts_with('^') {
        pattern.push('^');
    }
    pattern.push_str(source);
    if !pattern.ends_with('$') || pattern.ends_with("\\$") {
        pattern.push('$');
    }
    Regex::new(&pattern)
}
