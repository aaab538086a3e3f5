//! # uritrie
//!
//! **uritrie** is a URI-matching trie for dispatching requests to registered
//! controllers based on path patterns. It supports literal segments, named
//! path parameters with optional literal prefixes and suffixes,
//! regex-constrained parameters, and catch-all suffixes, and it also runs
//! the inverse direction: rebuilding a concrete URI from a controller id and
//! a set of parameter values.
//!
//! ## Pattern mini-language
//!
//! Applied per `/`-delimited segment of a registered route string:
//!
//! | Syntax | Matcher | Notes |
//! |---|---|---|
//! | `literal` | exact | any text without a param grammar |
//! | `{name}` | path param | optional literal prefix/suffix outside braces |
//! | `{name:regex}` | regex param | regex auto-anchored with `^…$` |
//! | `**` | catch-all | unnamed, consumes the rest of the path |
//! | `{*name}` | catch-all | named, consumes the rest of the path |
//!
//! ## Modules
//!
//! - **[`router`]** - the public façade: register, match, reverse-generate,
//!   enumerate
//! - **[`trie`]** - the node tree, insertion, the lazy match iterator
//! - **[`node`]** - segment matcher variants and their priorities
//! - **[`factory`]** - the segment grammar parser
//! - **[`controller`]** - the controller trait and convenience wrappers
//! - **[`params`]** - extracted parameters and copy-on-write accumulators
//! - **[`strlib`]** - segment splitting and raw param extraction
//! - **[`errors`]** - the error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use uritrie::{BasicController, Controller, Router};
//!
//! # fn main() -> Result<(), uritrie::RouterError> {
//! let mut router = Router::new();
//! router.add_route(
//!     "/catalog/toys/cars/{make}/{model}",
//!     BasicController::new("cars_handler", "C1"),
//! )?;
//!
//! let m = router.find_route("/catalog/toys/cars/honda/crv").unwrap();
//! assert_eq!(m.controller().id(), "C1");
//! assert_eq!(m.params.get("make"), Some("honda"));
//! assert_eq!(m.params.get("model"), Some("crv"));
//!
//! let mut params = HashMap::new();
//! params.insert("make".to_string(), "honda".to_string());
//! params.insert("model".to_string(), "crv".to_string());
//! assert_eq!(router.make_uri("C1", &params)?, "/catalog/toys/cars/honda/crv");
//! # Ok(())
//! # }
//! ```
//!
//! ## Match ordering
//!
//! Sibling nodes are tried in descending priority order (exact before regex
//! param before plain param before catch-all, with longer literal affixes
//! winning within a kind), so `find_route` is deterministic and the most
//! specific registered pattern always wins. `find_routes` exposes the full
//! ordered sequence lazily.
//!
//! ## Concurrency
//!
//! Registration is a start-up activity; the router performs no internal
//! locking. A match call produces only call-local state, so any number of
//! concurrent matches may run against a router that is no longer being
//! mutated.

pub mod controller;
pub mod errors;
pub mod factory;
pub mod node;
pub mod params;
pub mod router;
pub mod strlib;
pub mod trie;

pub use controller::{BasicController, Controller, UniqueController};
pub use errors::RouterError;
pub use node::{NodeId, NodeKind, CATCH_ALL_PARAM_NAME};
pub use params::{ExtractedParam, RegexParams, UriParams, MAX_INLINE_PARAMS};
pub use router::{RouteInfo, Router};
pub use trie::{MatchIter, RouteMatch, Trie};
