//! Public router façade over the trie.
//!
//! A [`Router`] owns one trie rooted at a root node and exposes the five
//! core operations: register a route, find the best match, find all
//! matches, generate a URI for a registered controller, and enumerate the
//! registered routes. It carries no other state; an HTTP-method dispatch
//! layer wanting one trie per method simply owns several routers.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::controller::Controller;
use crate::errors::RouterError;
use crate::node::NodeId;
use crate::trie::{MatchIter, RouteMatch, Trie};

/// One registered route: the reconstructed pattern text and its controller.
#[derive(Debug)]
pub struct RouteInfo<'t, C> {
    /// Original pattern text, rebuilt from the node chain
    pub pattern: String,
    /// The registered controller
    pub controller: &'t C,
}

/// URI router: pattern registration, ordered matching, reverse URI
/// generation.
///
/// Registration happens during application start-up; afterwards the router
/// is intended to be read-only. Matching allocates only per-call state, so
/// concurrent matches against a stable router are safe.
#[derive(Debug, Clone)]
pub struct Router<C> {
    trie: Trie<C>,
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self { trie: Trie::new() }
    }
}

impl<C: Controller> Router<C> {
    /// Create an empty router.
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Register `pattern` with `controller`, returning the terminal node.
    ///
    /// Fatal on an unparseable segment, a param-name collision along the
    /// path, or a duplicate controller on the terminal node.
    pub fn add_route(&mut self, pattern: &str, controller: C) -> Result<NodeId, RouterError> {
        let controller_id = controller.id().to_string();
        let node = self.trie.add_route(pattern, controller)?;
        info!(pattern = %pattern, controller_id = %controller_id, "route registered");
        Ok(node)
    }

    /// First (highest-priority) match for `uri`, or `None`.
    ///
    /// Short-circuits: the rest of the tree is not explored once a match is
    /// found.
    pub fn find_route(&self, uri: &str) -> Option<RouteMatch<'_, C>> {
        let result = self.trie.find_route(uri);
        match &result {
            Some(found) => debug!(uri = %uri, %found, "route matched"),
            None => debug!(uri = %uri, "no route matched"),
        }
        result
    }

    /// Lazy, ordered sequence of every match for `uri`.
    ///
    /// Restartable: each call begins a fresh traversal.
    pub fn find_routes<'t, 'u>(&'t self, uri: &'u str) -> MatchIter<'t, 'u, C> {
        debug!(uri = %uri, "find_routes");
        self.trie.find_routes(uri)
    }

    /// Generate a concrete URI for the controller registered under
    /// `controller_id`, substituting `params` into parameter segments.
    ///
    /// Fatal when the controller is unknown, a required value is missing,
    /// or a value fails a segment's regex.
    pub fn make_uri(
        &self,
        controller_id: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, RouterError> {
        let (node, _) = self.trie.node_by_controller_id(controller_id).ok_or_else(|| {
            RouterError::ControllerNotFound {
                controller_id: controller_id.to_string(),
            }
        })?;
        let uri = self.trie.make_uri(node, params)?;
        debug!(controller_id = %controller_id, uri = %uri, "uri generated");
        Ok(uri)
    }

    /// Every registered `(pattern, controller)` pair, one entry per
    /// controller, in depth-first registration order.
    ///
    /// Patterns are the original literal text (regex segments keep their
    /// body as written, not the anchored compiled form).
    pub fn all_routes(&self) -> Vec<RouteInfo<'_, C>> {
        self.trie
            .collect_controllers()
            .into_iter()
            .map(|(node, index)| RouteInfo {
                pattern: self.trie.uri_template(node),
                controller: &self.trie.node(node).controllers()[index],
            })
            .collect()
    }

    /// The registered route owning the first controller whose id matches.
    pub fn route_by_controller_id(&self, controller_id: &str) -> Option<RouteInfo<'_, C>> {
        self.trie
            .node_by_controller_id(controller_id)
            .map(|(node, index)| RouteInfo {
                pattern: self.trie.uri_template(node),
                controller: &self.trie.node(node).controllers()[index],
            })
    }

    /// Borrow the underlying trie.
    pub fn trie(&self) -> &Trie<C> {
        &self.trie
    }
}
