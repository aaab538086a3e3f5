//! The node trie: arena storage, route insertion, ordered lazy matching,
//! enumeration and reverse URI generation.
//!
//! All nodes live in one arena `Vec` and address each other by [`NodeId`];
//! the parent back-reference is an index used only for the two read-only
//! walks (ancestor param validation at insertion time, and the leaf-to-root
//! walks that rebuild URIs and pattern text). Forward matching never touches
//! parent links.
//!
//! Matching is a pull-based iterator over an explicit frame stack:
//! `find_route` stops the traversal at the first produced match,
//! `find_routes` drives it to exhaustion. Every call starts a fresh
//! traversal; there is no shared cursor between calls.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::controller::Controller;
use crate::errors::RouterError;
use crate::factory::parse_segment;
use crate::node::{Node, NodeId, NodeKind, SegmentMatch};
use crate::params::UriParams;
use crate::strlib::split_by_separator;

const ROOT: NodeId = NodeId(0);

/// The URI-matching trie.
///
/// Mutated only during route registration; matching and enumeration take
/// `&self` and allocate per-call state only, so concurrent reads of a
/// stable trie need no coordination.
#[derive(Debug, Clone)]
pub struct Trie<C> {
    nodes: Vec<Node<C>>,
}

impl<C> Default for Trie<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Trie<C> {
    /// Create a trie containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None)],
        }
    }

    /// Borrow a node by id.
    pub fn node(&self, id: NodeId) -> &Node<C> {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no route has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].controllers.is_empty()
    }

    /// Merge-or-create a child under `parent`.
    ///
    /// An existing child that is structurally equal absorbs the new node:
    /// this is how separately registered routes sharing a prefix segment end
    /// up sharing one trie node. Otherwise the new node's param name must
    /// not collide with any ancestor's, and the child list stays sorted
    /// descending by priority.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, RouterError> {
        let parent_node = &self.nodes[parent.0];

        if matches!(parent_node.kind, NodeKind::CatchAll { .. }) {
            return Err(RouterError::AddChildToCatchAll {
                node: parent_node.name(),
                child: kind.name(),
            });
        }

        if let Some(&existing) = parent_node
            .children
            .iter()
            .find(|&&child| self.nodes[child.0].kind.equals(&kind))
        {
            debug!(
                parent = %parent_node.name(),
                node = %kind.name(),
                existing = %self.nodes[existing.0].name(),
                "merging into equal child node"
            );
            return Ok(existing);
        }

        self.ensure_no_duplicate_params(parent, &kind)?;

        let priority = kind.priority();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));

        let position = {
            let children = &self.nodes[parent.0].children;
            children
                .iter()
                .position(|&child| self.nodes[child.0].kind.priority() < priority)
                .unwrap_or(children.len())
        };
        self.nodes[parent.0].children.insert(position, id);

        Ok(id)
    }

    /// Walk parent links from `parent` to the root, rejecting the new node's
    /// param name if any ancestor already extracts it.
    fn ensure_no_duplicate_params(
        &self,
        parent: NodeId,
        kind: &NodeKind,
    ) -> Result<(), RouterError> {
        let Some(param_name) = kind.param_name() else {
            return Ok(());
        };

        let mut current = Some(parent);
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if node.kind.param_name().map(|p| p.as_ref()) == Some(param_name.as_ref()) {
                return Err(RouterError::NonUniqueParam {
                    param_name: param_name.to_string(),
                    node: node.name(),
                });
            }
            current = node.parent;
        }
        Ok(())
    }
}

impl<C: Controller> Trie<C> {
    /// Add a controller to a node's priority-sorted list.
    ///
    /// The duplicate check runs both ways because some controllers make
    /// themselves unconditionally equal to enforce at-most-one-per-node.
    pub fn add_controller(&mut self, id: NodeId, controller: C) -> Result<(), RouterError> {
        let node = &self.nodes[id.0];

        if let Some(existing) = node
            .controllers
            .iter()
            .find(|existing| existing.equals(&controller) || controller.equals(existing))
        {
            return Err(RouterError::DuplicateController {
                node: node.name(),
                controller_id: controller.id().to_string(),
                existing_id: existing.id().to_string(),
            });
        }

        let priority = controller.priority();
        let controllers = &mut self.nodes[id.0].controllers;
        let position = controllers
            .iter()
            .position(|existing| existing.priority() < priority)
            .unwrap_or(controllers.len());
        controllers.insert(position, controller);
        Ok(())
    }

    /// Register a route pattern, returning the terminal node.
    ///
    /// The pattern is peeled into segments (each keeping its trailing
    /// separator), each segment parsed and merged-or-created as a child,
    /// and the controller attached to the last node. An empty pattern
    /// attaches the controller to the root.
    pub fn add_route(&mut self, pattern: &str, controller: C) -> Result<NodeId, RouterError> {
        if pattern.trim().is_empty() {
            self.add_controller(ROOT, controller)?;
            return Ok(ROOT);
        }

        let mut current = ROOT;
        let mut remaining = pattern;
        loop {
            let (head, tail) = split_by_separator(remaining);
            let kind = parse_segment(head)?;
            current = self.add_child(current, kind)?;
            if tail.is_empty() {
                self.add_controller(current, controller)?;
                return Ok(current);
            }
            remaining = tail;
        }
    }

    /// Lazily produce every match for `uri`, best first.
    ///
    /// The iterator is finite and restartable; dropping it after the first
    /// element short-circuits the rest of the traversal.
    pub fn find_routes<'t, 'u>(&'t self, uri: &'u str) -> MatchIter<'t, 'u, C> {
        MatchIter {
            trie: self,
            stack: vec![Frame {
                node: ROOT,
                input: uri,
                params: UriParams::new(),
            }],
        }
    }

    /// First (highest-priority) match for `uri`, if any.
    pub fn find_route<'t>(&'t self, uri: &str) -> Option<RouteMatch<'t, C>> {
        self.find_routes(uri).next()
    }

    /// Depth-first enumeration of every `(node, controller index)` pair, a
    /// node's own controllers before its children's.
    pub(crate) fn collect_controllers(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        self.collect_from(ROOT, &mut out);
        out
    }

    fn collect_from(&self, id: NodeId, out: &mut Vec<(NodeId, usize)>) {
        let node = &self.nodes[id.0];
        for index in 0..node.controllers.len() {
            out.push((id, index));
        }
        for &child in &node.children {
            self.collect_from(child, out);
        }
    }

    /// First controller (in enumeration order) whose id matches.
    pub(crate) fn node_by_controller_id(&self, controller_id: &str) -> Option<(NodeId, usize)> {
        self.find_controller_from(ROOT, controller_id)
    }

    fn find_controller_from(&self, id: NodeId, controller_id: &str) -> Option<(NodeId, usize)> {
        let node = &self.nodes[id.0];
        for (index, controller) in node.controllers.iter().enumerate() {
            if controller.id() == controller_id {
                return Some((id, index));
            }
        }
        node.children
            .iter()
            .find_map(|&child| self.find_controller_from(child, controller_id))
    }

    /// Rebuild a concrete URI for `node` by walking parent links to the
    /// root and concatenating each ancestor's contribution in root-to-leaf
    /// order.
    pub fn make_uri(
        &self,
        node: NodeId,
        params: &HashMap<String, String>,
    ) -> Result<String, RouterError> {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let n = &self.nodes[id.0];
            segments.push(n.kind.make_uri_segment(params)?);
            current = n.parent;
        }
        segments.reverse();
        Ok(segments.concat())
    }

    /// Rebuild the original pattern text for `node` via the same walk.
    pub(crate) fn uri_template(&self, node: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let n = &self.nodes[id.0];
            segments.push(n.kind.uri_template());
            current = n.parent;
        }
        segments.reverse();
        segments.concat()
    }
}

/// One pending traversal step: a node to test against the remaining input
/// with the params accumulated so far.
#[derive(Debug)]
struct Frame<'u> {
    node: NodeId,
    input: &'u str,
    params: UriParams,
}

/// Lazy, ordered sequence of matches for one URI.
///
/// Children are pushed in reverse priority order so the highest-priority
/// subtree is explored first; a subtree is fully exhausted before its next
/// sibling is tried.
pub struct MatchIter<'t, 'u, C> {
    trie: &'t Trie<C>,
    stack: Vec<Frame<'u>>,
}

impl<'t, 'u, C: Controller> Iterator for MatchIter<'t, 'u, C> {
    type Item = RouteMatch<'t, C>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let node = self.trie.node(frame.node);
            match node.kind.match_segment(frame.input, &frame.params) {
                SegmentMatch::None => {}
                SegmentMatch::Terminal { params } => {
                    // Terminal nodes without controllers are dead ends, not
                    // matches.
                    if !node.controllers.is_empty() {
                        return Some(RouteMatch {
                            trie: self.trie,
                            node: frame.node,
                            params,
                        });
                    }
                }
                SegmentMatch::Descend { rest, params } => {
                    for &child in node.children.iter().rev() {
                        self.stack.push(Frame {
                            node: child,
                            input: rest,
                            params: params.clone(),
                        });
                    }
                }
            }
        }
        None
    }
}

/// A successful match: the terminal node plus the parameters extracted on
/// the way to it.
pub struct RouteMatch<'t, C> {
    trie: &'t Trie<C>,
    node: NodeId,
    /// Parameters accumulated root-to-leaf
    pub params: UriParams,
}

impl<'t, C: Controller> RouteMatch<'t, C> {
    /// Id of the matched terminal node.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// The matched node.
    pub fn node(&self) -> &'t Node<C> {
        self.trie.node(self.node)
    }

    /// Controllers on the matched node, highest priority first. Never empty
    /// for matches produced by `find_routes`.
    pub fn controllers(&self) -> &'t [C] {
        &self.trie.node(self.node).controllers
    }

    /// The highest-priority controller on the matched node.
    ///
    /// A `RouteMatch` is only ever built for a node holding at least one
    /// controller, so the list head always exists.
    #[allow(clippy::expect_used)]
    pub fn controller(&self) -> &'t C {
        self.controllers()
            .first()
            .expect("matched node holds at least one controller")
    }

    /// The route pattern text that produced the matched node.
    pub fn uri_template(&self) -> String {
        self.trie.uri_template(self.node)
    }
}

impl<C: Controller> fmt::Display for RouteMatch<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.trie.node(self.node);
        let controller_ids: Vec<&str> = node.controllers.iter().map(Controller::id).collect();
        write!(
            f,
            "RouteMatch node={} controllers={:?} params={:?}",
            node.name(),
            controller_ids,
            self.params.path_params
        )
    }
}

impl<C: Controller> fmt::Debug for RouteMatch<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
