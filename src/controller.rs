//! Controller payloads attached to terminal trie nodes.
//!
//! The trie treats a controller as an opaque payload: it only needs an `id`
//! for reverse lookup and logging, a `priority` for ordering controllers on
//! one node, and an `equals` predicate used to reject duplicates at
//! registration time.

/// Payload attached to a terminal route node.
///
/// Implementations decide what "equal" means. Duplicate rejection on a node
/// checks the predicate both ways (`a.equals(b) || b.equals(a)`), so an
/// implementation that always returns `true` enforces at most one controller
/// per node (see [`UniqueController`]).
pub trait Controller {
    /// Identifier used for reverse URI lookup and logging.
    ///
    /// Need not be globally unique; `make_uri` by id returns the first
    /// controller found in registration-order depth-first traversal.
    fn id(&self) -> &str;

    /// Higher priority sorts first among controllers on the same node.
    fn priority(&self) -> i32 {
        1
    }

    /// Duplicate-detection predicate.
    fn equals(&self, other: &Self) -> bool;
}

/// Simple controller wrapping an arbitrary payload.
///
/// Two `BasicController`s are equal when their payloads are equal, so
/// registering the same payload twice on one node fails while distinct
/// payloads may share a node (and are returned in priority order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicController<T> {
    payload: T,
    id: String,
    priority: i32,
}

impl<T> BasicController<T> {
    /// Create a controller with the default priority of 1.
    pub fn new(payload: T, id: impl Into<String>) -> Self {
        Self::with_priority(payload, id, 1)
    }

    /// Create a controller with an explicit priority.
    pub fn with_priority(payload: T, id: impl Into<String>, priority: i32) -> Self {
        Self {
            payload,
            id: id.into(),
            priority,
        }
    }

    /// Borrow the wrapped payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }
}

impl<T: PartialEq> Controller for BasicController<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn equals(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

/// Controller that is unconditionally equal to any other controller.
///
/// Adding a `UniqueController` to a node that already has any controller, or
/// adding anything to a node that holds a `UniqueController`, fails with a
/// duplicate-controller error. Use it for routes that must have exactly one
/// handler.
#[derive(Debug, Clone)]
pub struct UniqueController<T> {
    payload: T,
    id: String,
    priority: i32,
}

impl<T> UniqueController<T> {
    /// Create a unique controller with the default priority of 1.
    pub fn new(payload: T, id: impl Into<String>) -> Self {
        Self {
            payload,
            id: id.into(),
            priority: 1,
        }
    }

    /// Borrow the wrapped payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }
}

impl<T> Controller for UniqueController<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn equals(&self, _other: &Self) -> bool {
        true
    }
}
