use std::fmt;

/// Router configuration / lookup error
///
/// Every variant is a programmer or configuration error surfaced at the call
/// that detects it. A URI that simply matches no route is *not* an error:
/// matching returns an empty result instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Two equal controllers registered on the same node.
    ///
    /// Controller equality is checked symmetrically (`a.equals(b) ||
    /// b.equals(a)`) because some controllers intentionally report themselves
    /// equal to everything to force at-most-one-per-node semantics.
    DuplicateController {
        /// Name of the node the controller was being added to
        node: String,
        /// Id of the controller that was rejected
        controller_id: String,
        /// Id of the already-registered equal controller
        existing_id: String,
    },
    /// A new node's param name collides with an ancestor's param name.
    ///
    /// Along any root-to-leaf path every extracted parameter must have a
    /// unique name, otherwise a later extraction would shadow an earlier one.
    NonUniqueParam {
        /// The colliding parameter name
        param_name: String,
        /// Name of the ancestor node that already owns the name
        node: String,
    },
    /// Attempted to attach a child node to a catch-all node.
    ///
    /// A catch-all consumes the entire remaining path, so a child below it
    /// could never be reached.
    AddChildToCatchAll {
        /// Name of the catch-all node
        node: String,
        /// Name of the child node that was rejected
        child: String,
    },
    /// Reverse URI generation lacks a required parameter value.
    MakeUriMissingParam {
        /// Name of the node that needed the value
        node: String,
        /// The missing parameter name
        param_name: String,
    },
    /// The value supplied for reverse URI generation fails the node's
    /// compiled pattern.
    MakeUriRegexFail {
        /// Name of the node that rejected the value
        node: String,
        /// The parameter name
        param_name: String,
        /// The supplied value
        value: String,
        /// Source of the compiled pattern the value failed
        pattern: String,
    },
    /// Reverse lookup by controller id found nothing.
    ControllerNotFound {
        /// The id that was looked up
        controller_id: String,
    },
    /// A route pattern segment could not be parsed, or a regex body inside a
    /// segment failed to compile.
    InvalidPattern {
        /// The offending segment text
        segment: String,
        /// Why it was rejected
        reason: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::DuplicateController {
                node,
                controller_id,
                existing_id,
            } => {
                write!(
                    f,
                    "Cannot add controller '{}' to node '{}' because equal controller '{}' already exists",
                    controller_id, node, existing_id
                )
            }
            RouterError::NonUniqueParam { param_name, node } => {
                write!(
                    f,
                    "URI params must be unique. Non-unique param '{}' already used by node '{}'",
                    param_name, node
                )
            }
            RouterError::AddChildToCatchAll { node, child } => {
                write!(
                    f,
                    "Catch-all node '{}' cannot have child nodes. Attempted to add node '{}'",
                    node, child
                )
            }
            RouterError::MakeUriMissingParam { node, param_name } => {
                write!(
                    f,
                    "Cannot generate uri for node '{}': params are missing property '{}'",
                    node, param_name
                )
            }
            RouterError::MakeUriRegexFail {
                node,
                param_name,
                value,
                pattern,
            } => {
                write!(
                    f,
                    "Cannot generate uri for node '{}': value '{}' of param '{}' does not pass regex '{}'",
                    node, value, param_name, pattern
                )
            }
            RouterError::ControllerNotFound { controller_id } => {
                write!(f, "Controller with id '{}' not found", controller_id)
            }
            RouterError::InvalidPattern { segment, reason } => {
                write!(
                    f,
                    "Cannot construct node from segment '{}': {}",
                    segment, reason
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}
