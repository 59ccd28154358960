//! Error types for RC-tree construction and queries.

use std::fmt;

/// The standard result type for RC-tree and net operations.
pub type RctResult<T> = Result<T, RctError>;

/// What kind of entity a failed lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// A node of an RC tree.
    Node,
    /// A terminal attached to a net.
    Terminal,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Node => f.write_str("node"),
            LookupKind::Terminal => f.write_str("terminal"),
        }
    }
}

/// Errors raised by RC-tree evaluation and name-indexed queries.
///
/// Structural problems (a node with two incoming edges, nodes unreachable from
/// the root) are not errors: evaluation leaves the affected nodes at zero.
/// Use [`RcTree::check_structure`](crate::RcTree::check_structure) to find them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RctError {
    /// A node or terminal name was not found.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// The kind of entity that was looked up.
        kind: LookupKind,
        /// The name that was looked up.
        name: String,
    },

    /// The RC tree has no nodes, so there is nothing to evaluate from.
    #[error("rc tree has no root node")]
    MissingRoot,

    /// The net's driver terminal does not name any node of its RC tree.
    #[error("driver '{driver}' of net '{net}' has no node in the rc tree")]
    RootNotInTree {
        /// The net name.
        net: String,
        /// The driver terminal name.
        driver: String,
    },
}

impl RctError {
    pub(crate) fn node_not_found(name: &str) -> Self {
        RctError::NotFound {
            kind: LookupKind::Node,
            name: name.to_string(),
        }
    }

    pub(crate) fn terminal_not_found(name: &str) -> Self {
        RctError::NotFound {
            kind: LookupKind::Terminal,
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = RctError::node_not_found("n7");
        assert_eq!(format!("{err}"), "node 'n7' not found");
        let err = RctError::terminal_not_found("u1:A");
        assert_eq!(format!("{err}"), "terminal 'u1:A' not found");
    }

    #[test]
    fn display_missing_root() {
        assert_eq!(format!("{}", RctError::MissingRoot), "rc tree has no root node");
    }

    #[test]
    fn display_root_not_in_tree() {
        let err = RctError::RootNotInTree {
            net: "n1".to_string(),
            driver: "u0:Z".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "driver 'u0:Z' of net 'n1' has no node in the rc tree"
        );
    }
}
