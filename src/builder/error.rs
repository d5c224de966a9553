//! Build errors for chain construction.

use crate::core::NodeId;
use thiserror::Error;

/// A problem with a single node, found while validating a chain.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChainViolation {
    #[error("Node {node} has no update rule. Call set_update() or use a specialised constructor")]
    MissingUpdate { node: NodeId },

    #[error("Node {node} has invalid duration {duration}")]
    InvalidDuration { node: NodeId, duration: f32 },

    #[error("Node {node} was attached to a link from a different builder")]
    ForeignLink { node: NodeId },

    #[error("Node {node} of a different builder was passed to set_update() or set_exit()")]
    ForeignTail { node: NodeId },
}

/// Errors that can occur when building a chain.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Chain is empty. Pass the root link to a constructor before .build()")]
    EmptyChain,

    #[error("Chain has {} invalid node(s): {}", violations.len(), join(violations))]
    InvalidChain { violations: Vec<ChainViolation> },
}

fn join(violations: &[ChainViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
