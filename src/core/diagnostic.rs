//! Advisory diagnostics produced while leaving nodes.

use super::actor::{ActionId, ActorId};
use super::state::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reportable anomaly. Never blocks a transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The actor started a cast other than the one the node expected.
    UnexpectedCast {
        node: NodeId,
        actor: ActorId,
        observed: ActionId,
        expected: ActionId,
        expected_label: String,
    },

    /// The actor had no cast by the time the exit hook ran.
    CastVanished {
        node: NodeId,
        actor: ActorId,
        expected_label: String,
    },

    /// Message returned by a caller-supplied exit hook.
    Custom { node: NodeId, message: String },
}

impl Diagnostic {
    /// Node whose exit produced this diagnostic.
    pub fn node(&self) -> NodeId {
        match self {
            Self::UnexpectedCast { node, .. }
            | Self::CastVanished { node, .. }
            | Self::Custom { node, .. } => *node,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCast {
                actor,
                observed,
                expected_label,
                ..
            } => write!(
                f,
                "Unexpected cast start for actor {actor:X}: got {observed}, expected {expected_label}"
            ),
            Self::CastVanished {
                actor,
                expected_label,
                ..
            } => write!(
                f,
                "Cast for actor {actor:X} ended before exit check, expected {expected_label}"
            ),
            Self::Custom { message, .. } => f.write_str(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_cast_message_names_both_actions() {
        let diag = Diagnostic::UnexpectedCast {
            node: NodeId(0),
            actor: ActorId(0x1F),
            observed: ActionId(7),
            expected: ActionId(5),
            expected_label: "Slam".to_string(),
        };

        assert_eq!(
            diag.to_string(),
            "Unexpected cast start for actor 1F: got 7, expected Slam"
        );
        assert_eq!(diag.node(), NodeId(0));
    }

    #[test]
    fn custom_message_is_verbatim() {
        let diag = Diagnostic::Custom {
            node: NodeId(3),
            message: "add spawned late".to_string(),
        };
        assert_eq!(diag.to_string(), "add spawned late");
    }
}
