//! State nodes: the atomic unit of a chain.
//!
//! A node carries a display name, a nominal duration, the rule that decides
//! when it is done and an optional hook run on the way out. Rules and hooks
//! receive everything they need through a context value so nodes never
//! capture themselves.

use super::actor::{ActionId, ActorId, World};
use super::diagnostic::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside its chain's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inputs available to an update rule.
pub struct UpdateContext<'a> {
    pub node: NodeId,
    /// Seconds since the node became active
    pub elapsed: f32,
    pub world: &'a dyn World,
}

/// Inputs available to an exit hook.
pub struct ExitContext<'a> {
    pub node: NodeId,
    pub name: &'a str,
    /// Seconds spent in the node
    pub elapsed: f32,
    pub world: &'a dyn World,
}

/// Caller-supplied "done" predicate.
pub type UpdateFn = Box<dyn Fn(&UpdateContext<'_>) -> bool + Send + Sync>;

/// Caller-supplied exit hook. A returned message is reported as a diagnostic.
pub type ExitFn = Box<dyn Fn(&ExitContext<'_>) -> Option<String> + Send + Sync>;

/// Rule deciding whether the active node is done.
///
/// Every variant depends only on the elapsed time and the world snapshot,
/// so asking twice with the same inputs gives the same answer.
pub enum Update {
    /// Done once the elapsed time reaches the node's duration.
    Timeout,
    /// Done as soon as the actor is casting anything.
    CastStarted(ActorId),
    /// Done as soon as the actor is no longer casting.
    CastEnded(ActorId),
    Custom(UpdateFn),
}

impl Update {
    /// Evaluate the rule for a node with the given nominal duration.
    pub fn is_done(&self, duration: f32, ctx: &UpdateContext<'_>) -> bool {
        match self {
            Self::Timeout => ctx.elapsed >= duration,
            Self::CastStarted(actor) => ctx.world.is_casting(*actor),
            Self::CastEnded(actor) => !ctx.world.is_casting(*actor),
            Self::Custom(predicate) => predicate(ctx),
        }
    }
}

impl fmt::Debug for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("Timeout"),
            Self::CastStarted(actor) => f.debug_tuple("CastStarted").field(actor).finish(),
            Self::CastEnded(actor) => f.debug_tuple("CastEnded").field(actor).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Hook run exactly once when the driver leaves a node.
pub enum ExitHook {
    /// Check that the actor's cast is the expected action.
    ExpectCast {
        actor: ActorId,
        expected: ActionId,
        label: String,
    },
    Custom(ExitFn),
}

impl ExitHook {
    /// Run the hook, returning a diagnostic when something looks wrong.
    pub fn run(&self, ctx: &ExitContext<'_>) -> Option<Diagnostic> {
        match self {
            Self::ExpectCast {
                actor,
                expected,
                label,
            } => match ctx.world.cast_info(*actor) {
                Some(cast) if cast.action == *expected => None,
                Some(cast) => Some(Diagnostic::UnexpectedCast {
                    node: ctx.node,
                    actor: *actor,
                    observed: cast.action,
                    expected: *expected,
                    expected_label: label.clone(),
                }),
                None => Some(Diagnostic::CastVanished {
                    node: ctx.node,
                    actor: *actor,
                    expected_label: label.clone(),
                }),
            },
            Self::Custom(hook) => hook(ctx).map(|message| Diagnostic::Custom {
                node: ctx.node,
                message,
            }),
        }
    }
}

impl fmt::Debug for ExitHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectCast {
                actor,
                expected,
                label,
            } => f
                .debug_struct("ExpectCast")
                .field("actor", actor)
                .field("expected", expected)
                .field("label", label)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One step of a chain.
///
/// An empty name marks an internal substate, such as the cast-start half of
/// a cast sequence. Substates are traversed within the tick that reaches
/// them; named nodes are the phases a user sees.
#[derive(Debug)]
pub struct StateNode {
    pub(crate) name: String,
    pub(crate) duration: f32,
    pub(crate) update: Option<Update>,
    pub(crate) exit: Option<ExitHook>,
    pub(crate) next: Option<NodeId>,
}

impl StateNode {
    pub(crate) fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            update: None,
            exit: None,
            next: None,
        }
    }

    /// Display name. Empty for substates.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nominal duration in seconds. Used for display and estimates.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// True for internal nodes that carry no name.
    pub fn is_substate(&self) -> bool {
        self.name.is_empty()
    }

    /// Rule that decides when the node is done.
    pub fn update(&self) -> Option<&Update> {
        self.update.as_ref()
    }

    /// Hook run when the node is left.
    pub fn exit(&self) -> Option<&ExitHook> {
        self.exit.as_ref()
    }

    /// Node entered after this one. `None` ends the chain.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Evaluate the update rule. A node without one is never done.
    pub fn is_done(&self, ctx: &UpdateContext<'_>) -> bool {
        self.update
            .as_ref()
            .is_some_and(|rule| rule.is_done(self.duration, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actor::CastInfo;
    use std::collections::HashMap;

    fn ctx<'a>(elapsed: f32, world: &'a dyn World) -> UpdateContext<'a> {
        UpdateContext {
            node: NodeId(0),
            elapsed,
            world,
        }
    }

    #[test]
    fn empty_name_is_substate() {
        assert!(StateNode::new("", 1.0).is_substate());
        assert!(!StateNode::new("Cleave", 1.0).is_substate());
    }

    #[test]
    fn timeout_fires_at_duration() {
        let world: HashMap<ActorId, CastInfo> = HashMap::new();
        let rule = Update::Timeout;

        assert!(!rule.is_done(2.0, &ctx(1.99, &world)));
        assert!(rule.is_done(2.0, &ctx(2.0, &world)));
        assert!(rule.is_done(2.0, &ctx(5.0, &world)));
    }

    #[test]
    fn cast_rules_follow_world() {
        let boss = ActorId(10);
        let mut world: HashMap<ActorId, CastInfo> = HashMap::new();

        assert!(!Update::CastStarted(boss).is_done(0.0, &ctx(100.0, &world)));
        assert!(Update::CastEnded(boss).is_done(0.0, &ctx(0.0, &world)));

        world.insert(boss, CastInfo::new(1, 0.0));
        assert!(Update::CastStarted(boss).is_done(10.0, &ctx(0.0, &world)));
        assert!(!Update::CastEnded(boss).is_done(0.0, &ctx(0.0, &world)));
    }

    #[test]
    fn node_without_rule_is_never_done() {
        let world: HashMap<ActorId, CastInfo> = HashMap::new();
        let node = StateNode::new("Idle", 0.0);
        assert!(!node.is_done(&ctx(1000.0, &world)));
    }

    #[test]
    fn expect_cast_reports_mismatch_only() {
        let boss = ActorId(0xAB);
        let hook = ExitHook::ExpectCast {
            actor: boss,
            expected: ActionId(5),
            label: "Slam".to_string(),
        };
        let mut world: HashMap<ActorId, CastInfo> = HashMap::new();
        world.insert(boss, CastInfo::new(5, 0.0));

        let exit = |world: &HashMap<ActorId, CastInfo>| {
            hook.run(&ExitContext {
                node: NodeId(4),
                name: "",
                elapsed: 0.0,
                world,
            })
        };

        assert!(exit(&world).is_none());

        world.insert(boss, CastInfo::new(6, 0.0));
        assert!(matches!(
            exit(&world),
            Some(Diagnostic::UnexpectedCast {
                observed: ActionId(6),
                expected: ActionId(5),
                ..
            })
        ));

        world.clear();
        assert!(matches!(exit(&world), Some(Diagnostic::CastVanished { .. })));
    }

    #[test]
    fn custom_hook_message_becomes_diagnostic() {
        let world: HashMap<ActorId, CastInfo> = HashMap::new();
        let hook = ExitHook::Custom(Box::new(|ctx: &ExitContext<'_>| {
            (ctx.elapsed > 3.0).then(|| format!("{} ran long", ctx.name))
        }));

        let run = |elapsed| {
            hook.run(&ExitContext {
                node: NodeId(1),
                name: "Burn",
                elapsed,
                world: &world,
            })
        };

        assert!(run(1.0).is_none());
        assert_eq!(
            run(4.0),
            Some(Diagnostic::Custom {
                node: NodeId(1),
                message: "Burn ran long".to_string()
            })
        );
    }
}
