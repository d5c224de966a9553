//! Driver that advances a chain one tick at a time.

use crate::builder::Chain;
use crate::core::{
    ChainHistory, Diagnostic, ExitContext, NodeId, StateNode, TransitionRecord, UpdateContext,
    World,
};
use crate::driver::config::{ConfigError, DriverConfig};
use chrono::Utc;
use tracing::{debug, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Position {
    AtNode { node: NodeId, elapsed: f32 },
    Terminated,
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Transitions made, in order
    pub transitions: Vec<TransitionRecord>,
    /// Diagnostics raised by exit hooks
    pub diagnostics: Vec<Diagnostic>,
    /// Named node entered during this tick
    pub entered_phase: Option<NodeId>,
    /// The chain ran off its last node during this tick
    pub terminated: bool,
}

impl TickReport {
    /// True if at least one node was left during the tick.
    pub fn advanced(&self) -> bool {
        !self.transitions.is_empty()
    }
}

/// Owns a chain and the position within it.
///
/// # Example
///
/// ```rust
/// use phasechain::builder::ChainBuilder;
/// use phasechain::core::{ActorId, CastInfo};
/// use phasechain::driver::Driver;
/// use std::collections::HashMap;
///
/// let (mut builder, root) = ChainBuilder::new();
/// let warmup = builder.timeout(root, 1.0, "Warmup");
/// let _ = builder.timeout(warmup.next(), 2.0, "Burn");
/// let mut driver = Driver::new(builder.build().unwrap());
///
/// let world: HashMap<ActorId, CastInfo> = HashMap::new();
/// let report = driver.tick(1.0, &world);
/// assert_eq!(driver.current_node().unwrap().name(), "Burn");
/// assert!(report.entered_phase.is_some());
///
/// driver.tick(2.0, &world);
/// assert!(driver.is_terminated());
/// ```
#[derive(Debug)]
pub struct Driver {
    chain: Chain,
    position: Position,
    total: f32,
    history: ChainHistory,
    config: DriverConfig,
}

impl Driver {
    /// Start at the head of `chain` with the default config.
    pub fn new(chain: Chain) -> Self {
        Self::start(chain, DriverConfig::default())
    }

    /// Start at the head of `chain`, rejecting an invalid config.
    pub fn with_config(chain: Chain, config: DriverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(chain, config))
    }

    fn start(chain: Chain, config: DriverConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => ChainHistory::with_limit(limit),
            None => ChainHistory::new(),
        };
        Self {
            position: Position::AtNode {
                node: chain.head(),
                elapsed: 0.0,
            },
            chain,
            total: 0.0,
            history,
            config,
        }
    }

    /// Advance by `dt` seconds against the current world snapshot.
    ///
    /// Substates reached during the tick are evaluated immediately. A named
    /// node entered during the tick waits for the next one. Does nothing
    /// once the chain has terminated. A negative or non-finite `dt` is
    /// logged and treated as zero.
    ///
    /// Position, total time and history are committed together once the
    /// tick settles, so a panicking rule or hook leaves the driver where it
    /// was before the tick.
    pub fn tick(&mut self, dt: f32, world: &dyn World) -> TickReport {
        let mut report = TickReport::default();
        let Position::AtNode {
            mut node,
            mut elapsed,
        } = self.position
        else {
            return report;
        };

        let dt = if dt.is_finite() && dt >= 0.0 {
            dt * self.config.time_scale
        } else {
            warn!(node = %node, dt, "Ignoring invalid tick delta");
            0.0
        };
        let total = self.total + dt;
        elapsed += dt;

        let position = loop {
            let Some(state) = self.chain.node(node) else {
                report.terminated = true;
                break Position::Terminated;
            };

            let done = state.is_done(&UpdateContext {
                node,
                elapsed,
                world,
            });
            trace!(node = %node, elapsed, done, "Evaluated update rule");

            if !done {
                break Position::AtNode { node, elapsed };
            }

            if let Some(diagnostic) = Self::run_exit(state, node, elapsed, world) {
                report.diagnostics.push(diagnostic);
            }

            let next = state.next();
            if self.config.log_transitions {
                debug!(
                    from = %node,
                    name = state.name(),
                    to = ?next,
                    elapsed,
                    at = total,
                    "Left node"
                );
            }
            report.transitions.push(TransitionRecord {
                from: node,
                to: next,
                elapsed,
                at: total,
                timestamp: Utc::now(),
            });

            let Some(next) = next else {
                report.terminated = true;
                break Position::Terminated;
            };

            node = next;
            elapsed = 0.0;

            if self.chain.node(next).is_some_and(|n| !n.is_substate()) {
                report.entered_phase = Some(next);
                break Position::AtNode { node, elapsed };
            }
        };

        self.position = position;
        self.total = total;
        if self.config.record_history {
            for record in &report.transitions {
                self.history.record(record.clone());
            }
        }

        report
    }

    fn run_exit(
        state: &StateNode,
        node: NodeId,
        elapsed: f32,
        world: &dyn World,
    ) -> Option<Diagnostic> {
        let diagnostic = state.exit()?.run(&ExitContext {
            node,
            name: state.name(),
            elapsed,
            world,
        })?;
        warn!(node = %node, "{diagnostic}");
        Some(diagnostic)
    }

    /// The chain being driven.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Config the driver was started with.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Transitions recorded so far. Empty when history is disabled.
    pub fn history(&self) -> &ChainHistory {
        &self.history
    }

    /// Active node, or `None` once terminated.
    pub fn current(&self) -> Option<NodeId> {
        match self.position {
            Position::AtNode { node, .. } => Some(node),
            Position::Terminated => None,
        }
    }

    /// The active node itself.
    pub fn current_node(&self) -> Option<&StateNode> {
        self.current().and_then(|id| self.chain.node(id))
    }

    /// Seconds since the active node was entered. Zero once terminated.
    pub fn time_since_transition(&self) -> f32 {
        match self.position {
            Position::AtNode { elapsed, .. } => elapsed,
            Position::Terminated => 0.0,
        }
    }

    /// Scaled seconds ticked since the driver started.
    pub fn total_time(&self) -> f32 {
        self.total
    }

    /// True once the chain has run off its last node.
    pub fn is_terminated(&self) -> bool {
        self.position == Position::Terminated
    }

    /// The user-visible phase the driver is in: the active node if it is
    /// named, otherwise the first named node after it.
    pub fn active_phase(&self) -> Option<NodeId> {
        let current = self.current()?;
        self.chain
            .iter_from(current)
            .find(|(_, node)| !node.is_substate())
            .map(|(id, _)| id)
    }

    /// Nominal seconds left until the active phase ends, from the durations
    /// of the remaining nodes up to and including the phase's named node.
    /// Never negative. With no named node ahead, covers the rest of the chain.
    pub fn time_to_phase_end(&self) -> Option<f32> {
        let current = self.current()?;
        let mut remaining = 0.0;
        for (_, node) in self.chain.iter_from(current) {
            remaining += node.duration();
            if !node.is_substate() {
                break;
            }
        }
        Some((remaining - self.time_since_transition()).max(0.0))
    }
}
