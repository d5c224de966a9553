//! Transition history tracking.
//!
//! Records each departure from a node. Chains only move forward, so the
//! recorded path never repeats a node.

use super::state::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of leaving one node.
///
/// # Example
///
/// ```rust
/// use phasechain::core::{NodeId, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: NodeId(0),
///     to: Some(NodeId(1)),
///     elapsed: 2.5,
///     at: 2.5,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_termination());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The node being left
    pub from: NodeId,
    /// The node entered, or `None` when the chain terminated
    pub to: Option<NodeId>,
    /// Seconds spent in `from`
    pub elapsed: f32,
    /// Driver time (seconds since start) at which the transition happened
    pub at: f32,
    /// Wall-clock time of the transition
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn is_termination(&self) -> bool {
        self.to.is_none()
    }
}

/// Ordered history of transitions, optionally bounded.
///
/// When a limit is set the oldest records are dropped first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChainHistory {
    transitions: VecDeque<TransitionRecord>,
    limit: Option<usize>,
}

impl ChainHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn record(&mut self, transition: TransitionRecord) {
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
    }

    /// Nodes visited, in order: the first departed node, then every node
    /// entered afterwards.
    ///
    /// # Example
    ///
    /// ```rust
    /// use phasechain::core::{ChainHistory, NodeId, TransitionRecord};
    /// use chrono::Utc;
    ///
    /// let mut history = ChainHistory::new();
    /// for (from, to) in [(0, Some(1)), (1, None)] {
    ///     history.record(TransitionRecord {
    ///         from: NodeId(from),
    ///         to: to.map(NodeId),
    ///         elapsed: 1.0,
    ///         at: 1.0,
    ///         timestamp: Utc::now(),
    ///     });
    /// }
    /// assert_eq!(history.path(), vec![NodeId(0), NodeId(1)]);
    /// ```
    pub fn path(&self) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().filter_map(|t| t.to));
        path
    }

    /// Driver time covered by the recorded transitions.
    pub fn span(&self) -> Option<f32> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        Some((last.at - (first.at - first.elapsed)).max(0.0))
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
