//! Arena-backed chain construction.
//!
//! Every node is written into a [`Link`] slot: either the chain's root or the
//! `next` slot of an earlier node. Links and tails are move-only, so each
//! slot is filled at most once and a chain can only ever grow forward.

use crate::builder::error::{BuildError, ChainViolation};
use crate::core::{ExitHook, NodeId, StateNode, Update};
use std::sync::atomic::{AtomicU64, Ordering};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

static NEXT_BUILDER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Root,
    Next(NodeId),
}

/// An unfilled slot that the next constructed node will occupy.
#[must_use = "a link that is never filled leaves the chain shorter than intended"]
#[derive(Debug)]
pub struct Link {
    owner: u64,
    slot: Slot,
}

/// Handle to the node a constructor just created.
///
/// Turn it into the link for the following node with [`Tail::next`].
#[must_use]
#[derive(Debug)]
pub struct Tail {
    owner: u64,
    id: NodeId,
}

impl Tail {
    /// Id of the node this tail refers to.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The `next` slot of this node.
    pub fn next(self) -> Link {
        Link {
            owner: self.owner,
            slot: Slot::Next(self.id),
        }
    }
}

/// Builder that owns the nodes of a chain under construction.
///
/// # Example
///
/// ```rust
/// use phasechain::builder::ChainBuilder;
///
/// let (mut builder, root) = ChainBuilder::new();
/// let pull = builder.timeout(root, 10.0, "Pull");
/// let enrage = builder.timeout(pull.next(), 300.0, "Enrage");
/// let _ = enrage;
///
/// let chain = builder.build().unwrap();
/// assert_eq!(chain.phase_names(), vec!["Pull", "Enrage"]);
/// ```
#[derive(Debug)]
pub struct ChainBuilder {
    id: u64,
    nodes: Vec<StateNode>,
    head: Option<NodeId>,
    foreign: Vec<NodeId>,
    foreign_tails: Vec<NodeId>,
}

impl ChainBuilder {
    /// Create an empty builder together with its root link.
    pub fn new() -> (Self, Link) {
        let id = NEXT_BUILDER.fetch_add(1, Ordering::Relaxed);
        let builder = Self {
            id,
            nodes: Vec::new(),
            head: None,
            foreign: Vec::new(),
            foreign_tails: Vec::new(),
        };
        let root = Link {
            owner: id,
            slot: Slot::Root,
        };
        (builder, root)
    }

    /// Allocate a node and write it into `link`.
    pub(crate) fn attach(&mut self, link: Link, node: StateNode) -> Tail {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);

        if link.owner != self.id {
            self.foreign.push(id);
        } else {
            match link.slot {
                Slot::Root => self.head = Some(id),
                Slot::Next(prev) => self.nodes[prev.0].next = Some(id),
            }
        }

        Tail { owner: self.id, id }
    }

    /// Replace the update rule of a node this builder created. A tail from
    /// another builder is recorded as a violation and fails [`Self::build`].
    pub fn set_update(&mut self, tail: &Tail, update: Update) {
        if let Some(node) = self.own_node_mut(tail) {
            node.update = Some(update);
        }
    }

    /// Replace the exit hook of a node this builder created. A tail from
    /// another builder is recorded as a violation and fails [`Self::build`].
    pub fn set_exit(&mut self, tail: &Tail, exit: ExitHook) {
        if let Some(node) = self.own_node_mut(tail) {
            node.exit = Some(exit);
        }
    }

    fn own_node_mut(&mut self, tail: &Tail) -> Option<&mut StateNode> {
        if tail.owner == self.id {
            self.nodes.get_mut(tail.id.0)
        } else {
            self.foreign_tails.push(tail.id);
            None
        }
    }

    /// Node created so far with the given id.
    pub fn node(&self, id: NodeId) -> Option<&StateNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes created so far, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True until the first node is created.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check every node, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ChainViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ChainViolation>>> = Vec::new();

        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId(index);

            checks.push(if node.update.is_none() {
                Validation::fail(ChainViolation::MissingUpdate { node: id })
            } else {
                Validation::success(())
            });

            checks.push(if node.duration.is_finite() && node.duration >= 0.0 {
                Validation::success(())
            } else {
                Validation::fail(ChainViolation::InvalidDuration {
                    node: id,
                    duration: node.duration,
                })
            });
        }

        for &node in &self.foreign {
            checks.push(Validation::fail(ChainViolation::ForeignLink { node }));
        }

        for &node in &self.foreign_tails {
            checks.push(Validation::fail(ChainViolation::ForeignTail { node }));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Freeze the chain. Fails if nothing was attached to the root link or
    /// if any node is invalid.
    pub fn build(self) -> Result<Chain, BuildError> {
        let head = self.head.ok_or(BuildError::EmptyChain)?;

        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildError::InvalidChain {
                violations: errors.iter().cloned().collect(),
            });
        }

        Ok(Chain {
            nodes: self.nodes,
            head,
        })
    }
}

/// An immutable, forward-only chain of nodes.
#[derive(Debug)]
pub struct Chain {
    nodes: Vec<StateNode>,
    head: NodeId,
}

impl Chain {
    /// First node the driver enters.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&StateNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built chain.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in chain order, starting at the head.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            cursor: Some(self.head),
        }
    }

    /// Iterate from `start` to the end of the chain.
    pub fn iter_from(&self, start: NodeId) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            cursor: self.node(start).map(|_| start),
        }
    }

    /// Names of the user-visible phases, in order.
    pub fn phase_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| !node.is_substate())
            .map(|(_, node)| node.name())
            .collect()
    }
}

/// Iterator over `(NodeId, &StateNode)` following `next` links.
pub struct ChainIter<'a> {
    chain: &'a Chain,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (NodeId, &'a StateNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.chain.node(id)?;
        self.cursor = node.next();
        Some((id, node))
    }
}
