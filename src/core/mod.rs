//! Core chain types.
//!
//! This module contains the data the engine operates on:
//! - State nodes with their update rules and exit hooks
//! - Actor and cast observation consumed from the host
//! - Diagnostics produced on the way out of a node
//! - Forward-only transition history

mod actor;
mod diagnostic;
mod history;
mod state;

pub use actor::{ActionId, ActionKind, ActorId, CastInfo, World};
pub use diagnostic::Diagnostic;
pub use history::{ChainHistory, TransitionRecord};
pub use state::{ExitContext, ExitFn, ExitHook, NodeId, StateNode, Update, UpdateContext, UpdateFn};
