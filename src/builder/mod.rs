//! Builder API for assembling chains.
//!
//! A chain is assembled once, up front, by threading links through the
//! constructors on [`ChainBuilder`]: each constructor fills a link and
//! returns a [`Tail`] whose `next()` is the link for the following node.

pub mod chain;
pub mod error;
pub mod macros;
mod states;

pub use chain::{Chain, ChainBuilder, ChainIter, Link, Tail};
pub use error::{BuildError, ChainViolation};
