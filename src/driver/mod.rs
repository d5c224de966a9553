//! Tick-driven execution of a built chain.
//!
//! The driver is the only moving part: it holds the active node and the
//! time spent in it, and advances strictly forward.
//!
//! # Key Concepts
//!
//! - **Tick**: one call to [`Driver::tick`] with a time delta and a world
//!   snapshot
//! - **Substate traversal**: unnamed nodes reached during a tick are
//!   evaluated within that same tick
//! - **Diagnostics**: exit-hook anomalies are logged and reported, never
//!   blocking

mod config;
mod machine;

pub use config::{ConfigError, DriverConfig};
pub use machine::{Driver, TickReport};
