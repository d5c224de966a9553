//! Phasechain: a timed, forward-only state chain engine
//!
//! Phasechain choreographs scripted sequences of phases, such as the
//! mechanics of a combat encounter. A chain is assembled once from
//! composable constructors. A driver then advances it each tick from the
//! elapsed time and a read-only snapshot of the world.
//!
//! # Core Concepts
//!
//! - **Node**: a named or unnamed (substate) step with an update rule and an
//!   optional exit hook
//! - **Chain**: a singly linked, forward-only list of nodes
//! - **Driver**: holds the active node and moves along the chain
//!
//! # Example
//!
//! ```rust
//! use phasechain::action_enum;
//! use phasechain::builder::ChainBuilder;
//! use phasechain::core::{ActorId, CastInfo};
//! use phasechain::driver::Driver;
//! use std::collections::HashMap;
//!
//! action_enum! {
//!     enum Boss {
//!         Slam = 5,
//!     }
//! }
//!
//! let boss = ActorId(0x4000_0001);
//! let (mut builder, root) = ChainBuilder::new();
//! let slam = builder.cast_with_resolve(root, boss, Boss::Slam, 2.0, 3.0, 1.0, "Slam");
//! let _ = builder.timeout(slam.next(), 60.0, "Enrage");
//!
//! let mut driver = Driver::new(builder.build().unwrap());
//! let mut world: HashMap<ActorId, CastInfo> = HashMap::new();
//!
//! driver.tick(2.0, &world);
//! world.insert(boss, CastInfo::new(5, 2.0));
//! driver.tick(0.1, &world);
//! world.clear();
//! let report = driver.tick(2.9, &world);
//!
//! assert_eq!(driver.current_node().unwrap().name(), "Slam");
//! assert!(report.entered_phase.is_some());
//! ```

pub mod builder;
pub mod core;
pub mod driver;

// Re-export commonly used types
pub use builder::{BuildError, Chain, ChainBuilder, Link, Tail};
pub use self::core::{ActionId, ActionKind, ActorId, CastInfo, Diagnostic, NodeId, StateNode, World};
pub use driver::{Driver, DriverConfig, TickReport};
