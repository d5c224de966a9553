//! Scripted Encounter Timeline
//!
//! This example drives a small boss timeline against a scripted actor.
//!
//! Key concepts:
//! - Composing timeouts and cast sequences into one chain
//! - Substates traversed within a tick, named phases shown to the user
//! - Non-blocking diagnostics when the boss casts something unexpected
//!
//! Run with: RUST_LOG=phasechain=debug cargo run --example encounter

use phasechain::action_enum;
use phasechain::builder::ChainBuilder;
use phasechain::core::{ActionKind, ActorId, CastInfo};
use phasechain::driver::{Driver, DriverConfig};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

action_enum! {
    enum Golem {
        Quake = 0x2E1,
        Boulder = 0x2E2,
    }
}

const GOLEM: ActorId = ActorId(0x4000_A1B2);
const FRAME: f32 = 0.5;

/// What the golem is casting at time `t`: Quake over [3, 6), then a
/// Crush (not Boulder, as the script expected) over [8, 10).
fn observe(t: f32) -> HashMap<ActorId, CastInfo> {
    let mut world = HashMap::new();
    if (3.0..6.0).contains(&t) {
        world.insert(GOLEM, CastInfo::new(Golem::Quake.action_id().0, 3.0));
    } else if (8.0..10.0).contains(&t) {
        world.insert(GOLEM, CastInfo::new(0x2E9, 8.0));
    }
    world
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Scripted Encounter Timeline ===\n");

    let (mut builder, root) = ChainBuilder::new();
    let pull = builder.timeout(root, 2.0, "Pull");
    let quake = builder.cast_with_resolve(pull.next(), GOLEM, Golem::Quake, 1.0, 3.0, 1.0, "Quake");
    let boulder = builder.cast(quake.next(), GOLEM, Golem::Boulder, 2.0, 2.0, "Boulder");
    let _ = builder.timeout(boulder.next(), 4.0, "Enrage");

    let chain = match builder.build() {
        Ok(chain) => chain,
        Err(err) => {
            eprintln!("Invalid timeline: {err}");
            return;
        }
    };
    println!("Phases: {:?}\n", chain.phase_names());

    let config = DriverConfig::new().history_limit(64);
    let mut driver = match Driver::with_config(chain, config) {
        Ok(driver) => driver,
        Err(err) => {
            eprintln!("Invalid config: {err}");
            return;
        }
    };

    let mut t = 0.0;
    while !driver.is_terminated() {
        t += FRAME;
        let report = driver.tick(FRAME, &observe(t));

        for diagnostic in &report.diagnostics {
            println!("t={t:>5.1}  ! {diagnostic}");
        }
        if let Some(phase) = report.entered_phase {
            let name = driver.chain().node(phase).map_or("?", |n| n.name());
            println!("t={t:>5.1}  -> {name}");
        }
        if report.terminated {
            println!("t={t:>5.1}  timeline complete");
        }
    }

    println!("\nVisited {} nodes in {:.1}s", driver.history().path().len(), driver.total_time());
    println!("\n=== Example Complete ===");
}
