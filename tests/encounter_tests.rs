//! End-to-end tests driving encounter timelines against a simulated actor.

use phasechain::action_enum;
use phasechain::builder::ChainBuilder;
use phasechain::core::{ActionId, ActorId, CastInfo, Diagnostic, NodeId};
use phasechain::driver::{Driver, DriverConfig};
use std::collections::HashMap;

action_enum! {
    enum Boss {
        Slam = 5,
        Roar = 6,
    }
}

const BOSS: ActorId = ActorId(0x4000_1234);
const DT: f32 = 0.25;

/// Simulated actor that casts `action` over `[start, end)`.
fn world_at(t: f32, action: u32, start: f32, end: f32) -> HashMap<ActorId, CastInfo> {
    let mut world = HashMap::new();
    if t >= start && t < end {
        world.insert(BOSS, CastInfo::new(action, start));
    }
    world
}

#[test]
fn composite_cast_follows_expected_timeline() {
    let (mut builder, root) = ChainBuilder::new();
    let resolve = builder.cast_with_resolve(root, BOSS, Boss::Slam, 2.0, 3.0, 1.0, "Slam");
    let resolve_id = resolve.id();
    let chain = builder.build().unwrap();

    let ids: Vec<NodeId> = chain.iter().map(|(id, _)| id).collect();
    let (start_id, end_id) = (ids[0], ids[1]);
    assert_eq!(ids[2], resolve_id);

    let mut driver = Driver::new(chain);
    let mut occupied: Vec<(f32, Option<NodeId>)> = Vec::new();
    let mut t = 0.0;
    let mut diagnostics = Vec::new();

    while !driver.is_terminated() && t < 10.0 {
        t += DT;
        let world = world_at(t, 5, 2.0, 5.0);
        let report = driver.tick(DT, &world);
        diagnostics.extend(report.diagnostics);
        occupied.push((t, driver.current()));
    }

    let at = |time: f32| {
        occupied
            .iter()
            .find(|(t, _)| *t == time)
            .map(|(_, node)| *node)
            .unwrap()
    };

    assert_eq!(at(1.75), Some(start_id));
    assert_eq!(at(2.0), Some(end_id));
    assert_eq!(at(4.75), Some(end_id));
    assert_eq!(at(5.0), Some(resolve_id));
    assert_eq!(at(5.75), Some(resolve_id));
    assert_eq!(at(6.0), None);
    assert_eq!(t, 6.0);
    assert!(diagnostics.is_empty());

    let path = driver.history().path();
    assert_eq!(path, vec![start_id, end_id, resolve_id]);
}

#[test]
fn cast_start_fires_regardless_of_delay() {
    for delay in [0.0, 1.0, 30.0] {
        let (mut builder, root) = ChainBuilder::new();
        let start = builder.cast_start(root, BOSS, delay, "");
        let _ = builder.timeout(start.next(), 100.0, "Next");
        let mut driver = Driver::new(builder.build().unwrap());

        let idle = world_at(0.0, 1, 1.0, 2.0);
        assert!(!driver.tick(DT, &idle).advanced());

        let casting = world_at(1.0, 1, 1.0, 2.0);
        let report = driver.tick(DT, &casting);
        assert_eq!(report.transitions.len(), 1, "delay {delay}");
        assert_eq!(driver.current_node().unwrap().name(), "Next");
    }
}

#[test]
fn mismatched_cast_is_logged_but_not_blocking() {
    let (mut builder, root) = ChainBuilder::new();
    let slam = builder.cast(root, BOSS, Boss::Slam, 1.0, 2.0, "Slam");
    let slam_id = slam.id();
    let _ = builder.timeout(slam.next(), 5.0, "After");
    let mut driver = Driver::new(builder.build().unwrap());

    let world = world_at(0.0, 6, 0.0, 2.0);
    let report = driver.tick(DT, &world);

    assert_eq!(driver.current(), Some(slam_id));
    assert_eq!(report.diagnostics.len(), 1);
    match &report.diagnostics[0] {
        Diagnostic::UnexpectedCast {
            actor,
            observed,
            expected,
            ..
        } => {
            assert_eq!(*actor, BOSS);
            assert_eq!(*observed, ActionId(6));
            assert_eq!(*expected, ActionId(5));
        }
        other => panic!("Expected UnexpectedCast, got {other:?}"),
    }

    let message = report.diagnostics[0].to_string();
    assert_eq!(
        message,
        "Unexpected cast start for actor 40001234: got 6, expected Slam"
    );
}

#[test]
fn interrupted_cast_ends_cast_node() {
    let (mut builder, root) = ChainBuilder::new();
    let roar = builder.cast(root, BOSS, Boss::Roar, 0.0, 4.0, "Roar");
    let _ = builder.timeout(roar.next(), 1.0, "Recover");
    let mut driver = Driver::new(builder.build().unwrap());

    driver.tick(DT, &world_at(0.0, 6, 0.0, 0.5));
    assert_eq!(driver.current_node().unwrap().name(), "Roar");

    let report = driver.tick(DT, &world_at(0.5, 6, 0.0, 0.5));
    assert_eq!(driver.current_node().unwrap().name(), "Recover");
    assert!(report.entered_phase.is_some());
}

#[test]
fn multi_phase_script_visits_phases_once() {
    let (mut builder, root) = ChainBuilder::new();
    let pull = builder.timeout(root, 1.0, "Pull");
    let slam = builder.cast_with_resolve(pull.next(), BOSS, Boss::Slam, 1.0, 1.0, 0.5, "Slam");
    let _ = builder.timeout(slam.next(), 2.0, "Enrage");
    let chain = builder.build().unwrap();
    assert_eq!(chain.phase_names(), vec!["Pull", "Slam", "Enrage"]);

    let mut driver = Driver::new(chain);
    let mut entered = Vec::new();
    let mut t = 0.0;
    while !driver.is_terminated() && t < 20.0 {
        t += DT;
        let report = driver.tick(DT, &world_at(t, 5, 2.0, 3.0));
        if let Some(phase) = report.entered_phase {
            entered.push(driver.chain().node(phase).unwrap().name().to_string());
        }
    }

    assert!(driver.is_terminated());
    assert_eq!(entered, vec!["Slam", "Enrage"]);

    let path = driver.history().path();
    let mut deduped = path.clone();
    deduped.dedup();
    assert_eq!(path, deduped);
    assert_eq!(path.len(), driver.chain().len());
}

#[test]
fn bounded_history_from_config() {
    let (mut builder, root) = ChainBuilder::new();
    let mut link = root;
    for _ in 0..5 {
        link = builder.timeout(link, 0.0, "Step").next();
    }
    let _ = link;

    let config = DriverConfig::from_json(r#"{ "history_limit": 2, "log_transitions": false }"#)
        .unwrap();
    let mut driver = Driver::with_config(builder.build().unwrap(), config).unwrap();
    let world: HashMap<ActorId, CastInfo> = HashMap::new();

    while !driver.is_terminated() {
        driver.tick(DT, &world);
    }

    assert_eq!(driver.history().len(), 2);
    assert!(driver.history().last().unwrap().is_termination());
}
