//! End-to-end dispatch tests: plant, raise, care, and batch feeding driven
//! through action payloads exactly as a host would submit them.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::too_many_lines
)]

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use necrofarm_core::{CountingSink, DispatchError, FarmConfig, NoopSink, apply_at, apply_json};
use necrofarm_lifecycle::ErrorKind;
use necrofarm_types::{
    ActivityCounter, Caretaker, FarmAction, FarmEvent, FarmSnapshot, Mood, Plot, PlotId, Position,
    QualityTier, Resource, ZombieId, ZombieStatus,
};

fn t0() -> DateTime<Utc> {
    "2026-03-01T00:00:00Z".parse().expect("valid timestamp")
}

fn new_farm() -> (FarmSnapshot, PlotId) {
    let plot_id = PlotId::new();
    let snapshot = FarmSnapshot {
        plots: BTreeMap::from([(plot_id, Plot::placed(plot_id, Position::new(10.0, 20.0)))]),
        inventory: BTreeMap::from([
            (Resource::ShamblerSeed, Decimal::from(2)),
            (Resource::Brain, Decimal::from(3)),
        ]),
        caretaker: Some(Caretaker::default()),
        ..FarmSnapshot::default()
    };
    (snapshot, plot_id)
}

fn plant_json(plot_id: PlotId, zombie_id: ZombieId, at: DateTime<Utc>) -> String {
    format!(
        r#"{{
            "action": {{
                "type": "plant",
                "plotId": "{plot_id}",
                "resource": "ShamblerSeed",
                "newEntityId": "{zombie_id}"
            }},
            "timestamp": "{}"
        }}"#,
        at.to_rfc3339()
    )
}

#[test]
fn full_lifecycle_through_dispatch() {
    let config = FarmConfig::default().lifecycle;
    let sink = CountingSink::new();
    let mut rng = StdRng::seed_from_u64(42);
    let (farm, plot_id) = new_farm();
    let zombie_id = ZombieId::new();

    // Plant.
    let planted = apply_json(&farm, &plant_json(plot_id, zombie_id, t0()), &config, &sink)
        .expect("planting succeeds");
    assert_eq!(planted.applied_at, t0());
    assert_eq!(planted.snapshot.balance(Resource::ShamblerSeed), Decimal::ONE);
    assert!(matches!(
        planted.events.as_slice(),
        [FarmEvent::Planted { .. }]
    ));

    // Raise exactly at maturity.
    let ready = t0() + TimeDelta::hours(4);
    let raised = apply_at(
        &planted.snapshot,
        &FarmAction::Raise { plot_id },
        ready,
        &config,
        &sink,
        &mut rng,
    )
    .expect("raise succeeds at maturity");
    let zombie = &raised.snapshot.zombies[&zombie_id];
    assert_eq!(zombie.quality, QualityTier::Common);
    assert_eq!(zombie.stats.max_hp, 100);
    assert_eq!(zombie.status, ZombieStatus::Wandering);
    assert_eq!(zombie.mood, Mood::Happy);
    assert!(raised.snapshot.plots[&plot_id].is_empty());
    assert_eq!(raised.snapshot.caretaker.map(|c| c.experience), Some(10));

    // Three days later, catch up the whole farm.
    let later = ready + TimeDelta::days(3);
    let evaluated = apply_at(
        &raised.snapshot,
        &FarmAction::EvaluateDecay,
        later,
        &config,
        &sink,
        &mut rng,
    )
    .expect("evaluation succeeds");
    let decayed = &evaluated.snapshot.zombies[&zombie_id];
    assert_eq!(decayed.care.days_since_fed, 3);
    assert_eq!(decayed.care.happiness, 85);
    assert!(decayed.care.condition < Decimal::ONE_HUNDRED);
    assert!(
        evaluated
            .events
            .iter()
            .any(|e| matches!(e, FarmEvent::Decayed { days: 3, .. }))
    );

    // Feed, then pet.
    let fed = apply_at(
        &evaluated.snapshot,
        &FarmAction::Feed {
            entity_id: zombie_id,
        },
        later,
        &config,
        &sink,
        &mut rng,
    )
    .expect("feeding succeeds");
    assert_eq!(fed.snapshot.balance(Resource::Brain), Decimal::from(2));
    assert_eq!(fed.snapshot.zombies[&zombie_id].care.days_since_fed, 0);
    assert_eq!(fed.snapshot.zombies[&zombie_id].care.happiness, 100);

    let petted = apply_at(
        &fed.snapshot,
        &FarmAction::Pet {
            entity_id: zombie_id,
        },
        later,
        &config,
        &sink,
        &mut rng,
    )
    .expect("petting succeeds");
    assert_eq!(petted.activity, vec![ActivityCounter::ZombiePet]);

    assert_eq!(sink.count(ActivityCounter::ZombiePlanted), 1);
    assert_eq!(sink.count(ActivityCounter::ZombieRaised), 1);
    assert_eq!(sink.count(ActivityCounter::ZombieFed), 1);
    assert_eq!(sink.count(ActivityCounter::ZombiePet), 1);
}

#[test]
fn rejected_action_forwards_no_telemetry() {
    let config = FarmConfig::default().lifecycle;
    let sink = CountingSink::new();
    let (farm, plot_id) = new_farm();

    let result = apply_at(
        &farm,
        &FarmAction::Raise { plot_id },
        t0(),
        &config,
        &sink,
        &mut StdRng::seed_from_u64(1),
    );
    match result {
        Err(DispatchError::Rejected(err)) => assert_eq!(err.kind(), ErrorKind::InvalidState),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(sink.totals().is_empty());
}

#[test]
fn raising_early_is_rejected_as_not_ready() {
    let config = FarmConfig::default().lifecycle;
    let (farm, plot_id) = new_farm();
    let zombie_id = ZombieId::new();
    let planted = apply_json(&farm, &plant_json(plot_id, zombie_id, t0()), &config, &NoopSink)
        .expect("planting succeeds");

    let early = apply_at(
        &planted.snapshot,
        &FarmAction::Raise { plot_id },
        t0() + TimeDelta::hours(4) - TimeDelta::seconds(1),
        &config,
        &NoopSink,
        &mut StdRng::seed_from_u64(1),
    );
    assert!(matches!(
        early,
        Err(DispatchError::Rejected(
            necrofarm_lifecycle::LifecycleError::NotReady { .. }
        ))
    ));
}

#[test]
fn malformed_payload_is_a_decode_error() {
    let config = FarmConfig::default().lifecycle;
    let (farm, _) = new_farm();
    let result = apply_json(&farm, r#"{"action":{"type":"dance"}}"#, &config, &NoopSink);
    assert!(matches!(result, Err(DispatchError::Decode(_))));
}

#[test]
fn feed_most_needy_reports_through_outcome() {
    let config = FarmConfig::default().lifecycle;
    let mut rng = StdRng::seed_from_u64(9);
    let (mut farm, first_plot) = new_farm();
    let second_plot = PlotId::new();
    farm.plots.insert(
        second_plot,
        Plot::placed(second_plot, Position::new(-5.0, 0.0)),
    );

    // Plant and raise two zombies.
    let mut snapshot = farm;
    let mut ids = Vec::new();
    for plot_id in [first_plot, second_plot] {
        let zombie_id = ZombieId::new();
        ids.push(zombie_id);
        snapshot = apply_json(
            &snapshot,
            &plant_json(plot_id, zombie_id, t0()),
            &config,
            &NoopSink,
        )
        .expect("planting succeeds")
        .snapshot;
        snapshot = apply_at(
            &snapshot,
            &FarmAction::Raise { plot_id },
            t0() + TimeDelta::hours(4),
            &config,
            &NoopSink,
            &mut rng,
        )
        .expect("raise succeeds")
        .snapshot;
    }
    // Make the second zombie the neediest.
    snapshot
        .zombies
        .get_mut(&ids[1])
        .expect("raised")
        .care
        .happiness = 10;

    let outcome = apply_at(
        &snapshot,
        &FarmAction::FeedMostNeedy {
            max_units: Some(Decimal::ONE),
        },
        t0() + TimeDelta::hours(5),
        &config,
        &NoopSink,
        &mut rng,
    )
    .expect("batch feeding succeeds");

    let report = outcome.feeding.as_ref().expect("report present");
    assert_eq!(report.fed, vec![ids[1]]);
    assert_eq!(report.skipped_insufficient, vec![ids[0]]);
    assert_eq!(outcome.snapshot.balance(Resource::Brain), Decimal::from(2));

    let json = serde_json::to_value(&outcome).expect("outcome serializes");
    assert!(json.get("feeding").is_some());
    assert!(json.get("snapshot").is_some());
}

#[test]
fn omitted_timestamp_uses_current_time() {
    let config = FarmConfig::default().lifecycle;
    let (farm, _) = new_farm();
    let before = Utc::now();
    let outcome = apply_json(
        &farm,
        r#"{"action":{"type":"evaluateDecay"}}"#,
        &config,
        &NoopSink,
    )
    .expect("evaluation succeeds");
    assert!(outcome.applied_at >= before);
    assert!(outcome.events.is_empty());
}
