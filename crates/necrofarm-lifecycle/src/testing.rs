//! Shared fixtures for unit tests.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use necrofarm_types::{
    CareState, CombatStats, FarmSnapshot, Mood, Position, QualityTier, RaisedZombie, Resource,
    ZombieId, ZombieStatus, ZombieType,
};

pub const fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

pub fn at_days(days: i64) -> DateTime<Utc> {
    t0() + TimeDelta::days(days)
}

pub fn at_hours(hours: i64) -> DateTime<Utc> {
    t0() + TimeDelta::hours(hours)
}

/// A freshly raised zombie evaluated at `t0`.
pub fn raised(quality: QualityTier, happiness: u32) -> RaisedZombie {
    RaisedZombie {
        id: ZombieId::new(),
        zombie_type: ZombieType::Shambler,
        quality,
        matured_at: t0(),
        harvested_at: t0(),
        position: Position::default(),
        wander_target: Position::new(3.0, 4.0),
        stats: CombatStats {
            max_hp: 100,
            current_hp: 100,
            attack: 10,
            defense: 10,
            speed: 5,
        },
        level: 1,
        experience: 0,
        permanent_injuries: BTreeSet::new(),
        battle_scars: 0,
        combat_refusal_chance: Decimal::ZERO,
        status: ZombieStatus::Wandering,
        mood: Mood::Content,
        is_wandering: true,
        care: CareState {
            condition: Decimal::ONE_HUNDRED,
            happiness,
            days_since_fed: 0,
            last_fed_at: None,
            last_pet_at: None,
            last_evaluated_at: t0(),
            sheltered: false,
            contained: false,
        },
        mutations: BTreeMap::new(),
    }
}

/// A farm holding the given zombies and `brains` units of Brain.
pub fn farm(zombies: Vec<RaisedZombie>, brains: Decimal) -> FarmSnapshot {
    let mut inventory = BTreeMap::new();
    if !brains.is_zero() {
        inventory.insert(Resource::Brain, brains);
    }
    FarmSnapshot {
        zombies: zombies.into_iter().map(|z| (z.id, z)).collect(),
        inventory,
        ..FarmSnapshot::default()
    }
}
