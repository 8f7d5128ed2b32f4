//! Core entity structs: plots, growing and raised zombies, and the farm
//! snapshot exchanged with the host.
//!
//! Every struct here is plain data. All behaviour lives in
//! `necrofarm-lifecycle`, which consumes a [`FarmSnapshot`] and returns a
//! new one.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{GrowthStage, Mood, QualityTier, Resource, ZombieStatus, ZombieType};
use crate::ids::{PlotId, ZombieId};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point on the farm in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Plot
// ---------------------------------------------------------------------------

/// A zombie still in the ground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GrowingZombie {
    /// Identifier carried over to the raised zombie.
    pub id: ZombieId,
    /// Selects the growth curve and base stats.
    pub zombie_type: ZombieType,
    /// When the seed was planted. The only time anchor for growth.
    pub buried_at: DateTime<Utc>,
    /// Last computed stage. Display cache only, never trusted.
    pub stage: GrowthStage,
    /// Happiness while growing (0--100).
    pub happiness: u32,
    /// Seconds of growth time removed by boosts at plant time.
    pub boosted_time_secs: i64,
}

/// What currently occupies a plot.
///
/// `care_level` only exists on the occupied variant, so a plot can never
/// carry a care level without a zombie.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "state")]
pub enum PlotOccupancy {
    /// Nothing planted; the plot can take a seed.
    #[default]
    Empty,
    /// A zombie is growing here.
    Occupied {
        /// The buried zombie.
        zombie: GrowingZombie,
        /// Care applied to the plot (0--100).
        care_level: u32,
    },
}

/// A farm slot that can hold one growing zombie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Plot {
    /// Unique plot identifier.
    pub id: PlotId,
    /// Placement on the farm. Unplaced plots cannot be planted.
    pub position: Option<Position>,
    /// Current occupant, if any.
    pub occupancy: PlotOccupancy,
}

impl Plot {
    /// Create an empty plot at the given position.
    pub const fn placed(id: PlotId, position: Position) -> Self {
        Self {
            id,
            position: Some(position),
            occupancy: PlotOccupancy::Empty,
        }
    }

    /// Return the growing zombie, if the plot is occupied.
    pub const fn occupant(&self) -> Option<&GrowingZombie> {
        match &self.occupancy {
            PlotOccupancy::Empty => None,
            PlotOccupancy::Occupied { zombie, .. } => Some(zombie),
        }
    }

    /// Return the care level, if the plot is occupied.
    pub const fn care_level(&self) -> Option<u32> {
        match &self.occupancy {
            PlotOccupancy::Empty => None,
            PlotOccupancy::Occupied { care_level, .. } => Some(*care_level),
        }
    }

    /// Whether nothing is planted here.
    pub const fn is_empty(&self) -> bool {
        matches!(self.occupancy, PlotOccupancy::Empty)
    }
}

// ---------------------------------------------------------------------------
// Raised zombie
// ---------------------------------------------------------------------------

/// Combat statistics derived at raise time. All values are floored integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CombatStats {
    /// Maximum hit points.
    pub max_hp: u32,
    /// Current hit points. Never above `max_hp`.
    pub current_hp: u32,
    /// Attack power.
    pub attack: u32,
    /// Defense rating.
    pub defense: u32,
    /// Movement speed.
    pub speed: u32,
}

/// The decay-relevant part of a raised zombie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CareState {
    /// Wellbeing in percent (0--100). Never below the tier floor.
    #[ts(as = "String")]
    pub condition: Decimal,
    /// Happiness (0--100).
    pub happiness: u32,
    /// Whole days elapsed since the last feeding.
    pub days_since_fed: u32,
    /// Last successful feeding.
    pub last_fed_at: Option<DateTime<Utc>>,
    /// Last successful petting.
    pub last_pet_at: Option<DateTime<Utc>>,
    /// Anchor for the next decay evaluation.
    pub last_evaluated_at: DateTime<Utc>,
    /// Under shelter; decay is reduced.
    pub sheltered: bool,
    /// In special storage; decay is paused.
    pub contained: bool,
}

impl CareState {
    /// Condition lost so far, in percent.
    pub fn decay_amount(&self) -> Decimal {
        Decimal::ONE_HUNDRED.saturating_sub(self.condition)
    }
}

/// A zombie that has been raised out of its plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RaisedZombie {
    /// Unique zombie identifier.
    pub id: ZombieId,
    /// The zombie's type.
    pub zombie_type: ZombieType,
    /// Quality assigned at raise. Immutable afterwards.
    pub quality: QualityTier,
    /// When the zombie reached `ReadyToHarvest`.
    pub matured_at: DateTime<Utc>,
    /// When the zombie was raised.
    pub harvested_at: DateTime<Utc>,
    /// Current position.
    pub position: Position,
    /// Point the zombie is wandering toward.
    pub wander_target: Position,
    /// Derived combat stats.
    pub stats: CombatStats,
    /// Progression level, starts at 1.
    pub level: u32,
    /// Progression experience, starts at 0.
    pub experience: u64,
    /// Injury tags that never heal.
    pub permanent_injuries: BTreeSet<String>,
    /// Number of battle scars.
    pub battle_scars: u32,
    /// Probability (0--1) the zombie refuses to fight.
    #[ts(as = "String")]
    pub combat_refusal_chance: Decimal,
    /// Operational state.
    pub status: ZombieStatus,
    /// Happiness bucket.
    pub mood: Mood,
    /// Whether the zombie is currently roaming.
    pub is_wandering: bool,
    /// Decay and happiness bookkeeping.
    pub care: CareState,
    /// Mutation name to magnitude.
    #[ts(as = "BTreeMap<String, String>")]
    pub mutations: BTreeMap<String, Decimal>,
}

impl RaisedZombie {
    /// Number of distinct mutations.
    pub fn mutation_count(&self) -> usize {
        self.mutations.len()
    }
}

// ---------------------------------------------------------------------------
// Caretaker
// ---------------------------------------------------------------------------

/// Progression record for the farm's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Caretaker {
    /// Total experience earned.
    pub experience: u64,
    /// Level derived from experience.
    pub level: u32,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything the lifecycle engine reads and writes.
///
/// Transitions take a snapshot by reference and return a new one; the
/// input is never modified.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FarmSnapshot {
    /// Plots keyed by id.
    pub plots: BTreeMap<PlotId, Plot>,
    /// Raised zombies keyed by id.
    pub zombies: BTreeMap<ZombieId, RaisedZombie>,
    /// Resource balances. Exact decimals; zero balances are removed.
    #[ts(as = "BTreeMap<Resource, String>")]
    pub inventory: BTreeMap<Resource, Decimal>,
    /// Owner progression, if the host tracks one.
    pub caretaker: Option<Caretaker>,
}

impl FarmSnapshot {
    /// Balance of a resource, zero when absent.
    pub fn balance(&self, resource: Resource) -> Decimal {
        self.inventory.get(&resource).copied().unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plot_has_no_care_level() {
        let plot = Plot::placed(PlotId::new(), Position::new(1.0, 2.0));
        assert!(plot.is_empty());
        assert_eq!(plot.care_level(), None);
        assert!(plot.occupant().is_none());
    }

    #[test]
    fn occupied_plot_exposes_care_level() {
        let zombie = GrowingZombie {
            id: ZombieId::new(),
            zombie_type: ZombieType::Shambler,
            buried_at: DateTime::<Utc>::UNIX_EPOCH,
            stage: GrowthStage::Buried,
            happiness: 50,
            boosted_time_secs: 0,
        };
        let plot = Plot {
            id: PlotId::new(),
            position: None,
            occupancy: PlotOccupancy::Occupied {
                zombie,
                care_level: 50,
            },
        };
        assert_eq!(plot.care_level(), Some(50));
        assert!(!plot.is_empty());
    }

    #[test]
    fn occupancy_serializes_with_state_tag() {
        let json = serde_json::to_value(PlotOccupancy::Empty).ok();
        assert_eq!(json, Some(serde_json::json!({ "state": "Empty" })));
    }

    #[test]
    fn missing_balance_is_zero() {
        let snapshot = FarmSnapshot::default();
        assert_eq!(snapshot.balance(Resource::Brain), Decimal::ZERO);
    }
}
