//! Events and activity counters emitted by lifecycle transitions.
//!
//! Events describe what changed so the host can log or broadcast it. The
//! engine never reads them back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Mood, QualityTier, ZombieType};
use crate::ids::{PlotId, ZombieId};

/// A state change produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "event")]
pub enum FarmEvent {
    /// A seed was planted.
    Planted {
        /// The plot that was planted.
        plot_id: PlotId,
        /// The new growing zombie.
        zombie_id: ZombieId,
        /// Its type.
        zombie_type: ZombieType,
        /// Planting time.
        at: DateTime<Utc>,
    },
    /// A zombie was raised out of its plot.
    Raised {
        /// The vacated plot.
        plot_id: PlotId,
        /// The raised zombie.
        zombie_id: ZombieId,
        /// Assigned quality.
        quality: QualityTier,
        /// Raise time.
        at: DateTime<Utc>,
    },
    /// Whole days of decay were applied.
    Decayed {
        /// The decayed zombie.
        zombie_id: ZombieId,
        /// Days applied (after the catch-up cap).
        days: u32,
        /// Condition before.
        #[ts(as = "String")]
        condition_before: Decimal,
        /// Condition after.
        #[ts(as = "String")]
        condition_after: Decimal,
        /// Happiness before.
        happiness_before: u32,
        /// Happiness after.
        happiness_after: u32,
        /// Whether condition is now resting on the tier floor.
        at_floor: bool,
    },
    /// A zombie was fed.
    Fed {
        /// The fed zombie.
        zombie_id: ZombieId,
        /// Happiness after feeding.
        happiness: u32,
        /// Feeding time.
        at: DateTime<Utc>,
    },
    /// A zombie was pet.
    Pet {
        /// The pet zombie.
        zombie_id: ZombieId,
        /// Happiness after petting.
        happiness: u32,
        /// Petting time.
        at: DateTime<Utc>,
    },
    /// Happiness crossed a mood threshold.
    MoodChanged {
        /// The zombie whose mood changed.
        zombie_id: ZombieId,
        /// Previous mood.
        from: Mood,
        /// New mood.
        to: Mood,
    },
    /// The shelter flag was toggled.
    ShelterChanged {
        /// The zombie.
        zombie_id: ZombieId,
        /// New shelter flag.
        sheltered: bool,
    },
    /// A zombie was placed into storage.
    Contained {
        /// The zombie.
        zombie_id: ZombieId,
    },
    /// A zombie was taken out of storage.
    Released {
        /// The zombie.
        zombie_id: ZombieId,
    },
}

/// Named activity counters incremented by transitions.
///
/// The host forwards these to its telemetry collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ActivityCounter {
    /// A seed was planted.
    ZombiePlanted,
    /// A zombie was raised.
    ZombieRaised,
    /// A zombie was fed.
    ZombieFed,
    /// A zombie was pet.
    ZombiePet,
}

impl ActivityCounter {
    /// The counter's telemetry name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZombiePlanted => "zombie_planted",
            Self::ZombieRaised => "zombie_raised",
            Self::ZombieFed => "zombie_fed",
            Self::ZombiePet => "zombie_pet",
        }
    }
}
