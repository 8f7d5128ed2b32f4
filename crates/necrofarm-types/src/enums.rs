//! Enumeration types for the Necrofarm lifecycle engine.
//!
//! Zombie types, seed resources, growth stages, quality tiers, and the
//! operational/mood buckets carried by a raised zombie.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Zombie types and resources
// ---------------------------------------------------------------------------

/// The kind of zombie a seed grows into.
///
/// The type selects the growth curve, base combat stats, and minimum quality
/// tier from the configured zombie profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ZombieType {
    /// Slow, sturdy, and cheap. The common starter type.
    Shambler,
    /// Fast and fragile.
    Runner,
    /// Heavy hitter with a long growth time.
    Brute,
    /// Rare type with high base stats and a raised quality floor.
    Ghoul,
}

/// A resource held in the caretaker's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Resource {
    /// Seed that grows into a [`ZombieType::Shambler`].
    ShamblerSeed,
    /// Seed that grows into a [`ZombieType::Runner`].
    RunnerSeed,
    /// Seed that grows into a [`ZombieType::Brute`].
    BruteSeed,
    /// Seed that grows into a [`ZombieType::Ghoul`].
    GhoulSeed,
    /// Feed for raised zombies.
    Brain,
    /// Rotten flesh. Not plantable; kept as a currency-like byproduct.
    RottenFlesh,
}

impl Resource {
    /// Return the zombie type this resource grows into, if it is a seed.
    pub const fn seed_type(self) -> Option<ZombieType> {
        match self {
            Self::ShamblerSeed => Some(ZombieType::Shambler),
            Self::RunnerSeed => Some(ZombieType::Runner),
            Self::BruteSeed => Some(ZombieType::Brute),
            Self::GhoulSeed => Some(ZombieType::Ghoul),
            Self::Brain | Self::RottenFlesh => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// Discrete growth phase of a buried zombie.
///
/// Variants are declared in growth order, so the derived [`Ord`] matches
/// the progression and `ReadyToHarvest` is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum GrowthStage {
    /// Freshly buried; no visible change yet.
    Buried,
    /// The soil has started to move.
    Stirring,
    /// A hand is breaking the surface.
    Clawing,
    /// Terminal stage. The zombie can be raised.
    ReadyToHarvest,
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Quality tier assigned when a zombie is raised.
///
/// Higher tiers decay faster but bottom out at a higher floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum QualityTier {
    /// Lowest tier.
    Common,
    /// Second tier.
    Bronze,
    /// Middle tier.
    Silver,
    /// Fourth tier.
    Gold,
    /// Top tier.
    Diamond,
}

// ---------------------------------------------------------------------------
// Raised zombie state
// ---------------------------------------------------------------------------

/// Operational state of a raised zombie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ZombieStatus {
    /// Roaming the farm toward its wander target.
    Wandering,
    /// Standing still on the farm.
    Idle,
    /// Placed in special storage. Simulation is paused.
    Contained,
}

/// Qualitative happiness bucket derived from the numeric happiness value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Mood {
    /// Happiness below the lower threshold.
    Unhappy,
    /// Between the two thresholds.
    Content,
    /// Happiness at or above the upper threshold.
    Happy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_seed_maps_to_a_type() {
        assert_eq!(Resource::ShamblerSeed.seed_type(), Some(ZombieType::Shambler));
        assert_eq!(Resource::RunnerSeed.seed_type(), Some(ZombieType::Runner));
        assert_eq!(Resource::BruteSeed.seed_type(), Some(ZombieType::Brute));
        assert_eq!(Resource::GhoulSeed.seed_type(), Some(ZombieType::Ghoul));
    }

    #[test]
    fn non_seeds_have_no_type() {
        assert_eq!(Resource::Brain.seed_type(), None);
        assert_eq!(Resource::RottenFlesh.seed_type(), None);
    }

    #[test]
    fn growth_stages_are_ordered() {
        assert!(GrowthStage::Buried < GrowthStage::Stirring);
        assert!(GrowthStage::Stirring < GrowthStage::Clawing);
        assert!(GrowthStage::Clawing < GrowthStage::ReadyToHarvest);
    }

    #[test]
    fn quality_tiers_are_ordered() {
        assert!(QualityTier::Common < QualityTier::Bronze);
        assert!(QualityTier::Gold < QualityTier::Diamond);
    }
}
