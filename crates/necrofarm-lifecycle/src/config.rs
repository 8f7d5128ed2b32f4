//! Tunables for growth, raising, and care decay.
//!
//! [`LifecycleConfig`] bundles every parameter the engine reads so hosts
//! and tests can override defaults. `necrofarm-core` deserializes it from
//! the `lifecycle` section of `necrofarm-config.yaml`; any missing key
//! falls back to the defaults documented on each field.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use necrofarm_types::{QualityTier, Resource, ZombieType};

use crate::error::LifecycleError;

// ---------------------------------------------------------------------------
// Zombie profiles
// ---------------------------------------------------------------------------

/// Base combat stats before happiness and care multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Base hit points.
    pub hp: u32,
    /// Base attack.
    pub attack: u32,
    /// Base defense.
    pub defense: u32,
    /// Speed. Copied unmodified onto the raised zombie.
    pub speed: u32,
}

/// Growth curve and stats for one zombie type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZombieProfile {
    /// Seconds from planting to `ReadyToHarvest`.
    pub growth_secs: i64,
    /// Stats before multipliers.
    pub base_stats: BaseStats,
    /// Minimum quality tier a raise can produce.
    pub base_tier: QualityTier,
}

impl ZombieProfile {
    /// Growth time as a [`TimeDelta`].
    ///
    /// Returns `None` if `growth_secs` is outside the representable range.
    pub fn growth_time(&self) -> Option<TimeDelta> {
        TimeDelta::try_seconds(self.growth_secs)
    }
}

fn default_profiles() -> BTreeMap<ZombieType, ZombieProfile> {
    BTreeMap::from([
        (
            ZombieType::Shambler,
            ZombieProfile {
                growth_secs: 4 * 3600,
                base_stats: BaseStats {
                    hp: 100,
                    attack: 10,
                    defense: 10,
                    speed: 5,
                },
                base_tier: QualityTier::Common,
            },
        ),
        (
            ZombieType::Runner,
            ZombieProfile {
                growth_secs: 6 * 3600,
                base_stats: BaseStats {
                    hp: 80,
                    attack: 12,
                    defense: 6,
                    speed: 12,
                },
                base_tier: QualityTier::Common,
            },
        ),
        (
            ZombieType::Brute,
            ZombieProfile {
                growth_secs: 12 * 3600,
                base_stats: BaseStats {
                    hp: 160,
                    attack: 18,
                    defense: 14,
                    speed: 3,
                },
                base_tier: QualityTier::Bronze,
            },
        ),
        (
            ZombieType::Ghoul,
            ZombieProfile {
                growth_secs: 24 * 3600,
                base_stats: BaseStats {
                    hp: 130,
                    attack: 20,
                    defense: 12,
                    speed: 8,
                },
                base_tier: QualityTier::Silver,
            },
        ),
    ])
}

// ---------------------------------------------------------------------------
// Tier decay table
// ---------------------------------------------------------------------------

/// Decay parameters for one quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDecay {
    /// Fraction of condition lost per day of neglect (0.01 = 1%).
    pub daily_rate: Decimal,
    /// Condition (percent) below which decay never goes.
    pub floor: Decimal,
}

/// Decay parameters for every quality tier.
///
/// One field per tier keeps lookups total: a tier can never be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    /// Common: 1.0%/day, floor 20.
    pub common: TierDecay,
    /// Bronze: 1.5%/day, floor 25.
    pub bronze: TierDecay,
    /// Silver: 2.0%/day, floor 30.
    pub silver: TierDecay,
    /// Gold: 2.5%/day, floor 35.
    pub gold: TierDecay,
    /// Diamond: 3.0%/day, floor 40.
    pub diamond: TierDecay,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            common: TierDecay {
                daily_rate: Decimal::new(10, 3),
                floor: Decimal::from(20),
            },
            bronze: TierDecay {
                daily_rate: Decimal::new(15, 3),
                floor: Decimal::from(25),
            },
            silver: TierDecay {
                daily_rate: Decimal::new(20, 3),
                floor: Decimal::from(30),
            },
            gold: TierDecay {
                daily_rate: Decimal::new(25, 3),
                floor: Decimal::from(35),
            },
            diamond: TierDecay {
                daily_rate: Decimal::new(30, 3),
                floor: Decimal::from(40),
            },
        }
    }
}

impl TierTable {
    /// Every tier with its configuration key, lowest quality first.
    pub const fn named(&self) -> [(&'static str, &TierDecay); 5] {
        [
            ("common", &self.common),
            ("bronze", &self.bronze),
            ("silver", &self.silver),
            ("gold", &self.gold),
            ("diamond", &self.diamond),
        ]
    }

    /// Decay parameters for a tier.
    pub const fn get(&self, tier: QualityTier) -> &TierDecay {
        match tier {
            QualityTier::Common => &self.common,
            QualityTier::Bronze => &self.bronze,
            QualityTier::Silver => &self.silver,
            QualityTier::Gold => &self.gold,
            QualityTier::Diamond => &self.diamond,
        }
    }
}

// ---------------------------------------------------------------------------
// Care
// ---------------------------------------------------------------------------

/// Feeding, petting, happiness, and catch-up parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareConfig {
    /// Resource consumed by feeding (default: `Brain`).
    pub feed_resource: Resource,
    /// Units consumed per feeding (default: 1).
    pub feed_cost: Decimal,
    /// Happiness restored by feeding, capped at 100 (default: 20).
    pub feed_happiness: u32,
    /// Minimum seconds between feedings (default: 4 hours).
    pub feed_cooldown_secs: i64,
    /// Happiness restored by petting, capped at 100 (default: 5).
    pub pet_happiness: u32,
    /// Minimum seconds between pettings (default: 1 hour).
    pub pet_cooldown_secs: i64,
    /// Happiness lost per unfed day, floored at 0 (default: 5).
    pub happiness_loss_per_day: u32,
    /// Happiness strictly below this is `Unhappy` (default: 30).
    pub unhappy_below: u32,
    /// Happiness at or above this is `Happy` (default: 70).
    pub happy_at: u32,
    /// Decay multiplier at happiness 100 (default: 0.5).
    ///
    /// The multiplier falls linearly from 1.0 at happiness 0 to this value
    /// at happiness 100.
    pub min_happiness_multiplier: Decimal,
    /// Fraction of the decay rate removed while sheltered (default: 0.2).
    pub shelter_reduction: Decimal,
    /// Maximum days applied by a single catch-up (default: 7).
    pub max_catch_up_days: u32,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            feed_resource: Resource::Brain,
            feed_cost: Decimal::ONE,
            feed_happiness: 20,
            feed_cooldown_secs: 4 * 3600,
            pet_happiness: 5,
            pet_cooldown_secs: 3600,
            happiness_loss_per_day: 5,
            unhappy_below: 30,
            happy_at: 70,
            min_happiness_multiplier: Decimal::new(5, 1),
            shelter_reduction: Decimal::new(2, 1),
            max_catch_up_days: 7,
        }
    }
}

// ---------------------------------------------------------------------------
// Planting and raising
// ---------------------------------------------------------------------------

/// Parameters applied when a seed is planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantingConfig {
    /// Happiness of a freshly buried zombie (default: 50).
    pub starting_happiness: u32,
    /// Care level of a freshly planted plot (default: 50).
    pub starting_care_level: u32,
}

impl Default for PlantingConfig {
    fn default() -> Self {
        Self {
            starting_happiness: 50,
            starting_care_level: 50,
        }
    }
}

/// Parameters applied when a zombie is raised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaisingConfig {
    /// Half-width of the wander-target jitter box per axis (default: 10).
    pub wander_radius: f64,
    /// Experience granted to the caretaker per raise (default: 10).
    pub caretaker_xp: u64,
    /// Happiness of a freshly raised zombie (default: 100).
    pub raised_happiness: u32,
}

impl Default for RaisingConfig {
    fn default() -> Self {
        Self {
            wander_radius: 10.0,
            caretaker_xp: 10,
            raised_happiness: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// LifecycleConfig
// ---------------------------------------------------------------------------

/// Every tunable the lifecycle engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Growth curve and stats per zombie type.
    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<ZombieType, ZombieProfile>,
    /// Decay rate and floor per quality tier.
    #[serde(default)]
    pub tiers: TierTable,
    /// Feeding, petting, and happiness parameters.
    #[serde(default)]
    pub care: CareConfig,
    /// Planting parameters.
    #[serde(default)]
    pub planting: PlantingConfig,
    /// Raising parameters.
    #[serde(default)]
    pub raising: RaisingConfig,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            tiers: TierTable::default(),
            care: CareConfig::default(),
            planting: PlantingConfig::default(),
            raising: RaisingConfig::default(),
        }
    }
}

impl LifecycleConfig {
    /// Look up the profile for a zombie type.
    pub fn profile(&self, zombie_type: ZombieType) -> Result<&ZombieProfile, LifecycleError> {
        self.profiles
            .get(&zombie_type)
            .ok_or(LifecycleError::UnknownType(zombie_type))
    }

    /// Check that every decay parameter keeps condition within its bounds.
    ///
    /// Daily rates and `shelter_reduction` must lie in `[0, 1)`,
    /// `min_happiness_multiplier` in `[0, 1]`, and floors in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidConfig`] found, in field order.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        for (name, tier) in self.tiers.named() {
            check_fraction(name, "daily_rate", tier.daily_rate)?;
            check_range(
                name,
                "floor",
                tier.floor,
                Decimal::ONE_HUNDRED,
                "between 0 and 100",
            )?;
        }
        check_fraction("care", "shelter_reduction", self.care.shelter_reduction)?;
        check_range(
            "care",
            "min_happiness_multiplier",
            self.care.min_happiness_multiplier,
            Decimal::ONE,
            "between 0 and 1",
        )
    }
}

/// A configuration value outside the range the engine accepts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{section}.{field} = {value} must be {expected}")]
pub struct InvalidConfig {
    /// Section holding the field, e.g. `care` or `gold`.
    pub section: &'static str,
    /// The offending field.
    pub field: &'static str,
    /// The value found.
    pub value: Decimal,
    /// The accepted range.
    pub expected: &'static str,
}

/// Require `0 <= value < 1`.
fn check_fraction(
    section: &'static str,
    field: &'static str,
    value: Decimal,
) -> Result<(), InvalidConfig> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(InvalidConfig {
            section,
            field,
            value,
            expected: "at least 0 and below 1",
        });
    }
    Ok(())
}

/// Require `0 <= value <= max`.
fn check_range(
    section: &'static str,
    field: &'static str,
    value: Decimal,
    max: Decimal,
    expected: &'static str,
) -> Result<(), InvalidConfig> {
    if value < Decimal::ZERO || value > max {
        return Err(InvalidConfig {
            section,
            field,
            value,
            expected,
        });
    }
    Ok(())
}
