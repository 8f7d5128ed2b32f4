//! Growth stage calculation for buried zombies.
//!
//! The stage is a pure function of elapsed time since planting and the
//! type's configured growth time. Nothing stored on the zombie is trusted
//! across evaluations; the cached `stage` field is refreshed for display
//! only.
//!
//! | Elapsed (% of growth time) | Stage |
//! |---|---|
//! | 0 -- 24 | `Buried` |
//! | 25 -- 59 | `Stirring` |
//! | 60 -- 99 | `Clawing` |
//! | 100+ | `ReadyToHarvest` |

use chrono::{DateTime, TimeDelta, Utc};

use necrofarm_types::{GrowingZombie, GrowthStage, ZombieType};

use crate::config::LifecycleConfig;
use crate::error::LifecycleError;

/// Percent of growth time at which a zombie starts `Stirring`.
const STIRRING_AT_PCT: i128 = 25;

/// Percent of growth time at which a zombie starts `Clawing`.
const CLAWING_AT_PCT: i128 = 60;

/// Compute the growth stage of a zombie planted at `planted_at`.
///
/// Monotonic in `now` and saturating at [`GrowthStage::ReadyToHarvest`].
/// A `now` before `planted_at` counts as zero elapsed time.
///
/// # Errors
///
/// [`LifecycleError::UnknownType`] if no profile is configured for the type.
pub fn stage_of(
    planted_at: DateTime<Utc>,
    zombie_type: ZombieType,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<GrowthStage, LifecycleError> {
    let profile = config.profile(zombie_type)?;
    Ok(stage_for_elapsed(
        now.signed_duration_since(planted_at),
        profile.growth_secs,
    ))
}

/// Map elapsed time onto a stage given the growth time in seconds.
pub fn stage_for_elapsed(elapsed: TimeDelta, growth_secs: i64) -> GrowthStage {
    let elapsed_secs = elapsed.num_seconds().max(0);
    if growth_secs <= 0 || elapsed_secs >= growth_secs {
        return GrowthStage::ReadyToHarvest;
    }

    // Both operands are non-negative and fit in i128 with room to spare.
    let pct = i128::from(elapsed_secs)
        .saturating_mul(100)
        .checked_div(i128::from(growth_secs))
        .unwrap_or(0);

    if pct >= CLAWING_AT_PCT {
        GrowthStage::Clawing
    } else if pct >= STIRRING_AT_PCT {
        GrowthStage::Stirring
    } else {
        GrowthStage::Buried
    }
}

/// The instant a growing zombie's clock started, after boosts.
///
/// Boosted time moves the anchor earlier, so the zombie matures sooner.
pub fn growth_anchor(zombie: &GrowingZombie) -> Result<DateTime<Utc>, LifecycleError> {
    let boost = TimeDelta::try_seconds(zombie.boosted_time_secs)
        .ok_or_else(|| LifecycleError::overflow("boosted time out of range"))?;
    zombie
        .buried_at
        .checked_sub_signed(boost)
        .ok_or_else(|| LifecycleError::overflow("growth anchor underflow"))
}

/// Current stage of a growing zombie.
pub fn stage_at(
    zombie: &GrowingZombie,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<GrowthStage, LifecycleError> {
    stage_of(growth_anchor(zombie)?, zombie.zombie_type, now, config)
}

/// The instant a growing zombie reaches `ReadyToHarvest`.
pub fn ready_at(
    zombie: &GrowingZombie,
    config: &LifecycleConfig,
) -> Result<DateTime<Utc>, LifecycleError> {
    let growth = config
        .profile(zombie.zombie_type)?
        .growth_time()
        .ok_or_else(|| LifecycleError::overflow("growth time out of range"))?;
    growth_anchor(zombie)?
        .checked_add_signed(growth)
        .ok_or_else(|| LifecycleError::overflow("ready time overflow"))
}

/// Time left until `ReadyToHarvest`, zero once ready.
pub fn time_until_ready(
    zombie: &GrowingZombie,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<TimeDelta, LifecycleError> {
    let remaining = ready_at(zombie, config)?.signed_duration_since(now);
    Ok(remaining.max(TimeDelta::zero()))
}
