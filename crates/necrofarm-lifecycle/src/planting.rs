//! Planting: bury a seed in an empty plot.
//!
//! Preconditions are checked in a fixed order and each has its own error,
//! so the host can tell the player exactly why planting failed:
//!
//! 1. the plot exists
//! 2. the plot has been placed
//! 3. the plot is empty
//! 4. the resource is a seed
//! 5. the seed's zombie type has a profile
//! 6. the zombie id is not already in use
//! 7. at least one seed is held
//!
//! Nothing is written until every check has passed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

use necrofarm_types::{
    ActivityCounter, FarmEvent, FarmSnapshot, GrowingZombie, PlotId, PlotOccupancy, Resource,
    ZombieId,
};

use crate::config::LifecycleConfig;
use crate::error::LifecycleError;
use crate::growth;
use crate::inventory;
use crate::transition::Transition;

/// Seeds consumed per planting.
const SEED_COST: Decimal = Decimal::ONE;

/// Growth-time multiplier from external boosts at plant time.
///
/// 1 means no boost; 0.5 would halve the growth time.
// TODO: read fertilizer and weather boosts from the snapshot once the host
// exposes them; until then planting is always unboosted.
pub const fn time_boost_multiplier(_snapshot: &FarmSnapshot) -> Decimal {
    Decimal::ONE
}

/// Seconds of growth time removed by a boost multiplier.
///
/// `growth_secs * (1 - multiplier)`, floored, never negative.
pub fn boosted_time_secs(growth_secs: i64, multiplier: Decimal) -> Result<i64, LifecycleError> {
    let reduction = Decimal::ONE
        .checked_sub(multiplier)
        .ok_or_else(|| LifecycleError::overflow("boost reduction"))?
        .max(Decimal::ZERO);
    Decimal::from(growth_secs)
        .checked_mul(reduction)
        .ok_or_else(|| LifecycleError::overflow("boosted time"))?
        .floor()
        .to_i64()
        .ok_or_else(|| LifecycleError::overflow("boosted time conversion"))
}

/// Plant `resource` into `plot_id`, creating a growing zombie `zombie_id`.
///
/// On success the plot is occupied with `care_level` and happiness at
/// their configured starting values, one seed is deducted, and a
/// `zombie_planted` activity is recorded.
pub fn plant(
    snapshot: &FarmSnapshot,
    plot_id: PlotId,
    resource: Resource,
    zombie_id: ZombieId,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Transition, LifecycleError> {
    // --- validate ---
    let plot = snapshot
        .plots
        .get(&plot_id)
        .ok_or(LifecycleError::PlotNotFound(plot_id))?;
    if plot.position.is_none() {
        return Err(LifecycleError::PlotNotPlaced(plot_id));
    }
    if !plot.is_empty() {
        return Err(LifecycleError::PlotOccupied(plot_id));
    }
    let zombie_type = resource
        .seed_type()
        .ok_or(LifecycleError::UnknownResource(resource))?;
    let profile = config.profile(zombie_type)?;
    if id_in_use(snapshot, zombie_id) {
        return Err(LifecycleError::DuplicateZombie(zombie_id));
    }
    inventory::require_resource(&snapshot.inventory, resource, SEED_COST)?;

    let boosted = boosted_time_secs(profile.growth_secs, time_boost_multiplier(snapshot))?;

    // --- apply ---
    let mut transition = Transition::begin(snapshot);
    let zombie = GrowingZombie {
        id: zombie_id,
        zombie_type,
        buried_at: now,
        stage: growth::stage_for_elapsed(chrono::TimeDelta::zero(), profile.growth_secs),
        happiness: config.planting.starting_happiness,
        boosted_time_secs: boosted,
    };
    if let Some(target) = transition.snapshot.plots.get_mut(&plot_id) {
        target.occupancy = PlotOccupancy::Occupied {
            zombie,
            care_level: config.planting.starting_care_level,
        };
    }
    inventory::remove_resource(&mut transition.snapshot.inventory, resource, SEED_COST)?;

    transition.events.push(FarmEvent::Planted {
        plot_id,
        zombie_id,
        zombie_type,
        at: now,
    });
    transition.activity.push(ActivityCounter::ZombiePlanted);

    info!(%plot_id, %zombie_id, ?zombie_type, "Zombie planted");
    Ok(transition)
}

/// Whether `zombie_id` already names a raised or growing zombie.
fn id_in_use(snapshot: &FarmSnapshot, zombie_id: ZombieId) -> bool {
    snapshot.zombies.contains_key(&zombie_id)
        || snapshot
            .plots
            .values()
            .filter_map(necrofarm_types::Plot::occupant)
            .any(|z| z.id == zombie_id)
}
