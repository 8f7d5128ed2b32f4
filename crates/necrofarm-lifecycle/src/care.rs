//! Decay and happiness engine for raised zombies.
//!
//! Condition decays once per whole day since the zombie was last
//! evaluated. Each day step applies:
//!
//! ```text
//! rate      = tier_rate * happiness_mult(h) * shelter_factor
//! condition = max(floor, condition * (1 - rate))
//! h         = h - loss_per_day   (floored at 0)
//! days_since_fed += 1
//! ```
//!
//! `happiness_mult` falls linearly from 1.0 at happiness 0 to
//! `min_happiness_multiplier` at 100, so a happy zombie decays slower.
//! Shelter removes `shelter_reduction` of the rate. Contained zombies do
//! not decay at all.
//!
//! Decay is lazy: nothing ticks in the background. Every care action first
//! catches the zombie up to `now`, then applies its own effect. A single
//! catch-up applies at most `max_catch_up_days` steps; when capped, the
//! excess is discarded and the anchor jumps to `now`. Otherwise the anchor
//! advances by exactly the whole days applied, so partial days carry over.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use necrofarm_types::{
    ActivityCounter, FarmEvent, FarmSnapshot, Mood, QualityTier, RaisedZombie, ZombieId,
    ZombieStatus,
};

use crate::config::{CareConfig, LifecycleConfig};
use crate::error::LifecycleError;
use crate::inventory;
use crate::transition::Transition;

/// Happiness and condition ceiling.
const MAX_HAPPINESS: u32 = 100;

/// A care action with a cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareAction {
    /// Feeding; consumes the feed resource.
    Feed,
    /// Petting; free.
    Pet,
}

// ---------------------------------------------------------------------------
// Rates and moods
// ---------------------------------------------------------------------------

/// Decay multiplier from happiness: 1.0 at 0 down to
/// `min_happiness_multiplier` at 100.
pub fn happiness_decay_multiplier(happiness: u32, care: &CareConfig) -> Decimal {
    let fraction = Decimal::new(i64::from(happiness.min(MAX_HAPPINESS)), 2);
    let span = Decimal::ONE.saturating_sub(care.min_happiness_multiplier);
    Decimal::ONE.saturating_sub(span.saturating_mul(fraction))
}

/// Fraction of condition lost in one day for the given tier and state.
pub fn daily_decay_rate(
    tier: QualityTier,
    happiness: u32,
    sheltered: bool,
    config: &LifecycleConfig,
) -> Result<Decimal, LifecycleError> {
    let shelter_factor = if sheltered {
        Decimal::ONE
            .checked_sub(config.care.shelter_reduction)
            .ok_or_else(|| LifecycleError::overflow("shelter factor"))?
    } else {
        Decimal::ONE
    };
    config
        .tiers
        .get(tier)
        .daily_rate
        .checked_mul(happiness_decay_multiplier(happiness, &config.care))
        .and_then(|rate| rate.checked_mul(shelter_factor))
        .ok_or_else(|| LifecycleError::overflow("daily decay rate"))
}

/// Mood bucket for a happiness value.
pub const fn mood_for(happiness: u32, care: &CareConfig) -> Mood {
    if happiness < care.unhappy_below {
        Mood::Unhappy
    } else if happiness >= care.happy_at {
        Mood::Happy
    } else {
        Mood::Content
    }
}

/// Push a `MoodChanged` event and update the zombie if its mood moved.
fn refresh_mood(zombie: &mut RaisedZombie, care: &CareConfig, events: &mut Vec<FarmEvent>) {
    let mood = mood_for(zombie.care.happiness, care);
    if mood != zombie.mood {
        events.push(FarmEvent::MoodChanged {
            zombie_id: zombie.id,
            from: zombie.mood,
            to: mood,
        });
        zombie.mood = mood;
    }
}

// ---------------------------------------------------------------------------
// Catch-up
// ---------------------------------------------------------------------------

/// Whole days between `from` and `now`; negative spans count as zero.
fn whole_days_since(zombie_id: ZombieId, from: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let elapsed = now.signed_duration_since(from);
    if elapsed < TimeDelta::zero() {
        warn!(
            %zombie_id,
            last_evaluated_at = %from,
            %now,
            "Evaluation time precedes last evaluation; treating as zero elapsed"
        );
        return 0;
    }
    u32::try_from(elapsed.num_days()).unwrap_or(u32::MAX)
}

/// Apply every whole day of decay owed up to `now`, in place.
///
/// Returns the number of day steps applied. On error `zombie` is left as
/// it was.
pub(crate) fn catch_up(
    zombie: &mut RaisedZombie,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
    events: &mut Vec<FarmEvent>,
) -> Result<u32, LifecycleError> {
    if zombie.care.contained {
        return Ok(0);
    }
    let owed = whole_days_since(zombie.id, zombie.care.last_evaluated_at, now);
    if owed == 0 {
        return Ok(0);
    }
    let applied = owed.min(config.care.max_catch_up_days);

    let floor = config.tiers.get(zombie.quality).floor;
    let mut condition = zombie.care.condition;
    let mut happiness = zombie.care.happiness;
    for _ in 0..applied {
        let rate = daily_decay_rate(zombie.quality, happiness, zombie.care.sheltered, config)?;
        let retained = Decimal::ONE
            .checked_sub(rate)
            .ok_or_else(|| LifecycleError::overflow("retained fraction"))?;
        condition = condition
            .checked_mul(retained)
            .ok_or_else(|| LifecycleError::overflow("condition decay"))?
            .max(floor);
        happiness = happiness.saturating_sub(config.care.happiness_loss_per_day);
    }

    let anchor = if owed > applied {
        now
    } else {
        TimeDelta::try_days(i64::from(applied))
            .and_then(|span| zombie.care.last_evaluated_at.checked_add_signed(span))
            .ok_or_else(|| LifecycleError::overflow("evaluation anchor"))?
    };

    let condition_before = zombie.care.condition;
    let happiness_before = zombie.care.happiness;
    zombie.care.condition = condition;
    zombie.care.happiness = happiness;
    zombie.care.days_since_fed = zombie.care.days_since_fed.saturating_add(applied);
    zombie.care.last_evaluated_at = anchor;

    debug!(
        zombie_id = %zombie.id,
        owed,
        applied,
        %condition_before,
        condition_after = %condition,
        happiness_before,
        happiness_after = happiness,
        "Decay evaluated"
    );
    events.push(FarmEvent::Decayed {
        zombie_id: zombie.id,
        days: applied,
        condition_before,
        condition_after: condition,
        happiness_before,
        happiness_after: happiness,
        at_floor: condition <= floor,
    });
    refresh_mood(zombie, &config.care, events);
    Ok(applied)
}

/// Evaluate one zombie at `now` without touching the input.
///
/// Returns the updated zombie and the events the evaluation produced.
/// Contained zombies come back unchanged with no events.
pub fn evaluate(
    zombie: &RaisedZombie,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<(RaisedZombie, Vec<FarmEvent>), LifecycleError> {
    let mut updated = zombie.clone();
    let mut events = Vec::new();
    catch_up(&mut updated, now, config, &mut events)?;
    Ok((updated, events))
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

fn find_zombie(
    snapshot: &FarmSnapshot,
    zombie_id: ZombieId,
) -> Result<&RaisedZombie, LifecycleError> {
    snapshot
        .zombies
        .get(&zombie_id)
        .ok_or(LifecycleError::ZombieNotFound(zombie_id))
}

/// Fail with [`LifecycleError::OnCooldown`] if `last` plus the cooldown is
/// still in the future.
pub(crate) fn check_cooldown(
    zombie_id: ZombieId,
    action: CareAction,
    last: Option<DateTime<Utc>>,
    cooldown_secs: i64,
    now: DateTime<Utc>,
) -> Result<(), LifecycleError> {
    let Some(last) = last else {
        return Ok(());
    };
    let available_at = TimeDelta::try_seconds(cooldown_secs)
        .and_then(|cooldown| last.checked_add_signed(cooldown))
        .ok_or_else(|| LifecycleError::overflow("cooldown end"))?;
    if now < available_at {
        return Err(LifecycleError::OnCooldown {
            zombie_id,
            action,
            remaining_secs: available_at.signed_duration_since(now).num_seconds().max(1),
        });
    }
    Ok(())
}

/// Catch up a single zombie to `now`.
pub fn evaluate_zombie(
    snapshot: &FarmSnapshot,
    zombie_id: ZombieId,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Transition, LifecycleError> {
    let (updated, events) = evaluate(find_zombie(snapshot, zombie_id)?, now, config)?;
    let mut transition = Transition::begin(snapshot);
    transition.snapshot.zombies.insert(zombie_id, updated);
    transition.events = events;
    Ok(transition)
}

/// Feed one zombie inside an open transition.
///
/// Either every effect lands in `transition` or none does.
pub(crate) fn feed_into(
    transition: &mut Transition,
    zombie_id: ZombieId,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<(), LifecycleError> {
    let care = &config.care;
    let current = find_zombie(&transition.snapshot, zombie_id)?;
    if current.care.contained {
        return Err(LifecycleError::Contained(zombie_id));
    }
    check_cooldown(
        zombie_id,
        CareAction::Feed,
        current.care.last_fed_at,
        care.feed_cooldown_secs,
        now,
    )?;
    inventory::require_resource(&transition.snapshot.inventory, care.feed_resource, care.feed_cost)?;

    let mut zombie = current.clone();
    let mut events = Vec::new();
    catch_up(&mut zombie, now, config, &mut events)?;

    zombie.care.happiness = zombie
        .care
        .happiness
        .saturating_add(care.feed_happiness)
        .min(MAX_HAPPINESS);
    zombie.care.days_since_fed = 0;
    zombie.care.last_fed_at = Some(now);
    zombie.care.last_evaluated_at = zombie.care.last_evaluated_at.max(now);
    events.push(FarmEvent::Fed {
        zombie_id,
        happiness: zombie.care.happiness,
        at: now,
    });
    refresh_mood(&mut zombie, care, &mut events);

    inventory::remove_resource(
        &mut transition.snapshot.inventory,
        care.feed_resource,
        care.feed_cost,
    )?;
    info!(%zombie_id, happiness = zombie.care.happiness, "Zombie fed");
    transition.snapshot.zombies.insert(zombie_id, zombie);
    transition.events.extend(events);
    transition.activity.push(ActivityCounter::ZombieFed);
    Ok(())
}

/// Feed a zombie.
///
/// Catches up decay first, then restores happiness, resets
/// `days_since_fed`, and deducts the feed cost. The partial day in
/// progress is forgiven: the decay anchor moves to `now`, never backwards.
pub fn feed(
    snapshot: &FarmSnapshot,
    zombie_id: ZombieId,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Transition, LifecycleError> {
    let mut transition = Transition::begin(snapshot);
    feed_into(&mut transition, zombie_id, now, config)?;
    Ok(transition)
}

/// Pet a zombie: catch up, then add happiness.
pub fn pet(
    snapshot: &FarmSnapshot,
    zombie_id: ZombieId,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Transition, LifecycleError> {
    let care = &config.care;
    let current = find_zombie(snapshot, zombie_id)?;
    if current.care.contained {
        return Err(LifecycleError::Contained(zombie_id));
    }
    check_cooldown(
        zombie_id,
        CareAction::Pet,
        current.care.last_pet_at,
        care.pet_cooldown_secs,
        now,
    )?;

    let mut zombie = current.clone();
    let mut events = Vec::new();
    catch_up(&mut zombie, now, config, &mut events)?;
    zombie.care.happiness = zombie
        .care
        .happiness
        .saturating_add(care.pet_happiness)
        .min(MAX_HAPPINESS);
    zombie.care.last_pet_at = Some(now);
    events.push(FarmEvent::Pet {
        zombie_id,
        happiness: zombie.care.happiness,
        at: now,
    });
    refresh_mood(&mut zombie, care, &mut events);

    debug!(%zombie_id, happiness = zombie.care.happiness, "Zombie pet");
    let mut transition = Transition::begin(snapshot);
    transition.snapshot.zombies.insert(zombie_id, zombie);
    transition.events = events;
    transition.activity.push(ActivityCounter::ZombiePet);
    Ok(transition)
}

/// Put a zombie under or out of shelter.
///
/// Decay owed under the old setting is applied first. Setting the flag to
/// its current value only catches up.
pub fn set_sheltered(
    snapshot: &FarmSnapshot,
    zombie_id: ZombieId,
    sheltered: bool,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Transition, LifecycleError> {
    let (mut zombie, mut events) = evaluate(find_zombie(snapshot, zombie_id)?, now, config)?;
    if zombie.care.sheltered != sheltered {
        zombie.care.sheltered = sheltered;
        events.push(FarmEvent::ShelterChanged {
            zombie_id,
            sheltered,
        });
    }
    let mut transition = Transition::begin(snapshot);
    transition.snapshot.zombies.insert(zombie_id, zombie);
    transition.events = events;
    Ok(transition)
}

/// Move a zombie into storage. Decay pauses until it is released.
pub fn contain(
    snapshot: &FarmSnapshot,
    zombie_id: ZombieId,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Transition, LifecycleError> {
    let current = find_zombie(snapshot, zombie_id)?;
    if current.care.contained {
        return Err(LifecycleError::Contained(zombie_id));
    }
    let (mut zombie, mut events) = evaluate(current, now, config)?;
    zombie.care.contained = true;
    zombie.status = ZombieStatus::Contained;
    zombie.is_wandering = false;
    events.push(FarmEvent::Contained { zombie_id });

    info!(%zombie_id, "Zombie contained");
    let mut transition = Transition::begin(snapshot);
    transition.snapshot.zombies.insert(zombie_id, zombie);
    transition.events = events;
    Ok(transition)
}

/// Take a zombie out of storage.
///
/// The decay anchor restarts at `now`, so time spent contained never
/// counts. An anchor already later than `now` is kept.
///
/// The zombie always comes back `Wandering`; whatever status it had
/// before containment (`Idle`, say) is not restored.
pub fn release(
    snapshot: &FarmSnapshot,
    zombie_id: ZombieId,
    now: DateTime<Utc>,
) -> Result<Transition, LifecycleError> {
    let current = find_zombie(snapshot, zombie_id)?;
    if !current.care.contained {
        return Err(LifecycleError::NotContained(zombie_id));
    }
    let mut zombie = current.clone();
    zombie.care.contained = false;
    zombie.care.last_evaluated_at = zombie.care.last_evaluated_at.max(now);
    zombie.status = ZombieStatus::Wandering;
    zombie.is_wandering = true;

    info!(%zombie_id, "Zombie released");
    let mut transition = Transition::begin(snapshot);
    transition.snapshot.zombies.insert(zombie_id, zombie);
    transition.events.push(FarmEvent::Released { zombie_id });
    Ok(transition)
}
