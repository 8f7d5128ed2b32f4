//! Raising: turn a ready growing zombie into an autonomous raised zombie.
//!
//! Stats are derived from the type's base stats and two multipliers taken
//! from the growing zombie and its plot:
//!
//! ```text
//! happiness_mult = 1 + (happiness - 50) / 100     (0 -> 0.5x, 100 -> 1.5x)
//! care_mult      = 1 + (care_level - 50) / 100
//! max_hp  = current_hp = floor(base_hp * happiness_mult * care_mult)
//! attack  = floor(base_attack * happiness_mult)
//! defense = floor(base_defense * care_mult)
//! speed   = base_speed
//! ```
//!
//! Quality is assigned from the same two inputs (see [`calculate_quality`]).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info};

use necrofarm_types::{
    ActivityCounter, CareState, CombatStats, FarmEvent, FarmSnapshot, GrowthStage, Mood, PlotId,
    PlotOccupancy, Position, QualityTier, RaisedZombie, ZombieStatus,
};

use crate::config::{BaseStats, LifecycleConfig};
use crate::error::LifecycleError;
use crate::growth;
use crate::transition::Transition;

/// Neutral point for happiness and care multipliers.
const NEUTRAL: i64 = 50;

/// Happiness and care values are clamped to this before use.
const MAX_SCORE: u32 = 100;

/// Caretaker experience needed per level.
const CARETAKER_XP_PER_LEVEL: u64 = 100;

// ---------------------------------------------------------------------------
// Multipliers and stats
// ---------------------------------------------------------------------------

/// `1 + (value - 50) / 100`, with `value` clamped to 0--100.
fn centered_multiplier(value: u32) -> Decimal {
    let offset = i64::from(value.min(MAX_SCORE)).saturating_sub(NEUTRAL);
    Decimal::ONE.saturating_add(Decimal::new(offset, 2))
}

/// Stat multiplier from happiness: 0.5 at 0, 1.0 at 50, 1.5 at 100.
pub fn happiness_multiplier(happiness: u32) -> Decimal {
    centered_multiplier(happiness)
}

/// Stat multiplier from plot care level: 0.5 at 0, 1.0 at 50, 1.5 at 100.
pub fn care_multiplier(care_level: u32) -> Decimal {
    centered_multiplier(care_level)
}

/// Multiply and floor to an integer stat.
fn floored_stat(base: u32, factors: &[Decimal]) -> Result<u32, LifecycleError> {
    let mut value = Decimal::from(base);
    for factor in factors {
        value = value
            .checked_mul(*factor)
            .ok_or_else(|| LifecycleError::overflow("stat multiplication"))?;
    }
    value
        .floor()
        .to_u32()
        .ok_or_else(|| LifecycleError::overflow("stat conversion"))
}

/// Derive raised combat stats from base stats and the two multipliers.
pub fn derive_stats(
    base: &BaseStats,
    happiness_mult: Decimal,
    care_mult: Decimal,
) -> Result<CombatStats, LifecycleError> {
    let max_hp = floored_stat(base.hp, &[happiness_mult, care_mult])?;
    Ok(CombatStats {
        max_hp,
        current_hp: max_hp,
        attack: floored_stat(base.attack, &[happiness_mult])?,
        defense: floored_stat(base.defense, &[care_mult])?,
        speed: base.speed,
    })
}

/// Assign a quality tier from happiness and care level at raise time.
///
/// The score is the mean of the two (0--100):
///
/// | Score | Tier |
/// |---|---|
/// | 95+ | Diamond |
/// | 85+ | Gold |
/// | 70+ | Silver |
/// | 55+ | Bronze |
/// | else | Common |
///
/// The result is never below `base_tier`.
pub fn calculate_quality(happiness: u32, care_level: u32, base_tier: QualityTier) -> QualityTier {
    let score = happiness
        .min(MAX_SCORE)
        .saturating_add(care_level.min(MAX_SCORE))
        .checked_div(2)
        .unwrap_or_default();
    let earned = match score {
        95.. => QualityTier::Diamond,
        85..=94 => QualityTier::Gold,
        70..=84 => QualityTier::Silver,
        55..=69 => QualityTier::Bronze,
        _ => QualityTier::Common,
    };
    earned.max(base_tier)
}

/// Caretaker level for a total experience: 1 plus one per 100 xp.
pub fn caretaker_level(experience: u64) -> u32 {
    let earned = experience
        .checked_div(CARETAKER_XP_PER_LEVEL)
        .unwrap_or_default();
    u32::try_from(earned).unwrap_or(u32::MAX).saturating_add(1)
}

/// Pick a wander target uniformly within `radius` of `origin` on each axis.
pub fn jitter_target(origin: Position, radius: f64, rng: &mut impl Rng) -> Position {
    let r = radius.abs();
    if !r.is_finite() || r <= 0.0 {
        return origin;
    }
    Position {
        x: origin.x + rng.random_range(-r..=r),
        y: origin.y + rng.random_range(-r..=r),
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Raise the zombie growing in `plot_id`.
///
/// Fails with [`LifecycleError::NotReady`] unless the occupant's stage at
/// `now` is `ReadyToHarvest`. On success the plot is emptied, the raised
/// zombie is inserted into the collection, the caretaker (if any) earns
/// experience, and a `zombie_raised` activity is recorded.
///
/// `rng` only drives the wander-target jitter.
pub fn raise(
    snapshot: &FarmSnapshot,
    plot_id: PlotId,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
    rng: &mut impl Rng,
) -> Result<Transition, LifecycleError> {
    // --- validate ---
    let plot = snapshot
        .plots
        .get(&plot_id)
        .ok_or(LifecycleError::PlotNotFound(plot_id))?;
    let PlotOccupancy::Occupied { zombie, care_level } = &plot.occupancy else {
        return Err(LifecycleError::PlotEmpty(plot_id));
    };
    let stage = growth::stage_at(zombie, now, config)?;
    if stage != GrowthStage::ReadyToHarvest {
        let remaining = growth::time_until_ready(zombie, now, config)?;
        debug!(
            %plot_id,
            ?stage,
            remaining_secs = remaining.num_seconds(),
            "Raise attempted before ready"
        );
        return Err(LifecycleError::NotReady { plot_id, stage });
    }
    if snapshot.zombies.contains_key(&zombie.id) {
        return Err(LifecycleError::DuplicateZombie(zombie.id));
    }
    let profile = config.profile(zombie.zombie_type)?;

    let happiness_mult = happiness_multiplier(zombie.happiness);
    let care_mult = care_multiplier(*care_level);
    let stats = derive_stats(&profile.base_stats, happiness_mult, care_mult)?;
    let quality = calculate_quality(zombie.happiness, *care_level, profile.base_tier);
    let matured_at = growth::ready_at(zombie, config)?;
    let position = plot.position.unwrap_or_default();
    let wander_target = jitter_target(position, config.raising.wander_radius, rng);

    let raised = RaisedZombie {
        id: zombie.id,
        zombie_type: zombie.zombie_type,
        quality,
        matured_at,
        harvested_at: now,
        position,
        wander_target,
        stats,
        level: 1,
        experience: 0,
        permanent_injuries: BTreeSet::new(),
        battle_scars: 0,
        combat_refusal_chance: Decimal::ZERO,
        status: ZombieStatus::Wandering,
        mood: Mood::Happy,
        is_wandering: true,
        care: CareState {
            condition: Decimal::ONE_HUNDRED,
            happiness: config.raising.raised_happiness.min(MAX_SCORE),
            days_since_fed: 0,
            last_fed_at: None,
            last_pet_at: None,
            last_evaluated_at: now,
            sheltered: false,
            contained: false,
        },
        mutations: BTreeMap::new(),
    };
    let zombie_id = raised.id;

    // --- apply ---
    let mut transition = Transition::begin(snapshot);
    transition.snapshot.zombies.insert(zombie_id, raised);
    if let Some(target) = transition.snapshot.plots.get_mut(&plot_id) {
        target.occupancy = PlotOccupancy::Empty;
    }
    if let Some(caretaker) = transition.snapshot.caretaker.as_mut() {
        caretaker.experience = caretaker
            .experience
            .saturating_add(config.raising.caretaker_xp);
        caretaker.level = caretaker_level(caretaker.experience);
    }

    transition.events.push(FarmEvent::Raised {
        plot_id,
        zombie_id,
        quality,
        at: now,
    });
    transition.activity.push(ActivityCounter::ZombieRaised);

    info!(
        %plot_id,
        %zombie_id,
        ?quality,
        max_hp = stats.max_hp,
        attack = stats.attack,
        defense = stats.defense,
        "Zombie raised"
    );
    Ok(transition)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    use necrofarm_types::{Caretaker, GrowingZombie, Plot, ZombieId, ZombieType};

    use super::*;

    const GROWTH_SECS: i64 = 4 * 3600;

    const fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    fn at_secs(secs: i64) -> DateTime<Utc> {
        t0() + chrono::TimeDelta::seconds(secs)
    }

    fn farm_with_growing(happiness: u32, care_level: u32) -> (FarmSnapshot, PlotId, ZombieId) {
        let plot_id = PlotId::new();
        let zombie_id = ZombieId::new();
        let plot = Plot {
            id: plot_id,
            position: Some(Position::new(100.0, -50.0)),
            occupancy: PlotOccupancy::Occupied {
                zombie: GrowingZombie {
                    id: zombie_id,
                    zombie_type: ZombieType::Shambler,
                    buried_at: t0(),
                    stage: GrowthStage::Buried,
                    happiness,
                    boosted_time_secs: 0,
                },
                care_level,
            },
        };
        let snapshot = FarmSnapshot {
            plots: BTreeMap::from([(plot_id, plot)]),
            caretaker: Some(Caretaker::default()),
            ..FarmSnapshot::default()
        };
        (snapshot, plot_id, zombie_id)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn multipliers_are_linear_around_fifty() {
        assert_eq!(happiness_multiplier(0), dec!(0.5));
        assert_eq!(happiness_multiplier(50), dec!(1));
        assert_eq!(happiness_multiplier(70), dec!(1.2));
        assert_eq!(happiness_multiplier(100), dec!(1.5));
        assert_eq!(care_multiplier(30), dec!(0.8));
    }

    #[test]
    fn multipliers_clamp_out_of_range_input() {
        assert_eq!(happiness_multiplier(250), dec!(1.5));
    }

    #[test]
    fn raise_at_growth_boundary_derives_stats() {
        let (snapshot, plot_id, zombie_id) = farm_with_growing(70, 50);
        let cfg = LifecycleConfig::default();

        let result = raise(&snapshot, plot_id, at_secs(GROWTH_SECS), &cfg, &mut rng());
        assert!(result.is_ok());
        let t = result.unwrap_or_else(|_| Transition::begin(&snapshot));
        let raised = t.snapshot.zombies.get(&zombie_id);
        assert!(raised.is_some());
        let stats = raised.map(|z| z.stats).unwrap_or_default();

        // floor(100 * 1.2 * 1.0)
        assert_eq!(stats.max_hp, 120);
        assert_eq!(stats.current_hp, 120);
        // floor(10 * 1.2), floor(10 * 1.0)
        assert_eq!(stats.attack, 12);
        assert_eq!(stats.defense, 10);
        assert_eq!(stats.speed, 5);
    }

    #[test]
    fn raise_before_ready_fails() {
        let (snapshot, plot_id, _) = farm_with_growing(50, 50);
        let cfg = LifecycleConfig::default();
        let result = raise(&snapshot, plot_id, at_secs(GROWTH_SECS - 1), &cfg, &mut rng());
        assert_eq!(
            result.err(),
            Some(LifecycleError::NotReady {
                plot_id,
                stage: GrowthStage::Clawing,
            })
        );
    }

    #[test]
    fn raise_sets_initial_state_and_empties_plot() {
        let (snapshot, plot_id, zombie_id) = farm_with_growing(50, 50);
        let cfg = LifecycleConfig::default();
        let now = at_secs(GROWTH_SECS + 600);
        let t = raise(&snapshot, plot_id, now, &cfg, &mut rng())
            .unwrap_or_else(|_| Transition::begin(&snapshot));

        let plot = t.snapshot.plots.get(&plot_id);
        assert!(plot.is_some_and(Plot::is_empty));
        assert_eq!(plot.and_then(Plot::care_level), None);

        let z = t.snapshot.zombies.get(&zombie_id);
        assert!(z.is_some());
        if let Some(z) = z {
            assert_eq!(z.level, 1);
            assert_eq!(z.experience, 0);
            assert!(z.permanent_injuries.is_empty());
            assert_eq!(z.battle_scars, 0);
            assert_eq!(z.combat_refusal_chance, Decimal::ZERO);
            assert_eq!(z.mutation_count(), 0);
            assert_eq!(z.status, ZombieStatus::Wandering);
            assert_eq!(z.mood, Mood::Happy);
            assert!(z.is_wandering);
            assert_eq!(z.position, Position::new(100.0, -50.0));
            assert_eq!(z.matured_at, at_secs(GROWTH_SECS));
            assert_eq!(z.harvested_at, now);
            assert_eq!(z.care.last_evaluated_at, now);
            assert_eq!(z.care.condition, Decimal::ONE_HUNDRED);
        }
        assert_eq!(t.activity, vec![ActivityCounter::ZombieRaised]);
    }

    #[test]
    fn raise_grants_caretaker_experience() {
        let (snapshot, plot_id, _) = farm_with_growing(50, 50);
        let cfg = LifecycleConfig::default();
        let t = raise(&snapshot, plot_id, at_secs(GROWTH_SECS), &cfg, &mut rng())
            .unwrap_or_else(|_| Transition::begin(&snapshot));
        assert_eq!(t.snapshot.caretaker.map(|c| c.experience), Some(10));
        assert_eq!(t.snapshot.caretaker.map(|c| c.level), Some(1));
    }

    #[test]
    fn caretaker_levels_every_hundred_xp() {
        assert_eq!(caretaker_level(0), 1);
        assert_eq!(caretaker_level(99), 1);
        assert_eq!(caretaker_level(100), 2);
        assert_eq!(caretaker_level(250), 3);
    }

    #[test]
    fn raise_without_caretaker_still_succeeds() {
        let (mut snapshot, plot_id, _) = farm_with_growing(50, 50);
        snapshot.caretaker = None;
        let cfg = LifecycleConfig::default();
        let t = raise(&snapshot, plot_id, at_secs(GROWTH_SECS), &cfg, &mut rng());
        assert!(t.is_ok_and(|t| t.snapshot.caretaker.is_none()));
    }

    #[test]
    fn wander_target_stays_within_radius() {
        let origin = Position::new(5.0, 5.0);
        let mut rng = rng();
        for _ in 0..100 {
            let target = jitter_target(origin, 10.0, &mut rng);
            assert!((target.x - origin.x).abs() <= 10.0);
            assert!((target.y - origin.y).abs() <= 10.0);
        }
    }

    #[test]
    fn raise_empty_plot_fails() {
        let plot_id = PlotId::new();
        let snapshot = FarmSnapshot {
            plots: BTreeMap::from([(plot_id, Plot::placed(plot_id, Position::default()))]),
            ..FarmSnapshot::default()
        };
        let cfg = LifecycleConfig::default();
        let result = raise(&snapshot, plot_id, t0(), &cfg, &mut rng());
        assert_eq!(result.err(), Some(LifecycleError::PlotEmpty(plot_id)));
    }

    #[test]
    fn quality_tracks_happiness_and_care() {
        assert_eq!(calculate_quality(50, 50, QualityTier::Common), QualityTier::Common);
        assert_eq!(calculate_quality(70, 50, QualityTier::Common), QualityTier::Bronze);
        assert_eq!(calculate_quality(80, 70, QualityTier::Common), QualityTier::Silver);
        assert_eq!(calculate_quality(90, 80, QualityTier::Common), QualityTier::Gold);
        assert_eq!(calculate_quality(100, 100, QualityTier::Common), QualityTier::Diamond);
    }

    #[test]
    fn quality_never_below_base_tier() {
        assert_eq!(calculate_quality(0, 0, QualityTier::Silver), QualityTier::Silver);
    }

    #[test]
    fn low_happiness_halves_stats() {
        let base = BaseStats {
            hp: 101,
            attack: 9,
            defense: 7,
            speed: 4,
        };
        let stats = derive_stats(&base, happiness_multiplier(0), care_multiplier(0));
        assert_eq!(
            stats.ok(),
            Some(CombatStats {
                // floor(101 * 0.5 * 0.5) = floor(25.25)
                max_hp: 25,
                current_hp: 25,
                attack: 4,
                defense: 3,
                speed: 4,
            })
        );
    }
}
