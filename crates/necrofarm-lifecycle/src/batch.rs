//! Whole-farm evaluation and prioritised feeding.
//!
//! Both entry points build a single [`Transition`], so the host commits
//! the whole batch or nothing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use necrofarm_types::{FarmSnapshot, PlotOccupancy, ZombieId};

use crate::care::{self, CareAction};
use crate::config::LifecycleConfig;
use crate::error::{ErrorKind, LifecycleError};
use crate::growth;
use crate::inventory;
use crate::transition::Transition;

/// What a prioritised feeding pass did with each zombie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingReport {
    /// Fed, in feeding order.
    pub fed: Vec<ZombieId>,
    /// Would have been fed but the budget ran out.
    pub skipped_insufficient: Vec<ZombieId>,
    /// Fed too recently.
    pub skipped_cooldown: Vec<ZombieId>,
    /// In storage.
    pub skipped_contained: Vec<ZombieId>,
}

/// Refresh growth stages and catch up every raised zombie, in place.
///
/// A stage that cannot be computed stays stale and is logged; it never
/// blocks decay of the raised zombies.
fn evaluate_all_into(
    transition: &mut Transition,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<(), LifecycleError> {
    for (plot_id, plot) in &mut transition.snapshot.plots {
        if let PlotOccupancy::Occupied { zombie, .. } = &mut plot.occupancy {
            match growth::stage_at(zombie, now, config) {
                Ok(stage) => zombie.stage = stage,
                Err(err) => warn!(
                    %plot_id,
                    zombie_id = %zombie.id,
                    error = %err,
                    "Growth stage not refreshed"
                ),
            }
        }
    }

    let mut evaluated = 0_usize;
    for zombie in transition.snapshot.zombies.values_mut() {
        let days = care::catch_up(zombie, now, config, &mut transition.events)?;
        if days > 0 {
            evaluated = evaluated.saturating_add(1);
        }
    }
    debug!(
        zombies = transition.snapshot.zombies.len(),
        decayed = evaluated,
        "Farm evaluated"
    );
    Ok(())
}

/// Evaluate the whole farm at `now`.
///
/// Each non-contained zombie is caught up independently; contained
/// zombies are left untouched. Cached growth stages on plots are
/// refreshed where the zombie type has a profile; others keep their
/// stale stage.
pub fn evaluate_all(
    snapshot: &FarmSnapshot,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Transition, LifecycleError> {
    let mut transition = Transition::begin(snapshot);
    evaluate_all_into(&mut transition, now, config)?;
    Ok(transition)
}

/// Feedable zombies ranked by urgency, plus the ones set aside.
struct Triage {
    ranked: Vec<ZombieId>,
    on_cooldown: Vec<ZombieId>,
    contained: Vec<ZombieId>,
}

fn triage(
    snapshot: &FarmSnapshot,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Triage, LifecycleError> {
    let mut candidates: Vec<(u32, Decimal, ZombieId)> = Vec::new();
    let mut on_cooldown = Vec::new();
    let mut contained = Vec::new();

    for zombie in snapshot.zombies.values() {
        if zombie.care.contained {
            contained.push(zombie.id);
            continue;
        }
        let cooldown = care::check_cooldown(
            zombie.id,
            CareAction::Feed,
            zombie.care.last_fed_at,
            config.care.feed_cooldown_secs,
            now,
        );
        match cooldown {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::OnCooldown => {
                on_cooldown.push(zombie.id);
                continue;
            }
            Err(err) => return Err(err),
        }
        // Rank on the state the zombie will have once caught up.
        let (projected, _) = care::evaluate(zombie, now, config)?;
        candidates.push((projected.care.happiness, projected.care.condition, zombie.id));
    }

    candidates.sort_unstable();
    Ok(Triage {
        ranked: candidates.into_iter().map(|(_, _, id)| id).collect(),
        on_cooldown,
        contained,
    })
}

/// Zombies that can be fed now, most urgent first.
///
/// Urgency is lowest happiness, then lowest condition, then id. Contained
/// zombies and zombies on feeding cooldown are excluded.
pub fn plan_feeding(
    snapshot: &FarmSnapshot,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
) -> Result<Vec<ZombieId>, LifecycleError> {
    Ok(triage(snapshot, now, config)?.ranked)
}

/// Evaluate the farm, then feed the neediest zombies until the feed
/// resource (optionally capped at `max_units`) runs out.
pub fn feed_most_needy(
    snapshot: &FarmSnapshot,
    now: DateTime<Utc>,
    max_units: Option<Decimal>,
    config: &LifecycleConfig,
) -> Result<(Transition, FeedingReport), LifecycleError> {
    let care = &config.care;
    let mut transition = Transition::begin(snapshot);
    evaluate_all_into(&mut transition, now, config)?;

    let Triage {
        ranked,
        on_cooldown,
        contained,
    } = triage(&transition.snapshot, now, config)?;

    let held = inventory::balance(&transition.snapshot.inventory, care.feed_resource);
    let mut budget = max_units.map_or(held, |cap| cap.max(Decimal::ZERO).min(held));

    let mut report = FeedingReport {
        skipped_cooldown: on_cooldown,
        skipped_contained: contained,
        ..FeedingReport::default()
    };

    for zombie_id in ranked {
        let affordable = budget >= care.feed_cost
            && inventory::has_resource(
                &transition.snapshot.inventory,
                care.feed_resource,
                care.feed_cost,
            );
        if !affordable {
            report.skipped_insufficient.push(zombie_id);
            continue;
        }
        match care::feed_into(&mut transition, zombie_id, now, config) {
            Ok(()) => {
                budget = budget
                    .checked_sub(care.feed_cost)
                    .ok_or_else(|| LifecycleError::overflow("feeding budget"))?;
                report.fed.push(zombie_id);
            }
            Err(err) if err.kind() == ErrorKind::InsufficientResource => {
                report.skipped_insufficient.push(zombie_id);
            }
            Err(err) if err.kind() == ErrorKind::OnCooldown => {
                report.skipped_cooldown.push(zombie_id);
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        fed = report.fed.len(),
        skipped_insufficient = report.skipped_insufficient.len(),
        skipped_cooldown = report.skipped_cooldown.len(),
        skipped_contained = report.skipped_contained.len(),
        "Feeding pass complete"
    );
    Ok((transition, report))
}
