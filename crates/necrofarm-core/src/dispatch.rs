//! Action dispatch: route a host action to its lifecycle transition.
//!
//! The dispatcher is the only place that reads the wall clock. Actions
//! carrying an explicit timestamp are applied at that instant; the rest
//! are applied at [`Utc::now`]. Raise jitter draws from the thread RNG
//! unless the caller supplies one through [`apply_at`].

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use necrofarm_lifecycle::{
    FeedingReport, LifecycleConfig, LifecycleError, Transition, batch, care, planting, raising,
};
use necrofarm_types::{ActionEnvelope, ActivityCounter, FarmAction, FarmEvent, FarmSnapshot};

use crate::telemetry::{self, TelemetrySink};

/// Errors returned by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The transition rejected the action. The snapshot is unchanged.
    #[error("action rejected: {0}")]
    Rejected(#[from] LifecycleError),

    /// The action payload could not be decoded.
    #[error("malformed action payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result of a successfully applied action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchOutcome {
    /// The instant the action was applied at.
    pub applied_at: DateTime<Utc>,
    /// The new farm state. Commit it to accept the action.
    pub snapshot: FarmSnapshot,
    /// Events describing the change.
    pub events: Vec<FarmEvent>,
    /// Activity counters already forwarded to the sink.
    pub activity: Vec<ActivityCounter>,
    /// Present only for `feedMostNeedy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeding: Option<FeedingReport>,
}

/// The wire name of an action, for logs.
pub const fn action_name(action: &FarmAction) -> &'static str {
    match action {
        FarmAction::Plant { .. } => "plant",
        FarmAction::Raise { .. } => "raise",
        FarmAction::Feed { .. } => "feed",
        FarmAction::Pet { .. } => "pet",
        FarmAction::EvaluateDecay => "evaluateDecay",
        FarmAction::Shelter { .. } => "shelter",
        FarmAction::Unshelter { .. } => "unshelter",
        FarmAction::Contain { .. } => "contain",
        FarmAction::Release { .. } => "release",
        FarmAction::FeedMostNeedy { .. } => "feedMostNeedy",
    }
}

/// Apply an enveloped action, using the current time if none is given.
pub fn apply_action(
    snapshot: &FarmSnapshot,
    envelope: &ActionEnvelope,
    config: &LifecycleConfig,
    sink: &dyn TelemetrySink,
) -> Result<DispatchOutcome, DispatchError> {
    let now = envelope.timestamp.unwrap_or_else(Utc::now);
    apply_at(
        snapshot,
        &envelope.action,
        now,
        config,
        sink,
        &mut rand::rng(),
    )
}

/// Decode a JSON envelope and apply it.
pub fn apply_json(
    snapshot: &FarmSnapshot,
    envelope_json: &str,
    config: &LifecycleConfig,
    sink: &dyn TelemetrySink,
) -> Result<DispatchOutcome, DispatchError> {
    let envelope: ActionEnvelope = serde_json::from_str(envelope_json)?;
    apply_action(snapshot, &envelope, config, sink)
}

/// Apply `action` at `now` with an explicit RNG.
///
/// On success the activity counters are forwarded to `sink` before
/// returning. On failure nothing is forwarded.
pub fn apply_at(
    snapshot: &FarmSnapshot,
    action: &FarmAction,
    now: DateTime<Utc>,
    config: &LifecycleConfig,
    sink: &dyn TelemetrySink,
    rng: &mut impl Rng,
) -> Result<DispatchOutcome, DispatchError> {
    let name = action_name(action);
    debug!(action = name, %now, "dispatching action");

    let mut feeding = None;
    let transition: Result<Transition, LifecycleError> = match action {
        FarmAction::Plant {
            plot_id,
            resource,
            new_entity_id,
        } => planting::plant(snapshot, *plot_id, *resource, *new_entity_id, now, config),
        FarmAction::Raise { plot_id } => raising::raise(snapshot, *plot_id, now, config, rng),
        FarmAction::Feed { entity_id } => care::feed(snapshot, *entity_id, now, config),
        FarmAction::Pet { entity_id } => care::pet(snapshot, *entity_id, now, config),
        FarmAction::EvaluateDecay => batch::evaluate_all(snapshot, now, config),
        FarmAction::Shelter { entity_id } => {
            care::set_sheltered(snapshot, *entity_id, true, now, config)
        }
        FarmAction::Unshelter { entity_id } => {
            care::set_sheltered(snapshot, *entity_id, false, now, config)
        }
        FarmAction::Contain { entity_id } => care::contain(snapshot, *entity_id, now, config),
        FarmAction::Release { entity_id } => care::release(snapshot, *entity_id, now),
        FarmAction::FeedMostNeedy { max_units } => {
            batch::feed_most_needy(snapshot, now, *max_units, config).map(|(t, report)| {
                feeding = Some(report);
                t
            })
        }
    };

    let transition = transition.inspect_err(|e| {
        info!(action = name, kind = ?e.kind(), error = %e, "action rejected");
    })?;

    telemetry::forward(sink, &transition.activity);
    info!(
        action = name,
        events = transition.events.len(),
        "action applied"
    );

    Ok(DispatchOutcome {
        applied_at: now,
        snapshot: transition.snapshot,
        events: transition.events,
        activity: transition.activity,
        feeding,
    })
}
