//! Discriminated action payloads submitted by the host.
//!
//! Each action is tagged by a `type` field (`plant`, `raise`, `feed`, ...)
//! and wrapped in an [`ActionEnvelope`] that optionally pins the timestamp.
//! When the timestamp is omitted the dispatcher uses the current time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Resource;
use crate::ids::{PlotId, ZombieId};

/// A single lifecycle action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FarmAction {
    /// Plant a seed into an empty plot.
    Plant {
        /// Target plot.
        plot_id: PlotId,
        /// Seed to plant.
        resource: Resource,
        /// Identifier for the new zombie.
        new_entity_id: ZombieId,
    },
    /// Raise a ready zombie out of its plot.
    Raise {
        /// Plot holding the zombie.
        plot_id: PlotId,
    },
    /// Feed a raised zombie.
    Feed {
        /// Zombie to feed.
        entity_id: ZombieId,
    },
    /// Pet a raised zombie.
    Pet {
        /// Zombie to pet.
        entity_id: ZombieId,
    },
    /// Run decay catch-up across the whole collection.
    EvaluateDecay,
    /// Move a zombie under shelter.
    Shelter {
        /// Zombie to shelter.
        entity_id: ZombieId,
    },
    /// Take a zombie out of shelter.
    Unshelter {
        /// Zombie to unshelter.
        entity_id: ZombieId,
    },
    /// Put a zombie into storage, pausing its simulation.
    Contain {
        /// Zombie to contain.
        entity_id: ZombieId,
    },
    /// Take a zombie out of storage.
    Release {
        /// Zombie to release.
        entity_id: ZombieId,
    },
    /// Feed the neediest zombies until feed runs out.
    FeedMostNeedy {
        /// Optional cap on feed units spent.
        #[ts(as = "Option<String>")]
        max_units: Option<Decimal>,
    },
}

/// An action plus an optional explicit timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionEnvelope {
    /// The action to apply.
    pub action: FarmAction,
    /// When the action happens. Defaults to now when omitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}
