//! Error types for the necrofarm-lifecycle crate.
//!
//! Every transition validates before it applies anything, so any error
//! returned here means the caller's snapshot is untouched. [`ErrorKind`]
//! groups the variants into the coarse categories hosts branch on.

use rust_decimal::Decimal;

use necrofarm_types::{GrowthStage, PlotId, Resource, ZombieId, ZombieType};

use crate::care::CareAction;

/// Errors that can occur during lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// No plot with this id exists in the snapshot.
    #[error("plot not found: {0}")]
    PlotNotFound(PlotId),

    /// No raised zombie with this id exists in the snapshot.
    #[error("zombie not found: {0}")]
    ZombieNotFound(ZombieId),

    /// The plot has no coordinates assigned yet.
    #[error("plot {0} has not been placed")]
    PlotNotPlaced(PlotId),

    /// The plot already holds a growing zombie.
    #[error("plot {0} is already occupied")]
    PlotOccupied(PlotId),

    /// The plot has nothing planted.
    #[error("plot {0} has nothing planted")]
    PlotEmpty(PlotId),

    /// The occupant has not reached `ReadyToHarvest`.
    #[error("zombie in plot {plot_id} is not ready to raise (stage: {stage:?})")]
    NotReady {
        /// The plot holding the zombie.
        plot_id: PlotId,
        /// The stage it is currently in.
        stage: GrowthStage,
    },

    /// The zombie is in storage and cannot be acted on.
    #[error("zombie {0} is contained")]
    Contained(ZombieId),

    /// The zombie is not in storage.
    #[error("zombie {0} is not contained")]
    NotContained(ZombieId),

    /// A zombie with this id already exists.
    #[error("duplicate zombie id: {0}")]
    DuplicateZombie(ZombieId),

    /// No profile is configured for the zombie type.
    #[error("no profile configured for zombie type {0:?}")]
    UnknownType(ZombieType),

    /// The resource does not grow into any zombie type.
    #[error("resource {0:?} is not a plantable seed")]
    UnknownResource(Resource),

    /// Not enough of a resource to pay for the action.
    #[error("insufficient resource: wanted {requested} of {resource:?} but only have {available}")]
    InsufficientResource {
        /// The resource being consumed.
        resource: Resource,
        /// The quantity required.
        requested: Decimal,
        /// The quantity actually held.
        available: Decimal,
    },

    /// The care action was used too recently.
    #[error("{action:?} is on cooldown for zombie {zombie_id} ({remaining_secs}s remaining)")]
    OnCooldown {
        /// The zombie.
        zombie_id: ZombieId,
        /// The action on cooldown.
        action: CareAction,
        /// Seconds until the action is available again.
        remaining_secs: i64,
    },

    /// An arithmetic overflow occurred during a lifecycle computation.
    #[error("arithmetic overflow in lifecycle computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

/// Coarse category of a [`LifecycleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A plot or zombie is missing.
    NotFound,
    /// Wrong occupancy, stage, or containment for the transition.
    InvalidState,
    /// Not enough of a resource.
    InsufficientResource,
    /// A care action was used too recently.
    OnCooldown,
    /// Zombie type missing from configuration.
    UnknownType,
    /// Resource does not map to a zombie type.
    UnknownResource,
    /// Arithmetic failure; indicates corrupt input or configuration.
    Internal,
}

impl LifecycleError {
    /// The category this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PlotNotFound(_) | Self::ZombieNotFound(_) => ErrorKind::NotFound,
            Self::PlotNotPlaced(_)
            | Self::PlotOccupied(_)
            | Self::PlotEmpty(_)
            | Self::NotReady { .. }
            | Self::Contained(_)
            | Self::NotContained(_)
            | Self::DuplicateZombie(_) => ErrorKind::InvalidState,
            Self::InsufficientResource { .. } => ErrorKind::InsufficientResource,
            Self::OnCooldown { .. } => ErrorKind::OnCooldown,
            Self::UnknownType(_) => ErrorKind::UnknownType,
            Self::UnknownResource(_) => ErrorKind::UnknownResource,
            Self::ArithmeticOverflow { .. } => ErrorKind::Internal,
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        Self::ArithmeticOverflow {
            context: String::from(context),
        }
    }
}
