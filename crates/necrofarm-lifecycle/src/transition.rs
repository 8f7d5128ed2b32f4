//! The output of every lifecycle transition.

use necrofarm_types::{ActivityCounter, FarmEvent, FarmSnapshot};

/// A new snapshot plus what changed to produce it.
///
/// The snapshot is an independent copy; the input snapshot is never
/// modified. The host decides whether to commit it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The updated farm state.
    pub snapshot: FarmSnapshot,
    /// Events describing the changes, in the order they happened.
    pub events: Vec<FarmEvent>,
    /// Activity counters to increment, one entry per increment.
    pub activity: Vec<ActivityCounter>,
}

impl Transition {
    /// Start a transition from a copy of `snapshot`.
    pub(crate) fn begin(snapshot: &FarmSnapshot) -> Self {
        Self {
            snapshot: snapshot.clone(),
            events: Vec::new(),
            activity: Vec::new(),
        }
    }
}
