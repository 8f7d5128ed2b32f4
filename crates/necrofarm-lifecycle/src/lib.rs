//! Lifecycle engine for Necrofarm zombies.
//!
//! Zombies are planted as seeds, grow through timed stages, are raised into
//! autonomous units, and then slowly decay unless they are cared for. Every
//! operation here is a pure transition:
//!
//! ```text
//! (&FarmSnapshot, inputs, now, &LifecycleConfig) -> Result<Transition, LifecycleError>
//! ```
//!
//! The input snapshot is never modified. A [`Transition`] carries the new
//! snapshot, the [`FarmEvent`](necrofarm_types::FarmEvent)s describing the
//! change, and the activity counters to forward to telemetry. The engine
//! owns no clock, no timer, and no I/O; `now` is always supplied by the
//! caller. The only randomness is the wander-target jitter at raise time,
//! drawn from a caller-provided RNG.
//!
//! # Modules
//!
//! - [`growth`] -- Growth stage calculator
//! - [`planting`] -- Seed to growing zombie
//! - [`raising`] -- Growing zombie to raised zombie, stat derivation
//! - [`care`] -- Decay, happiness, feeding, petting, shelter, containment
//! - [`batch`] -- Whole-farm evaluation and prioritised feeding
//! - [`inventory`] -- Exact-decimal balance checks
//! - [`config`] -- Tunables with defaults
//! - [`error`] -- [`LifecycleError`] and its coarse [`ErrorKind`]
//!
//! # Decay tiers
//!
//! | Tier | Daily rate | Floor |
//! |------|-----------|-------|
//! | Common | 1.0% | 20 |
//! | Bronze | 1.5% | 25 |
//! | Silver | 2.0% | 30 |
//! | Gold | 2.5% | 35 |
//! | Diamond | 3.0% | 40 |

pub mod batch;
pub mod care;
pub mod config;
pub mod error;
pub mod growth;
pub mod inventory;
pub mod planting;
pub mod raising;
pub mod transition;

#[cfg(test)]
mod testing;

pub use batch::{FeedingReport, evaluate_all, feed_most_needy, plan_feeding};
pub use care::{CareAction, contain, evaluate, evaluate_zombie, feed, pet, release, set_sheltered};
pub use config::{InvalidConfig, LifecycleConfig};
pub use error::{ErrorKind, LifecycleError};
pub use growth::stage_of;
pub use planting::plant;
pub use raising::{calculate_quality, raise};
pub use transition::Transition;
