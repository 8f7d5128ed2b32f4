//! Host-facing orchestration for the Necrofarm lifecycle engine.
//!
//! The engine in `necrofarm-lifecycle` is pure. This crate adds the parts a
//! host needs around it:
//!
//! - [`config`] -- `necrofarm-config.yaml` loading via `serde_yml`
//! - [`dispatch`] -- Route [`FarmAction`](necrofarm_types::FarmAction)
//!   payloads to transitions, supplying `now` when the envelope omits it
//! - [`telemetry`] -- The [`TelemetrySink`] seam for activity counters
//!
//! # Flow
//!
//! ```text
//! ActionEnvelope --> dispatch --> lifecycle transition --> DispatchOutcome
//!                                        |
//!                                        +--> activity counters --> TelemetrySink
//! ```
//!
//! The host persists [`DispatchOutcome::snapshot`] to commit an action. A
//! rejected action returns [`DispatchError::Rejected`] and the caller keeps
//! its original snapshot.

pub mod config;
pub mod dispatch;
pub mod telemetry;

pub use config::{ConfigError, FarmConfig, LoggingConfig};
pub use dispatch::{DispatchError, DispatchOutcome, apply_action, apply_at, apply_json};
pub use telemetry::{CountingSink, NoopSink, TelemetryError, TelemetrySink};
