//! Shared type definitions for the Necrofarm lifecycle engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the engine and its host. Types flow downstream to `TypeScript` via `ts-rs`
//! for the farm UI.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for plots and zombies
//! - [`enums`] -- Zombie types, resources, growth stages, tiers, status, mood
//! - [`structs`] -- Plots, growing and raised zombies, the farm snapshot
//! - [`events`] -- Events and activity counters emitted by transitions
//! - [`actions`] -- Discriminated action payloads submitted by the host

pub mod actions;
pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{ActionEnvelope, FarmAction};
pub use enums::{GrowthStage, Mood, QualityTier, Resource, ZombieStatus, ZombieType};
pub use events::{ActivityCounter, FarmEvent};
pub use ids::{PlotId, ZombieId};
pub use structs::{
    Caretaker, CareState, CombatStats, FarmSnapshot, GrowingZombie, Plot, PlotOccupancy,
    Position, RaisedZombie,
};
