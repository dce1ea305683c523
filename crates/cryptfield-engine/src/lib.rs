//! Simulation engine orchestrating cryptfield worlds.
//!
//! Provides [`Simulation`], the single owner of a [`World`] that applies
//! the command vocabulary (`STEP_SIMULATION`, `PAUSE`, `SPAWN_PERSON`,
//! `CLEAR_PATH`), plus configuration, world seeding, a deterministic
//! [`TickDriver`], and per-tick [`StepMetrics`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod entity;
pub mod init;
pub mod metrics;
pub mod simulation;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use driver::{Pulse, RunSummary, TickDriver};
pub use entity::{Agent, Attractor, Entity, EntityKind};
pub use init::seed_world;
pub use metrics::StepMetrics;
pub use simulation::Simulation;
pub use world::World;
