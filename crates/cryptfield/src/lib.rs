//! Cryptfield: a resource field that grows on a grid, attractors with
//! cost fields, and agents that walk those fields and eat the resource.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all cryptfield sub-crates. For most users, adding `cryptfield` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cryptfield::prelude::*;
//!
//! let config = SimConfig {
//!     width: 120,
//!     height: 100,
//!     attractor_count: 3,
//!     attractor_radius: (5.0, 12.0),
//!     attractor_popularity: (1.0, 10.0),
//!     ..SimConfig::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//!
//! sim.apply(Command::SpawnPerson).unwrap();
//! for _ in 0..30 {
//!     sim.apply(Command::Step).unwrap();
//! }
//! assert_eq!(sim.time(), TickId(30));
//!
//! let cleared = sim
//!     .apply(Command::ClearPath { position: Vector::new(60.0, 50.0), radius: 10.0 })
//!     .unwrap();
//! assert!(matches!(cleared, CommandOutcome::PathCleared { budget: 50, .. }));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cryptfield-core` | IDs, vectors, commands, error types |
//! | [`space`] | `cryptfield-space` | Grids, Moore neighbourhood, disk stamping, aggregation |
//! | [`propagators`] | `cryptfield-propagators` | Diffusion, path-field solver, movement, harvest, spawn |
//! | [`engine`] | `cryptfield-engine` | Config, world, seeding, orchestrator, tick driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`cryptfield-core`).
///
/// Contains [`types::EntityId`], [`types::TickId`], [`types::Vector`],
/// the [`types::Command`] vocabulary, and per-subsystem errors.
pub use cryptfield_core as types;

/// Grids and spatial helpers (`cryptfield-space`).
///
/// Provides [`space::Grid`], [`space::Aggregator`], [`space::stamp_disk`],
/// and the Moore neighbourhood order in [`space::MOORE_OFFSETS`].
pub use cryptfield_space as space;

/// Simulation rules (`cryptfield-propagators`).
///
/// Includes [`propagators::CryptoDiffusion`],
/// [`propagators::PathFieldSolver`], [`propagators::MovementPolicy`],
/// [`propagators::HarvestMode`], and [`propagators::SpawnPolicy`].
pub use cryptfield_propagators as propagators;

/// The orchestrator and its world (`cryptfield-engine`).
///
/// [`engine::Simulation`] applies commands; [`engine::TickDriver`]
/// issues them on a schedule.
pub use cryptfield_engine as engine;

/// Common imports for typical cryptfield usage.
///
/// ```rust
/// use cryptfield::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cryptfield_core::{Command, CommandOutcome, EntityId, TickId, Vector};

    // Errors
    pub use cryptfield_core::{CommandError, SolveError, SpawnError};
    pub use cryptfield_space::SpaceError;

    // Space
    pub use cryptfield_space::{Aggregator, Grid, OBSTACLE};

    // Rules
    pub use cryptfield_propagators::{
        CryptoDiffusion, HarvestMode, MovementPolicy, PathField, PathFieldSolver, SpawnEdge,
        SpawnPolicy,
    };

    // Engine
    pub use cryptfield_engine::{
        Agent, Attractor, ConfigError, Entity, SimConfig, Simulation, StepMetrics, TickDriver,
        World,
    };
}
