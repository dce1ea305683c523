//! Core types for the cryptfield simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: entity
//! and tick identifiers, the [`Vector`] position type, the [`Command`]
//! set accepted by the orchestrator, and per-subsystem error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod id;
pub mod vector;

pub use command::{Command, CommandOutcome};
pub use error::{CommandError, SolveError, SpawnError};
pub use id::{EntityId, TickId};
pub use vector::Vector;
