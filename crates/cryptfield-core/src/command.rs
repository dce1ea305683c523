//! The command vocabulary accepted by the simulation orchestrator.
//!
//! Commands are the only way the outside world mutates a simulation.
//! A periodic scheduler issues [`Command::Step`]; an input layer
//! translates pointer events into [`Command::ClearPath`].

use crate::id::{EntityId, TickId};
use crate::vector::Vector;

/// A command applied to the world by the orchestrator.
///
/// # Examples
///
/// ```
/// use cryptfield_core::{Command, Vector};
///
/// let clear = Command::ClearPath {
///     position: Vector::new(120.0, 45.0),
///     radius: 10.0,
/// };
/// assert!(!clear.is_tick());
/// assert!(Command::Step.is_tick());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advance one logical tick (`STEP_SIMULATION`).
    Step,
    /// Toggle between running and paused (`PAUSE`).
    Pause,
    /// Spawn a new agent heading to a popularity-weighted attractor
    /// (`SPAWN_PERSON`).
    SpawnPerson,
    /// Zero the resource inside a disk, paid for from the budget
    /// (`CLEAR_PATH`).
    ClearPath {
        /// Disk centre in fine-grid coordinates.
        position: Vector,
        /// Disk radius in fine-grid cells.
        radius: f64,
    },
}

impl Command {
    /// Whether this command advances simulated time.
    pub fn is_tick(&self) -> bool {
        matches!(self, Command::Step)
    }

    /// Short upper-case name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Step => "STEP_SIMULATION",
            Command::Pause => "PAUSE",
            Command::SpawnPerson => "SPAWN_PERSON",
            Command::ClearPath { .. } => "CLEAR_PATH",
        }
    }
}

/// What an accepted command did to the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandOutcome {
    /// A tick ran; carries the new time.
    Stepped {
        /// Tick reached after the step.
        tick: TickId,
    },
    /// The paused flag flipped; carries the new value.
    PauseToggled {
        /// `true` if the simulation is now paused.
        paused: bool,
    },
    /// A new agent was created.
    Spawned {
        /// Id of the new agent.
        agent: EntityId,
        /// Id of the attractor it was sent to.
        destination: EntityId,
    },
    /// A disk was cleared and the budget charged.
    PathCleared {
        /// Number of fine cells whose resource was zeroed.
        cells: usize,
        /// Budget remaining after the charge.
        budget: i64,
    },
}
