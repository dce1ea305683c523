//! Error types for the cryptfield simulation.
//!
//! Organized by subsystem: path-field solving, agent spawning, and
//! command application. Out-of-range grid reads are not errors; they
//! surface as `None` from the grid accessors.

use std::error::Error;
use std::fmt;

/// Errors from the path-field solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The source cell lies outside the aggregate grid.
    SourceOutOfBounds {
        /// Aggregate-space column of the source.
        x: i32,
        /// Aggregate-space row of the source.
        y: i32,
        /// Aggregate grid width.
        width: u32,
        /// Aggregate grid height.
        height: u32,
    },
    /// A field passed for further relaxation does not match the
    /// aggregate grid it is relaxed against.
    DimensionMismatch {
        /// `(width, height)` of the path field.
        field: (u32, u32),
        /// `(width, height)` of the aggregate grid.
        aggregate: (u32, u32),
    },
    /// The fine grid could not be block-summed into aggregate cells.
    Unaggregatable {
        /// Fine grid width.
        width: u32,
        /// Fine grid height.
        height: u32,
        /// Aggregation block side.
        cell_size: u32,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "path source ({x}, {y}) outside aggregate grid [0, {width}) x [0, {height})"
            ),
            Self::DimensionMismatch { field, aggregate } => write!(
                f,
                "path field is {}x{} but aggregate grid is {}x{}",
                field.0, field.1, aggregate.0, aggregate.1
            ),
            Self::Unaggregatable {
                width,
                height,
                cell_size,
            } => write!(
                f,
                "fine grid {width}x{height} cannot be aggregated in blocks of {cell_size}"
            ),
        }
    }
}

impl Error for SolveError {}

/// Errors from the spawn policy.
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnError {
    /// There are no attractors to send a new agent to.
    NoDestinations,
    /// Popularity weights cannot be sampled (all zero, negative, or
    /// non-finite).
    InvalidWeights {
        /// Description of the weight problem.
        reason: String,
    },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDestinations => write!(f, "no destinations available"),
            Self::InvalidWeights { reason } => {
                write!(f, "invalid popularity weights: {reason}")
            }
        }
    }
}

impl Error for SpawnError {}

/// Why the orchestrator declined to apply a command.
///
/// A rejected command leaves the world exactly as it was; the
/// simulation keeps running.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandError {
    /// `CLEAR_PATH` was issued with no budget left.
    InsufficientBudget {
        /// Budget at the time of the request.
        budget: i64,
    },
    /// `CLEAR_PATH` radius was negative or not finite.
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },
    /// `SPAWN_PERSON` could not pick a destination.
    Spawn(SpawnError),
    /// A path-field recompute failed during `STEP_SIMULATION`.
    Solve(SolveError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientBudget { budget } => {
                write!(f, "insufficient budget ({budget})")
            }
            Self::InvalidRadius { radius } => {
                write!(f, "clear radius must be finite and >= 0, got {radius}")
            }
            Self::Spawn(e) => write!(f, "spawn failed: {e}"),
            Self::Solve(e) => write!(f, "path field failed: {e}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            Self::Solve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpawnError> for CommandError {
    fn from(e: SpawnError) -> Self {
        Self::Spawn(e)
    }
}

impl From<SolveError> for CommandError {
    fn from(e: SolveError) -> Self {
        Self::Solve(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_chains_source() {
        let err: CommandError = SpawnError::NoDestinations.into();
        assert_eq!(err.to_string(), "spawn failed: no destinations available");
        assert!(err.source().is_some());

        let budget = CommandError::InsufficientBudget { budget: 0 };
        assert!(budget.source().is_none());
    }

    #[test]
    fn solve_error_reports_bounds() {
        let err = SolveError::SourceOutOfBounds {
            x: 60,
            y: -1,
            width: 50,
            height: 60,
        };
        let msg = err.to_string();
        assert!(msg.contains("(60, -1)"));
        assert!(msg.contains("[0, 50)"));
    }
}
