//! Per-tick performance metrics for the simulation engine.
//!
//! [`StepMetrics`] captures timing and work counts for a single
//! `STEP_SIMULATION`, for profiling and telemetry.

use cryptfield_core::EntityId;

/// Timing and work counters collected during a single tick.
///
/// All durations are in microseconds. The simulation fills these after
/// each step; read the most recent ones from
/// [`Simulation::last_metrics`](crate::Simulation::last_metrics).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent in the diffusion step, in microseconds.
    pub diffusion_us: u64,
    /// Time spent aggregating and solving one path field, in microseconds.
    pub path_field_us: u64,
    /// Time spent moving agents and harvesting, in microseconds.
    pub movement_us: u64,
    /// Whether diffusion ran this tick.
    pub diffused: bool,
    /// Cells that ignited during diffusion.
    pub ignited: usize,
    /// Attractor whose path field was recomputed, if any.
    pub recomputed: Option<EntityId>,
    /// Worklist pops in this tick's solve.
    pub solver_pops: u64,
    /// Cost updates in this tick's solve.
    pub solver_updates: u64,
    /// Agents that changed position.
    pub agents_moved: usize,
    /// Agents left in place (no field yet, or unreachable).
    pub agents_stalled: usize,
}
