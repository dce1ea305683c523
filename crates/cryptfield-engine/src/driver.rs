//! Deterministic stand-in for the periodic tick scheduler.
//!
//! A real front end runs a timer that issues `STEP_SIMULATION` and,
//! every `spawn_period` ticks, `SPAWN_PERSON`. [`TickDriver`] issues
//! the same command sequence without a clock, so runs can be replayed
//! exactly in tests and benchmarks.

use cryptfield_core::{Command, CommandError, CommandOutcome, EntityId, TickId};

use crate::simulation::Simulation;

/// What one [`TickDriver::pulse`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pulse {
    /// The simulation was paused; nothing was issued.
    Paused,
    /// A step ran.
    Stepped {
        /// Tick reached.
        tick: TickId,
        /// Agent spawned after the step, if one was due and succeeded.
        spawned: Option<EntityId>,
        /// Whether a due spawn was rejected.
        spawn_failed: bool,
    },
}

/// Totals from [`TickDriver::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps executed.
    pub ticks: u64,
    /// Agents spawned.
    pub spawned: u64,
    /// Due spawns that were rejected.
    pub spawn_failures: u64,
    /// Pulses skipped because the simulation was paused.
    pub skipped_paused: u64,
}

/// Issues steps and periodic spawns.
#[derive(Clone, Debug)]
pub struct TickDriver {
    spawn_period: u64,
}

impl TickDriver {
    /// A driver spawning on ticks divisible by `spawn_period`.
    ///
    /// A zero period never spawns.
    pub fn new(spawn_period: u64) -> Self {
        Self { spawn_period }
    }

    /// A driver using `sim`'s configured spawn period.
    pub fn for_simulation(sim: &Simulation) -> Self {
        Self::new(sim.config().spawn_period)
    }

    /// Spawn period in ticks.
    pub fn spawn_period(&self) -> u64 {
        self.spawn_period
    }

    /// One scheduler beat: step unless paused, then spawn if due.
    ///
    /// A rejected spawn does not stop the driver; it is reported in the
    /// returned [`Pulse`].
    ///
    /// # Errors
    ///
    /// Returns the step's [`CommandError`] if the step itself is
    /// rejected.
    pub fn pulse(&self, sim: &mut Simulation) -> Result<Pulse, CommandError> {
        if sim.is_paused() {
            return Ok(Pulse::Paused);
        }
        let tick = match sim.apply(Command::Step)? {
            CommandOutcome::Stepped { tick } => tick,
            _ => sim.time(),
        };
        let mut spawned = None;
        let mut spawn_failed = false;
        if tick.is_multiple_of(self.spawn_period) {
            match sim.apply(Command::SpawnPerson) {
                Ok(CommandOutcome::Spawned { agent, .. }) => spawned = Some(agent),
                Ok(_) => {}
                Err(_) => spawn_failed = true,
            }
        }
        Ok(Pulse::Stepped {
            tick,
            spawned,
            spawn_failed,
        })
    }

    /// Pulse `pulses` times.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first rejected step.
    pub fn run(&self, sim: &mut Simulation, pulses: u64) -> Result<RunSummary, CommandError> {
        let mut summary = RunSummary::default();
        for _ in 0..pulses {
            match self.pulse(sim)? {
                Pulse::Paused => summary.skipped_paused += 1,
                Pulse::Stepped {
                    spawned,
                    spawn_failed,
                    ..
                } => {
                    summary.ticks += 1;
                    if spawned.is_some() {
                        summary.spawned += 1;
                    }
                    if spawn_failed {
                        summary.spawn_failures += 1;
                    }
                }
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn sim(attractors: u32) -> Simulation {
        Simulation::new(SimConfig {
            width: 80,
            height: 80,
            attractor_count: attractors,
            attractor_radius: (4.0, 8.0),
            attractor_popularity: (1.0, 10.0),
            spawn_period: 5,
            ..SimConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn spawns_on_period() {
        let mut s = sim(2);
        let driver = TickDriver::for_simulation(&s);
        let summary = driver.run(&mut s, 12).unwrap();
        assert_eq!(summary.ticks, 12);
        assert_eq!(summary.spawned, 2);
        assert_eq!(s.world().agents().count(), 2);
        assert_eq!(s.time(), TickId(12));
    }

    #[test]
    fn paused_simulation_is_not_stepped() {
        let mut s = sim(2);
        s.apply(Command::Pause).unwrap();
        let driver = TickDriver::new(5);
        assert_eq!(driver.pulse(&mut s).unwrap(), Pulse::Paused);
        let summary = driver.run(&mut s, 7).unwrap();
        assert_eq!(summary.skipped_paused, 7);
        assert_eq!(summary.ticks, 0);
        assert_eq!(s.time(), TickId(0));
    }

    #[test]
    fn failed_spawns_are_counted_not_fatal() {
        let mut s = sim(0);
        let summary = TickDriver::new(5).run(&mut s, 10).unwrap();
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.spawned, 0);
        assert_eq!(summary.spawn_failures, 2);
    }

    #[test]
    fn zero_period_never_spawns() {
        let mut s = sim(2);
        let summary = TickDriver::new(0).run(&mut s, 10).unwrap();
        assert_eq!(summary.spawned, 0);
        assert_eq!(summary.spawn_failures, 0);
    }
}
