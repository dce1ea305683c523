//! Benchmark profiles for the cryptfield simulation.
//!
//! - [`reference_config`]: the 500x600 reference setup
//! - [`stress_config`]: 1000x1200 with three times the attractors
//! - [`populated`]: a simulation with agents already spawned and every
//!   path field computed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cryptfield_core::{Command, CommandError};
use cryptfield_engine::{ConfigError, SimConfig, Simulation};

/// The reference configuration with the given seed.
pub fn reference_config(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        ..SimConfig::default()
    }
}

/// Four times the cells and three times the attractors of
/// [`reference_config`].
pub fn stress_config(seed: u64) -> SimConfig {
    SimConfig {
        width: 1000,
        height: 1200,
        attractor_count: 21,
        seed,
        ..SimConfig::default()
    }
}

/// Errors building a populated simulation.
#[derive(Debug)]
pub enum SetupError {
    /// The configuration was rejected.
    Config(ConfigError),
    /// A warm-up command was rejected.
    Command(CommandError),
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<CommandError> for SetupError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

/// Build a simulation, spawn `agents` agents, and step once per
/// attractor so every path field exists.
pub fn populated(config: SimConfig, agents: usize) -> Result<Simulation, SetupError> {
    let rotation = u64::from(config.attractor_count);
    let mut sim = Simulation::new(config)?;
    for _ in 0..agents {
        sim.apply(Command::SpawnPerson)?;
    }
    for _ in 0..rotation {
        sim.apply(Command::Step)?;
    }
    Ok(sim)
}
