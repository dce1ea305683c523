//! Cryptfield quickstart: seed a world, run it, and poke at it.
//!
//! Demonstrates:
//!   1. Building a `SimConfig` and `Simulation`
//!   2. Driving ticks and periodic spawns with `TickDriver`
//!   3. Issuing `CLEAR_PATH` and `PAUSE` by hand
//!   4. Reading metrics and a snapshot between ticks
//!
//! Run with:
//!   RUST_LOG=cryptfield_engine=debug cargo run --example quickstart

use cryptfield_core::{Command, CommandOutcome, Vector};
use cryptfield_engine::{SimConfig, Simulation, TickDriver};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SimConfig {
        seed: 2024,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config)?;
    let driver = TickDriver::for_simulation(&sim);

    println!("=== Cryptfield Quickstart ===");
    println!(
        "grid {}x{}, {} attractors, budget {}",
        sim.world().grid.width(),
        sim.world().grid.height(),
        sim.world().attractors().count(),
        sim.world().budget
    );

    // ─── Run ─────────────────────────────────────────────────────
    for round in 1..=4 {
        let summary = driver.run(&mut sim, 50)?;
        let m = sim.last_metrics();
        let resource: f64 = sim
            .world()
            .grid
            .cells()
            .iter()
            .filter(|&&v| v > 0.0)
            .map(|&v| f64::from(v))
            .sum();
        println!(
            "round {round}: tick {} | +{} agents | resource {resource:.0} | last tick {}us (solver {} pops)",
            sim.time(),
            summary.spawned,
            m.total_us,
            m.solver_pops
        );
    }

    // ─── Clear a path ────────────────────────────────────────────
    match sim.apply(Command::ClearPath {
        position: Vector::new(250.0, 300.0),
        radius: 10.0,
    })? {
        CommandOutcome::PathCleared { cells, budget } => {
            println!("cleared {cells} cells, budget now {budget}");
        }
        other => println!("unexpected outcome {other:?}"),
    }

    // ─── Pause ───────────────────────────────────────────────────
    sim.apply(Command::Pause)?;
    let held = driver.run(&mut sim, 10)?;
    println!("paused: {} pulses skipped, still at tick {}", held.skipped_paused, sim.time());
    sim.apply(Command::Pause)?;

    // ─── Snapshot ────────────────────────────────────────────────
    let snapshot = sim.snapshot();
    for agent in snapshot.agents().take(5) {
        println!(
            "agent {} at {} heading to {}",
            agent.id, agent.position, agent.destination
        );
    }
    println!("state hash {:016x}", snapshot.state_hash());

    Ok(())
}
