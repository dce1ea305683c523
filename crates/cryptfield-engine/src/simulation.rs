//! The simulation orchestrator.
//!
//! [`Simulation`] owns the [`World`], the seeded RNG, and one instance
//! of every rule. All mutation goes through [`apply()`](Simulation::apply),
//! which takes `&mut self`; readers get an owned copy from
//! [`snapshot()`](Simulation::snapshot) between commands.
//!
//! # Tick order
//!
//! One `STEP_SIMULATION` runs, in this order:
//!
//! 1. `time += 1`.
//! 2. Diffusion, when `time` is a multiple of the diffusion period.
//! 3. One attractor's path field is recomputed from a fresh aggregate.
//!    The attractor at position `time % count` in id order is chosen.
//! 4. Every agent, in id order, takes one step along its destination's
//!    field and then harvests around its new position.
//!
//! Anything that could fail is checked before step 1, so a rejected
//! step leaves the world untouched.

use std::time::Instant;

use cryptfield_core::{Command, CommandError, CommandOutcome, EntityId, SolveError, TickId, Vector};
use cryptfield_propagators::{CryptoDiffusion, MovementPolicy, PathFieldSolver, SpawnPolicy};
use cryptfield_space::{Aggregator, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, SimConfig};
use crate::entity::{Agent, Entity};
use crate::init::seed_world;
use crate::metrics::StepMetrics;
use crate::world::World;

/// Single-threaded owner of a running simulation.
///
/// # Example
///
/// ```
/// use cryptfield_core::{Command, CommandOutcome, TickId};
/// use cryptfield_engine::{SimConfig, Simulation};
///
/// let config = SimConfig {
///     width: 100,
///     height: 100,
///     attractor_count: 3,
///     attractor_radius: (5.0, 10.0),
///     ..SimConfig::default()
/// };
/// let mut sim = Simulation::new(config).unwrap();
/// let outcome = sim.apply(Command::Step).unwrap();
/// assert_eq!(outcome, CommandOutcome::Stepped { tick: TickId(1) });
/// ```
pub struct Simulation {
    config: SimConfig,
    world: World,
    rng: ChaCha8Rng,
    diffusion: CryptoDiffusion,
    solver: PathFieldSolver,
    movement: MovementPolicy,
    spawner: SpawnPolicy,
    aggregator: Aggregator,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config`, seed the RNG from `config.seed`, and generate
    /// the tick-0 world.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = seed_world(&config, &mut rng)?;
        Self::assemble(config, world, rng)
    }

    /// Run `config`'s rules over a hand-built `world`.
    ///
    /// The RNG is seeded from `config.seed`. The world's grid must have
    /// the configured dimensions and every attractor must sit on the
    /// aggregate grid.
    pub fn from_world(config: SimConfig, world: World) -> Result<Self, ConfigError> {
        config.validate()?;
        let actual = (world.grid.width(), world.grid.height());
        if actual != (config.width, config.height) {
            return Err(ConfigError::WorldMismatch {
                expected: (config.width, config.height),
                actual,
            });
        }
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let sim = Self::assemble(config, world, rng)?;
        for id in sim.world.attractors().map(|a| a.id) {
            match sim.preflight(id) {
                Ok(_) => {}
                Err(SolveError::SourceOutOfBounds { x, y, .. }) => {
                    return Err(ConfigError::AttractorOffGrid { id, x, y });
                }
                Err(e) => {
                    return Err(ConfigError::Rule {
                        reason: e.to_string(),
                    })
                }
            }
        }
        Ok(sim)
    }

    fn assemble(config: SimConfig, world: World, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        let rule = |reason: String| ConfigError::Rule { reason };
        let diffusion = CryptoDiffusion::builder()
            .max_resource(config.max_resource)
            .build()
            .map_err(rule)?;
        let solver = PathFieldSolver::builder()
            .cost_normalization(config.cost_normalization)
            .build()
            .map_err(rule)?;
        let mut movement = MovementPolicy::builder();
        if let Some(k) = config.exploration {
            movement = movement.exploration(k);
        }
        let movement = movement.build().map_err(rule)?;
        let spawner = SpawnPolicy::builder()
            .dimensions(config.width, config.height)
            .edge(config.spawn_edge)
            .margin(config.spawn_margin)
            .agent_radius(config.agent_radius)
            .build()
            .map_err(rule)?;
        let aggregator = Aggregator::new(config.agg_cell_size)?;

        Ok(Self {
            config,
            world,
            rng,
            diffusion,
            solver,
            movement,
            spawner,
            aggregator,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the command was rejected. The world
    /// is then exactly as before the call and the simulation stays
    /// usable.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        let result = match command {
            Command::Step => self.step(),
            Command::Pause => Ok(self.toggle_pause()),
            Command::SpawnPerson => self.spawn_person(),
            Command::ClearPath { position, radius } => self.clear_path(position, radius),
        };
        if let Err(e) = &result {
            warn!(command = command.name(), tick = self.world.time.0, error = %e, "command rejected");
        }
        result
    }

    /// Live world state.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Owned copy of the world for readers that outlive the next command.
    pub fn snapshot(&self) -> World {
        self.world.clone()
    }

    /// Configuration the simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current tick.
    pub fn time(&self) -> TickId {
        self.world.time
    }

    /// Whether ticks are currently held back.
    pub fn is_paused(&self) -> bool {
        self.world.paused
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The attractor whose field is recomputed at tick `time`.
    pub fn rotation_target(&self, time: TickId) -> Option<EntityId> {
        let count = self.world.attractors().count() as u64;
        if count == 0 {
            return None;
        }
        let slot = (time.0 % count) as usize;
        self.world.attractors().nth(slot).map(|a| a.id)
    }

    fn toggle_pause(&mut self) -> CommandOutcome {
        self.world.paused = !self.world.paused;
        CommandOutcome::PauseToggled {
            paused: self.world.paused,
        }
    }

    fn step(&mut self) -> Result<CommandOutcome, CommandError> {
        let start = Instant::now();
        let next = TickId(self.world.time.0 + 1);
        let target = self.rotation_target(next);
        let source = match target {
            Some(id) => Some((id, self.preflight(id)?)),
            None => None,
        };

        let mut metrics = StepMetrics::default();
        self.world.time = next;

        // Diffusion.
        if next.is_multiple_of(self.config.diffusion_period) {
            let t = Instant::now();
            let stats = self.diffusion.step(&mut self.world.grid, &mut self.rng);
            metrics.diffused = true;
            metrics.ignited = stats.ignited;
            metrics.diffusion_us = t.elapsed().as_micros() as u64;
        }

        // Round-robin path field.
        if let Some((id, (cell, radius))) = source {
            let t = Instant::now();
            let aggregate = self.aggregate()?;
            let (field, stats) = self.solver.solve(&aggregate, cell, radius)?;
            if let Some(attractor) = self.world.entity_mut(id).and_then(Entity::as_attractor_mut) {
                attractor.path_field = Some(field);
            }
            metrics.recomputed = Some(id);
            metrics.solver_pops = stats.pops;
            metrics.solver_updates = stats.updates;
            metrics.path_field_us = t.elapsed().as_micros() as u64;
            debug!(
                tick = next.0,
                attractor = id.0,
                pops = stats.pops,
                updates = stats.updates,
                "path field recomputed"
            );
        }

        // Agents.
        let t = Instant::now();
        let agents: Vec<EntityId> = self.world.agents().map(|a| a.id).collect();
        for id in agents {
            if self.move_agent(id) {
                metrics.agents_moved += 1;
            } else {
                metrics.agents_stalled += 1;
            }
        }
        metrics.movement_us = t.elapsed().as_micros() as u64;

        metrics.total_us = start.elapsed().as_micros() as u64;
        trace!(
            tick = next.0,
            diffused = metrics.diffused,
            moved = metrics.agents_moved,
            total_us = metrics.total_us,
            "tick complete"
        );
        self.last_metrics = metrics;
        Ok(CommandOutcome::Stepped { tick: next })
    }

    /// Check that attractor `id` can be solved for, returning its
    /// aggregate cell and radius in aggregate units.
    fn preflight(&self, id: EntityId) -> Result<((i32, i32), f64), SolveError> {
        let (cw, ch) = self
            .aggregator
            .coarse_dims(self.world.grid.width(), self.world.grid.height())
            .map_err(|_| self.unaggregatable())?;
        let Some(attractor) = self.world.attractor(id) else {
            return Err(self.unaggregatable());
        };
        let cell = self.aggregator.to_coarse(attractor.position);
        let in_bounds = cell.0 >= 0 && cell.1 >= 0 && (cell.0 as u32) < cw && (cell.1 as u32) < ch;
        if !in_bounds {
            return Err(SolveError::SourceOutOfBounds {
                x: cell.0,
                y: cell.1,
                width: cw,
                height: ch,
            });
        }
        Ok((cell, attractor.radius / f64::from(self.aggregator.cell_size())))
    }

    fn aggregate(&self) -> Result<Grid<f64>, SolveError> {
        self.aggregator
            .aggregate(&self.world.grid)
            .map_err(|_| self.unaggregatable())
    }

    fn unaggregatable(&self) -> SolveError {
        SolveError::Unaggregatable {
            width: self.world.grid.width(),
            height: self.world.grid.height(),
            cell_size: self.aggregator.cell_size(),
        }
    }

    /// Step one agent along its destination's field, then harvest.
    /// Returns whether the agent moved.
    fn move_agent(&mut self, id: EntityId) -> bool {
        let Some(Agent {
            position,
            radius,
            destination,
            ..
        }) = self.world.agent(id).cloned()
        else {
            return false;
        };

        let next = self
            .world
            .attractor(destination)
            .and_then(|a| a.path_field.as_ref())
            .and_then(|field| {
                self.movement
                    .advance(position, field, &self.aggregator, &mut self.rng)
            });

        let here = next.unwrap_or(position);
        if let Some(agent) = self.world.entity_mut(id).and_then(Entity::as_agent_mut) {
            agent.position = here;
        }
        self.config.harvest.apply(&mut self.world.grid, here, radius);
        next.is_some()
    }

    fn spawn_person(&mut self) -> Result<CommandOutcome, CommandError> {
        let candidates: Vec<(EntityId, f64)> = self
            .world
            .attractors()
            .map(|a| (a.id, a.popularity))
            .collect();
        let plan = self
            .spawner
            .plan(self.world.ids(), &candidates, &mut self.rng)?;

        self.world.insert(Agent {
            id: plan.id,
            position: plan.position,
            radius: plan.radius,
            destination: plan.destination,
        });
        self.world.budget += self.config.spawn_reward;
        debug!(
            agent = plan.id.0,
            destination = plan.destination.0,
            x = plan.position.x,
            y = plan.position.y,
            "agent spawned"
        );
        Ok(CommandOutcome::Spawned {
            agent: plan.id,
            destination: plan.destination,
        })
    }

    fn clear_path(&mut self, position: Vector, radius: f64) -> Result<CommandOutcome, CommandError> {
        if self.world.budget <= 0 {
            return Err(CommandError::InsufficientBudget {
                budget: self.world.budget,
            });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(CommandError::InvalidRadius { radius });
        }

        let mut cleared = 0;
        self.world.grid.update_disk(position, radius, |v| {
            if *v >= 0.0 {
                *v = 0.0;
                cleared += 1;
            }
        });
        self.world.budget -= 1;
        Ok(CommandOutcome::PathCleared {
            cells: cleared,
            budget: self.world.budget,
        })
    }
}
