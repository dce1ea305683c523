//! Initial world generation.

use cryptfield_core::{EntityId, Vector};
use cryptfield_space::{stamp_disk, Grid, OBSTACLE};
use rand::Rng;
use tracing::info;

use crate::config::{ConfigError, SimConfig};
use crate::entity::Attractor;
use crate::world::World;

/// Build the tick-0 world for `config`.
///
/// Each fine cell is lit with probability `initial_density`, holding a
/// random whole amount in `[0, initial_resource_max]`. Attractors get
/// ids `1..=attractor_count`, a radius and popularity drawn from their
/// ranges, and a position that keeps the whole footprint on the grid.
/// Footprints are then stamped with [`OBSTACLE`].
///
/// # Errors
///
/// Returns the first [`SimConfig::validate`] failure.
pub fn seed_world<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Result<World, ConfigError> {
    config.validate()?;

    let mut grid = Grid::from_fn(config.width, config.height, |_, _| {
        if rng.random_bool(config.initial_density) {
            rng.random_range(0..=config.initial_resource_max) as f32
        } else {
            0.0
        }
    })?;

    let mut world_entities = Vec::with_capacity(config.attractor_count as usize);
    let mut id = EntityId::FIRST;
    for _ in 0..config.attractor_count {
        let (r_lo, r_hi) = config.attractor_radius;
        let (p_lo, p_hi) = config.attractor_popularity;
        let radius = rng.random_range(r_lo..=r_hi);
        let popularity = rng.random_range(p_lo..=p_hi);
        let x = rng.random_range(radius..=f64::from(config.width) - radius);
        let y = rng.random_range(radius..=f64::from(config.height) - radius);
        let position = Vector::new(x, y);
        stamp_disk(&mut grid, position, radius, OBSTACLE);
        world_entities.push(Attractor::new(id, position, radius, popularity));
        id = id.next();
    }

    let lit = grid.cells().iter().filter(|&&v| v > 0.0).count();
    let mut world = World::new(grid, config.starting_budget);
    for attractor in world_entities {
        world.insert(attractor);
    }

    info!(
        width = config.width,
        height = config.height,
        attractors = config.attractor_count,
        lit_cells = lit,
        budget = config.starting_budget,
        seed = config.seed,
        "world seeded"
    );
    Ok(world)
}
