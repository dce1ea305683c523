//! Test utilities and fixtures for cryptfield development.
//!
//! Provides seeded RNG construction and small hand-built grids so unit
//! and integration tests across the workspace share one vocabulary.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use cryptfield_core::Vector;
use cryptfield_space::{stamp_disk, Grid, OBSTACLE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod fixtures;

pub use fixtures::{AttractorFixture, ObstacleCourse};

/// Deterministic RNG for tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A `width x height` fine grid with no resource and no obstacles.
pub fn empty_field(width: u32, height: u32) -> Grid<f32> {
    Grid::new(width, height, 0.0).expect("fixture dimensions are non-zero")
}

/// A fine grid with every cell set to `value`.
pub fn uniform_field(width: u32, height: u32, value: f32) -> Grid<f32> {
    Grid::new(width, height, value).expect("fixture dimensions are non-zero")
}

/// Build a grid from rows of values; `rows[y][x]` becomes cell `(x, y)`.
///
/// Panics if rows are ragged or empty.
pub fn grid_from_rows<T: Copy>(rows: &[&[T]]) -> Grid<T> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    assert!(
        rows.iter().all(|r| r.len() as u32 == width),
        "ragged fixture rows"
    );
    Grid::from_fn(width, height, |x, y| rows[y as usize][x as usize])
        .expect("fixture must be non-empty")
}

/// A fine grid with a single obstacle disk stamped at `center`.
pub fn field_with_obstacle(width: u32, height: u32, center: Vector, radius: f64) -> Grid<f32> {
    let mut grid = empty_field(width, height);
    stamp_disk(&mut grid, center, radius, OBSTACLE);
    grid
}

/// Count of cells holding a strictly positive value.
pub fn lit_cells(grid: &Grid<f32>) -> usize {
    grid.cells().iter().filter(|&&v| v > 0.0).count()
}
