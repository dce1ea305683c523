//! Reusable scenario fixtures.
//!
//! - [`AttractorFixture`]: a bare attractor description (position,
//!   radius, popularity) for solver and spawn tests.
//! - [`ObstacleCourse`]: a fine grid carrying two stamped footprints,
//!   so one attractor's field has to route around the other.

use cryptfield_core::Vector;
use cryptfield_space::{stamp_disk, Grid, OBSTACLE};

/// Attractor parameters without the world bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttractorFixture {
    pub position: Vector,
    pub radius: f64,
    pub popularity: f64,
}

impl AttractorFixture {
    pub fn new(x: f64, y: f64, radius: f64, popularity: f64) -> Self {
        Self {
            position: Vector::new(x, y),
            radius,
            popularity,
        }
    }
}

/// A 100x100 fine grid with a target footprint near the top-left and a
/// blocking footprint in the middle.
///
/// With an aggregation cell size of 10 the aggregate grid is 10x10; the
/// blocker covers the aggregate cells around `(5, 5)`.
pub struct ObstacleCourse {
    pub grid: Grid<f32>,
    pub target: AttractorFixture,
    pub blocker: AttractorFixture,
}

impl ObstacleCourse {
    pub const SIZE: u32 = 100;
    pub const CELL: u32 = 10;

    pub fn new() -> Self {
        let target = AttractorFixture::new(15.0, 15.0, 5.0, 60.0);
        let blocker = AttractorFixture::new(55.0, 55.0, 14.0, 40.0);
        let mut grid = Grid::new(Self::SIZE, Self::SIZE, 0.0f32).expect("non-empty");
        stamp_disk(&mut grid, target.position, target.radius, OBSTACLE);
        stamp_disk(&mut grid, blocker.position, blocker.radius, OBSTACLE);
        Self {
            grid,
            target,
            blocker,
        }
    }
}

impl Default for ObstacleCourse {
    fn default() -> Self {
        Self::new()
    }
}
