//! Stochastic growth-and-ignition automaton for the fine resource grid.
//!
//! One step visits every cell once in row-major order and updates it in
//! place:
//!
//! ```text
//! v > 0   ->  min(max_resource, v + growth)
//! v == 0  ->  1 with probability n / max_resource, for each lit
//!             Moore neighbour n in order, stopping at the first success
//! v < 0   ->  unchanged (obstacle)
//! ```
//!
//! Updates are not double-buffered: a cell ignited earlier in the scan
//! is already lit when its later neighbours are visited, so growth
//! spreads further toward the bottom-right within one step than toward
//! the top-left. The scan and neighbour orders are part of the contract.
//!
//! Constructed via the builder pattern: [`CryptoDiffusion::builder`].

use cryptfield_space::{Grid, MOORE_OFFSETS};
use rand::Rng;

/// Counts from one diffusion step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffusionStats {
    /// Lit cells that grew (including those already at the cap).
    pub grown: usize,
    /// Empty cells that ignited.
    pub ignited: usize,
}

/// The in-place stochastic diffusion rule.
///
/// # Construction
///
/// ```
/// use cryptfield_propagators::CryptoDiffusion;
///
/// let diffusion = CryptoDiffusion::builder()
///     .max_resource(1000.0)
///     .build()
///     .unwrap();
/// assert_eq!(diffusion.max_resource(), 1000.0);
/// ```
#[derive(Clone, Debug)]
pub struct CryptoDiffusion {
    max_resource: f32,
    growth: f32,
}

/// Builder for [`CryptoDiffusion`].
///
/// Defaults: `max_resource = 1000`, `growth = 1`.
pub struct CryptoDiffusionBuilder {
    max_resource: f32,
    growth: f32,
}

impl CryptoDiffusion {
    /// Create a new builder.
    pub fn builder() -> CryptoDiffusionBuilder {
        CryptoDiffusionBuilder {
            max_resource: 1000.0,
            growth: 1.0,
        }
    }

    /// Resource cap.
    pub fn max_resource(&self) -> f32 {
        self.max_resource
    }

    /// Per-step linear growth of lit cells.
    pub fn growth(&self) -> f32 {
        self.growth
    }

    /// Advance `grid` by one step.
    pub fn step<R: Rng + ?Sized>(&self, grid: &mut Grid<f32>, rng: &mut R) -> DiffusionStats {
        let mut stats = DiffusionStats::default();
        let width = grid.width() as i32;
        let height = grid.height() as i32;

        for y in 0..height {
            for x in 0..width {
                let Some(v) = grid.get(x, y) else { continue };
                if v > 0.0 {
                    grid.set(x, y, (v + self.growth).min(self.max_resource));
                    stats.grown += 1;
                } else if v == 0.0 && self.try_ignite(grid, x, y, rng) {
                    grid.set(x, y, 1.0);
                    stats.ignited += 1;
                }
            }
        }

        tracing::trace!(grown = stats.grown, ignited = stats.ignited, "diffusion step");
        stats
    }

    fn try_ignite<R: Rng + ?Sized>(&self, grid: &Grid<f32>, x: i32, y: i32, rng: &mut R) -> bool {
        for (dx, dy) in MOORE_OFFSETS {
            let Some(n) = grid.get(x + dx, y + dy) else {
                continue;
            };
            if n > 0.0 && rng.random::<f64>() < (n / self.max_resource) as f64 {
                return true;
            }
        }
        false
    }
}

impl CryptoDiffusionBuilder {
    /// Set the resource cap (default: 1000). Must be finite and > 0.
    pub fn max_resource(mut self, max_resource: f32) -> Self {
        self.max_resource = max_resource;
        self
    }

    /// Set the per-step growth of lit cells (default: 1). Must be
    /// finite and >= 0.
    pub fn growth(mut self, growth: f32) -> Self {
        self.growth = growth;
        self
    }

    /// Build the rule, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `max_resource` is not finite and positive, or if
    /// `growth` is negative or not finite.
    pub fn build(self) -> Result<CryptoDiffusion, String> {
        if !self.max_resource.is_finite() || self.max_resource <= 0.0 {
            return Err(format!(
                "max_resource must be finite and > 0, got {}",
                self.max_resource
            ));
        }
        if !self.growth.is_finite() || self.growth < 0.0 {
            return Err(format!("growth must be finite and >= 0, got {}", self.growth));
        }
        Ok(CryptoDiffusion {
            max_resource: self.max_resource,
            growth: self.growth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptfield_space::OBSTACLE;
    use cryptfield_test_utils::{empty_field, grid_from_rows, lit_cells, seeded_rng};

    fn rule(max: f32) -> CryptoDiffusion {
        CryptoDiffusion::builder().max_resource(max).build().unwrap()
    }

    // ---------------------------------------------------------------
    // Builder tests
    // ---------------------------------------------------------------

    #[test]
    fn builder_defaults() {
        let d = CryptoDiffusion::builder().build().unwrap();
        assert_eq!(d.max_resource(), 1000.0);
        assert_eq!(d.growth(), 1.0);
    }

    #[test]
    fn builder_rejects_bad_cap() {
        let err = CryptoDiffusion::builder().max_resource(0.0).build().unwrap_err();
        assert!(err.contains("max_resource"));
        assert!(CryptoDiffusion::builder()
            .max_resource(f32::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn builder_rejects_negative_growth() {
        let err = CryptoDiffusion::builder().growth(-1.0).build().unwrap_err();
        assert!(err.contains("growth"));
    }

    // ---------------------------------------------------------------
    // Rule tests
    // ---------------------------------------------------------------

    #[test]
    fn all_zero_grid_is_fixed_point() {
        let mut grid = empty_field(12, 9);
        let mut rng = seeded_rng(3);
        for _ in 0..20 {
            let stats = rule(1000.0).step(&mut grid, &mut rng);
            assert_eq!(stats, DiffusionStats::default());
        }
        assert_eq!(grid, empty_field(12, 9));
    }

    #[test]
    fn lit_cells_grow_linearly_and_cap() {
        let mut grid = grid_from_rows(&[&[5.0f32, 9.5, 10.0]]);
        let mut rng = seeded_rng(0);
        rule(10.0).step(&mut grid, &mut rng);
        assert_eq!(grid.get(0, 0), Some(6.0));
        assert_eq!(grid.get(1, 0), Some(10.0));
        assert_eq!(grid.get(2, 0), Some(10.0));
    }

    #[test]
    fn saturated_neighbour_always_ignites() {
        // p = n / max = 1 for a capped neighbour, so ignition is certain.
        let mut grid = grid_from_rows(&[&[0.0f32, 0.0, 0.0], &[0.0, 10.0, 0.0], &[0.0, 0.0, 0.0]]);
        let mut rng = seeded_rng(11);
        let stats = rule(10.0).step(&mut grid, &mut rng);
        assert_eq!(stats.ignited, 8);
        assert_eq!(stats.grown, 1);
        assert_eq!(lit_cells(&grid), 9);
    }

    #[test]
    fn in_place_scan_spreads_forward() {
        // A capped cell in the top-left corner: every later cell in the
        // scan sees an already-ignited neighbour at value 1, which with
        // max = 1 ignites with certainty. One step lights the whole row.
        let mut grid = grid_from_rows(&[&[1.0f32, 0.0, 0.0, 0.0, 0.0]]);
        let mut rng = seeded_rng(5);
        let stats = rule(1.0).step(&mut grid, &mut rng);
        assert_eq!(stats.ignited, 4);
        assert!(grid.cells().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn in_place_scan_does_not_spread_backward() {
        // The lit cell sits at the end of the row; cells before it in
        // the scan only see it if adjacent.
        let mut grid = grid_from_rows(&[&[0.0f32, 0.0, 0.0, 0.0, 1.0]]);
        let mut rng = seeded_rng(5);
        let stats = rule(1.0).step(&mut grid, &mut rng);
        assert_eq!(stats.ignited, 1);
        assert_eq!(grid.get(3, 0), Some(1.0));
        assert_eq!(grid.get(2, 0), Some(0.0));
    }

    #[test]
    fn obstacles_never_change() {
        let mut grid = grid_from_rows(&[&[OBSTACLE, 10.0f32], &[10.0, OBSTACLE]]);
        let mut rng = seeded_rng(9);
        for _ in 0..5 {
            rule(10.0).step(&mut grid, &mut rng);
        }
        assert_eq!(grid.get(0, 0), Some(OBSTACLE));
        assert_eq!(grid.get(1, 1), Some(OBSTACLE));
    }

    #[test]
    fn obstacles_do_not_ignite_neighbours() {
        let mut grid = grid_from_rows(&[&[OBSTACLE, 0.0f32, 0.0]]);
        let mut rng = seeded_rng(9);
        rule(10.0).step(&mut grid, &mut rng);
        assert_eq!(grid.get(1, 0), Some(0.0));
        assert_eq!(grid.get(2, 0), Some(0.0));
    }

    #[test]
    fn same_seed_same_result() {
        let start = grid_from_rows(&[
            &[0.0f32, 0.0, 0.0, 0.0],
            &[0.0, 400.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 700.0],
        ]);
        let run = |seed| {
            let mut grid = start.clone();
            let mut rng = seeded_rng(seed);
            for _ in 0..10 {
                rule(1000.0).step(&mut grid, &mut rng);
            }
            grid
        };
        assert_eq!(run(42), run(42));
    }
}
