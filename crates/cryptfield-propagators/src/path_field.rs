//! Worklist label-correcting cost fields over the aggregate grid.
//!
//! For one attractor, computes the accumulated traversal cost from every
//! aggregate cell to the attractor's cell. Lower is closer; the source
//! is pinned at 0.
//!
//! ```text
//! local(c)  = max(0, agg[c]) / normalization + 1
//! F[c]      = min(F[n] for settled n in moore(c)) + local(c)
//! ```
//!
//! Cells whose aggregate value is negative and that lie further than the
//! source radius from the source (Euclidean, aggregate units) are
//! obstacles: they are marked [`PathField::UNREACHABLE`] and never
//! propagate. The source's own footprint stays passable.
//!
//! The worklist is a LIFO stack, so cells may be relaxed many times
//! before settling. Whenever a cell improves, every neighbour whose cost
//! is at least the new value and that is not an obstacle is pushed
//! again, which drives the field to the unique fixed point regardless of
//! pop order.

use cryptfield_core::{SolveError, Vector};
use cryptfield_space::{Grid, MOORE_OFFSETS};
use tracing::debug;

/// A solved cost field in aggregate-grid coordinates.
///
/// Holds two sentinels besides ordinary costs: [`UNSETTLED`] for cells
/// the relaxation never reached and [`UNREACHABLE`] for obstacle cells.
/// [`cost`](PathField::cost) hides both behind `None`.
///
/// [`UNSETTLED`]: PathField::UNSETTLED
/// [`UNREACHABLE`]: PathField::UNREACHABLE
#[derive(Clone, Debug, PartialEq)]
pub struct PathField {
    costs: Grid<f64>,
    source: (i32, i32),
}

impl PathField {
    /// Marker for cells not yet reached. Still eligible for relaxation.
    pub const UNSETTLED: f64 = f64::MAX;
    /// Marker for obstacle cells. Never relaxed through.
    pub const UNREACHABLE: f64 = f64::INFINITY;

    fn unsettled(width: u32, height: u32, source: (i32, i32)) -> Result<Self, SolveError> {
        let out_of_bounds = SolveError::SourceOutOfBounds {
            x: source.0,
            y: source.1,
            width,
            height,
        };
        let mut costs = Grid::new(width, height, Self::UNSETTLED).map_err(|_| out_of_bounds.clone())?;
        if !costs.contains(source.0, source.1) {
            return Err(out_of_bounds);
        }
        costs.set(source.0, source.1, 0.0);
        Ok(Self { costs, source })
    }

    /// Aggregate cell the field is anchored at.
    pub fn source(&self) -> (i32, i32) {
        self.source
    }

    /// Field width in aggregate cells.
    pub fn width(&self) -> u32 {
        self.costs.width()
    }

    /// Field height in aggregate cells.
    pub fn height(&self) -> u32 {
        self.costs.height()
    }

    /// Stored value at `(x, y)`, sentinels included. `None` out of range.
    pub fn raw(&self, x: i32, y: i32) -> Option<f64> {
        self.costs.get(x, y)
    }

    /// Settled cost at `(x, y)`.
    ///
    /// `None` if out of range, unreached, or an obstacle.
    pub fn cost(&self, x: i32, y: i32) -> Option<f64> {
        self.raw(x, y).filter(|&c| Self::is_settled(c))
    }

    /// Whether an agent at `(x, y)` can follow this field.
    pub fn is_reachable(&self, x: i32, y: i32) -> bool {
        self.cost(x, y).is_some()
    }

    /// The backing grid of raw values.
    pub fn costs(&self) -> &Grid<f64> {
        &self.costs
    }

    /// Number of cells holding a settled cost.
    pub fn settled_count(&self) -> usize {
        self.costs.cells().iter().filter(|&&c| Self::is_settled(c)).count()
    }

    fn is_settled(c: f64) -> bool {
        c < Self::UNSETTLED
    }
}

/// Work counters from one solve or relax call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Cells popped off the worklist.
    pub pops: u64,
    /// Times a cell's stored cost was lowered (or a stale zero replaced).
    pub updates: u64,
    /// Pops that found an obstacle cell.
    pub blocked: u64,
}

/// Label-correcting solver for attractor cost fields.
///
/// Holds only configuration; every call starts from its inputs, so the
/// same solver may serve every attractor.
///
/// # Construction
///
/// ```
/// use cryptfield_propagators::PathFieldSolver;
/// use cryptfield_space::Grid;
///
/// let solver = PathFieldSolver::builder()
///     .cost_normalization(1000.0)
///     .build()
///     .unwrap();
///
/// let aggregate = Grid::new(5, 5, 0.0f64).unwrap();
/// let (field, _) = solver.solve(&aggregate, (2, 2), 0.5).unwrap();
/// assert_eq!(field.cost(2, 2), Some(0.0));
/// assert_eq!(field.cost(0, 0), Some(2.0));
/// ```
#[derive(Clone, Debug)]
pub struct PathFieldSolver {
    cost_normalization: f64,
}

/// Builder for [`PathFieldSolver`].
///
/// Default `cost_normalization` is 1000, matching the default resource
/// cap, so a fully saturated fine cell adds one hop's worth of cost.
pub struct PathFieldSolverBuilder {
    cost_normalization: f64,
}

impl PathFieldSolver {
    /// Create a new builder.
    pub fn builder() -> PathFieldSolverBuilder {
        PathFieldSolverBuilder {
            cost_normalization: 1000.0,
        }
    }

    /// Divisor applied to aggregate resource before adding the unit hop.
    pub fn cost_normalization(&self) -> f64 {
        self.cost_normalization
    }

    /// Traversal cost of entering a cell with the given aggregate value.
    pub fn local_cost(&self, aggregate_value: f64) -> f64 {
        aggregate_value.max(0.0) / self.cost_normalization + 1.0
    }

    /// Compute a fresh cost field for an attractor at aggregate cell
    /// `source` with footprint radius `radius` (aggregate units).
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::SourceOutOfBounds`] if `source` lies outside
    /// `aggregate`.
    pub fn solve(
        &self,
        aggregate: &Grid<f64>,
        source: (i32, i32),
        radius: f64,
    ) -> Result<(PathField, SolveStats), SolveError> {
        let mut field = PathField::unsettled(aggregate.width(), aggregate.height(), source)?;
        let seeds = aggregate.neighbours(source.0, source.1);
        let stats = self.relax(&mut field, aggregate, radius, seeds)?;
        debug!(
            source_x = source.0,
            source_y = source.1,
            pops = stats.pops,
            updates = stats.updates,
            settled = field.settled_count(),
            "path field solved"
        );
        Ok((field, stats))
    }

    /// Continue relaxation of an existing field from `seeds`.
    ///
    /// The field's source cell is never relaxed. A zero found anywhere
    /// else is treated as stale and overwritten by its recomputed cost.
    /// Costs otherwise only ever decrease.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::DimensionMismatch`] if `field` and
    /// `aggregate` differ in shape.
    pub fn relax(
        &self,
        field: &mut PathField,
        aggregate: &Grid<f64>,
        radius: f64,
        seeds: impl IntoIterator<Item = (i32, i32)>,
    ) -> Result<SolveStats, SolveError> {
        if (field.width(), field.height()) != (aggregate.width(), aggregate.height()) {
            return Err(SolveError::DimensionMismatch {
                field: (field.width(), field.height()),
                aggregate: (aggregate.width(), aggregate.height()),
            });
        }

        let source = field.source;
        let mut stats = SolveStats::default();
        let mut worklist: Vec<(i32, i32)> = seeds
            .into_iter()
            .filter(|&c| c != source && aggregate.contains(c.0, c.1))
            .collect();

        while let Some((x, y)) = worklist.pop() {
            stats.pops += 1;
            let Some(value) = aggregate.get(x, y) else {
                continue;
            };

            if value < 0.0 && cell_point(source).distance(cell_point((x, y))) > radius {
                field.costs.set(x, y, PathField::UNREACHABLE);
                stats.blocked += 1;
                continue;
            }

            let Some(best) = self.best_neighbour(field, x, y) else {
                continue;
            };
            let candidate = best + self.local_cost(value);
            let current = field.raw(x, y).unwrap_or(PathField::UNSETTLED);
            if !((current == 0.0 && candidate != 0.0) || candidate < current) {
                continue;
            }

            field.costs.set(x, y, candidate);
            stats.updates += 1;

            for (dx, dy) in MOORE_OFFSETS {
                let n = (x + dx, y + dy);
                if n == source {
                    continue;
                }
                if let Some(c) = field.raw(n.0, n.1) {
                    if c >= candidate && c != PathField::UNREACHABLE {
                        worklist.push(n);
                    }
                }
            }
        }

        Ok(stats)
    }

    fn best_neighbour(&self, field: &PathField, x: i32, y: i32) -> Option<f64> {
        MOORE_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| field.cost(x + dx, y + dy))
            .fold(None, |best: Option<f64>, c| {
                Some(best.map_or(c, |b| b.min(c)))
            })
    }
}

impl PathFieldSolverBuilder {
    /// Set the resource divisor (default: 1000). Must be finite and > 0.
    pub fn cost_normalization(mut self, normalization: f64) -> Self {
        self.cost_normalization = normalization;
        self
    }

    /// Build the solver, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `cost_normalization` is not finite and positive.
    pub fn build(self) -> Result<PathFieldSolver, String> {
        if !self.cost_normalization.is_finite() || self.cost_normalization <= 0.0 {
            return Err(format!(
                "cost_normalization must be finite and > 0, got {}",
                self.cost_normalization
            ));
        }
        Ok(PathFieldSolver {
            cost_normalization: self.cost_normalization,
        })
    }
}

fn cell_point((x, y): (i32, i32)) -> Vector {
    Vector::new(f64::from(x), f64::from(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptfield_space::chebyshev;
    use cryptfield_test_utils::grid_from_rows;

    fn solver() -> PathFieldSolver {
        PathFieldSolver::builder().build().unwrap()
    }

    fn open(w: u32, h: u32) -> Grid<f64> {
        Grid::new(w, h, 0.0).unwrap()
    }

    // ---------------------------------------------------------------
    // Builder tests
    // ---------------------------------------------------------------

    #[test]
    fn builder_default_normalization() {
        assert_eq!(solver().cost_normalization(), 1000.0);
    }

    #[test]
    fn builder_rejects_non_positive_normalization() {
        let err = PathFieldSolver::builder()
            .cost_normalization(0.0)
            .build()
            .unwrap_err();
        assert!(err.contains("cost_normalization"));
        assert!(PathFieldSolver::builder()
            .cost_normalization(f64::INFINITY)
            .build()
            .is_err());
    }

    // ---------------------------------------------------------------
    // Solver tests
    // ---------------------------------------------------------------

    #[test]
    fn local_cost_ignores_negative_values() {
        let s = solver();
        assert_eq!(s.local_cost(0.0), 1.0);
        assert_eq!(s.local_cost(-50.0), 1.0);
        assert_eq!(s.local_cost(500.0), 1.5);
    }

    #[test]
    fn open_grid_cost_is_chebyshev_distance() {
        let aggregate = open(9, 7);
        let source = (3, 2);
        let (field, _) = solver().solve(&aggregate, source, 0.0).unwrap();
        for (x, y, _) in aggregate.iter() {
            let d = chebyshev((x, y), source) as f64;
            assert_eq!(field.cost(x, y), Some(d), "cell ({x},{y})");
        }
    }

    #[test]
    fn source_is_zero_after_solve() {
        let aggregate = grid_from_rows(&[
            &[-5.0f64, 300.0, 0.0],
            &[0.0, -100.0, 20.0],
            &[7.0, 0.0, 0.0],
        ]);
        let (field, _) = solver().solve(&aggregate, (1, 1), 0.5).unwrap();
        assert_eq!(field.cost(1, 1), Some(0.0));
        assert_eq!(field.source(), (1, 1));
    }

    #[test]
    fn resource_raises_cost() {
        // Two routes from (0,1) to the source at (2,1): straight through
        // a rich cell, or around it. Going around costs one extra hop
        // but avoids the resource penalty.
        let aggregate = grid_from_rows(&[
            &[0.0f64, 0.0, 0.0],
            &[0.0, 5000.0, 0.0],
            &[0.0, 0.0, 0.0],
        ]);
        let (field, _) = solver().solve(&aggregate, (2, 1), 0.0).unwrap();
        assert_eq!(field.cost(1, 1), Some(6.0));
        assert_eq!(field.cost(1, 0), Some(1.0));
        assert_eq!(field.cost(0, 1), Some(2.0));
    }

    #[test]
    fn foreign_obstacles_are_unreachable() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, 0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, -10.0, 0.0, 0.0],
            &[0.0, 0.0, -10.0, 0.0, 0.0],
            &[0.0, 0.0, -10.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
        ]);
        let (field, stats) = solver().solve(&aggregate, (0, 2), 0.5).unwrap();
        for y in 1..=3 {
            assert_eq!(field.cost(2, y), None);
            assert_eq!(field.raw(2, y), Some(PathField::UNREACHABLE));
        }
        assert!(stats.blocked > 0);
        // The wall forces a detour over the top or bottom row.
        assert_eq!(field.cost(4, 2), Some(4.0));
        assert_eq!(field.cost(3, 2), Some(4.0));
        assert_eq!(field.cost(3, 1), Some(3.0));
    }

    #[test]
    fn own_footprint_is_passable() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, 0.0, 0.0],
            &[0.0, -50.0, -50.0],
            &[0.0, 0.0, 0.0],
        ]);
        // Radius 1.0 covers the neighbouring footprint cell at (2,1).
        let (field, _) = solver().solve(&aggregate, (1, 1), 1.0).unwrap();
        assert_eq!(field.cost(2, 1), Some(1.0));

        // With a smaller radius the same cell is a foreign obstacle.
        let (field, _) = solver().solve(&aggregate, (1, 1), 0.5).unwrap();
        assert_eq!(field.cost(2, 1), None);
    }

    #[test]
    fn enclosed_cells_stay_unsettled() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, -1.0, 0.0],
            &[-1.0, -1.0, 0.0],
            &[0.0, 0.0, 0.0],
        ]);
        let (field, _) = solver().solve(&aggregate, (2, 2), 0.0).unwrap();
        assert_eq!(field.raw(0, 0), Some(PathField::UNSETTLED));
        assert!(!field.is_reachable(0, 0));
        assert!(field.is_reachable(0, 2));
    }

    #[test]
    fn out_of_bounds_source_is_rejected() {
        let err = solver().solve(&open(4, 4), (4, 0), 1.0).unwrap_err();
        assert_eq!(
            err,
            SolveError::SourceOutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 4
            }
        );
    }

    #[test]
    fn single_cell_grid_is_just_the_source() {
        let (field, stats) = solver().solve(&open(1, 1), (0, 0), 0.0).unwrap();
        assert_eq!(field.cost(0, 0), Some(0.0));
        assert_eq!(stats.pops, 0);
    }

    #[test]
    fn solve_is_idempotent() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, 120.0, 0.0, 800.0],
            &[40.0, -3.0, 0.0, 10.0],
            &[0.0, 0.0, 950.0, 0.0],
            &[5.0, 0.0, 0.0, 0.0],
        ]);
        let (a, sa) = solver().solve(&aggregate, (3, 3), 0.5).unwrap();
        let (b, sb) = solver().solve(&aggregate, (3, 3), 0.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(sa, sb);
    }

    #[test]
    fn further_relaxation_never_raises_costs() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, 120.0, 0.0, 800.0, 0.0],
            &[40.0, -3.0, 0.0, 10.0, 0.0],
            &[0.0, 0.0, 950.0, 0.0, 60.0],
            &[5.0, 0.0, 0.0, 0.0, 0.0],
        ]);
        let s = solver();
        let (mut field, _) = s.solve(&aggregate, (0, 3), 0.5).unwrap();
        let before = field.clone();
        let all: Vec<(i32, i32)> = aggregate.iter().map(|(x, y, _)| (x, y)).collect();
        let stats = s.relax(&mut field, &aggregate, 0.5, all).unwrap();
        assert_eq!(stats.updates, 0);
        for (x, y, c) in field.costs().iter() {
            assert!(c <= before.raw(x, y).unwrap());
        }
        assert_eq!(field, before);
    }

    #[test]
    fn relax_overwrites_stale_zero() {
        let aggregate = open(3, 1);
        let s = solver();
        let (mut field, _) = s.solve(&aggregate, (0, 0), 0.0).unwrap();
        field.costs.set(2, 0, 0.0);
        let stats = s.relax(&mut field, &aggregate, 0.0, [(2, 0)]).unwrap();
        assert_eq!(stats.updates, 1);
        assert_eq!(field.cost(2, 0), Some(2.0));
    }

    #[test]
    fn relax_rejects_mismatched_shapes() {
        let s = solver();
        let (mut field, _) = s.solve(&open(3, 3), (1, 1), 0.0).unwrap();
        let err = s.relax(&mut field, &open(4, 3), 0.0, Vec::new()).unwrap_err();
        assert!(matches!(err, SolveError::DimensionMismatch { .. }));
    }
}
