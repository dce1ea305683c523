//! Greedy descent of a path field, with optional exploration.
//!
//! An agent looks at the in-bounds Moore neighbours of its aggregate
//! cell and steps to the one with the lowest settled cost. Ties go to
//! the later candidate on a fair coin flip so the scan order does not
//! bias direction.
//!
//! With exploration enabled at scale `k`, a strictly worse neighbour
//! with gap `g` still takes the step with probability `min(1, 1/(k*g))`.
//! The best score is kept, so a later equal-or-better candidate is
//! compared against the true best, not the explored one.

use cryptfield_core::Vector;
use cryptfield_space::{Aggregator, MOORE_OFFSETS};
use rand::Rng;

use crate::path_field::PathField;

/// Chooses one aggregate-cell step per agent per tick.
///
/// # Construction
///
/// ```
/// use cryptfield_propagators::MovementPolicy;
///
/// let greedy = MovementPolicy::builder().build().unwrap();
/// assert_eq!(greedy.exploration(), None);
///
/// let annealed = MovementPolicy::builder().exploration(10.0).build().unwrap();
/// assert_eq!(annealed.exploration(), Some(10.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MovementPolicy {
    exploration: Option<f64>,
}

/// Builder for [`MovementPolicy`].
pub struct MovementPolicyBuilder {
    exploration: Option<f64>,
}

impl MovementPolicy {
    /// Create a new builder. Exploration is off by default.
    pub fn builder() -> MovementPolicyBuilder {
        MovementPolicyBuilder { exploration: None }
    }

    /// Exploration scale, if enabled.
    pub fn exploration(&self) -> Option<f64> {
        self.exploration
    }

    /// Pick the aggregate-space delta for an agent at aggregate cell
    /// `from`.
    ///
    /// Returns `None` when `from` is not reachable in `field` (out of
    /// range, unsettled, or an obstacle) or when no neighbour holds a
    /// settled cost. The agent then stays put.
    pub fn choose_step<R: Rng + ?Sized>(
        &self,
        field: &PathField,
        from: (i32, i32),
        rng: &mut R,
    ) -> Option<(i32, i32)> {
        field.cost(from.0, from.1)?;

        let mut best: Option<(f64, (i32, i32))> = None;
        let mut chosen = None;
        for (dx, dy) in MOORE_OFFSETS {
            let Some(cost) = field.cost(from.0 + dx, from.1 + dy) else {
                continue;
            };
            let delta = (dx, dy);
            match best {
                None => {
                    best = Some((cost, delta));
                    chosen = Some(delta);
                }
                Some((score, _)) if cost < score => {
                    best = Some((cost, delta));
                    chosen = Some(delta);
                }
                Some((score, _)) if cost == score => {
                    if rng.random_bool(0.5) {
                        best = Some((cost, delta));
                        chosen = Some(delta);
                    }
                }
                Some((score, _)) => {
                    if let Some(k) = self.exploration {
                        let p = (1.0 / (k * (cost - score))).min(1.0);
                        if rng.random_bool(p) {
                            chosen = Some(delta);
                        }
                    }
                }
            }
        }
        chosen
    }

    /// Move a fine-space `position` one aggregation cell along `field`.
    ///
    /// Returns the new position, or `None` if the agent stays put.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        position: Vector,
        field: &PathField,
        aggregator: &Aggregator,
        rng: &mut R,
    ) -> Option<Vector> {
        let from = aggregator.to_coarse(position);
        let (dx, dy) = self.choose_step(field, from, rng)?;
        Some(position + aggregator.to_fine_offset(dx, dy))
    }
}

impl MovementPolicyBuilder {
    /// Enable exploration with scale `k`. Larger `k` explores less.
    pub fn exploration(mut self, k: f64) -> Self {
        self.exploration = Some(k);
        self
    }

    /// Build the policy, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the exploration scale is not finite and positive.
    pub fn build(self) -> Result<MovementPolicy, String> {
        if let Some(k) = self.exploration {
            if !k.is_finite() || k <= 0.0 {
                return Err(format!("exploration scale must be finite and > 0, got {k}"));
            }
        }
        Ok(MovementPolicy {
            exploration: self.exploration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_field::PathFieldSolver;
    use cryptfield_space::Grid;
    use cryptfield_test_utils::{grid_from_rows, seeded_rng};
    use proptest::prelude::*;

    fn solve(aggregate: &Grid<f64>, source: (i32, i32), radius: f64) -> PathField {
        PathFieldSolver::builder()
            .build()
            .unwrap()
            .solve(aggregate, source, radius)
            .unwrap()
            .0
    }

    fn greedy() -> MovementPolicy {
        MovementPolicy::builder().build().unwrap()
    }

    #[test]
    fn builder_rejects_bad_scale() {
        assert!(MovementPolicy::builder().exploration(0.0).build().is_err());
        assert!(MovementPolicy::builder().exploration(-2.0).build().is_err());
        assert!(MovementPolicy::builder().exploration(f64::NAN).build().is_err());
    }

    #[test]
    fn steps_straight_down_a_corridor() {
        let aggregate = Grid::new(5, 1, 0.0).unwrap();
        let field = solve(&aggregate, (0, 0), 0.0);
        let mut rng = seeded_rng(1);
        assert_eq!(greedy().choose_step(&field, (4, 0), &mut rng), Some((-1, 0)));
    }

    #[test]
    fn avoids_rich_cells() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, 0.0, 0.0],
            &[0.0, 9000.0, 0.0],
            &[0.0, 0.0, 0.0],
        ]);
        let field = solve(&aggregate, (2, 1), 0.0);
        let mut rng = seeded_rng(3);
        for _ in 0..50 {
            let step = greedy().choose_step(&field, (0, 1), &mut rng).unwrap();
            assert!(step == (1, -1) || step == (1, 1), "got {step:?}");
        }
    }

    #[test]
    fn ties_break_both_ways() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, 0.0, 0.0],
            &[0.0, 9000.0, 0.0],
            &[0.0, 0.0, 0.0],
        ]);
        let field = solve(&aggregate, (2, 1), 0.0);
        let mut rng = seeded_rng(11);
        let mut up = 0;
        let mut down = 0;
        for _ in 0..400 {
            match greedy().choose_step(&field, (0, 1), &mut rng) {
                Some((1, -1)) => up += 1,
                Some((1, 1)) => down += 1,
                other => panic!("unexpected step {other:?}"),
            }
        }
        assert!(up > 100 && down > 100, "up={up} down={down}");
    }

    #[test]
    fn stationary_when_unreachable() {
        let aggregate = grid_from_rows(&[
            &[0.0f64, -1.0, 0.0],
            &[-1.0, -1.0, 0.0],
            &[0.0, 0.0, 0.0],
        ]);
        let field = solve(&aggregate, (2, 2), 0.0);
        let mut rng = seeded_rng(5);
        assert_eq!(greedy().choose_step(&field, (0, 0), &mut rng), None);
        assert_eq!(greedy().choose_step(&field, (1, 1), &mut rng), None);
        assert_eq!(greedy().choose_step(&field, (9, 9), &mut rng), None);
    }

    #[test]
    fn exploration_sometimes_steps_uphill() {
        let aggregate = Grid::new(5, 1, 0.0).unwrap();
        let field = solve(&aggregate, (0, 0), 0.0);
        // At (2,0): left costs 1, right costs 3, gap 2. With k = 0.25
        // the uphill step is taken with probability 1 when examined.
        let policy = MovementPolicy::builder().exploration(0.25).build().unwrap();
        let mut rng = seeded_rng(9);
        assert_eq!(policy.choose_step(&field, (2, 0), &mut rng), Some((1, 0)));
    }

    #[test]
    fn advance_moves_one_aggregation_cell() {
        let aggregate = Grid::new(4, 4, 0.0).unwrap();
        let field = solve(&aggregate, (0, 0), 0.0);
        let aggregator = Aggregator::new(10).unwrap();
        let mut rng = seeded_rng(2);
        let next = greedy()
            .advance(Vector::new(35.0, 37.0), &field, &aggregator, &mut rng)
            .unwrap();
        assert_eq!(next, Vector::new(25.0, 27.0));
    }

    proptest! {
        #[test]
        fn greedy_never_picks_a_worse_neighbour(
            values in proptest::collection::vec(0.0f64..2000.0, 36),
            sx in 0i32..6, sy in 0i32..6,
            ax in 0i32..6, ay in 0i32..6,
            seed in any::<u64>(),
        ) {
            let aggregate = Grid::from_fn(6, 6, |x, y| values[(y * 6 + x) as usize]).unwrap();
            let field = solve(&aggregate, (sx, sy), 0.0);
            let mut rng = seeded_rng(seed);
            if let Some((dx, dy)) = greedy().choose_step(&field, (ax, ay), &mut rng) {
                let picked = field.cost(ax + dx, ay + dy).unwrap();
                for (ox, oy) in MOORE_OFFSETS {
                    if let Some(c) = field.cost(ax + ox, ay + oy) {
                        prop_assert!(picked <= c);
                    }
                }
            }
        }
    }
}
