//! Disk enumeration and shape stamping.
//!
//! A cell `(i, j)` is inside the disk when the Euclidean distance from
//! the point `(i, j)` to the centre is at most the radius. The scan
//! covers the bounding box `[cx - r, cx + r] x [cy - r, cy + r]`
//! clipped to the grid, in row-major order.

use crate::grid::Grid;
use cryptfield_core::Vector;

/// Fine-grid sentinel marking a cell as occupied by an attractor.
///
/// Resource values are never negative, so any negative cell reads as an
/// obstacle; this is the value the world stamps.
pub const OBSTACLE: f32 = -1.0;

/// In-bounds cells of a `width x height` grid lying within `radius`
/// of `center`, in row-major order.
///
/// A negative or non-finite radius, or a non-finite centre, yields no
/// cells.
pub fn disk_cells(
    center: Vector,
    radius: f64,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (i32, i32)> {
    let valid = radius.is_finite() && radius >= 0.0 && center.is_finite();
    // Empty ranges when invalid; `as` saturates for far-off centres.
    let (x_lo, x_hi, y_lo, y_hi) = if valid {
        (
            ((center.x - radius).ceil() as i64).max(0),
            ((center.x + radius).floor() as i64).min(width as i64 - 1),
            ((center.y - radius).ceil() as i64).max(0),
            ((center.y + radius).floor() as i64).min(height as i64 - 1),
        )
    } else {
        (0, -1, 0, -1)
    };
    let r2 = radius * radius;
    (y_lo..=y_hi).flat_map(move |y| {
        (x_lo..=x_hi).filter_map(move |x| {
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            (dx * dx + dy * dy <= r2).then_some((x as i32, y as i32))
        })
    })
}

impl<T: Copy> Grid<T> {
    /// Apply `f` to every cell within `radius` of `center`.
    ///
    /// Returns the number of cells visited.
    pub fn update_disk(&mut self, center: Vector, radius: f64, mut f: impl FnMut(&mut T)) -> usize {
        let mut count = 0;
        for (x, y) in disk_cells(center, radius, self.width(), self.height()) {
            if let Some(v) = self.get_mut(x, y) {
                f(v);
                count += 1;
            }
        }
        count
    }
}

/// Set every cell within `radius` of `center` to `value`.
///
/// Cells inside the bounding box but outside the disk are untouched.
/// Used with a negative sentinel to carve attractor footprints that the
/// path solver then treats as obstacles. Returns the number of cells
/// written.
///
/// # Examples
///
/// ```
/// use cryptfield_core::Vector;
/// use cryptfield_space::{stamp_disk, Grid};
///
/// let mut grid = Grid::new(10, 10, 0.0f32).unwrap();
/// let n = stamp_disk(&mut grid, Vector::new(5.0, 5.0), 1.0, -1.0);
/// assert_eq!(n, 5);
/// assert_eq!(grid.get(5, 4), Some(-1.0));
/// assert_eq!(grid.get(4, 4), Some(0.0));
/// ```
pub fn stamp_disk<T: Copy>(grid: &mut Grid<T>, center: Vector, radius: f64, value: T) -> usize {
    grid.update_disk(center, radius, |v| *v = value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn stamp_matches_enumerated_disk() {
        let mut grid = Grid::new(10, 10, 3i32).unwrap();
        let center = Vector::new(5.0, 5.0);
        let written = stamp_disk(&mut grid, center, 2.0, -1);

        let expected: BTreeSet<(i32, i32)> = [
            (5, 3),
            (4, 4),
            (5, 4),
            (6, 4),
            (3, 5),
            (4, 5),
            (5, 5),
            (6, 5),
            (7, 5),
            (4, 6),
            (5, 6),
            (6, 6),
            (5, 7),
        ]
        .into_iter()
        .collect();
        assert_eq!(written, expected.len());

        for (x, y, v) in grid.iter() {
            if expected.contains(&(x, y)) {
                assert_eq!(v, -1, "({x},{y}) should be stamped");
            } else {
                assert_eq!(v, 3, "({x},{y}) should be untouched");
            }
        }
    }

    #[test]
    fn disk_is_clipped_at_edges() {
        let cells: Vec<_> = disk_cells(Vector::new(0.0, 0.0), 1.0, 4, 4).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn zero_radius_hits_only_integral_centre() {
        let cells: Vec<_> = disk_cells(Vector::new(2.0, 3.0), 0.0, 5, 5).collect();
        assert_eq!(cells, vec![(2, 3)]);

        let off_grid: Vec<_> = disk_cells(Vector::new(2.5, 3.0), 0.0, 5, 5).collect();
        assert!(off_grid.is_empty());
    }

    #[test]
    fn invalid_inputs_yield_nothing() {
        assert_eq!(disk_cells(Vector::new(2.0, 2.0), -1.0, 5, 5).count(), 0);
        assert_eq!(disk_cells(Vector::new(2.0, 2.0), f64::NAN, 5, 5).count(), 0);
        assert_eq!(disk_cells(Vector::new(f64::INFINITY, 2.0), 1.0, 5, 5).count(), 0);
        assert_eq!(disk_cells(Vector::new(-50.0, -50.0), 3.0, 5, 5).count(), 0);
    }

    #[test]
    fn update_disk_counts_visited_cells() {
        let mut grid = Grid::new(5, 5, 10.0f32).unwrap();
        let n = grid.update_disk(Vector::new(2.0, 2.0), 1.5, |v| *v *= 0.5);
        assert_eq!(n, 9);
        assert_eq!(grid.get(1, 1), Some(5.0));
        assert_eq!(grid.get(0, 0), Some(10.0));
    }
}
