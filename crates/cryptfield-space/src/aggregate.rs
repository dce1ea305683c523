//! Block-sum downsampling between the fine and aggregate grids.
//!
//! The fine grid holds per-cell resource with negative obstacle
//! markers; the aggregate grid holds, per `cell_size x cell_size`
//! block, the plain sum of those values. A block dominated by obstacle
//! cells therefore goes negative, which the path solver reads as
//! "contains obstacle". Blocks mixing a few obstacle cells with plenty
//! of resource stay positive; the proxy is lossy on purpose.

use crate::error::SpaceError;
use crate::grid::Grid;
use cryptfield_core::Vector;

/// Maps between fine-grid and aggregate-grid coordinates and builds
/// aggregate grids by block summation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aggregator {
    cell_size: u32,
}

impl Aggregator {
    /// Create an aggregator with the given block edge length.
    ///
    /// Returns `Err(SpaceError::InvalidCellSize)` for a zero size.
    pub fn new(cell_size: u32) -> Result<Self, SpaceError> {
        if cell_size == 0 {
            return Err(SpaceError::InvalidCellSize { cell_size });
        }
        Ok(Self { cell_size })
    }

    /// Block edge length in fine cells.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Aggregate dimensions for a `width x height` fine grid.
    ///
    /// Returns `Err(SpaceError::IndivisibleDimensions)` unless both
    /// dimensions are exact multiples of the cell size.
    pub fn coarse_dims(&self, width: u32, height: u32) -> Result<(u32, u32), SpaceError> {
        if width % self.cell_size != 0 || height % self.cell_size != 0 {
            return Err(SpaceError::IndivisibleDimensions {
                width,
                height,
                cell_size: self.cell_size,
            });
        }
        Ok((width / self.cell_size, height / self.cell_size))
    }

    /// Aggregate cell containing a fine-grid position (floor division).
    pub fn to_coarse(&self, position: Vector) -> (i32, i32) {
        let size = self.cell_size as f64;
        (
            (position.x / size).floor() as i32,
            (position.y / size).floor() as i32,
        )
    }

    /// Fine-grid displacement for a step of `(dx, dy)` aggregate cells.
    pub fn to_fine_offset(&self, dx: i32, dy: i32) -> Vector {
        Vector::new(f64::from(dx), f64::from(dy)) * f64::from(self.cell_size)
    }

    /// Sum each `cell_size x cell_size` block of `fine` into one cell of
    /// a new aggregate grid.
    ///
    /// Negative obstacle values are summed like any other value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cryptfield_space::{Aggregator, Grid};
    ///
    /// let fine = Grid::from_fn(4, 2, |x, _| x as f32).unwrap();
    /// let agg = Aggregator::new(2).unwrap().aggregate(&fine).unwrap();
    /// assert_eq!((agg.width(), agg.height()), (2, 1));
    /// assert_eq!(agg.cells(), &[2.0, 10.0]);
    /// ```
    pub fn aggregate<T>(&self, fine: &Grid<T>) -> Result<Grid<f64>, SpaceError>
    where
        T: Copy + Into<f64>,
    {
        let (cw, ch) = self.coarse_dims(fine.width(), fine.height())?;
        let mut coarse = Grid::new(cw, ch, 0.0f64)?;
        let size = self.cell_size as usize;
        let fine_w = fine.width() as usize;
        let cells = fine.cells();
        for (i, &v) in cells.iter().enumerate() {
            let fx = i % fine_w;
            let fy = i / fine_w;
            if let Some(sum) = coarse.get_mut((fx / size) as i32, (fy / size) as i32) {
                *sum += v.into();
            }
        }
        Ok(coarse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_cell_size() {
        assert_eq!(
            Aggregator::new(0).unwrap_err(),
            SpaceError::InvalidCellSize { cell_size: 0 }
        );
    }

    #[test]
    fn rejects_indivisible_dimensions() {
        let agg = Aggregator::new(10).unwrap();
        let fine = Grid::new(25, 20, 0.0f32).unwrap();
        assert!(matches!(
            agg.aggregate(&fine),
            Err(SpaceError::IndivisibleDimensions { width: 25, .. })
        ));
    }

    #[test]
    fn obstacle_cells_drive_block_negative() {
        let mut fine = Grid::new(4, 4, 0.0f32).unwrap();
        fine.set(0, 0, -1.0);
        fine.set(1, 1, -1.0);
        fine.set(3, 3, 5.0);
        let agg = Aggregator::new(2).unwrap().aggregate(&fine).unwrap();
        assert_eq!(agg.get(0, 0), Some(-2.0));
        assert_eq!(agg.get(1, 1), Some(5.0));
        assert_eq!(agg.get(1, 0), Some(0.0));
    }

    #[test]
    fn coordinate_mapping_floors() {
        let agg = Aggregator::new(10).unwrap();
        assert_eq!(agg.to_coarse(Vector::new(0.0, 9.99)), (0, 0));
        assert_eq!(agg.to_coarse(Vector::new(10.0, 595.0)), (1, 59));
        assert_eq!(agg.to_coarse(Vector::new(-0.5, 0.0)), (-1, 0));
        assert_eq!(agg.to_fine_offset(-1, 1), Vector::new(-10.0, 10.0));
    }

    #[test]
    fn cell_size_one_is_identity() {
        let fine = Grid::from_fn(3, 3, |x, y| (x * y) as f32).unwrap();
        let agg = Aggregator::new(1).unwrap().aggregate(&fine).unwrap();
        for (x, y, v) in fine.iter() {
            assert_eq!(agg.get(x, y), Some(v as f64));
        }
    }
}
