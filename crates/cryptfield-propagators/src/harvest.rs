//! Agent harvesting of fine-grid resource.

use cryptfield_core::Vector;
use cryptfield_space::Grid;

/// How an agent depletes the cells under its footprint after moving.
///
/// Obstacle cells (negative values) are never touched, and no mode drives
/// a cell below zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HarvestMode {
    /// Multiply each cell by `factor`, in `[0, 1)`.
    Decay {
        /// Fraction of the resource left behind.
        factor: f32,
    },
    /// Subtract a fixed `amount` from each cell.
    Deplete {
        /// Resource removed per cell per visit.
        amount: f32,
    },
}

impl Default for HarvestMode {
    fn default() -> Self {
        Self::Decay { factor: 0.5 }
    }
}

impl HarvestMode {
    /// Check the mode's parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a decay factor is outside `[0, 1)` or a depletion
    /// amount is negative or non-finite.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::Decay { factor } if !(0.0..1.0).contains(&factor) => {
                Err(format!("decay factor must be in [0, 1), got {factor}"))
            }
            Self::Deplete { amount } if !amount.is_finite() || amount < 0.0 => {
                Err(format!("deplete amount must be finite and >= 0, got {amount}"))
            }
            _ => Ok(()),
        }
    }

    /// Resource left in a cell holding `value` after one harvest.
    pub fn harvested(&self, value: f32) -> f32 {
        if value < 0.0 {
            return value;
        }
        match *self {
            Self::Decay { factor } => (value * factor).max(0.0),
            Self::Deplete { amount } => (value - amount).max(0.0),
        }
    }

    /// Harvest every cell within `radius` of `center`.
    ///
    /// Returns the number of cells visited, obstacles included.
    pub fn apply(&self, grid: &mut Grid<f32>, center: Vector, radius: f64) -> usize {
        grid.update_disk(center, radius, |v| *v = self.harvested(*v))
    }
}
