//! Bounded 2D scalar grid with option-returning accessors.

use crate::error::SpaceError;
use crate::moore::moore_neighbours;
use smallvec::SmallVec;

/// A `width x height` grid of `Copy` values stored in row-major order.
///
/// Cell `(x, y)` lives at index `y * width + x`. Every in-range
/// coordinate always holds a value; out-of-range coordinates are never
/// stored. Reads outside `[0, width) x [0, height)` return `None` and
/// writes there are silently dropped, so callers may probe freely
/// around edges.
///
/// # Examples
///
/// ```
/// use cryptfield_space::Grid;
///
/// let mut grid = Grid::new(4, 3, 0.0f32).unwrap();
/// grid.set(2, 1, 7.5);
/// assert_eq!(grid.get(2, 1), Some(7.5));
/// assert_eq!(grid.get(4, 1), None);
/// assert_eq!(grid.get(-1, 0), None);
///
/// grid.set(9, 9, 1.0); // out of range: no-op
/// assert!(grid.cells().iter().all(|&v| v == 0.0 || v == 7.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Maximum size of either dimension. Coordinates are `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a grid with every cell set to `fill`.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(width: u32, height: u32, fill: T) -> Result<Self, SpaceError> {
        Self::check_dims(width, height)?;
        let n = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![fill; n],
        })
    }

    /// Create a grid whose cell `(x, y)` is `f(x, y)`, evaluated in
    /// row-major order.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(i32, i32) -> T,
    ) -> Result<Self, SpaceError> {
        Self::check_dims(width, height)?;
        let mut cells = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    fn check_dims(width: u32, height: u32) -> Result<(), SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(())
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Flat row-major index of `(x, y)`, or `None` if out of range.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Value at `(x, y)`, or `None` if out of range.
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Mutable reference to the value at `(x, y)`, or `None` if out of range.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write `value` at `(x, y)`. Out-of-range writes are a no-op.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = value;
        }
    }

    /// All cell values in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, T)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i % w) as i32, (i / w) as i32, v))
    }

    /// In-bounds Moore neighbours of `(x, y)`.
    pub fn neighbours(&self, x: i32, y: i32) -> SmallVec<[(i32, i32); 8]> {
        moore_neighbours(x, y, self.width, self.height)
    }
}
