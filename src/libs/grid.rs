use crate::libs::error::{AlignError, Result};

/// A fixed-size, row-major 2D container for DP scores or traceback labels.
///
/// Every cell holds `default` from construction on, so there is no
/// uninitialised state. All accesses are bounds-checked and report the
/// offending indices together with the grid dimensions.
///
/// ```
/// use nwalign::libs::grid::Grid;
///
/// let mut grid = Grid::new(2, 3, 0.0);
/// grid.set(1, 2, -4.0).unwrap();
/// assert_eq!(grid.get(1, 2).unwrap(), -4.0);
/// assert!(grid.get(2, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    nrows: usize,
    ncols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    pub fn new(nrows: usize, ncols: usize, default: T) -> Self {
        Self {
            nrows,
            ncols,
            cells: vec![default; nrows * ncols],
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Resets every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|cell| *cell = value);
    }

    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.nrows || col >= self.ncols {
            return Err(AlignError::OutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(row * self.ncols + col)
    }
}
