use super::boundary::PeriodicBox;
use nalgebra::Point2;

/// A discrete cell coordinate inside a [`CellGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

/// Discretization of a [`PeriodicBox`] into an `nx × ny` grid of cells.
///
/// Resolution is derived once per axis as `max(3, floor(extent / cutoff))` and
/// never changes afterwards; a new grid is built whenever the box changes. The
/// minimum of 3 guarantees that a 3×3 neighbor stencil never wraps onto its own
/// center cell twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    nx: usize,
    ny: usize,
}

impl CellGrid {
    /// Derives the grid resolution for `bounds` with the given interaction cutoff.
    ///
    /// # Panics
    ///
    /// Panics if `cutoff` is not strictly positive.
    pub fn for_box(bounds: &PeriodicBox, cutoff: f64) -> Self {
        assert!(cutoff > 0.0, "cutoff must be positive, got {cutoff}");
        Self {
            nx: resolution(bounds.width(), cutoff),
            ny: resolution(bounds.height(), cutoff),
        }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Maps a wrapped position (already inside the box) to its cell.
    ///
    /// The exact upper boundary of an axis scales to the axis size; that image
    /// belongs to cell 0 under the periodic wrap, never to an out-of-range index.
    pub fn cell_of(&self, wrapped: Point2<f64>, bounds: &PeriodicBox) -> Cell {
        let mut col = ((0.5 + wrapped.x / bounds.width()) * self.nx as f64) as usize;
        let mut row = ((0.5 + wrapped.y / bounds.height()) * self.ny as f64) as usize;
        if col == self.nx {
            col = 0;
        }
        if row == self.ny {
            row = 0;
        }
        debug_assert!(col < self.nx && row < self.ny);
        Cell { col, row }
    }

    /// Wraps a candidate neighbor cell coordinate back into range.
    ///
    /// Stencil offsets only ever leave the grid by one step (-1 or the axis
    /// size), but the euclidean remainder makes this total over all inputs.
    pub fn wrap_cell(&self, col: isize, row: isize) -> Cell {
        Cell {
            col: col.rem_euclid(self.nx as isize) as usize,
            row: row.rem_euclid(self.ny as isize) as usize,
        }
    }

    /// Row-major storage index of a cell.
    pub fn linear(&self, cell: Cell) -> usize {
        debug_assert!(cell.col < self.nx && cell.row < self.ny);
        cell.col + self.nx * cell.row
    }
}

fn resolution(extent: f64, cutoff: f64) -> usize {
    ((extent / cutoff) as usize).max(3)
}
