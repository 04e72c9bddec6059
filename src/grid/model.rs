use std::ops::Range;

use ndarray::{Array2, ArrayView2, Axis, Slice};

use crate::foundation::error::{ChalkError, ChalkResult};

/// Row/column extent of a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridShape {
    /// Build a shape.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn len(self) -> usize {
        self.rows * self.cols
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Row-major linear position of a cell.
    pub fn linear(self, idx: CellIndex) -> usize {
        idx.row * self.cols + idx.col
    }
}

/// A (row, col) position inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl CellIndex {
    /// Build an index.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rectangular block of cells, half-open on both axes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Covered rows.
    pub rows: Range<usize>,
    /// Covered columns.
    pub cols: Range<usize>,
}

impl CellRange {
    /// Build a range from row and column spans.
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self { rows, cols }
    }

    /// A range covering no cells.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The block a kernel of `kernel` shape covers when its top-left sits at `offset`.
    pub fn for_window(offset: CellIndex, kernel: GridShape) -> Self {
        Self {
            rows: offset.row..offset.row + kernel.rows,
            cols: offset.col..offset.col + kernel.cols,
        }
    }

    /// One full row of a grid.
    pub fn row(row: usize, shape: GridShape) -> Self {
        Self::new(row..row + 1, 0..shape.cols)
    }

    /// One full column of a grid.
    pub fn column(col: usize, shape: GridShape) -> Self {
        Self::new(0..shape.rows, col..col + 1)
    }

    /// A single cell.
    pub fn cell(idx: CellIndex) -> Self {
        Self::new(idx.row..idx.row + 1, idx.col..idx.col + 1)
    }

    /// True when the range covers no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    /// Whether `idx` lies inside the range.
    pub fn contains(&self, idx: CellIndex) -> bool {
        self.rows.contains(&idx.row) && self.cols.contains(&idx.col)
    }

    /// Extent of the covered block.
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.rows.len(), self.cols.len())
    }

    /// Whether the range lies entirely within a grid of `shape`.
    pub fn fits(&self, shape: GridShape) -> bool {
        self.rows.end <= shape.rows && self.cols.end <= shape.cols
    }

    /// Covered cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.rows
            .clone()
            .flat_map(move |row| self.cols.clone().map(move |col| CellIndex::new(row, col)))
    }
}

/// Fixed-size 2D array indexed by (row, col). Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T: Clone> Grid<T> {
    /// Build a grid from literal rows.
    pub fn from_rows<const C: usize>(rows: &[[T; C]]) -> ChalkResult<Self> {
        let flat: Vec<T> = rows.iter().flat_map(|r| r.iter().cloned()).collect();
        Self::from_shape_vec(GridShape::new(rows.len(), C), flat)
    }

    /// Build a grid from row-major cells.
    pub fn from_shape_vec(shape: GridShape, cells: Vec<T>) -> ChalkResult<Self> {
        let len = cells.len();
        let cells = Array2::from_shape_vec((shape.rows, shape.cols), cells).map_err(|_| {
            ChalkError::validation(format!(
                "grid of {}x{} needs {} cells, got {len}",
                shape.rows,
                shape.cols,
                shape.len()
            ))
        })?;
        Ok(Self { cells })
    }

    /// A grid with every cell set to `value`.
    pub fn filled(shape: GridShape, value: T) -> Self {
        Self {
            cells: Array2::from_elem((shape.rows, shape.cols), value),
        }
    }

    /// Copy out the sub-grid covered by `range`.
    pub fn window(&self, range: &CellRange) -> ChalkResult<Grid<T>> {
        if !range.fits(self.shape()) {
            return Err(ChalkError::validation(format!(
                "window rows {:?} cols {:?} exceeds grid {}x{}",
                range.rows,
                range.cols,
                self.shape().rows,
                self.shape().cols
            )));
        }
        let mut view = self.cells.view();
        view.slice_axis_inplace(Axis(0), Slice::from(range.rows.clone()));
        view.slice_axis_inplace(Axis(1), Slice::from(range.cols.clone()));
        Ok(Self {
            cells: view.to_owned(),
        })
    }
}

impl<T> Grid<T> {
    /// Row/column extent.
    pub fn shape(&self) -> GridShape {
        let (rows, cols) = self.cells.dim();
        GridShape::new(rows, cols)
    }

    /// Cell at (row, col), if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.cells.get((row, col))
    }

    /// Every cell with its index, in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellIndex, &T)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), v)| (CellIndex::new(row, col), v))
    }

    /// Borrow the underlying array.
    pub fn cells(&self) -> ArrayView2<'_, T> {
        self.cells.view()
    }

    /// Apply `f` to every cell.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            cells: self.cells.map(f),
        }
    }
}

impl<T> From<Array2<T>> for Grid<T> {
    fn from(cells: Array2<T>) -> Self {
        Self { cells }
    }
}

/// Text shown inside a rendered cell.
pub trait CellLabel {
    /// Label for this value; an empty string draws nothing.
    fn label(&self) -> String;
}

macro_rules! display_label {
    ($($t:ty),*) => {
        $(
            impl CellLabel for $t {
                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_label!(i32, i64, u8, u32, u64, usize, String);

impl CellLabel for &str {
    fn label(&self) -> String {
        (*self).to_owned()
    }
}

impl<T: CellLabel> CellLabel for Option<T> {
    fn label(&self) -> String {
        match self {
            Some(v) => v.label(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
