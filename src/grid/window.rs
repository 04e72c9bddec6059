//! Sliding-window reduction of a grid by a kernel.
//!
//! This is cross-correlation: the kernel is not flipped. `O[i, j]` is the sum of the elementwise
//! product of the kernel with the `kh x kw` block of the input whose top-left is `(i, j)`.

use ndarray::Array2;

use crate::{
    foundation::error::{ChalkError, ChalkResult},
    grid::model::{CellIndex, CellRange, Grid, GridShape},
};

/// Shape of the reduced grid: `(H - kh + 1, W - kw + 1)`.
pub fn output_shape(input: GridShape, kernel: GridShape) -> ChalkResult<GridShape> {
    if input.is_empty() || kernel.is_empty() {
        return Err(ChalkError::validation("input and kernel must be non-empty"));
    }
    if kernel.rows > input.rows || kernel.cols > input.cols {
        return Err(ChalkError::validation(format!(
            "kernel {}x{} does not fit input {}x{}",
            kernel.rows, kernel.cols, input.rows, input.cols
        )));
    }
    Ok(GridShape::new(
        input.rows - kernel.rows + 1,
        input.cols - kernel.cols + 1,
    ))
}

/// Every valid top-left kernel offset, row-major (row varies slower than column).
pub fn window_offsets(
    input: GridShape,
    kernel: GridShape,
) -> ChalkResult<impl Iterator<Item = CellIndex>> {
    let out = output_shape(input, kernel)?;
    Ok((0..out.rows).flat_map(move |row| (0..out.cols).map(move |col| CellIndex::new(row, col))))
}

/// Elementwise product of `kernel` with the input block at `offset`.
pub fn window_product(
    input: &Grid<i64>,
    kernel: &Grid<i64>,
    offset: CellIndex,
) -> ChalkResult<Grid<i64>> {
    let range = CellRange::for_window(offset, kernel.shape());
    let block = input.window(&range)?;
    let product = &block.cells() * &kernel.cells();
    Ok(Grid::from(product))
}

/// Reduce the whole input: one output cell per valid kernel offset.
pub fn cross_correlate(input: &Grid<i64>, kernel: &Grid<i64>) -> ChalkResult<Grid<i64>> {
    let shape = output_shape(input.shape(), kernel.shape())?;
    let (kh, kw) = (kernel.shape().rows, kernel.shape().cols);
    let sums: Vec<i64> = input
        .cells()
        .windows((kh, kw))
        .into_iter()
        .map(|w| (&w * &kernel.cells()).sum())
        .collect();
    let out = Array2::from_shape_vec((shape.rows, shape.cols), sums)
        .map_err(|e| ChalkError::render(format!("window count mismatch: {e}")))?;
    Ok(Grid::from(out))
}

#[cfg(test)]
#[path = "../../tests/unit/grid/window.rs"]
mod tests;
