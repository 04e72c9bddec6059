//! Grids and the sliding-window reducer.

/// `Grid`, shapes, ranges and cell labels.
pub mod model;
/// Kernel cross-correlation over a grid.
pub mod window;
