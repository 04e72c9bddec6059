//! Figure pipelines. Each module computes its data and writes its images beneath an output
//! directory.

/// Activation function plots.
pub mod activation;
/// Convolution animation.
pub mod convolution;
/// K-means clustering plot.
pub mod kmeans;
/// k-nearest-neighbour plots.
pub mod knn;
/// Riemann sum plots.
pub mod riemann;
/// Homepage GIF.
pub mod skeleton;
/// Sudoku boards.
pub mod sudoku;
