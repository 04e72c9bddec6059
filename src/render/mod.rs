//! Rendering: SVG rasterization, grid figures and chart scaffolding.

/// 2D chart helpers shared by the plot figures.
pub mod chart;
/// Annotated grid figures.
pub mod grid;
/// SVG rasterizer and PNG IO.
pub mod raster;
