//! Animation: frame sequencing, composite frames and GIF assembly.

/// Composite frame documents and their rasterization.
pub mod composite;
/// Per-step convolution frames and their file layout.
pub mod sequencer;
/// Frame sinks and GIF assembly.
pub mod sink;
