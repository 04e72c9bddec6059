//! Chalkboard renders the illustrations of a set of introductory machine-learning and math posts.
//!
//! Every figure is a small pipeline: build or load a dataset, compute, draw, write PNG/GIF files
//! beneath an output directory. The most involved one is the convolution animation:
//!
//! - [`grid::window`] reduces an input grid by a kernel (cross-correlation)
//! - [`anim::sequencer`] walks the kernel offsets and tracks the cumulative output
//! - [`render::grid`] draws each grid state as an annotated image
//! - [`anim::composite`] combines the images of one step into a frame
//! - [`anim::sink`] assembles the frames into a looping GIF
//!
//! Plot figures ([`figures::activation`], [`figures::riemann`], [`figures::kmeans`],
//! [`figures::knn`]) share the chart scaffolding in [`render::chart`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod anim;
pub mod figures;
pub mod grid;
pub mod render;

pub use crate::foundation::color::Rgb8;
pub use crate::foundation::config::{Config, FrameOrder, Theme};
pub use crate::foundation::error::{ChalkError, ChalkResult};

pub use crate::anim::sink::{FrameSink, GifSink, GifSinkOpts, InMemorySink, SinkConfig};
pub use crate::grid::model::{CellIndex, CellRange, Grid, GridShape};
pub use crate::render::raster::{FrameRasterizer, SvgRasterizer};
