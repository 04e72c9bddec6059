//! Frame sequencing for the convolution animation.
//!
//! [`ConvolutionSteps`] walks every kernel offset in row-major order and yields one
//! [`ConvolutionStep`] per frame; [`FrameLayout`] maps frame indices to the files each step writes.

use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::{
    foundation::error::ChalkResult,
    grid::{
        model::{CellIndex, CellRange, Grid, GridShape},
        window::{output_shape, window_offsets, window_product},
    },
};

/// State of the animation after one more output cell has been computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvolutionStep {
    /// Frame index, starting at 1.
    pub index: usize,
    /// Top-left cell of the kernel window.
    pub offset: CellIndex,
    /// Input cells covered by the kernel.
    pub window: CellRange,
    /// Elementwise product of the window with the kernel.
    pub product: Grid<i64>,
    /// Sum of `product`; the output cell at `offset`.
    pub value: i64,
    /// Cumulative output: cells computed so far are filled, the rest are unset.
    pub output: Grid<Option<i64>>,
}

/// Row-major walk over every valid kernel offset of an input grid.
pub struct ConvolutionSteps<'a> {
    input: &'a Grid<i64>,
    kernel: &'a Grid<i64>,
    offsets: Vec<CellIndex>,
    next: usize,
    output: Array2<Option<i64>>,
}

impl<'a> ConvolutionSteps<'a> {
    /// Validate shapes and prepare the walk.
    pub fn new(input: &'a Grid<i64>, kernel: &'a Grid<i64>) -> ChalkResult<Self> {
        let out = output_shape(input.shape(), kernel.shape())?;
        let offsets = window_offsets(input.shape(), kernel.shape())?.collect();
        Ok(Self {
            input,
            kernel,
            offsets,
            next: 0,
            output: Array2::from_elem((out.rows, out.cols), None),
        })
    }

    /// Shape of the output grid.
    pub fn output_shape(&self) -> GridShape {
        let (rows, cols) = self.output.dim();
        GridShape::new(rows, cols)
    }

    /// Total number of frames the walk produces.
    pub fn frame_count(&self) -> usize {
        self.offsets.len()
    }
}

impl Iterator for ConvolutionSteps<'_> {
    type Item = ChalkResult<ConvolutionStep>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = *self.offsets.get(self.next)?;
        self.next += 1;

        let product = match window_product(self.input, self.kernel, offset) {
            Ok(p) => p,
            Err(e) => return Some(Err(e)),
        };
        let value = product.cells().sum();
        self.output[(offset.row, offset.col)] = Some(value);

        Some(Ok(ConvolutionStep {
            index: self.next,
            offset,
            window: CellRange::for_window(offset, self.kernel.shape()),
            product,
            value,
            output: Grid::from(self.output.clone()),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.offsets.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ConvolutionSteps<'_> {}

/// The three per-step images of one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSet {
    /// Frame index, starting at 1.
    pub index: usize,
    /// Input grid with the kernel window highlighted.
    pub image: PathBuf,
    /// Window product grid.
    pub multiplication: PathBuf,
    /// Cumulative output grid.
    pub output: PathBuf,
}

/// File layout of the convolution animation beneath one output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    root: PathBuf,
}

impl FrameLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Kernel image, rendered once.
    pub fn kernel(&self) -> PathBuf {
        self.root.join("kernel").join("kernel.png")
    }

    /// Per-step image paths of frame `index`.
    pub fn frame_set(&self, index: usize) -> FrameSet {
        FrameSet {
            index,
            image: self.root.join("img").join(format!("img_{index}.png")),
            multiplication: self
                .root
                .join("multiplication")
                .join(format!("multiplication_{index}.png")),
            output: self.root.join("output").join(format!("output_{index}.png")),
        }
    }

    /// Composite SVG document of frame `index`.
    pub fn composite(&self, index: usize) -> PathBuf {
        self.root
            .join("composite")
            .join(format!("index_{index}.svg"))
    }

    /// Directory holding the rasterized composite frames.
    pub fn frames_dir(&self) -> PathBuf {
        self.root.join("frames")
    }

    /// Rasterized composite frame `index`.
    pub fn frame(&self, index: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{index}.png"))
    }

    /// Final animation.
    pub fn animation(&self) -> PathBuf {
        self.root.join("animation.gif")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/sequencer.rs"]
mod tests;
