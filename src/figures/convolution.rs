//! Convolution animation.
//!
//! For every kernel offset three grid images are rendered (input with the window highlighted,
//! window product, cumulative output). The kernel is rendered once. Each frame's images are then
//! combined into a composite, and the composites are assembled into `animation.gif`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    anim::{
        composite::{CompositeReport, render_composites},
        sequencer::{ConvolutionStep, ConvolutionSteps, FrameLayout},
        sink::{GifOptions, assemble_gif, collect_frames},
    },
    foundation::{color::Rgb8, config::Config, error::ChalkResult},
    grid::model::Grid,
    render::{
        grid::{CellColors, GridRenderer, GridStyle, Highlight},
        raster::FrameRasterizer,
    },
};

/// Input image of the animation.
pub const IMG: [[i64; 4]; 4] = [[-2, -1, 5, 1], [3, -2, 3, 4], [6, 4, -5, 4], [-3, 0, 0, 1]];
/// Kernel slid over [`IMG`].
pub const KERNEL: [[i64; 2]; 2] = [[1, 2], [0, -1]];

const DARK1: Rgb8 = Rgb8::from_hex_u32(0x0D001A);
const DARK2: Rgb8 = Rgb8::from_hex_u32(0x0A193B);
const DARK3: Rgb8 = Rgb8::from_hex_u32(0xB30059);
const DARK4: Rgb8 = Rgb8::from_hex_u32(0x3D104B);
const LIGHT1: Rgb8 = Rgb8::from_hex_u32(0xF3E6FF);
const LIGHT2: Rgb8 = Rgb8::from_hex_u32(0x9FC3E7);
const LIGHT3: Rgb8 = Rgb8::from_hex_u32(0xC2ACD1);
const FONT_SMALL: f32 = 30.0;
const FONT_LARGE: f32 = 52.0;

/// Grid styles of the four animation panels.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionStyles {
    /// Input grid; the highlight marks the kernel window.
    pub image: GridStyle,
    /// Window product grid.
    pub multiplication: GridStyle,
    /// Cumulative output grid.
    pub output: GridStyle,
    /// Kernel grid.
    pub kernel: GridStyle,
}

impl Default for ConvolutionStyles {
    fn default() -> Self {
        Self {
            image: GridStyle::new(CellColors::new(DARK1, LIGHT2), FONT_SMALL)
                .with_highlight(CellColors::new(LIGHT1, DARK2)),
            multiplication: GridStyle::new(CellColors::new(DARK1, LIGHT3), FONT_LARGE),
            output: GridStyle::new(CellColors::new(LIGHT1, DARK3), FONT_LARGE),
            kernel: GridStyle::new(CellColors::new(LIGHT1, DARK4), FONT_LARGE),
        }
    }
}

/// Result of a full animation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvolutionReport {
    /// Number of sliding-window steps.
    pub steps: usize,
    /// Composite frames written and skipped.
    pub composites: CompositeReport,
    /// Frames handed to the GIF encoder, in animation order.
    pub frames: Vec<PathBuf>,
    /// Written animation.
    pub animation: PathBuf,
}

/// An input grid, a kernel and the styles to draw them with.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionAnimation {
    input: Grid<i64>,
    kernel: Grid<i64>,
    styles: ConvolutionStyles,
}

impl ConvolutionAnimation {
    /// Animation of `kernel` over `input` with the default styles.
    pub fn new(input: Grid<i64>, kernel: Grid<i64>) -> Self {
        Self {
            input,
            kernel,
            styles: ConvolutionStyles::default(),
        }
    }

    /// The 4x4 example image with the 2x2 example kernel.
    pub fn example() -> ChalkResult<Self> {
        Ok(Self::new(Grid::from_rows(&IMG)?, Grid::from_rows(&KERNEL)?))
    }

    /// Same animation with other styles.
    pub fn with_styles(mut self, styles: ConvolutionStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Sliding-window steps in frame order.
    pub fn steps(&self) -> ChalkResult<ConvolutionSteps<'_>> {
        ConvolutionSteps::new(&self.input, &self.kernel)
    }

    /// Render the kernel and the three grid images of every step. Returns the step count.
    #[tracing::instrument(skip(self, grids))]
    pub fn render_steps(&self, grids: &mut GridRenderer, layout: &FrameLayout) -> ChalkResult<usize> {
        let steps = self.steps()?;
        let mut count = 0;
        for step in steps {
            let step = step?;
            self.render_step(grids, layout, &step)?;
            count = step.index;
        }
        grids.render_png(
            &self.kernel,
            &self.styles.kernel,
            &Highlight::None,
            &layout.kernel(),
        )?;
        tracing::info!(steps = count, "rendered convolution steps");
        Ok(count)
    }

    fn render_step(
        &self,
        grids: &mut GridRenderer,
        layout: &FrameLayout,
        step: &ConvolutionStep,
    ) -> ChalkResult<()> {
        let set = layout.frame_set(step.index);
        grids.render_png(
            &self.input,
            &self.styles.image,
            &Highlight::Region(step.window.clone()),
            &set.image,
        )?;
        grids.render_png(
            &step.product,
            &self.styles.multiplication,
            &Highlight::None,
            &set.multiplication,
        )?;
        grids.render_png(
            &step.output,
            &self.styles.output,
            &Highlight::None,
            &set.output,
        )?;
        Ok(())
    }

    /// Composite the rendered steps and assemble the animation.
    #[tracing::instrument(skip(self, cfg, rasterizer))]
    pub fn assemble(
        &self,
        layout: &FrameLayout,
        steps: usize,
        cfg: &Config,
        rasterizer: &mut dyn FrameRasterizer,
    ) -> ChalkResult<ConvolutionReport> {
        // Frames left by an earlier run must not leak into this animation.
        let frames_dir = layout.frames_dir();
        if frames_dir.exists() {
            std::fs::remove_dir_all(&frames_dir)
                .with_context(|| format!("clear frame directory '{}'", frames_dir.display()))?;
        }
        std::fs::create_dir_all(&frames_dir)
            .with_context(|| format!("create frame directory '{}'", frames_dir.display()))?;

        let composites = render_composites(layout, steps, rasterizer)?;
        if !composites.skipped.is_empty() {
            tracing::warn!(
                skipped = composites.skipped.len(),
                "animation is missing composite frames"
            );
        }

        let frames = collect_frames(&frames_dir, cfg.frame_order)?;
        let animation = assemble_gif(
            &frames,
            &layout.animation(),
            GifOptions::from_config(cfg, cfg.frame_delay_ms),
        )?;

        Ok(ConvolutionReport {
            steps,
            composites,
            frames,
            animation,
        })
    }

    /// Render every step and assemble the animation beneath `out_dir`.
    pub fn render(&self, out_dir: &Path, cfg: &Config) -> ChalkResult<ConvolutionReport> {
        let layout = FrameLayout::new(out_dir);
        let mut grids = GridRenderer::new(cfg);
        let steps = self.render_steps(&mut grids, &layout)?;
        self.assemble(&layout, steps, cfg, grids.rasterizer_mut())
    }
}

/// Render the example animation beneath `out_dir`.
pub fn render(out_dir: &Path, cfg: &Config) -> ChalkResult<ConvolutionReport> {
    ConvolutionAnimation::example()?.render(out_dir, cfg)
}

#[cfg(test)]
#[path = "../../tests/unit/figures/convolution.rs"]
mod tests;
