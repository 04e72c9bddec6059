//! Composite animation frames.
//!
//! Each frame shows four titled panels: the kernel and the window product side by side above the
//! input image, with the cumulative output to the right. The panels are embedded as base64 PNG
//! data URIs in one SVG document, which is then rasterized in-process.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use base64::Engine as _;

use crate::{
    anim::sequencer::{FrameLayout, FrameSet},
    foundation::error::{ChalkError, ChalkResult},
    render::{
        grid::escape_text,
        raster::{FrameRasterizer, ensure_parent_dir, write_png},
    },
};

const PAD: f32 = 20.0;
const TITLE_PX: f32 = 32.0;
const TITLE_BAND: f32 = 48.0;
const TITLE_FONT: &str = "Franklin Gothic Medium, Arial Narrow, Arial, sans-serif";

const KERNEL_WIDTH: f32 = 200.0;
const MULTIPLICATION_WIDTH: f32 = 200.0;
const IMAGE_WIDTH: f32 = 400.0;
const OUTPUT_WIDTH: f32 = 250.0;

/// One titled PNG panel of a composite frame.
#[derive(Clone, Debug)]
pub struct Panel {
    /// Caption drawn above the image.
    pub title: String,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
    /// Displayed width in pixels; height follows the PNG aspect ratio.
    pub width: f32,
}

impl Panel {
    /// Read a panel image from disk.
    pub fn load(title: &str, path: &Path, width: f32) -> ChalkResult<Self> {
        let png =
            std::fs::read(path).with_context(|| format!("read panel image '{}'", path.display()))?;
        Ok(Self {
            title: title.to_owned(),
            png,
            width,
        })
    }

    fn image_height(&self) -> ChalkResult<f32> {
        let img = image::load_from_memory(&self.png)
            .map_err(|e| ChalkError::data(format!("panel '{}' is not an image: {e}", self.title)))?;
        if img.width() == 0 {
            return Err(ChalkError::data(format!("panel '{}' is empty", self.title)));
        }
        Ok(self.width * img.height() as f32 / img.width() as f32)
    }
}

/// SVG document of one composite frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeDoc {
    svg: String,
}

impl CompositeDoc {
    /// Lay out the four panels.
    pub fn build(
        kernel: &Panel,
        multiplication: &Panel,
        image: &Panel,
        output: &Panel,
    ) -> ChalkResult<Self> {
        let kh = kernel.image_height()?;
        let mh = multiplication.image_height()?;
        let ih = image.image_height()?;
        let oh = output.image_height()?;

        // Left column: kernel | multiplication on top, image centered below.
        let top_w = kernel.width + 2.0 * PAD + multiplication.width;
        let top_h = TITLE_BAND + kh.max(mh);
        let left_w = top_w.max(image.width);
        let left_h = top_h + 2.0 * PAD + TITLE_BAND + ih;
        let x0 = 2.0 * PAD;
        let y0 = 2.0 * PAD;

        let top_x = x0 + (left_w - top_w) / 2.0;
        let image_x = x0 + (left_w - image.width) / 2.0;
        let image_y = y0 + top_h + 2.0 * PAD;

        // Right column: output centered vertically against the left column.
        let output_h = TITLE_BAND + oh;
        let output_x = x0 + left_w + 2.0 * PAD;
        let output_y = y0 + (left_h - output_h).max(0.0) / 2.0;

        let width = output_x + output.width + 2.0 * PAD;
        let height = y0 + left_h.max(output_h) + 2.0 * PAD;

        let mut svg = String::with_capacity(
            1024 + 4 * (kernel.png.len() + multiplication.png.len() + image.png.len() + output.png.len()) / 3,
        );
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
        ));
        svg.push('\n');
        svg.push_str(r##"<rect x="0" y="0" width="100%" height="100%" fill="#ffffff"/>"##);
        svg.push('\n');

        push_panel(&mut svg, kernel, top_x, y0, kh);
        push_panel(
            &mut svg,
            multiplication,
            top_x + kernel.width + 2.0 * PAD,
            y0,
            mh,
        );
        push_panel(&mut svg, image, image_x, image_y, ih);
        push_panel(&mut svg, output, output_x, output_y, oh);

        svg.push_str("</svg>\n");
        Ok(Self { svg })
    }

    /// Load the panels of one frame from disk and lay them out.
    pub fn from_files(kernel: &Path, set: &FrameSet) -> ChalkResult<Self> {
        Self::build(
            &Panel::load("Kernel", kernel, KERNEL_WIDTH)?,
            &Panel::load("Multiplication", &set.multiplication, MULTIPLICATION_WIDTH)?,
            &Panel::load("Image", &set.image, IMAGE_WIDTH)?,
            &Panel::load("Output", &set.output, OUTPUT_WIDTH)?,
        )
    }

    /// SVG source.
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    /// Write the SVG source to `path`.
    pub fn write(&self, path: &Path) -> ChalkResult<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, &self.svg)
            .with_context(|| format!("write composite '{}'", path.display()))?;
        Ok(())
    }
}

fn push_panel(svg: &mut String, panel: &Panel, x: f32, y: f32, image_h: f32) {
    let data = base64::engine::general_purpose::STANDARD.encode(&panel.png);
    svg.push_str(&format!(
        r##"<text x="{:.1}" y="{:.1}" fill="#000000" font-family="{TITLE_FONT}" font-size="{TITLE_PX}" font-weight="bold" text-anchor="middle">{}</text>"##,
        x + panel.width / 2.0,
        y + TITLE_PX,
        escape_text(&panel.title)
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<image x="{x:.1}" y="{:.1}" width="{:.1}" height="{image_h:.1}" xlink:href="data:image/png;base64,{data}"/>"#,
        y + TITLE_BAND,
        panel.width
    ));
    svg.push('\n');
}

/// Outcome of rasterizing the composite frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositeReport {
    /// Rasterized frames, in frame-index order.
    pub written: Vec<PathBuf>,
    /// Frame indices the rasterizer failed on.
    pub skipped: Vec<usize>,
}

/// Build, write and rasterize the composite of every frame in `1..=frame_count`.
///
/// Missing panel images are fatal. A rasterizer failure only drops that frame: it is logged and
/// recorded in [`CompositeReport::skipped`].
#[tracing::instrument(skip(layout, rasterizer))]
pub fn render_composites(
    layout: &FrameLayout,
    frame_count: usize,
    rasterizer: &mut dyn FrameRasterizer,
) -> ChalkResult<CompositeReport> {
    let kernel = layout.kernel();
    let mut report = CompositeReport::default();

    for index in 1..=frame_count {
        let doc = CompositeDoc::from_files(&kernel, &layout.frame_set(index))?;
        doc.write(&layout.composite(index))?;

        match rasterizer.rasterize(doc.as_str()) {
            Ok(img) => report.written.push(write_png(&img, &layout.frame(index))?),
            Err(e) => {
                tracing::warn!(frame = index, error = %e, "skipping composite frame");
                report.skipped.push(index);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/anim/composite.rs"]
mod tests;
