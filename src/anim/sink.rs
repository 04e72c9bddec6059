//! Animation assembly: frame sinks, frame discovery on disk and GIF encoding.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    foundation::{
        config::{Config, FrameOrder},
        error::{ChalkError, ChalkResult},
    },
    render::raster::{ensure_parent_dir, read_rgba},
};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Display duration of every frame.
    pub delay_ms: u32,
}

/// Sink contract for consuming animation frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing frame indices.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ChalkResult<()>;
    /// Push one frame in order.
    fn push_frame(&mut self, idx: usize, frame: &RgbaImage) -> ChalkResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ChalkResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(usize, RgbaImage)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, RgbaImage)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ChalkResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &RgbaImage) -> ChalkResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ChalkResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Options for [`GifSink`] output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// NeuQuant speed (1 = best quality, 30 = fastest).
    pub speed: i32,
}

impl GifSinkOpts {
    /// Options for writing a GIF to `out_path` at the default speed.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            speed: 10,
        }
    }
}

/// Looping animated GIF writer.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<usize>,
    pushed: usize,
}

impl GifSink {
    /// Create a sink writing to `opts.out_path`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            pushed: 0,
        }
    }
}

impl GifSink {
    fn open_encoder(&self) -> ChalkResult<GifEncoder<BufWriter<File>>> {
        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.opts.out_path)
            .with_context(|| format!("create gif '{}'", self.opts.out_path.display()))?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), self.opts.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ChalkError::encode(format!("set gif loop: {e}")))?;
        Ok(encoder)
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> ChalkResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ChalkError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.delay_ms == 0 {
            return Err(ChalkError::validation("gif frame delay must be non-zero"));
        }
        if !(1..=30).contains(&self.opts.speed) {
            return Err(ChalkError::validation("gif speed must be within 1..=30"));
        }

        // The file is created with the first frame.
        self.encoder = None;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.pushed = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &RgbaImage) -> ChalkResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ChalkError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(ChalkError::validation(format!(
                "frame {idx} pushed after frame {last}"
            )));
        }
        if frame.dimensions() != (cfg.width, cfg.height) {
            return Err(ChalkError::validation(format!(
                "frame {idx} is {}x{}, animation is {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        let delay = Delay::from_numer_denom_ms(cfg.delay_ms, 1);

        if self.encoder.is_none() {
            self.encoder = Some(self.open_encoder()?);
        }
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| ChalkError::encode("gif sink not started"))?;
        encoder
            .encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))
            .map_err(|e| ChalkError::encode(format!("encode gif frame {idx}: {e}")))?;

        self.last_idx = Some(idx);
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> ChalkResult<()> {
        if self.cfg.take().is_none() {
            return Err(ChalkError::encode("gif sink not started"));
        }
        let Some(encoder) = self.encoder.take() else {
            return Err(ChalkError::validation("animation has no frames"));
        };
        // Dropping the encoder writes the GIF trailer.
        drop(encoder);
        tracing::debug!(
            path = %self.opts.out_path.display(),
            frames = self.pushed,
            "wrote gif"
        );
        Ok(())
    }
}

/// Options for [`assemble_gif`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifOptions {
    /// Display duration of every frame.
    pub delay_ms: u32,
    /// NeuQuant speed (1 = best quality, 30 = fastest).
    pub speed: i32,
}

impl GifOptions {
    /// Options with `delay_ms` and the configured encoder speed.
    pub fn from_config(cfg: &Config, delay_ms: u32) -> Self {
        Self {
            delay_ms,
            speed: cfg.gif_speed,
        }
    }
}

/// PNG frames of `dir` in the requested order.
pub fn collect_frames(dir: &Path, order: FrameOrder) -> ChalkResult<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("list frame directory '{}'", dir.display()))?;

    let mut frames = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("list frame directory '{}'", dir.display()))?;
        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            frames.push(path);
        }
    }

    if order == FrameOrder::Index {
        frames.sort_by(|a, b| {
            frame_number(a)
                .cmp(&frame_number(b))
                .then_with(|| a.file_name().cmp(&b.file_name()))
        });
    }
    Ok(frames)
}

/// Trailing number of a file stem (`frame_12` -> 12). Unnumbered files sort last.
fn frame_number(path: &Path) -> (bool, u64) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    match stem[stem.len() - digits..].parse::<u64>() {
        Ok(n) => (false, n),
        Err(_) => (true, 0),
    }
}

/// Decode `frames` and push them into `sink` as one animation.
pub fn stream_frames(
    frames: &[PathBuf],
    delay_ms: u32,
    sink: &mut dyn FrameSink,
) -> ChalkResult<()> {
    let Some(first) = frames.first() else {
        return Err(ChalkError::validation("animation has no frames"));
    };
    let first = read_rgba(first)?;
    sink.begin(SinkConfig {
        width: first.width(),
        height: first.height(),
        delay_ms,
    })?;
    sink.push_frame(1, &first)?;
    for (i, path) in frames.iter().enumerate().skip(1) {
        let img = read_rgba(path)?;
        sink.push_frame(i + 1, &img)?;
    }
    sink.end()
}

/// Assemble `frames` into a looping GIF at `out`.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn assemble_gif(frames: &[PathBuf], out: &Path, opts: GifOptions) -> ChalkResult<PathBuf> {
    if frames.is_empty() {
        return Err(ChalkError::validation("animation has no frames"));
    }
    let mut sink = GifSink::new(GifSinkOpts {
        out_path: out.to_path_buf(),
        speed: opts.speed,
    });
    stream_frames(frames, opts.delay_ms, &mut sink)?;
    Ok(out.to_path_buf())
}

#[cfg(test)]
#[path = "../../tests/unit/anim/sink.rs"]
mod tests;
