//! Homepage animation: a looping GIF built from an explicit list of PNG frames.

use std::path::{Path, PathBuf};

use crate::{
    anim::sink::{GifOptions, assemble_gif},
    foundation::{config::Config, error::ChalkResult},
};

/// Display duration of each frame.
pub const DEFAULT_DELAY_MS: u32 = 500;

/// Assemble `frames`, in the given order, into a looping GIF at `out`.
pub fn render(frames: &[PathBuf], out: &Path, delay_ms: u32, cfg: &Config) -> ChalkResult<PathBuf> {
    assemble_gif(frames, out, GifOptions::from_config(cfg, delay_ms))
}
