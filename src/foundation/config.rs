//! Render configuration loaded from an optional JSON file.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ChalkError, ChalkResult};

/// How frame files found on disk are ordered before GIF assembly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FrameOrder {
    /// Sort by the numeric frame index embedded in the file name (`frame_12.png` after `frame_2.png`).
    #[default]
    Index,
    /// Keep whatever order the directory listing yields.
    Listing,
}

/// Light or dark palette for the chart figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Dark ink on a pale background.
    #[default]
    Light,
    /// Light ink on a dark background.
    Dark,
}

impl Theme {
    /// Suffix used in output file names (`sigmoid_light.png`).
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Rendering configuration shared by every figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Raster resolution; a 4x4 inch figure at 100 dpi is 400x400 px.
    pub dpi: u32,
    /// Display duration of every convolution animation frame.
    pub frame_delay_ms: u32,
    /// Ordering of composite frames before they are assembled.
    pub frame_order: FrameOrder,
    /// Palette for the chart figures.
    pub theme: Theme,
    /// NeuQuant speed handed to the GIF encoder (1 = best quality, 30 = fastest).
    pub gif_speed: i32,
    /// Seed for every randomized fit (k-means initialization).
    pub seed: u64,
    /// Extra `.ttf`/`.otf`/`.ttc` fonts loaded next to the system fonts.
    pub font_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dpi: 100,
            frame_delay_ms: 2000,
            frame_order: FrameOrder::Index,
            theme: Theme::Light,
            gif_speed: 10,
            seed: 42,
            font_dir: None,
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> ChalkResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Config = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the renderers cannot honor.
    pub fn validate(&self) -> ChalkResult<()> {
        if self.dpi == 0 {
            return Err(ChalkError::validation("config dpi must be > 0"));
        }
        if self.frame_delay_ms == 0 {
            return Err(ChalkError::validation("config frame_delay_ms must be > 0"));
        }
        if !(1..=30).contains(&self.gif_speed) {
            return Err(ChalkError::validation(
                "config gif_speed must be within 1..=30",
            ));
        }
        Ok(())
    }

    /// Pixel length of `inches` at the configured dpi.
    pub fn px(&self, inches: f32) -> u32 {
        (inches * self.dpi as f32).round().max(1.0) as u32
    }

    /// Point size converted to pixels at the configured dpi.
    pub fn pt_to_px(&self, pt: f32) -> f32 {
        pt * self.dpi as f32 / 72.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
