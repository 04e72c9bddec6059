use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use chalkboard::{
    Config, FrameOrder, Theme,
    figures::{activation, convolution, kmeans, knn, riemann, skeleton, sudoku},
};

#[derive(Parser, Debug)]
#[command(name = "chalkboard", version, about = "Render the blog figures")]
struct Cli {
    /// JSON render configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory receiving every figure (one subdirectory per figure).
    #[arg(long, global = true, default_value = "out")]
    out_dir: PathBuf,

    /// Extra font directory (overrides `font_dir` from the config).
    #[arg(long, global = true)]
    font_dir: Option<PathBuf>,

    /// More logging (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convolution animation (grid images, composites and `animation.gif`).
    Convolution {
        /// Order of the composite frames in the GIF.
        #[arg(long, value_enum)]
        frame_order: Option<FrameOrder>,
    },
    /// Activation function plots.
    Activation {
        /// Chart palette.
        #[arg(long, value_enum)]
        theme: Option<Theme>,
    },
    /// Riemann sum plots.
    Riemann,
    /// K-means clusters of the Iris sepal measurements.
    Kmeans {
        /// Iris CSV with `SepalLengthCm` and `SepalWidthCm` columns.
        #[arg(long)]
        csv: PathBuf,
    },
    /// k-nearest-neighbour plots.
    Knn,
    /// Sudoku boards.
    Sudoku,
    /// Assemble PNG frames into a looping GIF.
    Gif {
        /// Frame image, in display order. Repeat for every frame.
        #[arg(long = "frame", required = true)]
        frames: Vec<PathBuf>,
        /// Output GIF path.
        #[arg(long)]
        out: PathBuf,
        /// Display duration of each frame.
        #[arg(long, default_value_t = skeleton::DEFAULT_DELAY_MS)]
        delay_ms: u32,
    },
    /// Every figure. K-means is skipped without `--csv`.
    All {
        /// Iris CSV for the k-means figure.
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Render figures concurrently.
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Clone, Debug)]
enum Figure {
    Convolution,
    Activation,
    Riemann,
    Kmeans(PathBuf),
    Knn,
    Sudoku,
}

impl Figure {
    fn dir_name(&self) -> &'static str {
        match self {
            Figure::Convolution => "convolution",
            Figure::Activation => "activation_functions",
            Figure::Riemann => "riemann_sums",
            Figure::Kmeans(_) => "kmeans",
            Figure::Knn => "knn",
            Figure::Sudoku => "sudoku",
        }
    }

    fn run(&self, out_dir: &Path, cfg: &Config) -> anyhow::Result<()> {
        let dir = out_dir.join(self.dir_name());
        match self {
            Figure::Convolution => {
                let report = convolution::render(&dir, cfg)?;
                if !report.composites.skipped.is_empty() {
                    eprintln!(
                        "skipped composite frames: {:?}",
                        report.composites.skipped
                    );
                }
                eprintln!(
                    "wrote {} ({} frames)",
                    report.animation.display(),
                    report.frames.len()
                );
            }
            Figure::Activation => print_written(&activation::render(&dir, cfg)?),
            Figure::Riemann => print_written(&riemann::render(&dir, cfg)?),
            Figure::Kmeans(csv) => {
                let report = kmeans::render(csv, &dir, cfg)?;
                eprintln!("wrote {}", report.path.display());
            }
            Figure::Knn => {
                let report = knn::render(&dir, cfg)?;
                eprintln!("query point classified as {:?}", report.class);
                print_written(&[report.plain, report.neighbours]);
            }
            Figure::Sudoku => print_written(&sudoku::render(&dir, cfg)?),
        }
        Ok(())
    }
}

fn print_written(paths: &[PathBuf]) {
    for p in paths {
        eprintln!("wrote {}", p.display());
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.font_dir.clone() {
        cfg.font_dir = Some(dir);
    }

    match cli.cmd {
        Command::Convolution { frame_order } => {
            if let Some(order) = frame_order {
                cfg.frame_order = order;
            }
            Figure::Convolution.run(&cli.out_dir, &cfg)
        }
        Command::Activation { theme } => {
            if let Some(theme) = theme {
                cfg.theme = theme;
            }
            Figure::Activation.run(&cli.out_dir, &cfg)
        }
        Command::Riemann => Figure::Riemann.run(&cli.out_dir, &cfg),
        Command::Kmeans { csv } => Figure::Kmeans(csv).run(&cli.out_dir, &cfg),
        Command::Knn => Figure::Knn.run(&cli.out_dir, &cfg),
        Command::Sudoku => Figure::Sudoku.run(&cli.out_dir, &cfg),
        Command::Gif {
            frames,
            out,
            delay_ms,
        } => {
            let written = skeleton::render(&frames, &out, delay_ms, &cfg)?;
            eprintln!("wrote {}", written.display());
            Ok(())
        }
        Command::All { csv, parallel } => {
            let mut figures = vec![
                Figure::Convolution,
                Figure::Activation,
                Figure::Riemann,
                Figure::Knn,
                Figure::Sudoku,
            ];
            match csv {
                Some(csv) => figures.push(Figure::Kmeans(csv)),
                None => tracing::info!("no --csv given, skipping k-means"),
            }

            if parallel {
                figures
                    .par_iter()
                    .try_for_each(|f| f.run(&cli.out_dir, &cfg))
            } else {
                figures.iter().try_for_each(|f| f.run(&cli.out_dir, &cfg))
            }
        }
    }
}
