//! K-means clustering of the Iris sepal measurements.
//!
//! The fit is k-means++ seeding followed by Lloyd iterations, driven by a seeded [`StdRng`] so the
//! same seed always yields the same labels and centroids.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use csv::{ReaderBuilder, Trim};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use plotters::prelude::{Circle, Cross, EmptyElement, PointSeries, SeriesLabelPosition};
use rand::{
    Rng, SeedableRng,
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
};

use crate::{
    foundation::{
        color::Rgb8,
        config::Config,
        error::{ChalkError, ChalkResult},
    },
    render::chart::{Axes, ChartRenderer, chart_err, fill, stroke},
};

/// Column plotted on the x axis.
pub const X_COLUMN: &str = "SepalLengthCm";
/// Column plotted on the y axis.
pub const Y_COLUMN: &str = "SepalWidthCm";
/// Number of clusters.
pub const CLUSTERS: usize = 3;

const CLUSTER_COLORS: [Rgb8; 3] = [
    Rgb8::from_hex_u32(0x73009A),
    Rgb8::from_hex_u32(0x0A193B),
    Rgb8::from_hex_u32(0xFF4DA6),
];
const CENTROID_COLOR: Rgb8 = Rgb8::from_hex_u32(0xFF5C33);
const CENTROID_EDGE: Rgb8 = Rgb8::from_hex_u32(0x4D0F00);

/// A CSV file with a header row, kept as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse CSV text. Every row must have as many fields as the header.
    pub fn parse(text: &str) -> ChalkResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ChalkError::data(format!("read csv header: {e}")))?
            .iter()
            .map(str::to_owned)
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ChalkError::data("csv has no header row"));
        }

        let rows = reader
            .records()
            .map(|rec| {
                rec.map(|r| r.iter().map(str::to_owned).collect())
                    .map_err(|e| ChalkError::data(format!("read csv: {e}")))
            })
            .collect::<ChalkResult<Vec<Vec<String>>>>()?;
        Ok(Self { headers, rows })
    }

    /// Read and parse a CSV file.
    pub fn load(path: &Path) -> ChalkResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read csv '{}'", path.display()))?;
        Self::parse(&text)
    }

    /// Column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse every value of `name` as a number.
    pub fn column_f64(&self, name: &str) -> ChalkResult<Vec<f64>> {
        let col = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ChalkError::data(format!("csv has no column '{name}'")))?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row[col].parse::<f64>().map_err(|_| {
                    ChalkError::data(format!(
                        "csv row {}: '{}' in column '{name}' is not a number",
                        i + 1,
                        row[col]
                    ))
                })
            })
            .collect()
    }

    /// Two numeric columns as an `n x 2` point matrix.
    pub fn points(&self, x: &str, y: &str) -> ChalkResult<Array2<f64>> {
        let xs = self.column_f64(x)?;
        let ys = self.column_f64(y)?;
        let mut out = Array2::<f64>::zeros((xs.len(), 2));
        for (i, (x, y)) in xs.into_iter().zip(ys).enumerate() {
            out[(i, 0)] = x;
            out[(i, 1)] = y;
        }
        Ok(out)
    }
}

/// K-means parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeans {
    /// Number of clusters.
    pub k: usize,
    /// Lloyd iteration cap.
    pub max_iter: usize,
    /// Convergence threshold, relative to the mean per-feature variance.
    pub tol: f64,
    /// Seed of the initialization RNG.
    pub seed: u64,
}

impl KMeans {
    /// `k` clusters with the default iteration cap, tolerance and seed.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
            seed: 42,
        }
    }

    /// Same parameters with another seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cluster the rows of `points`.
    #[tracing::instrument(skip(points), fields(n = points.nrows()))]
    pub fn fit(&self, points: ArrayView2<'_, f64>) -> ChalkResult<KMeansFit> {
        let n = points.nrows();
        if self.k == 0 {
            return Err(ChalkError::validation("k-means needs at least one cluster"));
        }
        if n < self.k {
            return Err(ChalkError::validation(format!(
                "k-means with {} clusters needs at least {} points, got {n}",
                self.k, self.k
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.seed_centroids(points, &mut rng);
        let threshold = self.tol * mean_variance(points);
        let mut labels = assign(points, centroids.view());
        let mut iterations = 0;

        while iterations < self.max_iter {
            iterations += 1;
            let next = update(points, &labels, centroids.view());
            let shift: f64 = (&next - &centroids).mapv(|d| d * d).sum();
            centroids = next;
            labels = assign(points, centroids.view());
            if shift <= threshold {
                break;
            }
        }

        let inertia: f64 = points
            .outer_iter()
            .zip(&labels)
            .map(|(p, &l)| sq_dist(p, centroids.row(l)))
            .sum();
        tracing::debug!(iterations, inertia, "k-means converged");
        Ok(KMeansFit {
            labels,
            centroids,
            inertia,
            iterations,
        })
    }

    /// k-means++: each next center is drawn with probability proportional to its squared
    /// distance from the nearest center chosen so far.
    fn seed_centroids(&self, points: ArrayView2<'_, f64>, rng: &mut StdRng) -> Array2<f64> {
        let n = points.nrows();
        let mut centers = Array2::<f64>::zeros((self.k, points.ncols()));
        centers.row_mut(0).assign(&points.row(rng.gen_range(0..n)));

        let mut nearest: Vec<f64> = points
            .outer_iter()
            .map(|p| sq_dist(p, centers.row(0)))
            .collect();
        for c in 1..self.k {
            let pick = match WeightedIndex::new(&nearest) {
                Ok(dist) => dist.sample(rng),
                // Every point already coincides with a center.
                Err(_) => rng.gen_range(0..n),
            };
            centers.row_mut(c).assign(&points.row(pick));
            for (d, p) in nearest.iter_mut().zip(points.outer_iter()) {
                *d = d.min(sq_dist(p, centers.row(c)));
            }
        }
        centers
    }
}

/// Labels and centroids of a fitted model.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansFit {
    /// Cluster of every input row.
    pub labels: Vec<usize>,
    /// One row per cluster.
    pub centroids: Array2<f64>,
    /// Sum of squared distances to the assigned centroid.
    pub inertia: f64,
    /// Lloyd iterations run.
    pub iterations: usize,
}

fn sq_dist(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn mean_variance(points: ArrayView2<'_, f64>) -> f64 {
    points.var_axis(Axis(0), 0.0).mean().unwrap_or(0.0)
}

fn assign(points: ArrayView2<'_, f64>, centroids: ArrayView2<'_, f64>) -> Vec<usize> {
    points
        .outer_iter()
        .map(|p| {
            let mut best = (0, f64::INFINITY);
            for (c, centroid) in centroids.outer_iter().enumerate() {
                let d = sq_dist(p, centroid);
                if d < best.1 {
                    best = (c, d);
                }
            }
            best.0
        })
        .collect()
}

/// Mean of each cluster's points. An empty cluster keeps its previous centroid.
fn update(points: ArrayView2<'_, f64>, labels: &[usize], previous: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut sums = Array2::<f64>::zeros(previous.raw_dim());
    let mut counts = Array1::<f64>::zeros(previous.nrows());
    for (p, &l) in points.outer_iter().zip(labels) {
        let mut row = sums.row_mut(l);
        row += &p;
        counts[l] += 1.0;
    }
    for (c, mut row) in sums.outer_iter_mut().enumerate() {
        if counts[c] > 0.0 {
            row /= counts[c];
        } else {
            row.assign(&previous.row(c));
        }
    }
    sums
}

fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let pad = ((hi - lo) * 0.05).max(0.05);
    (lo - pad)..(hi + pad)
}

/// Scatter `points` colored by cluster with the centroids on top.
pub fn render_plot(
    renderer: &mut ChartRenderer,
    points: ArrayView2<'_, f64>,
    fit: &KMeansFit,
    path: &Path,
) -> ChalkResult<PathBuf> {
    if points.nrows() == 0 {
        return Err(ChalkError::data("nothing to plot"));
    }
    let axes = Axes::new(
        padded(points.column(0).iter().copied()),
        padded(points.column(1).iter().copied()),
    )
    .with_desc("Sepal Length (cm)", "Sepal Width (cm)")
    .with_legend(SeriesLabelPosition::UpperRight);

    renderer.render_png(&axes, path, |chart| {
        for (c, color) in CLUSTER_COLORS.iter().enumerate() {
            let members = points
                .outer_iter()
                .zip(&fit.labels)
                .filter(|&(_, &l)| l % CLUSTER_COLORS.len() == c)
                .map(|(p, _)| (p[0], p[1]));
            chart
                .draw_series(PointSeries::of_element(
                    members,
                    6,
                    fill(*color, 0.8),
                    &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
                ))
                .map_err(chart_err)?;
        }

        let centers: Vec<(f64, f64)> = fit
            .centroids
            .outer_iter()
            .map(|c| (c[0], c[1]))
            .collect();
        chart
            .draw_series(centers.iter().map(|&c| Cross::new(c, 9, stroke(CENTROID_EDGE, 1.0, 6))))
            .map_err(chart_err)?;
        chart
            .draw_series(
                centers
                    .iter()
                    .map(|&c| Cross::new(c, 8, stroke(CENTROID_COLOR, 1.0, 3))),
            )
            .map_err(chart_err)?
            .label("Centroids")
            .legend(|(x, y)| Cross::new((x, y), 6, stroke(CENTROID_COLOR, 1.0, 3)));
        Ok(())
    })
}

/// Result of the k-means figure.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansReport {
    /// Fitted model.
    pub fit: KMeansFit,
    /// Written plot.
    pub path: PathBuf,
}

/// Fit the sepal measurements of `csv` and plot the clusters to `{out_dir}/kmeans.png`.
#[tracing::instrument(skip(cfg))]
pub fn render(csv: &Path, out_dir: &Path, cfg: &Config) -> ChalkResult<KMeansReport> {
    let table = CsvTable::load(csv)?;
    let points = table.points(X_COLUMN, Y_COLUMN)?;
    let fit = KMeans::new(CLUSTERS).with_seed(cfg.seed).fit(points.view())?;

    let mut renderer = ChartRenderer::new(cfg);
    let path = render_plot(&mut renderer, points.view(), &fit, &out_dir.join("kmeans.png"))?;
    Ok(KMeansReport { fit, path })
}

#[cfg(test)]
#[path = "../../tests/unit/figures/kmeans.rs"]
mod tests;
