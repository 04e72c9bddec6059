//! k-nearest-neighbour illustration: two labelled classes, one new point and the circle around
//! its neighbourhood.

use std::path::{Path, PathBuf};

use kurbo::{Circle as Disc, Point};
use plotters::prelude::{
    Circle, Cross, EmptyElement, PathElement, PointSeries, SeriesLabelPosition, TriangleMarker,
};

use crate::{
    foundation::{
        color::Rgb8,
        config::Config,
        error::{ChalkError, ChalkResult},
    },
    render::chart::{Axes, ChartRenderer, chart_err, fill, stroke},
};

const CLASS_1_COLOR: Rgb8 = Rgb8::from_hex_u32(0x4800FF);
const CLASS_2_COLOR: Rgb8 = Rgb8::from_hex_u32(0xBF333C);
const NEW_POINT_COLOR: Rgb8 = Rgb8::from_hex_u32(0x00A058);
const NEIGHBOURS_COLOR: Rgb8 = Rgb8::from_hex_u32(0x0A193B);
const NEIGHBOURS_ALPHA: f64 = 0.5;
const RADIUS_SCALE: f64 = 1.2;
const MARKER_PX: i32 = 6;

/// Class of a labelled point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    /// First class (crosses).
    One,
    /// Second class (circles).
    Two,
}

/// A labelled point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Labelled {
    /// Position.
    pub point: Point,
    /// Class.
    pub class: Class,
}

/// Labelled points and the point to classify.
#[derive(Clone, Debug, PartialEq)]
pub struct KnnScene {
    /// Training points.
    pub points: Vec<Labelled>,
    /// Point to classify.
    pub query: Point,
}

impl Default for KnnScene {
    fn default() -> Self {
        let one = |x, y| Labelled {
            point: Point::new(x, y),
            class: Class::One,
        };
        let two = |x, y| Labelled {
            point: Point::new(x, y),
            class: Class::Two,
        };
        Self {
            points: vec![one(0.5, 1.0), one(1.0, 1.0), two(2.0, 1.5), two(3.0, 3.5)],
            query: Point::new(1.0, 2.0),
        }
    }
}

impl KnnScene {
    /// The `k` points closest to the query, nearest first. Equal distances keep input order.
    pub fn nearest(&self, k: usize) -> ChalkResult<Vec<Labelled>> {
        if k == 0 || k > self.points.len() {
            return Err(ChalkError::validation(format!(
                "k must be within 1..={}, got {k}",
                self.points.len()
            )));
        }
        let mut by_distance = self.points.clone();
        by_distance.sort_by(|a, b| {
            a.point
                .distance(self.query)
                .total_cmp(&b.point.distance(self.query))
        });
        by_distance.truncate(k);
        Ok(by_distance)
    }

    /// Majority class among the `k` nearest points. Ties go to the class of the nearest point.
    pub fn classify(&self, k: usize) -> ChalkResult<Class> {
        let nearest = self.nearest(k)?;
        let ones = nearest.iter().filter(|p| p.class == Class::One).count();
        let twos = nearest.len() - ones;
        Ok(match ones.cmp(&twos) {
            std::cmp::Ordering::Greater => Class::One,
            std::cmp::Ordering::Less => Class::Two,
            std::cmp::Ordering::Equal => nearest[0].class,
        })
    }

    /// Circle enclosing the `k` nearest points and the query: centered on their mean, radius the
    /// largest distance from it scaled by 1.2.
    pub fn neighbourhood(&self, k: usize) -> ChalkResult<Disc> {
        let mut members: Vec<Point> = self.nearest(k)?.iter().map(|p| p.point).collect();
        members.push(self.query);

        let n = members.len() as f64;
        let center = members
            .iter()
            .fold(Point::ZERO, |acc, p| acc + p.to_vec2() / n);
        let radius = members
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0, f64::max);
        Ok(Disc::new(center, radius * RADIUS_SCALE))
    }

    fn class_points(&self, class: Class) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter(|p| p.class == class)
            .map(|p| (p.point.x, p.point.y))
            .collect()
    }
}

/// Plot the scene, optionally with the neighbourhood of the `k` nearest points.
pub fn render_plot(
    renderer: &mut ChartRenderer,
    scene: &KnnScene,
    neighbours: Option<usize>,
    path: &Path,
) -> ChalkResult<PathBuf> {
    let circle = neighbours.map(|k| scene.neighbourhood(k)).transpose()?;
    let mut axes = Axes::new(-0.5..4.5, -0.5..4.5)
        .with_desc("x", "y")
        .with_legend(SeriesLabelPosition::UpperLeft);
    axes.x_labels = 11;
    axes.y_labels = 11;

    renderer.render_png(&axes, path, |chart| {
        let ones = stroke(CLASS_1_COLOR, 1.0, 3);
        chart
            .draw_series(
                scene
                    .class_points(Class::One)
                    .into_iter()
                    .map(|c| Cross::new(c, MARKER_PX, ones)),
            )
            .map_err(chart_err)?
            .label("Class 1")
            .legend(move |(x, y)| Cross::new((x, y), MARKER_PX, ones));

        let twos = fill(CLASS_2_COLOR, 1.0);
        chart
            .draw_series(PointSeries::of_element(
                scene.class_points(Class::Two),
                MARKER_PX,
                twos,
                &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
            ))
            .map_err(chart_err)?
            .label("Class 2")
            .legend(move |(x, y)| Circle::new((x, y), MARKER_PX, twos));

        let new_point = fill(NEW_POINT_COLOR, 1.0);
        chart
            .draw_series(std::iter::once(TriangleMarker::new(
                (scene.query.x, scene.query.y),
                MARKER_PX + 1,
                new_point,
            )))
            .map_err(chart_err)?
            .label("New Point")
            .legend(move |(x, y)| TriangleMarker::new((x, y), MARKER_PX + 1, new_point));

        if let Some(disc) = circle {
            let outline: Vec<(f64, f64)> = (0..=180)
                .map(|i| {
                    let t = i as f64 / 180.0 * std::f64::consts::TAU;
                    (
                        disc.center.x + disc.radius * t.cos(),
                        disc.center.y + disc.radius * t.sin(),
                    )
                })
                .collect();
            chart
                .draw_series(std::iter::once(PathElement::new(
                    outline,
                    stroke(NEIGHBOURS_COLOR, NEIGHBOURS_ALPHA, 3),
                )))
                .map_err(chart_err)?;
        }

        Ok(())
    })
}

/// Result of the kNN figure.
#[derive(Clone, Debug, PartialEq)]
pub struct KnnReport {
    /// Predicted class of the query point.
    pub class: Class,
    /// Plot without the neighbourhood.
    pub plain: PathBuf,
    /// Plot with the neighbourhood circle.
    pub neighbours: PathBuf,
}

/// Neighbour count of the figure.
pub const K: usize = 3;

/// Write `knn.png` and `knn_neighbours.png`.
#[tracing::instrument(skip(cfg))]
pub fn render(out_dir: &Path, cfg: &Config) -> ChalkResult<KnnReport> {
    let scene = KnnScene::default();
    let class = scene.classify(K)?;
    tracing::debug!(?class, "classified query point");

    let mut renderer = ChartRenderer::new(cfg);
    let plain = render_plot(&mut renderer, &scene, None, &out_dir.join("knn.png"))?;
    let neighbours = render_plot(
        &mut renderer,
        &scene,
        Some(K),
        &out_dir.join("knn_neighbours.png"),
    )?;
    Ok(KnnReport {
        class,
        plain,
        neighbours,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/figures/knn.rs"]
mod tests;
