use super::*;
use crate::grid::model::CellIndex;

const BASE: CellColors = CellColors::new(Rgb8::from_hex_u32(0x0D001A), Rgb8::from_hex_u32(0x9FC3E7));
const HIGH: CellColors = CellColors::new(Rgb8::from_hex_u32(0xF3E6FF), Rgb8::from_hex_u32(0x0A193B));

fn style() -> GridStyle {
    GridStyle::new(BASE, 30.0).with_highlight(HIGH)
}

fn values() -> Grid<i64> {
    Grid::from_rows(&[[-2, -1, 5], [3, -2, 3], [6, 4, -5]]).unwrap()
}

#[test]
fn region_paints_only_covered_cells() {
    let paint = paint_cells(
        GridShape::new(3, 3),
        &style(),
        &Highlight::Region(CellRange::new(0..2, 1..3)),
    );
    assert_eq!(paint.get(0, 1), Some(&HIGH));
    assert_eq!(paint.get(1, 2), Some(&HIGH));
    assert_eq!(paint.get(0, 0), Some(&BASE));
    assert_eq!(paint.get(2, 2), Some(&BASE));
}

#[test]
fn empty_region_is_identical_to_no_highlight() {
    let cfg = Config::default();
    let v = values();
    let none = paint_cells(v.shape(), &style(), &Highlight::None);
    let empty = paint_cells(v.shape(), &style(), &Highlight::Region(CellRange::empty()));
    assert_eq!(none, empty);
    assert_eq!(
        grid_svg(&v, &none, &style(), &cfg).unwrap(),
        grid_svg(&v, &empty, &style(), &cfg).unwrap()
    );
}

#[test]
fn highlight_without_colors_keeps_base() {
    let plain = GridStyle::new(BASE, 52.0);
    let paint = paint_cells(
        GridShape::new(2, 2),
        &plain,
        &Highlight::Region(CellRange::cell(CellIndex::new(0, 0))),
    );
    assert!(paint.iter_cells().all(|(_, c)| *c == BASE));
}

#[test]
fn unset_cells_render_without_text() {
    let cfg = Config::default();
    let v: Grid<Option<i64>> =
        Grid::from_shape_vec(GridShape::new(1, 3), vec![Some(-2), None, Some(6)]).unwrap();
    let paint = paint_cells(v.shape(), &style(), &Highlight::None);
    let svg = grid_svg(&v, &paint, &style(), &cfg).unwrap();
    assert_eq!(svg.matches("<rect").count(), 3);
    assert_eq!(svg.matches("<text").count(), 2);
    assert!(!svg.contains("None"));
}

#[test]
fn paint_shape_mismatch_is_rejected() {
    let cfg = Config::default();
    let paint = Grid::filled(GridShape::new(2, 2), BASE);
    assert!(grid_svg(&values(), &paint, &style(), &cfg).is_err());
}

#[test]
fn labels_are_escaped() {
    assert_eq!(escape_text("a<b&c"), "a&lt;b&amp;c");
}

#[test]
fn rendered_image_has_figure_size_and_cell_colors() {
    let cfg = Config::default();
    let mut r = GridRenderer::new(&cfg);
    let img = r
        .render(
            &values(),
            &style(),
            &Highlight::Region(CellRange::new(0..1, 0..1)),
        )
        .unwrap();
    assert_eq!(img.dimensions(), (400, 400));

    // A point near the top-left corner of cell (0, 0) sits inside the highlighted cell but away
    // from its label; the same spot in cell (2, 2) keeps the base background.
    let hi = HIGH.background;
    assert_eq!(img.get_pixel(14, 14).0, [hi.r, hi.g, hi.b, 255]);
    let base = BASE.background;
    assert_eq!(img.get_pixel(278, 278).0, [base.r, base.g, base.b, 255]);
}

#[test]
fn render_png_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kernel").join("kernel.png");
    let mut r = GridRenderer::new(&Config::default());
    let k = Grid::from_rows(&[[1, 2], [0, -1]]).unwrap();
    r.render_png(&k, &GridStyle::new(BASE, 52.0), &Highlight::None, &path)
        .unwrap();
    assert!(path.is_file());
}
