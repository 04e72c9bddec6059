use super::*;

fn axes() -> Axes {
    let mut a = Axes::new(-5.0..5.0, -0.5..1.5);
    a.zero_spines = true;
    a
}

#[test]
fn themes_use_darkgrid_palettes() {
    let light = ChartTheme::for_theme(Theme::Light);
    assert_eq!(light.face, Rgb8::from_hex_u32(0xDCDBEE));
    assert_eq!(light.ink, Rgb8::BLACK);

    let dark = ChartTheme::for_theme(Theme::Dark);
    assert_eq!(dark.face, Rgb8::from_hex_u32(0x2C2847));
    assert_eq!(dark.ink, Rgb8::WHITE);
}

#[test]
fn chart_svg_runs_the_draw_callback() {
    let theme = ChartTheme::for_theme(Theme::Light);
    let mut called = false;
    let svg = chart_svg((320, 240), &theme, &axes(), |chart| {
        called = true;
        chart
            .draw_series(LineSeries::new(
                vec![(-5.0, 0.0), (0.0, 0.5), (5.0, 1.0)],
                stroke(Rgb8::from_hex_u32(0x0A193B), 0.8, 3),
            ))
            .map_err(chart_err)?;
        Ok(())
    })
    .unwrap();
    assert!(called);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<polyline"));
}

#[test]
fn draw_errors_propagate() {
    let theme = ChartTheme::for_theme(Theme::Dark);
    let err = chart_svg((320, 240), &theme, &axes(), |_| {
        Err(ChalkError::data("no points"))
    })
    .unwrap_err();
    assert!(matches!(err, ChalkError::Data(_)));
}

#[test]
fn decreasing_range_is_rejected() {
    let theme = ChartTheme::for_theme(Theme::Light);
    let bad = Axes::new(1.0..0.0, 0.0..1.0);
    let err = chart_svg((320, 240), &theme, &bad, |_| Ok(())).unwrap_err();
    assert!(matches!(err, ChalkError::Validation(_)));
}

#[test]
fn render_png_uses_figure_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.png");
    let cfg = Config::default();
    let mut r = ChartRenderer::new(&cfg);
    assert_eq!(r.figure_px(), (640, 480));

    r.render_png(&axes().with_desc("x", "y"), &path, |_| Ok(()))
        .unwrap();
    let img = crate::render::raster::read_rgba(&path).unwrap();
    assert_eq!(img.dimensions(), (640, 480));
}

fn labelled_line(chart: &mut Chart<'_, '_>) -> ChalkResult<()> {
    let style = stroke(Rgb8::from_hex_u32(0x9B67CC), 1.0, 2);
    chart
        .draw_series(LineSeries::new(vec![(-4.0, 0.0), (4.0, 1.0)], style))
        .map_err(chart_err)?
        .label("rising")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], style));
    Ok(())
}

#[test]
fn legend_lists_labelled_series() {
    let theme = ChartTheme::for_theme(Theme::Light);
    let with = axes().with_legend(SeriesLabelPosition::UpperLeft);
    let svg = chart_svg((320, 240), &theme, &with, labelled_line).unwrap();
    assert!(svg.contains(">rising"));
}

#[test]
fn no_legend_unless_asked() {
    let theme = ChartTheme::for_theme(Theme::Dark);
    let svg = chart_svg((320, 240), &theme, &axes(), labelled_line).unwrap();
    assert!(!svg.contains("rising"));
}
