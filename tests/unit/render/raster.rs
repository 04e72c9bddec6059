use super::*;

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="6">
<rect x="0" y="0" width="4" height="6" fill="#ff0000"/>
</svg>"##;

#[test]
fn rasterizes_at_intrinsic_size_with_straight_alpha() {
    let mut r = SvgRasterizer::new();
    let img = r.rasterize(RED_SQUARE).unwrap();
    assert_eq!(img.dimensions(), (8, 6));
    assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(7, 5).0[3], 0);
}

#[test]
fn malformed_svg_is_a_render_error() {
    let mut r = SvgRasterizer::new();
    let err = r.rasterize("<svg").unwrap_err();
    assert!(matches!(err, ChalkError::Render(_)));
}

#[test]
fn png_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("square.png");
    let img = SvgRasterizer::new().rasterize(RED_SQUARE).unwrap();
    write_png(&img, &path).unwrap();

    let back = read_rgba(&path).unwrap();
    assert_eq!(back, img);
}

#[test]
fn missing_font_dir_is_tolerated() {
    let cfg = Config {
        font_dir: Some(PathBuf::from("/no/such/fonts")),
        ..Config::default()
    };
    let r = SvgRasterizer::for_config(&cfg);
    assert_eq!(r.font_face_count(), SvgRasterizer::new().font_face_count());
}

#[test]
fn font_dir_skips_non_font_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a font").unwrap();
    std::fs::write(dir.path().join("broken.ttf"), "not a font either").unwrap();
    let cfg = Config {
        font_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };
    let mut r = SvgRasterizer::for_config(&cfg);
    assert_eq!(r.font_face_count(), SvgRasterizer::new().font_face_count());
    assert_eq!(r.rasterize(RED_SQUARE).unwrap().dimensions(), (8, 6));
}
