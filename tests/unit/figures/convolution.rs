use super::*;
use crate::grid::window::cross_correlate;

#[test]
fn example_reduces_to_known_output() {
    let anim = ConvolutionAnimation::example().unwrap();
    let out = cross_correlate(&anim.input, &anim.kernel).unwrap();
    assert_eq!(
        out,
        Grid::from_rows(&[[-2, 6, 3], [-5, 9, 7], [14, -6, 2]]).unwrap()
    );
    assert_eq!(anim.steps().unwrap().frame_count(), 9);
}

#[test]
fn only_the_input_panel_highlights() {
    let styles = ConvolutionStyles::default();
    assert_eq!(
        styles.image.highlight,
        Some(CellColors::new(LIGHT1, DARK2))
    );
    assert!(styles.multiplication.highlight.is_none());
    assert!(styles.output.highlight.is_none());
    assert!(styles.kernel.highlight.is_none());
    assert_eq!(styles.image.font_size_pt, 30.0);
    assert_eq!(styles.kernel.font_size_pt, 52.0);
}

#[test]
fn render_steps_writes_three_images_per_step_and_one_kernel() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path());
    let cfg = Config {
        dpi: 25,
        ..Config::default()
    };
    let anim = ConvolutionAnimation::new(
        Grid::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap(),
        Grid::from_rows(&[[1, 0], [0, 1]]).unwrap(),
    );

    let mut grids = GridRenderer::new(&cfg);
    let steps = anim.render_steps(&mut grids, &layout).unwrap();
    assert_eq!(steps, 2);
    for k in 1..=2 {
        let set = layout.frame_set(k);
        assert!(set.image.is_file());
        assert!(set.multiplication.is_file());
        assert!(set.output.is_file());
    }
    assert!(!layout.frame_set(3).image.exists());
    assert!(layout.kernel().is_file());
}

#[test]
fn mismatched_kernel_is_rejected_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path());
    let anim = ConvolutionAnimation::new(
        Grid::from_rows(&[[1, 2]]).unwrap(),
        Grid::from_rows(&[[1, 0], [0, 1]]).unwrap(),
    );
    let mut grids = GridRenderer::new(&Config::default());
    assert!(anim.render_steps(&mut grids, &layout).is_err());
    assert!(!layout.kernel().exists());
}
