use super::*;
use crate::grid::window::cross_correlate;

fn input() -> Grid<i64> {
    Grid::from_rows(&[[-2, -1, 5, 1], [3, -2, 3, 4], [6, 4, -5, 4], [-3, 0, 0, 1]]).unwrap()
}

fn kernel() -> Grid<i64> {
    Grid::from_rows(&[[1, 2], [0, -1]]).unwrap()
}

#[test]
fn steps_follow_row_major_order_with_one_based_indices() {
    let (i, k) = (input(), kernel());
    let steps: Vec<ConvolutionStep> = ConvolutionSteps::new(&i, &k)
        .unwrap()
        .collect::<ChalkResult<_>>()
        .unwrap();
    assert_eq!(steps.len(), 9);
    assert_eq!(steps[0].index, 1);
    assert_eq!(steps[0].offset, CellIndex::new(0, 0));
    assert_eq!(steps[1].offset, CellIndex::new(0, 1));
    assert_eq!(steps[3].offset, CellIndex::new(1, 0));
    assert_eq!(steps[8].index, 9);
    assert_eq!(steps[8].window, CellRange::new(2..4, 2..4));
}

#[test]
fn output_at_step_k_has_first_k_cells_filled() {
    let (i, k) = (input(), kernel());
    let full = cross_correlate(&i, &k).unwrap();
    for step in ConvolutionSteps::new(&i, &k).unwrap() {
        let step = step.unwrap();
        let filled: Vec<usize> = step
            .output
            .iter_cells()
            .enumerate()
            .filter(|(_, (_, v))| v.is_some())
            .map(|(n, _)| n)
            .collect();
        assert_eq!(filled, (0..step.index).collect::<Vec<_>>());
        for (idx, v) in step.output.iter_cells() {
            if let Some(v) = v {
                assert_eq!(Some(v), full.get(idx.row, idx.col));
            }
        }
    }
}

#[test]
fn first_step_matches_top_left_block() {
    let (i, k) = (input(), kernel());
    let first = ConvolutionSteps::new(&i, &k)
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(first.product, Grid::from_rows(&[[-2, -2], [0, 2]]).unwrap());
    assert_eq!(first.value, -2);
}

#[test]
fn reports_frame_count_and_exact_size() {
    let (i, k) = (input(), kernel());
    let mut steps = ConvolutionSteps::new(&i, &k).unwrap();
    assert_eq!(steps.frame_count(), 9);
    assert_eq!(steps.output_shape(), GridShape::new(3, 3));
    steps.next();
    assert_eq!(steps.len(), 8);
}

#[test]
fn oversized_kernel_is_rejected_up_front() {
    let small = Grid::from_rows(&[[1, 2]]).unwrap();
    let k = kernel();
    assert!(ConvolutionSteps::new(&small, &k).is_err());
}

#[test]
fn layout_paths_are_deterministic() {
    let layout = FrameLayout::new("/tmp/conv");
    let set = layout.frame_set(3);
    assert_eq!(set.image, Path::new("/tmp/conv/img/img_3.png"));
    assert_eq!(
        set.multiplication,
        Path::new("/tmp/conv/multiplication/multiplication_3.png")
    );
    assert_eq!(set.output, Path::new("/tmp/conv/output/output_3.png"));
    assert_eq!(layout.kernel(), Path::new("/tmp/conv/kernel/kernel.png"));
    assert_eq!(layout.composite(3), Path::new("/tmp/conv/composite/index_3.svg"));
    assert_eq!(layout.frame(12), Path::new("/tmp/conv/frames/frame_12.png"));
    assert_eq!(layout.animation(), Path::new("/tmp/conv/animation.gif"));
}
