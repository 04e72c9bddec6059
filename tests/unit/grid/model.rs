use super::*;

fn sample() -> Grid<i64> {
    Grid::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap()
}

#[test]
fn from_rows_is_row_major() {
    let g = sample();
    assert_eq!(g.shape(), GridShape::new(2, 3));
    assert_eq!(g.get(0, 2), Some(&3));
    assert_eq!(g.get(1, 0), Some(&4));
    assert_eq!(g.get(2, 0), None);

    let order: Vec<i64> = g.iter_cells().map(|(_, v)| *v).collect();
    assert_eq!(order, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn from_shape_vec_rejects_wrong_length() {
    let err = Grid::from_shape_vec(GridShape::new(2, 2), vec![1, 2, 3]).unwrap_err();
    assert!(err.to_string().contains("needs 4 cells"));
}

#[test]
fn window_copies_sub_block_and_checks_bounds() {
    let g = sample();
    let w = g.window(&CellRange::new(0..2, 1..3)).unwrap();
    assert_eq!(w, Grid::from_rows(&[[2, 3], [5, 6]]).unwrap());

    assert!(g.window(&CellRange::new(1..3, 0..1)).is_err());
}

#[test]
fn cell_range_helpers() {
    let shape = GridShape::new(4, 4);
    let r = CellRange::for_window(CellIndex::new(1, 2), GridShape::new(2, 2));
    assert_eq!(r, CellRange::new(1..3, 2..4));
    assert!(r.fits(shape));
    assert!(r.contains(CellIndex::new(2, 3)));
    assert!(!r.contains(CellIndex::new(0, 2)));
    assert_eq!(r.iter().count(), 4);

    assert!(CellRange::empty().is_empty());
    assert_eq!(CellRange::row(3, shape).shape(), GridShape::new(1, 4));
    assert_eq!(CellRange::column(1, shape).shape(), GridShape::new(4, 1));
}

#[test]
fn unset_cells_label_as_empty_text() {
    assert_eq!(Some(-2i64).label(), "-2");
    assert_eq!(None::<i64>.label(), "");
    assert_eq!(7u8.label(), "7");
}

#[test]
fn map_preserves_shape() {
    let g = sample().map(|v| Some(*v * 10));
    assert_eq!(g.shape(), GridShape::new(2, 3));
    assert_eq!(g.get(1, 2), Some(&Some(60)));
}
