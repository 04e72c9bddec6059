use super::*;

fn image() -> Grid<i64> {
    Grid::from_rows(&[[-2, -1, 5, 1], [3, -2, 3, 4], [6, 4, -5, 4], [-3, 0, 0, 1]]).unwrap()
}

fn kernel() -> Grid<i64> {
    Grid::from_rows(&[[1, 2], [0, -1]]).unwrap()
}

#[test]
fn blog_example_produces_three_by_three() {
    let out = cross_correlate(&image(), &kernel()).unwrap();
    assert_eq!(out.shape(), GridShape::new(3, 3));
    assert_eq!(out.get(0, 0), Some(&-2));

    let expected = Grid::from_rows(&[[-2, 6, 3], [-5, 9, 7], [14, -6, 2]]).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn output_cell_equals_sum_of_window_product() {
    let input = image();
    let k = kernel();
    let out = cross_correlate(&input, &k).unwrap();
    for offset in window_offsets(input.shape(), k.shape()).unwrap() {
        let product = window_product(&input, &k, offset).unwrap();
        let sum: i64 = product.iter_cells().map(|(_, v)| *v).sum();
        assert_eq!(out.get(offset.row, offset.col), Some(&sum));
    }
}

#[test]
fn kernel_is_not_flipped() {
    let input = Grid::from_rows(&[[1, 0], [0, 0]]).unwrap();
    let k = Grid::from_rows(&[[5, 0], [0, 7]]).unwrap();
    let out = cross_correlate(&input, &k).unwrap();
    assert_eq!(out.get(0, 0), Some(&5));
}

#[test]
fn kernel_equal_to_input_gives_single_cell() {
    let input = kernel();
    let out = cross_correlate(&input, &kernel()).unwrap();
    assert_eq!(out.shape(), GridShape::new(1, 1));
    assert_eq!(out.get(0, 0), Some(&(1 + 4 + 0 + 1)));
}

#[test]
fn offsets_are_row_major() {
    let offsets: Vec<CellIndex> = window_offsets(GridShape::new(3, 4), GridShape::new(2, 2))
        .unwrap()
        .collect();
    assert_eq!(
        offsets,
        vec![
            CellIndex::new(0, 0),
            CellIndex::new(0, 1),
            CellIndex::new(0, 2),
            CellIndex::new(1, 0),
            CellIndex::new(1, 1),
            CellIndex::new(1, 2),
        ]
    );
}

#[test]
fn oversized_kernel_is_rejected() {
    let tall = Grid::from_rows(&[[1], [2], [3], [4], [5]]).unwrap();
    assert!(cross_correlate(&image(), &tall).is_err());
    assert!(output_shape(GridShape::new(0, 3), GridShape::new(1, 1)).is_err());
}

#[test]
fn window_product_matches_manual_arithmetic() {
    let p = window_product(&image(), &kernel(), CellIndex::new(0, 0)).unwrap();
    assert_eq!(p, Grid::from_rows(&[[-2, -2], [0, 2]]).unwrap());
}
