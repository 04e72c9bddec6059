use super::*;

#[test]
fn nearest_is_sorted_and_stable_on_ties() {
    let scene = KnnScene::default();
    let nearest: Vec<Point> = scene.nearest(3).unwrap().iter().map(|p| p.point).collect();
    // (0.5, 1) and (2, 1.5) are both sqrt(1.25) away; input order decides.
    assert_eq!(
        nearest,
        vec![Point::new(1.0, 1.0), Point::new(0.5, 1.0), Point::new(2.0, 1.5)]
    );
}

#[test]
fn majority_vote() {
    let scene = KnnScene::default();
    assert_eq!(scene.classify(1).unwrap(), Class::One);
    assert_eq!(scene.classify(3).unwrap(), Class::One);
    // Two against two: the nearest point's class wins.
    assert_eq!(scene.classify(4).unwrap(), Class::One);
}

#[test]
fn k_out_of_range_is_rejected() {
    let scene = KnnScene::default();
    assert!(scene.nearest(0).is_err());
    assert!(scene.classify(5).is_err());
}

#[test]
fn neighbourhood_encloses_neighbours_and_query() {
    let scene = KnnScene::default();
    let disc = scene.neighbourhood(3).unwrap();
    assert!((disc.center.x - 1.125).abs() < 1e-12);
    assert!((disc.center.y - 1.375).abs() < 1e-12);

    let members = [
        Point::new(1.0, 1.0),
        Point::new(0.5, 1.0),
        Point::new(2.0, 1.5),
        scene.query,
    ];
    let far = members
        .iter()
        .map(|p| p.distance(disc.center))
        .fold(0.0, f64::max);
    assert!((disc.radius - far * 1.2).abs() < 1e-12);
    assert!(members.iter().all(|p| p.distance(disc.center) < disc.radius));
}

#[test]
fn renders_both_plots() {
    let dir = tempfile::tempdir().unwrap();
    let report = render(dir.path(), &Config::default()).unwrap();
    assert_eq!(report.class, Class::One);
    assert_eq!(report.plain, dir.path().join("knn.png"));
    assert_eq!(report.neighbours, dir.path().join("knn_neighbours.png"));
    assert!(report.plain.is_file());
    assert!(report.neighbours.is_file());
}
