//! End-to-end persistence computations on small, hand-checked complexes.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tda_persistence::homology::{PersistenceConfig, PersistenceInterval, PersistentHomology, Polarity};
use tda_persistence::prelude::*;
use tda_persistence::streams::{ExplicitStream, FlagComplexStream, ImportedStream, WeightedGraph};
use tda_persistence::topology::{point_cloud, IncreasingLinearConverter};

fn z2() -> ModularField {
    ModularField::new(2).unwrap()
}

fn hollow_triangle() -> ExplicitSimplexStream {
    let mut stream = ExplicitSimplexStream::new();
    for v in 0..3 {
        stream.add_vertex(v, 0).unwrap();
    }
    for edge in [[0, 1], [0, 2], [1, 2]] {
        stream.add_simplex(&edge, 1).unwrap();
    }
    stream.finalize().unwrap();
    stream
}

fn essential(barcodes: &BarcodeCollection, dimension: usize) -> usize {
    barcodes
        .intervals(dimension)
        .iter()
        .filter(|i| i.is_right_infinite())
        .count()
}

#[test]
fn single_edge() {
    let mut stream = ExplicitSimplexStream::new();
    stream.add_vertex(0, 0).unwrap();
    stream.add_vertex(1, 0).unwrap();
    stream.add_simplex(&[0, 1], 1).unwrap();
    stream.finalize().unwrap();

    let barcodes = compute_persistence(&stream, z2(), 1).unwrap();
    assert_eq!(barcodes.intervals(0), &[
        PersistenceInterval::finite(0, 1),
        PersistenceInterval::right_infinite(0),
    ]);
    assert_eq!(barcodes.to_string(), "Dimension: 0\n[0, 1)\n[0, infinity)\n");
}

#[test]
fn hollow_triangle_keeps_its_loop() {
    let barcodes = compute_persistence(&hollow_triangle(), z2(), 1).unwrap();
    assert_eq!(barcodes.intervals(1), &[PersistenceInterval::right_infinite(1)]);
    assert_eq!(essential(&barcodes, 0), 1);
    assert_eq!(barcodes.betti_numbers(5)[&1], 1);
}

#[test]
fn filled_triangle_has_no_essential_loop() {
    for field in [z2(), ModularField::new(3).unwrap()] {
        let mut stream = ExplicitSimplexStream::new();
        for v in 0..3 {
            stream.add_vertex(v, 0).unwrap();
        }
        for edge in [[0, 1], [0, 2], [1, 2]] {
            stream.add_simplex(&edge, 1).unwrap();
        }
        stream.add_simplex(&[0, 1, 2], 2).unwrap();
        stream.finalize().unwrap();

        let barcodes = compute_persistence(&stream, field, 1).unwrap();
        let dim0 = barcodes.intervals(0);
        assert_eq!(essential(&barcodes, 0), 1);
        assert_eq!(dim0.iter().filter(|i| i.end() == Some(1)).count(), 2);
        assert_eq!(essential(&barcodes, 1), 0);
        assert_eq!(barcodes.intervals(1), &[PersistenceInterval::finite(1, 2)]);
    }
}

#[test]
fn collinear_points_at_threshold_one_and_a_half() {
    let metric = EuclideanMetricSpace::new(point_cloud::line(3, 1.0));
    let mut stream = VietorisRipsStream::new(metric, 1.5, 2).unwrap();
    stream.finalize().unwrap();

    // only the adjacent pairs (distance 1) are joined; the endpoints are 2 apart
    assert_eq!(stream.size().unwrap(), 5);
    assert!(stream.filtration_index(&Simplex::new(vec![0, 2])).is_err());

    let barcodes = compute_persistence(&stream, z2(), 1).unwrap();
    let deaths: Vec<_> = barcodes.intervals(0).iter().filter_map(|i| i.end()).collect();
    assert_eq!(deaths, vec![14, 14]);
    assert_eq!(essential(&barcodes, 0), 1);
    assert!(barcodes.intervals(1).is_empty());
}

#[test]
fn collinear_points_at_threshold_two() {
    let metric = EuclideanMetricSpace::new(point_cloud::line(3, 1.0));
    let mut stream = VietorisRipsStream::new(metric, 2.0, 2).unwrap();
    stream.finalize().unwrap();

    // distance exactly 2 is included, so the triangle appears with its last edge
    assert_eq!(stream.size().unwrap(), 7);
    assert_eq!(stream.filtration_index(&Simplex::new(vec![0, 2])).unwrap(), 20);

    let barcodes = compute_persistence(&stream, z2(), 1).unwrap();
    assert_eq!(barcodes.intervals(0).len(), 3);
    assert!(barcodes.intervals(1).is_empty());

    let values = barcodes.to_filtration_values(0, stream.converter());
    assert!((values[0].1 - 1.0).abs() < 1e-12);
}

#[test]
fn noisy_circle_has_one_long_loop() {
    let mut rng = StdRng::seed_from_u64(2024);
    let points = point_cloud::circle(20, 1.0, 0.05, &mut rng);
    let mut stream = VietorisRipsStream::new(EuclideanMetricSpace::new(points), 2.5, 2).unwrap();
    stream.finalize().unwrap();

    let barcodes = compute_persistence(&stream, z2(), 1).unwrap();
    assert_eq!(essential(&barcodes, 0), 1);
    assert_eq!(essential(&barcodes, 1), 0);

    let long: Vec<_> = barcodes
        .intervals(1)
        .iter()
        .filter(|i| i.length().is_some_and(|l| l >= 5))
        .collect();
    assert_eq!(long.len(), 1);
    assert!(barcodes.persistence_entropy(1) >= 0.0);
}

#[test]
fn weighted_graph_expansion() {
    // a 4-cycle with one chord: two triangles once the chord enters
    let mut graph = WeightedGraph::new(4);
    graph.add_edge(0, 1, 1.0);
    graph.add_edge(1, 2, 1.0);
    graph.add_edge(2, 3, 1.0);
    graph.add_edge(3, 0, 1.0);
    graph.add_edge(0, 2, 3.0);
    let mut stream = FlagComplexStream::from_skeleton(graph, 2, IncreasingLinearConverter::new(4, 4.0));
    stream.finalize().unwrap();

    let barcodes = compute_persistence(&stream, z2(), 1).unwrap();
    assert_eq!(barcodes.intervals(1), &[PersistenceInterval::finite(1, 3)]);
}

#[test]
fn torus_from_tensor_product() {
    let mut torus = TensorStream::new(hollow_triangle(), hollow_triangle());
    torus.finalize().unwrap();
    assert_eq!(torus.size().unwrap(), 36);

    for field in [z2(), ModularField::new(5).unwrap()] {
        let barcodes = compute_persistence(&torus, field, 2).unwrap();
        assert_eq!(essential(&barcodes, 0), 1);
        assert_eq!(essential(&barcodes, 1), 2);
        assert_eq!(essential(&barcodes, 2), 1);
    }
}

#[test]
fn tensor_boundary_squares_to_zero() {
    let mut product = TensorStream::new(hollow_triangle(), hollow_triangle());
    product.finalize().unwrap();
    let engine = PersistentHomology::with_max_dimension(RationalField::new(), 2);

    for cell in product.iter().unwrap() {
        let boundary = engine.boundary_chain(&product, cell).unwrap();
        assert!(engine.boundary_of(&product, &boundary).unwrap().is_empty(), "{cell:?}");
    }
}

#[test]
fn relative_polarity_reports_killers() {
    let config = PersistenceConfig::new(1).with_polarity(Polarity::Relative);
    let engine = PersistentHomology::new(z2(), config).unwrap();
    let barcodes = engine.compute_intervals(&hollow_triangle()).unwrap();

    assert_eq!(barcodes.intervals(0), &[PersistenceInterval::left_infinite(0)]);
    let dim1 = barcodes.intervals(1);
    assert_eq!(dim1.iter().filter(|i| i.is_finite()).count(), 2);
    assert_eq!(dim1.iter().filter(|i| i.is_left_infinite()).count(), 1);
}

#[test]
fn min_dimension_restricts_columns() {
    let config = PersistenceConfig::new(1).with_min_dimension(1);
    let engine = PersistentHomology::new(z2(), config).unwrap();
    let barcodes = engine.compute_intervals(&hollow_triangle()).unwrap();
    assert_eq!(barcodes.intervals(1), &[PersistenceInterval::right_infinite(1)]);
    // vertices get no column, so no component is reported as essential
    assert_eq!(essential(&barcodes, 0), 0);
}

#[test]
fn imported_sequence_matches_explicit_stream() {
    let legacy = vec![
        (vec![0], 0.0),
        (vec![1], 0.0),
        (vec![2], 0.0),
        (vec![0, 1], 1.0),
        (vec![1, 2], 1.0),
        (vec![0, 2], 2.0),
    ];
    let imported =
        ImportedStream::from_foreign(legacy, |(vertices, f): (Vec<usize>, f64)| (Simplex::new(vertices), f as usize)).unwrap();

    let barcodes = compute_persistence(&imported, z2(), 1).unwrap();
    assert_eq!(barcodes.intervals(1), &[PersistenceInterval::right_infinite(2)]);
    assert_eq!(essential(&barcodes, 0), 1);
}

#[test]
fn ensure_all_faces_makes_a_valid_complex() {
    let mut stream = ExplicitSimplexStream::new();
    stream.add_simplex(&[0, 1, 2, 3], 2).unwrap();
    stream.ensure_all_faces().unwrap();
    stream.finalize().unwrap();
    assert_eq!(stream.size().unwrap(), 15);

    let barcodes = compute_persistence(&stream, z2(), 3).unwrap();
    assert_eq!(barcodes.len(), 1);
    assert_eq!(barcodes.intervals(0), &[PersistenceInterval::right_infinite(2)]);
}

#[test]
fn finalize_is_idempotent_everywhere() {
    let mut explicit: ExplicitStream<Simplex> = ExplicitStream::new();
    explicit.add_simplex(&[0, 1], 0).unwrap();
    explicit.ensure_all_faces().unwrap();
    explicit.finalize().unwrap();
    let once: Vec<_> = explicit.iter().unwrap().cloned().collect();
    explicit.finalize().unwrap();
    let twice: Vec<_> = explicit.iter().unwrap().cloned().collect();
    assert_eq!(once, twice);
    assert!(explicit.add_vertex(7, 0).is_err());

    let mut tensor = TensorStream::new(hollow_triangle(), hollow_triangle());
    tensor.finalize().unwrap();
    let once: Vec<_> = tensor.iter().unwrap().cloned().collect();
    tensor.finalize().unwrap();
    let twice: Vec<_> = tensor.iter().unwrap().cloned().collect();
    assert_eq!(once, twice);
}

#[test]
fn queries_before_finalize_fail() {
    let stream = ExplicitSimplexStream::new();
    assert_eq!(stream.size().unwrap_err(), Error::NotFinalized);
    assert!(stream.iter().is_err());
}
