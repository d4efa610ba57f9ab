use wayfinder_core::prelude::*;

/// Points on a `size` x `size` grid, every third one on the upper level
fn grid_points(size: u32) -> Vec<Feature> {
    (0..size * size)
        .map(|i| {
            let (x, y) = (f64::from(i % size), f64::from(i / size));
            let point = Feature::point(x, y);
            if i % 3 == 0 { point.with_level("upper") } else { point }
        })
        .collect()
}

/// One line string per grid row, with vertices jittered off the points
fn grid_rows(size: u32) -> Vec<Feature> {
    (0..size)
        .map(|row| {
            let coords: Vec<(f64, f64)> = (0..size)
                .map(|col| (f64::from(col) + 0.2, f64::from(row) - 0.1))
                .collect();
            Feature::line_string(&coords)
        })
        .collect()
}

#[test]
fn point_only_input_creates_one_node_per_point() {
    let features = grid_points(6);
    let graph = GraphBuilder::default().build(&features).unwrap();

    assert_eq!(graph.node_count(), features.len());
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(
        graph.nodes().filter(|n| n.level_id == DEFAULT_LEVEL).count(),
        features.iter().filter(|f| f.level_id().is_none()).count()
    );
}

#[test]
fn each_line_string_yields_vertex_count_minus_one_edges() {
    let size = 6;
    let mut features = grid_points(size);
    features.extend(grid_rows(size));

    let graph = GraphBuilder::default().build(&features).unwrap();
    let vertices: usize = features_of_kind(&features, GeometryKind::LineString)
        .iter()
        .map(|f| match &f.geometry {
            FeatureGeometry::LineString(line) => line.0.len() - 1,
            _ => 0,
        })
        .sum();
    assert_eq!(graph.edge_count(), vertices);
}

#[test]
fn edge_weights_match_endpoint_distance() {
    let size = 5;
    let mut features = grid_points(size);
    features.extend(grid_rows(size));

    for metric in [Metric::Euclidean, Metric::Haversine] {
        let graph = GraphBuilder::build_graph(&features, metric).unwrap();
        for edge in graph.edges() {
            let source = graph.node(&edge.source).unwrap();
            let target = graph.node(&edge.target).unwrap();
            let expected = metric.distance(source.geometry, target.geometry);
            assert!((edge.weight - expected).abs() < 1e-9, "{edge:?}");
            assert!(edge.weight >= 0.0);
        }
    }
}

#[test]
fn jittered_rows_snap_to_grid_neighbours() {
    let size = 4;
    let mut features = grid_points(size);
    features.extend(grid_rows(size));

    let graph = GraphBuilder::default().build(&features).unwrap();
    let first_row: Vec<_> = graph
        .edges()
        .take(3)
        .map(|e| (e.source.as_str(), e.target.as_str(), e.weight))
        .collect();
    assert_eq!(
        first_row,
        [
            ("node_0", "node_1", 1.0),
            ("node_1", "node_2", 1.0),
            ("node_2", "node_3", 1.0)
        ]
    );
}

#[test]
fn nodes_and_edges_are_available_while_building() {
    let mut features = grid_points(3);
    features.extend(grid_rows(3));

    let mut builder = GraphBuilder::new(Metric::Euclidean);
    assert_eq!(builder.add_nodes_from(&features), 9);
    assert_eq!(builder.nodes().count(), 9);
    assert_eq!(builder.edges().count(), 0);

    assert_eq!(builder.add_edges_from(&features).unwrap(), 6);
    assert_eq!(builder.edges().count(), 6);
    assert_eq!(builder.into_graph().edge_count(), 6);
}
