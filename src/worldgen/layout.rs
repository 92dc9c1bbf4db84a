use std::collections::BTreeSet;

use crate::error::GenerationError;
use crate::graph::{bridges_and_articulation_points, build_mst, connected_components};
use crate::model::{Edge, MapLayout, Point};
use crate::rng::WorldRng;

use super::config::LayoutConfig;
use super::sampling::poisson_disk;

/// Build one map layout: sample, thin, triangulate, span, restore short
/// edges, then find bridges and articulation points.
///
/// Sampling and thinning are redrawn from the same RNG stream until at
/// least two points survive, at most `max_attempts` times.
pub fn generate_layout(
    config: &LayoutConfig,
    rng: &mut WorldRng,
) -> Result<MapLayout, GenerationError> {
    let attempts = config.max_attempts.max(1);
    let (mut sampled_count, mut points) = sample_points(config, rng);
    for attempt in 1..attempts {
        if points.len() >= 2 {
            break;
        }
        tracing::debug!(
            attempt,
            sampled = sampled_count,
            retained = points.len(),
            "too few points kept, resampling"
        );
        (sampled_count, points) = sample_points(config, rng);
    }

    if points.len() < 2 {
        return Err(GenerationError::TooFewPoints {
            sampled: sampled_count,
            retained: points.len(),
        });
    }

    let candidates = delaunay_edges(&points);
    let tree = build_mst(&points, &candidates);
    if tree.len() + 1 < points.len() {
        let tree_edges: Vec<Edge> = tree.iter().map(|w| w.edge).collect();
        return Err(GenerationError::Disconnected {
            components: connected_components(points.len(), &tree_edges),
        });
    }

    let in_tree: BTreeSet<Edge> = tree.iter().map(|w| w.edge).collect();
    let mut edges: Vec<Edge> = tree.iter().map(|w| w.edge).collect();
    let mst_count = edges.len();
    for &candidate in &candidates {
        if in_tree.contains(&candidate) {
            continue;
        }
        if points[candidate.0].distance(points[candidate.1]) < config.restore_max_length {
            edges.push(candidate);
        }
    }

    let cuts = bridges_and_articulation_points(points.len(), &edges);

    tracing::debug!(
        sampled = sampled_count,
        retained = points.len(),
        candidates = candidates.len(),
        mst = mst_count,
        restored = edges.len() - mst_count,
        bridges = cuts.bridges.len(),
        articulation_points = cuts.articulation_points.len(),
        "layout generated"
    );

    Ok(MapLayout {
        points,
        edges,
        bridges: cuts.bridges,
        articulation_points: cuts.articulation_points,
    })
}

/// Poisson-disk samples thinned by `retain_probability`, with the number
/// sampled before thinning.
fn sample_points(config: &LayoutConfig, rng: &mut WorldRng) -> (usize, Vec<Point>) {
    let sampled = poisson_disk(config, rng);
    let sampled_count = sampled.len();
    let points = sampled
        .into_iter()
        .filter(|_| rng.chance(config.retain_probability))
        .collect();
    (sampled_count, points)
}

/// Undirected Delaunay edges, de-duplicated and sorted by endpoint pair.
///
/// Collinear input has no triangles; the points are then chained in
/// `(x, y)` order so the result still spans every point.
pub fn delaunay_edges(points: &[Point]) -> Vec<Edge> {
    let input: Vec<delaunator::Point> = points
        .iter()
        .map(|p| delaunator::Point { x: p.x, y: p.y })
        .collect();
    let triangulation = delaunator::triangulate(&input);

    let mut edges = BTreeSet::new();
    for triangle in triangulation.triangles.chunks_exact(3) {
        edges.insert(Edge::new(triangle[0], triangle[1]));
        edges.insert(Edge::new(triangle[1], triangle[2]));
        edges.insert(Edge::new(triangle[0], triangle[2]));
    }

    if edges.is_empty() && points.len() >= 2 {
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| {
            points[a]
                .x
                .total_cmp(&points[b].x)
                .then(points[a].y.total_cmp(&points[b].y))
        });
        for pair in order.windows(2) {
            edges.insert(Edge::new(pair[0], pair[1]));
        }
    }

    edges.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::is_connected;

    #[test]
    fn layouts_are_connected() {
        for seed in 0..10 {
            let mut rng = WorldRng::from_seed(seed);
            let layout = generate_layout(&LayoutConfig::local(), &mut rng).unwrap();
            assert!(
                is_connected(layout.point_count(), &layout.edges),
                "seed {seed} produced a disconnected layout"
            );
        }
    }

    #[test]
    fn bridges_are_edges_and_disconnect() {
        let mut rng = WorldRng::from_seed(3);
        let layout = generate_layout(&LayoutConfig::local(), &mut rng).unwrap();
        for bridge in &layout.bridges {
            assert!(layout.has_edge(bridge.0, bridge.1));
            let rest: Vec<Edge> = layout.edges.iter().copied().filter(|e| e != bridge).collect();
            assert!(connected_components(layout.point_count(), &rest) > 1);
        }
    }

    #[test]
    fn restored_edges_are_short() {
        let config = LayoutConfig::local();
        let mut rng = WorldRng::from_seed(8);
        let layout = generate_layout(&config, &mut rng).unwrap();
        // Everything past the first n-1 edges was restored.
        for &edge in &layout.edges[layout.point_count() - 1..] {
            assert!(layout.edge_length(edge) < config.restore_max_length);
        }
    }

    #[test]
    fn no_duplicate_edges() {
        let mut rng = WorldRng::from_seed(21);
        let layout = generate_layout(&LayoutConfig::overworld(), &mut rng).unwrap();
        let unique: BTreeSet<Edge> = layout.edges.iter().copied().collect();
        assert_eq!(unique.len(), layout.edges.len());
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate_layout(&LayoutConfig::local(), &mut WorldRng::from_seed(77)).unwrap();
        let b = generate_layout(&LayoutConfig::local(), &mut WorldRng::from_seed(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_area_is_too_few_points() {
        let config = LayoutConfig {
            width: 10.0,
            height: 10.0,
            ..LayoutConfig::local()
        };
        let err = generate_layout(&config, &mut WorldRng::from_seed(1)).unwrap_err();
        assert!(matches!(err, GenerationError::TooFewPoints { sampled: 1, .. }));
    }

    #[test]
    fn degenerate_sampling_is_retried_a_bounded_number_of_times() {
        let config = LayoutConfig {
            width: 10.0,
            height: 10.0,
            max_attempts: 3,
            ..LayoutConfig::local()
        };
        let mut rng = WorldRng::from_seed(6);
        let err = generate_layout(&config, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::TooFewPoints { sampled: 1, .. }));

        // Exactly three draws were consumed before giving up.
        let mut reference = WorldRng::from_seed(6);
        for _ in 0..3 {
            sample_points(&config, &mut reference);
        }
        assert_eq!(rng.random(), reference.random());
    }

    #[test]
    fn nothing_retained_fails_after_every_attempt() {
        let config = LayoutConfig {
            retain_probability: 0.0,
            max_attempts: 4,
            ..LayoutConfig::local()
        };
        let mut rng = WorldRng::from_seed(2);
        let err = generate_layout(&config, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::TooFewPoints { retained: 0, .. }));

        let mut reference = WorldRng::from_seed(2);
        for _ in 0..4 {
            sample_points(&config, &mut reference);
        }
        assert_eq!(rng.random(), reference.random());
    }

    #[test]
    fn delaunay_square_has_five_edges() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 11.0),
            Point::new(0.0, 12.0),
        ];
        let edges = delaunay_edges(&points);
        assert_eq!(edges.len(), 5);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn collinear_points_fall_back_to_a_chain() {
        let points = vec![
            Point::new(20.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let edges = delaunay_edges(&points);
        assert_eq!(edges, vec![Edge(0, 2), Edge(1, 2)]);
    }
}
