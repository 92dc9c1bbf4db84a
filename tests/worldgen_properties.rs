mod common;

use lucanis::graph::{
    bridges_and_articulation_points, connected_components, edge_cuts_of_size_two, is_connected,
};
use lucanis::model::{Edge, MapLayout};
use lucanis::rng::WorldRng;
use lucanis::worldgen::{LayoutConfig, generate_layout};
use lucanis::{find_path, generate_world};

fn check_layout(layout: &MapLayout) {
    let n = layout.point_count();
    assert!(n >= 2);
    assert!(is_connected(n, &layout.edges), "layout is not connected");
    assert!(layout.edges.iter().all(|e| e.0 < e.1 && e.1 < n));

    for edge in &layout.edges {
        let rest: Vec<Edge> = layout.edges.iter().copied().filter(|e| e != edge).collect();
        let splits = connected_components(n, &rest) > 1;
        assert_eq!(splits, layout.bridges.contains(edge), "edge {edge:?}");
    }

    for v in 0..n {
        let rest: Vec<Edge> = layout.edges.iter().copied().filter(|e| !e.touches(v)).collect();
        // `v` itself is left as an isolated component.
        let splits = connected_components(n, &rest) - 1 > 1;
        assert_eq!(splits, layout.articulation_points.contains(&v), "point {v}");
    }
}

#[test]
fn generated_layouts_hold_their_invariants() {
    for seed in 0..8 {
        let mut rng = WorldRng::from_seed(seed);
        check_layout(&generate_layout(&LayoutConfig::local(), &mut rng).unwrap());
        check_layout(&generate_layout(&LayoutConfig::overworld(), &mut rng).unwrap());
    }
}

#[test]
fn every_map_in_a_world_holds_its_invariants() {
    let world = generate_world(2024).unwrap();
    check_layout(&world.overworld.layout);
    for map in &world.maps {
        check_layout(&map.layout);
    }
}

#[test]
fn fixture_layout_matches_cut_analysis() {
    let layout = common::small_layout();
    let cuts = bridges_and_articulation_points(layout.point_count(), &layout.edges);
    assert_eq!(cuts.bridges, layout.bridges);
    assert_eq!(cuts.articulation_points, layout.articulation_points);
    check_layout(&layout);
}

#[test]
fn two_edge_cuts_on_fixture() {
    let layout = common::small_layout();
    let cuts = edge_cuts_of_size_two(layout.point_count(), &layout.edges);
    // The bridge (index 3) with any other edge, plus any two edges of the
    // same triangle.
    assert!(cuts.iter().filter(|(a, b)| *a == 3 || *b == 3).count() == 6);
    assert!(cuts.contains(&(0, 1)));
    assert!(cuts.contains(&(4, 6)));
    assert!(!cuts.contains(&(0, 4)));
    assert_eq!(cuts.len(), 12);
}

#[test]
fn paths_exist_between_all_points_of_a_map() {
    let world = generate_world(11).unwrap();
    let layout = &world.maps[0].layout;
    for start in 0..layout.point_count() {
        for end in 0..layout.point_count() {
            let path = find_path(layout, start, end).unwrap();
            assert_eq!(path[0], start);
            assert_eq!(*path.last().unwrap(), end);
            assert!(path.windows(2).all(|w| layout.has_edge(w[0], w[1])));
        }
    }
}

#[test]
fn seed_reproduces_identical_worlds() {
    let a = generate_world(31337).unwrap();
    let b = generate_world(31337).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert_eq!(a.character_count(), b.character_count());
}

#[test]
fn phrase_seeds_are_stable() {
    let seed = lucanis::rng::seed_from_phrase("lucanis");
    let a = generate_world(seed).unwrap();
    let b = generate_world(lucanis::rng::seed_from_phrase("lucanis")).unwrap();
    assert_eq!(a, b);
}
