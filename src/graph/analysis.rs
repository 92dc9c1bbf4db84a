use super::{Adjacency, connected_components};
use crate::model::Edge;

/// Bridges and articulation points of an undirected graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutAnalysis {
    /// Edges whose removal disconnects their component, in DFS finish order.
    pub bridges: Vec<Edge>,
    /// Vertices whose removal disconnects their component, ascending.
    pub articulation_points: Vec<usize>,
}

/// One DFS frame: the node, the cursor into its neighbor list, and how many
/// tree children it has produced so far.
struct Frame {
    node: usize,
    next: usize,
    children: usize,
}

const UNVISITED: usize = usize::MAX;

/// Tarjan's single-pass DFS over every component, with an explicit stack.
///
/// A root is an articulation point when it has two or more DFS children.
/// A non-root `u` is one when some child `v` has `low[v] >= disc[u]`. The
/// tree edge `(u, v)` is a bridge when `low[v] > disc[u]`.
pub fn bridges_and_articulation_points(node_count: usize, edges: &[Edge]) -> CutAnalysis {
    let adjacency = Adjacency::from_edges(node_count, edges);
    let mut disc = vec![UNVISITED; node_count];
    let mut low = vec![0usize; node_count];
    let mut parent: Vec<Option<usize>> = vec![None; node_count];
    let mut is_cut = vec![false; node_count];
    let mut bridges = Vec::new();
    let mut time = 0usize;

    for root in 0..node_count {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        let mut stack = vec![Frame {
            node: root,
            next: 0,
            children: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            if let Some(&v) = adjacency.neighbors(u).get(frame.next) {
                frame.next += 1;
                if disc[v] == UNVISITED {
                    frame.children += 1;
                    parent[v] = Some(u);
                    disc[v] = time;
                    low[v] = time;
                    time += 1;
                    stack.push(Frame {
                        node: v,
                        next: 0,
                        children: 0,
                    });
                } else if parent[u] != Some(v) {
                    low[u] = low[u].min(disc[v]);
                }
                continue;
            }

            let children = frame.children;
            stack.pop();
            match parent[u] {
                None => {
                    if children > 1 {
                        is_cut[u] = true;
                    }
                }
                Some(p) => {
                    low[p] = low[p].min(low[u]);
                    if parent[p].is_some() && low[u] >= disc[p] {
                        is_cut[p] = true;
                    }
                    if low[u] > disc[p] {
                        bridges.push(Edge::new(p, u));
                    }
                }
            }
        }
    }

    CutAnalysis {
        bridges,
        articulation_points: (0..node_count).filter(|&i| is_cut[i]).collect(),
    }
}

/// Every pair of edge indices `(i, j)` with `i < j` whose joint removal
/// disconnects the graph. Quadratic in the edge count; meant for small maps
/// and diagnostics.
pub fn edge_cuts_of_size_two(node_count: usize, edges: &[Edge]) -> Vec<(usize, usize)> {
    let baseline = connected_components(node_count, edges);
    let mut cuts = Vec::new();
    let mut remaining = Vec::with_capacity(edges.len());

    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            remaining.clear();
            remaining.extend(
                edges
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != i && k != j)
                    .map(|(_, &e)| e),
            );
            if connected_components(node_count, &remaining) > baseline {
                cuts.push((i, j));
            }
        }
    }

    cuts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut edges: Vec<Edge>) -> Vec<Edge> {
        edges.sort();
        edges
    }

    #[test]
    fn path_graph_is_all_bridges() {
        let edges = [Edge(0, 1), Edge(1, 2), Edge(2, 3)];
        let cuts = bridges_and_articulation_points(4, &edges);
        assert_eq!(sorted(cuts.bridges), edges.to_vec());
        assert_eq!(cuts.articulation_points, vec![1, 2]);
    }

    #[test]
    fn cycle_has_no_cuts() {
        let edges = [Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(0, 3)];
        let cuts = bridges_and_articulation_points(4, &edges);
        assert!(cuts.bridges.is_empty());
        assert!(cuts.articulation_points.is_empty());
    }

    #[test]
    fn two_triangles_joined_by_a_bridge() {
        // 0-1-2 triangle, 3-4-5 triangle, bridge 2-3.
        let edges = [
            Edge(0, 1),
            Edge(1, 2),
            Edge(0, 2),
            Edge(2, 3),
            Edge(3, 4),
            Edge(4, 5),
            Edge(3, 5),
        ];
        let cuts = bridges_and_articulation_points(6, &edges);
        assert_eq!(cuts.bridges, vec![Edge(2, 3)]);
        assert_eq!(cuts.articulation_points, vec![2, 3]);
    }

    #[test]
    fn star_center_is_a_root_articulation_point() {
        let edges = [Edge(0, 1), Edge(0, 2), Edge(0, 3)];
        let cuts = bridges_and_articulation_points(4, &edges);
        assert_eq!(cuts.articulation_points, vec![0]);
        assert_eq!(cuts.bridges.len(), 3);
    }

    #[test]
    fn leaf_root_is_not_an_articulation_point() {
        // DFS starts at 0 which has a single child.
        let edges = [Edge(0, 1), Edge(1, 2), Edge(1, 3)];
        let cuts = bridges_and_articulation_points(4, &edges);
        assert_eq!(cuts.articulation_points, vec![1]);
    }

    #[test]
    fn every_bridge_increases_component_count() {
        let edges = vec![
            Edge(0, 1),
            Edge(1, 2),
            Edge(2, 0),
            Edge(2, 3),
            Edge(3, 4),
            Edge(4, 5),
            Edge(5, 3),
            Edge(5, 6),
        ];
        let cuts = bridges_and_articulation_points(7, &edges);
        assert_eq!(cuts.bridges.len(), 2);
        for bridge in &cuts.bridges {
            let without: Vec<Edge> = edges.iter().copied().filter(|e| e != bridge).collect();
            assert_eq!(connected_components(7, &without), 2);
        }
    }

    #[test]
    fn handles_long_paths_without_recursion() {
        let n = 50_000;
        let edges: Vec<Edge> = (0..n - 1).map(|i| Edge(i, i + 1)).collect();
        let cuts = bridges_and_articulation_points(n, &edges);
        assert_eq!(cuts.bridges.len(), n - 1);
        assert_eq!(cuts.articulation_points.len(), n - 2);
    }

    #[test]
    fn square_has_opposite_edge_cuts() {
        let edges = [Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(0, 3)];
        let cuts = edge_cuts_of_size_two(4, &edges);
        // Any two edges of a 4-cycle split it.
        assert_eq!(cuts.len(), 6);
    }

    #[test]
    fn triangle_with_tail_cuts_include_the_bridge() {
        let edges = [Edge(0, 1), Edge(1, 2), Edge(0, 2), Edge(2, 3)];
        let cuts = edge_cuts_of_size_two(4, &edges);
        // Any pair containing the bridge (index 3), and any two triangle edges.
        assert!(cuts.contains(&(0, 3)));
        assert!(cuts.contains(&(1, 3)));
        assert!(cuts.contains(&(2, 3)));
        assert!(cuts.contains(&(0, 1)));
        assert_eq!(cuts.len(), 6);
    }
}
