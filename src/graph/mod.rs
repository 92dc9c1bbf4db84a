//! Pure graph algorithms over `Edge` lists: adjacency, connectivity,
//! minimum spanning trees, bridges and articulation points.

pub mod analysis;
pub mod mst;

use std::collections::VecDeque;

use crate::model::Edge;

pub use analysis::{CutAnalysis, bridges_and_articulation_points, edge_cuts_of_size_two};
pub use mst::{UnionFind, WeightedEdge, build_mst};

/// Undirected adjacency lists. Neighbor order follows edge order, which
/// keeps every traversal deterministic.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    pub fn from_edges(node_count: usize, edges: &[Edge]) -> Self {
        let mut neighbors = vec![Vec::new(); node_count];
        for &Edge(u, v) in edges {
            neighbors[u].push(v);
            neighbors[v].push(u);
        }
        Self { neighbors }
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }
}

/// Number of connected components (isolated nodes count as one each).
pub fn connected_components(node_count: usize, edges: &[Edge]) -> usize {
    let adjacency = Adjacency::from_edges(node_count, edges);
    let mut visited = vec![false; node_count];
    let mut components = 0;

    for start in 0..node_count {
        if visited[start] {
            continue;
        }
        components += 1;
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited[start] = true;
        while let Some(node) = queue.pop_front() {
            for &neighbor in adjacency.neighbors(node) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    components
}

pub fn is_connected(node_count: usize, edges: &[Edge]) -> bool {
    connected_components(node_count, edges) <= 1
}
