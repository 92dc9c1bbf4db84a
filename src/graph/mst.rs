use crate::model::{Edge, Point};

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Point every node on the walked path straight at the root.
        let mut node = index;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns `false` if they were already
    /// in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub edge: Edge,
    pub weight: f64,
}

/// Kruskal's minimum spanning tree (a forest if the candidates do not
/// connect every point). Weight is the Euclidean length of the edge.
///
/// Candidates are ordered by `(weight, edge)`, so equal-length edges are
/// decided by their endpoint pair and the result does not depend on the
/// order of `candidates`.
pub fn build_mst(points: &[Point], candidates: &[Edge]) -> Vec<WeightedEdge> {
    let mut weighted: Vec<WeightedEdge> = candidates
        .iter()
        .map(|&e| {
            let edge = Edge::new(e.0, e.1);
            WeightedEdge {
                edge,
                weight: points[edge.0].distance(points[edge.1]),
            }
        })
        .collect();
    weighted.sort_by(|a, b| a.weight.total_cmp(&b.weight).then(a.edge.cmp(&b.edge)));

    let mut sets = UnionFind::new(points.len());
    let mut tree = Vec::with_capacity(points.len().saturating_sub(1));
    for candidate in weighted {
        if sets.union(candidate.edge.0, candidate.edge.1) {
            tree.push(candidate);
        }
    }
    tree
}
