use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Undirected edge between two point indices, stored with the smaller index
/// first. Serializes as `[u, v]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        if u <= v { Edge(u, v) } else { Edge(v, u) }
    }

    pub fn connects(self, u: usize, v: usize) -> bool {
        self == Edge::new(u, v)
    }

    pub fn touches(self, node: usize) -> bool {
        self.0 == node || self.1 == node
    }
}

/// Point/edge topology of one map plus its connectivity weak spots.
///
/// Invariants: every edge endpoint indexes `points`; `bridges` is a subset
/// of `edges`; `edges` connect all points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
    pub bridges: Vec<Edge>,
    pub articulation_points: Vec<usize>,
}

impl MapLayout {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_length(&self, edge: Edge) -> f64 {
        self.points[edge.0].distance(self.points[edge.1])
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.edges.iter().any(|e| e.connects(u, v))
    }
}
