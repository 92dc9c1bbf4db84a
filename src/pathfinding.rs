use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::Adjacency;
use crate::model::MapLayout;

/// Entry in the open set. Ordered as a min-heap on `f`, then on insertion
/// sequence so equal scores pop first-in first-out.
struct OpenEntry {
    node: usize,
    g: u32,
    f: f64,
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: smallest f is "greatest".
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A* route between two points of a layout, start and end inclusive.
///
/// Every hop costs 1 while the heuristic is the straight-line distance to
/// `end`. The heuristic is only admissible when edges are at most one unit
/// long, so on real layouts (edges of 70-120 units) the search behaves close
/// to greedy best-first and may return a route with more hops than the
/// minimum. This is the accepted approximation; on unit-spaced graphs the
/// result is a fewest-hops path.
///
/// Returns `None` for out-of-range indices or when `end` is unreachable.
pub fn find_path(layout: &MapLayout, start: usize, end: usize) -> Option<Vec<usize>> {
    let n = layout.point_count();
    if start >= n || end >= n {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let adjacency = Adjacency::from_edges(n, &layout.edges);
    let heuristic = |node: usize| layout.points[node].distance(layout.points[end]);

    let mut g_score = vec![u32::MAX; n];
    let mut came_from: Vec<Option<usize>> = vec![None; n];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;

    g_score[start] = 0;
    open.push(OpenEntry {
        node: start,
        g: 0,
        f: heuristic(start),
        seq,
    });

    while let Some(current) = open.pop() {
        if current.node == end {
            return Some(reconstruct(&came_from, start, end));
        }
        // Stale entry: a cheaper route to this node was queued later.
        if current.g > g_score[current.node] {
            continue;
        }

        let tentative = current.g + 1;
        for &neighbor in adjacency.neighbors(current.node) {
            if tentative < g_score[neighbor] {
                g_score[neighbor] = tentative;
                came_from[neighbor] = Some(current.node);
                seq += 1;
                open.push(OpenEntry {
                    node: neighbor,
                    g: tentative,
                    f: f64::from(tentative) + heuristic(neighbor),
                    seq,
                });
            }
        }
    }

    None
}

fn reconstruct(came_from: &[Option<usize>], start: usize, end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match came_from[current] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::model::{Edge, Point};
    use crate::rng::WorldRng;
    use crate::worldgen::{LayoutConfig, generate_layout};

    /// `w` x `h` grid with unit spacing, some links removed.
    fn grid(w: usize, h: usize) -> MapLayout {
        let mut points = Vec::new();
        let mut edges = Vec::new();
        for y in 0..h {
            for x in 0..w {
                points.push(Point::new(x as f64, y as f64));
                let i = y * w + x;
                if x + 1 < w && !(x == 2 && y < h - 1) {
                    edges.push(Edge::new(i, i + 1));
                }
                if y + 1 < h {
                    edges.push(Edge::new(i, i + w));
                }
            }
        }
        MapLayout {
            points,
            edges,
            bridges: Vec::new(),
            articulation_points: Vec::new(),
        }
    }

    fn bfs_hops(layout: &MapLayout, start: usize, end: usize) -> Option<usize> {
        let adjacency = Adjacency::from_edges(layout.point_count(), &layout.edges);
        let mut dist = vec![usize::MAX; layout.point_count()];
        let mut queue = VecDeque::from([start]);
        dist[start] = 0;
        while let Some(u) = queue.pop_front() {
            for &v in adjacency.neighbors(u) {
                if dist[v] == usize::MAX {
                    dist[v] = dist[u] + 1;
                    queue.push_back(v);
                }
            }
        }
        (dist[end] != usize::MAX).then_some(dist[end])
    }

    fn assert_valid(layout: &MapLayout, path: &[usize], start: usize, end: usize) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for pair in path.windows(2) {
            assert!(layout.has_edge(pair[0], pair[1]), "no edge {pair:?}");
        }
    }

    #[test]
    fn same_start_and_end() {
        assert_eq!(find_path(&grid(3, 3), 4, 4), Some(vec![4]));
    }

    #[test]
    fn invalid_indices() {
        let layout = grid(3, 3);
        assert_eq!(find_path(&layout, 0, 9), None);
        assert_eq!(find_path(&layout, 12, 0), None);
    }

    #[test]
    fn unreachable_is_none() {
        let mut layout = grid(2, 1);
        layout.points.push(Point::new(5.0, 5.0));
        assert_eq!(find_path(&layout, 0, 2), None);
    }

    #[test]
    fn fewest_hops_on_unit_grid() {
        let layout = grid(6, 5);
        let n = layout.point_count();
        for start in 0..n {
            for end in 0..n {
                let path = find_path(&layout, start, end).unwrap();
                assert_valid(&layout, &path, start, end);
                assert_eq!(Some(path.len() - 1), bfs_hops(&layout, start, end));
            }
        }
    }

    #[test]
    fn detours_around_a_wall() {
        // Column links at x=2 are cut except on the last row.
        let layout = grid(5, 4);
        let path = find_path(&layout, 0, 4).unwrap();
        assert_valid(&layout, &path, 0, 4);
        assert_eq!(path.len() - 1, 10);
    }

    #[test]
    fn valid_routes_on_generated_layouts() {
        let mut rng = WorldRng::from_seed(17);
        let layout = generate_layout(&LayoutConfig::local(), &mut rng).unwrap();
        let last = layout.point_count() - 1;
        for end in 0..=last {
            let path = find_path(&layout, 0, end).unwrap();
            assert_valid(&layout, &path, 0, end);
            let unique: std::collections::HashSet<_> = path.iter().collect();
            assert_eq!(unique.len(), path.len(), "path revisits a point");
        }
    }
}
