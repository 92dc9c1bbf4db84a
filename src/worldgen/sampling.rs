use std::f64::consts::{SQRT_2, TAU};

use crate::model::Point;
use crate::rng::WorldRng;

use super::config::LayoutConfig;

/// Bridson's Poisson-disk sampling over `[0, width) x [0, height)`.
///
/// No two returned points are closer than `min_distance`. New samples are
/// spawned at a distance in `[min_distance, max_distance]` from an active
/// sample; a sample is retired after `max_tries` failed candidates.
pub fn poisson_disk(config: &LayoutConfig, rng: &mut WorldRng) -> Vec<Point> {
    let min = config.min_distance;
    if config.width <= 0.0 || config.height <= 0.0 || min <= 0.0 {
        return Vec::new();
    }
    let max = config.max_distance.max(min);

    // Cell size min/sqrt(2) holds at most one sample per cell.
    let cell = min / SQRT_2;
    let cols = (config.width / cell).ceil() as usize + 1;
    let rows = (config.height / cell).ceil() as usize + 1;
    let mut grid: Vec<Option<usize>> = vec![None; cols * rows];
    let cell_of = |p: Point| ((p.x / cell) as usize, (p.y / cell) as usize);

    let mut points: Vec<Point> = Vec::new();
    let mut active: Vec<usize> = Vec::new();

    let first = Point::new(rng.random() * config.width, rng.random() * config.height);
    let (cx, cy) = cell_of(first);
    grid[cy * cols + cx] = Some(0);
    points.push(first);
    active.push(0);

    while let Some(slot) = rng.pick_index(active.len()) {
        let origin = points[active[slot]];
        let mut placed = false;

        for _ in 0..config.max_tries {
            let angle = rng.random() * TAU;
            let radius = min + rng.random() * (max - min);
            let candidate = Point::new(
                origin.x + radius * angle.cos(),
                origin.y + radius * angle.sin(),
            );
            if candidate.x < 0.0
                || candidate.y < 0.0
                || candidate.x >= config.width
                || candidate.y >= config.height
            {
                continue;
            }

            let (gx, gy) = cell_of(candidate);
            let crowded = (gy.saturating_sub(2)..=(gy + 2).min(rows - 1)).any(|y| {
                (gx.saturating_sub(2)..=(gx + 2).min(cols - 1)).any(|x| {
                    grid[y * cols + x].is_some_and(|i| points[i].distance(candidate) < min)
                })
            });
            if crowded {
                continue;
            }

            let index = points.len();
            grid[gy * cols + gx] = Some(index);
            points.push(candidate);
            active.push(index);
            placed = true;
            break;
        }

        if !placed {
            active.swap_remove(slot);
        }
    }

    points
}
