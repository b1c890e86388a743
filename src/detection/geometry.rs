//! Polygon helpers used by the contour selector.
//!
//! All functions treat their input as a closed polygon: the last point
//! connects back to the first.

use imageproc::point::Point;

/// Drop interior points of straight horizontal, vertical and diagonal runs,
/// keeping only the points where the direction changes.
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());

    let compressed: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let here = points[i];
            let next = points[(i + 1) % n];
            step(prev, here) != step(here, next)
        })
        .map(|i| points[i])
        .collect();

    if compressed.is_empty() {
        // every point on one straight loop, only possible for degenerate input
        points[..1].to_vec()
    } else {
        compressed
    }
}

/// Rounds of the farthest-point search used to pick the split pair.
const SPLIT_SEARCH_ROUNDS: usize = 3;

/// Closed Ramer-Douglas-Peucker simplification.
///
/// The curve is split between two roughly antipodal points, found by
/// repeatedly jumping to the point farthest from the current one, and both
/// halves are simplified independently. Distances are measured from each
/// half's own chord, so where the trace happens to start does not matter.
pub fn approximate_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let Some((from, to)) = split_pair(points) else {
        return vec![points[0]];
    };

    let rotated: Vec<Point<i32>> = points[from..].iter().chain(&points[..from]).copied().collect();
    let split = (to + n - from) % n;

    let mut result = Vec::new();
    simplify_chain(&rotated[..=split], epsilon, &mut result);

    let mut tail = rotated[split..].to_vec();
    tail.push(rotated[0]);
    simplify_chain(&tail, epsilon, &mut result);

    result
}

/// Two far-apart point indices, or `None` if every point coincides.
fn split_pair(points: &[Point<i32>]) -> Option<(usize, usize)> {
    let farthest_from = |origin: usize| {
        points
            .iter()
            .enumerate()
            .fold((origin, 0.0), |best, (i, p)| {
                let d = distance(points[origin], *p);
                if d > best.1 { (i, d) } else { best }
            })
            .0
    };

    let (mut from, mut to) = (0, farthest_from(0));
    if to == from {
        return None;
    }
    for _ in 1..SPLIT_SEARCH_ROUNDS {
        let next = farthest_from(to);
        if next == from {
            break;
        }
        (from, to) = (to, next);
    }
    Some((from, to))
}

/// Simplify an open chain, pushing every kept point except the chain's last.
fn simplify_chain(chain: &[Point<i32>], epsilon: f64, out: &mut Vec<Point<i32>>) {
    let last = chain.len() - 1;
    let mut keep = vec![false; chain.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (index, dist) = (start + 1..end)
            .map(|i| (i, segment_distance(chain[i], chain[start], chain[end])))
            .fold((start, -1.0), |best, candidate| {
                if candidate.1 > best.1 { candidate } else { best }
            });
        if dist > epsilon {
            keep[index] = true;
            stack.push((start, index));
            stack.push((index, end));
        }
    }

    out.extend(
        chain[..last]
            .iter()
            .zip(&keep)
            .filter(|(_, kept)| **kept)
            .map(|(p, _)| *p),
    );
}

fn distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Distance from `p` to the line through `a` and `b` (to `a` if they coincide).
fn segment_distance(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return distance(p, a);
    }
    ((p.x - a.x) as f64 * dy - (p.y - a.y) as f64 * dx).abs() / len
}
