use image::GrayImage;
use imageproc::contours::find_contours as trace_borders;

use crate::detection::geometry;
use crate::models::{Contour, PlateContour};

/// Find every border in a binary edge image, outer and hole borders alike,
/// with straight runs compressed to their end points.
pub fn find_contours(edges: &GrayImage) -> Vec<Contour> {
    trace_borders::<i32>(edges)
        .into_iter()
        .map(|border| Contour::new(geometry::compress_chain(&border.points)))
        .collect()
}

/// Keep the `limit` largest contours by enclosed area, largest first.
///
/// The sort is stable, so contours of equal area stay in tracing order.
pub fn largest_contours(mut contours: Vec<Contour>, limit: usize) -> Vec<Contour> {
    contours.sort_by(|a, b| b.area().total_cmp(&a.area()));
    contours.truncate(limit);
    contours
}

/// Pick the plate outline from an edge map.
///
/// Walks the `max_candidates` largest contours in descending area and
/// returns the first whose polygon approximation (tolerance
/// `epsilon_ratio` x perimeter) has exactly four vertices.
pub fn find_plate_contour(
    edges: &GrayImage,
    max_candidates: usize,
    epsilon_ratio: f64,
) -> Option<PlateContour> {
    let all_contours = find_contours(edges);
    let total = all_contours.len();
    let candidates = largest_contours(all_contours, max_candidates);

    tracing::debug!(total, candidates = candidates.len(), "contours traced");

    for (rank, contour) in candidates.iter().enumerate() {
        let approx = contour.approximate(epsilon_ratio);
        tracing::trace!(
            rank,
            area = contour.area(),
            points = contour.len(),
            vertices = approx.len(),
            "candidate"
        );
        if let Some(plate) = PlateContour::from_points(&approx) {
            tracing::debug!(rank, area = contour.area(), corners = ?plate.corners(), "plate contour selected");
            return Some(plate);
        }
    }

    None
}
