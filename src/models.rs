use image::{GrayImage, RgbImage};
use imageproc::geometry::{arc_length, contour_area};
use imageproc::point::Point;

use crate::detection::geometry;

/// A closed boundary traced in an edge map.
#[derive(Debug, Clone)]
pub struct Contour {
    points: Vec<Point<i32>>,
    /// Enclosed area (shoelace), cached for sorting
    area: f64,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        let area = contour_area(&points);
        Self { points, area }
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn perimeter(&self) -> f64 {
        arc_length(&self.points, true)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Simplify the boundary with a tolerance of `epsilon_ratio` times its perimeter.
    pub fn approximate(&self, epsilon_ratio: f64) -> Vec<Point<i32>> {
        let epsilon = epsilon_ratio * self.perimeter();
        geometry::approximate_polygon(&self.points, epsilon)
    }
}

/// The selected plate outline: always exactly four vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateContour {
    corners: [Point<i32>; 4],
}

impl PlateContour {
    /// Returns `None` unless `points` has exactly four vertices and is not
    /// explicitly closed (first == last).
    pub fn from_points(points: &[Point<i32>]) -> Option<Self> {
        match points {
            [a, b, c, d] if a != d => Some(Self {
                corners: [*a, *b, *c, *d],
            }),
            _ => None,
        }
    }

    pub fn corners(&self) -> &[Point<i32>; 4] {
        &self.corners
    }

    pub fn area(&self) -> f64 {
        contour_area(&self.corners)
    }
}

/// Everything produced by a run that found a plate.
#[derive(Debug, Clone)]
pub struct PlateReading {
    /// Working-resolution input with the plate outline drawn on it
    pub annotated: RgbImage,
    pub plate: PlateContour,
    /// Grayscale crop of the plate's bounding box
    pub cropped: GrayImage,
    /// OCR output, trimmed; empty when nothing was readable
    pub text: String,
}

impl PlateReading {
    pub fn is_readable(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Terminal state of one pipeline run.
#[derive(Debug, Clone)]
pub enum Outcome {
    Recognized(PlateReading),
    PlateNotDetected,
}

impl Outcome {
    pub fn reading(&self) -> Option<&PlateReading> {
        match self {
            Outcome::Recognized(reading) => Some(reading),
            Outcome::PlateNotDetected => None,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Outcome::Recognized(_))
    }
}
