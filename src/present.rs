//! Turning a pipeline outcome into something a person can look at.

use image::imageops::FilterType;
use image::{GrayImage, RgbImage};

use crate::models::{Outcome, PlateReading};

pub const REPORT_HEADER: &str = "License Plate Recognition";
pub const NOT_DETECTED_MESSAGE: &str = "License plate contour not detected.";
pub const NOT_READABLE: &str = "Not readable";

/// Preview window sizes
pub const ORIGINAL_PREVIEW_SIZE: (u32, u32) = (500, 300);
pub const PLATE_PREVIEW_SIZE: (u32, u32) = (400, 200);

/// Standard-output text for an outcome, newline terminated.
pub fn report(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Recognized(reading) => format!(
            "\n{REPORT_HEADER}\nDetected license plate number: {}\n",
            plate_text(reading)
        ),
        Outcome::PlateNotDetected => format!("{NOT_DETECTED_MESSAGE}\n"),
    }
}

/// Single-line report for a failed run.
pub fn error_line(err: &dyn std::fmt::Display) -> String {
    format!(" Error: {err}")
}

fn plate_text(reading: &PlateReading) -> &str {
    if reading.is_readable() {
        &reading.text
    } else {
        NOT_READABLE
    }
}

/// Original (annotated) and plate crop at preview resolution.
pub fn preview_images(reading: &PlateReading) -> (RgbImage, GrayImage) {
    let (ow, oh) = ORIGINAL_PREVIEW_SIZE;
    let (pw, ph) = PLATE_PREVIEW_SIZE;
    let original = image::imageops::resize(&reading.annotated, ow, oh, FilterType::Triangle);
    let plate = image::imageops::resize(&reading.cropped, pw, ph, FilterType::Triangle);
    (original, plate)
}

/// Show the preview windows and block until they are closed.
#[cfg(feature = "display")]
pub fn display(reading: &PlateReading) {
    use image::DynamicImage;

    let (original, plate) = preview_images(reading);
    let original = DynamicImage::ImageRgb8(original).to_rgba8();
    let plate = DynamicImage::ImageLuma8(plate).to_rgba8();
    let (w, h) = ORIGINAL_PREVIEW_SIZE;
    imageproc::window::display_multiple_images(REPORT_HEADER, &[&original, &plate], w, h);
}

#[cfg(not(feature = "display"))]
pub fn display(_reading: &PlateReading) {
    tracing::warn!("built without the `display` feature; skipping image preview");
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::PlateContour;
    use imageproc::point::Point;

    fn reading(text: &str) -> PlateReading {
        let corners = [
            Point::new(1, 1),
            Point::new(8, 1),
            Point::new(8, 4),
            Point::new(1, 4),
        ];
        PlateReading {
            annotated: RgbImage::new(600, 400),
            plate: PlateContour::from_points(&corners).unwrap(),
            cropped: GrayImage::new(8, 4),
            text: text.to_string(),
        }
    }

    #[test]
    fn report_lines() {
        let found = Outcome::Recognized(reading("KA 01 AB 1234"));
        assert_eq!(
            report(&found),
            "\nLicense Plate Recognition\nDetected license plate number: KA 01 AB 1234\n"
        );

        let blank = Outcome::Recognized(reading(""));
        assert!(report(&blank).ends_with("Detected license plate number: Not readable\n"));

        assert_eq!(
            report(&Outcome::PlateNotDetected),
            "License plate contour not detected.\n"
        );
        assert_eq!(error_line(&"boom"), " Error: boom");
    }

    #[test]
    fn previews_have_fixed_sizes() {
        let (original, plate) = preview_images(&reading("X"));
        assert_eq!(original.dimensions(), (500, 300));
        assert_eq!(plate.dimensions(), (400, 200));
    }
}
