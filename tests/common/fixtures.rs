#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use platescan::OcrError;
use platescan::detection::TextRecognizer;
use tempfile::NamedTempFile;

/// Where the plate sits in [`synthetic_car`], as (x, y, width, height).
pub const PLATE_RECT: (i32, i32, u32, u32) = (200, 250, 200, 60);

/// Saves `img` as a PNG temp file, removed when dropped.
pub fn save_png(img: &RgbImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// A 600x400 "photo": light background, dark eight-sided car body, and a
/// white plate with dark glyphs on it. By enclosed area the plate is the
/// third contour (after the car body's outer and inner borders).
pub fn synthetic_car() -> RgbImage {
    let mut img = RgbImage::from_pixel(600, 400, Rgb([200, 200, 200]));

    let body = [
        Point::new(60, 150),
        Point::new(160, 90),
        Point::new(440, 90),
        Point::new(540, 150),
        Point::new(580, 260),
        Point::new(520, 360),
        Point::new(80, 360),
        Point::new(20, 260),
    ];
    draw_polygon_mut(&mut img, &body, Rgb([40, 40, 40]));

    let (x, y, w, h) = PLATE_RECT;
    draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(w, h), Rgb([250, 250, 250]));
    for i in 0..6 {
        let glyph = Rect::at(x + 15 + 30 * i, y + 15).of_size(14, 30);
        draw_filled_rect_mut(&mut img, glyph, Rgb([20, 20, 20]));
    }

    img
}

/// Flat image with no edges at all.
pub fn uniform_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
}

/// Binary edge map of the given size, all background.
pub fn blank_edges(width: u32, height: u32) -> GrayImage {
    GrayImage::new(width, height)
}

pub const EDGE: Luma<u8> = Luma([255]);

/// Recognizer that always answers with the same text and counts its calls.
#[derive(Clone, Default)]
pub struct FixedText {
    pub text: String,
    pub calls: Rc<Cell<usize>>,
}

impl FixedText {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl TextRecognizer for FixedText {
    fn recognize(&self, _plate: &GrayImage) -> Result<String, OcrError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.text.trim().to_string())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Writes an executable stand-in for the OCR engine that swallows stdin,
/// prints `stdout` and exits with `exit_code`.
#[cfg(unix)]
pub fn fake_tesseract(dir: &Path, stdout: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-tesseract");
    let script = format!(
        "#!/bin/sh\ncat > /dev/null\nprintf '%s' '{}'\necho 'engine says no' >&2\nexit {}\n",
        stdout, exit_code
    );
    std::fs::write(&path, script).expect("Failed to write fake engine");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to mark fake engine executable");

    // a concurrently forked test process can briefly hold the script open for
    // writing (ETXTBSY); wait until it runs
    for _ in 0..20 {
        match std::process::Command::new(&path)
            .stdin(std::process::Stdio::null())
            .output()
        {
            Err(e) if e.raw_os_error() == Some(26) => {
                std::thread::sleep(std::time::Duration::from_millis(25))
            }
            _ => break,
        }
    }
    path
}
