pub mod loader;
pub mod preprocessing;
pub mod geometry;
pub mod contours;
pub mod region;
pub mod ocr;

pub use contours::find_plate_contour;
pub use loader::load_image;
pub use ocr::{Tesseract, TesseractConfig, TextRecognizer};
pub use region::extract_plate_region;
