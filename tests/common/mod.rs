mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from platescan for tests
pub use platescan::detection::{Tesseract, TesseractConfig, TextRecognizer};
pub use platescan::{ErrorKind, LprError, OcrError, Outcome, PlateContour, PlatePipeline};
