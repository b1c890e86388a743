pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod present;

pub use error::{ErrorKind, LprError, OcrError};
pub use models::{Contour, Outcome, PlateContour, PlateReading};
pub use pipeline::{DebugConfig, PipelineConfig, PlatePipeline};
