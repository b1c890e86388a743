use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb};

use crate::detection::ocr::TextRecognizer;
use crate::detection::{contours, loader, preprocessing, region};
use crate::error::{LprError, Result};
use crate::models::{Outcome, PlateReading};

/// Tunable constants of the detection pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Working resolution every input is stretched to
    pub canonical_width: u32,
    pub canonical_height: u32,
    pub bilateral_diameter: u32,
    pub bilateral_sigma_color: f32,
    pub bilateral_sigma_space: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// How many of the largest contours are tried as plate candidates
    pub max_candidates: usize,
    /// Polygon approximation tolerance as a fraction of contour perimeter
    pub epsilon_ratio: f64,
    pub outline_color: Rgb<u8>,
    pub outline_thickness: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canonical_width: 600,
            canonical_height: 400,
            bilateral_diameter: 13,
            bilateral_sigma_color: 15.0,
            bilateral_sigma_space: 15.0,
            canny_low: 30.0,
            canny_high: 200.0,
            max_candidates: 10,
            epsilon_ratio: 0.018,
            outline_color: Rgb([255, 0, 0]),
            outline_thickness: 3,
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// Save one stage's image as `<NN>_<stage>/01.png`.
    fn save(&self, index: usize, stage: &str, img: &DynamicImage) -> Result<()> {
        let step_dir = self.output_dir.join(format!(
            "{:02}_{}",
            index,
            stage.to_lowercase().replace(' ', "_")
        ));
        let output_path = step_dir.join("01.png");
        let fail = |message: String| LprError::DebugOutput {
            path: output_path.clone(),
            message,
        };

        std::fs::create_dir_all(&step_dir).map_err(|e| fail(e.to_string()))?;
        img.save(&output_path).map_err(|e| fail(e.to_string()))?;

        tracing::debug!(path = %output_path.display(), "debug image saved");
        Ok(())
    }
}

/// Load → preprocess → contour search → crop → OCR, for one photograph.
pub struct PlatePipeline {
    config: PipelineConfig,
    recognizer: Box<dyn TextRecognizer>,
    debug: Option<DebugConfig>,
}

impl PlatePipeline {
    pub fn new(recognizer: Box<dyn TextRecognizer>) -> Self {
        Self {
            config: PipelineConfig::default(),
            recognizer,
            debug: None,
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> anyhow::Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                anyhow::bail!("Debug directory is not empty: {}", output_dir.display());
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the whole pipeline on the image file at `path`.
    pub fn run(&self, path: &Path) -> Result<Outcome> {
        let cfg = &self.config;
        let image = loader::load_image(path, cfg.canonical_width, cfg.canonical_height)?;
        self.run_image(image)
    }

    /// Run every stage after loading on an already decoded image.
    ///
    /// The image is stretched to the working resolution first if needed.
    pub fn run_image(&self, image: DynamicImage) -> Result<Outcome> {
        let cfg = &self.config;
        let (width, height) = (cfg.canonical_width, cfg.canonical_height);
        let image = if image.width() != width || image.height() != height {
            image.resize_exact(width, height, image::imageops::FilterType::Triangle)
        } else {
            image
        };
        self.checkpoint(0, "input", || image.clone())?;

        tracing::debug!("converting to grayscale");
        let gray = preprocessing::to_grayscale(&image);
        self.checkpoint(1, "grayscale", || DynamicImage::ImageLuma8(gray.clone()))?;

        tracing::debug!(
            diameter = cfg.bilateral_diameter,
            sigma_color = cfg.bilateral_sigma_color,
            sigma_space = cfg.bilateral_sigma_space,
            "applying bilateral filter"
        );
        let gray = preprocessing::bilateral_filter(
            &gray,
            cfg.bilateral_diameter,
            cfg.bilateral_sigma_color,
            cfg.bilateral_sigma_space,
        );
        self.checkpoint(2, "bilateral filter", || DynamicImage::ImageLuma8(gray.clone()))?;

        tracing::debug!(low = cfg.canny_low, high = cfg.canny_high, "detecting edges");
        let edges = preprocessing::detect_edges(&gray, cfg.canny_low, cfg.canny_high);
        self.checkpoint(3, "edge detection", || DynamicImage::ImageLuma8(edges.clone()))?;

        let Some(plate) = contours::find_plate_contour(&edges, cfg.max_candidates, cfg.epsilon_ratio)
        else {
            tracing::info!("no four-sided contour among the largest candidates");
            return Ok(Outcome::PlateNotDetected);
        };

        let mut annotated = image.to_rgb8();
        region::annotate_plate(&mut annotated, &plate, cfg.outline_color, cfg.outline_thickness);
        self.checkpoint(4, "plate annotation", || DynamicImage::ImageRgb8(annotated.clone()))?;

        let cropped = region::extract_plate_region(&gray, &plate)?;
        self.checkpoint(5, "plate crop", || DynamicImage::ImageLuma8(cropped.clone()))?;

        tracing::debug!(
            engine = self.recognizer.name(),
            width = cropped.width(),
            height = cropped.height(),
            "running OCR"
        );
        let text = self.recognizer.recognize(&cropped)?;

        Ok(Outcome::Recognized(PlateReading {
            annotated,
            plate,
            cropped,
            text,
        }))
    }

    /// Save an intermediate image when debug output is on. The image is only
    /// built when it will actually be written.
    fn checkpoint(
        &self,
        index: usize,
        stage: &str,
        img: impl FnOnce() -> DynamicImage,
    ) -> Result<()> {
        match &self.debug {
            Some(debug) => debug.save(index, stage, &img()),
            None => Ok(()),
        }
    }
}
