use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use image::{GrayImage, ImageFormat};

use crate::error::OcrError;

/// Page segmentation mode for sparse text with no layout assumption.
pub const PSM_SPARSE_TEXT: u8 = 11;

/// Anything that can turn a cropped plate into text.
pub trait TextRecognizer {
    /// Recognize the text in `plate`, trimmed. An empty string means nothing
    /// was readable and is not an error.
    fn recognize(&self, plate: &GrayImage) -> Result<String, OcrError>;

    /// Human-readable name for this engine (used in log output)
    fn name(&self) -> &str;
}

/// Where the Tesseract binary lives and how to drive it.
#[derive(Debug, Clone)]
pub struct TesseractConfig {
    /// Executable path, or a bare name resolved through `PATH`
    pub executable: PathBuf,
    pub page_segmentation_mode: u8,
    /// Language passed as `-l`; the engine default when `None`
    pub language: Option<String>,
}

impl TesseractConfig {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("tesseract"),
            page_segmentation_mode: PSM_SPARSE_TEXT,
            language: None,
        }
    }
}

/// Tesseract run as a child process, image on stdin and text on stdout.
#[derive(Debug, Clone)]
pub struct Tesseract {
    config: TesseractConfig,
}

impl Tesseract {
    pub fn new(config: TesseractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TesseractConfig {
        &self.config
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.arg("stdin")
            .arg("stdout")
            .arg("--psm")
            .arg(self.config.page_segmentation_mode.to_string());
        if let Some(language) = &self.config.language {
            cmd.arg("-l").arg(language);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl TextRecognizer for Tesseract {
    fn recognize(&self, plate: &GrayImage) -> Result<String, OcrError> {
        let png = encode_png(plate)?;

        let mut child = self.command().spawn().map_err(|source| OcrError::Unavailable {
            executable: self.config.executable.clone(),
            source,
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&png) {
                // the engine may stop reading early; its exit status tells the rest
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                other => other.map_err(OcrError::Io)?,
            }
        }

        let output = child.wait_with_output().map_err(OcrError::Io)?;
        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(engine = self.name(), chars = text.chars().count(), "OCR finished");
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

fn encode_png(img: &GrayImage) -> Result<Vec<u8>, OcrError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(OcrError::Encode)?;
    Ok(buf.into_inner())
}
