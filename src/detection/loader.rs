use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader};

use crate::error::{LprError, Result};

/// Read the image at `path` and stretch it to exactly `width` x `height`.
pub fn load_image(path: &Path, width: u32, height: u32) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(LprError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let decode_err = |source: ImageError| LprError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "image decoded"
    );

    Ok(img.resize_exact(width, height, FilterType::Triangle))
}
