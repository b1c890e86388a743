use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};

use crate::error::{LprError, Result};
use crate::models::PlateContour;

/// Inclusive pixel bounds of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Mask of the plate interior: 255 inside (border included), 0 elsewhere.
pub fn plate_mask(width: u32, height: u32, plate: &PlateContour) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    draw_polygon_mut(&mut mask, plate.corners(), Luma([255u8]));
    mask
}

/// Bounding box of the set pixels in `mask`, or `None` if no pixel is set.
pub fn mask_bounds(mask: &GrayImage) -> Option<PixelBounds> {
    mask.enumerate_pixels()
        .filter(|(_, _, pixel)| pixel[0] != 0)
        .fold(None, |bounds, (x, y, _)| {
            Some(match bounds {
                None => PixelBounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => PixelBounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            })
        })
}

/// Crop the grayscale image to the bounding box of the plate's mask.
pub fn extract_plate_region(gray: &GrayImage, plate: &PlateContour) -> Result<GrayImage> {
    let (width, height) = gray.dimensions();
    let mask = plate_mask(width, height, plate);
    let bounds = mask_bounds(&mask).ok_or(LprError::EmptyRegion)?;
    crop_to_bounds(gray, bounds)
}

/// Crop `gray` to `bounds`, inclusive of the max edge.
pub fn crop_to_bounds(gray: &GrayImage, bounds: PixelBounds) -> Result<GrayImage> {
    let (width, height) = gray.dimensions();
    if bounds.max_x >= width
        || bounds.max_y >= height
        || bounds.min_x > bounds.max_x
        || bounds.min_y > bounds.max_y
    {
        return Err(LprError::EmptyRegion);
    }
    tracing::debug!(?bounds, "cropping plate region");
    Ok(image::imageops::crop_imm(
        gray,
        bounds.min_x,
        bounds.min_y,
        bounds.width(),
        bounds.height(),
    )
    .to_image())
}

/// Draw the plate outline onto `img` as a closed line `thickness` pixels wide.
pub fn annotate_plate(img: &mut RgbImage, plate: &PlateContour, color: Rgb<u8>, thickness: u32) {
    let corners = plate.corners();
    let half = (thickness / 2) as i32;

    for (i, start) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        for oy in -half..=half {
            for ox in -half..=half {
                draw_line_segment_mut(
                    img,
                    ((start.x + ox) as f32, (start.y + oy) as f32),
                    ((end.x + ox) as f32, (end.y + oy) as f32),
                    color,
                );
            }
        }
    }
}
