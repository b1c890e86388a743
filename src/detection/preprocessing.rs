use image::{DynamicImage, GrayImage, Luma};
use imageproc::edges::canny;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Edge-preserving smoothing.
///
/// Each output pixel is a weighted mean over a circular neighbourhood of the
/// given `diameter`, weighted by both spatial distance (`sigma_space`) and
/// intensity difference (`sigma_color`). Borders are replicated.
///
/// `imageproc::filter::bilateral_filter` is not used: it averages over a
/// square window, quantizes range weights relative to the image maximum and
/// panics on an empty image.
pub fn bilateral_filter(
    img: &GrayImage,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }
    let radius = (diameter / 2).max(1) as i32;

    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let color_coeff = -0.5 / (sigma_color * sigma_color);

    // (dx, dy, spatial weight) for every offset inside the circular window
    let mut window = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2 > (radius * radius) as f32 {
                continue;
            }
            window.push((dx, dy, (r2 * space_coeff).exp()));
        }
    }

    let color_weight: Vec<f32> = (0..256)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let max_x = width as i32 - 1;
    let max_y = height as i32 - 1;
    let mut output = GrayImage::new(width, height);

    for (x, y, out) in output.enumerate_pixels_mut() {
        let center = img.get_pixel(x, y)[0] as i32;
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;

        for &(dx, dy, space_weight) in &window {
            let nx = (x as i32 + dx).clamp(0, max_x) as u32;
            let ny = (y as i32 + dy).clamp(0, max_y) as u32;
            let value = img.get_pixel(nx, ny)[0] as i32;
            let weight = space_weight * color_weight[(value - center).unsigned_abs() as usize];
            sum += value as f32 * weight;
            weight_sum += weight;
        }

        // the centre always contributes weight 1, so weight_sum > 0
        *out = Luma([(sum / weight_sum).round().clamp(0.0, 255.0) as u8]);
    }

    output
}

/// Detect edges using Canny edge detector.
///
/// `canny` smooths with its own Gaussian (sigma 1.4) before taking gradients.
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}
