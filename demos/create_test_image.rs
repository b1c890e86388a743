use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "test_car.png".to_string());
    let mut img = RgbImage::new(1200, 800);

    // Sky-to-road gradient
    for y in 0..800 {
        for x in 0..1200 {
            let shade = (160 + y * 60 / 800) as u8;
            img.put_pixel(x, y, Rgb([shade, shade, (shade as u32 + x * 20 / 1200) as u8]));
        }
    }

    let body = [
        Point::new(120, 300),
        Point::new(320, 180),
        Point::new(880, 180),
        Point::new(1080, 300),
        Point::new(1160, 520),
        Point::new(1040, 720),
        Point::new(160, 720),
        Point::new(40, 520),
    ];
    draw_polygon_mut(&mut img, &body, Rgb([30, 45, 90]));

    draw_filled_rect_mut(&mut img, Rect::at(400, 500).of_size(400, 120), Rgb([245, 245, 240]));
    for i in 0..6 {
        let glyph = Rect::at(430 + 60 * i, 530).of_size(28, 60);
        draw_filled_rect_mut(&mut img, glyph, Rgb([15, 15, 15]));
    }

    img.save(&path)?;
    println!("Created {path} (1200x800 synthetic car with plate)");
    Ok(())
}
