use crate::canvas::{Canvas, Point, Rgb, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::ArtError;
use image::{Rgb as Pixel, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point as IPoint;
use imageproc::rect::Rect;
use std::path::Path;

/// Raster canvas backed by an 800x600 RGB image on a white background
pub struct PngCanvas {
    image: RgbImage,
}

impl Default for PngCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PngCanvas {
    pub fn new() -> Self {
        let image = RgbImage::from_pixel(
            CANVAS_WIDTH as u32,
            CANVAS_HEIGHT as u32,
            pixel(Rgb::WHITE),
        );
        Self { image }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Write the image; the format follows the file extension
    pub fn save(&self, path: &Path) -> Result<(), ArtError> {
        self.image.save(path)?;
        tracing::info!(path = %path.display(), "wrote image");
        Ok(())
    }
}

fn pixel(color: Rgb) -> Pixel<u8> {
    Pixel([color.0, color.1, color.2])
}

impl Canvas for PngCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        let color = pixel(color);
        let (dx, dy) = ((to.x - from.x) as f32, (to.y - from.y) as f32);
        let len = (dx * dx + dy * dy).sqrt();
        // Unit normal; a zero-length segment has none and is drawn once
        let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };

        let strokes = width.max(1.0).round() as i32;
        for k in 0..strokes {
            let offset = k as f32 - (strokes - 1) as f32 / 2.0;
            draw_line_segment_mut(
                &mut self.image,
                (from.x as f32 + nx * offset, from.y as f32 + ny * offset),
                (to.x as f32 + nx * offset, to.y as f32 + ny * offset),
                color,
            );
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgb) {
        let mut poly: Vec<IPoint<i32>> = Vec::with_capacity(points.len());
        for p in points {
            let q = IPoint::new(p.x.round() as i32, p.y.round() as i32);
            if poly.last() != Some(&q) {
                poly.push(q);
            }
        }
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }

        match poly.len() {
            0 => {}
            1 | 2 => {
                let (a, b) = (poly[0], poly[poly.len() - 1]);
                draw_line_segment_mut(
                    &mut self.image,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    pixel(color),
                );
            }
            _ => draw_polygon_mut(&mut self.image, &poly, pixel(color)),
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let w = width.round().max(1.0) as u32;
        let h = height.round().max(1.0) as u32;
        draw_filled_rect_mut(
            &mut self.image,
            Rect::at(x.round() as i32, y.round() as i32).of_size(w, h),
            pixel(color),
        );
    }
}
