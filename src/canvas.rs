//! Drawing primitives and the sinks that consume them
//!
//! Every generator replays its geometry into a [`Canvas`]. Coordinates are
//! logical pixels on a fixed 800x600 surface; sinks scale as they see fit.

use serde::{Deserialize, Serialize};

/// Logical canvas width shared by all generators
pub const CANVAS_WIDTH: f64 = 800.0;
/// Logical canvas height shared by all generators
pub const CANVAS_HEIGHT: f64 = 600.0;

/// A point on the logical canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point reached by walking `length` along `angle` (radians)
    pub fn polar(self, length: f64, angle: f64) -> Self {
        Self::new(self.x + length * angle.cos(), self.y + length * angle.sin())
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Convert hue/saturation/brightness (all 0.0-1.0, hue wraps) to RGB
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        if saturation <= 0.0 {
            let v = channel(brightness);
            return Rgb(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Rgb(channel(r), channel(g), channel(b))
    }

    /// Lighter variant of the color, used for ornaments
    pub fn brighter(self) -> Self {
        let lift = |c: u8| -> u8 {
            if c == 0 {
                3
            } else {
                ((c as f32 / 0.7) as u32).min(255) as u8
            }
        };
        Rgb(lift(self.0), lift(self.1), lift(self.2))
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width: f32,
    },
    Polygon {
        points: Vec<Point>,
        color: Rgb,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
}

/// Ordered sink for drawing primitives
pub trait Canvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: f32);
    fn fill_polygon(&mut self, points: &[Point], color: Rgb);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);
}

/// Canvas that keeps every primitive in order
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub primitives: Vec<Primitive>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn lines(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
            .count()
    }

    pub fn polygons(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Polygon { .. }))
            .count()
    }

    pub fn rects(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { .. }))
            .count()
    }

    /// Replay the recorded primitives into another canvas
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Line { from, to, color, width } => {
                    canvas.draw_line(*from, *to, *color, *width)
                }
                Primitive::Polygon { points, color } => canvas.fill_polygon(points, *color),
                Primitive::Rect { x, y, width, height, color } => {
                    canvas.fill_rect(*x, *y, *width, *height, *color)
                }
            }
        }
    }
}

impl Canvas for Recorder {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        self.primitives.push(Primitive::Line { from, to, color, width });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgb) {
        self.primitives.push(Primitive::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.primitives.push(Primitive::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

/// Canvas that discards everything (trace-only passes)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn draw_line(&mut self, _: Point, _: Point, _: Rgb, _: f32) {}
    fn fill_polygon(&mut self, _: &[Point], _: Rgb) {}
    fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: Rgb) {}
}

/// Small filled octagon standing in for a dot/leaf marker
pub fn dot(canvas: &mut dyn Canvas, center: Point, radius: f64, color: Rgb) {
    let points: Vec<Point> = (0..8)
        .map(|k| center.polar(radius, k as f64 * std::f64::consts::FRAC_PI_4))
        .collect();
    canvas.fill_polygon(&points, color);
}
