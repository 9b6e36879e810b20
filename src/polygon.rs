//! Self-similar nested regular polygons

use crate::canvas::{Canvas, Point, Rgb};
use crate::config::PolygonConfig;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

const CENTER: Point = Point::new(400.0, 300.0);
const INITIAL_RADIUS: f64 = 150.0;
/// Polygons smaller than this are never drawn
pub const MIN_RADIUS: f64 = 2.0;

/// Number of polygons in a full tree: `(sides^(depth+1) - 1) / (sides - 1)`
pub fn complexity(sides: u32, depth: u32) -> u64 {
    if sides <= 1 {
        return 0;
    }
    let sides = sides as u64;
    let total = sides
        .checked_pow(depth.saturating_add(1))
        .map(|n| n - 1)
        .unwrap_or(u64::MAX);
    total / (sides - 1)
}

/// Vertices of a regular polygon, first vertex straight up
pub fn vertices(center: Point, radius: f64, sides: u32) -> Vec<Point> {
    let step = TAU / sides as f64;
    (0..sides)
        .map(|k| center.polar(radius, -FRAC_PI_2 + k as f64 * step))
        .collect()
}

pub fn render(config: &PolygonConfig, canvas: &mut dyn Canvas) -> String {
    let mut trace = String::new();
    let _ = writeln!(
        trace,
        "Recursive Polygon Fractal with {} sides, depth {}",
        config.sides, config.depth
    );

    if config.sides <= 1 {
        return trace;
    }

    let mut nest = Nest {
        config,
        canvas,
        per_depth: vec![0; config.depth as usize + 1],
    };
    nest.recurse(CENTER, INITIAL_RADIUS, config.depth);

    for (depth, count) in nest.per_depth.iter().enumerate().rev() {
        if *count > 0 {
            let _ = writeln!(trace, "  Depth {}: {} polygons", depth, count);
        }
    }
    let drawn: usize = nest.per_depth.iter().sum();
    let _ = writeln!(trace, "Total polygons drawn: {}", drawn);
    trace
}

struct Nest<'a> {
    config: &'a PolygonConfig,
    canvas: &'a mut dyn Canvas,
    per_depth: Vec<usize>,
}

impl Nest<'_> {
    fn recurse(&mut self, center: Point, radius: f64, depth: u32) {
        if depth == 0 || radius < MIN_RADIUS {
            return;
        }

        let hue = depth as f32 / self.config.depth as f32;
        let points = vertices(center, radius, self.config.sides);
        self.canvas
            .fill_polygon(&points, Rgb::from_hsb(hue, 0.6, 1.0));
        self.per_depth[depth as usize] += 1;

        for vertex in points {
            self.recurse(vertex, radius * self.config.scale_factor, depth - 1);
        }
    }
}
