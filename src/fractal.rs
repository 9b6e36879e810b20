//! Branching fractals: binary tree, Sierpinski triangle and Koch snowflake
//!
//! All three share the same shape: a pure recursion on depth that bottoms out
//! at zero, emitting either along the way (tree) or at the leaves.

use crate::canvas::{Canvas, Point, Rgb};
use crate::config::{FractalConfig, FractalKind};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6};
use std::fmt::Write;

/// Angle between a branch and each of its side children
const BRANCH_SPREAD: f64 = 0.4;
/// Depth above which the tree grows a third, straight child
const MIDDLE_BRANCH_DEPTH: u32 = 3;
/// Length factor for the straight child
const MIDDLE_BRANCH_SCALE: f64 = 0.8;

const TREE_ROOT: Point = Point::new(400.0, 550.0);
const TREE_TRUNK: f64 = 100.0;
const SIERPINSKI: [Point; 3] = [
    Point::new(200.0, 500.0),
    Point::new(600.0, 500.0),
    Point::new(400.0, 100.0),
];
const KOCH_CENTER: Point = Point::new(400.0, 300.0);
const KOCH_SIZE: f64 = 200.0;

const SIERPINSKI_COLOR: Rgb = Rgb(0, 0, 255);
const KOCH_COLOR: Rgb = Rgb(100, 149, 237);

/// `C(0) = 1`, `C(d) = d + 2 * C(d - 1)`, whatever the fractal kind
pub fn complexity(iterations: u32) -> u64 {
    if iterations == 0 {
        return 1;
    }
    (iterations as u64).saturating_add(complexity(iterations - 1).saturating_mul(2))
}

/// Draw the fractal into `canvas` and return the trace of what was drawn
pub fn render(config: &FractalConfig, canvas: &mut dyn Canvas) -> String {
    let mut walker = Walker {
        scale: config.scale_factor,
        canvas,
        trace: String::new(),
    };
    let _ = writeln!(walker.trace, "=== Fractal Pattern ===");
    let _ = writeln!(walker.trace, "Type: {}", config.kind.name());
    let _ = writeln!(walker.trace, "Iterations: {}\n", config.iterations);

    match config.kind {
        FractalKind::Tree => walker.tree(TREE_ROOT, TREE_TRUNK, -FRAC_PI_2, config.iterations),
        FractalKind::Sierpinski => walker.sierpinski(SIERPINSKI, config.iterations),
        FractalKind::Koch => walker.snowflake(KOCH_CENTER, KOCH_SIZE, config.iterations),
    }

    walker.trace
}

struct Walker<'a> {
    scale: f64,
    canvas: &'a mut dyn Canvas,
    trace: String,
}

impl Walker<'_> {
    fn tree(&mut self, start: Point, length: f64, angle: f64, depth: u32) {
        if depth == 0 {
            return;
        }

        let end = start.polar(length, angle);
        // Brown at the trunk shading towards green at the tips
        let color = Rgb::from_hsb(0.1 + depth as f32 * 0.02, 0.8, 0.5);
        let width = (depth / 2).max(1) as f32;
        self.canvas.draw_line(start, end, color, width);
        let _ = writeln!(
            self.trace,
            "Branch[{}]: ({:.0},{:.0}) to ({:.0},{:.0}) - Length: {:.1}",
            depth, start.x, start.y, end.x, end.y, length
        );

        let next = length * self.scale;
        self.tree(end, next, angle - BRANCH_SPREAD, depth - 1);
        self.tree(end, next, angle + BRANCH_SPREAD, depth - 1);
        if depth > MIDDLE_BRANCH_DEPTH {
            self.tree(end, next * MIDDLE_BRANCH_SCALE, angle, depth - 1);
        }
    }

    fn sierpinski(&mut self, [a, b, c]: [Point; 3], depth: u32) {
        if depth == 0 {
            self.canvas.fill_polygon(&[a, b, c], SIERPINSKI_COLOR);
            let _ = writeln!(
                self.trace,
                "Triangle: ({:.0},{:.0})-({:.0},{:.0})-({:.0},{:.0})",
                a.x, a.y, b.x, b.y, c.x, c.y
            );
            return;
        }

        let ab = a.midpoint(b);
        let bc = b.midpoint(c);
        let ca = c.midpoint(a);
        self.sierpinski([a, ab, ca], depth - 1);
        self.sierpinski([ab, b, bc], depth - 1);
        self.sierpinski([ca, bc, c], depth - 1);
    }

    fn snowflake(&mut self, center: Point, size: f64, depth: u32) {
        let top = Point::new(center.x, center.y - size);
        let left = Point::new(
            center.x - size * FRAC_PI_6.cos(),
            center.y + size * FRAC_PI_6.sin(),
        );
        let right = Point::new(
            center.x + size * FRAC_PI_6.cos(),
            center.y + size * FRAC_PI_6.sin(),
        );

        // Clockwise on screen, so the -60 degree apex lands outside
        self.koch(top, right, depth);
        self.koch(right, left, depth);
        self.koch(left, top, depth);
    }

    fn koch(&mut self, start: Point, end: Point, depth: u32) {
        if depth == 0 {
            self.canvas.draw_line(start, end, KOCH_COLOR, 2.0);
            let _ = writeln!(
                self.trace,
                "Line: ({:.0},{:.0}) to ({:.0},{:.0})",
                start.x, start.y, end.x, end.y
            );
            return;
        }

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let a = Point::new(start.x + dx / 3.0, start.y + dy / 3.0);
        let b = Point::new(start.x + 2.0 * dx / 3.0, start.y + 2.0 * dy / 3.0);

        // Apex: A->B rotated by -60 degrees about A
        let (sin, cos) = (-FRAC_PI_3).sin_cos();
        let (vx, vy) = (b.x - a.x, b.y - a.y);
        let apex = Point::new(a.x + vx * cos - vy * sin, a.y + vx * sin + vy * cos);

        self.koch(start, a, depth - 1);
        self.koch(a, apex, depth - 1);
        self.koch(apex, b, depth - 1);
        self.koch(b, end, depth - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{NullCanvas, Primitive, Recorder};

    fn config(kind: FractalKind, iterations: u32) -> FractalConfig {
        FractalConfig {
            iterations,
            kind,
            ..FractalConfig::default()
        }
    }

    #[test]
    fn complexity_recurrence() {
        assert_eq!(complexity(0), 1);
        assert_eq!(complexity(1), 3);
        assert_eq!(complexity(2), 8);
        assert_eq!(complexity(3), 19);
        for d in 1..12 {
            assert_eq!(complexity(d), d as u64 + 2 * complexity(d - 1));
        }
    }

    #[test]
    fn koch_segments_grow_fourfold() {
        for depth in 0..5 {
            let mut rec = Recorder::new();
            render(&config(FractalKind::Koch, depth), &mut rec);
            assert_eq!(rec.lines(), 3 * 4usize.pow(depth));
        }
    }

    #[test]
    fn koch_apex_points_outward() {
        // Single horizontal segment left to right: apex must sit above it
        let mut rec = Recorder::new();
        let mut walker = Walker {
            scale: 0.7,
            canvas: &mut rec,
            trace: String::new(),
        };
        walker.koch(Point::new(0.0, 0.0), Point::new(90.0, 0.0), 1);
        let Primitive::Line { to: apex, .. } = rec.primitives[1].clone() else {
            panic!("expected a line");
        };
        assert!((apex.x - 45.0).abs() < 1e-9);
        assert!((apex.y + 30.0 * 3f64.sqrt() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn snowflake_bumps_point_away_from_centre() {
        let mut rec = Recorder::new();
        render(&config(FractalKind::Koch, 1), &mut rec);
        assert_eq!(rec.lines(), 12);

        let dist = |p: Point| (p.x - KOCH_CENTER.x).hypot(p.y - KOCH_CENTER.y);
        for side in rec.primitives.chunks(4) {
            let Primitive::Line { from: start, .. } = side[0].clone() else {
                panic!("expected a line");
            };
            let Primitive::Line { to: apex, .. } = side[1].clone() else {
                panic!("expected a line");
            };
            let Primitive::Line { to: end, .. } = side[3].clone() else {
                panic!("expected a line");
            };
            let middle = start.midpoint(end);
            assert!(
                dist(apex) > dist(middle) + 1.0,
                "apex ({:.1},{:.1}) is inside side midpoint ({:.1},{:.1})",
                apex.x,
                apex.y,
                middle.x,
                middle.y
            );
        }
    }

    #[test]
    fn sierpinski_fills_leaf_triangles() {
        let mut rec = Recorder::new();
        let trace = render(&config(FractalKind::Sierpinski, 3), &mut rec);
        assert_eq!(rec.polygons(), 27);
        assert_eq!(rec.lines(), 0);
        assert_eq!(trace.matches("Triangle:").count(), 27);
    }

    #[test]
    fn tree_grows_middle_branch_only_when_deep() {
        let mut rec = Recorder::new();
        render(&config(FractalKind::Tree, 3), &mut rec);
        assert_eq!(rec.lines(), 7);

        // depth 4 root has three children, each a depth-3 binary tree
        let mut rec = Recorder::new();
        render(&config(FractalKind::Tree, 4), &mut rec);
        assert_eq!(rec.lines(), 1 + 3 * 7);
    }

    #[test]
    fn render_is_repeatable() {
        for kind in [FractalKind::Tree, FractalKind::Sierpinski, FractalKind::Koch] {
            let cfg = config(kind, 4);
            let (mut a, mut b) = (Recorder::new(), Recorder::new());
            let ta = render(&cfg, &mut a);
            let tb = render(&cfg, &mut b);
            assert_eq!(a.primitives, b.primitives);
            assert_eq!(ta, tb);
            assert_eq!(ta, render(&cfg, &mut NullCanvas));
        }
    }
}
