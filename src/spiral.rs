//! Parametric spirals with recursive cross ornaments
//!
//! The walk is recursive on the remaining segment count; it stops early when
//! the radius collapses or runs off the canvas, so a bad growth rule cannot
//! run away.

use crate::canvas::{Canvas, Point, Rgb};
use crate::config::{SpiralConfig, SpiralKind};
use std::f64::consts::PI;
use std::fmt::Write;

const CENTER: Point = Point::new(400.0, 300.0);
const MIN_RADIUS: f64 = 1.0;
const MAX_RADIUS: f64 = 300.0;

/// Starting radius of the outward pass
const OUTWARD_START: f64 = 5.0;
/// Starting radius of each galaxy arm
const ARM_START: f64 = 10.0;
/// An ornament hangs off every segment whose remaining count is a multiple of this
const ORNAMENT_INTERVAL: u32 = 20;
const MIN_ORNAMENT: f64 = 2.0;

const INWARD_COLOR: Rgb = Rgb(220, 20, 60);
const CENTER_COLOR: Rgb = Rgb::BLACK;

/// `C(n) = 1` for `n <= 1`, else `1 + 2 * C(n / 2)`.
///
/// Models a balanced split of the segment count rather than the real walk.
pub fn complexity(segments: u32) -> u64 {
    if segments <= 1 {
        return 1;
    }
    complexity(segments / 2).saturating_mul(2).saturating_add(1)
}

/// Radius after one step of the growth rule; `direction` is +1 outward, -1 inward
pub fn next_radius(kind: SpiralKind, radius: f64, direction: i32) -> f64 {
    match kind {
        SpiralKind::Archimedean => radius + 2.0 * direction as f64,
        SpiralKind::Logarithmic => radius * if direction > 0 { 1.02 } else { 0.98 },
        SpiralKind::Golden => radius * if direction > 0 { 1.05 } else { 0.95 },
    }
}

pub fn render(config: &SpiralConfig, canvas: &mut dyn Canvas) -> String {
    let color = match config.kind {
        SpiralKind::Golden => Rgb(255, 215, 0),
        SpiralKind::Logarithmic => Rgb(138, 43, 226),
        SpiralKind::Archimedean => Rgb(0, 100, 0),
    };
    let mut walker = Walker {
        config,
        canvas,
        color,
        drawn: 0,
        trace: String::new(),
    };
    walker.header();

    match config.arms {
        Some(arms) => {
            let arms = arms.max(1);
            for i in 0..arms {
                let start_angle = 2.0 * PI * i as f64 / arms as f64;
                let _ = writeln!(
                    walker.trace,
                    "Arm {} starting at angle {:.1} degrees",
                    i + 1,
                    start_angle.to_degrees()
                );
                walker.run(&format!("Arm{}", i + 1), ARM_START, start_angle, config.segments / arms, 1);
            }
        }
        None if config.bidirectional => {
            let half = config.segments / 2;
            walker.run("Outward", OUTWARD_START, 0.0, half, 1);
            walker.color = INWARD_COLOR;
            walker.run("Inward", config.initial_radius, PI, half, -1);
        }
        None => walker.run("Main", OUTWARD_START, 0.0, config.segments, 1),
    }

    walker
        .canvas
        .fill_rect(CENTER.x - 3.0, CENTER.y - 3.0, 6.0, 6.0, CENTER_COLOR);
    let _ = writeln!(walker.trace, "\nTotal segments drawn: {}", walker.drawn);
    walker.trace
}

struct Walker<'a> {
    config: &'a SpiralConfig,
    canvas: &'a mut dyn Canvas,
    color: Rgb,
    drawn: u32,
    trace: String,
}

impl Walker<'_> {
    fn header(&mut self) {
        let cfg = self.config;
        if cfg.fibonacci {
            let _ = writeln!(self.trace, "[Fibonacci Spiral: Based on Fibonacci sequence]");
            let (mut a, mut b) = (1u64, 1u64);
            let mut terms = Vec::with_capacity(10);
            for _ in 0..10 {
                terms.push(a.to_string());
                (a, b) = (b, a + b);
            }
            let _ = writeln!(self.trace, "Fibonacci sequence: {} ...\n", terms.join(" "));
        }
        match cfg.arms {
            Some(arms) => {
                let _ = writeln!(self.trace, "=== Galaxy Spiral Pattern ===");
                let _ = writeln!(self.trace, "Arms: {}\n", arms.max(1));
            }
            None => {
                let _ = writeln!(self.trace, "=== Spiral Pattern ===");
                let _ = writeln!(self.trace, "Center: ({:.0}, {:.0})", CENTER.x, CENTER.y);
                let _ = writeln!(
                    self.trace,
                    "Type: {} spiral (decay {:.3})\n",
                    cfg.kind.name(),
                    cfg.radius_decay
                );
            }
        }
    }

    fn run(&mut self, name: &str, radius: f64, angle: f64, segments: u32, direction: i32) {
        self.spiral(name, radius, angle, segments, segments, direction);
    }

    fn spiral(&mut self, name: &str, radius: f64, angle: f64, remaining: u32, total: u32, direction: i32) {
        if remaining == 0 || radius <= MIN_RADIUS || radius > MAX_RADIUS {
            let _ = writeln!(self.trace, "  {} spiral ended at radius {:.1}", name, radius);
            return;
        }

        let here = CENTER.polar(radius, angle);
        let radius_next = next_radius(self.config.kind, radius, direction);
        let angle_next = angle + self.config.angle_increment;
        let there = CENTER.polar(radius_next, angle_next);

        self.canvas.draw_line(here, there, self.color, 2.0);
        self.drawn += 1;
        if remaining % 10 == 0 {
            let _ = writeln!(
                self.trace,
                "  Segment {}: ({:.0},{:.0}) to ({:.0},{:.0}) - Radius: {:.1}",
                total - remaining + 1,
                here.x,
                here.y,
                there.x,
                there.y,
                radius
            );
        }

        if remaining % ORNAMENT_INTERVAL == 0 {
            self.ornament(there, radius_next / 10.0, (remaining / ORNAMENT_INTERVAL) as i32);
        }

        self.spiral(name, radius_next, angle_next, remaining - 1, total, direction);
    }

    /// Four-armed cross; each arm repeats the cross at half size
    fn ornament(&mut self, at: Point, size: f64, depth: i32) {
        if depth <= 0 || size < MIN_ORNAMENT {
            return;
        }

        let color = self.color.brighter();
        self.canvas.draw_line(
            Point::new(at.x - size, at.y),
            Point::new(at.x + size, at.y),
            color,
            1.0,
        );
        self.canvas.draw_line(
            Point::new(at.x, at.y - size),
            Point::new(at.x, at.y + size),
            color,
            1.0,
        );
        let _ = writeln!(
            self.trace,
            "    * Decoration at ({:.0},{:.0}) - Size: {:.1}",
            at.x, at.y, size
        );

        let offset = size * 2.0;
        for (dx, dy) in [(offset, 0.0), (-offset, 0.0), (0.0, offset), (0.0, -offset)] {
            self.ornament(Point::new(at.x + dx, at.y + dy), size * 0.5, depth - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Primitive, Recorder};

    #[test]
    fn complexity_balanced_split() {
        assert_eq!(complexity(0), 1);
        assert_eq!(complexity(1), 1);
        assert_eq!(complexity(2), 3);
        assert_eq!(complexity(3), 3);
        assert_eq!(complexity(4), 7);
        assert_eq!(complexity(100), 127);
    }

    #[test]
    fn growth_rules() {
        assert_eq!(next_radius(SpiralKind::Archimedean, 10.0, 1), 12.0);
        assert_eq!(next_radius(SpiralKind::Archimedean, 10.0, -1), 8.0);
        assert!((next_radius(SpiralKind::Logarithmic, 100.0, 1) - 102.0).abs() < 1e-9);
        assert!((next_radius(SpiralKind::Golden, 100.0, -1) - 95.0).abs() < 1e-9);
    }

    #[test]
    fn archimedean_walk_stops_at_segment_count() {
        // 5 + 2*19 stays well inside the radius guard
        let cfg = SpiralConfig::new(19, SpiralKind::Archimedean, false);
        let mut rec = Recorder::new();
        let trace = render(&cfg, &mut rec);
        assert_eq!(rec.lines(), 19);
        assert_eq!(rec.rects(), 1);
        assert!(trace.contains("Main spiral ended at radius 43.0"));
    }

    #[test]
    fn radius_guard_stops_runaway_growth() {
        let cfg = SpiralConfig::new(10_000, SpiralKind::Golden, false);
        let mut rec = Recorder::new();
        render(&cfg, &mut rec);
        let spiral_lines = rec
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { width, .. } if *width == 2.0))
            .count();
        // 5 * 1.05^n exceeds 300 after 84 steps
        assert_eq!(spiral_lines, 84);
    }

    #[test]
    fn bidirectional_runs_two_passes() {
        let cfg = SpiralConfig::new(40, SpiralKind::Archimedean, true);
        let trace = render(&cfg, &mut Recorder::new());
        assert!(trace.contains("Outward spiral ended"));
        assert!(trace.contains("Inward spiral ended"));

        let mut rec = Recorder::new();
        render(&cfg, &mut rec);
        let crimson = rec
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { color, .. } if *color == INWARD_COLOR))
            .count();
        assert_eq!(crimson, 20);
    }

    #[test]
    fn ornaments_recurse_four_ways() {
        let cfg = SpiralConfig::default();
        let mut rec = Recorder::new();
        let mut walker = Walker {
            config: &cfg,
            canvas: &mut rec,
            color: Rgb::BLACK,
            drawn: 0,
            trace: String::new(),
        };
        // size 8 -> 4 -> 2 -> 1 (stop): 1 + 4 + 16 crosses
        walker.ornament(CENTER, 8.0, 5);
        assert_eq!(rec.lines(), 2 * 21);

        let mut rec = Recorder::new();
        let mut walker = Walker {
            config: &cfg,
            canvas: &mut rec,
            color: Rgb::BLACK,
            drawn: 0,
            trace: String::new(),
        };
        walker.ornament(CENTER, 100.0, 1);
        assert_eq!(rec.lines(), 2);
    }

    #[test]
    fn galaxy_arms_are_evenly_spaced() {
        let cfg = SpiralConfig::galaxy(120, 4);
        let trace = render(&cfg, &mut Recorder::new());
        assert!(trace.contains("Arm 2 starting at angle 90.0 degrees"));
        assert!(trace.contains("Arm 4 starting at angle 270.0 degrees"));
        assert!(trace.contains("Arm4 spiral ended"));
    }

    #[test]
    fn fibonacci_header() {
        let trace = render(&SpiralConfig::fibonacci(), &mut Recorder::new());
        assert!(trace.contains("Fibonacci sequence: 1 1 2 3 5 8 13 21 34 55 ..."));
    }

    #[test]
    fn render_is_repeatable() {
        let cfg = SpiralConfig::new(150, SpiralKind::Logarithmic, true);
        let (mut a, mut b) = (Recorder::new(), Recorder::new());
        assert_eq!(render(&cfg, &mut a), render(&cfg, &mut b));
        assert_eq!(a.primitives, b.primitives);
    }
}
