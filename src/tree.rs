//! Recursive tree with configurable fan-out, jitter and seasonal palettes

use crate::canvas::{dot, Canvas, Point, Rgb};
use crate::config::{Season, TreeConfig};
use rand::prelude::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt::Write;

const ROOT: Point = Point::new(400.0, 550.0);
const TRUNK_LENGTH: f64 = 120.0;

/// Maximum angular jitter either side, radians
const ANGLE_JITTER: f64 = 0.15;
/// Chance that a randomized node grows an extra, shorter branch
const EXTRA_BRANCH_CHANCE: f64 = 0.3;
const EXTRA_BRANCH_SCALE: f64 = 0.6;

const FALL_LEAVES: [Rgb; 3] = [Rgb(255, 69, 0), Rgb(255, 140, 0), Rgb(255, 215, 0)];
const BLOSSOM: Rgb = Rgb(255, 182, 193);
const FOREST_GREEN: Rgb = Rgb(34, 139, 34);
const FROST: Rgb = Rgb(200, 200, 200);

/// `C(0) = 1`, `C(d) = 1 + branch_count * C(d - 1)`
pub fn complexity(depth: u32, branch_count: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    complexity(depth - 1, branch_count)
        .saturating_mul(branch_count as u64)
        .saturating_add(1)
}

/// Grow the tree into `canvas`, returning the branch trace
pub fn render(config: &TreeConfig, canvas: &mut dyn Canvas, rng: &mut StdRng) -> String {
    let mut grower = Grower {
        config,
        canvas,
        rng,
        trace: String::new(),
    };

    let banner = match config.season {
        Season::Spring => Some("[Spring Tree: New growth, many small branches]"),
        Season::Summer => Some("[Summer Tree: Full foliage, balanced structure]"),
        Season::Fall => Some("[Fall Tree: Some branches bare, irregular pattern]"),
        Season::Winter => Some("[Winter Tree: Bare branches, stark structure]"),
        Season::Default => None,
    };
    if let Some(banner) = banner {
        let _ = writeln!(grower.trace, "{}\n", banner);
    }
    let _ = writeln!(grower.trace, "=== Tree Structure ===");
    let _ = writeln!(grower.trace, "Trunk: Base at ({:.0}, {:.0})\n", ROOT.x, ROOT.y);

    grower.branch(ROOT, TRUNK_LENGTH, -FRAC_PI_2, config.max_depth, "Root");
    grower.trace
}

struct Grower<'a> {
    config: &'a TreeConfig,
    canvas: &'a mut dyn Canvas,
    rng: &'a mut StdRng,
    trace: String,
}

impl Grower<'_> {
    fn branch(&mut self, start: Point, length: f64, angle: f64, depth: u32, path: &str) {
        if depth == 0 {
            self.leaf(start);
            let _ = writeln!(self.trace, "  Leaf at {}: ({:.0}, {:.0})", path, start.x, start.y);
            return;
        }

        let end = start.polar(length, angle);
        let color = self.branch_color(depth);
        let width = (depth as f32 / 2.0).max(1.0);
        self.canvas.draw_line(start, end, color, width);

        let indent = "  ".repeat(self.config.max_depth.saturating_sub(depth) as usize);
        let _ = writeln!(
            self.trace,
            "{}Branch {} [Depth {}]: ({:.0},{:.0}) to ({:.0},{:.0}) - Length: {:.1}",
            indent, path, depth, start.x, start.y, end.x, end.y, length
        );

        let next = length * self.config.length_reduction;
        let spread = self.config.branch_angle;

        if self.config.branch_count <= 2 {
            for (suffix, child_angle) in [("L", angle - spread), ("R", angle + spread)] {
                let (len, ang) = self.jitter(next, child_angle);
                self.branch(end, len, ang, depth - 1, &format!("{}-{}", path, suffix));
            }
        } else {
            let step = 2.0 * spread / (self.config.branch_count - 1) as f64;
            for i in 0..self.config.branch_count {
                let (len, ang) = self.jitter(next, angle - spread + i as f64 * step);
                self.branch(end, len, ang, depth - 1, &format!("{}-{}", path, i));
            }
        }

        if self.config.randomized && depth > 2 && self.rng.gen_bool(EXTRA_BRANCH_CHANCE) {
            let extra_angle = angle + (self.rng.gen::<f64>() - 0.5) * FRAC_PI_4;
            self.branch(
                end,
                next * EXTRA_BRANCH_SCALE,
                extra_angle,
                depth - 2,
                &format!("{}-X", path),
            );
        }
    }

    /// Per-child length factor in [0.8, 1.2] and angle offset within +/-0.15
    fn jitter(&mut self, length: f64, angle: f64) -> (f64, f64) {
        if !self.config.randomized {
            return (length, angle);
        }
        let length = length * self.rng.gen_range(0.8..=1.2);
        let angle = angle + self.rng.gen_range(-ANGLE_JITTER..=ANGLE_JITTER);
        (length, angle)
    }

    fn branch_color(&self, depth: u32) -> Rgb {
        let factor = depth as f64 / self.config.max_depth.max(1) as f64;
        let scaled = |v: f64| (v * factor).clamp(0.0, 255.0) as u8;

        match self.config.season {
            Season::Spring if depth <= 2 => BLOSSOM,
            Season::Spring => Rgb(scaled(100.0), (200.0 * factor + 55.0).min(255.0) as u8, scaled(100.0)),
            Season::Summer => Rgb(scaled(34.0), scaled(139.0), scaled(34.0)),
            Season::Fall if depth <= 3 => Rgb(255, (140 - depth as i32 * 20).max(0) as u8, 0),
            Season::Fall => Rgb(scaled(139.0), scaled(69.0), scaled(19.0)),
            Season::Winter => {
                let gray = (150.0 * factor + 50.0).min(255.0) as u8;
                Rgb(gray, gray, gray)
            }
            Season::Default => Rgb(
                scaled(101.0),
                (67.0 * factor + 100.0 * (1.0 - factor)).clamp(0.0, 255.0) as u8,
                scaled(33.0),
            ),
        }
    }

    fn leaf(&mut self, at: Point) {
        let (color, radius) = match self.config.season {
            Season::Spring => (BLOSSOM, 4.0),
            Season::Fall => (FALL_LEAVES[self.rng.gen_range(0..FALL_LEAVES.len())], 3.0),
            Season::Winter => (FROST, 2.0),
            Season::Summer | Season::Default => (FOREST_GREEN, 3.0),
        };
        dot(&mut *self.canvas, at, radius, color);
    }
}
