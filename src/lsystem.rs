//! L-system expansion and stack-based turtle interpretation
//!
//! Rendering walks the expanded string twice: once to measure the bounding
//! box, once to draw with an offset that centres the figure on the canvas.

use crate::canvas::{Canvas, Point, Rgb, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::config::LSystemConfig;
use std::collections::BTreeMap;
use std::fmt::Write;

const INITIAL_HEADING: f64 = -90.0;
const INITIAL_STEP: f64 = 6.0;
/// Systems turning at most this many degrees are drawn as tapering plants
const PLANT_ANGLE: f64 = 40.0;
const PLANT_TAPER: f64 = 0.75;

const PLANT_COLOR: Rgb = Rgb(34, 139, 34);
const GEOMETRIC_COLOR: Rgb = Rgb(0, 124, 119);

/// Apply `depth` rewrite passes; symbols without a rule pass through
pub fn expand(axiom: &str, rules: &BTreeMap<char, String>, depth: u32) -> String {
    let mut current = axiom.to_string();
    for _ in 0..depth {
        let mut next = String::with_capacity(current.len() * 2);
        for c in current.chars() {
            match rules.get(&c) {
                Some(production) => next.push_str(production),
                None => next.push(c),
            }
        }
        current = next;
    }
    current
}

/// An L-system with its expansion computed once at construction
pub struct LSystem<'a> {
    config: &'a LSystemConfig,
    expanded: String,
}

impl<'a> LSystem<'a> {
    pub fn new(config: &'a LSystemConfig) -> Self {
        let expanded = expand(&config.axiom, &config.rules, config.depth);
        Self { config, expanded }
    }

    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    /// depth x number of `F` symbols in the expanded string
    pub fn complexity(&self) -> u64 {
        let forwards = self.expanded.chars().filter(|&c| c == 'F').count() as u64;
        (self.config.depth as u64).saturating_mul(forwards)
    }

    pub fn is_plant(&self) -> bool {
        self.config.angle_degrees <= PLANT_ANGLE
    }

    pub fn render(&self, canvas: &mut dyn Canvas) -> String {
        let mut bounds = Bounds::default();
        self.walk(Point::new(0.0, 0.0), |from, to| bounds.include(from, to));

        let (min, max) = bounds.corners();
        let offset = Point::new(
            CANVAS_WIDTH / 2.0 - (min.x + max.x) / 2.0,
            CANVAS_HEIGHT / 2.0 - (min.y + max.y) / 2.0,
        );

        let color = if self.is_plant() { PLANT_COLOR } else { GEOMETRIC_COLOR };
        let mut segments = 0usize;
        self.walk(offset, |from, to| {
            canvas.draw_line(from, to, color, 1.0);
            segments += 1;
        });

        let mut trace = String::new();
        let _ = writeln!(
            trace,
            "L-System at depth {} with angle {}°",
            self.config.depth, self.config.angle_degrees
        );
        let _ = writeln!(trace, "Axiom: {}", self.config.axiom);
        for (symbol, production) in &self.config.rules {
            let _ = writeln!(trace, "  {} -> {}", symbol, production);
        }
        let _ = writeln!(trace, "Expanded length: {}", self.expanded.chars().count());
        let _ = writeln!(trace, "Segments drawn: {}", segments);
        let _ = writeln!(
            trace,
            "Bounding box: {:.1} x {:.1}",
            max.x - min.x,
            max.y - min.y
        );
        trace
    }

    /// Run the turtle from `origin`, calling `segment` for every `F`
    fn walk(&self, origin: Point, mut segment: impl FnMut(Point, Point)) {
        let mut turtle = Turtle {
            position: origin,
            heading: INITIAL_HEADING,
            step: INITIAL_STEP,
        };
        let mut stack: Vec<Turtle> = Vec::new();
        let taper = self.is_plant();

        for c in self.expanded.chars() {
            match c {
                'F' => {
                    let next = turtle.position.polar(turtle.step, turtle.heading.to_radians());
                    segment(turtle.position, next);
                    turtle.position = next;
                }
                '+' => turtle.heading += self.config.angle_degrees,
                '-' => turtle.heading -= self.config.angle_degrees,
                '[' => {
                    stack.push(turtle);
                    if taper {
                        turtle.step *= PLANT_TAPER;
                    }
                }
                ']' => {
                    if let Some(saved) = stack.pop() {
                        turtle = saved;
                    }
                }
                _ => {}
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Turtle {
    position: Point,
    heading: f64,
    step: f64,
}

#[derive(Default)]
struct Bounds {
    min: Option<Point>,
    max: Option<Point>,
}

impl Bounds {
    fn include(&mut self, a: Point, b: Point) {
        for p in [a, b] {
            let min = self.min.get_or_insert(p);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            let max = self.max.get_or_insert(p);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
    }

    /// Box corners; an empty path collapses to the origin
    fn corners(&self) -> (Point, Point) {
        let origin = Point::new(0.0, 0.0);
        (self.min.unwrap_or(origin), self.max.unwrap_or(origin))
    }
}
