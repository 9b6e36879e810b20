//! Life-like cellular automaton with per-cell age tracking
//!
//! The grid is bounded: cells past the edge count as dead. Every step builds
//! a complete next generation before swapping it in.

use crate::canvas::{Canvas, Rgb, CANVAS_HEIGHT};
use crate::config::{AutomatonConfig, Rule};
use rand::prelude::*;
use std::fmt::Write;

/// Initial probability of a cell being alive when the grid is seeded
const INITIAL_DENSITY: f64 = 0.2;
/// Age at which the hue ramp stops changing
const AGE_CAP: u32 = 60;
const DEAD_COLOR: Rgb = Rgb(25, 30, 35);

/// `generations * size^2`
pub fn complexity(size: usize, generations: u32) -> u64 {
    (generations as u64).saturating_mul((size as u64).saturating_mul(size as u64))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Automaton {
    size: usize,
    rule: Rule,
    grid: Vec<Vec<bool>>,
    ages: Vec<Vec<u32>>,
    generation: u64,
}

impl Automaton {
    /// Randomly seeded grid (about one cell in five alive) from the config's seed
    pub fn new(config: &AutomatonConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let grid: Vec<Vec<bool>> = (0..config.size)
            .map(|_| (0..config.size).map(|_| rng.gen_bool(INITIAL_DENSITY)).collect())
            .collect();
        Self::from_cells(config.rule.clone(), grid)
    }

    /// Grid from explicit cells; live cells start at age 1
    pub fn from_cells(rule: Rule, grid: Vec<Vec<bool>>) -> Self {
        let size = grid.len();
        let ages = grid
            .iter()
            .map(|row| row.iter().map(|&alive| alive as u32).collect())
            .collect();
        Self {
            size,
            rule,
            grid,
            ages,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn age(&self, row: usize, col: usize) -> u32 {
        self.ages
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    pub fn population(&self) -> usize {
        self.grid.iter().flatten().filter(|&&alive| alive).count()
    }

    /// Advance one synchronous generation
    pub fn step(&mut self) {
        let mut next_grid = vec![vec![false; self.size]; self.size];
        let mut next_ages = vec![vec![0u32; self.size]; self.size];

        for (row, (grid_row, age_row)) in self.grid.iter().zip(&self.ages).enumerate() {
            for (col, (&alive, &age)) in grid_row.iter().zip(age_row).enumerate() {
                let neighbors = self.count_neighbors(row, col);
                let next = if alive {
                    self.rule.survives(neighbors)
                } else {
                    self.rule.born(neighbors)
                };
                next_grid[row][col] = next;
                next_ages[row][col] = if next { age + 1 } else { 0 };
            }
        }

        self.grid = next_grid;
        self.ages = next_ages;
        self.generation += 1;
    }

    pub fn run(&mut self, generations: u32) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Live cells among the 8 neighbors that lie on the grid
    fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0u8;
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (r, c) = (row as i64 + dr, col as i64 + dc);
                if r < 0 || c < 0 {
                    continue;
                }
                if self.is_alive(r as usize, c as usize) {
                    count += 1;
                }
            }
        }
        count
    }

    /// One filled square per cell; live cells shade by age
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.size == 0 {
            return;
        }
        let cell = (CANVAS_HEIGHT as usize / self.size) as f64;
        for (row, (grid_row, age_row)) in self.grid.iter().zip(&self.ages).enumerate() {
            for (col, (&alive, &age)) in grid_row.iter().zip(age_row).enumerate() {
                let color = if alive { age_color(age) } else { DEAD_COLOR };
                canvas.fill_rect(col as f64 * cell, row as f64 * cell, cell, cell, color);
            }
        }
    }
}

/// Hue ramp: newborn cells at the red end, cells aged 60+ wrap back around
pub fn age_color(age: u32) -> Rgb {
    let age = age.min(AGE_CAP);
    Rgb::from_hsb(1.0 - age as f32 / AGE_CAP as f32, 1.0, 1.0)
}

/// Evolve a fresh copy of the seeded grid and draw the final generation
pub fn render(config: &AutomatonConfig, canvas: &mut dyn Canvas) -> String {
    let mut automaton = Automaton::new(config);
    let seeded = automaton.population();
    automaton.run(config.generations);
    automaton.draw(canvas);

    let oldest = automaton.ages.iter().flatten().copied().max().unwrap_or(0);
    let mut trace = String::new();
    let _ = writeln!(
        trace,
        "Cellular Automata pattern with aging ({})",
        config.rule
    );
    let _ = writeln!(trace, "Grid: {0}x{0}, seed {1}", config.size, config.seed);
    let _ = writeln!(trace, "Generations: {}", automaton.generation());
    let _ = writeln!(trace, "Population: {} -> {}", seeded, automaton.population());
    let _ = writeln!(trace, "Oldest cell age: {}", oldest);
    trace
}
