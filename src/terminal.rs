use crate::canvas::{Canvas, Point, Rgb, CANVAS_HEIGHT, CANVAS_WIDTH};
use crossterm::style::Color;
use crossterm::terminal::size;
use std::fmt::Write as _;
use std::io::{self, stdout, Write};

/// Character cell canvas that previews primitives in the terminal
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: None }
    }
}

const POLYGON_CHAR: char = '#';
const RECT_CHAR: char = '█';

impl Terminal {
    pub fn new(width: u16, height: u16) -> Self {
        let buffer = vec![vec![Cell::default(); width as usize]; height as usize];
        Self {
            width,
            height,
            buffer,
        }
    }

    /// Size the buffer to the attached terminal, leaving a line for the prompt
    pub fn fit() -> Self {
        let (width, height) = size().unwrap_or((80, 24));
        Self::new(width.max(1), height.saturating_sub(1).max(1))
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.buffer.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg };
        }
    }

    fn column(&self, x: f64) -> f64 {
        x / CANVAS_WIDTH * self.width as f64
    }

    fn row(&self, y: f64) -> f64 {
        y / CANVAS_HEIGHT * self.height as f64
    }

    /// Buffer as text with ANSI truecolor escapes
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for row in &self.buffer {
            for cell in row {
                if cell.ch == ' ' {
                    out.push(' ');
                    continue;
                }

                match cell.fg {
                    Some(Color::Rgb { r, g, b }) => {
                        let _ = write!(out, "\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, cell.ch);
                    }
                    _ => out.push(cell.ch),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Buffer as plain text without color
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for row in &self.buffer {
            out.extend(row.iter().map(|cell| cell.ch));
            out.push('\n');
        }
        out
    }

    /// Print buffer to stdout with ANSI colors
    pub fn print_to_stdout(&self) -> io::Result<()> {
        let mut stdout = stdout().lock();
        stdout.write_all(self.to_ansi().as_bytes())?;
        stdout.flush()
    }
}

/// Helper to create RGB colors
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

/// Stroke character for a step in the given direction (y grows downwards)
fn stroke_char(dx: i32, dy: i32) -> char {
    match (dx.signum(), dy.signum()) {
        (_, 0) => '-',
        (0, _) => '|',
        (1, -1) | (-1, 1) => '/',
        _ => '\\',
    }
}

impl Canvas for Terminal {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, _width: f32) {
        let (mut x, mut y) = (self.column(from.x) as i32, self.row(from.y) as i32);
        let (x1, y1) = (self.column(to.x) as i32, self.row(to.y) as i32);
        let ch = stroke_char(x1 - x, y1 - y);
        let fg = Some(rgb(color));

        // Bresenham
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set(x, y, ch, fg);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgb) {
        if points.is_empty() {
            return;
        }
        let fg = Some(rgb(color));
        let cells: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (self.column(p.x), self.row(p.y)))
            .collect();

        let top = cells.iter().map(|c| c.1).fold(f64::MAX, f64::min).floor().max(0.0) as i32;
        let bottom = cells.iter().map(|c| c.1).fold(f64::MIN, f64::max).ceil() as i32;

        // Even-odd scanline fill through each row's centre
        for row in top..=bottom.min(self.height as i32 - 1) {
            let scan = row as f64 + 0.5;
            let mut crossings: Vec<f64> = Vec::new();
            for (i, &(ax, ay)) in cells.iter().enumerate() {
                let (bx, by) = cells[(i + 1) % cells.len()];
                if (ay <= scan && by > scan) || (by <= scan && ay > scan) {
                    crossings.push(ax + (scan - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let start = pair[0].round() as i32;
                let end = pair[1].round() as i32;
                for col in start..end.max(start + 1) {
                    self.set(col, row, POLYGON_CHAR, fg);
                }
            }
        }

        // Keep thin shapes visible even when no row centre falls inside
        let (x, y) = cells[0];
        if self.get(x as i32, y as i32).map_or(false, |c| c.ch == ' ') {
            self.set(x as i32, y as i32, POLYGON_CHAR, fg);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let fg = Some(rgb(color));
        let (left, top) = (self.column(x).floor() as i32, self.row(y).floor() as i32);
        let right = (self.column(x + width).ceil() as i32).max(left + 1);
        let bottom = (self.row(y + height).ceil() as i32).max(top + 1);
        for row in top..bottom {
            for col in left..right {
                self.set(col, row, RECT_CHAR, fg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_uses_slope_character() {
        let mut term = Terminal::new(80, 60);
        term.draw_line(Point::new(0.0, 50.0), Point::new(790.0, 50.0), Rgb::BLACK, 1.0);
        assert!(term.to_plain().lines().nth(5).unwrap().starts_with("----------"));

        let mut term = Terminal::new(80, 60);
        term.draw_line(Point::new(0.0, 590.0), Point::new(590.0, 0.0), Rgb::BLACK, 1.0);
        assert_eq!(term.get(0, 59).unwrap().ch, '/');
        assert_eq!(term.get(59, 0).unwrap().ch, '/');
    }

    #[test]
    fn rect_covers_scaled_cells() {
        let mut term = Terminal::new(80, 60);
        term.fill_rect(0.0, 0.0, 100.0, 100.0, Rgb(1, 2, 3));
        let filled = term.to_plain().chars().filter(|&c| c == RECT_CHAR).count();
        assert_eq!(filled, 10 * 10);
        assert!(term.get(0, 0).unwrap().fg == Some(Color::Rgb { r: 1, g: 2, b: 3 }));
    }

    #[test]
    fn polygon_fill_stays_inside() {
        let mut term = Terminal::new(80, 60);
        let square = [
            Point::new(100.0, 100.0),
            Point::new(300.0, 100.0),
            Point::new(300.0, 300.0),
            Point::new(100.0, 300.0),
        ];
        term.fill_polygon(&square, Rgb::WHITE);
        assert_eq!(term.get(20, 20).unwrap().ch, POLYGON_CHAR);
        assert_eq!(term.get(5, 5).unwrap().ch, ' ');
        assert_eq!(term.get(35, 20).unwrap().ch, ' ');
    }

    #[test]
    fn ansi_output_wraps_colored_cells() {
        let mut term = Terminal::new(2, 1);
        term.set(0, 0, 'x', Some(rgb(Rgb(10, 20, 30))));
        assert_eq!(term.to_ansi(), "\x1b[38;2;10;20;30mx\x1b[0m \n");
        term.clear();
        assert_eq!(term.to_plain(), "  \n");
    }
}
