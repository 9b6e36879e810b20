//! Artwork record and the closed set of pattern kinds

use crate::automaton;
use crate::canvas::{Canvas, NullCanvas};
use crate::config::{
    AutomatonConfig, FractalConfig, LSystemConfig, PolygonConfig, SpiralConfig, TreeConfig,
};
use crate::error::ArtError;
use crate::lsystem::LSystem;
use crate::{fractal, polygon, spiral, tree};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

/// A pattern generator together with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum Pattern {
    Fractal(FractalConfig),
    Tree(TreeConfig),
    Spiral(SpiralConfig),
    LSystem(LSystemConfig),
    Polygon(PolygonConfig),
    Automaton(AutomatonConfig),
}

impl Pattern {
    /// Pure function of the parameters
    pub fn complexity(&self) -> u64 {
        match self {
            Pattern::Fractal(cfg) => fractal::complexity(cfg.iterations),
            Pattern::Tree(cfg) => tree::complexity(cfg.max_depth, cfg.branch_count),
            Pattern::Spiral(cfg) => spiral::complexity(cfg.segments),
            Pattern::LSystem(cfg) => LSystem::new(cfg).complexity(),
            Pattern::Polygon(cfg) => polygon::complexity(cfg.sides, cfg.depth),
            Pattern::Automaton(cfg) => automaton::complexity(cfg.size, cfg.generations),
        }
    }

    pub fn art_type(&self) -> &'static str {
        match self {
            Pattern::Fractal(_) => "Fractal Art",
            Pattern::Tree(_) => "Recursive Tree",
            Pattern::Spiral(_) => "Spiral Art",
            Pattern::LSystem(_) => "L-System",
            Pattern::Polygon(_) => "Polygon Fractal",
            Pattern::Automaton(_) => "Cellular Automata",
        }
    }

    /// One-line description of the parameters
    pub fn summary(&self) -> String {
        match self {
            Pattern::Fractal(cfg) => format!(
                "A {} fractal with {} iterations",
                cfg.kind.name(),
                cfg.iterations
            ),
            Pattern::Tree(cfg) => format!(
                "A recursive tree with depth {} and {} branches per node",
                cfg.max_depth, cfg.branch_count
            ),
            Pattern::Spiral(cfg) => format!(
                "A {} spiral with {} segments",
                cfg.kind.name(),
                cfg.segments
            ),
            Pattern::LSystem(cfg) => format!(
                "L-System at depth {} with angle {}°",
                cfg.depth, cfg.angle_degrees
            ),
            Pattern::Polygon(cfg) => format!(
                "Recursive Polygon Fractal with {} sides, depth {}",
                cfg.sides, cfg.depth
            ),
            Pattern::Automaton(cfg) => format!(
                "Cellular Automata pattern with aging ({}) on a {}x{} grid",
                cfg.rule, cfg.size, cfg.size
            ),
        }
    }

    /// Replay the geometry into `canvas`; returns the trace built during this pass
    pub fn render(&self, canvas: &mut dyn Canvas, rng: &mut StdRng) -> String {
        let trace = match self {
            Pattern::Fractal(cfg) => fractal::render(cfg, canvas),
            Pattern::Tree(cfg) => tree::render(cfg, canvas, rng),
            Pattern::Spiral(cfg) => spiral::render(cfg, canvas),
            Pattern::LSystem(cfg) => LSystem::new(cfg).render(canvas),
            Pattern::Polygon(cfg) => polygon::render(cfg, canvas),
            Pattern::Automaton(cfg) => automaton::render(cfg, canvas),
        };
        tracing::debug!(kind = self.art_type(), trace_lines = trace.lines().count(), "rendered pattern");
        trace
    }

    /// Trace text without drawing anything
    pub fn describe(&self, rng: &mut StdRng) -> String {
        self.render(&mut NullCanvas, rng)
    }

    /// Pull parameters back into the ranges the command line accepts
    pub fn clamp_to_limits(&mut self) {
        match self {
            Pattern::Fractal(cfg) => cfg.iterations = cfg.iterations.clamp(3, 10),
            Pattern::Tree(cfg) => {
                cfg.max_depth = cfg.max_depth.clamp(3, 12);
                cfg.branch_count = cfg.branch_count.clamp(2, 5);
            }
            Pattern::Spiral(cfg) => {
                cfg.segments = cfg.segments.clamp(50, 200);
                if let Some(arms) = cfg.arms.as_mut() {
                    *arms = (*arms).clamp(1, cfg.segments);
                }
            }
            Pattern::LSystem(cfg) => cfg.depth = cfg.depth.clamp(1, 7),
            Pattern::Polygon(cfg) => {
                cfg.sides = cfg.sides.clamp(3, 8);
                cfg.depth = cfg.depth.clamp(2, 6);
            }
            Pattern::Automaton(cfg) => {
                cfg.size = cfg.size.clamp(10, 100);
                cfg.generations = cfg.generations.clamp(1, 50);
            }
        }
    }
}

/// A titled, attributed piece of generated art
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub title: String,
    pub artist: String,
    pub created: DateTime<Utc>,
    pub pattern: Pattern,
}

impl Artwork {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            created: Utc::now(),
            pattern,
        }
    }

    pub fn complexity(&self) -> u64 {
        self.pattern.complexity()
    }

    pub fn art_type(&self) -> &'static str {
        self.pattern.art_type()
    }

    pub fn summary(&self) -> String {
        self.pattern.summary()
    }

    pub fn render(&self, canvas: &mut dyn Canvas, rng: &mut StdRng) -> String {
        self.pattern.render(canvas, rng)
    }

    pub fn describe(&self, rng: &mut StdRng) -> String {
        self.pattern.describe(rng)
    }

    pub fn to_json(&self) -> Result<String, ArtError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ArtError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ArtError> {
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "saved artwork snapshot");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ArtError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write a short text card describing the piece
    pub fn export_description(&self, path: &Path) -> Result<(), ArtError> {
        let mut out = fs::File::create(path)?;
        writeln!(out, "Artwork Title: {}", self.title)?;
        writeln!(out, "Artist: {}", self.artist)?;
        writeln!(out, "Type: {}", self.art_type())?;
        writeln!(out, "Description: {}", self.summary())?;
        writeln!(out, "Complexity Level: {}", self.complexity())?;
        writeln!(out, "Creation Date: {}", self.created.to_rfc3339())?;
        Ok(())
    }
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - \"{}\" by {} (Created: {}, Complexity: {})",
            self.art_type(),
            self.title,
            self.artist,
            self.created.format("%Y-%m-%d"),
            self.complexity()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Recorder;
    use crate::config::{FractalKind, SpiralKind};
    use rand::SeedableRng;

    fn all_patterns() -> Vec<Pattern> {
        vec![
            Pattern::Fractal(FractalConfig {
                iterations: 4,
                kind: FractalKind::Koch,
                ..FractalConfig::default()
            }),
            Pattern::Tree(TreeConfig::new(5, false, 3)),
            Pattern::Spiral(SpiralConfig::new(100, SpiralKind::Golden, true)),
            Pattern::LSystem(LSystemConfig::plant(3)),
            Pattern::Polygon(PolygonConfig::default()),
            Pattern::Automaton(AutomatonConfig::new(20, 5, 9)),
        ]
    }

    #[test]
    fn complexity_dispatch() {
        let complexities: Vec<u64> = all_patterns().iter().map(Pattern::complexity).collect();
        assert_eq!(complexities[0], 42);
        assert_eq!(complexities[1], tree::complexity(5, 3));
        assert_eq!(complexities[2], 127);
        assert_eq!(complexities[4], 781);
        assert_eq!(complexities[5], 2000);
    }

    #[test]
    fn non_randomized_passes_are_identical() {
        for pattern in all_patterns() {
            let (mut a, mut b) = (Recorder::new(), Recorder::new());
            let ta = pattern.render(&mut a, &mut StdRng::seed_from_u64(1));
            let tb = pattern.render(&mut b, &mut StdRng::seed_from_u64(1));
            assert_eq!(a.primitives, b.primitives, "{}", pattern.art_type());
            assert_eq!(ta, tb);
            assert_eq!(ta, pattern.describe(&mut StdRng::seed_from_u64(1)));
            assert!(!a.is_empty());
        }
    }

    #[test]
    fn oversized_snapshot_is_clamped() {
        let json = r#"{
            "title": "Huge",
            "artist": "Editor",
            "created": "2024-05-01T12:00:00Z",
            "pattern": {"type": "automaton", "params": {"size": 5000, "generations": 900, "seed": 1}}
        }"#;
        let mut art = Artwork::from_json(json).unwrap();
        art.pattern.clamp_to_limits();
        let Pattern::Automaton(cfg) = &art.pattern else {
            panic!("expected automaton");
        };
        assert_eq!((cfg.size, cfg.generations), (100, 50));

        let mut deep = Pattern::LSystem(LSystemConfig::plant(40));
        deep.clamp_to_limits();
        assert_eq!(deep, Pattern::LSystem(LSystemConfig::plant(7)));

        let mut galaxy = Pattern::Spiral(SpiralConfig::galaxy(1000, 4000));
        galaxy.clamp_to_limits();
        let Pattern::Spiral(cfg) = galaxy else {
            panic!("expected spiral");
        };
        assert_eq!((cfg.segments, cfg.arms), (200, Some(200)));

        let mut tiny = Pattern::Polygon(PolygonConfig {
            sides: 1,
            depth: 0,
            scale_factor: 0.5,
        });
        tiny.clamp_to_limits();
        assert_eq!(tiny.complexity(), polygon::complexity(3, 2));
    }

    #[test]
    fn clamping_keeps_in_range_values() {
        for pattern in all_patterns() {
            let mut clamped = pattern.clone();
            clamped.clamp_to_limits();
            assert_eq!(clamped, pattern);
        }
    }

    #[test]
    fn display_line() {
        let art = Artwork::new(
            "Polygon Star",
            "Demo Artist",
            Pattern::Polygon(PolygonConfig::default()),
        );
        let line = art.to_string();
        assert!(line.starts_with("Polygon Fractal - \"Polygon Star\" by Demo Artist (Created: "));
        assert!(line.ends_with("Complexity: 781)"));
    }

    #[test]
    fn snapshot_round_trip_keeps_type_tag() {
        let art = Artwork::new("Glow", "Demo", Pattern::Automaton(AutomatonConfig::new(12, 4, 3)));
        let json = art.to_json().unwrap();
        assert!(json.contains("\"type\": \"automaton\""));
        let restored = Artwork::from_json(&json).unwrap();
        assert_eq!(restored, art);
    }

    #[test]
    fn export_writes_card() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.txt");
        let art = Artwork::new("Oak", "Nature", Pattern::Tree(TreeConfig::new(3, false, 2)));
        art.export_description(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Type: Recursive Tree"));
        assert!(text.contains("Complexity Level: 15"));
    }

    #[test]
    fn export_reports_missing_directory() {
        let art = Artwork::new("Oak", "Nature", Pattern::Tree(TreeConfig::default()));
        let err = art
            .export_description(Path::new("/nonexistent-dir/for/sure/card.txt"))
            .unwrap_err();
        assert!(matches!(err, ArtError::Io(_)));
    }
}
