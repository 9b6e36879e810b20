use crate::error::ArtError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Branching fractal families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractalKind {
    Tree,
    Sierpinski,
    Koch,
}

impl FractalKind {
    pub fn name(self) -> &'static str {
        match self {
            FractalKind::Tree => "tree",
            FractalKind::Sierpinski => "sierpinski",
            FractalKind::Koch => "koch",
        }
    }
}

impl FromStr for FractalKind {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(FractalKind::Tree),
            "sierpinski" | "triangle" => Ok(FractalKind::Sierpinski),
            "koch" | "snowflake" => Ok(FractalKind::Koch),
            _ => Err(ArtError::UnknownKind(s.to_string())),
        }
    }
}

/// Configuration for the branching fractal generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalConfig {
    pub iterations: u32,
    pub scale_factor: f64,
    pub kind: FractalKind,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            scale_factor: 0.7,
            kind: FractalKind::Tree,
        }
    }
}

/// Seasonal presets for the recursive tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Default,
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn name(self) -> &'static str {
        match self {
            Season::Default => "default",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl FromStr for Season {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "none" => Ok(Season::Default),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            _ => Err(ArtError::UnknownKind(s.to_string())),
        }
    }
}

/// Configuration for the recursive tree generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_depth: u32,
    pub branch_angle: f64,
    pub length_reduction: f64,
    pub randomized: bool,
    pub branch_count: u32,
    #[serde(default)]
    pub season: Season,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            branch_angle: PI / 6.0,
            length_reduction: 0.75,
            randomized: false,
            branch_count: 2,
            season: Season::Default,
        }
    }
}

impl TreeConfig {
    pub fn new(max_depth: u32, randomized: bool, branch_count: u32) -> Self {
        Self {
            max_depth,
            randomized,
            branch_count: branch_count.clamp(2, 5),
            ..Self::default()
        }
    }

    /// Switch to a seasonal preset, overwriting the growth parameters
    pub fn apply_season(&mut self, season: Season) {
        self.season = season;
        match season {
            Season::Spring => {
                self.length_reduction = 0.8;
                self.branch_count = 3;
            }
            Season::Summer => {
                self.length_reduction = 0.75;
                self.branch_count = 2;
            }
            Season::Fall => {
                self.length_reduction = 0.7;
                self.branch_count = 2;
                self.randomized = true;
            }
            Season::Winter => {
                self.length_reduction = 0.65;
                self.branch_count = 2;
                self.max_depth = self.max_depth.saturating_sub(2).max(5);
            }
            Season::Default => {}
        }
    }
}

/// Radius growth rules for spirals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiralKind {
    Archimedean,
    Logarithmic,
    Golden,
}

impl SpiralKind {
    pub fn name(self) -> &'static str {
        match self {
            SpiralKind::Archimedean => "archimedean",
            SpiralKind::Logarithmic => "logarithmic",
            SpiralKind::Golden => "golden",
        }
    }
}

impl FromStr for SpiralKind {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "archimedean" | "linear" => Ok(SpiralKind::Archimedean),
            "logarithmic" | "log" => Ok(SpiralKind::Logarithmic),
            "golden" => Ok(SpiralKind::Golden),
            _ => Err(ArtError::UnknownKind(s.to_string())),
        }
    }
}

/// Configuration for the spiral generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralConfig {
    pub initial_radius: f64,
    pub radius_decay: f64,
    pub angle_increment: f64,
    pub segments: u32,
    pub kind: SpiralKind,
    pub bidirectional: bool,
    /// Galaxy layout: one outward arm per entry, evenly spaced
    #[serde(default)]
    pub arms: Option<u32>,
    #[serde(default)]
    pub fibonacci: bool,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            initial_radius: 200.0,
            radius_decay: 0.95,
            angle_increment: PI / 8.0,
            segments: 100,
            kind: SpiralKind::Archimedean,
            bidirectional: false,
            arms: None,
            fibonacci: false,
        }
    }
}

impl SpiralConfig {
    /// Spiral of the given kind with that kind's decay and angle step
    pub fn new(segments: u32, kind: SpiralKind, bidirectional: bool) -> Self {
        let (radius_decay, angle_increment) = match kind {
            SpiralKind::Archimedean => (0.95, PI / 8.0),
            SpiralKind::Logarithmic => (0.98, PI / 16.0),
            SpiralKind::Golden => (0.618, PI / 10.0),
        };
        Self {
            radius_decay,
            angle_increment,
            segments,
            kind,
            bidirectional,
            ..Self::default()
        }
    }

    /// Golden spiral walked over 144 segments
    pub fn fibonacci() -> Self {
        Self {
            segments: 144,
            angle_increment: PI / 12.0,
            fibonacci: true,
            ..Self::new(144, SpiralKind::Golden, false)
        }
    }

    pub fn galaxy(segments: u32, arms: u32) -> Self {
        Self {
            arms: Some(arms.max(1)),
            ..Self::new(segments, SpiralKind::Archimedean, false)
        }
    }
}

/// Configuration for the L-system engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LSystemConfig {
    pub axiom: String,
    pub rules: BTreeMap<char, String>,
    pub depth: u32,
    pub angle_degrees: f64,
}

impl LSystemConfig {
    /// Branching "sticks" plant
    pub fn plant(depth: u32) -> Self {
        Self {
            axiom: "X".to_string(),
            rules: BTreeMap::from([
                ('F', "FF".to_string()),
                ('X', "F[+X]F[-X]+X".to_string()),
            ]),
            depth,
            angle_degrees: 20.0,
        }
    }

    pub fn square_sierpinski(depth: u32) -> Self {
        Self {
            axiom: "F+XF+F+XF".to_string(),
            rules: BTreeMap::from([('X', "XF-F+F-XF+F+XF-F+F-X".to_string())]),
            depth,
            angle_degrees: 90.0,
        }
    }

    pub fn koch_snowflake(depth: u32) -> Self {
        Self {
            axiom: "F++F++F".to_string(),
            rules: BTreeMap::from([('F', "F-F++F-F".to_string())]),
            depth,
            angle_degrees: 60.0,
        }
    }
}

/// Parse production rules written as `F=FF,X=F[+X]F[-X]+X`
pub fn parse_rules(text: &str) -> Result<BTreeMap<char, String>, ArtError> {
    let mut rules = BTreeMap::new();
    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (lhs, rhs) = entry
            .split_once('=')
            .ok_or_else(|| ArtError::InvalidRule(entry.to_string()))?;
        let mut symbols = lhs.trim().chars();
        match (symbols.next(), symbols.next()) {
            (Some(symbol), None) => {
                rules.insert(symbol, rhs.trim().to_string());
            }
            _ => return Err(ArtError::InvalidRule(entry.to_string())),
        }
    }
    Ok(rules)
}

/// Configuration for the nested polygon generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonConfig {
    pub sides: u32,
    pub depth: u32,
    pub scale_factor: f64,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            sides: 5,
            depth: 4,
            scale_factor: 0.5,
        }
    }
}

/// Life-like birth/survival rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub birth: Vec<u8>,
    pub survival: Vec<u8>,
}

impl Rule {
    /// HighLife, B36/S23
    pub fn high_life() -> Self {
        Self {
            birth: vec![3, 6],
            survival: vec![2, 3],
        }
    }

    pub fn conway() -> Self {
        Self {
            birth: vec![3],
            survival: vec![2, 3],
        }
    }

    pub fn born(&self, neighbors: u8) -> bool {
        self.birth.contains(&neighbors)
    }

    pub fn survives(&self, neighbors: u8) -> bool {
        self.survival.contains(&neighbors)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::high_life()
    }
}

impl FromStr for Rule {
    type Err = ArtError;

    /// Parse `B36/S23` notation (case-insensitive, either order)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ArtError::InvalidRule(s.to_string());
        let mut birth = None;
        let mut survival = None;

        for part in s.split('/') {
            let part = part.trim();
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(invalid()),
            };
            let mut counts = Vec::new();
            for c in chars {
                let n = c.to_digit(10).filter(|&n| n <= 8).ok_or_else(invalid)?;
                if !counts.contains(&(n as u8)) {
                    counts.push(n as u8);
                }
            }
            counts.sort_unstable();
            *slot = Some(counts);
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Ok(Self { birth, survival }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in &self.birth {
            write!(f, "{}", n)?;
        }
        write!(f, "/S")?;
        for n in &self.survival {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

/// Configuration for the cellular automaton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonConfig {
    pub size: usize,
    pub generations: u32,
    #[serde(default)]
    pub rule: Rule,
    /// Seed for the initial random grid
    pub seed: u64,
}

impl AutomatonConfig {
    pub fn new(size: usize, generations: u32, seed: u64) -> Self {
        Self {
            size,
            generations,
            rule: Rule::default(),
            seed,
        }
    }
}
