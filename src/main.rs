use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use recurart::config::{
    parse_rules, AutomatonConfig, FractalConfig, FractalKind, LSystemConfig, PolygonConfig, Rule,
    Season, SpiralConfig, SpiralKind, TreeConfig,
};
use recurart::png::PngCanvas;
use recurart::settings::Settings;
use recurart::terminal::Terminal;
use recurart::{logging, ArtError, Artwork, Pattern, Recorder};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "recurart")]
#[command(author = "Recursive Art Generator")]
#[command(version = "0.1.0")]
#[command(
    about = "Recursive pattern art: fractals, trees, spirals, L-systems, polygons and cellular automata",
    long_about = None
)]
struct Cli {
    /// Log generator activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
struct Output {
    /// Title of the piece
    #[arg(long)]
    title: Option<String>,

    /// Artist name (falls back to the settings file)
    #[arg(long)]
    artist: Option<String>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write an 800x600 PNG rendering
    #[arg(long)]
    png: Option<PathBuf>,

    /// Save a JSON snapshot of the artwork
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write a text description card
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the generation trace
    #[arg(long)]
    trace: bool,

    /// Skip the terminal preview
    #[arg(long)]
    no_print: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Branching fractal: tree, sierpinski or koch
    Fractal {
        #[arg(short, long, default_value = "tree")]
        kind: FractalKind,

        /// Recursion depth (3-10)
        #[arg(short, long, default_value_t = 5)]
        iterations: u32,

        #[arg(long, default_value_t = 0.7)]
        scale: f64,

        #[command(flatten)]
        output: Output,
    },

    /// Recursive tree with optional jitter and seasonal presets
    Tree {
        /// Recursion depth (3-12)
        #[arg(short, long, default_value_t = 8)]
        depth: u32,

        /// Branches per node (2-5)
        #[arg(short, long, default_value_t = 2)]
        branches: u32,

        /// Randomize branch lengths and angles
        #[arg(short, long)]
        random: bool,

        /// Seasonal preset: spring, summer, fall, winter
        #[arg(long, default_value = "default")]
        season: Season,

        #[command(flatten)]
        output: Output,
    },

    /// Spiral: archimedean, logarithmic or golden
    Spiral {
        #[arg(short, long, default_value = "archimedean")]
        kind: SpiralKind,

        /// Number of segments (50-200)
        #[arg(short = 'n', long, default_value_t = 100)]
        segments: u32,

        /// Add an inward pass after the outward one
        #[arg(short, long)]
        bidirectional: bool,

        /// Galaxy layout with this many arms
        #[arg(long, conflicts_with = "fibonacci")]
        galaxy: Option<u32>,

        /// Golden spiral over 144 segments
        #[arg(long)]
        fibonacci: bool,

        #[command(flatten)]
        output: Output,
    },

    /// L-system from a preset (plant, sierpinski, koch) or custom rules
    Lsystem {
        #[arg(short, long, default_value = "plant")]
        preset: String,

        /// Rewrite passes
        #[arg(short, long)]
        depth: Option<u32>,

        /// Custom axiom; requires --rules
        #[arg(long, requires = "rules")]
        axiom: Option<String>,

        /// Custom rules, e.g. "F=FF,X=F[+X]F[-X]+X"
        #[arg(long, requires = "axiom")]
        rules: Option<String>,

        /// Turn angle in degrees
        #[arg(short, long)]
        angle: Option<f64>,

        #[command(flatten)]
        output: Output,
    },

    /// Nested regular polygons
    Polygon {
        /// Number of sides (3-8)
        #[arg(short = 'n', long, default_value_t = 5)]
        sides: u32,

        /// Recursion depth (2-6)
        #[arg(short, long, default_value_t = 4)]
        depth: u32,

        #[arg(long, default_value_t = 0.5)]
        scale: f64,

        #[command(flatten)]
        output: Output,
    },

    /// Life-like cellular automaton with cell aging
    Life {
        /// Grid size (10-100)
        #[arg(short = 'n', long, default_value_t = 50)]
        size: usize,

        /// Generations to evolve (1-50)
        #[arg(short, long, default_value_t = 20)]
        generations: u32,

        /// Birth/survival rule
        #[arg(short, long, default_value = "B36/S23")]
        rule: Rule,

        #[command(flatten)]
        output: Output,
    },

    /// Load a saved JSON snapshot and render it
    Load {
        path: PathBuf,

        #[command(flatten)]
        output: Output,
    },
}

fn main() -> Result<(), ArtError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let settings = Settings::load();

    let (mut pattern, output) = match cli.command {
        Commands::Fractal {
            kind,
            iterations,
            scale,
            output,
        } => {
            let config = FractalConfig {
                iterations,
                scale_factor: scale,
                kind,
            };
            (Pattern::Fractal(config), output)
        }
        Commands::Tree {
            depth,
            branches,
            random,
            season,
            output,
        } => {
            let mut config = TreeConfig::new(depth, random, branches);
            config.apply_season(season);
            (Pattern::Tree(config), output)
        }
        Commands::Spiral {
            kind,
            segments,
            bidirectional,
            galaxy,
            fibonacci,
            output,
        } => {
            let config = match galaxy {
                Some(arms) => SpiralConfig::galaxy(segments, arms),
                None if fibonacci => SpiralConfig::fibonacci(),
                None => SpiralConfig::new(segments, kind, bidirectional),
            };
            (Pattern::Spiral(config), output)
        }
        Commands::Lsystem {
            preset,
            depth,
            axiom,
            rules,
            angle,
            output,
        } => {
            let mut config = match (axiom, rules) {
                (Some(axiom), Some(rules)) => LSystemConfig {
                    axiom,
                    rules: parse_rules(&rules)?,
                    depth: 4,
                    angle_degrees: 25.0,
                },
                _ => match preset.to_lowercase().as_str() {
                    "plant" | "sticks" => LSystemConfig::plant(5),
                    "sierpinski" | "square" => LSystemConfig::square_sierpinski(4),
                    "koch" | "snowflake" => LSystemConfig::koch_snowflake(3),
                    _ => return Err(ArtError::UnknownKind(preset)),
                },
            };
            if let Some(depth) = depth {
                config.depth = depth;
            }
            if let Some(angle) = angle {
                config.angle_degrees = angle;
            }
            (Pattern::LSystem(config), output)
        }
        Commands::Polygon {
            sides,
            depth,
            scale,
            output,
        } => {
            let config = PolygonConfig {
                sides,
                depth,
                scale_factor: scale,
            };
            (Pattern::Polygon(config), output)
        }
        Commands::Life {
            size,
            generations,
            rule,
            output,
        } => {
            let seed = resolve_seed(&output, &settings);
            let mut config = AutomatonConfig::new(size, generations, seed);
            config.rule = rule;
            (Pattern::Automaton(config), output)
        }
        Commands::Load { path, output } => {
            let mut artwork = Artwork::load(&path)?;
            artwork.pattern.clamp_to_limits();
            if let Some(title) = &output.title {
                artwork.title = title.clone();
            }
            if let Some(artist) = &output.artist {
                artwork.artist = artist.clone();
            }
            return present(artwork, &output, &settings);
        }
    };

    pattern.clamp_to_limits();
    let title = output
        .title
        .clone()
        .unwrap_or_else(|| pattern.art_type().to_string());
    let artist = output
        .artist
        .clone()
        .unwrap_or_else(|| settings.artist_or("Anonymous").to_string());
    present(Artwork::new(title, artist, pattern), &output, &settings)
}

/// `--seed`, then the settings file, then the clock
fn resolve_seed(output: &Output, settings: &Settings) -> u64 {
    output.seed.or(settings.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    })
}

/// Render once into a recorder, then replay into every requested sink
fn present(artwork: Artwork, output: &Output, settings: &Settings) -> Result<(), ArtError> {
    let seed = resolve_seed(output, settings);
    tracing::debug!(seed, title = %artwork.title, "rendering artwork");

    let mut recorder = Recorder::new();
    let trace = artwork.render(&mut recorder, &mut StdRng::seed_from_u64(seed));

    if !output.no_print {
        let mut term = Terminal::fit();
        recorder.replay(&mut term);
        term.print_to_stdout()?;
    }

    println!("{}", artwork);
    if output.trace {
        print!("{}", trace);
    }

    if let Some(path) = &output.png {
        let mut png = PngCanvas::new();
        recorder.replay(&mut png);
        png.save(&settings.resolve(path))?;
    }
    if let Some(path) = &output.save {
        artwork.save(&settings.resolve(path))?;
    }
    if let Some(path) = &output.export {
        artwork.export_description(&settings.resolve(path))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_shared_flags_per_subcommand() {
        let cli = Cli::try_parse_from([
            "recurart", "spiral", "--kind", "golden", "-n", "120", "--seed", "7", "--no-print",
        ])
        .unwrap();
        match cli.command {
            Commands::Spiral {
                kind,
                segments,
                output,
                ..
            } => {
                assert_eq!(kind, SpiralKind::Golden);
                assert_eq!(segments, 120);
                assert_eq!(output.seed, Some(7));
                assert!(output.no_print);
            }
            _ => panic!("expected spiral"),
        }
    }

    #[test]
    fn rejects_bad_rule() {
        assert!(Cli::try_parse_from(["recurart", "life", "--rule", "X9"]).is_err());
    }

    #[test]
    fn seed_precedence() {
        let cli = Cli::try_parse_from(["recurart", "polygon", "--seed", "3"]).unwrap();
        let Commands::Polygon { output, .. } = cli.command else {
            panic!("expected polygon");
        };
        let settings = Settings {
            seed: Some(99),
            ..Settings::default()
        };
        assert_eq!(resolve_seed(&output, &settings), 3);

        let cli = Cli::try_parse_from(["recurart", "polygon"]).unwrap();
        let Commands::Polygon { output, .. } = cli.command else {
            panic!("expected polygon");
        };
        assert_eq!(resolve_seed(&output, &settings), 99);
    }
}
