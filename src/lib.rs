//! Recursive pattern generators for fractals, trees, spirals, L-systems,
//! nested polygons and life-like automata.
//!
//! Every generator writes drawing primitives to a [`canvas::Canvas`] and
//! returns a textual trace of the same pass.

pub mod artwork;
pub mod automaton;
pub mod canvas;
pub mod config;
pub mod error;
pub mod fractal;
pub mod logging;
pub mod lsystem;
pub mod png;
pub mod polygon;
pub mod settings;
pub mod spiral;
pub mod terminal;
pub mod tree;

pub use artwork::{Artwork, Pattern};
pub use canvas::{Canvas, NullCanvas, Point, Primitive, Recorder, Rgb};
pub use error::ArtError;
