use crate::error::ArtError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// User settings read from `<config_dir>/recurart/config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Artist name used when `--artist` is not given
    pub artist: Option<String>,
    /// Directory that relative output paths are resolved against
    pub output_dir: Option<PathBuf>,
    /// Default seed for randomized patterns
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring settings file");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ArtError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recurart")
            .join("config.toml")
    }

    /// Resolve an output path against `output_dir` when it is relative
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn artist_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.artist.as_deref().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "artist = \"Ada\"\noutput_dir = \"/tmp/art\"\nseed = 42").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.artist.as_deref(), Some("Ada"));
        assert_eq!(settings.seed, Some(42));
        assert_eq!(
            settings.resolve(Path::new("tree.png")),
            PathBuf::from("/tmp/art/tree.png")
        );
        assert_eq!(
            settings.resolve(Path::new("/abs/tree.png")),
            PathBuf::from("/abs/tree.png")
        );
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"not a number\"").unwrap();
        assert!(matches!(Settings::load_from(file.path()), Err(ArtError::Toml(_))));
    }

    #[test]
    fn artist_fallback() {
        let settings = Settings::default();
        assert_eq!(settings.artist_or("Anonymous"), "Anonymous");
    }
}
