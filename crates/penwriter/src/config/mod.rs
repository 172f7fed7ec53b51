//! Configuration file for the `penwriter` tool.

use std::path::{Path, PathBuf};

use penwriter_font::{FontError, FontTable};
use penwriter_layout::LayoutParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub page: PageConfig,
    pub text: TextConfig,
    pub height: HeightConfig,
}

/// Font selection. The bundled font is used when `path` is unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub path: Option<PathBuf>,
}

/// Drawable area of the writing robot, in machine units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub max_line_width: i32,
    /// Distance below the first line that baselines may reach.
    pub drawable_depth: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Input beyond this many bytes is dropped.
    pub max_bytes: usize,
}

/// Character heights the tool accepts, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightConfig {
    pub min: f64,
    pub max: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            max_line_width: LayoutParams::DEFAULT_MAX_LINE_WIDTH,
            drawable_depth: LayoutParams::DEFAULT_DRAWABLE_DEPTH,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { max_bytes: 1024 }
    }
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            min: 4.0,
            max: 10.0,
        }
    }
}

impl HeightConfig {
    pub fn accepts(&self, height: f64) -> bool {
        (self.min..=self.max).contains(&height)
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the configured font, or the bundled one.
    pub fn load_font(&self) -> Result<FontTable, FontError> {
        match &self.font.path {
            Some(path) => FontTable::load(path),
            None => FontTable::builtin(),
        }
    }

    /// Page geometry for text of the given height.
    pub fn layout_params(&self, height: f64) -> LayoutParams {
        LayoutParams::new(height)
            .with_max_line_width(self.page.max_line_width)
            .with_drawable_depth(self.page.drawable_depth)
    }
}
