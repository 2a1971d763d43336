//! Board configuration loaded from an optional TOML file.

use std::{fs, path::Path};

use anyhow::Context as _;
use serde::Deserialize;
use snake_arcade_core::BoardGeometry;

const DEFAULT_BOARD_WIDTH: u32 = 900;
const DEFAULT_BOARD_HEIGHT: u32 = 650;
const DEFAULT_CELL_LENGTH: u32 = 25;

/// Root of the TOML configuration document.
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct Config {
    /// Pixel dimensions the playfield is carved from.
    #[serde(default)]
    pub(crate) board: BoardConfig,
}

/// Pixel surface and cell size the grid is derived from.
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct BoardConfig {
    /// Width of the board surface in pixels.
    #[serde(default = "default_width")]
    pub(crate) width: u32,
    /// Height of the board surface in pixels.
    #[serde(default = "default_height")]
    pub(crate) height: u32,
    /// Edge length of a single square cell in pixels.
    #[serde(default = "default_cell_length")]
    pub(crate) cell_length: u32,
}

fn default_width() -> u32 {
    DEFAULT_BOARD_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_BOARD_HEIGHT
}

fn default_cell_length() -> u32 {
    DEFAULT_CELL_LENGTH
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            cell_length: DEFAULT_CELL_LENGTH,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the provided path, or defaults when absent.
    ///
    /// A missing file is not an error; a present but malformed file is.
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            eprintln!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Geometry derived from the configured pixel surface.
    pub(crate) fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.board.width, self.board.height, self.board.cell_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_core::GridSize;

    #[test]
    fn defaults_match_the_reference_board() {
        let config = Config::default();
        assert_eq!(config.geometry().grid_size(), GridSize::new(36, 26));
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let config: Config = toml::from_str("[board]\ncell_length = 50\n").expect("parse config");
        assert_eq!(config.board.width, 900);
        assert_eq!(config.board.cell_length, 50);
        assert_eq!(config.geometry().grid_size(), GridSize::new(18, 13));
    }

    #[test]
    fn empty_documents_are_fully_defaulted() {
        let config: Config = toml::from_str("").expect("parse empty config");
        assert_eq!(config.board.width, 900);
    }
}
