// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CorrosionResult;

/// Environment variable selecting the tabulated-data directory.
pub const DATA_DIR_ENV: &str = "CORROSION_DATA_DIR";

/// Polarization grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Sample count for polarization curves.
    pub points: usize,
    /// Hard cap on sample count.
    pub max_points: usize,
    /// Half-width of the default scan window around E_corr (V).
    pub span_v: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings {
            points: 501,
            max_points: 5001,
            span_v: 0.5,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
    #[serde(default)]
    pub grid: GridSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            data_dir: PathBuf::from("data"),
            grid: GridSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Build from the environment; falls back to `./data`.
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));
        EngineConfig {
            data_dir,
            grid: GridSettings::default(),
        }
    }

    /// Load from a JSON file.
    pub fn from_file(path: &str) -> CorrosionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Grid point count clamped to the configured maximum.
    pub fn grid_points(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.grid.points)
            .clamp(3, self.grid.max_points)
    }
}
