use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Settings shared by every slicing operation, stored as TOML.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SliceConfig {
    /// Edges closer than this to parallel with the plane are skipped.
    pub tolerance: f64,
    /// Slice large meshes on all cores.
    pub parallel: bool,
    /// Face count below which slicing stays on one thread.
    pub parallel_threshold: usize,

    pub svg: SvgConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SvgConfig {
    pub stroke_width: f64,
    pub padding: f64,
}

impl SliceConfig {
    /// Loads the config from `path`, falling back to the defaults if it is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load config, using defaults: {:#}", err);
                SliceConfig::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(if path.exists() {
            let string = fs::read_to_string(path)
                .with_context(|| format!("Failed to read `{}`", path.display()))?;
            let config = toml::from_str::<Self>(&string)?;
            config.validate()?;
            info!("Successfully loaded config file `{}`", path.display());
            config
        } else {
            info!("No config file found, using defaults");
            Self::default()
        })
    }

    /// Checks the values serde can not, like a negative tolerance.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tolerance.is_finite() && self.tolerance >= 0.0,
            "Tolerance must be a finite, non-negative number, got {}",
            self.tolerance
        );
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let string = toml::to_string(self)?;
        fs::write(path, string)?;
        Ok(())
    }
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            parallel: true,
            parallel_threshold: 50_000,
            svg: SvgConfig::default(),
        }
    }
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            stroke_width: 0.1,
            padding: 1.0,
        }
    }
}
