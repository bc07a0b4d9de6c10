//! JSON configuration and report helpers.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use quadscan_core::Quadrilateral;
use quadscan_marker::MarkerLocatorParams;
use quadscan_outline::OutlineParams;

use crate::locator::{LocateMode, Located};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Locator selection plus the parameters of both locators.
///
/// Every field is optional in JSON; missing ones take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    pub mode: LocateMode,
    pub markers: MarkerLocatorParams,
    pub outline: OutlineParams,
}

impl LocateConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// What one located frame looked like, for dumping next to the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocateReport {
    #[serde(default)]
    pub image_path: Option<String>,
    pub width: usize,
    pub height: usize,
    pub found: bool,
    pub quad: Option<Quadrilateral>,
    pub detection: Located,
}

impl LocateReport {
    pub fn new(width: usize, height: usize, detection: Located) -> Self {
        Self {
            image_path: None,
            width,
            height,
            found: detection.is_found(),
            quad: detection.quad(),
            detection,
        }
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
