use serde::{Deserialize, Serialize};

use quadscan_core::{Frame, FrameError, Quadrilateral};
use quadscan_marker::{MarkerDetection, MarkerLocator};
use quadscan_outline::{OutlineDetection, OutlineLocator};

use crate::io::LocateConfig;

/// Which locator a [`Locator`] runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocateMode {
    /// Circular corner markers confirmed by an embedded square.
    #[default]
    Markers,
    /// Largest four-vertex edge contour.
    Outline,
}

/// Result of one [`Locator::locate`] call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Located {
    Markers(MarkerDetection),
    Outline(OutlineDetection),
}

impl Located {
    pub fn mode(&self) -> LocateMode {
        match self {
            Located::Markers(_) => LocateMode::Markers,
            Located::Outline(_) => LocateMode::Outline,
        }
    }

    /// The located corners, `None` for the marker sentinel.
    pub fn quad(&self) -> Option<Quadrilateral> {
        match self {
            Located::Markers(det) => (!det.quad.is_sentinel()).then_some(det.quad),
            Located::Outline(det) => det.quad,
        }
    }

    pub fn is_found(&self) -> bool {
        self.quad().is_some()
    }
}

/// Config-driven entry point running either locator.
#[derive(Clone, Debug, Default)]
pub struct Locator {
    mode: LocateMode,
    markers: MarkerLocator,
    outline: OutlineLocator,
}

impl Locator {
    pub fn new(config: &LocateConfig) -> Self {
        Self {
            mode: config.mode,
            markers: MarkerLocator::new(config.markers.clone()),
            outline: OutlineLocator::new(config.outline),
        }
    }

    pub fn mode(&self) -> LocateMode {
        self.mode
    }

    pub fn locate(&self, frame: &Frame<'_>) -> Result<Located, FrameError> {
        Ok(match self.mode {
            LocateMode::Markers => Located::Markers(self.markers.locate_detailed(frame)?),
            LocateMode::Outline => Located::Outline(self.outline.locate_detailed(frame)?),
        })
    }
}
