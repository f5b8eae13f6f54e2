//! Scene and camera types

use serde::{Deserialize, Serialize};

/// A single panorama scene
///
/// Titles are the matching target for fuzzy voice resolution. Uniqueness is
/// not guaranteed; resolution always yields an index into the scene list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier (stable within a session)
    pub id: u32,
    /// Display title, e.g. "Living Room"
    pub title: String,
    /// Panorama image source URI
    pub source: String,
    /// Initial yaw in degrees
    pub yaw: f64,
    /// Initial pitch in degrees
    pub pitch: f64,
    /// Initial horizontal field of view in degrees
    pub hfov: f64,
}

impl Scene {
    /// Create a scene with the default camera orientation
    pub fn new(id: u32, title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            source: source.into(),
            yaw: 0.0,
            pitch: 0.0,
            hfov: 100.0,
        }
    }

    /// Set the initial camera pose
    pub fn with_pose(mut self, yaw: f64, pitch: f64, hfov: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.hfov = hfov;
        self
    }
}

/// Camera orientation as reported by the panorama viewer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub yaw: f64,
    pub pitch: f64,
    pub hfov: f64,
}

impl CameraPose {
    pub fn new(yaw: f64, pitch: f64, hfov: f64) -> Self {
        Self { yaw, pitch, hfov }
    }
}

/// Panorama quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Reduced bandwidth
    Eco,
    /// Engine-selected quality
    #[default]
    Auto,
    /// Maximum quality
    Best,
}

impl QualityTier {
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityTier::Eco => "Eco",
            QualityTier::Auto => "Auto",
            QualityTier::Best => "Best",
        }
    }
}

/// Filter scenes by a case-insensitive title substring
///
/// Returns the indices of matching scenes. An empty query matches everything.
pub fn filter_scenes(scenes: &[Scene], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    let needle = needle.trim();
    scenes
        .iter()
        .enumerate()
        .filter(|(_, s)| s.title.to_lowercase().contains(needle))
        .map(|(i, _)| i)
        .collect()
}
