use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Host-level settings for a window showing the light pillar.
///
/// The pillar's own visual constants are fixed; only how it is hosted can be
/// configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillarConfig {
    /// Fixed seed for a reproducible field. `None` draws a new field each run.
    pub seed: Option<u64>,
    /// Scale of the drawing around the window centre. Range: 1.0..2.0
    pub overfill: f32,
    /// Initial window size in points.
    pub window_size: [f32; 2],
    pub title: String,
}

impl Default for PillarConfig {
    fn default() -> Self {
        Self {
            seed: None,
            overfill: 1.2,
            window_size: [1280.0, 800.0],
            title: "Light Pillar".to_string(),
        }
    }
}

impl PillarConfig {
    /// Parse a config; missing fields take their defaults.
    pub fn from_json(json: &str) -> io::Result<Self> {
        let mut config: PillarConfig =
            serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.overfill = config.overfill.clamp(1.0, 2.0);
        Ok(config)
    }
}

/// Save a config file to disk as JSON.
pub fn save_config(path: &Path, config: &PillarConfig) -> io::Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Load a config file from disk.
pub fn load_config(path: &Path) -> io::Result<PillarConfig> {
    let json = std::fs::read_to_string(path)?;
    PillarConfig::from_json(&json)
}
