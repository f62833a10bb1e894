use std::fs;

use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Override the screen size (pixels) instead of asking the OS
    pub screen_size: Option<(u32, u32)>,

    /// Flip landmarks horizontally, so that the pointer follows the hand
    /// the way a mirror image would
    pub mirror_x: bool,

    /// Hands with a detector score below this are ignored; hands without
    /// a score are always accepted
    pub min_hand_score: f32,

    /// After a click/screenshot fires, the same gesture cannot fire again
    /// for this long (ms), even if released and repeated
    pub action_cooldown_ms: u64,

    /// Where screenshot images are written
    pub screenshot_directory: String,

    /// Publish the outcome of every frame on "gestures"
    pub publish_gestures: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            screen_size: None,
            mirror_x: true,
            min_hand_score: 0.7,
            action_cooldown_ms: 500,
            screenshot_directory: String::from("."),
            publish_gestures: true,
        }
    }
}

impl AgentConfig {
    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        match fs::write(config_file_path, text) {
            Ok(()) => {
                info!("Wrote config to file: {:?}", config_file_path);
                Ok(())
            }
            Err(e) => {
                error!("Error writing config to file: {:?}", e);
                Err(anyhow!("failed to write config to {}: {}", config_file_path, e))
            }
        }
    }
}

/// Load the config from disk; if there is no file yet, write out (and use)
/// the defaults
pub fn load_config_from_file(config_file_path: &str) -> Result<AgentConfig> {
    match fs::read_to_string(config_file_path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Agent config file not found, will create a default one at {}",
                config_file_path
            );
            let config = AgentConfig::default();
            config.write_config_to_file(config_file_path)?;
            Ok(config)
        }
        Err(e) => Err(anyhow!(
            "Failed to load agent config from {}: {}",
            config_file_path,
            e
        )),
        Ok(s) => {
            info!("Loaded agent config OK from \"{}\"", config_file_path);
            match serde_json::from_str::<AgentConfig>(&s) {
                Ok(loaded_config) => {
                    debug!("Config parsed data from file: {:?}", &loaded_config);
                    Ok(loaded_config)
                }
                Err(e) => Err(anyhow!("Failed to parse config data: {}", e)),
            }
        }
    }
}
