//! Configuration system
//!
//! Tunable simulation constants live in one explicit typed struct that is
//! assembled at startup and handed to systems through the update context.

use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Simulation tuning constants
///
/// Velocities are in world units per second, positive y pointing down.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Downward acceleration applied to airborne entities
    pub gravity: f32,

    /// Horizontal speed injected per frame while walking, and the
    /// airborne horizontal velocity clamp
    pub walk_speed: f32,

    /// Upward launch speed of a jump or double jump
    pub jump_speed: f32,

    /// Upward impulse the player receives after stomping an enemy
    pub stomp_bounce_speed: f32,

    /// Horizontal shove away from a stomped enemy
    pub stomp_knockback_speed: f32,

    /// Upward kick applied to the player on lethal contact
    pub death_kick_speed: f32,

    /// Default playback rate for animation clips
    pub animation_fps: f32,

    /// Default delay before a pooled entity respawns
    pub respawn_delay: f32,

    /// Logical screen width in world units
    pub screen_width: f32,

    /// Logical screen height in world units
    pub screen_height: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 2000.0,
            walk_speed: 100.0,
            jump_speed: 500.0,
            stomp_bounce_speed: 400.0,
            stomp_knockback_speed: 100.0,
            death_kick_speed: 600.0,
            animation_fps: 20.0,
            respawn_delay: 5.0,
            screen_width: 640.0,
            screen_height: 368.0,
        }
    }
}

impl Config for SimConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = SimConfig::default();
        assert!(config.gravity > 0.0);
        assert!(config.jump_speed > 0.0);
        assert!(config.walk_speed > 0.0);
    }

    #[test]
    fn toml_round_trip() {
        let config = SimConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SimConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.gravity, config.gravity);
        assert_eq!(parsed.walk_speed, config.walk_speed);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let parsed: SimConfig = toml::from_str("gravity = 1500.0").unwrap();
        assert_eq!(parsed.gravity, 1500.0);
        assert_eq!(parsed.walk_speed, SimConfig::default().walk_speed);
    }
}
