//! # Simulation Configuration
//!
//! Tunables for every system, loaded once at startup from TOML. Every field
//! has a default, so an empty file (or a file with a single section) is a
//! valid configuration.
//!
//! ```toml
//! [physics]
//! gravity = 0.6
//! world_width = 1024.0
//!
//! [ai]
//! seed = 42
//!
//! [input]
//! space = "jump"
//! arrowleft = "left"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NimbusError, NimbusResult};
use crate::input::KeyBindings;

/// Physics pass tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to `position.y` once per tick.
    pub gravity: f32,
    /// Upper bound applied to `position.y` right after gravity.
    pub max_fall: f32,
    /// Right edge of the playfield.
    pub world_width: f32,
    /// Bottom edge of the playfield.
    pub world_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_fall: 10.0,
            world_width: 800.0,
            world_height: 600.0,
        }
    }
}

/// Animation system tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames advance on every `stride`-th tick.
    pub stride: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { stride: 5 }
    }
}

/// AI system tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Seed for the decision RNG.
    pub seed: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { seed: 0x4e49_4d42 }
    }
}

/// Event bus tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Events in flight before new ones are dropped.
    pub capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

/// Game loop tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameLoopConfig {
    /// Largest `dt` handed to systems, in seconds.
    pub max_delta: f32,
    /// Frame budget used by the stats, in frames per second.
    pub target_fps: u32,
    /// Log frames that run over budget.
    pub log_slow_frames: bool,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            max_delta: 0.1,
            target_fps: 60,
            log_slow_frames: false,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Physics pass.
    pub physics: PhysicsConfig,
    /// Animation system.
    pub animation: AnimationConfig,
    /// AI system.
    pub ai: AiConfig,
    /// Event bus.
    pub events: EventConfig,
    /// Game loop.
    pub game_loop: GameLoopConfig,
    /// Keyboard bindings; replaces the default table when present.
    pub input: KeyBindings,
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Parse`] for malformed TOML and
    /// [`NimbusError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> NimbusResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::Io`] if the file can't be read, otherwise as
    /// [`SimulationConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> NimbusResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| NimbusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`NimbusError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> NimbusResult<()> {
        let physics = &self.physics;
        if !positive(physics.world_width) || !positive(physics.world_height) {
            return Err(NimbusError::InvalidConfig(format!(
                "world size must be positive, got {}x{}",
                physics.world_width, physics.world_height
            )));
        }
        if !physics.gravity.is_finite() || !physics.max_fall.is_finite() {
            return Err(NimbusError::InvalidConfig(
                "physics.gravity and physics.max_fall must be finite".into(),
            ));
        }
        if self.animation.stride == 0 {
            return Err(NimbusError::InvalidConfig(
                "animation.stride must be at least 1".into(),
            ));
        }
        if self.events.capacity == 0 {
            return Err(NimbusError::InvalidConfig(
                "events.capacity must be at least 1".into(),
            ));
        }
        if !positive(self.game_loop.max_delta) || self.game_loop.target_fps == 0 {
            return Err(NimbusError::InvalidConfig(
                "game_loop.max_delta and game_loop.target_fps must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.physics.gravity, 0.5);
        assert_eq!(config.physics.max_fall, 10.0);
        assert_eq!(config.animation.stride, 5);
    }

    #[test]
    fn test_partial_sections() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [physics]
            world_width = 1024.0

            [ai]
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.physics.world_width, 1024.0);
        assert_eq!(config.physics.world_height, 600.0);
        assert_eq!(config.ai.seed, 42);
        assert_eq!(config.input, KeyBindings::default());
    }

    #[test]
    fn test_input_section_replaces_bindings() {
        let config = SimulationConfig::from_toml_str("[input]\nspace = \"jump\"").unwrap();
        assert_eq!(config.input.action_for("Space"), Some(nimbus_core::Action::Jump));
        assert_eq!(config.input.action_for("k"), None);
    }

    #[test]
    fn test_rejects_zero_stride() {
        let err = SimulationConfig::from_toml_str("[animation]\nstride = 0").unwrap_err();
        assert!(matches!(err, NimbusError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = SimulationConfig::from_toml_str("[physics\ngravity = ").unwrap_err();
        assert!(matches!(err, NimbusError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimulationConfig::from_path("/nonexistent/nimbus.toml").unwrap_err();
        assert!(matches!(err, NimbusError::Io { .. }));
    }
}
