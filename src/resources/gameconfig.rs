//! Game configuration resource.
//!
//! Gameplay tuning loaded from an INI file. Every value has a default so the
//! simulation starts even without a file; missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 1024
//! height = 1024
//! leaf_count = 2000
//! leaf_drag = 100
//! seed = 1234
//!
//! [player]
//! speed = 100
//! turn_rate = 0.05
//! start_x = 450
//! start_y = 400
//!
//! [blower]
//! cone_half_angle = 0.2
//! muzzle_distance = 50
//! strength = 2000
//! falloff_distance = 50
//! impulse_clamp = 0
//! energy = 3000
//!
//! [sweeper]
//! pickup_radius = 40
//! speed = 130
//! start_x = 370
//! start_y = 2000
//! wrap_y = 1050
//!
//! [intro]
//! leaf_count = 600
//! max_leaf_scale = 10
//! scatter_speed = 400
//! shake_ms = 500
//! leaf_drag = 10
//! ```
//!
//! `impulse_clamp = 0` disables the clamp. `seed` is optional; without it the
//! RNG is seeded from the OS.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
    pub leaf_count: usize,
    /// Linear drag of garden leaves.
    pub leaf_drag: f32,
    pub seed: Option<u64>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 1024.0,
            leaf_count: 2000,
            leaf_drag: 100.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub speed: f32,
    pub turn_rate: f32,
    pub start_x: f32,
    pub start_y: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: 100.0,
            turn_rate: 0.05,
            start_x: 450.0,
            start_y: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlowerSettings {
    pub cone_half_angle: f32,
    pub muzzle_distance: f32,
    pub strength: f32,
    pub falloff_distance: f32,
    /// Per-component impulse clamp; `None` when unset or 0.
    pub impulse_clamp: Option<f32>,
    pub energy: u32,
}

impl Default for BlowerSettings {
    fn default() -> Self {
        Self {
            cone_half_angle: 0.2,
            muzzle_distance: 50.0,
            strength: 2000.0,
            falloff_distance: 50.0,
            impulse_clamp: None,
            energy: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweeperSettings {
    pub pickup_radius: f32,
    pub speed: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub wrap_y: f32,
}

impl Default for SweeperSettings {
    fn default() -> Self {
        Self {
            pickup_radius: 40.0,
            speed: 130.0,
            start_x: 370.0,
            start_y: 2000.0,
            wrap_y: 1050.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntroSettings {
    /// Upper bound of leaves spawned by the `create` phase.
    pub leaf_count: usize,
    pub max_leaf_scale: f32,
    pub scatter_speed: f32,
    pub shake_ms: u64,
    pub leaf_drag: f32,
}

impl Default for IntroSettings {
    fn default() -> Self {
        Self {
            leaf_count: 600,
            max_leaf_scale: 10.0,
            scatter_speed: 400.0,
            shake_ms: 500,
            leaf_drag: 10.0,
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub world: WorldSettings,
    pub player: PlayerSettings,
    pub blower: BlowerSettings,
    pub sweeper: SweeperSettings,
    pub intro: IntroSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_f32(config: &Ini, section: &str, key: &str) -> Option<f32> {
    config
        .getfloat(section, key)
        .ok()
        .flatten()
        .map(|v| v as f32)
}

fn get_u64(config: &Ini, section: &str, key: &str) -> Option<u64> {
    config.getuint(section, key).ok().flatten()
}

impl GameConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            world: WorldSettings::default(),
            player: PlayerSettings::default(),
            blower: BlowerSettings::default(),
            sweeper: SweeperSettings::default(),
            intro: IntroSettings::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [world] section
        if let Some(width) = get_f32(config, "world", "width") {
            self.world.width = width;
        }
        if let Some(height) = get_f32(config, "world", "height") {
            self.world.height = height;
        }
        if let Some(count) = get_u64(config, "world", "leaf_count") {
            self.world.leaf_count = count as usize;
        }
        if let Some(drag) = get_f32(config, "world", "leaf_drag") {
            self.world.leaf_drag = drag;
        }
        if let Some(seed) = get_u64(config, "world", "seed") {
            self.world.seed = Some(seed);
        }

        // [player] section
        if let Some(speed) = get_f32(config, "player", "speed") {
            self.player.speed = speed;
        }
        if let Some(turn_rate) = get_f32(config, "player", "turn_rate") {
            self.player.turn_rate = turn_rate;
        }
        if let Some(x) = get_f32(config, "player", "start_x") {
            self.player.start_x = x;
        }
        if let Some(y) = get_f32(config, "player", "start_y") {
            self.player.start_y = y;
        }

        // [blower] section
        if let Some(angle) = get_f32(config, "blower", "cone_half_angle") {
            self.blower.cone_half_angle = angle;
        }
        if let Some(distance) = get_f32(config, "blower", "muzzle_distance") {
            self.blower.muzzle_distance = distance;
        }
        if let Some(strength) = get_f32(config, "blower", "strength") {
            self.blower.strength = strength;
        }
        if let Some(distance) = get_f32(config, "blower", "falloff_distance") {
            self.blower.falloff_distance = distance;
        }
        if let Some(clamp) = get_f32(config, "blower", "impulse_clamp") {
            self.blower.impulse_clamp = (clamp > 0.0).then_some(clamp);
        }
        if let Some(energy) = get_u64(config, "blower", "energy") {
            self.blower.energy = energy as u32;
        }

        // [sweeper] section
        if let Some(radius) = get_f32(config, "sweeper", "pickup_radius") {
            self.sweeper.pickup_radius = radius;
        }
        if let Some(speed) = get_f32(config, "sweeper", "speed") {
            self.sweeper.speed = speed;
        }
        if let Some(x) = get_f32(config, "sweeper", "start_x") {
            self.sweeper.start_x = x;
        }
        if let Some(y) = get_f32(config, "sweeper", "start_y") {
            self.sweeper.start_y = y;
        }
        if let Some(y) = get_f32(config, "sweeper", "wrap_y") {
            self.sweeper.wrap_y = y;
        }

        // [intro] section
        if let Some(count) = get_u64(config, "intro", "leaf_count") {
            self.intro.leaf_count = count as usize;
        }
        if let Some(scale) = get_f32(config, "intro", "max_leaf_scale") {
            self.intro.max_leaf_scale = scale;
        }
        if let Some(speed) = get_f32(config, "intro", "scatter_speed") {
            self.intro.scatter_speed = speed;
        }
        if let Some(ms) = get_u64(config, "intro", "shake_ms") {
            self.intro.shake_ms = ms;
        }
        if let Some(drag) = get_f32(config, "intro", "leaf_drag") {
            self.intro.leaf_drag = drag;
        }

        info!(
            "Loaded config: {}x{} playfield, {} leaves, cone={} rad, pickup={}, energy={}",
            self.world.width,
            self.world.height,
            self.world.leaf_count,
            self.blower.cone_half_angle,
            self.sweeper.pickup_radius,
            self.blower.energy
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [world] section
        set("world", "width", self.world.width.to_string());
        set("world", "height", self.world.height.to_string());
        set("world", "leaf_count", self.world.leaf_count.to_string());
        set("world", "leaf_drag", self.world.leaf_drag.to_string());
        if let Some(seed) = self.world.seed {
            set("world", "seed", seed.to_string());
        }

        // [player] section
        set("player", "speed", self.player.speed.to_string());
        set("player", "turn_rate", self.player.turn_rate.to_string());
        set("player", "start_x", self.player.start_x.to_string());
        set("player", "start_y", self.player.start_y.to_string());

        // [blower] section
        set("blower", "cone_half_angle", self.blower.cone_half_angle.to_string());
        set("blower", "muzzle_distance", self.blower.muzzle_distance.to_string());
        set("blower", "strength", self.blower.strength.to_string());
        set("blower", "falloff_distance", self.blower.falloff_distance.to_string());
        set(
            "blower",
            "impulse_clamp",
            self.blower.impulse_clamp.unwrap_or(0.0).to_string(),
        );
        set("blower", "energy", self.blower.energy.to_string());

        // [sweeper] section
        set("sweeper", "pickup_radius", self.sweeper.pickup_radius.to_string());
        set("sweeper", "speed", self.sweeper.speed.to_string());
        set("sweeper", "start_x", self.sweeper.start_x.to_string());
        set("sweeper", "start_y", self.sweeper.start_y.to_string());
        set("sweeper", "wrap_y", self.sweeper.wrap_y.to_string());

        // [intro] section
        set("intro", "leaf_count", self.intro.leaf_count.to_string());
        set("intro", "max_leaf_scale", self.intro.max_leaf_scale.to_string());
        set("intro", "scatter_speed", self.intro.scatter_speed.to_string());
        set("intro", "shake_ms", self.intro.shake_ms.to_string());
        set("intro", "leaf_drag", self.intro.leaf_drag.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.world.leaf_count, 2000);
        assert_eq!(config.blower.energy, 3000);
        assert_eq!(config.blower.impulse_clamp, None);
        assert_eq!(config.sweeper.pickup_radius, 40.0);
        assert_eq!(config.config_path, PathBuf::from("./config.ini"));
    }

    #[test]
    fn test_load_from_str_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[world]\nleaf_count = 50\nseed = 9\n\n[blower]\ncone_half_angle = 0.5\nimpulse_clamp = 30\n",
            )
            .unwrap();
        assert_eq!(config.world.leaf_count, 50);
        assert_eq!(config.world.seed, Some(9));
        assert_eq!(config.blower.cone_half_angle, 0.5);
        assert_eq!(config.blower.impulse_clamp, Some(30.0));
        // untouched
        assert_eq!(config.world.width, 1024.0);
        assert_eq!(config.player.speed, 100.0);
    }

    #[test]
    fn test_zero_clamp_disables_clamp() {
        let mut config = GameConfig::new();
        config.blower.impulse_clamp = Some(5.0);
        config.load_from_str("[blower]\nimpulse_clamp = 0\n").unwrap();
        assert_eq!(config.blower.impulse_clamp, None);
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let mut config = GameConfig::new();
        config.load_from_str("[sweeper]\nspeed = fast\n").unwrap();
        assert_eq!(config.sweeper.speed, 130.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/leafblower/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path("/nonexistent/leafblower/config.ini"));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "leafblower-config-{}.ini",
            std::process::id()
        ));
        let mut original = GameConfig::with_path(&path);
        original.world.leaf_count = 77;
        original.blower.impulse_clamp = Some(12.5);
        original.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.world.leaf_count, 77);
        assert_eq!(loaded.blower.impulse_clamp, Some(12.5));
    }
}
