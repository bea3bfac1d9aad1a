//! Configuration structs with defaults matching the gallery walkthrough and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level walkthrough configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Player movement and look settings.
    pub movement: MovementConfig,
    /// Camera projection and spawn settings.
    pub camera: CameraConfig,
    /// Player collider and walkable bounds.
    pub collision: CollisionConfig,
    /// Frustum and occlusion culling settings.
    pub culling: CullingConfig,
    /// Level-of-detail distance bands.
    pub lod: LodConfig,
    /// Walking head bob.
    pub head_bob: HeadBobConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Movement and look configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in units per second.
    pub walk_speed: f32,
    /// Running speed in units per second.
    pub run_speed: f32,
    /// Rate at which velocity pursues the target velocity (1/s).
    pub acceleration: f32,
    /// Exponential friction coefficient applied to horizontal velocity (1/s).
    pub friction: f32,
    /// Upper bound on the integration step, in seconds.
    pub max_frame_dt: f32,
    /// Horizontal speed cap as a multiple of the current base speed.
    pub max_speed_factor: f32,
    /// Radians of rotation per pixel of captured pointer motion.
    pub look_sensitivity: f32,
    /// Radians of rotation per pixel of touch drag.
    pub touch_look_sensitivity: f32,
    /// Per-60Hz-frame fraction of the remaining angle covered by look smoothing.
    pub look_smoothing: f32,
    /// Pitch limit in degrees (symmetric).
    pub max_pitch_deg: f32,
    /// Virtual joystick dead zone on each axis.
    pub joystick_deadzone: f32,
    /// Release every held intent when pointer capture is lost.
    pub clear_intents_on_capture_loss: bool,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Resting eye height above the floor.
    pub eye_height: f32,
    /// Spawn position.
    pub start_position: [f32; 3],
    /// Spawn yaw in radians.
    pub start_yaw: f32,
}

/// Collision configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    /// Radius of the player disc.
    pub player_radius: f32,
    /// Walkable rectangle as `[min_x, max_x, min_z, max_z]`.
    pub bounds: [f32; 4],
    /// Velocity scale applied on contact with a decoration collider.
    pub decoration_damping: f32,
    /// Velocity scale applied on contact with a catalogued object.
    pub catalogued_damping: f32,
}

/// Culling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CullingConfig {
    /// Minimum facing dot product for a wall to count as visible.
    pub occlusion_threshold: f32,
    /// Objects closer than this are always visible to occlusion culling.
    pub close_range: f32,
    /// Default bounding-sphere radius for display objects.
    pub display_radius: f32,
    /// Estimated draw calls avoided per culled display object.
    pub draw_calls_per_object: u32,
    /// Run frustum culling every N frames (1 = every frame).
    pub frustum_every_n_frames: u32,
    /// Run occlusion culling every N frames.
    pub occlusion_every_n_frames: u32,
    /// Run LOD selection every N frames.
    pub lod_every_n_frames: u32,
}

/// LOD configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Maximum distance for the high tier (inclusive).
    pub near: f32,
    /// Maximum distance for the medium tier (inclusive).
    pub far: f32,
    /// Nominal outer edge of the low tier. Not used for selection.
    pub low: f32,
}

/// Head bob configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadBobConfig {
    /// Enable the walking bob.
    pub enabled: bool,
    /// Phase advance per second while walking.
    pub frequency: f32,
    /// Vertical bob amplitude.
    pub amplitude: f32,
    /// Rate at which eye height settles back when standing still.
    pub settle_rate: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            run_speed: 7.0,
            acceleration: 12.0,
            friction: 10.0,
            max_frame_dt: 0.1,
            max_speed_factor: 1.5,
            look_sensitivity: 0.002,
            touch_look_sensitivity: 0.005,
            look_smoothing: 0.3,
            max_pitch_deg: 60.0,
            joystick_deadzone: 0.3,
            clear_intents_on_capture_loss: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 60.0,
            near: 0.1,
            far: 200.0,
            eye_height: 1.7,
            start_position: [0.0, 1.7, -8.0],
            start_yaw: std::f32::consts::PI,
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            player_radius: 0.5,
            bounds: [-13.2, 13.2, -13.4, 11.0],
            decoration_damping: 0.5,
            catalogued_damping: 0.3,
        }
    }
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            occlusion_threshold: 0.3,
            close_range: 8.0,
            display_radius: 2.0,
            draw_calls_per_object: 3,
            frustum_every_n_frames: 5,
            occlusion_every_n_frames: 3,
            lod_every_n_frames: 3,
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            near: 6.0,
            far: 12.0,
            low: 20.0,
        }
    }
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: 4.5,
            amplitude: 0.03,
            settle_rate: 5.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Platform config directory for the walkthrough, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("atrium"))
    }

    /// Read `config.ron` from `config_dir`, writing the defaults there first
    /// if it does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default walkthrough config to {}", path.display());
            return Ok(config);
        }
        let config = read_config(&path)?;
        log::info!("Loaded walkthrough config from {}", path.display());
        Ok(config)
    }

    /// Write `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&path, serialized).map_err(write_err)
    }

    /// Re-read `config.ron`. `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Walkthrough config changed on disk");
        Ok(Some(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("walk_speed: 4.0"));
        assert!(ron_str.contains("occlusion_threshold: 0.3"));
    }

    #[test]
    fn test_defaults_match_walkthrough_constants() {
        let config = Config::default();
        assert_eq!(config.movement.run_speed, 7.0);
        assert_eq!(config.collision.bounds, [-13.2, 13.2, -13.4, 11.0]);
        assert_eq!(config.lod.near, 6.0);
        assert_eq!(config.lod.far, 12.0);
        assert_eq!(config.culling.close_range, 8.0);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(movement: (walk_speed: 3.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.movement.walk_speed, 3.0);
        assert_eq!(config.movement.run_speed, 7.0);
        assert_eq!(config.lod, LodConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.lod.near = 5.0;
        config.culling.occlusion_threshold = 0.5;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.movement.walk_speed = 5.5;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap().unwrap();
        assert_eq!(reloaded.movement.walk_speed, 5.5);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
