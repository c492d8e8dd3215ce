//! Renderer configuration
//!
//! Uses RON (Rusty Object Notation) so the file stays hand-editable.
//! Every field has a default; a missing file means "all defaults".

use std::fs;
use std::path::{Path, PathBuf};

use macroquad::logging::{info, warn};
use serde::{Serialize, Deserialize};

use crate::rasterizer::{Color, Vec3, HEIGHT, WIDTH};
use crate::scene::SceneMode;

/// Default config location, relative to the working directory
pub const CONFIG_PATH: &str = "renderer.ron";

/// Error type for config loading and saving
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Camera placement for the 3D scene
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    /// Rough up direction; the real one is derived by look-at
    pub up: Vec3,
    /// Vertical field of view, in turns
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 4.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: 0.25,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Test tone settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub enabled: bool,
    pub hz: u32,
    /// Amplitude on a 16-bit sample scale
    pub volume: i16,
    pub sample_rate: u32,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hz: 256,
            volume: 2000,
            sample_rate: 48000,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Framebuffer size; fixed for the life of the process
    pub framebuffer_width: usize,
    pub framebuffer_height: usize,
    pub clear_color: Color,
    pub start_scene: SceneMode,
    pub camera: CameraConfig,
    /// Automatic spin of the cube, in turns per second
    pub spin_speed: f32,
    /// Manual rotation speed, in turns per second (W/S/A/D)
    pub turn_speed: f32,
    /// Pixels per second for the 2D scenes
    pub move_speed: f32,
    pub tone: ToneConfig,
    pub screenshot_path: PathBuf,
    pub log_fps: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 1024,
            framebuffer_width: WIDTH,
            framebuffer_height: HEIGHT,
            clear_color: Color::new(20, 20, 28),
            start_scene: SceneMode::Cube,
            camera: CameraConfig::default(),
            spin_speed: 0.1,
            turn_speed: 0.25,
            move_speed: 60.0,
            tone: ToneConfig::default(),
            screenshot_path: PathBuf::from("screenshot.png"),
            log_fps: true,
        }
    }
}

impl RendererConfig {
    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a config from a RON string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let mut config: Self = ron::from_str(s)?;
        config.fix_framebuffer_size();
        Ok(config)
    }

    /// A zero-sized framebuffer has nothing to draw into; use the default size
    fn fix_framebuffer_size(&mut self) {
        if self.framebuffer_width == 0 || self.framebuffer_height == 0 {
            warn!(
                "Framebuffer size {}x{} is empty, using {}x{}",
                self.framebuffer_width, self.framebuffer_height, WIDTH, HEIGHT
            );
            self.framebuffer_width = WIDTH;
            self.framebuffer_height = HEIGHT;
        }
    }

    /// Save the config as pretty RON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());

        let contents = ron::ser::to_string_pretty(self, config)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load the config, falling back to defaults when the file is missing
    /// or unreadable
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = RendererConfig::parse("(framebuffer_width: 64, tone: (hz: 440))").unwrap();
        assert_eq!(config.framebuffer_width, 64);
        assert_eq!(config.framebuffer_height, HEIGHT);
        assert_eq!(config.tone.hz, 440);
        assert_eq!(config.tone.volume, 2000);
        assert_eq!(config.start_scene, SceneMode::Cube);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("edge-raster-config-{}.ron", std::process::id()));
        let mut config = RendererConfig::default();
        config.start_scene = SceneMode::Gradient;
        config.clear_color = Color::new(1, 2, 3);
        config.save(&path).unwrap();

        let loaded = RendererConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.start_scene, SceneMode::Gradient);
        assert_eq!(loaded.clear_color, Color::new(1, 2, 3));
        assert_eq!(loaded.camera.position, config.camera.position);
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let err = RendererConfig::parse("(window_width: \"wide\")").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_empty_framebuffer_falls_back_to_default_size() {
        let config = RendererConfig::parse("(framebuffer_width: 0, framebuffer_height: 64)").unwrap();
        assert_eq!((config.framebuffer_width, config.framebuffer_height), (WIDTH, HEIGHT));
        let config = RendererConfig::parse("(framebuffer_width: 32, framebuffer_height: 16)").unwrap();
        assert_eq!((config.framebuffer_width, config.framebuffer_height), (32, 16));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = RendererConfig::load_or_default("/nonexistent/renderer.ron");
        assert_eq!(config.window_width, 1024);
    }
}
