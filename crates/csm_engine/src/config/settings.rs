//! Shadow, camera and demo settings

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::shadows::{DEFAULT_CASCADE_COUNT, DEFAULT_SPLIT_LAMBDA, MAX_SHADOW_CASCADES};

/// Which shadow technique the frame setup computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShadowTechnique {
    /// One orthographic shadow map around the whole scene
    Single,
    /// One shadow map per camera frustum slice
    #[default]
    Cascaded,
}

/// # Shadow Configuration
///
/// Shadow map budget and cascade split parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Technique used for the depth pass
    pub technique: ShadowTechnique,
    /// Total shadow map resolution, shared between cascades
    pub resolution: u32,
    /// Number of cascades (ignored by the single-map technique)
    pub cascade_count: usize,
    /// Blend between logarithmic (1.0) and uniform (0.0) splits
    pub split_lambda: f32,
    /// Fit the single-map light projection to the scene bounds
    /// instead of using the fixed box
    pub fit_light_to_scene: bool,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            technique: ShadowTechnique::Cascaded,
            resolution: 1024,
            cascade_count: DEFAULT_CASCADE_COUNT,
            split_lambda: DEFAULT_SPLIT_LAMBDA,
            fit_light_to_scene: true,
        }
    }
}

impl ShadowConfig {
    /// Edge length of one shadow map tile
    ///
    /// Cascades split the resolution budget evenly; the single-map technique
    /// gets all of it.
    pub fn tile_size(&self) -> u32 {
        match self.technique {
            ShadowTechnique::Single => self.resolution,
            ShadowTechnique::Cascaded => {
                let count = u32::try_from(self.cascade_count.max(1)).unwrap_or(u32::MAX);
                self.resolution / count
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::Invalid("Shadow resolution must be positive".to_string()));
        }
        if self.cascade_count == 0 || self.cascade_count > MAX_SHADOW_CASCADES {
            return Err(ConfigError::Invalid(format!(
                "Cascade count must be between 1 and {}, got {}",
                MAX_SHADOW_CASCADES, self.cascade_count
            )));
        }
        if self.tile_size() == 0 {
            return Err(ConfigError::Invalid(format!(
                "Resolution {} is too small for {} cascades",
                self.resolution, self.cascade_count
            )));
        }
        if !(0.0..=1.0).contains(&self.split_lambda) {
            return Err(ConfigError::Invalid(format!(
                "Split lambda must be within [0, 1], got {}",
                self.split_lambda
            )));
        }
        Ok(())
    }
}

/// # Camera Configuration
///
/// Viewport and projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Near plane, and the lower clamp for the fitted near plane
    pub near: f32,
    /// Far plane when clip fitting is disabled
    pub far: f32,
    /// Derive near/far from the scene bounds every frame
    pub fit_clip_to_scene: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            width: 1280,
            height: 720,
            near: 0.1,
            far: 100.0,
            fit_clip_to_scene: true,
        }
    }
}

impl CameraConfig {
    /// Viewport aspect ratio
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("Viewport size must be positive".to_string()));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "Field of view must be within (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "Clip range must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

/// # Demo Configuration
///
/// Everything the headless shadow demo needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Title used for FPS reports
    pub title: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Number of frames to simulate
    pub frames: u32,
    /// Simulated seconds per frame
    pub fixed_timestep: f64,
    /// Animate the light around the scene
    pub moving_light: bool,
    /// Light position when the animation is off
    pub light_position: [f32; 3],
    /// Camera settings
    pub camera: CameraConfig,
    /// Shadow settings
    pub shadows: ShadowConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Cascaded Shadow Maps".to_string(),
            log_level: "info".to_string(),
            frames: 600,
            fixed_timestep: 1.0 / 60.0,
            moving_light: true,
            light_position: [-2.0, 4.0, -1.0],
            camera: CameraConfig::default(),
            shadows: ShadowConfig::default(),
        }
    }
}

impl Config for DemoConfig {}

impl DemoConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_timestep <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Fixed timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        let [x, y, z] = self.light_position;
        if x == 0.0 && y == 0.0 && z == 0.0 {
            return Err(ConfigError::Invalid("Light position cannot be the origin".to_string()));
        }
        self.camera.validate()?;
        self.shadows.validate()?;
        Ok(())
    }
}
