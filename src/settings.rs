//! Toy settings
//!
//! Geometry, physics tuning and speech preferences. Defaults reproduce the
//! classic demo; a JSON file (native) or LocalStorage (web) can override them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, ToyError};
use crate::sim::polygon::PolygonShape;

pub use crate::sim::spawn::RadialSampling;

/// Speech preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Announce polygon names at all
    pub enabled: bool,
    /// Utterance volume (0.0 - 1.0)
    pub volume: f32,
    /// Utterance rate (0.1 - 10.0, 1.0 = normal)
    pub rate: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
            rate: 1.0,
        }
    }
}

/// Toy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Polygon ===
    /// Side count at startup and after reset
    pub start_sides: u32,
    /// Circumradius (pixels)
    pub polygon_radius: f32,
    pub edge_thickness: f32,
    /// Extra length per edge so corners overlap
    pub edge_extension: f32,
    /// Angle of the first vertex (radians, -π/2 = pointing up)
    pub angle_offset: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_restitution: f32,
    /// Launch velocity (pixels/s)
    pub ball_start_velocity: [f32; 2],
    pub min_speed: f32,
    pub max_speed: f32,
    pub spawn_sampling: RadialSampling,

    // === World ===
    /// Gravity (pixels/s², y down)
    pub gravity: [f32; 2],
    pub wall_restitution: f32,

    // === Speech ===
    pub speech: SpeechSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_canvas(MAX_CANVAS_WIDTH, MAX_CANVAS_HEIGHT)
    }
}

impl Settings {
    /// Settings for an explicit canvas size
    pub fn for_canvas(width: f32, height: f32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,

            start_sides: START_SIDES,
            polygon_radius: width * POLYGON_RADIUS_FRACTION,
            edge_thickness: EDGE_THICKNESS,
            edge_extension: EDGE_EXTENSION,
            angle_offset: ANGLE_OFFSET,

            ball_radius: BALL_RADIUS,
            ball_restitution: BALL_RESTITUTION,
            ball_start_velocity: BALL_START_VELOCITY,
            min_speed: BALL_MIN_SPEED,
            max_speed: BALL_MAX_SPEED,
            spawn_sampling: RadialSampling::default(),

            gravity: [0.0, GRAVITY],
            wall_restitution: WALL_RESTITUTION,

            speech: SpeechSettings::default(),
        }
    }

    /// Settings sized to a browser viewport: the canvas takes 95% of the
    /// width and 70% of the height, capped at 800x600.
    pub fn for_viewport(viewport_width: f32, viewport_height: f32) -> Self {
        Self::for_canvas(
            MAX_CANVAS_WIDTH.min(viewport_width * 0.95),
            MAX_CANVAS_HEIGHT.min(viewport_height * 0.7),
        )
    }

    /// Center of the canvas (and of the polygon)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::from(self.gravity)
    }

    pub fn ball_start_velocity(&self) -> Vec2 {
        Vec2::from(self.ball_start_velocity)
    }

    /// Polygon geometry (everything but the side count)
    pub fn polygon_shape(&self) -> PolygonShape {
        PolygonShape {
            center: self.center(),
            radius: self.polygon_radius,
            thickness: self.edge_thickness,
            edge_extension: self.edge_extension,
            angle_offset: self.angle_offset,
        }
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("polygon_radius", self.polygon_radius),
            ("ball_radius", self.ball_radius),
            ("max_speed", self.max_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ToyError::Settings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.start_sides < 1 {
            return Err(ToyError::Settings("start_sides must be at least 1".into()));
        }
        if !self.min_speed.is_finite() || self.min_speed < 0.0 || self.min_speed > self.max_speed {
            return Err(ToyError::Settings(format!(
                "min_speed must be in [0, max_speed], got {}",
                self.min_speed
            )));
        }
        if !self.ball_restitution.is_finite()
            || self.ball_restitution < 0.0
            || !self.wall_restitution.is_finite()
            || self.wall_restitution < 0.0
        {
            return Err(ToyError::Settings("restitution must be non-negative".into()));
        }
        if !self.gravity().is_finite() || !self.ball_start_velocity().is_finite() {
            return Err(ToyError::Settings(
                "gravity and ball_start_velocity must be finite".into(),
            ));
        }
        self.polygon_shape()
            .validate()
            .map_err(|e| ToyError::Settings(e.to_string()))
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "polygon_bounce_settings";

    /// Load settings from LocalStorage (WASM only), falling back to `fallback`
    #[cfg(target_arch = "wasm32")]
    pub fn load(fallback: Self) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        fallback
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
