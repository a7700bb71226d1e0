//! Polygon Bounce - a ball in a polygon that grows a side on every hit
//!
//! Core modules:
//! - `sim`: Naming, polygon geometry, physics seam and the toy driver
//! - `renderer`: Vertex data for a host renderer
//! - `speech`: Announcer seam (cancel-then-speak)
//! - `settings`: Data-driven configuration

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod speech;

pub use error::{Result, ToyError};
pub use settings::{RadialSampling, Settings};

use glam::Vec2;

/// Toy configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz keeps the ball from tunneling edges)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Side count at startup and after reset
    pub const START_SIDES: u32 = 3;

    /// Canvas size limits
    pub const MAX_CANVAS_WIDTH: f32 = 800.0;
    pub const MAX_CANVAS_HEIGHT: f32 = 600.0;
    /// Polygon circumradius as a fraction of canvas width
    pub const POLYGON_RADIUS_FRACTION: f32 = 0.3;

    /// Polygon edges
    pub const EDGE_THICKNESS: f32 = 10.0;
    /// Added to every edge so neighbours overlap at the corners
    pub const EDGE_EXTENSION: f32 = 5.0;
    /// First vertex points straight up (screen coordinates, y down)
    pub const ANGLE_OFFSET: f32 = -std::f32::consts::FRAC_PI_2;

    /// Ball defaults (speeds in pixels/second)
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_RESTITUTION: f32 = 1.5;
    pub const BALL_MIN_SPEED: f32 = 60.0;
    pub const BALL_MAX_SPEED: f32 = 600.0;
    pub const BALL_START_VELOCITY: [f32; 2] = [120.0, -120.0];

    /// Static bodies bounce perfectly
    pub const WALL_RESTITUTION: f32 = 1.0;
    /// Canvas border walls
    pub const WALL_THICKNESS: f32 = 60.0;
    pub const WALL_OVERHANG: f32 = 20.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector for an angle
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    polar_to_cartesian(1.0, theta)
}
