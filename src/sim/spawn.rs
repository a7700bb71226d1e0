//! Ball spawn point sampling
//!
//! The ball must start fully inside the polygon, so points are drawn from the
//! polygon's incircle shrunk by the ball radius.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::polygon::incircle_radius;
use crate::direction;

/// How the radial distance inside the safe disk is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RadialSampling {
    /// Radius uniform in `[0, safe]`; crowds points toward the center
    Linear,
    /// Radius `safe * sqrt(u)`; uniform over the disk area
    #[default]
    AreaUniform,
}

impl RadialSampling {
    /// Map a uniform `u` in `[0, 1)` to a fraction of the safe radius
    #[inline]
    pub fn radius_fraction(&self, u: f32) -> f32 {
        match self {
            RadialSampling::Linear => u,
            RadialSampling::AreaUniform => u.sqrt(),
        }
    }
}

/// Largest distance from the center at which a body of `clearance` radius
/// still fits inside a regular `sides`-gon. Never negative.
pub fn safe_radius(radius: f32, sides: u32, clearance: f32) -> f32 {
    (incircle_radius(radius, sides) - clearance).max(0.0)
}

/// Random point at least `clearance` away from every edge of the polygon.
///
/// Returns `center` itself when the polygon is too small for the clearance.
pub fn random_interior_point<R: Rng>(
    center: Vec2,
    radius: f32,
    sides: u32,
    clearance: f32,
    sampling: RadialSampling,
    rng: &mut R,
) -> Vec2 {
    let safe = safe_radius(radius, sides, clearance);
    if safe <= 0.0 {
        return center;
    }
    let r = sampling.radius_fraction(rng.random::<f32>()) * safe;
    let theta = rng.random::<f32>() * TAU;
    center + direction(theta) * r
}
