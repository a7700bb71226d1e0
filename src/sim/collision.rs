//! Collision detection and response for the reference world
//!
//! Only one pair type exists: a circular ball against an oriented rectangle
//! (a polygon edge or a canvas wall). The test happens in the rectangle's
//! local frame, where it reduces to clamping against the half extents.

use glam::Vec2;

/// A rectangle rotated about its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Vec2,
    pub half_extents: Vec2,
    /// Rotation of the local x axis (radians)
    pub angle: f32,
}

impl OrientedRect {
    pub fn new(center: Vec2, size: Vec2, angle: f32) -> Self {
        Self {
            center,
            half_extents: size / 2.0,
            angle,
        }
    }

    /// World point into the local frame
    #[inline]
    pub fn to_local(&self, p: Vec2) -> Vec2 {
        Vec2::from_angle(-self.angle).rotate(p - self.center)
    }

    /// Local direction back into world space
    #[inline]
    pub fn rotate_out(&self, v: Vec2) -> Vec2 {
        Vec2::from_angle(self.angle).rotate(v)
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and an oriented rectangle
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &OrientedRect) -> CollisionResult {
    let local = rect.to_local(ball_pos);
    let h = rect.half_extents;
    let closest = local.clamp(-h, h);

    if closest == local {
        // Center inside the rectangle: push out through the nearest face
        let gap_x = h.x - local.x.abs();
        let gap_y = h.y - local.y.abs();
        let (normal, face, gap) = if gap_x < gap_y {
            let n = Vec2::new(sign(local.x), 0.0);
            (n, Vec2::new(n.x * h.x, local.y), gap_x)
        } else {
            let n = Vec2::new(0.0, sign(local.y));
            (n, Vec2::new(local.x, n.y * h.y), gap_y)
        };
        return CollisionResult {
            hit: true,
            point: rect.center + rect.rotate_out(face),
            normal: rect.rotate_out(normal),
            penetration: gap + ball_radius,
        };
    }

    let offset = local - closest;
    let dist = offset.length();
    if dist >= ball_radius {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        point: rect.center + rect.rotate_out(closest),
        normal: rect.rotate_out(offset / dist),
        penetration: ball_radius - dist,
    }
}

/// Reflect the normal component of `velocity` scaled by `restitution`.
///
/// A ball already separating from the surface keeps its velocity.
#[inline]
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let vn = velocity.dot(normal);
    if vn >= 0.0 {
        velocity
    } else {
        velocity - (1.0 + restitution) * vn * normal
    }
}

#[inline]
fn sign(x: f32) -> f32 {
    if x < 0.0 { -1.0 } else { 1.0 }
}
