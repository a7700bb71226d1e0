//! Physics world seam
//!
//! The toy never integrates or resolves anything itself. It talks to a world
//! through this trait: add/remove bodies, step, and read the contacts that
//! started during the step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a body in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// What a body stands for, as far as the toy cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyTag {
    Ball,
    PolygonEdge,
    Wall,
}

/// A fixed, oriented rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBody {
    pub tag: BodyTag,
    pub center: Vec2,
    /// Full width (along `angle`) and height
    pub size: Vec2,
    pub angle: f32,
    pub restitution: f32,
}

/// A moving circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBody {
    pub tag: BodyTag,
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    pub restitution: f32,
}

/// Two bodies that started touching during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPair {
    pub body_a: BodyId,
    pub tag_a: BodyTag,
    pub body_b: BodyId,
    pub tag_b: BodyTag,
}

impl ContactPair {
    /// True when one side is `a` and the other is `b`, in either order
    pub fn involves(&self, a: BodyTag, b: BodyTag) -> bool {
        (self.tag_a == a && self.tag_b == b) || (self.tag_a == b && self.tag_b == a)
    }

    /// True for a ball touching a polygon edge
    pub fn is_ball_on_edge(&self) -> bool {
        self.involves(BodyTag::Ball, BodyTag::PolygonEdge)
    }
}

/// A 2D physics backend.
///
/// `step` returns the contacts that began during that step; the caller
/// drains them instead of registering a callback.
pub trait PhysicsWorld {
    fn add_static_body(&mut self, body: StaticBody) -> BodyId;
    fn add_dynamic_body(&mut self, body: DynamicBody) -> BodyId;
    /// Returns false if the body was not in the world
    fn remove_body(&mut self, id: BodyId) -> bool;
    fn step(&mut self, dt: f32) -> Vec<ContactPair>;

    fn position(&self, id: BodyId) -> Option<Vec2>;
    fn velocity(&self, id: BodyId) -> Option<Vec2>;
    fn set_velocity(&mut self, id: BodyId, velocity: Vec2);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: BodyTag, b: BodyTag) -> ContactPair {
        ContactPair {
            body_a: BodyId(1),
            tag_a: a,
            body_b: BodyId(2),
            tag_b: b,
        }
    }

    #[test]
    fn test_ball_on_edge_either_order() {
        assert!(pair(BodyTag::Ball, BodyTag::PolygonEdge).is_ball_on_edge());
        assert!(pair(BodyTag::PolygonEdge, BodyTag::Ball).is_ball_on_edge());
        assert!(!pair(BodyTag::Ball, BodyTag::Wall).is_ball_on_edge());
        assert!(!pair(BodyTag::PolygonEdge, BodyTag::PolygonEdge).is_ball_on_edge());
    }
}
