//! Shape generation for 2D primitives
//!
//! Everything comes out as triangle lists in canvas coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::sim::polygon::EdgeSpec;
use crate::sim::toy::Toy;
use crate::sim::world::PhysicsWorld;
use crate::speech::Announcer;

/// Segments used for the ball
pub const BALL_SEGMENTS: u32 = 32;

/// Two triangles covering one edge rectangle
pub fn edge_rect(edge: &EdgeSpec, color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = edge.corners();
    [a, b, c, c, d, a]
        .into_iter()
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// All edges of a polygon
pub fn polygon_edges(edges: &[EdgeSpec], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(edges.len() * 6);
    for edge in edges {
        vertices.extend(edge_rect(edge, color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Polygon edges followed by the ball, ready to upload as one buffer
pub fn frame<W: PhysicsWorld, A: Announcer>(toy: &Toy<W, A>) -> Vec<Vertex> {
    let mut vertices = polygon_edges(&toy.polygon().edges, colors::EDGE);
    if let Some(pos) = toy.ball_position() {
        vertices.extend(circle(pos, toy.settings().ball_radius, colors::BALL, BALL_SEGMENTS));
    }
    vertices
}
