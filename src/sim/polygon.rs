//! Regular polygon edge geometry
//!
//! A hollow polygon is built from one thick rectangle per side:
//! - midpoint: halfway between two consecutive circumcircle vertices
//! - length: chord between those vertices plus a small extension, so
//!   neighbouring edges overlap at the corners
//! - angle: direction of the chord (atan2)
//! - thickness: constant for the whole polygon

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::consts::{ANGLE_OFFSET, EDGE_EXTENSION, EDGE_THICKNESS};
use crate::error::{Result, ToyError};
use crate::polar_to_cartesian;

/// One polygon side, ready to become a static collision body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Center of the edge rectangle
    pub midpoint: Vec2,
    /// Long side of the rectangle (chord + extension)
    pub length: f32,
    /// Rotation of the long side (radians)
    pub angle: f32,
    /// Short side of the rectangle
    pub thickness: f32,
}

impl EdgeSpec {
    /// Unit vector along the edge
    #[inline]
    pub fn tangent(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Unit vector perpendicular to the edge
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.tangent().perp()
    }

    /// Half extents in the edge's local frame (x along the edge)
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.length / 2.0, self.thickness / 2.0)
    }

    /// Ends of the centerline
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let half = self.tangent() * (self.length / 2.0);
        (self.midpoint - half, self.midpoint + half)
    }

    /// Rectangle corners, counter-clockwise in the local frame
    pub fn corners(&self) -> [Vec2; 4] {
        let t = self.tangent() * (self.length / 2.0);
        let n = self.normal() * (self.thickness / 2.0);
        [
            self.midpoint - t - n,
            self.midpoint + t - n,
            self.midpoint + t + n,
            self.midpoint - t + n,
        ]
    }
}

/// Everything about a polygon except its side count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    pub center: Vec2,
    /// Circumradius
    pub radius: f32,
    pub thickness: f32,
    /// Added to every chord length
    pub edge_extension: f32,
    /// Angle of the first vertex (radians)
    pub angle_offset: f32,
}

impl PolygonShape {
    /// Shape with the default thickness, extension and upward-pointing first vertex
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            thickness: EDGE_THICKNESS,
            edge_extension: EDGE_EXTENSION,
            angle_offset: ANGLE_OFFSET,
        }
    }

    /// Reject non-finite or out-of-range parameters
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(ToyError::invalid(format!(
                "polygon center must be finite, got {}",
                self.center
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ToyError::invalid(format!(
                "polygon radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(ToyError::invalid(format!(
                "edge thickness must be non-negative and finite, got {}",
                self.thickness
            )));
        }
        if !self.edge_extension.is_finite() || self.edge_extension < 0.0 {
            return Err(ToyError::invalid(format!(
                "edge extension must be non-negative and finite, got {}",
                self.edge_extension
            )));
        }
        if !self.angle_offset.is_finite() {
            return Err(ToyError::invalid(format!(
                "angle offset must be finite, got {}",
                self.angle_offset
            )));
        }
        Ok(())
    }

    /// Vertex `i` of an `sides`-gon on the circumcircle (wraps at `sides`)
    pub fn vertex(&self, i: u32, sides: u32) -> Vec2 {
        let theta = TAU * i as f32 / sides as f32 + self.angle_offset;
        self.center + polar_to_cartesian(self.radius, theta)
    }

    /// Radius of the inscribed circle of an `sides`-gon
    pub fn incircle_radius(&self, sides: u32) -> f32 {
        incircle_radius(self.radius, sides)
    }
}

/// Inscribed circle radius of a regular polygon with circumradius `radius`
#[inline]
pub fn incircle_radius(radius: f32, sides: u32) -> f32 {
    radius * (PI / sides as f32).cos()
}

/// Chord between consecutive vertices of a regular polygon
#[inline]
pub fn chord_length(radius: f32, sides: u32) -> f32 {
    2.0 * radius * (PI / sides as f32).sin()
}

/// Build the edges of a regular polygon, in vertex order.
///
/// Always returns exactly `sides` edges.
pub fn build_edges(shape: &PolygonShape, sides: u32) -> Result<Vec<EdgeSpec>> {
    if sides < 1 {
        return Err(ToyError::invalid("side count must be at least 1, got 0"));
    }
    shape.validate()?;

    let edges = (0..sides)
        .map(|i| {
            let v1 = shape.vertex(i, sides);
            let v2 = shape.vertex(i + 1, sides);
            let d = v2 - v1;
            EdgeSpec {
                midpoint: (v1 + v2) / 2.0,
                length: d.length() + shape.edge_extension,
                angle: d.y.atan2(d.x),
                thickness: shape.thickness,
            }
        })
        .collect();

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn shape(extension: f32) -> PolygonShape {
        PolygonShape {
            edge_extension: extension,
            ..PolygonShape::new(Vec2::new(400.0, 300.0), 240.0)
        }
    }

    #[test]
    fn test_triangle_points_up() {
        let s = shape(0.0);
        let top = s.vertex(0, 3);
        assert!((top.x - 400.0).abs() < EPS);
        assert!((top.y - 60.0).abs() < EPS);
    }

    #[test]
    fn test_square_edges() {
        let s = PolygonShape {
            angle_offset: 0.0,
            ..shape(0.0)
        };
        let edges = build_edges(&s, 4).unwrap();
        assert_eq!(edges.len(), 4);

        // First edge runs from (r, 0) to (0, r) around the center
        let e = edges[0];
        assert!((e.midpoint - Vec2::new(520.0, 420.0)).length() < EPS);
        assert!((e.angle - 3.0 * PI / 4.0).abs() < EPS);
        assert!((e.length - 240.0 * 2.0_f32.sqrt()).abs() < EPS);
        assert_eq!(e.thickness, EDGE_THICKNESS);
    }

    #[test]
    fn test_extension_is_added_to_chord() {
        let edges = build_edges(&shape(5.0), 6).unwrap();
        for e in &edges {
            assert!((e.length - (chord_length(240.0, 6) + 5.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_monogon_and_digon() {
        let s = shape(0.0);
        let one = build_edges(&s, 1).unwrap();
        assert_eq!(one.len(), 1);
        // Both vertices coincide
        assert!(one[0].length.abs() < EPS);

        let two = build_edges(&s, 2).unwrap();
        assert_eq!(two.len(), 2);
        assert!((two[0].length - 480.0).abs() < EPS);
    }

    #[test]
    fn test_invalid_arguments() {
        let s = shape(5.0);
        assert!(matches!(build_edges(&s, 0), Err(ToyError::InvalidArgument(_))));

        let bad_radius = PolygonShape { radius: 0.0, ..s };
        assert!(build_edges(&bad_radius, 3).is_err());

        let bad_center = PolygonShape {
            center: Vec2::new(f32::NAN, 0.0),
            ..s
        };
        assert!(build_edges(&bad_center, 3).is_err());

        let bad_extension = PolygonShape {
            edge_extension: -1.0,
            ..s
        };
        assert!(build_edges(&bad_extension, 3).is_err());

        let bad_offset = PolygonShape {
            angle_offset: f32::INFINITY,
            ..s
        };
        assert!(build_edges(&bad_offset, 3).is_err());
    }

    #[test]
    fn test_rebuild_is_identical() {
        let s = shape(5.0);
        assert_eq!(build_edges(&s, 3).unwrap(), build_edges(&s, 3).unwrap());
    }

    #[test]
    fn test_corners_span_length_and_thickness() {
        let e = build_edges(&shape(5.0), 5).unwrap()[2];
        let c = e.corners();
        assert!(((c[1] - c[0]).length() - e.length).abs() < EPS);
        assert!(((c[3] - c[0]).length() - e.thickness).abs() < EPS);
        let (a, b) = e.endpoints();
        assert!(((a + b) / 2.0 - e.midpoint).length() < EPS);
    }

    proptest! {
        #[test]
        fn prop_edge_count_matches_sides(sides in 1u32..400, radius in 1.0f32..1000.0) {
            let s = PolygonShape::new(Vec2::ZERO, radius);
            prop_assert_eq!(build_edges(&s, sides).unwrap().len(), sides as usize);
        }

        #[test]
        fn prop_zero_extension_gives_chord(sides in 3u32..200, radius in 10.0f32..500.0) {
            let s = PolygonShape { edge_extension: 0.0, ..PolygonShape::new(Vec2::new(5.0, -7.0), radius) };
            let chord = chord_length(radius, sides);
            for e in build_edges(&s, sides).unwrap() {
                prop_assert!((e.length - chord).abs() < radius * 1e-4);
            }
        }

        #[test]
        fn prop_polygon_is_closed(sides in 3u32..200, offset in -PI..PI) {
            let s = PolygonShape {
                edge_extension: 0.0,
                angle_offset: offset,
                ..PolygonShape::new(Vec2::new(100.0, 100.0), 80.0)
            };
            let edges = build_edges(&s, sides).unwrap();
            let tol = 1e-2;
            for (i, e) in edges.iter().enumerate() {
                let (_, end) = e.endpoints();
                let (next_start, _) = edges[(i + 1) % edges.len()].endpoints();
                prop_assert!((end - next_start).length() < tol);
            }
            // Last edge ends on the first vertex
            let (_, last_end) = edges[edges.len() - 1].endpoints();
            prop_assert!((last_end - s.vertex(0, sides)).length() < tol);
        }
    }
}
