//! Polygon state and toy events
//!
//! The side count, its name and its edges always change together: a new
//! `PolygonState` is built in full and then swapped in, so nobody ever sees
//! edges for one side count next to the name of another.

use serde::{Deserialize, Serialize};

use super::naming::polygon_name;
use super::polygon::{EdgeSpec, PolygonShape, build_edges};
use crate::error::Result;

/// Everything derived from the current side count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonState {
    pub sides: u32,
    pub name: String,
    /// Exactly `sides` edges, in vertex order
    pub edges: Vec<EdgeSpec>,
}

impl PolygonState {
    /// Name and edges for `sides` sides of `shape`
    pub fn build(sides: u32, shape: &PolygonShape) -> Result<Self> {
        let edges = build_edges(shape, sides)?;
        let name = polygon_name(sides)?;
        Ok(Self { sides, name, edges })
    }
}

/// Things that happened during a tick, for the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToyEvent {
    /// The ball hit an edge and the polygon grew
    SidesChanged { from: u32, to: u32, name: String },
    /// The reset trigger rebuilt ball and polygon
    Reset { name: String },
    /// A rebuild was rejected; the previous polygon stays in place
    RebuildFailed { sides: u32, reason: String },
}
