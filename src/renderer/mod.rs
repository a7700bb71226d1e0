//! Render data
//!
//! The crate draws nothing itself. It hands a host renderer triangle lists
//! for the polygon edges and the ball.

pub mod shapes;
pub mod vertex;

pub use shapes::frame;
pub use vertex::{Vertex, as_floats, colors};
