//! Simulation module
//!
//! Naming and geometry are pure functions. Physics lives behind
//! [`PhysicsWorld`]; the [`Toy`] driver ties them together:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod naming;
pub mod polygon;
pub mod spawn;
pub mod state;
pub mod toy;
pub mod world;

pub use arena::ArenaWorld;
pub use collision::{CollisionResult, OrientedRect, ball_rect_collision, bounce_velocity};
pub use naming::{exclaim, polygon_name, strip_suffix};
pub use polygon::{EdgeSpec, PolygonShape, build_edges, chord_length, incircle_radius};
pub use spawn::{RadialSampling, random_interior_point, safe_radius};
pub use state::{PolygonState, ToyEvent};
pub use toy::{TickInput, Toy};
pub use world::{BodyId, BodyTag, ContactPair, DynamicBody, PhysicsWorld, StaticBody};
