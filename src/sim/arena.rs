//! Reference physics world
//!
//! A small kinematic backend for headless runs and tests: circles fall under
//! gravity and bounce off static rectangles. There is no mass, rotation,
//! friction or circle-circle contact. Contacts are reported only on the step
//! they begin, like a "collision start" event.

use glam::Vec2;
use std::collections::{BTreeMap, BTreeSet};

use super::collision::{OrientedRect, ball_rect_collision, bounce_velocity};
use super::world::{BodyId, BodyTag, ContactPair, DynamicBody, PhysicsWorld, StaticBody};

#[derive(Debug, Clone)]
struct StaticEntry {
    tag: BodyTag,
    rect: OrientedRect,
    restitution: f32,
}

/// Kinematic circles against static rectangles
#[derive(Debug, Clone)]
pub struct ArenaWorld {
    gravity: Vec2,
    /// BTreeMaps keep iteration (and so contact order) deterministic
    statics: BTreeMap<BodyId, StaticEntry>,
    dynamics: BTreeMap<BodyId, DynamicBody>,
    /// Pairs touching at the end of the previous step (dynamic, static)
    touching: BTreeSet<(BodyId, BodyId)>,
    next_id: u32,
}

impl ArenaWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            statics: BTreeMap::new(),
            dynamics: BTreeMap::new(),
            touching: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Number of bodies of both kinds
    pub fn body_count(&self) -> usize {
        self.statics.len() + self.dynamics.len()
    }

    /// Number of bodies carrying `tag`
    pub fn count_tagged(&self, tag: BodyTag) -> usize {
        self.statics.values().filter(|s| s.tag == tag).count()
            + self.dynamics.values().filter(|d| d.tag == tag).count()
    }

    /// Move a dynamic body without touching its velocity
    pub fn set_position(&mut self, id: BodyId, position: Vec2) {
        if let Some(body) = self.dynamics.get_mut(&id) {
            body.position = position;
        }
    }

    fn allocate(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl PhysicsWorld for ArenaWorld {
    fn add_static_body(&mut self, body: StaticBody) -> BodyId {
        let id = self.allocate();
        self.statics.insert(
            id,
            StaticEntry {
                tag: body.tag,
                rect: OrientedRect::new(body.center, body.size, body.angle),
                restitution: body.restitution,
            },
        );
        id
    }

    fn add_dynamic_body(&mut self, body: DynamicBody) -> BodyId {
        let id = self.allocate();
        self.dynamics.insert(id, body);
        id
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        let removed = self.statics.remove(&id).is_some() || self.dynamics.remove(&id).is_some();
        if removed {
            self.touching.retain(|&(d, s)| d != id && s != id);
        }
        removed
    }

    fn step(&mut self, dt: f32) -> Vec<ContactPair> {
        let mut now_touching = BTreeSet::new();
        let mut started = Vec::new();

        for (&dyn_id, body) in self.dynamics.iter_mut() {
            // Semi-implicit Euler
            body.velocity += self.gravity * dt;
            body.position += body.velocity * dt;

            for (&static_id, entry) in &self.statics {
                let result = ball_rect_collision(body.position, body.radius, &entry.rect);
                if !result.hit {
                    continue;
                }

                body.position += result.normal * result.penetration;
                let restitution = body.restitution.max(entry.restitution);
                body.velocity = bounce_velocity(body.velocity, result.normal, restitution);

                let key = (dyn_id, static_id);
                now_touching.insert(key);
                if !self.touching.contains(&key) {
                    started.push(ContactPair {
                        body_a: dyn_id,
                        tag_a: body.tag,
                        body_b: static_id,
                        tag_b: entry.tag,
                    });
                }
            }
        }

        self.touching = now_touching;
        started
    }

    fn position(&self, id: BodyId) -> Option<Vec2> {
        self.dynamics
            .get(&id)
            .map(|d| d.position)
            .or_else(|| self.statics.get(&id).map(|s| s.rect.center))
    }

    fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.dynamics
            .get(&id)
            .map(|d| d.velocity)
            .or_else(|| self.statics.get(&id).map(|_| Vec2::ZERO))
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(body) = self.dynamics.get_mut(&id) {
            body.velocity = velocity;
        }
    }
}
