//! The toy driver
//!
//! Owns the physics world, the announcer and the current polygon. Each tick
//! steps the world, clamps the ball's speed and, when the ball has started
//! touching a polygon edge, swaps in a polygon with one more side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::naming::exclaim;
use super::spawn::random_interior_point;
use super::state::{PolygonState, ToyEvent};
use super::world::{BodyId, BodyTag, DynamicBody, PhysicsWorld, StaticBody};
use crate::consts::{MAX_SUBSTEPS, SIM_DT, WALL_OVERHANG, WALL_THICKNESS};
use crate::direction;
use crate::error::{Result, ToyError};
use crate::settings::Settings;
use crate::speech::{Announcer, announce};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Reset button: back to the start polygon with a fresh ball
    pub reset: bool,
}

/// Ball, polygon and canvas walls living in a physics world
pub struct Toy<W: PhysicsWorld, A: Announcer> {
    settings: Settings,
    world: W,
    announcer: A,
    polygon: PolygonState,
    edge_ids: Vec<BodyId>,
    wall_ids: Vec<BodyId>,
    ball: Option<BodyId>,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    accumulator: f32,
    /// Simulation tick counter
    time_ticks: u64,
}

impl<W: PhysicsWorld, A: Announcer> Toy<W, A> {
    /// Build the start polygon, the canvas walls and the ball, then announce
    /// the first name.
    pub fn new(settings: Settings, world: W, announcer: A, seed: u64) -> Result<Self> {
        settings.validate()?;
        let polygon = PolygonState::build(settings.start_sides, &settings.polygon_shape())?;

        let mut toy = Self {
            settings,
            world,
            announcer,
            polygon,
            edge_ids: Vec::new(),
            wall_ids: Vec::new(),
            ball: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            accumulator: 0.0,
            time_ticks: 0,
        };

        toy.spawn_walls();
        toy.spawn_edges();
        toy.spawn_ball();
        toy.announce_name();
        log::info!(
            "Toy started with seed {}: {} ({} sides)",
            seed,
            toy.polygon.name,
            toy.polygon.sides
        );

        Ok(toy)
    }

    pub fn sides(&self) -> u32 {
        self.polygon.sides
    }

    pub fn name(&self) -> &str {
        &self.polygon.name
    }

    pub fn polygon(&self) -> &PolygonState {
        &self.polygon
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn announcer(&self) -> &A {
        &self.announcer
    }

    pub fn announcer_mut(&mut self) -> &mut A {
        &mut self.announcer
    }

    pub fn ball_id(&self) -> Option<BodyId> {
        self.ball
    }

    pub fn ball_position(&self) -> Option<Vec2> {
        self.ball.and_then(|id| self.world.position(id))
    }

    pub fn ball_velocity(&self) -> Option<Vec2> {
        self.ball.and_then(|id| self.world.velocity(id))
    }

    /// Advance by a frame's worth of time in fixed steps
    pub fn update(&mut self, frame_dt: f32, input: &TickInput) -> Vec<ToyEvent> {
        // NaN slips through clamp(); max() maps it to zero
        self.accumulator += frame_dt.max(0.0).min(0.1);

        let mut events = Vec::new();
        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.tick(&input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs apply to the first substep only
            input.reset = false;
        }

        if input.reset {
            // Frame too short for a substep; don't drop the button press
            events.extend(self.tick(&input, 0.0));
        }

        events
    }

    /// Advance by exactly one step of `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<ToyEvent> {
        let mut events = Vec::new();

        if input.reset {
            events.push(self.reset());
        }

        if dt <= 0.0 {
            return events;
        }

        self.time_ticks += 1;
        let contacts = self.world.step(dt);
        self.clamp_ball_speed();

        // Several edges touched in one step still count as one hit
        if contacts.iter().any(|c| c.is_ball_on_edge()) {
            let from = self.polygon.sides;
            let to = from.saturating_add(1);
            match self.set_sides(to) {
                Ok(()) => events.push(ToyEvent::SidesChanged {
                    from,
                    to,
                    name: self.polygon.name.clone(),
                }),
                Err(e) => events.push(ToyEvent::RebuildFailed {
                    sides: to,
                    reason: e.to_string(),
                }),
            }
        }

        events
    }

    /// Replace the polygon with one of `sides` sides and announce its name.
    ///
    /// On error the previous polygon stays in the world untouched.
    pub fn set_sides(&mut self, sides: u32) -> Result<()> {
        let next = match PolygonState::build(sides, &self.settings.polygon_shape()) {
            Ok(next) => next,
            Err(e) => {
                self.report_rebuild_failure(sides, &e);
                return Err(e);
            }
        };

        self.despawn_edges();
        self.polygon = next;
        self.spawn_edges();
        self.announce_name();
        log::info!("{} sides: {}", self.polygon.sides, self.polygon.name);
        Ok(())
    }

    /// Back to the start polygon with a fresh ball
    pub fn reset(&mut self) -> ToyEvent {
        if let Some(id) = self.ball.take() {
            self.world.remove_body(id);
        }
        self.despawn_edges();

        match PolygonState::build(self.settings.start_sides, &self.settings.polygon_shape()) {
            Ok(polygon) => self.polygon = polygon,
            // Settings were validated in new(), so this only trips on a naming table bug
            Err(e) => self.report_rebuild_failure(self.settings.start_sides, &e),
        }

        self.spawn_edges();
        self.spawn_ball();
        self.accumulator = 0.0;
        self.announce_name();
        log::info!("Reset to {} ({} sides)", self.polygon.name, self.polygon.sides);

        ToyEvent::Reset {
            name: self.polygon.name.clone(),
        }
    }

    /// Bad input keeps the old polygon. A table gap is a bug in this crate:
    /// debug builds stop on it, release builds log and carry on.
    fn report_rebuild_failure(&self, sides: u32, e: &ToyError) {
        log::error!("Keeping {} sides, rebuild to {} failed: {}", self.polygon.sides, sides, e);
        debug_assert!(!e.is_internal(), "naming table bug: {e}");
    }

    fn announce_name(&mut self) {
        announce(&mut self.announcer, &exclaim(&self.polygon.name));
    }

    fn spawn_edges(&mut self) {
        let restitution = self.settings.wall_restitution;
        self.edge_ids = self
            .polygon
            .edges
            .iter()
            .map(|edge| {
                self.world.add_static_body(StaticBody {
                    tag: BodyTag::PolygonEdge,
                    center: edge.midpoint,
                    size: Vec2::new(edge.length, edge.thickness),
                    angle: edge.angle,
                    restitution,
                })
            })
            .collect();
    }

    fn despawn_edges(&mut self) {
        for id in self.edge_ids.drain(..) {
            self.world.remove_body(id);
        }
    }

    /// Four walls just outside the canvas
    fn spawn_walls(&mut self) {
        let w = self.settings.canvas_width;
        let h = self.settings.canvas_height;
        let t = WALL_THICKNESS;
        let walls = [
            (Vec2::new(w / 2.0, h + t / 2.0), Vec2::new(w + WALL_OVERHANG, t)),
            (Vec2::new(w / 2.0, -t / 2.0), Vec2::new(w + WALL_OVERHANG, t)),
            (Vec2::new(-t / 2.0, h / 2.0), Vec2::new(t, h + WALL_OVERHANG)),
            (Vec2::new(w + t / 2.0, h / 2.0), Vec2::new(t, h + WALL_OVERHANG)),
        ];
        let restitution = self.settings.wall_restitution;
        self.wall_ids = walls
            .into_iter()
            .map(|(center, size)| {
                self.world.add_static_body(StaticBody {
                    tag: BodyTag::Wall,
                    center,
                    size,
                    angle: 0.0,
                    restitution,
                })
            })
            .collect();
    }

    fn spawn_ball(&mut self) {
        let s = &self.settings;
        let position = random_interior_point(
            s.center(),
            s.polygon_radius,
            self.polygon.sides,
            s.ball_radius,
            s.spawn_sampling,
            &mut self.rng,
        );
        let id = self.world.add_dynamic_body(DynamicBody {
            tag: BodyTag::Ball,
            position,
            radius: s.ball_radius,
            velocity: s.ball_start_velocity(),
            restitution: s.ball_restitution,
        });
        self.ball = Some(id);
    }

    /// Keep the ball between the minimum and maximum speed
    fn clamp_ball_speed(&mut self) {
        let Some(id) = self.ball else { return };
        let Some(velocity) = self.world.velocity(id) else {
            return;
        };

        let speed = velocity.length();
        let (min, max) = (self.settings.min_speed, self.settings.max_speed);
        if speed > max {
            log::debug!("Ball speed {:.1} capped at {:.1}", speed, max);
            self.world.set_velocity(id, velocity * (max / speed));
        } else if speed < min {
            let theta = self.rng.random::<f32>() * TAU;
            log::debug!("Ball speed {:.1} boosted to {:.1}", speed, min);
            self.world.set_velocity(id, direction(theta) * min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::ArenaWorld;
    use crate::sim::polygon::build_edges;
    use crate::speech::tests::Recorder;

    fn new_toy(seed: u64) -> Toy<ArenaWorld, Recorder> {
        let settings = Settings::default();
        let world = ArenaWorld::new(settings.gravity());
        Toy::new(settings, world, Recorder::default(), seed).unwrap()
    }

    #[test]
    fn test_new_builds_triangle_and_announces() {
        let toy = new_toy(1);
        assert_eq!(toy.sides(), 3);
        assert_eq!(toy.name(), "triangle");
        assert_eq!(toy.polygon().edges.len(), 3);
        assert_eq!(toy.world().count_tagged(BodyTag::PolygonEdge), 3);
        assert_eq!(toy.world().count_tagged(BodyTag::Wall), 4);
        assert_eq!(toy.world().count_tagged(BodyTag::Ball), 1);
        assert_eq!(toy.announcer().calls, vec!["cancel", "speak:triangle!"]);
    }

    #[test]
    fn test_ball_spawns_inside_polygon() {
        for seed in 0..20 {
            let toy = new_toy(seed);
            let p = toy.ball_position().unwrap();
            let s = toy.settings();
            let safe = s.polygon_shape().incircle_radius(3) - s.ball_radius;
            assert!((p - s.center()).length() <= safe + 1e-3);
        }
    }

    #[test]
    fn test_set_sides_replaces_everything() {
        let mut toy = new_toy(2);
        toy.set_sides(23).unwrap();
        assert_eq!(toy.sides(), 23);
        assert_eq!(toy.name(), "icosakaitrigon");
        assert_eq!(toy.polygon().edges.len(), 23);
        assert_eq!(toy.world().count_tagged(BodyTag::PolygonEdge), 23);
        assert_eq!(toy.announcer().spoken().last(), Some(&"icosakaitrigon!"));
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_polygon() {
        let mut toy = new_toy(3);
        let before = toy.polygon().clone();
        assert!(toy.set_sides(0).is_err());
        assert_eq!(toy.polygon(), &before);
        assert_eq!(toy.world().count_tagged(BodyTag::PolygonEdge), 3);
        // Nothing new was announced
        assert_eq!(toy.announcer().spoken(), vec!["triangle!"]);
    }

    #[test]
    fn test_reset_restores_start_geometry() {
        let mut toy = new_toy(4);
        let initial_edges = toy.polygon().edges.clone();
        toy.set_sides(9).unwrap();

        let event = toy.reset();
        assert_eq!(
            event,
            ToyEvent::Reset {
                name: "triangle".into()
            }
        );
        assert_eq!(toy.sides(), 3);
        assert_eq!(toy.polygon().edges, initial_edges);
        assert_eq!(
            toy.polygon().edges,
            build_edges(&toy.settings().polygon_shape(), 3).unwrap()
        );
        assert_eq!(toy.world().count_tagged(BodyTag::PolygonEdge), 3);
        assert_eq!(toy.world().count_tagged(BodyTag::Ball), 1);
        assert_eq!(toy.world().count_tagged(BodyTag::Wall), 4);
        assert_eq!(toy.ball_velocity(), Some(toy.settings().ball_start_velocity()));
    }

    #[test]
    fn test_reset_input_via_tick() {
        let mut toy = new_toy(5);
        toy.set_sides(7).unwrap();
        let events = toy.tick(&TickInput { reset: true }, SIM_DT);
        assert!(matches!(events.first(), Some(ToyEvent::Reset { .. })));
        assert_eq!(toy.sides(), 3);
    }

    #[test]
    fn test_reset_applies_even_without_a_full_substep() {
        let mut toy = new_toy(6);
        toy.set_sides(8).unwrap();
        let events = toy.update(0.0, &TickInput { reset: true });
        assert_eq!(events.len(), 1);
        assert_eq!(toy.sides(), 3);
        assert_eq!(toy.time_ticks(), 0);
    }

    #[test]
    fn test_hits_grow_the_polygon() {
        let mut toy = new_toy(7);
        let mut changes = Vec::new();
        // 20 simulated seconds
        for _ in 0..(20 * 120) {
            for event in toy.tick(&TickInput::default(), SIM_DT) {
                if let ToyEvent::SidesChanged { from, to, name } = event {
                    changes.push((from, to, name));
                }
            }
        }
        assert!(!changes.is_empty(), "ball never hit an edge");
        for (i, (from, to, name)) in changes.iter().enumerate() {
            assert_eq!(*from, 3 + i as u32);
            assert_eq!(*to, from + 1);
            assert_eq!(name, &crate::sim::naming::polygon_name(*to).unwrap());
        }
        assert_eq!(toy.sides() as usize, 3 + changes.len());
        assert_eq!(
            toy.world().count_tagged(BodyTag::PolygonEdge),
            toy.sides() as usize
        );
        // One announcement per name, each preceded by a cancel
        let calls = &toy.announcer().calls;
        assert_eq!(calls.len(), 2 * (1 + changes.len()));
        assert!(calls.iter().step_by(2).all(|c| c == "cancel"));
    }

    #[test]
    fn test_speed_stays_clamped() {
        let mut toy = new_toy(8);
        let (min, max) = (toy.settings().min_speed, toy.settings().max_speed);
        for _ in 0..600 {
            toy.tick(&TickInput::default(), SIM_DT);
            let speed = toy.ball_velocity().unwrap().length();
            assert!(speed <= max + 1e-2, "speed {speed}");
            assert!(speed >= min - 1e-2, "speed {speed}");
        }
    }

    #[test]
    fn test_slow_ball_is_boosted() {
        let settings = Settings {
            gravity: [0.0, 0.0],
            ball_start_velocity: [0.0, 0.0],
            ..Settings::default()
        };
        let world = ArenaWorld::new(settings.gravity());
        let mut toy = Toy::new(settings, world, Recorder::default(), 9).unwrap();
        toy.tick(&TickInput::default(), SIM_DT);
        let speed = toy.ball_velocity().unwrap().length();
        assert!((speed - toy.settings().min_speed).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut a = new_toy(99999);
        let mut b = new_toy(99999);
        for _ in 0..1200 {
            a.tick(&TickInput::default(), SIM_DT);
            b.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(a.sides(), b.sides());
        assert_eq!(a.ball_position(), b.ball_position());
        assert_eq!(a.time_ticks(), b.time_ticks());
    }

    #[test]
    fn test_update_runs_fixed_substeps() {
        let mut toy = new_toy(10);
        toy.update(SIM_DT * 3.5, &TickInput::default());
        assert_eq!(toy.time_ticks(), 3);
        // Huge frames are capped
        toy.update(10.0, &TickInput::default());
        assert_eq!(toy.time_ticks(), 3 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            start_sides: 0,
            ..Settings::default()
        };
        let world = ArenaWorld::new(Vec2::ZERO);
        assert!(Toy::new(settings, world, Recorder::default(), 1).is_err());
    }

    /// Toy without gravity so a placed ball stays where it was put
    fn still_toy(seed: u64) -> Toy<ArenaWorld, Recorder> {
        let settings = Settings {
            gravity: [0.0, 0.0],
            ..Settings::default()
        };
        let world = ArenaWorld::new(settings.gravity());
        Toy::new(settings, world, Recorder::default(), seed).unwrap()
    }

    #[test]
    fn test_corner_hit_counts_once() {
        let mut toy = still_toy(11);
        let shape = toy.settings().polygon_shape();
        // Bottom-right corner of the triangle; 35 px in along the bisector
        // the ball overlaps both edges that meet there
        let corner = shape.vertex(1, 3);
        let inside = corner + (shape.center - corner).normalize() * 35.0;
        let id = toy.ball_id().unwrap();
        toy.world.set_position(id, inside);

        let events = toy.tick(&TickInput::default(), SIM_DT);
        assert_eq!(
            events,
            vec![ToyEvent::SidesChanged {
                from: 3,
                to: 4,
                name: "quadrilateral".into()
            }]
        );
        assert_eq!(toy.sides(), 4);
        assert_eq!(toy.world().count_tagged(BodyTag::PolygonEdge), 4);
    }

    #[test]
    fn test_wall_hit_changes_nothing() {
        let mut toy = still_toy(12);
        let id = toy.ball_id().unwrap();
        // Overlapping the left canvas wall, far from every polygon edge
        toy.world.set_position(id, Vec2::new(15.0, 300.0));
        toy.world.set_velocity(id, Vec2::new(-120.0, 0.0));

        let events = toy.tick(&TickInput::default(), SIM_DT);
        assert!(events.is_empty(), "{events:?}");
        assert_eq!(toy.sides(), 3);
        assert_eq!(toy.announcer().spoken(), vec!["triangle!"]);
        // Bounced back off the wall
        assert!(toy.ball_velocity().unwrap().x > 0.0);
    }

    #[test]
    fn test_nan_frame_time_is_ignored() {
        let mut toy = new_toy(13);
        toy.update(f32::NAN, &TickInput::default());
        assert_eq!(toy.time_ticks(), 0);
        toy.update(f32::INFINITY, &TickInput::default());
        toy.update(SIM_DT * 2.5, &TickInput::default());
        assert!(toy.time_ticks() >= 2);
        assert!(toy.ball_position().unwrap().is_finite());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "naming table bug")]
    fn test_table_gap_stops_debug_builds() {
        let toy = new_toy(14);
        toy.report_rebuild_failure(4, &ToyError::LookupGap { table: "units", key: 4 });
    }

    #[test]
    fn test_bad_input_is_not_internal() {
        let mut toy = new_toy(15);
        let err = toy.set_sides(0).unwrap_err();
        assert!(!err.is_internal());
        assert_eq!(toy.sides(), 3);
    }
}
