use glam::Vec2;

use crate::model::{Model, Rect};
use crate::physics;

/// Mass class of a particle. Determines the display color and the histogram
/// bucket the external UI layer sorts the particle into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorClass {
    Blue,
    Red,
    Green,
}

impl ColorClass {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorClass::Blue => (65, 105, 225),
            ColorClass::Red => (220, 60, 50),
            ColorClass::Green => (60, 179, 113),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Fixed for the particle's lifetime.
    pub radius: f32,
    /// Fixed for the particle's lifetime.
    pub mass: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cached magnitude of `vel`, refreshed at the end of every step.
    pub speed: f32,
    pub color: ColorClass,
}

impl Particle {
    pub fn new(mass: f32, radius: f32, pos: Vec2, vel: Vec2, color: ColorClass) -> Self {
        Self {
            radius,
            mass,
            pos,
            vel,
            speed: vel.length(),
            color,
        }
    }
}

/// Elastic-collision model of an ideal gas in a rectangular container.
///
/// Uses the O(N^2) forward pass: each particle resolves collisions only
/// against higher-indexed particles, mutating both velocities immediately.
/// A particle's collision outcome therefore feeds into its own wall test and
/// position integration within the same step, and the result depends on
/// insertion order. That ordering is part of the model's contract; repeated
/// runs over the same initial state are bit-for-bit identical.
pub struct GasModel {
    particles: Vec<Particle>,
    bounds: Rect,
    capacity: usize,
}

impl GasModel {
    pub fn new(width: f32, height: f32, capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            bounds: Rect::new(0.0, 0.0, width, height),
            capacity,
        }
    }

    /// Add a particle of the given mass class at the container's top-left
    /// corner, offset by its own radius.
    ///
    /// The radius is derived from the mass and the initial velocity from the
    /// radius. Requests beyond the capacity are silently ignored.
    pub fn create_particle(&mut self, mass: f32, color: ColorClass) {
        if self.particles.len() >= self.capacity {
            log::debug!(
                "particle cap ({}) reached, ignoring create request",
                self.capacity
            );
            return;
        }
        let radius = 2.0 * mass;
        let vel = Vec2::splat(radius / 4.0);
        self.particles.push(Particle::new(
            mass,
            radius,
            self.bounds.min + Vec2::splat(radius),
            vel,
            color,
        ));
    }

    /// Remove every particle from the container.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total kinetic energy of the gas (diagnostic).
    pub fn kinetic_energy(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.mass * p.vel.length_squared())
            .sum()
    }
}

impl Model for GasModel {
    type Agent = Particle;
    type StepReturn = usize;

    /// Advance every particle by one frame.
    ///
    /// Per particle, in index order: wall reflection, pairwise resolution
    /// against every not-yet-processed particle, position integration,
    /// containment clamp, speed refresh. Returns the number of collisions
    /// resolved.
    fn step(&mut self) -> usize {
        let mut total_collisions = 0;
        let n = self.particles.len();
        for i in 0..n {
            let p = &mut self.particles[i];
            let reflected = physics::reflect_at_walls(p.pos, p.vel, p.radius, &self.bounds);
            if reflected != p.vel {
                p.vel = reflected;
                total_collisions += 1;
            }
            for j in (i + 1)..n {
                let (a, b) = (self.particles[i], self.particles[j]);
                if physics::pair_collided(a.pos, a.radius, a.vel, b.pos, b.radius, b.vel) {
                    let (va, vb) =
                        physics::elastic_response(a.mass, a.pos, a.vel, b.mass, b.pos, b.vel);
                    self.particles[i].vel = va;
                    self.particles[j].vel = vb;
                    total_collisions += 1;
                }
            }
            let p = &mut self.particles[i];
            p.pos += p.vel;
            p.pos = physics::clamp_to_rect(p.pos, p.radius, &self.bounds);
            p.speed = p.vel.length();
        }
        total_collisions
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn num_agents(&self) -> usize {
        self.particles.len()
    }

    fn agents(&self) -> &[Particle] {
        &self.particles
    }

    fn set_agents(&mut self, agents: Vec<Particle>) {
        self.particles = agents;
    }
}
