use glam::Vec2;

use crate::model::{Model, Rect};
use crate::physics;
use crate::rng::{RandomSource, StdRandom};

mod params;
mod person;

pub use params::*;
pub use person::*;

/// Number of susceptible people seeded by [DiseaseModel::create_population],
/// not counting the single patient zero.
pub const POPULATION_SIZE: usize = 200;

/// Steps of infection after which a symptomatic person is detected and, when
/// quarantining is enabled, moved to the quarantine box.
pub const DETECTION_TIME: u32 = 50;

/// Probability that a determined infection turns out asymptomatic.
pub const PROB_ASYMPTOMATIC: f32 = 0.5;
/// Per-step probability of deciding to commute to the central location.
pub const PROB_GO_TO_CENTRAL: f32 = 0.01;
/// Per-step probability of leaving the central location.
pub const PROB_LEAVE_CENTRAL: f32 = 0.01;

/// Upper bound of a re-rolled distancing speed component.
const MAX_DISTANCING_SPEED: f32 = 2.0;
/// Attempts at placing a person outside the central location before falling
/// back to the container corner.
const PLACEMENT_ATTEMPTS: usize = 16;

/// Population tally by health status, returned from every step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub susceptible: usize,
    pub infectious: usize,
    pub removed: usize,
}

/// Region a person is currently confined to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Main,
    Central,
    Quarantine,
}

fn zone(person: &Person) -> Zone {
    if person.quarantined {
        Zone::Quarantine
    } else if person.at_central {
        Zone::Central
    } else {
        Zone::Main
    }
}

/// Agent-based infectious disease model.
///
/// The population moves and collides with the same elastic physics as the
/// gas model; on top of that each step runs a per-person status machine
/// (exposure accumulation, infection determination, removal), quarantine
/// detection, optional commuting to a central location, and social-distancing
/// steering.
///
/// Like the gas model, pairwise interactions only look at higher-indexed,
/// not-yet-processed people, so the outcome depends on insertion order and is
/// reproducible bit-for-bit. The per-frame scratch state (exposure flags and
/// bubble tallies) is reset for the whole population before any person is
/// processed.
pub struct DiseaseModel<R: RandomSource = StdRandom> {
    people: Vec<Person>,
    bounds: Rect,
    quarantine_box: Rect,
    central_location: Rect,
    params: Params,
    /// When true, a re-steered distancing velocity gets a freshly rolled
    /// magnitude; when false the current magnitude is kept.
    pub randomize_distancing_speed: bool,
    rng: R,
}

impl DiseaseModel<StdRandom> {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, StdRandom::from_entropy())
    }

    pub fn seeded(width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRandom::seeded(seed))
    }
}

impl<R: RandomSource> DiseaseModel<R> {
    pub fn with_rng(width: f32, height: f32, rng: R) -> Self {
        Self {
            people: Vec::new(),
            bounds: Rect::new(0.0, 0.0, width, height),
            // holding zone beside the container, entered only by quarantine;
            // the gap keeps quarantined people beyond the largest infection
            // radius of anyone in the main container
            quarantine_box: Rect::new(
                width + INFECTION_RADIUS_RANGE.1,
                0.0,
                width + INFECTION_RADIUS_RANGE.1 + width * 0.2,
                height * 0.25,
            ),
            // optional commuting target in the middle of the container
            central_location: Rect::new(
                width * 0.375,
                height * 0.375,
                width * 0.625,
                height * 0.625,
            ),
            params: Params::default(),
            randomize_distancing_speed: true,
            rng,
        }
    }

    /// Seed the population: [POPULATION_SIZE] susceptible people at random
    /// positions plus one symptomatic patient zero. Calling this on an
    /// already populated model is a no-op.
    pub fn create_population(&mut self) {
        if !self.people.is_empty() {
            log::debug!("population already created, ignoring");
            return;
        }
        for _ in 0..POPULATION_SIZE {
            let pos = self.random_point(self.bounds);
            let vel = self.random_velocity();
            self.people.push(Person::new(pos, vel));
        }
        let pos = self.random_point(self.bounds);
        let vel = self.random_velocity();
        let mut patient_zero = Person::new(pos, vel);
        patient_zero.status = HealthStatus::Symptomatic;
        self.people.push(patient_zero);
        log::info!(
            "created population of {} with one symptomatic patient zero",
            self.people.len()
        );
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn quarantine_box(&self) -> Rect {
        self.quarantine_box
    }

    pub fn central_location(&self) -> Rect {
        self.central_location
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for person in &self.people {
            match person.status {
                HealthStatus::Susceptible => counts.susceptible += 1,
                HealthStatus::Symptomatic | HealthStatus::Asymptomatic => counts.infectious += 1,
                HealthStatus::Removed => counts.removed += 1,
            }
        }
        counts
    }

    pub fn set_exposure_time(&mut self, value: u32) {
        self.params.set_exposure_time(value);
    }

    pub fn set_infected_time(&mut self, value: u32) {
        self.params.set_infected_time(value);
    }

    pub fn set_infection_radius(&mut self, value: f32) {
        self.params.set_infection_radius(value);
    }

    pub fn set_should_quarantine(&mut self, value: bool) {
        self.params.set_should_quarantine(value);
    }

    pub fn set_have_central_location(&mut self, value: bool) {
        self.params.set_have_central_location(value);
    }

    /// Set the share of the population that practices social distancing.
    ///
    /// The first `floor(n * percent / 100)` people in index order are
    /// flagged, which keeps the assignment reproducible across runs.
    pub fn set_social_distance_percent(&mut self, percent: u32) {
        self.params.set_social_distance_percent(percent);
        let distancing =
            self.people.len() * self.params.social_distance_percent() as usize / 100;
        for (i, person) in self.people.iter_mut().enumerate() {
            person.social_distancing = i < distancing;
        }
    }

    /// The bounds a person is currently confined to.
    fn active_bounds(&self, person: &Person) -> Rect {
        match zone(person) {
            Zone::Quarantine => self.quarantine_box,
            Zone::Central => self.central_location,
            Zone::Main => self.bounds,
        }
    }

    fn random_point(&mut self, bounds: Rect) -> Vec2 {
        Vec2::new(
            self.rng
                .range(bounds.min.x + PERSON_RADIUS, bounds.max.x - PERSON_RADIUS),
            self.rng
                .range(bounds.min.y + PERSON_RADIUS, bounds.max.y - PERSON_RADIUS),
        )
    }

    fn random_velocity(&mut self) -> Vec2 {
        Vec2::new(self.rng.range(-1.0, 1.0), self.rng.range(-1.0, 1.0))
    }

    /// A random point in the main container that clears the central location.
    fn point_outside_central(&mut self) -> Vec2 {
        let keep_out = self.central_location.expand(PERSON_RADIUS);
        for _ in 0..PLACEMENT_ATTEMPTS {
            let pos = self.random_point(self.bounds);
            if !keep_out.contains(pos) {
                return pos;
            }
        }
        self.bounds.min + Vec2::splat(2.0 * PERSON_RADIUS)
    }

    /// Clear all per-frame scratch state, for the whole population, before
    /// any per-person logic runs.
    fn reset_frame(&mut self) {
        for person in &mut self.people {
            person.exposed_this_frame = false;
            person.bubble.clear();
        }
    }

    fn update_status(&mut self, i: usize) {
        match self.people[i].status {
            HealthStatus::Susceptible => self.update_susceptible(i),
            HealthStatus::Symptomatic | HealthStatus::Asymptomatic => self.update_infectious(i),
            HealthStatus::Removed => {}
        }
    }

    /// Accumulate exposure from infectious neighbors and determine the
    /// infection once the exposure threshold is reached.
    ///
    /// Earlier-processed infectious people have already raised
    /// `exposed_this_frame`; later ones are found by scanning forward.
    fn update_susceptible(&mut self, i: usize) {
        let radius = self.params.infection_radius();
        let pos = self.people[i].pos;
        let exposed = self.people[i].exposed_this_frame
            || self.people[i + 1..].iter().any(|other| {
                other.status.is_infectious() && (other.pos - pos).length() <= radius
            });
        if !exposed {
            self.people[i].continuous_exposure_time = 0;
            return;
        }
        self.people[i].continuous_exposure_time += 1;
        if self.people[i].continuous_exposure_time >= self.params.exposure_time() {
            let symptomatic = self.rng.uniform() >= PROB_ASYMPTOMATIC;
            let person = &mut self.people[i];
            person.continuous_exposure_time = 0;
            person.status = if symptomatic {
                HealthStatus::Symptomatic
            } else {
                HealthStatus::Asymptomatic
            };
            log::debug!("person {i} infected, now {:?}", person.status);
        }
    }

    /// Expose not-yet-processed susceptible neighbors, then advance the
    /// infection clock towards removal.
    fn update_infectious(&mut self, i: usize) {
        let radius = self.params.infection_radius();
        let pos = self.people[i].pos;
        let (_, rest) = self.people.split_at_mut(i + 1);
        for other in rest {
            if other.status == HealthStatus::Susceptible
                && (other.pos - pos).length() <= radius
            {
                other.exposed_this_frame = true;
            }
        }
        let person = &mut self.people[i];
        person.time_infected += 1;
        if person.time_infected >= self.params.infected_time() {
            person.time_infected = 0;
            person.status = HealthStatus::Removed;
            log::debug!("person {i} removed");
        }
    }

    /// Commuting to and from the central location. Quarantined people never
    /// commute; the caller guards on the feature flag and quarantine state.
    fn update_central_location(&mut self, i: usize) {
        if self.people[i].at_central {
            if self.rng.uniform() < PROB_LEAVE_CENTRAL {
                let pos = self.point_outside_central();
                let person = &mut self.people[i];
                person.at_central = false;
                person.pos = pos;
            }
        } else if self.people[i].going_to_central {
            // one frame after the go decision: teleport into the box
            let pos = self.random_point(self.central_location);
            let person = &mut self.people[i];
            person.pos = pos;
            person.at_central = true;
            person.going_to_central = false;
        } else if self.rng.uniform() < PROB_GO_TO_CENTRAL {
            self.people[i].going_to_central = true;
        }
    }

    /// Wall reflection against the person's active bounds, the no-entry
    /// response against the outside of the central location, and elastic
    /// pairwise response against not-yet-processed people in the same zone.
    fn resolve_collisions(&mut self, i: usize) {
        let bounds = self.active_bounds(&self.people[i]);
        let in_main = zone(&self.people[i]) == Zone::Main;
        let person = &mut self.people[i];
        person.vel = physics::reflect_at_walls(person.pos, person.vel, person.radius, &bounds);
        if self.params.have_central_location() && in_main && !person.going_to_central {
            person.vel = physics::reflect_outside_box(
                person.pos,
                person.vel,
                person.radius,
                &self.central_location,
            );
        }
        let zone_i = zone(&self.people[i]);
        for j in (i + 1)..self.people.len() {
            if zone(&self.people[j]) != zone_i {
                continue;
            }
            let (a, b) = (self.people[i], self.people[j]);
            if physics::pair_collided(a.pos, a.radius, a.vel, b.pos, b.radius, b.vel) {
                let (va, vb) = physics::elastic_response(1.0, a.pos, a.vel, 1.0, b.pos, b.vel);
                self.people[i].vel = va;
                self.people[j].vel = vb;
            }
        }
    }

    /// Move a newly detected symptomatic person into the quarantine box.
    ///
    /// Returns true when the person was relocated this step; relocation
    /// replaces normal movement. Once quarantined, a person stays quarantined
    /// and is never relocated again.
    fn check_quarantine(&mut self, i: usize) -> bool {
        if !self.params.should_quarantine() {
            return false;
        }
        {
            let person = &self.people[i];
            if person.quarantined
                || person.status != HealthStatus::Symptomatic
                || person.time_infected < DETECTION_TIME
            {
                return false;
            }
        }
        let pos = self.random_point(self.quarantine_box);
        let person = &mut self.people[i];
        person.pos = pos;
        person.quarantined = true;
        person.going_to_central = false;
        person.at_central = false;
        log::info!("person {i} detected and quarantined");
        true
    }

    /// Social-distancing steering followed by position integration into the
    /// active bounds.
    fn apply_movement(&mut self, i: usize) {
        if self.people[i].social_distancing {
            self.tally_bubble(i);
            self.steer_away_from_crowd(i);
        }
        let bounds = self.active_bounds(&self.people[i]);
        let person = &mut self.people[i];
        person.pos += person.vel;
        person.pos = physics::clamp_to_rect(person.pos, person.radius, &bounds);
    }

    /// Tally bubble neighbors among not-yet-processed people, recording
    /// reciprocally on the neighbor when it is distancing as well.
    fn tally_bubble(&mut self, i: usize) {
        let pos = self.people[i].pos;
        let (processed, rest) = self.people.split_at_mut(i + 1);
        let me = &mut processed[i];
        for other in rest {
            if (other.pos - pos).length() <= SOCIAL_DISTANCE_RADIUS {
                me.bubble.record(relative_direction(pos, other.pos));
                if other.social_distancing {
                    other.bubble.record(relative_direction(other.pos, pos));
                }
            }
        }
    }

    /// Point the velocity away from the direction most bubble neighbors are
    /// in. Only the crowded axis is rewritten; the magnitude is re-rolled or
    /// kept depending on [DiseaseModel::randomize_distancing_speed].
    fn steer_away_from_crowd(&mut self, i: usize) {
        let Some(majority) = self.people[i].bubble.majority() else {
            return;
        };
        let rolled = if self.randomize_distancing_speed {
            Some(self.rng.range(0.5, MAX_DISTANCING_SPEED))
        } else {
            None
        };
        let person = &mut self.people[i];
        match majority {
            Direction::Up => person.vel.y = rolled.unwrap_or(person.vel.y.abs()),
            Direction::Down => person.vel.y = -rolled.unwrap_or(person.vel.y.abs()),
            Direction::Left => person.vel.x = rolled.unwrap_or(person.vel.x.abs()),
            Direction::Right => person.vel.x = -rolled.unwrap_or(person.vel.x.abs()),
        }
    }
}

impl<R: RandomSource> Model for DiseaseModel<R> {
    type Agent = Person;
    type StepReturn = StatusCounts;

    /// Advance the population by one frame.
    ///
    /// Order is load-bearing: the frame-wide scratch reset runs first, then
    /// per person in index order the status machine, commuting, collision
    /// resolution, quarantine detection and movement. A person relocated to
    /// quarantine this step skips movement.
    fn step(&mut self) -> StatusCounts {
        self.reset_frame();
        for i in 0..self.people.len() {
            self.update_status(i);
            if self.params.have_central_location() && !self.people[i].quarantined {
                self.update_central_location(i);
            }
            self.resolve_collisions(i);
            let relocated = self.check_quarantine(i);
            if !relocated {
                self.apply_movement(i);
            }
        }
        self.status_counts()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn num_agents(&self) -> usize {
        self.people.len()
    }

    fn agents(&self) -> &[Person] {
        &self.people
    }

    fn set_agents(&mut self, agents: Vec<Person>) {
        self.people = agents;
    }
}
