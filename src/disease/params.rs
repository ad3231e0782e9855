/// Clamp ranges for the interactive knobs.
pub const EXPOSURE_TIME_RANGE: (u32, u32) = (5, 50);
pub const INFECTED_TIME_RANGE: (u32, u32) = (100, 1000);
pub const SOCIAL_DISTANCE_PERCENT_RANGE: (u32, u32) = (0, 100);
pub const INFECTION_RADIUS_RANGE: (f32, f32) = (5.0, 30.0);

/// Increment applied by the knob stepper methods.
pub const KNOB_STEP: u32 = 5;

/// Radius of the social-distancing bubble. The infection radius is never
/// allowed below this value.
pub const SOCIAL_DISTANCE_RADIUS: f32 = 5.0;

/// Tunable knobs consumed by the disease engine.
///
/// This is an interactive control surface, not a validating API: setters
/// clamp out-of-range values to the nearest bound and the stepper methods
/// saturate, so no operation here can fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    exposure_time: u32,
    infected_time: u32,
    social_distance_percent: u32,
    infection_radius: f32,
    should_quarantine: bool,
    have_central_location: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            exposure_time: 25,
            infected_time: 200,
            social_distance_percent: 0,
            infection_radius: 10.0,
            should_quarantine: false,
            have_central_location: false,
        }
    }
}

impl Params {
    pub fn exposure_time(&self) -> u32 {
        self.exposure_time
    }

    pub fn infected_time(&self) -> u32 {
        self.infected_time
    }

    pub fn social_distance_percent(&self) -> u32 {
        self.social_distance_percent
    }

    pub fn infection_radius(&self) -> f32 {
        self.infection_radius
    }

    pub fn should_quarantine(&self) -> bool {
        self.should_quarantine
    }

    pub fn have_central_location(&self) -> bool {
        self.have_central_location
    }

    pub fn set_exposure_time(&mut self, value: u32) {
        self.exposure_time = value.clamp(EXPOSURE_TIME_RANGE.0, EXPOSURE_TIME_RANGE.1);
    }

    pub fn increment_exposure_time(&mut self) {
        self.set_exposure_time(self.exposure_time + KNOB_STEP);
    }

    pub fn decrement_exposure_time(&mut self) {
        self.set_exposure_time(self.exposure_time.saturating_sub(KNOB_STEP));
    }

    pub fn set_infected_time(&mut self, value: u32) {
        self.infected_time = value.clamp(INFECTED_TIME_RANGE.0, INFECTED_TIME_RANGE.1);
    }

    pub fn increment_infected_time(&mut self) {
        self.set_infected_time(self.infected_time + KNOB_STEP);
    }

    pub fn decrement_infected_time(&mut self) {
        self.set_infected_time(self.infected_time.saturating_sub(KNOB_STEP));
    }

    pub fn set_social_distance_percent(&mut self, value: u32) {
        self.social_distance_percent = value.clamp(
            SOCIAL_DISTANCE_PERCENT_RANGE.0,
            SOCIAL_DISTANCE_PERCENT_RANGE.1,
        );
    }

    pub fn increment_social_distance_percent(&mut self) {
        self.set_social_distance_percent(self.social_distance_percent + KNOB_STEP);
    }

    pub fn decrement_social_distance_percent(&mut self) {
        self.set_social_distance_percent(self.social_distance_percent.saturating_sub(KNOB_STEP));
    }

    pub fn set_infection_radius(&mut self, value: f32) {
        self.infection_radius = value
            .clamp(INFECTION_RADIUS_RANGE.0, INFECTION_RADIUS_RANGE.1)
            .max(SOCIAL_DISTANCE_RADIUS);
    }

    pub fn increment_infection_radius(&mut self) {
        self.set_infection_radius(self.infection_radius + KNOB_STEP as f32);
    }

    pub fn decrement_infection_radius(&mut self) {
        self.set_infection_radius(self.infection_radius - KNOB_STEP as f32);
    }

    pub fn set_should_quarantine(&mut self, value: bool) {
        self.should_quarantine = value;
    }

    pub fn set_have_central_location(&mut self, value: bool) {
        self.have_central_location = value;
    }
}
