use glam::Vec2;

/// Radius of every person in the population.
pub const PERSON_RADIUS: f32 = 2.0;

/// Health status of a person. Transitions are one-way:
/// Susceptible -> (Symptomatic | Asymptomatic) -> Removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthStatus {
    Susceptible,
    Symptomatic,
    Asymptomatic,
    Removed,
}

impl HealthStatus {
    /// Whether a person with this status exposes susceptible neighbors.
    pub fn is_infectious(&self) -> bool {
        matches!(self, HealthStatus::Symptomatic | HealthStatus::Asymptomatic)
    }

    /// Display color the external rendering layer draws this status with.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            HealthStatus::Susceptible => (70, 130, 180),
            HealthStatus::Symptomatic => (205, 50, 50),
            HealthStatus::Asymptomatic => (230, 150, 40),
            HealthStatus::Removed => (128, 128, 128),
        }
    }
}

/// Relative direction of a neighbor inside the distancing bubble.
///
/// Screen coordinates: y grows downwards, so `Up` means a smaller y.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Classify where `other` sits relative to `pos`, by the dominant axis.
/// Ties go to the vertical axis.
pub fn relative_direction(pos: Vec2, other: Vec2) -> Direction {
    let d = other - pos;
    if d.x.abs() > d.y.abs() {
        if d.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if d.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Per-step tally of bubble neighbors by relative direction.
///
/// Scratch state: cleared at the start of every step, accumulated while the
/// population is processed, consumed when the owning person picks its
/// distancing velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BubbleTally {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
}

impl BubbleTally {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up += 1,
            Direction::Down => self.down += 1,
            Direction::Left => self.left += 1,
            Direction::Right => self.right += 1,
        }
    }

    /// The direction most neighbors are in, or `None` for an empty bubble.
    /// Ties resolve in up, down, left, right order.
    pub fn majority(&self) -> Option<Direction> {
        let mut best = (0, None);
        for (count, direction) in [
            (self.up, Direction::Up),
            (self.down, Direction::Down),
            (self.left, Direction::Left),
            (self.right, Direction::Right),
        ] {
            if count > best.0 {
                best = (count, Some(direction));
            }
        }
        best.1
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Person {
    pub radius: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub status: HealthStatus,
    /// Consecutive steps spent under infectious exposure. Only meaningful
    /// while Susceptible; resets the moment exposure lapses.
    pub continuous_exposure_time: u32,
    /// Steps since becoming infectious; reset on transition to Removed.
    pub time_infected: u32,
    /// Scratch flag raised by earlier-processed infectious neighbors this
    /// frame; cleared at the start of every step.
    pub exposed_this_frame: bool,
    /// Once set, persists until an external reset.
    pub quarantined: bool,
    pub social_distancing: bool,
    pub going_to_central: bool,
    pub at_central: bool,
    /// Scratch tally of distancing-bubble neighbors; cleared every step.
    pub bubble: BubbleTally,
}

impl Person {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            radius: PERSON_RADIUS,
            pos,
            vel,
            status: HealthStatus::Susceptible,
            continuous_exposure_time: 0,
            time_infected: 0,
            exposed_this_frame: false,
            quarantined: false,
            social_distancing: false,
            going_to_central: false,
            at_central: false,
            bubble: BubbleTally::default(),
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        self.status.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_prefers_largest_count() {
        let mut tally = BubbleTally::default();
        assert_eq!(tally.majority(), None);
        tally.record(Direction::Left);
        tally.record(Direction::Left);
        tally.record(Direction::Down);
        assert_eq!(tally.majority(), Some(Direction::Left));
        tally.clear();
        assert_eq!(tally.majority(), None);
    }

    #[test]
    fn relative_direction_uses_dominant_axis() {
        let origin = Vec2::new(50.0, 50.0);
        assert_eq!(
            relative_direction(origin, Vec2::new(53.0, 49.0)),
            Direction::Right
        );
        assert_eq!(
            relative_direction(origin, Vec2::new(49.0, 46.0)),
            Direction::Up
        );
        assert_eq!(
            relative_direction(origin, Vec2::new(50.0, 55.0)),
            Direction::Down
        );
    }

    #[test]
    fn removed_is_not_infectious() {
        assert!(HealthStatus::Symptomatic.is_infectious());
        assert!(HealthStatus::Asymptomatic.is_infectious());
        assert!(!HealthStatus::Susceptible.is_infectious());
        assert!(!HealthStatus::Removed.is_infectious());
    }
}
