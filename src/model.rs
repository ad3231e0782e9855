use glam::Vec2;

/// Axis-aligned rectangular bounds that agents are confined to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// Whether a circle of the given radius lies entirely inside the bounds.
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= self.min.x
            && pos.x + radius <= self.max.x
            && pos.y - radius >= self.min.y
            && pos.y + radius <= self.max.y
    }

    /// The same bounds grown outwards by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// The abstract trait of agent models animated in a perfect rectangular
/// container.
///
/// An external driver calls [Model::step] once per frame and reads the agent
/// collection back to render it; the collection is owned exclusively by the
/// model and only mutated inside `step` (or through the bulk
/// [Model::set_agents] replacement used by tests and "clear" actions).
pub trait Model {
    type Agent;
    type StepReturn;

    /// Advance the system by one frame.
    fn step(&mut self) -> Self::StepReturn;

    /// The bounds of the main container.
    fn bounds(&self) -> Rect;

    /// Get the number of agents in the container.
    fn num_agents(&self) -> usize;

    /// Read-only view of all agents, in stable index order.
    fn agents(&self) -> &[Self::Agent];

    /// Bulk-replace the agent collection.
    fn set_agents(&mut self, agents: Vec<Self::Agent>);
}
