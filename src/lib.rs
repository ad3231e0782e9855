mod model;
mod physics;
mod rng;

// Kinematic elastic-collision model ("ideal gas")
mod gas;
// Agent-based infectious disease model on top of the same collision physics
mod disease;

pub use disease::*;
pub use gas::*;
pub use model::*;
pub use physics::*;
pub use rng::*;
