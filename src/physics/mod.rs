mod forces;
mod state;

pub use forces::{Body, charge_force, spring_force};
pub use state::PhysicsState;
