mod dynamics;
pub mod forces;

pub use dynamics::TickOutcome;
pub use forces::{compute_forces, containment_force, forward_vector, Forces};
