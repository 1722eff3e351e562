mod environment;
mod plane;

pub use environment::*;
pub use plane::*;
