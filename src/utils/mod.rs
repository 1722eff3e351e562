pub mod constants;
pub mod errors;
pub mod math;
pub mod units;

pub use constants::*;
pub use errors::*;
pub use math::*;
pub use units::*;
