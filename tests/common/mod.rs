#![allow(dead_code)]

mod assertions;
mod fixtures;
mod helpers;
mod test_app;

pub use assertions::{assert_above_ground, assert_plane_valid, assert_vector_eq};
pub use fixtures::*;
pub use helpers::*;
pub use test_app::{TestApp, TestAppBuilder};
