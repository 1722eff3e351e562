mod detection;

pub use detection::{detect_obstacle_collision, ObstacleHit, CULL_RADIUS, OBSTACLE_BUFFER};
