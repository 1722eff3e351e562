use nalgebra::Vector3;

use crate::components::{Building, BuildingPart, SimBody};

/// Parts whose centre is further than this from the aircraft are skipped [m]
pub const CULL_RADIUS: f64 = 125.0;
/// Safety margin added to every collidable part [m]
pub const OBSTACLE_BUFFER: f64 = 4.0;

/// The building part an aircraft flew into.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleHit<'a> {
    pub building: &'a Building,
    pub part: &'a BuildingPart,
    /// World-space centre of the part [m]
    pub centre: Vector3<f64>,
}

/// First buffered building part containing the body's position, in building order.
pub fn detect_obstacle_collision<'a>(
    body: &impl SimBody,
    buildings: &'a [Building],
) -> Option<ObstacleHit<'a>> {
    let position = body.position();
    let cull_radius_sq = CULL_RADIUS * CULL_RADIUS;

    buildings.iter().find_map(|building| {
        building
            .part_centres()
            .filter(|(_, centre)| (centre - position).norm_squared() <= cull_radius_sq)
            .find(|(part, centre)| part.primitive.buffered(OBSTACLE_BUFFER).contains(&position, centre))
            .map(|(part, centre)| ObstacleHit {
                building,
                part,
                centre,
            })
    })
}
