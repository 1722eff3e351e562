use nalgebra::Vector3;
use skyward::{
    components::{Building, BuildingPart, Primitive, Runway},
    resources::{Environment, FlatTerrain},
};

/// Runway long enough that ground rolls never leave it
pub const LONG_RUNWAY_LENGTH: f64 = 20_000.0;

/// Flat ground at `elevation` with no sea.
pub fn flat_environment(elevation: f64) -> Environment {
    Environment::new(Box::new(FlatTerrain::new(elevation)), f64::NEG_INFINITY)
}

/// Flat ground with a long north-south runway centred on the origin.
pub fn runway_environment(elevation: f64) -> Environment {
    flat_environment(elevation).with_runways(vec![Runway {
        name: "36".to_string(),
        pos: Vector3::new(0.0, elevation, 0.0),
        length: LONG_RUNWAY_LENGTH,
        ..Default::default()
    }])
}

/// Land rising gently to the east, with sea below zero elevation to the west.
pub fn coastal_hills() -> Environment {
    let terrain = |x: f64, z: f64| 0.02 * x + 15.0 * (z / 400.0).sin();
    Environment::new(Box::new(terrain), 0.0)
}

/// 20 m cube with its base on the ground at `(x, 0, z)`.
pub fn hangar(x: f64, z: f64) -> Building {
    Building::new(
        "hangar",
        Vector3::new(x, 0.0, z),
        vec![BuildingPart {
            offset: Vector3::new(0.0, 10.0, 0.0),
            primitive: Primitive::Cuboid {
                l: 20.0,
                h: 20.0,
                w: 20.0,
            },
        }],
    )
}

/// Radio mast: a tall thin cylinder topped by a sphere.
pub fn mast(x: f64, z: f64) -> Building {
    Building::new(
        "mast",
        Vector3::new(x, 0.0, z),
        vec![
            BuildingPart {
                offset: Vector3::new(0.0, 50.0, 0.0),
                primitive: Primitive::Cylinder { r: 1.0, h: 100.0 },
            },
            BuildingPart {
                offset: Vector3::new(0.0, 102.0, 0.0),
                primitive: Primitive::Sphere { r: 2.0 },
            },
        ],
    )
}
