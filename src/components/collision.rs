use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Collidable shape of a building part, dimensions in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Axis-aligned box: length (x), height (y), width (z)
    Cuboid { l: f64, h: f64, w: f64 },
    /// Upright cylinder centred on its mid-height
    Cylinder { r: f64, h: f64 },
    Sphere { r: f64 },
}

impl Primitive {
    /// Grow every dimension by a safety margin in metres.
    ///
    /// Boxes gain `margin` on each face; cylinders and spheres gain `margin`
    /// on radius and height.
    pub fn buffered(&self, margin: f64) -> Self {
        match *self {
            Primitive::Cuboid { l, h, w } => Primitive::Cuboid {
                l: l + 2.0 * margin,
                h: h + 2.0 * margin,
                w: w + 2.0 * margin,
            },
            Primitive::Cylinder { r, h } => Primitive::Cylinder {
                r: r + margin,
                h: h + margin,
            },
            Primitive::Sphere { r } => Primitive::Sphere { r: r + margin },
        }
    }

    /// Containment test for a shape centred on `centre`
    pub fn contains(&self, point: &Vector3<f64>, centre: &Vector3<f64>) -> bool {
        match *self {
            Primitive::Cuboid { l, h, w } => {
                point_in_cuboid(point, centre, &Vector3::new(l, h, w))
            }
            Primitive::Cylinder { r, h } => point_in_cylinder(point, centre, r, h),
            Primitive::Sphere { r } => point_in_sphere(point, centre, r),
        }
    }
}

/// A single collidable piece of a building, placed relative to its anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPart {
    pub offset: Vector3<f64>,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub kind: String,
    /// World anchor [m]
    pub position: Vector3<f64>,
    pub parts: Vec<BuildingPart>,
}

impl Building {
    pub fn new(kind: impl Into<String>, position: Vector3<f64>, parts: Vec<BuildingPart>) -> Self {
        Self {
            kind: kind.into(),
            position,
            parts,
        }
    }

    /// World-space centre of each part
    pub fn part_centres(&self) -> impl Iterator<Item = (&BuildingPart, Vector3<f64>)> + '_ {
        self.parts
            .iter()
            .map(move |part| (part, self.position + part.offset))
    }
}

/// Inclusive axis-aligned box test, `dims` are full extents
pub fn point_in_cuboid(point: &Vector3<f64>, centre: &Vector3<f64>, dims: &Vector3<f64>) -> bool {
    (0..3).all(|i| {
        let half = dims[i] / 2.0;
        centre[i] - half <= point[i] && point[i] <= centre[i] + half
    })
}

/// Upright cylinder test: height along +y, radius in the XZ plane
pub fn point_in_cylinder(
    point: &Vector3<f64>,
    centre: &Vector3<f64>,
    radius: f64,
    height: f64,
) -> bool {
    if !(centre.y - height / 2.0 <= point.y && point.y <= centre.y + height / 2.0) {
        return false;
    }

    let dx = point.x - centre.x;
    let dz = point.z - centre.z;
    dx * dx + dz * dz <= radius * radius
}

pub fn point_in_sphere(point: &Vector3<f64>, centre: &Vector3<f64>, radius: f64) -> bool {
    (point - centre).norm_squared() <= radius * radius
}
