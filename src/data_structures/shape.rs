//! The primitive meshes the mesh library knows how to build and draw.

/// One of the basic shapes provided by the mesh library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Plane,
    Cone,
    Torus,
    Box,
    Sphere,
    /// Four-sided pyramid.
    Pyramid4,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Plane,
        Shape::Cone,
        Shape::Torus,
        Shape::Box,
        Shape::Sphere,
        Shape::Pyramid4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Plane => "plane",
            Shape::Cone => "cone",
            Shape::Torus => "torus",
            Shape::Box => "box",
            Shape::Sphere => "sphere",
            Shape::Pyramid4 => "pyramid4",
        }
    }
}
