pub mod bounds;
pub mod loader;

use glam::Vec3;

pub use bounds::{BoundingBox, ViewExtent};
pub use loader::load_stl;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            normal: (b - a).cross(c - a).normalize_or_zero(),
            vertices: [a, b, c],
        }
    }

    /// Normal from the winding order, falling back to the stored facet normal
    /// for degenerate triangles.
    pub fn face_normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        let n = (b - a).cross(c - a);
        if n.length_squared() > f32::EPSILON {
            n.normalize()
        } else {
            self.normal.normalize_or_zero()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StlMesh {
    pub triangles: Vec<Triangle>,
}

impl StlMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Flattened vertex pool, three points per triangle in triangle order.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_flattened_in_triangle_order() {
        let mesh = StlMesh::new(vec![
            Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y),
            Triangle::new(Vec3::Z, Vec3::ONE, Vec3::NEG_ONE),
        ]);

        let points: Vec<Vec3> = mesh.points().collect();
        assert_eq!(
            points,
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE, Vec3::NEG_ONE]
        );
    }

    #[test]
    fn face_normal_follows_winding() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(tri.face_normal(), Vec3::Z);

        let flipped = Triangle::new(Vec3::ZERO, Vec3::Y, Vec3::X);
        assert_eq!(flipped.face_normal(), Vec3::NEG_Z);
    }

    #[test]
    fn degenerate_triangle_uses_stored_normal() {
        let tri = Triangle {
            normal: Vec3::new(0.0, 2.0, 0.0),
            vertices: [Vec3::ZERO, Vec3::X, Vec3::X * 2.0],
        };
        assert_eq!(tri.face_normal(), Vec3::Y);
    }
}
