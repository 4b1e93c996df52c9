use std::fmt;

use glam::Vec3;

use crate::error::{Result, ViewerError};
use crate::mesh::StlMesh;

/// Axis-aligned bounding box of a vertex pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Component-wise min/max over `points`. `None` for an empty pool.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;

        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn from_mesh(mesh: &StlMesh) -> Result<Self> {
        Self::from_points(mesh.points()).ok_or(ViewerError::EmptyMesh)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Min: {}, Max: {}", self.min, self.max)
    }
}

/// Cube used to frame the view. Every axis spans the same `[lo, hi]` range:
/// the smallest and largest coordinate found on any axis of any vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewExtent {
    pub lo: f32,
    pub hi: f32,
}

impl ViewExtent {
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let bbox = BoundingBox::from_points(points)?;
        Some(Self {
            lo: bbox.min.min_element(),
            hi: bbox.max.max_element(),
        })
    }

    pub fn center(&self) -> Vec3 {
        Vec3::splat((self.lo + self.hi) / 2.0)
    }

    /// Edge length, never zero so a single point still gets a usable view.
    pub fn span(&self) -> f32 {
        (self.hi - self.lo).max(1.0e-3)
    }

    pub fn radius(&self) -> f32 {
        self.span() * 3.0_f32.sqrt() / 2.0
    }

    pub fn corners(&self) -> (Vec3, Vec3) {
        let half = Vec3::splat(self.span() / 2.0);
        (self.center() - half, self.center() + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;
    use proptest::prelude::*;

    fn mesh(tris: &[[[f32; 3]; 3]]) -> StlMesh {
        StlMesh::new(
            tris.iter()
                .map(|[a, b, c]| {
                    Triangle::new(Vec3::from_array(*a), Vec3::from_array(*b), Vec3::from_array(*c))
                })
                .collect(),
        )
    }

    #[test]
    fn single_triangle() {
        let bbox = BoundingBox::from_mesh(&mesh(&[[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]))
        .unwrap();

        assert_eq!(bbox.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn opposite_corners() {
        let bbox = BoundingBox::from_mesh(&mesh(&[
            [[-1.0, -2.0, -3.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            [[4.0, 5.0, 6.0], [0.0, 1.0, 2.0], [3.0, -1.0, 0.5]],
        ]))
        .unwrap();

        assert_eq!(bbox.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn center_is_midpoint() {
        let bbox = BoundingBox {
            min: Vec3::new(-1.0, -2.0, -3.0),
            max: Vec3::new(4.0, 5.0, 6.0),
        };
        assert_eq!(bbox.center(), Vec3::new(1.5, 1.5, 1.5));
        assert_eq!(bbox.size(), Vec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert!(matches!(
            BoundingBox::from_mesh(&StlMesh::default()),
            Err(ViewerError::EmptyMesh)
        ));
    }

    #[test]
    fn display_matches_console_report() {
        let bbox = BoundingBox {
            min: Vec3::new(0.0, 0.0, 0.0),
            max: Vec3::new(1.0, 1.5, 0.0),
        };
        assert_eq!(bbox.to_string(), "Min: [0, 0, 0], Max: [1, 1.5, 0]");
    }

    #[test]
    fn view_extent_spans_all_axes() {
        let extent = ViewExtent::from_points([
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
        ])
        .unwrap();

        assert_eq!(extent, ViewExtent { lo: -3.0, hi: 6.0 });
        assert_eq!(extent.center(), Vec3::splat(1.5));
        assert_eq!(extent.corners(), (Vec3::splat(-3.0), Vec3::splat(6.0)));
    }

    #[test]
    fn view_extent_of_single_point_is_not_degenerate() {
        let extent = ViewExtent::from_points([Vec3::ONE]).unwrap();
        assert!(extent.span() > 0.0);
        assert!(extent.radius() > 0.0);
    }

    fn coord() -> impl Strategy<Value = f32> {
        -1.0e4_f32..1.0e4_f32
    }

    fn triangle() -> impl Strategy<Value = Triangle> {
        prop::array::uniform3(prop::array::uniform3(coord())).prop_map(|[a, b, c]| {
            Triangle::new(Vec3::from_array(a), Vec3::from_array(b), Vec3::from_array(c))
        })
    }

    fn stl_mesh() -> impl Strategy<Value = StlMesh> {
        prop::collection::vec(triangle(), 1..40).prop_map(StlMesh::new)
    }

    proptest! {
        #[test]
        fn every_vertex_is_contained(mesh in stl_mesh()) {
            let bbox = BoundingBox::from_mesh(&mesh).unwrap();
            for p in mesh.points() {
                prop_assert!(bbox.contains(p));
            }
        }

        #[test]
        fn min_never_exceeds_max(mesh in stl_mesh()) {
            let bbox = BoundingBox::from_mesh(&mesh).unwrap();
            prop_assert!(bbox.min.cmple(bbox.max).all());
        }

        #[test]
        fn reordering_triangles_keeps_bounds(mesh in stl_mesh(), shift in 0usize..40) {
            let mut rotated = mesh.clone();
            let len = rotated.triangles.len();
            rotated.triangles.rotate_left(shift % len);
            rotated.triangles.reverse();

            prop_assert_eq!(
                BoundingBox::from_mesh(&mesh).unwrap(),
                BoundingBox::from_mesh(&rotated).unwrap()
            );
        }

        #[test]
        fn duplicating_a_triangle_keeps_bounds(mesh in stl_mesh(), pick in 0usize..40) {
            let mut doubled = mesh.clone();
            let tri = doubled.triangles[pick % doubled.triangles.len()];
            doubled.triangles.push(tri);

            prop_assert_eq!(
                BoundingBox::from_mesh(&mesh).unwrap(),
                BoundingBox::from_mesh(&doubled).unwrap()
            );
        }

        #[test]
        fn computing_twice_is_identical(mesh in stl_mesh()) {
            prop_assert_eq!(
                BoundingBox::from_mesh(&mesh).unwrap(),
                BoundingBox::from_mesh(&mesh).unwrap()
            );
        }
    }
}
