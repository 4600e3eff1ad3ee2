//! Dimension-agnostic geometry capability trait.
//!
//! The partitioning, solid-geometry, portal and culling algorithms are
//! identical in 2D and 3D; only the concrete point, plane, facet and
//! bounds types differ. [`Dimension`] gathers the operations those
//! algorithms need, and [`Dim2`] / [`Dim3`] bind them to the concrete
//! geometry modules.

use std::fmt::Debug;
use std::hash::Hash;

use crate::bounds::{Orthotope2D, Orthotope3D};
use crate::facet::{Facet2D, Facet3D};
use crate::plane::{Hyperplane2D, Hyperplane3D};
use crate::point::{Point2D, Point3D};

/// The geometric vocabulary of one spatial dimensionality.
///
/// Implementations are zero-sized markers; all state lives in the
/// associated types.
pub trait Dimension: Copy + Clone + Debug + PartialEq + Eq {
    /// Location in space.
    type Point: Clone + Debug + PartialEq + Eq + Hash;
    /// Oriented hyperplane; equality is geometric, so a plane and its
    /// coplane compare unequal.
    type Plane: Clone + Debug + PartialEq + Eq + Hash;
    /// Oriented convex planar region.
    type Facet: Clone + Debug + PartialEq + Eq;
    /// Axis-aligned bounding volume.
    type Bounds: Clone + Debug + PartialEq + Eq;

    /// The fewest boundary surfaces a brush can have and still enclose a
    /// volume: 3 in 2D, 4 in 3D.
    const MIN_BRUSH_SURFACES: usize;

    /// The plane on which a facet lies.
    fn plane_of(facet: &Self::Facet) -> &Self::Plane;

    /// The same geometric plane facing the other way.
    fn coplane(plane: &Self::Plane) -> Self::Plane;

    /// The same facet viewed from the opposite side.
    fn cofacet(facet: &Self::Facet) -> Self::Facet;

    /// A maximal bounded facet lying on a plane, later trimmed by clipping.
    fn facetize(plane: &Self::Plane) -> Self::Facet;

    /// Divides a facet into its front and back pieces against a plane.
    fn split(
        facet: &Self::Facet,
        splitter: &Self::Plane,
    ) -> (Option<Self::Facet>, Option<Self::Facet>);

    /// Classifies a facet against a plane as the (min, max) halfspace signs
    /// over its boundary points. A facet coincident with the plane reports
    /// `(1, 1)`; coincident with the coplane, `(-1, -1)`; a straddling facet
    /// reports `(-1, 1)`.
    fn classify_facet(facet: &Self::Facet, plane: &Self::Plane) -> (i32, i32);

    /// The halfspace sign of a point against a plane.
    fn classify_point(point: &Self::Point, plane: &Self::Plane) -> i32;

    /// The bounding volume of a facet's boundary points.
    fn facet_bounds(facet: &Self::Facet) -> Self::Bounds;

    /// The smallest bounding volume covering both arguments.
    fn union_bounds(a: &Self::Bounds, b: &Self::Bounds) -> Self::Bounds;

    /// Whether two bounding volumes share at least one point.
    fn bounds_overlap(a: &Self::Bounds, b: &Self::Bounds) -> bool;

    /// The boundary facets of a bounding volume, normals facing inward.
    fn bounds_facets(bounds: &Self::Bounds) -> Vec<Self::Facet>;
}

fn classify_points<'a, P: 'a>(
    points: impl Iterator<Item = &'a P>,
    sign: impl Fn(&P) -> i32,
) -> (i32, i32) {
    points.map(sign).fold((1, -1), |(min, max), s| {
        (min.min(s), max.max(s))
    })
}

/// Two-dimensional geometry marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dim2;

impl Dimension for Dim2 {
    type Point = Point2D;
    type Plane = Hyperplane2D;
    type Facet = Facet2D;
    type Bounds = Orthotope2D;

    const MIN_BRUSH_SURFACES: usize = 3;

    fn plane_of(facet: &Facet2D) -> &Hyperplane2D {
        facet.plane()
    }

    fn coplane(plane: &Hyperplane2D) -> Hyperplane2D {
        plane.coplane()
    }

    fn cofacet(facet: &Facet2D) -> Facet2D {
        facet.cofacet()
    }

    fn facetize(plane: &Hyperplane2D) -> Facet2D {
        Facet2D::from_plane(plane)
    }

    fn split(facet: &Facet2D, splitter: &Hyperplane2D) -> (Option<Facet2D>, Option<Facet2D>) {
        facet.split(splitter)
    }

    fn classify_facet(facet: &Facet2D, plane: &Hyperplane2D) -> (i32, i32) {
        if plane == facet.plane() {
            return (1, 1);
        }
        if &plane.coplane() == facet.plane() {
            return (-1, -1);
        }
        classify_points(facet.points(), |p| plane.halfspace_of(p))
    }

    fn classify_point(point: &Point2D, plane: &Hyperplane2D) -> i32 {
        plane.halfspace_of(point)
    }

    fn facet_bounds(facet: &Facet2D) -> Orthotope2D {
        Orthotope2D::from_points(facet.points())
    }

    fn union_bounds(a: &Orthotope2D, b: &Orthotope2D) -> Orthotope2D {
        a.union(b)
    }

    fn bounds_overlap(a: &Orthotope2D, b: &Orthotope2D) -> bool {
        a.intersects(b)
    }

    fn bounds_facets(bounds: &Orthotope2D) -> Vec<Facet2D> {
        bounds.facets()
    }
}

/// Three-dimensional geometry marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dim3;

impl Dimension for Dim3 {
    type Point = Point3D;
    type Plane = Hyperplane3D;
    type Facet = Facet3D;
    type Bounds = Orthotope3D;

    const MIN_BRUSH_SURFACES: usize = 4;

    fn plane_of(facet: &Facet3D) -> &Hyperplane3D {
        facet.plane()
    }

    fn coplane(plane: &Hyperplane3D) -> Hyperplane3D {
        plane.coplane()
    }

    fn cofacet(facet: &Facet3D) -> Facet3D {
        facet.cofacet()
    }

    fn facetize(plane: &Hyperplane3D) -> Facet3D {
        Facet3D::from_plane(plane)
    }

    fn split(facet: &Facet3D, splitter: &Hyperplane3D) -> (Option<Facet3D>, Option<Facet3D>) {
        facet.split(splitter)
    }

    fn classify_facet(facet: &Facet3D, plane: &Hyperplane3D) -> (i32, i32) {
        if plane == facet.plane() {
            return (1, 1);
        }
        if &plane.coplane() == facet.plane() {
            return (-1, -1);
        }
        classify_points(facet.points().iter(), |p| plane.halfspace_of(p))
    }

    fn classify_point(point: &Point3D, plane: &Hyperplane3D) -> i32 {
        plane.halfspace_of(point)
    }

    fn facet_bounds(facet: &Facet3D) -> Orthotope3D {
        Orthotope3D::from_points(facet.points())
    }

    fn union_bounds(a: &Orthotope3D, b: &Orthotope3D) -> Orthotope3D {
        a.union(b)
    }

    fn bounds_overlap(a: &Orthotope3D, b: &Orthotope3D) -> bool {
        a.intersects(b)
    }

    fn bounds_facets(bounds: &Orthotope3D) -> Vec<Facet3D> {
        bounds.facets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::rat;

    fn pt3(x: i64, y: i64, z: i64) -> Point3D {
        Point3D::new(rat(x), rat(y), rat(z))
    }

    fn square_at_z(z: i64) -> Facet3D {
        let plane = Hyperplane3D::new(rat(0), rat(0), rat(1), rat(-z));
        Facet3D::new(
            plane,
            vec![pt3(0, 0, z), pt3(1, 0, z), pt3(1, 1, z), pt3(0, 1, z)],
        )
    }

    #[test]
    fn classify_coincident_facet() {
        let facet = square_at_z(2);
        let plane = facet.plane().clone();
        assert_eq!(Dim3::classify_facet(&facet, &plane), (1, 1));
        assert_eq!(Dim3::classify_facet(&facet, &plane.coplane()), (-1, -1));
    }

    #[test]
    fn classify_offset_and_straddling_facets() {
        let plane = Hyperplane3D::new(rat(0), rat(0), rat(1), rat(0));
        assert_eq!(Dim3::classify_facet(&square_at_z(3), &plane), (1, 1));
        assert_eq!(Dim3::classify_facet(&square_at_z(-3), &plane), (-1, -1));

        // Vertical square crossing z = 0.
        let wall_plane = Hyperplane3D::new(rat(1), rat(0), rat(0), rat(0));
        let wall = Facet3D::new(
            wall_plane,
            vec![pt3(0, 0, -1), pt3(0, 1, -1), pt3(0, 1, 1), pt3(0, 0, 1)],
        );
        assert_eq!(Dim3::classify_facet(&wall, &plane), (-1, 1));
    }

    #[test]
    fn facet_touching_plane_from_front() {
        let plane = Hyperplane3D::new(rat(0), rat(0), rat(1), rat(0));
        let wall_plane = Hyperplane3D::new(rat(1), rat(0), rat(0), rat(0));
        let wall = Facet3D::new(
            wall_plane,
            vec![pt3(0, 0, 0), pt3(0, 1, 0), pt3(0, 1, 1), pt3(0, 0, 1)],
        );
        assert_eq!(Dim3::classify_facet(&wall, &plane), (0, 1));
    }
}
