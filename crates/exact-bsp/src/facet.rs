//! Bounded planar regions and exact splitting.
//!
//! A facet is an oriented convex region lying exactly on a hyperplane: a
//! line segment in 2D, a convex polygon in 3D. Every winding point has a
//! zero determinant against the facet's plane, and the winding runs
//! counter-clockwise when viewed from the plane's front halfspace.
//!
//! [`Facet2D::split`] and [`Facet3D::split`] are the primitive the whole
//! partitioning pipeline is built on: they divide a facet into the pieces
//! lying in the front and back halfspaces of an arbitrary plane, computing
//! intersection points by exact rational interpolation.

use num_traits::{One, Signed, Zero};

use crate::plane::{Hyperplane2D, Hyperplane3D};
use crate::point::{Point2D, Point3D};
use crate::rational::{Rational, rat};

/// Side length of the hypercube used to bound a facet created directly from
/// a plane, before the true extent is known. Large enough to enclose any
/// practical map geometry; clipping trims it down afterwards.
pub const WORLD_RADIUS: i64 = 100_000;

/// A line segment lying on a [`Hyperplane2D`].
///
/// The segment runs from `start` to `end` such that the plane's front
/// halfspace is on its left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet2D {
    plane: Hyperplane2D,
    start: Point2D,
    end: Point2D,
}

impl Facet2D {
    /// Creates a new segment facet.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either endpoint is off the plane or the
    /// endpoints coincide.
    pub fn new(plane: Hyperplane2D, start: Point2D, end: Point2D) -> Self {
        debug_assert!(start != end, "degenerate segment");
        debug_assert!(plane.halfspace_of(&start) == 0, "start point off plane");
        debug_assert!(plane.halfspace_of(&end) == 0, "end point off plane");
        Self { plane, start, end }
    }

    /// Creates a maximal facet on a plane: a segment of half-length
    /// [`WORLD_RADIUS`] centered on the plane's closest approach to the
    /// origin axes, oriented to match the plane.
    pub fn from_plane(plane: &Hyperplane2D) -> Self {
        let radius = rat(WORLD_RADIUS);

        // A base point on the line, solving whichever coordinate has a
        // nonzero coefficient.
        let (bx, by) = if plane.b().is_zero() {
            (-plane.c() / plane.a(), Rational::zero())
        } else {
            (Rational::zero(), -plane.c() / plane.b())
        };

        // Direction (B, -A) keeps the front halfspace on the left.
        let (dx, dy) = (plane.b().clone(), -plane.a());
        let start = Point2D::new(&bx - &(&dx * &radius), &by - &(&dy * &radius));
        let end = Point2D::new(&bx + &(&dx * &radius), &by + &(&dy * &radius));
        Self::new(plane.clone(), start, end)
    }

    /// The line on which the segment lies.
    #[inline]
    pub fn plane(&self) -> &Hyperplane2D {
        &self.plane
    }

    /// The start point of the segment.
    #[inline]
    pub fn start(&self) -> &Point2D {
        &self.start
    }

    /// The end point of the segment.
    #[inline]
    pub fn end(&self) -> &Point2D {
        &self.end
    }

    /// The boundary points of the segment, start first.
    pub fn points(&self) -> impl Iterator<Item = &Point2D> {
        [&self.start, &self.end].into_iter()
    }

    /// The same segment viewed from the opposite side: reversed winding on
    /// the coplane.
    pub fn cofacet(&self) -> Self {
        Self {
            plane: self.plane.coplane(),
            start: self.end.clone(),
            end: self.start.clone(),
        }
    }

    /// Splits this segment by a plane into the pieces lying in its front and
    /// back halfspaces. A piece is `None` if the segment is entirely absent
    /// on that side. A segment on the splitting plane itself goes wholly to
    /// the front if it faces the same way, wholly to the back otherwise.
    pub fn split(&self, splitter: &Hyperplane2D) -> (Option<Facet2D>, Option<Facet2D>) {
        if splitter == &self.plane {
            return (Some(self.clone()), None);
        }
        if splitter.coplane() == self.plane {
            return (None, Some(self.clone()));
        }

        let start_det = splitter.determinant(&self.start);
        let end_det = splitter.determinant(&self.end);
        let zero = Rational::zero();

        if start_det >= zero && end_det >= zero {
            return (Some(self.clone()), None);
        }
        if start_det <= zero && end_det <= zero {
            return (None, Some(self.clone()));
        }

        let t_end = &start_det / (&start_det - &end_det);
        let t_start = Rational::one() - &t_end;
        let mid = Point2D::new(
            &self.start.x * &t_start + &self.end.x * &t_end,
            &self.start.y * &t_start + &self.end.y * &t_end,
        );
        assert!(
            splitter.halfspace_of(&mid) == 0,
            "computed intersection point is off the splitting plane"
        );

        let head = Facet2D::new(self.plane.clone(), self.start.clone(), mid.clone());
        let tail = Facet2D::new(self.plane.clone(), mid, self.end.clone());
        if start_det > zero {
            (Some(head), Some(tail))
        } else {
            (Some(tail), Some(head))
        }
    }
}

/// A convex polygon lying on a [`Hyperplane3D`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet3D {
    plane: Hyperplane3D,
    points: Vec<Point3D>,
}

impl Facet3D {
    /// Creates a new polygon facet from a winding of at least three points.
    ///
    /// # Panics
    ///
    /// Panics if fewer than three points are given. In debug builds, also
    /// panics if any point is off the plane.
    pub fn new(plane: Hyperplane3D, points: Vec<Point3D>) -> Self {
        assert!(points.len() >= 3, "polygon facet needs at least 3 points");
        debug_assert!(
            points.iter().all(|p| plane.halfspace_of(p) == 0),
            "winding point off plane"
        );
        Self { plane, points }
    }

    /// Creates a maximal facet on a plane by intersecting it with a hypercube
    /// of side [`WORLD_RADIUS`], wound counter-clockwise as seen from the
    /// plane's front halfspace.
    pub fn from_plane(plane: &Hyperplane3D) -> Self {
        let size = rat(WORLD_RADIUS);

        let solve_x = |y: Rational, z: Rational| {
            let x = -(plane.b() * &y + plane.c() * &z + plane.d()) / plane.a();
            Point3D::new(x, y, z)
        };
        let solve_y = |x: Rational, z: Rational| {
            let y = -(plane.a() * &x + plane.c() * &z + plane.d()) / plane.b();
            Point3D::new(x, y, z)
        };
        let solve_z = |x: Rational, y: Rational| {
            let z = -(plane.a() * &x + plane.b() * &y + plane.d()) / plane.c();
            Point3D::new(x, y, z)
        };

        let points = if !plane.a().is_zero() {
            let sign = rat(plane.a().signum().to_integer().try_into().unwrap_or(1));
            vec![
                solve_x(size.clone(), size.clone()),
                solve_x(-&size * &sign, &size * &sign),
                solve_x(-&size, -&size),
                solve_x(&size * &sign, -&size * &sign),
            ]
        } else if !plane.b().is_zero() {
            let sign = rat(plane.b().signum().to_integer().try_into().unwrap_or(1));
            vec![
                solve_y(size.clone(), size.clone()),
                solve_y(&size * &sign, -&size * &sign),
                solve_y(-&size, -&size),
                solve_y(-&size * &sign, &size * &sign),
            ]
        } else {
            // Constructor affirms that C is nonzero.
            let sign = rat(plane.c().signum().to_integer().try_into().unwrap_or(1));
            vec![
                solve_z(size.clone(), size.clone()),
                solve_z(-&size * &sign, &size * &sign),
                solve_z(-&size, -&size),
                solve_z(&size * &sign, -&size * &sign),
            ]
        };

        Self::new(plane.clone(), points)
    }

    /// The plane on which the polygon lies.
    #[inline]
    pub fn plane(&self) -> &Hyperplane3D {
        &self.plane
    }

    /// The winding points, counter-clockwise as seen from the front.
    #[inline]
    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    /// The number of winding points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The same polygon viewed from the opposite side: reversed winding on
    /// the coplane.
    pub fn cofacet(&self) -> Self {
        Self {
            plane: self.plane.coplane(),
            points: self.points.iter().rev().cloned().collect(),
        }
    }

    /// Splits this polygon by a plane into the pieces lying in its front and
    /// back halfspaces.
    ///
    /// A piece is `None` if the polygon is entirely absent on that side, or
    /// if the piece would be degenerate (fewer than three points). A polygon
    /// on the splitting plane itself goes wholly to the front if it faces
    /// the same way, wholly to the back otherwise. On-plane winding points
    /// are shared by both pieces.
    ///
    /// # Panics
    ///
    /// Panics if a computed intersection point does not lie exactly on the
    /// splitting plane or its interpolation parameter falls outside `(0, 1)`;
    /// either indicates a defect, not bad input.
    pub fn split(&self, splitter: &Hyperplane3D) -> (Option<Facet3D>, Option<Facet3D>) {
        if splitter == &self.plane {
            return (Some(self.clone()), None);
        }
        if splitter.coplane() == self.plane {
            return (None, Some(self.clone()));
        }

        let mut signs: Vec<i32> = self
            .points
            .iter()
            .map(|p| splitter.halfspace_of(p))
            .collect();
        let mut winding = self.points.clone();

        if signs.iter().all(|&s| s >= 0) {
            return (Some(self.clone()), None);
        }
        if signs.iter().all(|&s| s <= 0) {
            return (None, Some(self.clone()));
        }

        // Walk the winding cyclically, inserting an exact intersection point
        // into every edge whose endpoints lie strictly on opposite sides.
        // Iterating in reverse keeps earlier indices stable across inserts.
        for i in (0..winding.len()).rev() {
            let j = (i + 1) % winding.len();
            if signs[i] * signs[j] >= 0 {
                continue;
            }

            let det_i = splitter.determinant(&winding[i]);
            let det_j = splitter.determinant(&winding[j]);
            let t_j = &det_i / (&det_i - &det_j);
            let t_i = Rational::one() - &t_j;
            assert!(
                t_j > Rational::zero() && t_j < Rational::one(),
                "interpolation parameter out of range"
            );

            let mid = Point3D::new(
                &winding[i].x * &t_i + &winding[j].x * &t_j,
                &winding[i].y * &t_i + &winding[j].y * &t_j,
                &winding[i].z * &t_i + &winding[j].z * &t_j,
            );
            assert!(
                splitter.halfspace_of(&mid) == 0,
                "computed intersection point is off the splitting plane"
            );

            winding.insert(i + 1, mid);
            signs.insert(i + 1, 0);
        }

        let side = |keep: fn(i32) -> bool| {
            let points: Vec<Point3D> = winding
                .iter()
                .zip(&signs)
                .filter(|&(_, &s)| keep(s))
                .map(|(p, _)| p.clone())
                .collect();
            if points.len() < 3 {
                None
            } else {
                Some(Facet3D::new(self.plane.clone(), points))
            }
        };

        (side(|s| s >= 0), side(|s| s <= 0))
    }
}
