//! Axis-aligned bounding boxes over rational coordinates.
//!
//! An orthotope is the Cartesian product of one closed interval per axis.
//! Intervals are closed, so two boxes that merely touch along a face still
//! intersect; the clipping pipeline relies on this when deduplicating
//! coplanar faces of adjacent brushes.

use crate::facet::{Facet2D, Facet3D};
use crate::plane::{Hyperplane2D, Hyperplane3D};
use crate::point::{Point2D, Point3D};
use crate::rational::{Rational, rat};

/// A closed interval of rational values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    min: Rational,
    max: Rational,
}

impl Range {
    /// Creates a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `min` is greater than `max`.
    pub fn new(min: Rational, max: Rational) -> Self {
        assert!(min <= max, "interval is inverted");
        Self { min, max }
    }

    /// The smallest value in the interval.
    #[inline]
    pub fn min(&self) -> &Rational {
        &self.min
    }

    /// The largest value in the interval.
    #[inline]
    pub fn max(&self) -> &Rational {
        &self.max
    }

    /// Whether `value` lies within the interval, endpoints included.
    pub fn contains(&self, value: &Rational) -> bool {
        &self.min <= value && value <= &self.max
    }

    /// Whether this interval and `other` share at least one value. Touching
    /// endpoints count.
    pub fn intersects(&self, other: &Range) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Grows the interval to cover `value`.
    fn extend(&mut self, value: &Rational) {
        if value < &self.min {
            self.min = value.clone();
        }
        if value > &self.max {
            self.max = value.clone();
        }
    }

    fn union(&self, other: &Range) -> Range {
        Range::new(
            self.min.clone().min(other.min.clone()),
            self.max.clone().max(other.max.clone()),
        )
    }

    fn padded(&self, thickness: &Rational) -> Range {
        Range::new(&self.min - thickness, &self.max + thickness)
    }
}

/// An axis-aligned bounding rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orthotope2D {
    x: Range,
    y: Range,
}

impl Orthotope2D {
    /// Creates a new bounding rectangle from per-axis intervals.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Computes the smallest rectangle containing every point.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Self {
        let mut points = points.into_iter();
        let first = points.next().expect("bounding box of no points");
        let mut x = Range::new(first.x.clone(), first.x.clone());
        let mut y = Range::new(first.y.clone(), first.y.clone());
        for p in points {
            x.extend(&p.x);
            y.extend(&p.y);
        }
        Self { x, y }
    }

    /// The X interval.
    #[inline]
    pub fn x(&self) -> &Range {
        &self.x
    }

    /// The Y interval.
    #[inline]
    pub fn y(&self) -> &Range {
        &self.y
    }

    /// Whether `point` lies within the rectangle, boundary included.
    pub fn contains(&self, point: &Point2D) -> bool {
        self.x.contains(&point.x) && self.y.contains(&point.y)
    }

    /// The smallest rectangle covering both this one and `other`.
    pub fn union(&self, other: &Orthotope2D) -> Orthotope2D {
        Orthotope2D::new(self.x.union(&other.x), self.y.union(&other.y))
    }

    /// Whether this rectangle and `other` share at least one point. Touching
    /// boundaries count.
    pub fn intersects(&self, other: &Orthotope2D) -> bool {
        self.x.intersects(&other.x) && self.y.intersects(&other.y)
    }

    /// A copy of this rectangle grown by `thickness` on every side.
    ///
    /// # Panics
    ///
    /// Panics if `thickness` is negative by more than half an axis extent.
    pub fn padded(&self, thickness: &Rational) -> Orthotope2D {
        Orthotope2D::new(self.x.padded(thickness), self.y.padded(thickness))
    }

    /// Constructs the four boundary facets of this rectangle, wound so their
    /// surface normals face inward.
    pub fn facets(&self) -> Vec<Facet2D> {
        let corners = [
            Point2D::new(self.x.min.clone(), self.y.min.clone()),
            Point2D::new(self.x.min.clone(), self.y.max.clone()),
            Point2D::new(self.x.max.clone(), self.y.max.clone()),
            Point2D::new(self.x.max.clone(), self.y.min.clone()),
        ];

        vec![
            Facet2D::new(
                Hyperplane2D::new(rat(1), rat(0), -&self.x.min),
                corners[1].clone(),
                corners[0].clone(),
            ),
            Facet2D::new(
                Hyperplane2D::new(rat(0), rat(-1), self.y.max.clone()),
                corners[2].clone(),
                corners[1].clone(),
            ),
            Facet2D::new(
                Hyperplane2D::new(rat(-1), rat(0), self.x.max.clone()),
                corners[3].clone(),
                corners[2].clone(),
            ),
            Facet2D::new(
                Hyperplane2D::new(rat(0), rat(1), -&self.y.min),
                corners[0].clone(),
                corners[3].clone(),
            ),
        ]
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orthotope3D {
    x: Range,
    y: Range,
    z: Range,
}

impl Orthotope3D {
    /// Creates a new bounding box from per-axis intervals.
    pub fn new(x: Range, y: Range, z: Range) -> Self {
        Self { x, y, z }
    }

    /// Computes the smallest box containing every point.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3D>) -> Self {
        let mut points = points.into_iter();
        let first = points.next().expect("bounding box of no points");
        let mut x = Range::new(first.x.clone(), first.x.clone());
        let mut y = Range::new(first.y.clone(), first.y.clone());
        let mut z = Range::new(first.z.clone(), first.z.clone());
        for p in points {
            x.extend(&p.x);
            y.extend(&p.y);
            z.extend(&p.z);
        }
        Self { x, y, z }
    }

    /// The X interval.
    #[inline]
    pub fn x(&self) -> &Range {
        &self.x
    }

    /// The Y interval.
    #[inline]
    pub fn y(&self) -> &Range {
        &self.y
    }

    /// The Z interval.
    #[inline]
    pub fn z(&self) -> &Range {
        &self.z
    }

    /// Whether `point` lies within the box, boundary included.
    pub fn contains(&self, point: &Point3D) -> bool {
        self.x.contains(&point.x) && self.y.contains(&point.y) && self.z.contains(&point.z)
    }

    /// The smallest box covering both this one and `other`.
    pub fn union(&self, other: &Orthotope3D) -> Orthotope3D {
        Orthotope3D::new(
            self.x.union(&other.x),
            self.y.union(&other.y),
            self.z.union(&other.z),
        )
    }

    /// Whether this box and `other` share at least one point. Touching
    /// faces count.
    pub fn intersects(&self, other: &Orthotope3D) -> bool {
        self.x.intersects(&other.x) && self.y.intersects(&other.y) && self.z.intersects(&other.z)
    }

    /// A copy of this box grown by `thickness` on every side.
    pub fn padded(&self, thickness: &Rational) -> Orthotope3D {
        Orthotope3D::new(
            self.x.padded(thickness),
            self.y.padded(thickness),
            self.z.padded(thickness),
        )
    }

    /// Constructs the six boundary facets of this box, wound so their
    /// surface normals face inward.
    pub fn facets(&self) -> Vec<Facet3D> {
        let corners = [
            Point3D::new(self.x.min.clone(), self.y.min.clone(), self.z.min.clone()),
            Point3D::new(self.x.min.clone(), self.y.max.clone(), self.z.min.clone()),
            Point3D::new(self.x.min.clone(), self.y.min.clone(), self.z.max.clone()),
            Point3D::new(self.x.min.clone(), self.y.max.clone(), self.z.max.clone()),
            Point3D::new(self.x.max.clone(), self.y.min.clone(), self.z.max.clone()),
            Point3D::new(self.x.max.clone(), self.y.max.clone(), self.z.max.clone()),
            Point3D::new(self.x.max.clone(), self.y.min.clone(), self.z.min.clone()),
            Point3D::new(self.x.max.clone(), self.y.max.clone(), self.z.min.clone()),
        ];
        let pick = |indices: [usize; 4]| indices.iter().map(|&i| corners[i].clone()).collect();

        vec![
            Facet3D::new(
                Hyperplane3D::new(rat(1), rat(0), rat(0), -&self.x.min),
                pick([0, 1, 3, 2]),
            ),
            Facet3D::new(
                Hyperplane3D::new(rat(0), rat(0), rat(-1), self.z.max.clone()),
                pick([2, 3, 5, 4]),
            ),
            Facet3D::new(
                Hyperplane3D::new(rat(-1), rat(0), rat(0), self.x.max.clone()),
                pick([4, 5, 7, 6]),
            ),
            Facet3D::new(
                Hyperplane3D::new(rat(0), rat(0), rat(1), -&self.z.min),
                pick([6, 7, 1, 0]),
            ),
            Facet3D::new(
                Hyperplane3D::new(rat(0), rat(1), rat(0), -&self.y.min),
                pick([0, 2, 4, 6]),
            ),
            Facet3D::new(
                Hyperplane3D::new(rat(0), rat(-1), rat(0), self.y.max.clone()),
                pick([7, 5, 3, 1]),
            ),
        ]
    }
}
