//! Oriented hyperplanes with exact coefficients.
//!
//! A hyperplane divides space into a front halfspace (positive determinant)
//! and a back halfspace (negative determinant). Coefficients are normalized
//! on construction so that equality and hashing are direct value comparisons:
//! two planes are equal iff their coefficients are proportional with the same
//! sign, which keeps a plane distinguishable from its [coplane] (the same
//! geometric plane facing the other way).
//!
//! [coplane]: Hyperplane3D::coplane

use num_traits::{Signed, Zero};

use crate::point::{Point2D, Point3D};
use crate::rational::Rational;

fn sign(value: &Rational) -> i32 {
    match value.cmp(&Rational::zero()) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// An oriented line in 2D space, `A·x + B·y + C = 0`.
///
/// The front halfspace is the set of points with a positive determinant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hyperplane2D {
    a: Rational,
    b: Rational,
    c: Rational,
}

impl Hyperplane2D {
    /// Creates a new plane from its coefficients.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are both zero.
    pub fn new(a: Rational, b: Rational, c: Rational) -> Self {
        assert!(
            !(a.is_zero() && b.is_zero()),
            "hyperplane normal has zero length"
        );
        let mut result = Self { a, b, c };
        result.normalize();
        result
    }

    /// Creates the plane through two points.
    ///
    /// If `p1` is the origin and `p2` is `(1, 0)`, the front halfspace of the
    /// resulting plane is the positive-Y halfplane, by analogy to the 3D
    /// right-hand rule.
    ///
    /// # Panics
    ///
    /// Panics if the points coincide.
    pub fn from_points(p1: &Point2D, p2: &Point2D) -> Self {
        assert!(p1 != p2, "input points are identical");

        let a = &p1.y - &p2.y;
        let b = &p2.x - &p1.x;
        let c = -(&a * &p1.x + &b * &p1.y);
        Self::new(a, b, c)
    }

    // Scale so the largest normal coefficient magnitude is one; equality
    // testing is then plain coefficient comparison.
    fn normalize(&mut self) {
        let scale = self.a.abs().max(self.b.abs());
        self.a = &self.a / &scale;
        self.b = &self.b / &scale;
        self.c = &self.c / &scale;
    }

    /// The X coefficient of the plane normal.
    #[inline]
    pub fn a(&self) -> &Rational {
        &self.a
    }

    /// The Y coefficient of the plane normal.
    #[inline]
    pub fn b(&self) -> &Rational {
        &self.b
    }

    /// The constant term.
    #[inline]
    pub fn c(&self) -> &Rational {
        &self.c
    }

    /// Computes the determinant of a point against this plane: positive for
    /// points in the front halfspace, negative for the back halfspace, zero
    /// for points on the plane.
    ///
    /// The plane normal is generally not a unit vector, so the magnitude is
    /// not a distance; only the sign carries meaning.
    pub fn determinant(&self, p: &Point2D) -> Rational {
        &self.a * &p.x + &self.b * &p.y + &self.c
    }

    /// The sign of [`determinant`](Self::determinant): `1`, `0` or `-1`.
    pub fn halfspace_of(&self, p: &Point2D) -> i32 {
        sign(&self.determinant(p))
    }

    /// The same geometric plane with front and back halfspaces swapped.
    pub fn coplane(&self) -> Self {
        Self {
            a: -&self.a,
            b: -&self.b,
            c: -&self.c,
        }
    }
}

/// An oriented plane in 3D space, `A·x + B·y + C·z + D = 0`.
///
/// The front halfspace is the set of points with a positive determinant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hyperplane3D {
    a: Rational,
    b: Rational,
    c: Rational,
    d: Rational,
}

impl Hyperplane3D {
    /// Creates a new plane from its coefficients.
    ///
    /// # Panics
    ///
    /// Panics if `a`, `b` and `c` are all zero.
    pub fn new(a: Rational, b: Rational, c: Rational, d: Rational) -> Self {
        assert!(
            !(a.is_zero() && b.is_zero() && c.is_zero()),
            "hyperplane normal has zero length"
        );
        let mut result = Self { a, b, c, d };
        result.normalize();
        result
    }

    /// Creates the plane through three points. The given points lie on the
    /// resulting plane and the normal follows the right-hand rule for their
    /// winding order.
    ///
    /// # Panics
    ///
    /// Panics if the points are collinear.
    pub fn from_points(p1: &Point3D, p2: &Point3D, p3: &Point3D) -> Self {
        let v1x = &p2.x - &p1.x;
        let v1y = &p2.y - &p1.y;
        let v1z = &p2.z - &p1.z;

        let v2x = &p3.x - &p1.x;
        let v2y = &p3.y - &p1.y;
        let v2z = &p3.z - &p1.z;

        let a = &v1y * &v2z - &v2y * &v1z;
        let b = &v1z * &v2x - &v2z * &v1x;
        let c = &v1x * &v2y - &v2x * &v1y;

        assert!(
            !(a.is_zero() && b.is_zero() && c.is_zero()),
            "points are not linearly independent"
        );

        let d = -(&a * &p1.x + &b * &p1.y + &c * &p1.z);
        Self::new(a, b, c, d)
    }

    fn normalize(&mut self) {
        let scale = self.a.abs().max(self.b.abs()).max(self.c.abs());
        self.a = &self.a / &scale;
        self.b = &self.b / &scale;
        self.c = &self.c / &scale;
        self.d = &self.d / &scale;
    }

    /// The X coefficient of the plane normal.
    #[inline]
    pub fn a(&self) -> &Rational {
        &self.a
    }

    /// The Y coefficient of the plane normal.
    #[inline]
    pub fn b(&self) -> &Rational {
        &self.b
    }

    /// The Z coefficient of the plane normal.
    #[inline]
    pub fn c(&self) -> &Rational {
        &self.c
    }

    /// The constant term.
    #[inline]
    pub fn d(&self) -> &Rational {
        &self.d
    }

    /// Computes the determinant of a point against this plane: positive for
    /// points in the front halfspace, negative for the back halfspace, zero
    /// for points on the plane.
    ///
    /// The plane normal is generally not a unit vector, so the magnitude is
    /// not a distance; only the sign carries meaning.
    pub fn determinant(&self, p: &Point3D) -> Rational {
        &self.a * &p.x + &self.b * &p.y + &self.c * &p.z + &self.d
    }

    /// The sign of [`determinant`](Self::determinant): `1`, `0` or `-1`.
    pub fn halfspace_of(&self, p: &Point3D) -> i32 {
        sign(&self.determinant(p))
    }

    /// The same geometric plane with front and back halfspaces swapped.
    pub fn coplane(&self) -> Self {
        Self {
            a: -&self.a,
            b: -&self.b,
            c: -&self.c,
            d: -&self.d,
        }
    }
}
