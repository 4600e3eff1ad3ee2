//! Immutable rational-coordinate points.

use crate::rational::Rational;

/// A point in two-dimensional space with exact rational coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point2D {
    /// The X coordinate.
    pub x: Rational,
    /// The Y coordinate.
    pub y: Rational,
}

impl Point2D {
    /// Creates a new point from its coordinates.
    pub fn new(x: Rational, y: Rational) -> Self {
        Self { x, y }
    }
}

/// A point in three-dimensional space with exact rational coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point3D {
    /// The X coordinate.
    pub x: Rational,
    /// The Y coordinate.
    pub y: Rational,
    /// The Z coordinate.
    pub z: Rational,
}

impl Point3D {
    /// Creates a new point from its coordinates.
    pub fn new(x: Rational, y: Rational, z: Rational) -> Self {
        Self { x, y, z }
    }
}
