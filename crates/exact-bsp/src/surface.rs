//! Facets tagged with directional material data.
//!
//! A surface is the unit of input to solid geometry construction and
//! partitioning: a facet plus the materials found on each side of it,
//! plus an application-defined payload carried through splitting
//! unchanged. By convention the denser material is on the back of the
//! facet's plane.

use std::fmt::Debug;

use crate::dimension::Dimension;
use crate::material::Material;

/// Application data carried on a surface through clipping and splitting.
///
/// The partitioner consults [`hint_level`](Self::hint_level) to find
/// pre-seeded split planes; everything else about the payload is opaque
/// to this crate.
pub trait SurfacePayload: Clone + Debug + PartialEq {
    /// The tree depth at which this surface's plane should be used as the
    /// partition plane, if this is a hint surface. Hint surfaces never
    /// appear in the finished tree.
    fn hint_level(&self) -> Option<usize> {
        None
    }
}

/// Plain geometry carries no payload.
impl SurfacePayload for () {}

/// A texture name in the map-file convention: names of the form
/// `HINT<depth>` mark hint surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureName(String);

impl TextureName {
    /// Wraps a texture name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The underlying name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SurfacePayload for TextureName {
    fn hint_level(&self) -> Option<usize> {
        self.0.strip_prefix("HINT").and_then(|n| n.parse().ok())
    }
}

/// An oriented facet with per-side materials and a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface<D: Dimension, P: SurfacePayload = ()> {
    facet: D::Facet,
    front_material: Material,
    back_material: Material,
    payload: P,
}

impl<D: Dimension, P: SurfacePayload> Surface<D, P> {
    /// Creates a new surface.
    pub fn new(facet: D::Facet, front_material: Material, back_material: Material, payload: P) -> Self {
        Self {
            facet,
            front_material,
            back_material,
            payload,
        }
    }

    /// The geometric extent of the surface.
    #[inline]
    pub fn facet(&self) -> &D::Facet {
        &self.facet
    }

    /// The plane on which the surface lies.
    #[inline]
    pub fn plane(&self) -> &D::Plane {
        D::plane_of(&self.facet)
    }

    /// The material on the front side of the surface.
    #[inline]
    pub fn front_material(&self) -> Material {
        self.front_material
    }

    /// The material on the back side of the surface.
    #[inline]
    pub fn back_material(&self) -> Material {
        self.back_material
    }

    /// The application payload.
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// The payload's hint depth, if this is a hint surface.
    #[inline]
    pub fn hint_level(&self) -> Option<usize> {
        self.payload.hint_level()
    }

    /// Whether both faces of the surface are visible. True when the back
    /// material does not block sight, as for a water boundary.
    pub fn is_two_sided(&self) -> bool {
        !self.back_material.is_opaque()
    }

    /// The same boundary viewed from the opposite side: cofacet geometry
    /// with the side materials swapped.
    pub fn cosurface(&self) -> Self {
        Self {
            facet: D::cofacet(&self.facet),
            front_material: self.back_material,
            back_material: self.front_material,
            payload: self.payload.clone(),
        }
    }

    /// A copy of this surface recording `material` as what its front side
    /// now borders on.
    pub fn fill_front(&self, material: Material) -> Self {
        Self {
            facet: self.facet.clone(),
            front_material: material,
            back_material: self.back_material,
            payload: self.payload.clone(),
        }
    }

    /// Splits the surface against a plane, distributing materials and
    /// payload to both fragments.
    pub fn split(&self, splitter: &D::Plane) -> (Option<Self>, Option<Self>) {
        let (front, back) = D::split(&self.facet, splitter);
        let rebuild = |facet: D::Facet| Self {
            facet,
            front_material: self.front_material,
            back_material: self.back_material,
            payload: self.payload.clone(),
        };
        (front.map(rebuild), back.map(rebuild))
    }
}
