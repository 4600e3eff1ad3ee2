//! Constructive solid geometry over convex brushes.
//!
//! A brush is a convex solid described by its boundary surfaces and an
//! interior material. [`construct_solid_geometry`] merges a set of
//! brushes into the boundary surfaces of their union: overlapping
//! geometry is clipped away, coincident faces are deduplicated, and
//! surfaces left bordering a translucent volume are retagged with that
//! volume's material.

use log::debug;

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::material::Material;
use crate::surface::{Surface, SurfacePayload};

/// A convex polytope with an interior material.
#[derive(Debug, Clone)]
pub struct Brush<D: Dimension, P: SurfacePayload = ()> {
    surfaces: Vec<Surface<D, P>>,
    bounds: D::Bounds,
    material: Material,
}

impl<D: Dimension, P: SurfacePayload> Brush<D, P> {
    /// Creates a brush from explicit boundary surfaces.
    ///
    /// # Panics
    ///
    /// Panics if `surfaces` is empty.
    pub fn new(surfaces: Vec<Surface<D, P>>, material: Material) -> Self {
        let bounds = surfaces
            .iter()
            .map(|s| D::facet_bounds(s.facet()))
            .reduce(|a, b| D::union_bounds(&a, &b))
            .expect("brush has no surfaces");
        Self {
            surfaces,
            bounds,
            material,
        }
    }

    /// Reifies an implicit brush: for each `(plane, factory)` pair, derives
    /// the bounded boundary surface on that plane by clipping a maximal
    /// facet to the back halfspace of every other plane, then hands the
    /// surviving facet to the factory. Planes whose facet is clipped away
    /// entirely are redundant and contribute no surface.
    ///
    /// `index` is the brush's position in its input list, used in error
    /// reports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateBrush`] if fewer surfaces survive than
    /// can enclose a volume.
    pub fn reify<F>(
        faces: Vec<(D::Plane, F)>,
        material: Material,
        index: usize,
    ) -> Result<Self>
    where
        F: FnOnce(D::Facet) -> Surface<D, P>,
    {
        let planes: Vec<D::Plane> = faces.iter().map(|(plane, _)| plane.clone()).collect();
        let mut surfaces = Vec::with_capacity(faces.len());

        for (i, (plane, factory)) in faces.into_iter().enumerate() {
            let mut facet = Some(D::facetize(&plane));
            for (j, other) in planes.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Some(remainder) = facet else { break };
                let (_, back) = D::split(&remainder, other);
                facet = back;
            }
            if let Some(facet) = facet {
                surfaces.push(factory(facet));
            }
        }

        if surfaces.len() < D::MIN_BRUSH_SURFACES {
            return Err(Error::DegenerateBrush {
                index,
                survivors: surfaces.len(),
                minimum: D::MIN_BRUSH_SURFACES,
            });
        }
        Ok(Self::new(surfaces, material))
    }

    /// The boundary surfaces of the brush.
    #[inline]
    pub fn surfaces(&self) -> &[Surface<D, P>] {
        &self.surfaces
    }

    /// The bounding volume of the brush's surfaces.
    #[inline]
    pub fn bounds(&self) -> &D::Bounds {
        &self.bounds
    }

    /// The material filling the brush's interior.
    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }
}

/// Merges a set of brushes into the boundary surfaces of their union.
///
/// Where brushes overlap, only the surfaces of the denser brush remain on
/// the contested region; coincident faces of equal density keep a single
/// copy. A surface left bordering a less dense volume records that
/// material on its front side. Surfaces backing onto a translucent
/// material additionally emit their cosurface, so both faces of, say, a
/// water boundary survive.
pub fn construct_solid_geometry<D: Dimension, P: SurfacePayload>(
    brushes: &[Brush<D, P>],
) -> Vec<Surface<D, P>> {
    let mut result = Vec::new();

    for (i, source) in brushes.iter().enumerate() {
        // Facets coplanar with a clip brush face of equal density survive in
        // exactly one of the two brushes; the toggle flips once the clip
        // iteration passes the source brush itself.
        let mut overwrite = false;
        let mut surfaces = source.surfaces.clone();

        for (j, clip) in brushes.iter().enumerate() {
            if i == j {
                overwrite = true;
                continue;
            }
            if !D::bounds_overlap(&source.bounds, &clip.bounds) {
                // Every facet lies outside the clip brush.
                continue;
            }
            surfaces = clip_surfaces(surfaces, clip, overwrite);
        }

        debug!(
            "brush {i}: {} of {} surfaces survived clipping",
            surfaces.len(),
            source.surfaces.len()
        );
        result.extend(surfaces);
    }

    let cosurfaces: Vec<_> = result
        .iter()
        .filter(|s| s.is_two_sided())
        .map(Surface::cosurface)
        .collect();
    result.extend(cosurfaces);

    result
}

fn clip_surfaces<D: Dimension, P: SurfacePayload>(
    surfaces: Vec<Surface<D, P>>,
    clip: &Brush<D, P>,
    overwrite: bool,
) -> Vec<Surface<D, P>> {
    let mut result = Vec::new();

    for surface in surfaces {
        let (inside, outside) = clip_surface(&surface, clip, overwrite);

        if inside.is_empty() {
            // Entirely outside the clip brush; keep the unsplit original.
            result.push(surface);
        } else {
            result.extend(outside);
            result.extend(
                inside
                    .into_iter()
                    .filter(|s| s.back_material() > clip.material)
                    .map(|s| s.fill_front(clip.material)),
            );
        }
    }

    result
}

/// Partitions a surface into the fragments inside and outside a convex
/// brush. A point is inside the brush iff it is on the back side of every
/// one of the brush's planes.
fn clip_surface<D: Dimension, P: SurfacePayload>(
    surface: &Surface<D, P>,
    clip: &Brush<D, P>,
    overwrite: bool,
) -> (Vec<Surface<D, P>>, Vec<Surface<D, P>>) {
    let mut inside = Vec::new();
    let mut outside = Vec::new();
    let mut coplanar = false;
    let mut remainder = Some(surface.clone());

    for plane in clip.surfaces.iter().map(Surface::plane) {
        if plane == surface.plane() {
            coplanar = true;
            continue;
        }

        let Some(current) = remainder else { break };
        let (outside_piece, back) = current.split(plane);
        if let Some(piece) = outside_piece {
            outside.push(piece);
        }
        remainder = back;
    }

    if let Some(remainder) = remainder {
        if coplanar {
            match clip.material.cmp(&remainder.back_material()) {
                std::cmp::Ordering::Greater => inside.push(remainder),
                std::cmp::Ordering::Less => outside.push(remainder),
                std::cmp::Ordering::Equal => {
                    if overwrite {
                        inside.push(remainder);
                    } else {
                        outside.push(remainder);
                    }
                }
            }
        } else {
            inside.push(remainder);
        }
    }

    (inside, outside)
}
