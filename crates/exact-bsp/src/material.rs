//! Interior material classification.

/// The material filling a volume of space, ordered by density.
///
/// Denser materials displace lighter ones during solid geometry
/// construction: where two brushes overlap, the surfaces of the denser
/// brush win. The derived `Ord` is the density order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Material {
    /// Empty, passable space.
    Air,
    /// Translucent liquid volume.
    Water,
    /// Translucent liquid volume, denser than water.
    Slime,
    /// Translucent liquid volume, denser than slime.
    Lava,
    /// Impassable but unbounded space, such as a skybox boundary.
    Sky,
    /// Fully solid matter.
    Solid,
}

impl Material {
    /// Whether the material blocks sight and movement entirely.
    ///
    /// A surface backing onto a non-opaque material is two-sided: both of
    /// its faces are visible, and it does not block portals.
    #[inline]
    pub fn is_opaque(self) -> bool {
        self >= Material::Sky
    }
}
