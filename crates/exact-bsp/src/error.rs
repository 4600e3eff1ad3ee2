//! Crate error type.
//!
//! Only bad input surfaces as an [`Error`]. Invariant violations and
//! structural misuse of immutable trees indicate defects and panic
//! instead; the affected operations document them under `# Panics`.

/// Fatal input-validation failures of the geometry pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Tree construction was handed no surfaces at all.
    #[error("cannot construct a spatial tree from an empty surface set")]
    EmptySurfaceSet,

    /// A brush's planes enclose no volume: fewer boundary surfaces
    /// survived reification than the dimensional minimum.
    #[error(
        "degenerate brush at index {index}: \
         {survivors} of at least {minimum} boundary surfaces survived"
    )]
    DegenerateBrush {
        /// Position of the offending brush in the input list.
        index: usize,
        /// How many boundary surfaces survived clipping.
        survivors: usize,
        /// The dimensional minimum (3 in 2D, 4 in 3D).
        minimum: usize,
    },

    /// Culling marked every leaf exterior; no interior point landed in a
    /// leaf connected to the rest of the map.
    #[error("no interior leaves remain after outside culling")]
    NoInteriorLeaves,
}

/// Convenience alias for fallible pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
