//! Exact-arithmetic binary space partitioning.
//!
//! All geometry uses arbitrary-precision rational coordinates, so every
//! classification, intersection and split in the pipeline is exact;
//! there are no epsilons and no drift. The pipeline runs identically in
//! 2D and 3D through the [`Dimension`] trait:
//!
//! 1. describe solid volumes as [`Brush`]es and merge them with
//!    [`construct_solid_geometry`],
//! 2. build a tree over the surviving surfaces with
//!    [`construct_bsp_tree`],
//! 3. compute leaf adjacency with [`portalize`], and
//! 4. discard unreachable space with [`cull_outside`].

mod bounds;
mod bsp;
mod csg;
mod cull;
mod dimension;
mod error;
mod facet;
mod material;
mod plane;
mod point;
mod portal;
mod rational;
mod surface;

pub use bounds::{Orthotope2D, Orthotope3D, Range};
pub use bsp::{
    BspTree, ExhaustivePartitioner, PartitionStrategy, back_child_index, construct_bsp_tree,
    front_child_index, node_depth,
};
pub use csg::{Brush, construct_solid_geometry};
pub use cull::{cull_outside, leaf_containing};
pub use dimension::{Dim2, Dim3, Dimension};
pub use error::{Error, Result};
pub use facet::{Facet2D, Facet3D, WORLD_RADIUS};
pub use material::Material;
pub use plane::{Hyperplane2D, Hyperplane3D};
pub use point::{Point2D, Point3D};
pub use portal::{PartitionRecord, Portal, hint_surfaces, portalize};
pub use rational::{Rational, rat, ratio};
pub use surface::{Surface, SurfacePayload, TextureName};
