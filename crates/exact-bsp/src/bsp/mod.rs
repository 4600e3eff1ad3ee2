//! Binary space partitioning tree construction and storage.
//!
//! A BSP tree recursively divides space by planes until every region
//! holds a mutually convex set of surfaces. This module provides:
//!
//! - [`BspTree`], the immutable heap-indexed tree produced by
//!   construction and consumed by portalization and culling,
//! - [`construct_bsp_tree`], the recursive builder, and
//! - [`PartitionStrategy`] with its default [`ExhaustivePartitioner`],
//!   which scores every candidate plane by balance and split count.
//!
//! Hint surfaces short-circuit the strategy: a surface whose payload
//! reports a hint level equal to the current tree depth supplies the
//! partition plane outright and is excluded from the output tree.

mod builder;
mod partitioner;
mod tree;

pub use builder::construct_bsp_tree;
pub use partitioner::{ExhaustivePartitioner, PartitionStrategy};
pub use tree::{BspTree, back_child_index, front_child_index, node_depth};
