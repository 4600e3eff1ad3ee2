//! Recursive BSP tree construction.

use log::debug;

use crate::bsp::partitioner::PartitionStrategy;
use crate::bsp::tree::{BspTree, back_child_index, front_child_index};
use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::surface::{Surface, SurfacePayload};

/// Builds a BSP tree over a set of surfaces.
///
/// Recursion stops when a surface set is mutually convex, which becomes a
/// leaf. Otherwise a partition plane is chosen: a hint surface whose
/// level matches the current depth wins outright and is dropped from the
/// set, and the strategy decides everywhere else. Every surface is then
/// classified against the chosen plane, straddling surfaces are split,
/// and the front and back subsets recurse as the children of a branch.
///
/// # Errors
///
/// Returns [`Error::EmptySurfaceSet`] if `surfaces` is empty.
///
/// # Panics
///
/// Panics if the strategy fails to produce a plane for a non-convex set,
/// or produces one that leaves the front or back subset empty. Both
/// violate the strategy's contract.
pub fn construct_bsp_tree<D, P, S>(
    strategy: &S,
    surfaces: impl IntoIterator<Item = Surface<D, P>>,
) -> Result<BspTree<D, P>>
where
    D: Dimension,
    P: SurfacePayload,
    S: PartitionStrategy<D, P>,
{
    let surfaces: Vec<_> = surfaces.into_iter().collect();
    if surfaces.is_empty() {
        return Err(Error::EmptySurfaceSet);
    }

    let mut tree = BspTree::empty();
    construct_node(strategy, &mut tree, 0, surfaces, 0);
    Ok(tree)
}

fn construct_node<D, P, S>(
    strategy: &S,
    tree: &mut BspTree<D, P>,
    index: usize,
    mut surfaces: Vec<Surface<D, P>>,
    depth: usize,
) where
    D: Dimension,
    P: SurfacePayload,
    S: PartitionStrategy<D, P>,
{
    if all_convex::<D, P>(&surfaces) {
        tree.add_leaf(index, surfaces);
        return;
    }

    let partition_plane = match find_hint_surface(&surfaces, depth) {
        Some(hint) => {
            let hint = surfaces.remove(hint);
            debug!("depth {depth}: hint surface supplies the partition plane");
            hint.plane().clone()
        }
        None => strategy
            .select_partition_plane(&surfaces)
            .unwrap_or_else(|| panic!("failed to select a partition plane at depth {depth}")),
    };

    let (front_surfaces, back_surfaces) = partition(&surfaces, &partition_plane);
    debug!(
        "depth {depth}: partitioned {} surfaces into {} front, {} back",
        surfaces.len(),
        front_surfaces.len(),
        back_surfaces.len()
    );
    assert!(
        !front_surfaces.is_empty() && !back_surfaces.is_empty(),
        "partition plane selected does not partition surfaces"
    );

    tree.add_branch(index, partition_plane);
    construct_node(
        strategy,
        tree,
        front_child_index(index),
        front_surfaces,
        depth + 1,
    );
    construct_node(
        strategy,
        tree,
        back_child_index(index),
        back_surfaces,
        depth + 1,
    );
}

/// Whether no surface in the set lies partly behind another. A mutually
/// convex set needs no further partitioning.
fn all_convex<D: Dimension, P: SurfacePayload>(surfaces: &[Surface<D, P>]) -> bool {
    for (i, a) in surfaces.iter().enumerate() {
        for b in &surfaces[i + 1..] {
            if !are_convex::<D, P>(a, b) {
                return false;
            }
        }
    }
    true
}

fn are_convex<D: Dimension, P: SurfacePayload>(a: &Surface<D, P>, b: &Surface<D, P>) -> bool {
    let (a_min, _) = D::classify_facet(a.facet(), b.plane());
    let (b_min, _) = D::classify_facet(b.facet(), a.plane());
    a_min >= 0 && b_min >= 0
}

fn find_hint_surface<D: Dimension, P: SurfacePayload>(
    surfaces: &[Surface<D, P>],
    depth: usize,
) -> Option<usize> {
    surfaces.iter().position(|s| s.hint_level() == Some(depth))
}

fn partition<D: Dimension, P: SurfacePayload>(
    surfaces: &[Surface<D, P>],
    plane: &D::Plane,
) -> (Vec<Surface<D, P>>, Vec<Surface<D, P>>) {
    let mut front = Vec::new();
    let mut back = Vec::new();

    for surface in surfaces {
        let (front_piece, back_piece) = surface.split(plane);
        front.extend(front_piece);
        back.extend(back_piece);
    }

    (front, back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::partitioner::ExhaustivePartitioner;
    use crate::dimension::Dim2;
    use crate::facet::Facet2D;
    use crate::material::Material;
    use crate::plane::Hyperplane2D;
    use crate::point::Point2D;
    use crate::rational::rat;
    use crate::surface::TextureName;

    fn pt2(x: i64, y: i64) -> Point2D {
        Point2D::new(rat(x), rat(y))
    }

    fn segment(x1: i64, y1: i64, x2: i64, y2: i64) -> Surface<Dim2> {
        let a = pt2(x1, y1);
        let b = pt2(x2, y2);
        let plane = Hyperplane2D::from_points(&a, &b);
        Surface::new(Facet2D::new(plane, a, b), Material::Air, Material::Solid, ())
    }

    fn named_segment(name: &str, x1: i64, y1: i64, x2: i64, y2: i64) -> Surface<Dim2, TextureName> {
        let a = pt2(x1, y1);
        let b = pt2(x2, y2);
        let plane = Hyperplane2D::from_points(&a, &b);
        Surface::new(
            Facet2D::new(plane, a, b),
            Material::Air,
            Material::Solid,
            TextureName::new(name),
        )
    }

    /// Interior-facing walls of the axis box `[x1, x2] × [y1, y2]`.
    fn room(x1: i64, y1: i64, x2: i64, y2: i64) -> Vec<Surface<Dim2>> {
        vec![
            segment(x1, y1, x2, y1),
            segment(x2, y1, x2, y2),
            segment(x2, y2, x1, y2),
            segment(x1, y2, x1, y1),
        ]
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), Vec::<Surface<Dim2>>::new());
        assert_eq!(result.err(), Some(Error::EmptySurfaceSet));
    }

    #[test]
    fn convex_set_is_a_single_leaf() {
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), room(0, 0, 4, 4))
            .expect("non-empty input");
        assert_eq!(tree.node_count(), 1);
        assert!(tree.is_leaf(0));
        assert_eq!(tree.surface_count(0), 4);
    }

    #[test]
    fn two_rooms_split_into_two_leaves() {
        // Two rooms side by side, separated by back-to-back walls at x = 4.
        let mut surfaces = room(0, 0, 4, 4);
        surfaces.extend(room(4, 0, 8, 4));
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");

        assert_eq!(tree.node_count(), 3);
        assert!(!tree.is_leaf(0));
        assert!(tree.is_leaf(1));
        assert!(tree.is_leaf(2));
        assert_eq!(tree.surface_count(1) + tree.surface_count(2), 8);
    }

    #[test]
    fn branch_halfspaces_contain_their_subtrees() {
        // Every surface in a branch's front subtree lies in the closed
        // front halfspace of the branch plane, and symmetrically for back.
        let mut surfaces = room(0, 0, 4, 4);
        surfaces.extend(room(4, 0, 8, 4));
        surfaces.extend(room(0, 4, 8, 8));
        surfaces.push(segment(8, 5, 0, 5));
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");

        for leaf in tree.leaf_indices() {
            let mut child = leaf;
            while child != 0 {
                let parent = (child - 1) / 2;
                let plane = tree.partition_plane(parent);
                for surface in tree.surfaces(leaf) {
                    let (min, max) = Dim2::classify_facet(surface.facet(), plane);
                    if child == front_child_index(parent) {
                        assert!(min >= 0, "front subtree surface crosses the branch plane");
                    } else {
                        assert!(max <= 0, "back subtree surface crosses the branch plane");
                    }
                }
                child = parent;
            }
        }
    }

    #[test]
    fn leaves_are_mutually_convex() {
        let mut surfaces = room(0, 0, 4, 4);
        surfaces.extend(room(4, 0, 8, 4));
        surfaces.extend(room(0, 4, 8, 8));
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");

        for leaf in tree.leaf_indices() {
            assert!(all_convex::<Dim2, ()>(tree.surfaces(leaf)));
        }
    }

    #[test]
    fn splitting_preserves_surface_extent() {
        // A wall crossing the partition plane is split, not lost: the two
        // fragments lie in sibling leaves.
        let mut surfaces = room(0, 0, 4, 4);
        surfaces.extend(room(4, 0, 8, 4));
        // A long wall along the top of both rooms. An even split weight
        // keeps the dividing plane at x = 4 preferable to sidelining the
        // wall behind the rooms' shared top plane.
        surfaces.push(segment(8, 5, 0, 5));
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 1), surfaces)
            .expect("non-empty input");

        let mut fragments = 0;
        for leaf in tree.leaf_indices() {
            fragments += tree
                .surfaces(leaf)
                .iter()
                .filter(|s| s.plane() == &Hyperplane2D::new(rat(0), rat(-1), rat(5)))
                .count();
        }
        assert!(fragments >= 2, "wall fragments ended up in one leaf");
    }

    #[test]
    fn hint_surface_is_used_and_dropped() {
        let mut surfaces: Vec<_> = room(0, 0, 4, 4)
            .into_iter()
            .map(|s| {
                Surface::new(
                    s.facet().clone(),
                    s.front_material(),
                    s.back_material(),
                    TextureName::new("WALL"),
                )
            })
            .collect();
        surfaces.extend(
            room(4, 0, 8, 4).into_iter().map(|s| {
                Surface::new(
                    s.facet().clone(),
                    s.front_material(),
                    s.back_material(),
                    TextureName::new("WALL"),
                )
            }),
        );
        // Hint on the dividing plane at x = 4, facing +X.
        surfaces.push(named_segment("HINT0", 4, 4, 4, 0));

        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");

        assert_eq!(
            tree.partition_plane(0),
            &Hyperplane2D::new(rat(1), rat(0), rat(-4))
        );
        // The hint surface itself appears nowhere in the tree.
        for leaf in tree.leaf_indices() {
            assert!(
                tree.surfaces(leaf)
                    .iter()
                    .all(|s| s.payload().as_str() != "HINT0")
            );
        }
    }

    #[test]
    fn unmatched_hint_level_falls_through() {
        let mut surfaces: Vec<_> = room(0, 0, 4, 4)
            .into_iter()
            .chain(room(4, 0, 8, 4))
            .map(|s| {
                Surface::new(
                    s.facet().clone(),
                    s.front_material(),
                    s.back_material(),
                    TextureName::new("WALL"),
                )
            })
            .collect();
        // Hint for depth 5; the tree never reaches it, so the exhaustive
        // strategy decides every level and the hint survives as geometry.
        surfaces.push(named_segment("HINT5", 4, 4, 4, 0));

        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");
        let mut hint_fragments = 0;
        for leaf in tree.leaf_indices() {
            hint_fragments += tree
                .surfaces(leaf)
                .iter()
                .filter(|s| s.payload().as_str() == "HINT5")
                .count();
        }
        assert!(hint_fragments > 0, "unmatched hint should remain in the tree");
    }
}
