//! Outside culling: discarding leaves unreachable from the interior.
//!
//! A map's geometry usually encloses its playable space; everything
//! beyond the outermost surfaces is unreachable. Given the portals of a
//! tree and a set of points known to be interior, culling flood-fills
//! the leaf adjacency graph from the leaves containing those points and
//! rebuilds the tree without every leaf the fill never reached.

use std::collections::HashSet;

use log::trace;

use crate::bsp::{BspTree, back_child_index, front_child_index};
use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::portal::Portal;
use crate::surface::{Surface, SurfacePayload};

/// The index of the leaf whose region contains `point`.
///
/// Descends from the root, following each branch's halfspace test. A
/// point exactly on a partition plane descends to the front child, so
/// the result is deterministic.
///
/// # Panics
///
/// Panics if the tree is empty.
pub fn leaf_containing<D: Dimension, P: SurfacePayload>(
    tree: &BspTree<D, P>,
    point: &D::Point,
) -> usize {
    let mut index = 0;
    while !tree.is_leaf(index) {
        index = if D::classify_point(point, tree.partition_plane(index)) >= 0 {
            front_child_index(index)
        } else {
            back_child_index(index)
        };
    }
    index
}

/// Rebuilds a tree without the leaves that cannot be reached from any
/// interior point.
///
/// A leaf is interior if it contains one of `interior_points` or is
/// connected to an interior leaf by a portal. A branch left with a
/// single surviving child collapses away, promoting that child's
/// subtree into its place.
///
/// # Errors
///
/// Returns [`Error::NoInteriorLeaves`] if no leaf is marked interior,
/// which includes the case of no interior points at all.
pub fn cull_outside<D: Dimension, P: SurfacePayload>(
    tree: &BspTree<D, P>,
    portals: &[Portal<D>],
    interior_points: &[D::Point],
) -> Result<BspTree<D, P>> {
    let interior = find_interior_leaves(tree, portals, interior_points);
    let pruned = prune(tree, 0, &interior).ok_or(Error::NoInteriorLeaves)?;

    let mut culled = BspTree::empty();
    write_node(&mut culled, 0, pruned);
    Ok(culled)
}

fn find_interior_leaves<D: Dimension, P: SurfacePayload>(
    tree: &BspTree<D, P>,
    portals: &[Portal<D>],
    interior_points: &[D::Point],
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut pending: Vec<usize> = interior_points
        .iter()
        .map(|point| leaf_containing(tree, point))
        .collect();

    while let Some(leaf) = pending.pop() {
        if !interior.insert(leaf) {
            continue;
        }
        trace!("leaf {leaf} marked interior");
        for portal in portals {
            if portal.front() == leaf {
                pending.push(portal.back());
            }
            if portal.back() == leaf {
                pending.push(portal.front());
            }
        }
    }

    interior
}

/// Intermediate pointer-shaped tree: pruning shifts surviving subtrees
/// to new heap positions, so they cannot be copied index-for-index.
enum Pruned<D: Dimension, P: SurfacePayload> {
    Leaf(Vec<Surface<D, P>>),
    Branch(D::Plane, Box<Pruned<D, P>>, Box<Pruned<D, P>>),
}

fn prune<D: Dimension, P: SurfacePayload>(
    tree: &BspTree<D, P>,
    index: usize,
    interior: &HashSet<usize>,
) -> Option<Pruned<D, P>> {
    if tree.is_leaf(index) {
        return interior
            .contains(&index)
            .then(|| Pruned::Leaf(tree.surfaces(index).to_vec()));
    }

    let front = prune(tree, front_child_index(index), interior);
    let back = prune(tree, back_child_index(index), interior);
    match (front, back) {
        (None, None) => None,
        (Some(survivor), None) | (None, Some(survivor)) => Some(survivor),
        (Some(front), Some(back)) => Some(Pruned::Branch(
            tree.partition_plane(index).clone(),
            Box::new(front),
            Box::new(back),
        )),
    }
}

fn write_node<D: Dimension, P: SurfacePayload>(
    tree: &mut BspTree<D, P>,
    index: usize,
    node: Pruned<D, P>,
) {
    match node {
        Pruned::Leaf(surfaces) => tree.add_leaf(index, surfaces),
        Pruned::Branch(plane, front, back) => {
            tree.add_branch(index, plane);
            write_node(tree, front_child_index(index), *front);
            write_node(tree, back_child_index(index), *back);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{Orthotope3D, Range};
    use crate::bsp::{ExhaustivePartitioner, construct_bsp_tree};
    use crate::csg::{Brush, construct_solid_geometry};
    use crate::dimension::Dim3;
    use crate::facet::Facet3D;
    use crate::material::Material;
    use crate::plane::Hyperplane3D;
    use crate::point::Point3D;
    use crate::portal::portalize;
    use crate::rational::{rat, ratio};
    use crate::surface::TextureName;

    fn pt3(x: i64, y: i64, z: i64) -> Point3D {
        Point3D::new(rat(x), rat(y), rat(z))
    }

    /// An axis-aligned brush with outward-facing boundary surfaces.
    fn aabb(
        material: Material,
        min: [i64; 3],
        max: [i64; 3],
    ) -> Brush<Dim3> {
        let bounds = Orthotope3D::new(
            Range::new(rat(min[0]), rat(max[0])),
            Range::new(rat(min[1]), rat(max[1])),
            Range::new(rat(min[2]), rat(max[2])),
        );
        let surfaces = bounds
            .facets()
            .into_iter()
            .map(|facet| Surface::new(facet.cofacet(), Material::Air, material, ()))
            .collect();
        Brush::new(surfaces, material)
    }

    /// Interior-facing solid walls of an axis-aligned box.
    fn box_room(min: [i64; 3], max: [i64; 3]) -> Vec<Surface<Dim3, TextureName>> {
        Orthotope3D::new(
            Range::new(rat(min[0]), rat(max[0])),
            Range::new(rat(min[1]), rat(max[1])),
            Range::new(rat(min[2]), rat(max[2])),
        )
        .facets()
        .into_iter()
        .map(|facet| {
            Surface::new(
                facet,
                Material::Air,
                Material::Solid,
                TextureName::new("WALL"),
            )
        })
        .collect()
    }

    fn hint_on(plane: Hyperplane3D, level: usize) -> Surface<Dim3, TextureName> {
        Surface::new(
            Facet3D::from_plane(&plane),
            Material::Air,
            Material::Air,
            TextureName::new(format!("HINT{level}")),
        )
    }

    #[test]
    fn on_plane_point_descends_front() {
        let mut surfaces = box_room([0, 0, 0], [2, 1, 1]);
        surfaces.push(hint_on(Hyperplane3D::new(rat(1), rat(0), rat(0), rat(-1)), 0));
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");

        let on_plane = Point3D::new(rat(1), ratio(1, 2), ratio(1, 2));
        assert_eq!(leaf_containing(&tree, &on_plane), 1);
        assert_eq!(leaf_containing(&tree, &Point3D::new(ratio(1, 2), ratio(1, 2), ratio(1, 2))), 2);
    }

    #[test]
    fn connected_leaves_all_survive() {
        let mut surfaces = box_room([0, 0, 0], [2, 1, 1]);
        surfaces.push(hint_on(Hyperplane3D::new(rat(1), rat(0), rat(0), rat(-1)), 0));
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");
        let (portals, _) = portalize(&tree, |s| s.back_material().is_opaque());

        // Seed only the back leaf; the portal carries the fill forward.
        let culled = cull_outside(&tree, &portals, &[Point3D::new(ratio(1, 2), ratio(1, 2), ratio(1, 2))])
            .expect("interior leaf exists");
        assert_eq!(culled, tree);
    }

    #[test]
    fn unreachable_room_is_culled_and_branch_collapses() {
        let mut surfaces = box_room([0, 0, 0], [2, 1, 1]);
        surfaces.extend(box_room([3, 0, 0], [5, 1, 1]));
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");
        assert_eq!(tree.node_count(), 3);
        let (portals, _) = portalize(&tree, |s| s.back_material().is_opaque());

        let culled = cull_outside(&tree, &portals, &[Point3D::new(rat(1), ratio(1, 2), ratio(1, 2))])
            .expect("interior leaf exists");
        assert_eq!(culled.node_count(), 1);
        assert!(culled.is_leaf(0));
        assert_eq!(culled.surface_count(0), 6);
    }

    #[test]
    fn no_interior_points_is_an_error() {
        let surfaces = box_room([0, 0, 0], [2, 1, 1]);
        let tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");
        let result = cull_outside(&tree, &[], &[]);
        assert_eq!(result.err(), Some(Error::NoInteriorLeaves));
    }

    #[test]
    fn intersecting_box() {
        // A room enclosed by six overlapping solid slabs, flooded with
        // water up to z = -1, seen from an interior point at the origin.
        let brushes = [
            aabb(Material::Solid, [-9, -10, -10], [-8, 10, 10]),
            aabb(Material::Solid, [8, -10, -10], [9, 10, 10]),
            aabb(Material::Solid, [-10, -9, -10], [10, -8, 10]),
            aabb(Material::Solid, [-10, 8, -10], [10, 9, 10]),
            aabb(Material::Solid, [-10, -10, -9], [10, 10, -8]),
            aabb(Material::Solid, [-10, -10, 8], [10, 10, 9]),
            aabb(Material::Water, [-10, -10, -10], [10, 10, -1]),
        ];
        let interior_points = [pt3(0, 0, 0)];

        let surfaces = construct_solid_geometry(&brushes)
            .into_iter()
            .filter(|s| s.front_material() != Material::Solid);

        let full_tree = construct_bsp_tree(&ExhaustivePartitioner::new(1, 10), surfaces)
            .expect("non-empty input");
        let (portals, _) = portalize(&full_tree, |s| s.back_material().is_opaque());

        let culled = cull_outside(&full_tree, &portals, &interior_points)
            .expect("interior leaf exists");

        // The interior splits into an air leaf and a water leaf, each
        // bounded by four walls, one floor or ceiling, and the water
        // surface between them.
        assert_eq!(culled.node_count(), 3);
        assert_eq!(culled.surface_count(1), 6);
        assert_eq!(culled.surface_count(2), 6);
    }
}
