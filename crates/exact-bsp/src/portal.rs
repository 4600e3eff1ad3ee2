//! Portal generation between BSP leaves.
//!
//! A portal is a facet occupying part of a partition plane, tagged with
//! the two leaves it connects. Portals are the adjacency edges of the
//! graph over leaves, which outside culling flood-fills.

use log::debug;

use crate::bsp::{BspTree, back_child_index, front_child_index, node_depth};
use crate::dimension::Dimension;
use crate::material::Material;
use crate::surface::{Surface, SurfacePayload};

/// A passable boundary between two BSP tree nodes.
///
/// The front node lies in the front halfspace of the portal facet's plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Portal<D: Dimension> {
    facet: D::Facet,
    front: usize,
    back: usize,
}

impl<D: Dimension> Portal<D> {
    /// Creates a portal connecting the nodes `front` and `back`.
    ///
    /// # Panics
    ///
    /// Panics if `front` and `back` are the same node.
    pub fn new(facet: D::Facet, front: usize, back: usize) -> Self {
        assert!(front != back, "portal connects a node to itself");
        Self { facet, front, back }
    }

    /// The facet defining the portal.
    #[inline]
    pub fn facet(&self) -> &D::Facet {
        &self.facet
    }

    /// The node on the front side of the facet.
    #[inline]
    pub fn front(&self) -> usize {
        self.front
    }

    /// The node on the back side of the facet.
    #[inline]
    pub fn back(&self) -> usize {
        self.back
    }

    /// Whether the portal touches the given node on either side.
    pub fn connects(&self, node: usize) -> bool {
        self.front == node || self.back == node
    }

    /// Reorients the portal so `node` is on its front side.
    fn face_towards(self, node: usize) -> Self {
        if self.back == node {
            Self {
                facet: D::cofacet(&self.facet),
                front: self.back,
                back: self.front,
            }
        } else {
            self
        }
    }
}

/// A partition-plane facet record: the portion of a branch's partition
/// plane inside the region of its ancestors, tagged with the branch's
/// tree depth. Feeding these back into a subsequent construction run as
/// hint surfaces reproduces the same tree without the exhaustive search.
pub type PartitionRecord<D> = (usize, <D as Dimension>::Facet);

/// Converts partition records into hint surfaces for re-injection into
/// [`construct_bsp_tree`](crate::bsp::construct_bsp_tree).
///
/// `payload` maps each record's tree depth to a payload whose
/// `hint_level` reports that depth; appended to the original geometry,
/// the results steer a rebuild along the recorded partition planes.
pub fn hint_surfaces<D, P>(
    records: Vec<PartitionRecord<D>>,
    payload: impl Fn(usize) -> P,
) -> Vec<Surface<D, P>>
where
    D: Dimension,
    P: SurfacePayload,
{
    records
        .into_iter()
        .map(|(depth, facet)| {
            Surface::new(
                facet,
                Material::Air,
                Material::Air,
                payload(depth),
            )
        })
        .collect()
}

/// Computes the portals between the leaves of a BSP tree.
///
/// `impassable` decides which surfaces block passage; portals crossing an
/// impassable surface are clipped to the part that does not. Two-sided
/// surfaces such as water boundaries are typically passable.
///
/// Returns the portal set together with the partition-plane records of
/// every branch, for hint round-tripping.
pub fn portalize<D, P, F>(
    tree: &BspTree<D, P>,
    impassable: F,
) -> (Vec<Portal<D>>, Vec<PartitionRecord<D>>)
where
    D: Dimension,
    P: SurfacePayload,
    F: Fn(&Surface<D, P>) -> bool,
{
    let bounds = subtree_bounds(tree, 0);
    // The bounding facet planes seed the ancestor clip set, so no portal
    // ever extends past the hull of the tree's own geometry.
    let bound_planes: Vec<D::Plane> = D::bounds_facets(&bounds)
        .iter()
        .map(|f| D::plane_of(f).clone())
        .collect();

    let mut records = Vec::new();
    let portals = fragment_portals(tree, 0, Vec::new(), bound_planes, &impassable, &mut records);
    debug!(
        "portalization produced {} portals over {} branches",
        portals.len(),
        records.len()
    );
    (portals, records)
}

fn subtree_bounds<D: Dimension, P: SurfacePayload>(
    tree: &BspTree<D, P>,
    index: usize,
) -> D::Bounds {
    if tree.is_leaf(index) {
        tree.surfaces(index)
            .iter()
            .map(|s| D::facet_bounds(s.facet()))
            .reduce(|a, b| D::union_bounds(&a, &b))
            .expect("leaf has no surfaces")
    } else {
        D::union_bounds(
            &subtree_bounds(tree, front_child_index(index)),
            &subtree_bounds(tree, back_child_index(index)),
        )
    }
}

fn fragment_portals<D, P, F>(
    tree: &BspTree<D, P>,
    index: usize,
    portals: Vec<Portal<D>>,
    parent_planes: Vec<D::Plane>,
    impassable: &F,
    records: &mut Vec<PartitionRecord<D>>,
) -> Vec<Portal<D>>
where
    D: Dimension,
    P: SurfacePayload,
    F: Fn(&Surface<D, P>) -> bool,
{
    if tree.is_leaf(index) {
        let mut clip_planes: Vec<&D::Plane> = Vec::new();
        for surface in tree.surfaces(index) {
            if impassable(surface) && !clip_planes.contains(&surface.plane()) {
                clip_planes.push(surface.plane());
            }
        }

        let mut result = Vec::new();
        for portal in portals {
            if !portal.connects(index) {
                result.push(portal);
                continue;
            }
            let portal = portal.face_towards(index);
            if let Some(facet) = clip_to_front::<D>(Some(portal.facet.clone()), &clip_planes) {
                result.push(Portal::new(facet, portal.front, portal.back));
            }
        }
        result
    } else {
        let plane = tree.partition_plane(index).clone();
        let front_child = front_child_index(index);
        let back_child = back_child_index(index);

        let mut result = Vec::new();
        for portal in portals {
            if portal.connects(index) {
                result.extend(split_and_reassign(portal, index, &plane, front_child, back_child));
            } else {
                result.push(portal);
            }
        }

        // The partition plane itself opens a passage between the two
        // children, bounded by the region of every ancestor plane.
        let new_facet = clip_to_front::<D>(
            Some(D::facetize(&plane)),
            &parent_planes.iter().collect::<Vec<_>>(),
        );
        if let Some(facet) = new_facet {
            records.push((node_depth(index), facet.clone()));
            result.push(Portal::new(facet, front_child, back_child));
        }

        let mut front_planes = parent_planes.clone();
        front_planes.push(plane.clone());
        let result = fragment_portals(tree, front_child, result, front_planes, impassable, records);

        let mut back_planes = parent_planes;
        back_planes.push(D::coplane(&plane));
        fragment_portals(tree, back_child, result, back_planes, impassable, records)
    }
}

fn clip_to_front<D: Dimension>(
    mut facet: Option<D::Facet>,
    planes: &[&D::Plane],
) -> Option<D::Facet> {
    for plane in planes {
        let Some(current) = facet else { break };
        facet = D::split(&current, plane).0;
    }
    facet
}

fn split_and_reassign<D: Dimension>(
    portal: Portal<D>,
    node: usize,
    plane: &D::Plane,
    front_child: usize,
    back_child: usize,
) -> Vec<Portal<D>> {
    let (front_facet, back_facet) = D::split(&portal.facet, plane);
    let reassign = |side: usize| {
        (
            if portal.front == node { side } else { portal.front },
            if portal.back == node { side } else { portal.back },
        )
    };

    let mut result = Vec::new();
    if let Some(facet) = front_facet {
        let (front, back) = reassign(front_child);
        result.push(Portal::new(facet, front, back));
    }
    if let Some(facet) = back_facet {
        let (front, back) = reassign(back_child);
        result.push(Portal::new(facet, front, back));
    }
    result
}
