//! Partition plane selection strategies.

use log::debug;

use crate::dimension::Dimension;
use crate::surface::{Surface, SurfacePayload};

/// A strategy for choosing the plane that divides a surface set during
/// tree construction.
pub trait PartitionStrategy<D: Dimension, P: SurfacePayload> {
    /// Selects a partition plane for a set of surfaces, or `None` if no
    /// candidate plane divides the set into two non-empty parts.
    fn select_partition_plane(&self, surfaces: &[Surface<D, P>]) -> Option<D::Plane>;
}

/// Evaluates every distinct plane among the input surfaces and picks the
/// one with the lowest weighted score.
///
/// The score of a candidate plane is
/// `imbalance_weight × |front − back| + split_weight × splits`, where
/// `front` and `back` count the surfaces lying at least partly on each
/// side and `splits` counts the surfaces straddling the plane. A plane
/// that splits nothing and leaves one side empty makes no progress and is
/// not a candidate. Ties go to the earliest candidate in input order, so
/// selection is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustivePartitioner {
    imbalance_weight: u32,
    split_weight: u32,
}

impl ExhaustivePartitioner {
    /// Creates a partitioner with the given scoring weights.
    ///
    /// # Panics
    ///
    /// Panics if both weights are zero.
    pub fn new(imbalance_weight: u32, split_weight: u32) -> Self {
        assert!(
            imbalance_weight != 0 || split_weight != 0,
            "both weights cannot be zero"
        );
        Self {
            imbalance_weight,
            split_weight,
        }
    }
}

impl<D: Dimension, P: SurfacePayload> PartitionStrategy<D, P> for ExhaustivePartitioner {
    fn select_partition_plane(&self, surfaces: &[Surface<D, P>]) -> Option<D::Plane> {
        let mut best: Option<(u64, D::Plane)> = None;
        let mut seen: Vec<&D::Plane> = Vec::new();

        for candidate in surfaces.iter().map(Surface::plane) {
            if seen.contains(&candidate) {
                continue;
            }
            seen.push(candidate);

            let Some((front, back, splits)) = split_result::<D, P>(candidate, surfaces) else {
                continue;
            };
            let score = u64::from(self.imbalance_weight) * front.abs_diff(back) as u64
                + u64::from(self.split_weight) * splits as u64;
            debug!("candidate plane scored {score} (front {front}, back {back}, splits {splits})");

            if best.as_ref().is_none_or(|(least, _)| score < *least) {
                best = Some((score, candidate.clone()));
            }
        }

        best.map(|(_, plane)| plane)
    }
}

/// Counts how the surface set falls against a candidate plane, or `None`
/// if the plane makes no progress.
fn split_result<D: Dimension, P: SurfacePayload>(
    candidate: &D::Plane,
    surfaces: &[Surface<D, P>],
) -> Option<(usize, usize, usize)> {
    let mut front = 0usize;
    let mut back = 0usize;
    let mut splits = 0usize;

    for surface in surfaces {
        let (min, max) = D::classify_facet(surface.facet(), candidate);
        if max > 0 {
            front += 1;
        }
        if min < 0 {
            back += 1;
        }
        if max > 0 && min < 0 {
            splits += 1;
        }
    }

    if splits == 0 && (front == 0 || back == 0) {
        None
    } else {
        Some((front, back, splits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dim2;
    use crate::facet::Facet2D;
    use crate::material::Material;
    use crate::plane::Hyperplane2D;
    use crate::point::Point2D;
    use crate::rational::rat;

    fn segment(x1: i64, y1: i64, x2: i64, y2: i64) -> Surface<Dim2> {
        let a = Point2D::new(rat(x1), rat(y1));
        let b = Point2D::new(rat(x2), rat(y2));
        let plane = Hyperplane2D::from_points(&a, &b);
        Surface::new(Facet2D::new(plane, a, b), Material::Air, Material::Solid, ())
    }

    #[test]
    fn prefers_non_splitting_balanced_plane() {
        // Two horizontal segments and a vertical one between them. The
        // vertical segment's plane separates the two without splitting;
        // either horizontal plane would split nothing but leave the other
        // horizontal segment on one side along with the vertical one.
        let surfaces = vec![
            segment(0, 0, 1, 0),
            segment(3, 0, 4, 0),
            segment(2, -1, 2, 1),
        ];
        let partitioner = ExhaustivePartitioner::new(1, 10);
        let plane = partitioner
            .select_partition_plane(&surfaces)
            .expect("candidate exists");
        assert_eq!(plane, *surfaces[2].plane());
    }

    #[test]
    fn convex_set_has_no_candidate() {
        // Two segments facing each other; both planes leave one side empty
        // and split nothing.
        let surfaces = vec![segment(0, 0, 1, 0), segment(1, 2, 0, 2)];
        let partitioner = ExhaustivePartitioner::new(1, 10);
        assert_eq!(partitioner.select_partition_plane(&surfaces), None);
    }

    #[test]
    fn tie_breaks_by_input_order() {
        // Two parallel segments facing away from each other; each one's
        // plane puts the other behind it and itself in front. Identical
        // scores, so the first wins.
        let surfaces = vec![segment(0, 2, 1, 2), segment(1, 0, 0, 0)];
        let partitioner = ExhaustivePartitioner::new(1, 10);
        let plane = partitioner
            .select_partition_plane(&surfaces)
            .expect("candidate exists");
        assert_eq!(plane, *surfaces[0].plane());
    }

    #[test]
    #[should_panic(expected = "both weights cannot be zero")]
    fn zero_weights_rejected() {
        ExhaustivePartitioner::new(0, 0);
    }
}
