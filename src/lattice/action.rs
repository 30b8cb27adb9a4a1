use glam::IVec2;

use crate::types::{MAX_NOMINAL_COST, Pose2, cont_to_disc};

/// A motion primitive of the base lattice.
///
/// Intermediate poses are relative to the center of the start cell, with
/// absolute headings. Intermediate cells are relative to the start cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Position of this primitive in its start heading's action list.
    pub index: usize,
    pub delta: IVec2,
    pub start_heading: usize,
    pub end_heading: usize,
    /// Nominal time/distance cost of the primitive on free space. At most
    /// [`MAX_NOMINAL_COST`].
    pub cost: u32,
    pub intermediate_poses: Vec<Pose2>,
    pub intermediate_cells: Vec<IVec2>,
}

impl Action {
    /// Build a primitive and discretize its intermediate poses into cells.
    pub fn new(
        index: usize,
        start_heading: usize,
        end_heading: usize,
        delta: IVec2,
        cost: u32,
        intermediate_poses: Vec<Pose2>,
        resolution: f64,
    ) -> Self {
        debug_assert!(
            cost <= MAX_NOMINAL_COST,
            "nominal cost {cost} exceeds {MAX_NOMINAL_COST}"
        );
        let mut intermediate_cells: Vec<IVec2> = Vec::with_capacity(intermediate_poses.len());
        for pose in &intermediate_poses {
            let cell = IVec2::new(
                cont_to_disc(pose.position.x + 0.5 * resolution, resolution),
                cont_to_disc(pose.position.y + 0.5 * resolution, resolution),
            );
            if intermediate_cells.last() != Some(&cell) {
                intermediate_cells.push(cell);
            }
        }

        Self {
            index,
            delta,
            start_heading,
            end_heading,
            cost,
            intermediate_poses,
            intermediate_cells,
        }
    }

    /// Cell reached when executing this primitive from `source`.
    #[inline]
    pub fn destination(&self, source: IVec2) -> IVec2 {
        source + self.delta
    }
}
