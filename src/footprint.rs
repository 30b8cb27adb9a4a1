//! Footprint rasterization: continuous pose + polygon to covered lattice cells.

use std::collections::HashSet;

use glam::{DVec2, IVec2};

use crate::iterators::PolygonIterator;
use crate::iterators::polygon::TIE_TOLERANCE;
use crate::types::{Footprint, Pose2};

/// Insert every cell covered by `footprint` at `local`, a pose given relative
/// to the center of `cell`.
///
/// Rasterization happens in cell units around the origin cell and the result
/// is shifted by `cell`, so the covered set translates exactly with `cell`.
/// A cell is covered when its center lies inside (or on the boundary of) the
/// transformed polygon. The cell under the robot center is always covered,
/// which is all a point footprint (or a degenerate polygon) contributes.
pub fn rasterize_at(
    cell: IVec2,
    local: Pose2,
    footprint: &Footprint,
    resolution: f64,
    cells: &mut HashSet<IVec2>,
) {
    // Cell units with the origin cell centered on (0.5, 0.5).
    let center = local.position / resolution + DVec2::splat(0.5);
    cells.insert(cell + (center + DVec2::splat(TIE_TOLERANCE)).floor().as_ivec2());

    if !footprint.is_polygon() {
        return;
    }

    let points = footprint
        .transform(local)
        .into_iter()
        .map(|p| p / resolution + DVec2::splat(0.5))
        .collect();
    if let Some(iter) = PolygonIterator::new(points) {
        cells.extend(iter.map(|offset| cell + offset));
    }
}

/// Insert every cell covered by `footprint` placed at a world-frame `pose`.
pub fn rasterize(pose: Pose2, footprint: &Footprint, resolution: f64, cells: &mut HashSet<IVec2>) {
    let cell = (pose.position / resolution + DVec2::splat(TIE_TOLERANCE))
        .floor()
        .as_ivec2();
    let cell_center = (cell.as_dvec2() + DVec2::splat(0.5)) * resolution;
    let local = Pose2::new(pose.position - cell_center, pose.theta);
    rasterize_at(cell, local, footprint, resolution, cells);
}

/// Convenience wrapper returning the covered cells of a single world pose.
pub fn footprint_cells(pose: Pose2, footprint: &Footprint, resolution: f64) -> HashSet<IVec2> {
    let mut cells = HashSet::new();
    rasterize(pose, footprint, resolution, &mut cells);
    cells
}
