//! Precomputed swept-footprint cells for every (heading, primitive, level).
//!
//! Motion primitives are translation invariant, so the cells a footprint sweeps
//! while executing a primitive are computed once from the origin cell and
//! translated to the source cell at query time.

use std::collections::HashSet;

use glam::{DVec2, IVec2};

use crate::lattice::{Action, BaseLattice};
use crate::types::{Footprint, Pose2, cont_theta_to_disc, disc_theta_to_cont};

/// Swept cells of one primitive, one list per level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweptCells {
    delta: IVec2,
    end_heading: usize,
    per_level: Vec<Vec<IVec2>>,
}

impl SweptCells {
    /// Cell offsets (relative to the source cell) for one level.
    pub fn level(&self, level: usize) -> &[IVec2] {
        self.per_level.get(level).map_or(&[], Vec::as_slice)
    }

    pub fn level_count(&self) -> usize {
        self.per_level.len()
    }

    fn matches(&self, action: &Action) -> bool {
        self.delta == action.delta && self.end_heading == action.end_heading
    }
}

/// Cells newly covered by `footprint` while executing `action` from `source`,
/// excluding the cells already covered at the start pose. Sorted row-major.
///
/// Poses are rasterized relative to the source cell, so the result for any
/// source is the origin result shifted by `source`.
pub fn sweep_footprint<B>(base: &B, action: &Action, footprint: &Footprint, source: IVec2) -> Vec<IVec2>
where
    B: BaseLattice + ?Sized,
{
    let mut swept = HashSet::new();
    for pose in &action.intermediate_poses {
        base.footprint_cells(source, *pose, footprint, &mut swept);
    }

    let start = Pose2::new(
        DVec2::ZERO,
        disc_theta_to_cont(action.start_heading, base.num_headings()),
    );
    let mut covered = HashSet::new();
    base.footprint_cells(source, start, footprint, &mut covered);

    let mut cells: Vec<IVec2> = swept.difference(&covered).copied().collect();
    cells.sort_unstable_by_key(|c| (c.y, c.x));
    cells
}

/// Report primitives whose last intermediate pose does not face `end_heading`.
fn warn_on_heading_mismatch(action: &Action, num_headings: usize) {
    if let Some(last) = action.intermediate_poses.last()
        && cont_theta_to_disc(last.theta, num_headings) != action.end_heading
    {
        tracing::warn!(
            start = action.start_heading,
            index = action.index,
            end_heading = action.end_heading,
            theta = last.theta,
            "primitive's final pose does not match its end heading"
        );
    }
}

/// Swept-cell tables indexed by start heading, then primitive index.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    entries: Vec<Vec<SweptCells>>,
}

impl ActionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compute the swept cells of every primitive of `base` for every footprint.
    pub fn build<B>(base: &B, footprints: &[Footprint]) -> Self
    where
        B: BaseLattice + ?Sized,
    {
        let num_headings = base.num_headings();
        let mut entries = Vec::with_capacity(num_headings);

        for heading in 0..num_headings {
            tracing::debug!(heading, num_headings, "precomputing swept cells");
            let row = base
                .actions(heading)
                .iter()
                .inspect(|action| warn_on_heading_mismatch(action, num_headings))
                .map(|action| SweptCells {
                    delta: action.delta,
                    end_heading: action.end_heading,
                    per_level: footprints
                        .iter()
                        .map(|footprint| sweep_footprint(base, action, footprint, IVec2::ZERO))
                        .collect(),
                })
                .collect();
            entries.push(row);
        }

        Self { entries }
    }

    pub fn get(&self, heading: usize, index: usize) -> Option<&SweptCells> {
        self.entries.get(heading)?.get(index)
    }

    /// Entry for `action`, if it was produced from the base lattice's primitives.
    pub fn lookup(&self, action: &Action) -> Option<&SweptCells> {
        self.get(action.start_heading, action.index)
            .filter(|entry| entry.matches(action))
    }

    pub fn num_headings(&self) -> usize {
        self.entries.len()
    }

    /// Total number of stored cell offsets across every entry and level.
    pub fn total_cells(&self) -> usize {
        self.entries
            .iter()
            .flatten()
            .flat_map(|entry| entry.per_level.iter())
            .map(Vec::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::lattice::CostThresholds;
    use crate::types::MapInfo;

    /// Four headings, one primitive each: move two cells forward.
    struct TwoStepLattice {
        info: MapInfo,
        thresholds: CostThresholds,
        actions: Vec<Vec<Action>>,
    }

    impl TwoStepLattice {
        fn new() -> Self {
            let resolution = 1.0;
            let dirs = [IVec2::X, IVec2::Y, IVec2::NEG_X, IVec2::NEG_Y];
            let actions = dirs
                .iter()
                .enumerate()
                .map(|(heading, dir)| {
                    let theta = heading as f64 * FRAC_PI_2;
                    let delta = *dir * 2;
                    let poses = (0..=8)
                        .map(|i| Pose2::new(delta.as_dvec2() * (i as f64 / 8.0), theta))
                        .collect();
                    vec![Action::new(0, heading, heading, delta, 10, poses, resolution)]
                })
                .collect();
            Self {
                info: MapInfo::square(20, resolution),
                thresholds: CostThresholds::default(),
                actions,
            }
        }
    }

    impl BaseLattice for TwoStepLattice {
        fn info(&self) -> &MapInfo {
            &self.info
        }
        fn num_headings(&self) -> usize {
            4
        }
        fn actions(&self, heading: usize) -> &[Action] {
            &self.actions[heading]
        }
        fn thresholds(&self) -> &CostThresholds {
            &self.thresholds
        }
        fn cost_at(&self, _x: i32, _y: i32) -> Option<u8> {
            Some(0)
        }
        fn is_valid_configuration(&self, _x: i32, _y: i32, _heading: usize) -> bool {
            true
        }
        fn action_cost(&self, _x: i32, _y: i32, _heading: usize, action: &Action) -> u32 {
            action.cost
        }
    }

    #[test]
    fn point_footprint_sweeps_trajectory_centers() {
        let base = TwoStepLattice::new();
        let table = ActionTable::build(&base, &[Footprint::point()]);

        let entry = table.get(0, 0).unwrap();
        assert_eq!(entry.level(0), &[IVec2::new(1, 0), IVec2::new(2, 0)]);
        let entry = table.get(3, 0).unwrap();
        assert_eq!(entry.level(0), &[IVec2::new(0, -2), IVec2::new(0, -1)]);
    }

    #[test]
    fn square_footprint_excludes_start_cells() {
        let base = TwoStepLattice::new();
        let table = ActionTable::build(&base, &[Footprint::square(2.8)]);

        // 3x3 footprint moving two cells along +x: two new columns.
        let cells = table.get(0, 0).unwrap().level(0);
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| c.x == 2 || c.x == 3));
        assert!(cells.iter().all(|c| (-1..=1).contains(&c.y)));
        assert_eq!(table.total_cells(), 24);
    }

    #[test]
    fn lookup_rejects_foreign_actions() {
        let base = TwoStepLattice::new();
        let table = ActionTable::build(&base, &[Footprint::point(), Footprint::square(2.8)]);
        let action = &base.actions(1)[0];

        let entry = table.lookup(action).unwrap();
        assert_eq!(entry.level_count(), 2);

        let mut foreign = action.clone();
        foreign.delta = IVec2::new(5, 5);
        assert!(table.lookup(&foreign).is_none());
        assert!(table.get(4, 0).is_none());
        assert!(entry.level(2).is_empty());
    }

    #[test]
    fn sweep_at_source_is_translated_origin_sweep() {
        let base = TwoStepLattice::new();
        let footprint = Footprint::rectangle(2.6, 1.8);
        for heading in 0..4 {
            let action = &base.actions(heading)[0];
            let origin = sweep_footprint(&base, action, &footprint, IVec2::ZERO);
            let source = IVec2::new(7, 4);
            let shifted: Vec<IVec2> = sweep_footprint(&base, action, &footprint, source)
                .into_iter()
                .map(|c| c - source)
                .collect();
            assert_eq!(origin, shifted);
        }
    }
}
