//! Interface to the externally owned single-level lattice.
//!
//! The base lattice owns the grid dimensions, the motion primitives, the cost
//! thresholds and the ground-level footprint/cost model. The multi-level
//! environment borrows it and never duplicates that state.

pub mod action;

use std::collections::HashSet;

use glam::IVec2;
use serde::Deserialize;

pub use action::Action;

use crate::footprint;
use crate::types::{
    COST_INSCRIBED, COST_LETHAL, COST_POSSIBLY_CIRCUMSCRIBED, Footprint, LatticeError, MapInfo,
    Pose2, Result,
};

/// Cost levels used for fast conservative pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CostThresholds {
    /// At or above: the cell is impassable.
    pub obstacle: u8,
    /// At or above: the inscribed circle is in collision whatever the heading.
    pub inscribed: u8,
    /// At or above: the full footprint has to be checked.
    pub circumscribed: u8,
}

impl Default for CostThresholds {
    fn default() -> Self {
        Self {
            obstacle: COST_LETHAL,
            inscribed: COST_INSCRIBED,
            circumscribed: COST_POSSIBLY_CIRCUMSCRIBED,
        }
    }
}

impl CostThresholds {
    pub fn new(obstacle: u8, inscribed: u8, circumscribed: u8) -> Self {
        Self {
            obstacle,
            inscribed,
            circumscribed,
        }
    }

    /// Require `circumscribed <= inscribed <= obstacle`.
    pub fn validate(&self) -> Result<()> {
        if self.inscribed > self.obstacle {
            return Err(LatticeError::InvalidConfig(format!(
                "inscribed threshold {} exceeds obstacle threshold {}",
                self.inscribed, self.obstacle
            )));
        }
        if self.circumscribed > self.inscribed {
            return Err(LatticeError::InvalidConfig(format!(
                "circumscribed threshold {} exceeds inscribed threshold {}",
                self.circumscribed, self.inscribed
            )));
        }
        Ok(())
    }
}

/// The single-level lattice environment this crate extends.
pub trait BaseLattice {
    fn info(&self) -> &MapInfo;

    fn num_headings(&self) -> usize;

    /// Motion primitives that start at `heading`. `actions(h)[i].index == i`.
    fn actions(&self, heading: usize) -> &[Action];

    fn thresholds(&self) -> &CostThresholds;

    /// Ground-level cost of a cell, `None` outside the grid.
    fn cost_at(&self, x: i32, y: i32) -> Option<u8>;

    fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        self.cost_at(x, y)
            .is_some_and(|cost| cost < self.thresholds().obstacle)
    }

    fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.cost_at(x, y)
            .is_none_or(|cost| cost >= self.thresholds().obstacle)
    }

    fn is_valid_configuration(&self, x: i32, y: i32, heading: usize) -> bool;

    /// Ground-level cost of executing `action` from `(x, y, heading)`.
    fn action_cost(&self, x: i32, y: i32, heading: usize, action: &Action) -> u32;

    /// Rasterize `footprint` at `local`, a pose relative to the center of
    /// `cell`, into `cells`.
    fn footprint_cells(
        &self,
        cell: IVec2,
        local: Pose2,
        footprint: &Footprint,
        cells: &mut HashSet<IVec2>,
    ) {
        footprint::rasterize_at(cell, local, footprint, self.info().resolution, cells);
    }
}
