//! Multi-level lattice environment: validity and edge-cost queries for the
//! search, on top of a borrowed base lattice.
//!
//! The environment is single threaded. Queries take `&self` and grid updates
//! take `&mut self`; callers sharing one environment between a running search
//! and a map updater have to provide their own mutual exclusion.

mod stats;

use std::collections::HashSet;

use glam::{DVec2, IVec2};

pub use stats::QueryStats;

use crate::lattice::{Action, BaseLattice, CostThresholds};
use crate::levels::{Level, LevelStore};
use crate::loaders::LevelConfig;
use crate::swept::{ActionTable, sweep_footprint};
use crate::types::{
    COST_FREE, Footprint, INFINITE_COST, LatticeError, MapInfo, Pose2, Result,
    disc_theta_to_cont,
};

pub struct MultiLevelEnvironment<'a, B: BaseLattice + ?Sized> {
    base: &'a B,
    levels: LevelStore,
    actions: ActionTable,
}

impl<'a, B: BaseLattice + ?Sized> MultiLevelEnvironment<'a, B> {
    /// Environment with no auxiliary levels. Every query degenerates to the
    /// base lattice until [`MultiLevelEnvironment::initialize`] is called.
    pub fn new(base: &'a B) -> Self {
        Self {
            base,
            levels: LevelStore::new(*base.info()),
            actions: ActionTable::empty(),
        }
    }

    pub fn base(&self) -> &'a B {
        self.base
    }

    pub fn info(&self) -> &MapInfo {
        self.base.info()
    }

    pub fn thresholds(&self) -> &CostThresholds {
        self.base.thresholds()
    }

    pub fn levels(&self) -> &LevelStore {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn action_table(&self) -> &ActionTable {
        &self.actions
    }

    /// Set up `level_count` free-space levels and precompute the swept cells
    /// of every base primitive for every level footprint.
    pub fn initialize(&mut self, level_count: usize, footprints: Vec<Footprint>) -> Result<()> {
        self.levels.initialize(level_count, footprints)?;
        tracing::info!(levels = level_count, "planning with additional levels");

        let mut cells = HashSet::new();
        for (index, footprint) in self.levels.footprints().enumerate() {
            cells.clear();
            self.base
                .footprint_cells(IVec2::ZERO, Pose2::default(), footprint, &mut cells);
            tracing::info!(level = index, cells = cells.len(), "footprint size");
        }

        let footprints: Vec<Footprint> = self.levels.footprints().cloned().collect();
        self.actions = ActionTable::build(self.base, &footprints);
        tracing::info!(
            headings = self.actions.num_headings(),
            cells = self.actions.total_cells(),
            "precomputed swept cells for additional levels"
        );
        Ok(())
    }

    /// Initialize from a loaded level configuration and install its maps.
    pub fn initialize_from_config(&mut self, config: &LevelConfig) -> Result<()> {
        let info = *self.info();
        for (index, spec) in config.levels.iter().enumerate() {
            if let Some(map) = &spec.map
                && (map.width != info.width || map.height != info.height)
            {
                return Err(LatticeError::InvalidGrid(format!(
                    "level {index} map is {}x{}, lattice is {}x{}",
                    map.width, map.height, info.width, info.height
                )));
            }
        }
        if let Some(thresholds) = &config.thresholds
            && thresholds != self.thresholds()
        {
            tracing::warn!(
                ?thresholds,
                base = ?self.thresholds(),
                "level config thresholds differ from the base lattice; using the base lattice's"
            );
        }

        let footprints = config.levels.iter().map(|l| l.footprint.clone()).collect();
        self.initialize(config.levels.len(), footprints)?;

        for (index, spec) in config.levels.iter().enumerate() {
            if let Some(map) = &spec.map {
                self.set_level_grid(index, &map.data)?;
                tracing::debug!(level = index, name = ?spec.name, "installed level map");
            }
        }
        Ok(())
    }

    /// Replace one level grid from row-major bytes.
    pub fn set_level_grid(&mut self, level: usize, data: &[u8]) -> Result<()> {
        self.levels
            .set_level_grid(level, data)
            .inspect_err(|err| tracing::warn!(level, %err, "rejected level grid"))
    }

    /// Overwrite the cost of one cell at one level.
    pub fn update_cell(&mut self, level: usize, x: i32, y: i32, cost: u8) -> Result<()> {
        self.levels
            .update_cell(level, x, y, cost)
            .inspect_err(|err| tracing::warn!(level, x, y, %err, "rejected cell update"))
    }

    pub fn cost_at(&self, level: usize, x: i32, y: i32) -> Result<u8> {
        self.levels.cost_at(level, x, y)
    }

    /// Maximum cost over the base level and every auxiliary level.
    pub fn max_cost_at(&self, x: i32, y: i32) -> Option<u8> {
        let base = self.base.cost_at(x, y)?;
        Some(base.max(self.levels.max_cost_at(x, y)?))
    }

    /// In bounds and below the obstacle threshold at the base level and at
    /// every auxiliary level.
    pub fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        let cell = IVec2::new(x, y);
        let obstacle = self.thresholds().obstacle;
        self.info().contains(cell)
            && self.base.is_valid_cell(x, y)
            && self
                .levels
                .levels()
                .iter()
                .all(|level| level.is_free(cell, obstacle))
    }

    /// In bounds and below the obstacle threshold at one auxiliary level.
    pub fn is_valid_cell_at(&self, level: usize, x: i32, y: i32) -> Result<bool> {
        let level = self.levels.level(level)?;
        Ok(level.is_free(IVec2::new(x, y), self.thresholds().obstacle))
    }

    /// Out of bounds or at/above the obstacle threshold at any level.
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.base.is_obstacle(x, y) || self.is_aux_obstacle(x, y)
    }

    fn is_aux_obstacle(&self, x: i32, y: i32) -> bool {
        let cell = IVec2::new(x, y);
        let obstacle = self.thresholds().obstacle;
        !self.info().contains(cell)
            || self
                .levels
                .levels()
                .iter()
                .any(|level| !level.is_free(cell, obstacle))
    }

    pub fn is_obstacle_at(&self, level: usize, x: i32, y: i32) -> Result<bool> {
        Ok(!self.is_valid_cell_at(level, x, y)?)
    }

    /// Full geometric check of a lattice configuration: the base lattice
    /// accepts it and every level footprint lies on free, in-bounds cells.
    pub fn is_valid_configuration(&self, x: i32, y: i32, heading: usize) -> bool {
        if !self.base.is_valid_configuration(x, y, heading) {
            return false;
        }

        let cell = IVec2::new(x, y);
        let local = Pose2::new(
            DVec2::ZERO,
            disc_theta_to_cont(heading, self.base.num_headings()),
        );
        let obstacle = self.thresholds().obstacle;
        let mut cells = HashSet::new();

        self.levels.levels().iter().all(|level| {
            cells.clear();
            self.base
                .footprint_cells(cell, local, level.footprint(), &mut cells);
            cells.iter().all(|cell| level.is_free(*cell, obstacle))
        })
    }

    /// Cost of executing `action` from `(x, y, heading)`: the larger of the
    /// base lattice cost and the auxiliary-level cost.
    pub fn action_cost(&self, x: i32, y: i32, heading: usize, action: &Action) -> u32 {
        let mut stats = QueryStats::default();
        self.action_cost_with_stats(x, y, heading, action, &mut stats)
    }

    pub fn action_cost_with_stats(
        &self,
        x: i32,
        y: i32,
        heading: usize,
        action: &Action,
        stats: &mut QueryStats,
    ) -> u32 {
        stats.action_cost_queries += 1;

        let base_cost = self.base.action_cost(x, y, heading, action);
        let cost = if base_cost >= INFINITE_COST {
            INFINITE_COST
        } else {
            base_cost.max(self.aux_action_cost_with_stats(x, y, heading, action, stats))
        };

        if cost >= INFINITE_COST {
            stats.pruned_edges += 1;
            return INFINITE_COST;
        }
        cost
    }

    /// Cost of executing `action` across the auxiliary levels only.
    pub fn aux_action_cost(&self, x: i32, y: i32, heading: usize, action: &Action) -> u32 {
        let mut stats = QueryStats::default();
        self.aux_action_cost_with_stats(x, y, heading, action, &mut stats)
    }

    pub fn aux_action_cost_with_stats(
        &self,
        x: i32,
        y: i32,
        _heading: usize,
        action: &Action,
        stats: &mut QueryStats,
    ) -> u32 {
        let source = IVec2::new(x, y);
        let dest = action.destination(source);
        if !self.is_valid_cell(source.x, source.y) || !self.is_valid_cell(dest.x, dest.y) {
            return INFINITE_COST;
        }

        let levels = self.levels.levels();
        if levels.is_empty() {
            return 0;
        }

        let thresholds = *self.thresholds();
        if levels
            .iter()
            .any(|level| level.cost(dest).is_some_and(|cost| cost >= thresholds.inscribed))
        {
            return INFINITE_COST;
        }

        let mut max_cost = COST_FREE;
        let mut level_max = vec![COST_FREE; levels.len()];
        let mut blocked = false;

        for offset in &action.intermediate_cells {
            let cell = source + *offset;
            if !self.info().contains(cell) {
                blocked = true;
                break;
            }
            for (level, peak) in levels.iter().zip(level_max.iter_mut()) {
                let cost = level.cost(cell).unwrap_or(thresholds.obstacle);
                max_cost = max_cost.max(cost);
                *peak = (*peak).max(cost);
            }
            // No valid orientation exists at this center cell.
            if max_cost >= thresholds.inscribed {
                blocked = true;
                break;
            }
        }

        if !blocked {
            blocked = self.swept_collision(source, action, levels, &level_max, &thresholds, stats);
        }

        if blocked || max_cost >= thresholds.obstacle {
            return INFINITE_COST;
        }
        action.cost.saturating_mul(u32::from(max_cost) + 1)
    }

    /// Check the swept footprint of every level whose center-line cost says
    /// the footprint might touch an obstacle.
    fn swept_collision(
        &self,
        source: IVec2,
        action: &Action,
        levels: &[Level],
        level_max: &[u8],
        thresholds: &CostThresholds,
        stats: &mut QueryStats,
    ) -> bool {
        let entry = self.actions.lookup(action);
        if entry.is_none() {
            tracing::debug!(
                heading = action.start_heading,
                index = action.index,
                "no precomputed swept cells, rasterizing on the fly"
            );
        }

        for (index, (level, peak)) in levels.iter().zip(level_max).enumerate() {
            if level.footprint().is_point() || *peak < thresholds.circumscribed {
                continue;
            }
            stats.swept_checks += 1;

            let clear = match entry {
                Some(entry) => entry
                    .level(index)
                    .iter()
                    .all(|offset| level.is_free(source + *offset, thresholds.obstacle)),
                None => sweep_footprint(self.base, action, level.footprint(), source)
                    .iter()
                    .all(|cell| level.is_free(*cell, thresholds.obstacle)),
            };
            if !clear {
                return true;
            }
        }
        false
    }
}
