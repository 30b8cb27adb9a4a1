//! Per-level occupancy grids and footprints.

use glam::{IVec2, UVec2};

use crate::grid::Grid2d;
use crate::types::{COST_FREE, Footprint, LatticeError, MapInfo, Result};

/// One auxiliary level: a cost grid plus the footprint of the robot slice at
/// that height.
#[derive(Debug, Clone)]
pub struct Level {
    grid: Grid2d<u8>,
    footprint: Footprint,
}

impl Level {
    pub fn grid(&self) -> &Grid2d<u8> {
        &self.grid
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Cost at a lattice cell, `None` outside the grid.
    #[inline]
    pub fn cost(&self, cell: IVec2) -> Option<u8> {
        self.grid.cell(cell).copied()
    }

    /// In bounds and strictly below the obstacle threshold.
    #[inline]
    pub fn is_free(&self, cell: IVec2, obstacle: u8) -> bool {
        self.cost(cell).is_some_and(|cost| cost < obstacle)
    }
}

/// Owner of every auxiliary level. The number of levels is fixed by
/// [`LevelStore::initialize`] and never changes afterwards.
#[derive(Debug, Clone)]
pub struct LevelStore {
    info: MapInfo,
    levels: Vec<Level>,
    initialized: bool,
}

impl LevelStore {
    /// Empty, uninitialized store for grids of the given size.
    pub fn new(info: MapInfo) -> Self {
        Self {
            info,
            levels: Vec::new(),
            initialized: false,
        }
    }

    /// Allocate `level_count` free-space grids and store one footprint per level.
    pub fn initialize(&mut self, level_count: usize, footprints: Vec<Footprint>) -> Result<()> {
        if self.initialized {
            return Err(LatticeError::AlreadyInitialized);
        }
        if footprints.len() != level_count {
            return Err(LatticeError::LevelCountMismatch {
                expected: level_count,
                actual: footprints.len(),
            });
        }

        self.levels = footprints
            .into_iter()
            .map(|footprint| Level {
                grid: Grid2d::filled(self.info, COST_FREE),
                footprint,
            })
            .collect();
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    /// Number of auxiliary levels (zero before initialization).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Result<&Level> {
        self.levels.get(level).ok_or(LatticeError::LevelOutOfRange {
            level,
            count: self.levels.len(),
        })
    }

    fn level_mut(&mut self, level: usize) -> Result<&mut Level> {
        if !self.initialized {
            return Err(LatticeError::NotInitialized);
        }
        let count = self.levels.len();
        self.levels
            .get_mut(level)
            .ok_or(LatticeError::LevelOutOfRange { level, count })
    }

    pub fn footprints(&self) -> impl Iterator<Item = &Footprint> {
        self.levels.iter().map(Level::footprint)
    }

    /// Replace a level grid from row-major bytes (`data[x + y * width]`).
    pub fn set_level_grid(&mut self, level: usize, data: &[u8]) -> Result<()> {
        self.level_mut(level)?.grid.copy_from_slice(data)
    }

    /// Overwrite the cost of a single cell.
    pub fn update_cell(&mut self, level: usize, x: i32, y: i32, cost: u8) -> Result<()> {
        let level = self.level_mut(level)?;
        if x < 0 || y < 0 {
            return Err(LatticeError::OutOfBounds(format!(
                "cell ({x}, {y}) out of bounds"
            )));
        }
        level.grid.set(UVec2::new(x as u32, y as u32), cost)
    }

    /// Cost of a cell at one level.
    pub fn cost_at(&self, level: usize, x: i32, y: i32) -> Result<u8> {
        self.level(level)?.cost(IVec2::new(x, y)).ok_or_else(|| {
            LatticeError::OutOfBounds(format!(
                "cell ({x}, {y}) out of bounds for map {}x{}",
                self.info.width, self.info.height
            ))
        })
    }

    /// Maximum cost over all auxiliary levels. `None` outside the grid;
    /// [`COST_FREE`] when there are no levels.
    pub fn max_cost_at(&self, x: i32, y: i32) -> Option<u8> {
        let cell = IVec2::new(x, y);
        if !self.info.contains(cell) {
            return None;
        }
        Some(
            self.levels
                .iter()
                .filter_map(|level| level.cost(cell))
                .fold(COST_FREE, u8::max),
        )
    }
}
