//! Multi-level `(x, y, theta)` lattice environment.
//!
//! Extends a single-level lattice planner environment ([`BaseLattice`]) with
//! any number of auxiliary levels, each with its own cost grid and robot
//! footprint. Swept-footprint cells of every motion primitive are precomputed
//! once per level so edge costs can be evaluated with table lookups.

pub mod env;
pub mod footprint;
pub mod grid;
pub mod iterators;
pub mod lattice;
pub mod levels;
pub mod loaders;
pub mod swept;
pub mod types;

pub use env::{MultiLevelEnvironment, QueryStats};
pub use grid::Grid2d;
pub use lattice::{Action, BaseLattice, CostThresholds};
pub use levels::{Level, LevelStore};
pub use loaders::{LevelConfig, load_level_config};
pub use swept::{ActionTable, SweptCells};
pub use types::{Footprint, INFINITE_COST, LatticeError, MapInfo, Pose2};
