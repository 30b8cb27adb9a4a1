pub mod levels;

pub use levels::{LevelConfig, LevelMap, LevelSpec, MapMode, load_level_config};
