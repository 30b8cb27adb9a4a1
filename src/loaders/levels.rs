use std::path::{Path, PathBuf};

use glam::DVec2;
use image::GenericImageView;
use serde::Deserialize;

use crate::lattice::CostThresholds;
use crate::types::{
    COST_FREE, COST_LETHAL, DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, Footprint,
    LatticeError, Result,
};

#[derive(Debug, Deserialize)]
struct LevelConfigFile {
    #[serde(default)]
    thresholds: Option<CostThresholds>,
    levels: Vec<LevelEntry>,
}

#[derive(Debug, Deserialize)]
struct LevelEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    footprint: Vec<[f64; 2]>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default = "default_map_mode")]
    mode: MapMode,
    #[serde(default)]
    negate: bool,
    #[serde(
        default = "default_occupied_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    occupied_thresh: f32,
    #[serde(
        default = "default_free_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    free_thresh: f32,
    #[serde(default = "default_unknown_cost")]
    unknown_cost: u8,
}

/// How pixel values of a level image become costs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    /// Luma value is the cost (0 free, 254 lethal).
    Raw,
    /// Dark pixels are occupied, light pixels free, the rest unknown.
    Trinary,
}

fn default_map_mode() -> MapMode {
    MapMode::Raw
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

fn default_unknown_cost() -> u8 {
    COST_LETHAL
}

fn deserialize_threshold<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "thresholds must be in the range [0.0, 1.0]",
        ))
    }
}

/// Row-major cost grid loaded from a level image, row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelSpec {
    pub name: Option<String>,
    pub footprint: Footprint,
    pub map: Option<LevelMap>,
}

/// Auxiliary level description: one footprint (and optional map) per level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    /// Thresholds the base lattice is expected to use, if the file names them.
    pub thresholds: Option<CostThresholds>,
    pub levels: Vec<LevelSpec>,
}

pub fn load_level_config(yaml_path: impl AsRef<Path>) -> Result<LevelConfig> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let file: LevelConfigFile = serde_yaml::from_str(&yaml_str)?;

    if let Some(thresholds) = &file.thresholds {
        thresholds.validate()?;
    }

    let mut levels = Vec::with_capacity(file.levels.len());
    for entry in file.levels {
        let map = match &entry.image {
            Some(image_ref) => Some(load_level_map(
                &resolve_image_path(yaml_path, image_ref),
                &entry,
            )?),
            None => None,
        };
        let footprint = Footprint::new(
            entry
                .footprint
                .iter()
                .map(|[x, y]| DVec2::new(*x, *y))
                .collect(),
        );
        levels.push(LevelSpec {
            name: entry.name,
            footprint,
            map,
        });
    }

    Ok(LevelConfig {
        thresholds: file.thresholds,
        levels,
    })
}

fn load_level_map(image_path: &Path, entry: &LevelEntry) -> Result<LevelMap> {
    if entry.mode == MapMode::Trinary && entry.occupied_thresh <= entry.free_thresh {
        return Err(LatticeError::InvalidConfig(
            "occupied_thresh must be greater than free_thresh".to_string(),
        ));
    }

    let image = image::open(image_path)?;
    let (width, height) = image.dimensions();
    let luma = image.to_luma8();

    let mut data = vec![COST_FREE; (width as usize) * (height as usize)];

    for y in 0..height {
        for x in 0..width {
            let mut value = luma.get_pixel(x, y).0[0];
            if entry.negate {
                value = 255 - value;
            }

            let cost = match entry.mode {
                MapMode::Raw => value,
                MapMode::Trinary => {
                    let occupancy = 1.0 - value as f32 / 255.0;
                    if occupancy >= entry.occupied_thresh {
                        COST_LETHAL
                    } else if occupancy <= entry.free_thresh {
                        COST_FREE
                    } else {
                        entry.unknown_cost
                    }
                }
            };

            let grid_y = height - y - 1;
            let idx = (grid_y as usize) * (width as usize) + (x as usize);
            data[idx] = cost;
        }
    }

    tracing::debug!(path = %image_path.display(), width, height, "loaded level map");
    Ok(LevelMap {
        width,
        height,
        data,
    })
}

fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_image_paths_resolve_next_to_yaml() {
        let resolved = resolve_image_path(Path::new("/maps/levels.yaml"), "arm.pgm");
        assert_eq!(resolved, PathBuf::from("/maps/arm.pgm"));
        let absolute = resolve_image_path(Path::new("/maps/levels.yaml"), "/data/arm.pgm");
        assert_eq!(absolute, PathBuf::from("/data/arm.pgm"));
    }

    #[test]
    fn entries_fill_defaults() {
        let file: LevelConfigFile = serde_yaml::from_str(
            "levels:\n  - footprint: [[0.1, 0.1], [-0.1, 0.1], [-0.1, -0.1]]\n  - name: mast\n",
        )
        .unwrap();

        assert!(file.thresholds.is_none());
        assert_eq!(file.levels.len(), 2);
        assert_eq!(file.levels[0].mode, MapMode::Raw);
        assert_eq!(file.levels[0].footprint.len(), 3);
        assert_eq!(file.levels[1].unknown_cost, COST_LETHAL);
        assert!(file.levels[1].footprint.is_empty());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let parsed: std::result::Result<LevelConfigFile, _> =
            serde_yaml::from_str("levels:\n  - occupied_thresh: 1.5\n");
        assert!(parsed.is_err());
    }
}
