//! Lattice grid metadata.

use glam::IVec2;

/// Size of the lattice grid shared by the base level and every auxiliary level.
///
/// Cell `(0, 0)` has its lower-left corner at the world origin, so the center
/// of cell `(x, y)` is `((x + 0.5) * resolution, (y + 0.5) * resolution)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    /// Cell size in meters.
    pub resolution: f64,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            resolution: 0.025,
        }
    }
}

impl MapInfo {
    pub fn square(width: u32, resolution: f64) -> Self {
        Self {
            width,
            height: width,
            resolution,
        }
    }

    /// Number of cells in one level.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_rejects_negative_and_far_cells() {
        let info = MapInfo {
            width: 4,
            height: 3,
            resolution: 0.1,
        };
        assert!(info.contains(IVec2::new(0, 0)));
        assert!(info.contains(IVec2::new(3, 2)));
        assert!(!info.contains(IVec2::new(-1, 0)));
        assert!(!info.contains(IVec2::new(4, 0)));
        assert!(!info.contains(IVec2::new(0, 3)));
        assert_eq!(info.cell_count(), 12);
    }
}
