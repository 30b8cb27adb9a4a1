use glam::{IVec2, UVec2};

use crate::types::{LatticeError, MapInfo, Result};

/// Flat row-major grid: cell `(x, y)` lives at `y * width + x`.
#[derive(Debug, Clone)]
pub struct Grid2d<T> {
    info: MapInfo,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn filled(info: MapInfo, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![value; info.cell_count()],
            info,
        }
    }

    pub fn get(&self, pos: UVec2) -> Option<&T> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    /// Like [`Grid2d::get`] but accepts lattice cells that may be negative.
    #[inline]
    pub fn cell(&self, cell: IVec2) -> Option<&T> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        self.get(cell.as_uvec2())
    }

    pub fn set(&mut self, pos: UVec2, value: T) -> Result<()> {
        if pos.x >= self.info.width || pos.y >= self.info.height {
            return Err(LatticeError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for map {}x{}",
                pos.x, pos.y, self.info.width, self.info.height
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    /// Replace every cell from a row-major slice of the same size.
    pub fn copy_from_slice(&mut self, data: &[T]) -> Result<()>
    where
        T: Copy,
    {
        if data.len() != self.data.len() {
            return Err(LatticeError::InvalidGrid(format!(
                "data length {} does not match map size {}",
                data.len(),
                self.data.len()
            )));
        }
        self.data.copy_from_slice(data);
        Ok(())
    }

    #[inline]
    fn index(&self, pos: UVec2) -> usize {
        (pos.y as usize) * (self.info.width as usize) + (pos.x as usize)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}
