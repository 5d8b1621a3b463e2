use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CELL_SIZE;

/// Moisture state of a soil feature. Irrigation only ever moves it towards
/// `Watered`; drying out is not part of this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Moisture {
    #[default]
    Dry,
    Watered,
}

/// A terrain feature occupying a grid cell. Only `Soil` can hold moisture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainFeature {
    /// Tilled soil, the only irrigable feature.
    Soil { moisture: Moisture },
    Grass,
    Tree,
}

impl TerrainFeature {
    /// Freshly tilled, dry soil.
    pub fn tilled() -> Self {
        TerrainFeature::Soil {
            moisture: Moisture::Dry,
        }
    }

    pub fn is_soil(self) -> bool {
        matches!(self, TerrainFeature::Soil { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    pub terrain: Option<TerrainFeature>,
    /// Back-pointer to the placed device occupying this cell, if any.
    pub device_id: Option<Entity>,
}

#[derive(Resource)]
pub struct WorldGrid {
    pub cells: Vec<Cell>,
    pub width: usize,
    pub height: usize,
}

impl WorldGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    /// Cell at a signed tile coordinate. Coverage formulas may step off the
    /// map, so this returns `None` instead of panicking out of bounds.
    pub fn cell_at(&self, tile: IVec2) -> Option<&Cell> {
        if tile.x < 0 || tile.y < 0 {
            return None;
        }
        let (x, y) = (tile.x as usize, tile.y as usize);
        if self.in_bounds(x, y) {
            Some(self.get(x, y))
        } else {
            None
        }
    }

    pub fn cell_at_mut(&mut self, tile: IVec2) -> Option<&mut Cell> {
        if tile.x < 0 || tile.y < 0 {
            return None;
        }
        let (x, y) = (tile.x as usize, tile.y as usize);
        if self.in_bounds(x, y) {
            Some(self.get_mut(x, y))
        } else {
            None
        }
    }

    /// The placed device occupying `tile`, if any.
    pub fn device_at(&self, tile: IVec2) -> Option<Entity> {
        self.cell_at(tile).and_then(|cell| cell.device_id)
    }

    /// Set the moisture state of the soil at `tile` to watered.
    ///
    /// Tiles outside the grid, tiles without a terrain feature, and features
    /// that are not soil are skipped silently. Never creates or removes a
    /// terrain feature. Returns true when the tile holds soil (watering
    /// already-watered soil is an idempotent no-op and still returns true).
    pub fn water_tile(&mut self, tile: IVec2) -> bool {
        let Some(cell) = self.cell_at_mut(tile) else {
            return false;
        };
        match cell.terrain {
            Some(TerrainFeature::Soil { .. }) => {
                cell.terrain = Some(TerrainFeature::Soil {
                    moisture: Moisture::Watered,
                });
                true
            }
            _ => false,
        }
    }

    pub fn world_to_grid(world_x: f32, world_y: f32) -> (i32, i32) {
        let gx = (world_x / CELL_SIZE).floor() as i32;
        let gy = (world_y / CELL_SIZE).floor() as i32;
        (gx, gy)
    }

    pub fn grid_to_world(gx: usize, gy: usize) -> (f32, f32) {
        let wx = gx as f32 * CELL_SIZE + CELL_SIZE * 0.5;
        let wy = gy as f32 * CELL_SIZE + CELL_SIZE * 0.5;
        (wx, wy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GRID_HEIGHT, GRID_WIDTH};

    #[test]
    fn test_grid_coord_roundtrip() {
        let grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        for gx in [0, 13, 32, 63] {
            for gy in [0, 13, 32, 63] {
                let (wx, wy) = WorldGrid::grid_to_world(gx, gy);
                let (rx, ry) = WorldGrid::world_to_grid(wx, wy);
                assert_eq!((rx as usize, ry as usize), (gx, gy));
                assert!(grid.in_bounds(gx, gy));
            }
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        assert!(!grid.in_bounds(GRID_WIDTH, 0));
        assert!(!grid.in_bounds(0, GRID_HEIGHT));
        assert!(grid.cell_at(IVec2::new(-1, 0)).is_none());
        assert!(grid.cell_at(IVec2::new(0, GRID_HEIGHT as i32)).is_none());
    }

    #[test]
    fn test_water_dry_soil() {
        let mut grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        grid.get_mut(3, 4).terrain = Some(TerrainFeature::tilled());
        assert!(grid.water_tile(IVec2::new(3, 4)));
        assert_eq!(
            grid.get(3, 4).terrain,
            Some(TerrainFeature::Soil {
                moisture: Moisture::Watered
            })
        );
    }

    #[test]
    fn test_water_is_idempotent() {
        let mut grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        grid.get_mut(3, 4).terrain = Some(TerrainFeature::tilled());
        assert!(grid.water_tile(IVec2::new(3, 4)));
        assert!(grid.water_tile(IVec2::new(3, 4)));
        assert_eq!(
            grid.get(3, 4).terrain,
            Some(TerrainFeature::Soil {
                moisture: Moisture::Watered
            })
        );
    }

    #[test]
    fn test_water_skips_bare_and_non_soil_cells() {
        let mut grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        grid.get_mut(5, 5).terrain = Some(TerrainFeature::Tree);
        assert!(!grid.water_tile(IVec2::new(5, 5)));
        assert!(!grid.water_tile(IVec2::new(6, 6)));
        assert_eq!(grid.get(5, 5).terrain, Some(TerrainFeature::Tree));
        assert_eq!(grid.get(6, 6).terrain, None);
    }

    #[test]
    fn test_water_off_grid_is_noop() {
        let mut grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
        assert!(!grid.water_tile(IVec2::new(-3, 2)));
        assert!(!grid.water_tile(IVec2::new(2, -3)));
        assert!(!grid.water_tile(IVec2::new(GRID_WIDTH as i32, 0)));
    }
}
