//! Placed interactive devices.
//!
//! A device is an entity with a [`Device`] component plus a back-pointer from
//! the grid cell it occupies. The engine only knows a device's display name,
//! its catalog kind id, and a radius tier for devices it recognises as
//! sprinklers; everything else about coverage lives in the `sprinklers`
//! module.

use bevy::prelude::*;

use crate::grid::WorldGrid;

/// A placed, interactive grid object.
#[derive(Component, Debug, Clone)]
pub struct Device {
    /// Display name. The name encodes type, tier, and orientation for devices
    /// placed by content packs, so it is the classification input.
    pub name: String,
    /// Catalog id of the device kind; offset-table coverage is keyed by it.
    pub kind: u32,
    pub grid_x: usize,
    pub grid_y: usize,
    /// Radius tier when the engine recognises the device as a sprinkler
    /// (0 = base, 1 = quality, 2 = iridium). `None` for devices that merely
    /// carry a sprinkler-like name.
    pub sprinkler_radius: Option<u32>,
}

impl Device {
    pub fn tile(&self) -> IVec2 {
        IVec2::new(self.grid_x as i32, self.grid_y as i32)
    }
}

/// Built-in engine coverage for a sprinkler of the given radius tier.
///
/// Radius 0 covers the four cardinal neighbours; radius r >= 1 covers the
/// full (2r+1)^2 square minus the device's own cell.
pub fn builtin_coverage(tile: IVec2, radius: u32) -> Vec<IVec2> {
    if radius == 0 {
        return vec![
            tile + IVec2::NEG_Y,
            tile + IVec2::NEG_X,
            tile + IVec2::X,
            tile + IVec2::Y,
        ];
    }
    let r = radius as i32;
    let mut tiles = Vec::with_capacity(((2 * r + 1) * (2 * r + 1) - 1) as usize);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            tiles.push(tile + IVec2::new(dx, dy));
        }
    }
    tiles
}

/// Place a device on the grid, spawning its entity and marking its cell.
///
/// Fails (returns false, spawns nothing) when the target cell is out of
/// bounds or already occupied by another device.
pub fn place_device(commands: &mut Commands, grid: &mut WorldGrid, device: Device) -> bool {
    let (gx, gy) = (device.grid_x, device.grid_y);
    if !grid.in_bounds(gx, gy) {
        return false;
    }
    if grid.get(gx, gy).device_id.is_some() {
        return false;
    }

    let entity = commands.spawn(device).id();
    grid.get_mut(gx, gy).device_id = Some(entity);
    true
}
