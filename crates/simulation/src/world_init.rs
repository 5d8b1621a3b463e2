// =============================================================================
// World generation: a small farm map with tilled fields, grass, and scattered
// trees.
// =============================================================================

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::grid::{TerrainFeature, WorldGrid};

/// Seed for the generated farm map. Identical seeds produce identical maps
/// on every platform, which keeps the demo binary reproducible.
const WORLD_SEED: u64 = 42;

/// Marker resource that, when present, causes `init_world` to skip map
/// generation. Used by the test harness to start with a blank grid.
#[derive(Resource)]
pub struct SkipWorldInit;

pub fn init_world(mut commands: Commands, skip: Option<Res<SkipWorldInit>>) {
    if skip.is_some() {
        return;
    }
    let mut grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
    generate_farm(&mut grid);
    commands.insert_resource(grid);
}

/// Fill the grid with two tilled field plots surrounded by grass, plus a
/// sparse scattering of trees on the grass.
fn generate_farm(grid: &mut WorldGrid) {
    let mut rng = ChaCha8Rng::seed_from_u64(WORLD_SEED);

    // Field plots: fixed rectangles so sprinkler placement is predictable.
    till_rect(grid, 8, 8, 27, 23);
    till_rect(grid, 36, 30, 55, 45);

    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.get(x, y).terrain.is_some() {
                continue;
            }
            let roll = rng.gen_range(0..100);
            let feature = if roll < 6 {
                TerrainFeature::Tree
            } else {
                TerrainFeature::Grass
            };
            grid.get_mut(x, y).terrain = Some(feature);
        }
    }
}

fn till_rect(grid: &mut WorldGrid, x0: usize, y0: usize, x1: usize, y1: usize) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            if grid.in_bounds(x, y) {
                grid.get_mut(x, y).terrain = Some(TerrainFeature::tilled());
            }
        }
    }
}
