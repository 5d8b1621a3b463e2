//! # TestFarm — headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::app_state::AppState;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::devices::Device;
use crate::grid::{Moisture, TerrainFeature, WorldGrid};
use crate::sprinklers::{ActivationConfig, DeviceInteraction, ProviderDirectory, SprinklerBurst};
use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to lay out terrain, then `place_sprinkler`, `interact`
/// and `tick` to drive activations and assert on the resulting grid state.
pub struct TestFarm {
    app: App,
}

impl TestFarm {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Blank farm with no optional coverage providers installed.
    pub fn new() -> Self {
        Self::with_providers(ProviderDirectory::default())
    }

    /// Blank farm with the given host provider directory installed before
    /// startup, so capability detection sees it.
    pub fn with_providers(directory: ProviderDirectory) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);

        // Insert the markers BEFORE SimulationPlugin so init_world skips and
        // detection reads the directory on the first update.
        app.insert_resource(SkipWorldInit);
        app.insert_resource(directory);
        app.add_plugins(SimulationPlugin);
        app.insert_state(AppState::Playing);

        // Blank grid instead of the generated farm map.
        app.insert_resource(WorldGrid::new(GRID_WIDTH, GRID_HEIGHT));

        // Run one update so Startup systems execute (capability detection
        // runs, init_world no-ops).
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // World setup (builder pattern — consumes and returns Self)
    // -----------------------------------------------------------------------

    /// Override the activation trigger configuration.
    pub fn with_config(mut self, config: ActivationConfig) -> Self {
        self.app.world_mut().insert_resource(config);
        self
    }

    /// Till a single soil cell (dry).
    pub fn with_soil(mut self, x: usize, y: usize) -> Self {
        self.set_terrain(x, y, Some(TerrainFeature::tilled()));
        self
    }

    /// Till a rectangular field (inclusive).
    pub fn with_soil_rect(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set_terrain(x, y, Some(TerrainFeature::tilled()));
            }
        }
        self
    }

    /// Plant a tree (non-irrigable feature).
    pub fn with_tree(mut self, x: usize, y: usize) -> Self {
        self.set_terrain(x, y, Some(TerrainFeature::Tree));
        self
    }

    fn set_terrain(&mut self, x: usize, y: usize, feature: Option<TerrainFeature>) {
        let mut grid = self.app.world_mut().resource_mut::<WorldGrid>();
        if grid.in_bounds(x, y) {
            grid.get_mut(x, y).terrain = feature;
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Place a device directly into the world, wiring the grid back-pointer.
    /// The placement trigger will see it on the next `tick`.
    pub fn place_device(&mut self, device: Device) -> Entity {
        let (x, y) = (device.grid_x, device.grid_y);
        let entity = self.app.world_mut().spawn(device).id();
        let mut grid = self.app.world_mut().resource_mut::<WorldGrid>();
        if grid.in_bounds(x, y) {
            grid.get_mut(x, y).device_id = Some(entity);
        }
        entity
    }

    /// Convenience wrapper around [`TestFarm::place_device`].
    pub fn place_sprinkler(
        &mut self,
        name: &str,
        kind: u32,
        x: usize,
        y: usize,
        radius: Option<u32>,
    ) -> Entity {
        self.place_device(Device {
            name: name.to_string(),
            kind,
            grid_x: x,
            grid_y: y,
            sprinkler_radius: radius,
        })
    }

    /// Send a player interaction with the given tile.
    pub fn interact(&mut self, x: i32, y: i32) {
        self.app
            .world_mut()
            .send_event(DeviceInteraction {
                tile: IVec2::new(x, y),
            });
    }

    /// Advance the app by one update.
    pub fn tick(&mut self) {
        self.app.update();
    }

    /// Switch the top-level app state (e.g. back to `MainMenu`).
    pub fn set_state(&mut self, state: AppState) {
        self.app.insert_state(state);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Moisture of the soil at (x, y); `None` when the cell holds no soil.
    pub fn moisture(&self, x: usize, y: usize) -> Option<Moisture> {
        let grid = self.app.world().resource::<WorldGrid>();
        match grid.get(x, y).terrain {
            Some(TerrainFeature::Soil { moisture }) => Some(moisture),
            _ => None,
        }
    }

    /// All watered soil cells, for whole-grid assertions.
    pub fn watered_tiles(&self) -> Vec<(usize, usize)> {
        let grid = self.app.world().resource::<WorldGrid>();
        let mut tiles = Vec::new();
        for y in 0..grid.height {
            for x in 0..grid.width {
                if grid.get(x, y).terrain
                    == Some(TerrainFeature::Soil {
                        moisture: Moisture::Watered,
                    })
                {
                    tiles.push((x, y));
                }
            }
        }
        tiles
    }

    /// Terrain feature at (x, y).
    pub fn terrain(&self, x: usize, y: usize) -> Option<TerrainFeature> {
        self.app.world().resource::<WorldGrid>().get(x, y).terrain
    }

    /// Drain all pending burst events.
    pub fn drain_bursts(&mut self) -> Vec<SprinklerBurst> {
        self.app
            .world_mut()
            .resource_mut::<Events<SprinklerBurst>>()
            .drain()
            .collect()
    }
}
