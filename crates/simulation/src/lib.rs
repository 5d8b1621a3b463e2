use bevy::prelude::*;

pub mod app_state;
pub mod config;
pub mod devices;
pub mod grid;
pub mod sprinklers;
pub mod world_init;

#[cfg(test)]
pub mod test_harness;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<app_state::AppState>()
            .add_systems(Startup, world_init::init_world)
            .add_plugins(sprinklers::SprinklerActivationPlugin);
    }
}
