use bevy::prelude::*;

use simulation::app_state::AppState;
use simulation::devices::{place_device, Device};
use simulation::grid::{Moisture, TerrainFeature, WorldGrid};
use simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins((MinimalPlugins, bevy::log::LogPlugin::default()))
        .add_plugins(SimulationPlugin)
        .add_systems(PostStartup, (start_playing, plant_demo_sprinklers))
        .add_systems(Update, report_and_exit)
        .run();
}

/// The demo farm has no menu; jump straight into gameplay.
fn start_playing(mut next: ResMut<NextState<AppState>>) {
    next.set(AppState::Playing);
}

/// Place a few sprinklers on the generated fields. The placement trigger
/// waters their coverage on the first update.
fn plant_demo_sprinklers(mut commands: Commands, mut grid: ResMut<WorldGrid>) {
    let sprinklers = [
        ("Sprinkler", 599, 12, 12, Some(0)),
        ("Quality Sprinkler", 621, 18, 15, Some(1)),
        ("Iridium Sprinkler", 645, 45, 38, Some(2)),
    ];
    for (name, kind, x, y, radius) in sprinklers {
        let placed = place_device(
            &mut commands,
            &mut grid,
            Device {
                name: name.to_string(),
                kind,
                grid_x: x,
                grid_y: y,
                sprinkler_radius: radius,
            },
        );
        if !placed {
            warn!("could not place '{}' at ({}, {})", name, x, y);
        }
    }
}

/// Give the activation systems a couple of updates, then report and quit.
fn report_and_exit(grid: Res<WorldGrid>, mut ticks: Local<u32>, mut exit: EventWriter<AppExit>) {
    *ticks += 1;
    if *ticks < 3 {
        return;
    }
    let watered = grid
        .cells
        .iter()
        .filter(|cell| {
            cell.terrain
                == Some(TerrainFeature::Soil {
                    moisture: Moisture::Watered,
                })
        })
        .count();
    info!("demo farm: {} watered soil tiles", watered);
    exit.send(AppExit::Success);
}
