use bevy::prelude::*;

use crate::app_state::AppState;
use crate::devices::Device;
use crate::grid::WorldGrid;

use super::capabilities::{detect_capabilities, CoverageCapabilities};
use super::classify::{classify, parse_device_name};
use super::coverage::resolve_coverage;
use super::types::{ActivationConfig, CoverageVariant, DeviceInteraction, SprinklerBurst};

// =============================================================================
// Systems
// =============================================================================

/// System: activate the sprinkler under each interacted tile.
///
/// Gated on `AppState::Playing`, so interaction does nothing while the world
/// is not interactive. Tiles without a device are ignored.
pub fn activate_on_interaction(
    mut interactions: EventReader<DeviceInteraction>,
    mut grid: ResMut<WorldGrid>,
    caps: Res<CoverageCapabilities>,
    devices: Query<&Device>,
    mut bursts: EventWriter<SprinklerBurst>,
) {
    for interaction in interactions.read() {
        let Some(entity) = grid.device_at(interaction.tile) else {
            continue;
        };
        let Ok(device) = devices.get(entity) else {
            continue;
        };
        activate_device(device, &caps, &mut grid, &mut bursts);
    }
}

/// System: activate every device placed this frame.
///
/// `Added<Device>` is the frame's batch of newly placed devices. Each
/// activation is independent, so one failing device never aborts the batch.
pub fn activate_on_placement(
    placed: Query<&Device, Added<Device>>,
    mut grid: ResMut<WorldGrid>,
    caps: Res<CoverageCapabilities>,
    mut bursts: EventWriter<SprinklerBurst>,
) {
    for device in &placed {
        activate_device(device, &caps, &mut grid, &mut bursts);
    }
}

/// Run the classify -> resolve -> apply pipeline for one device.
///
/// Resolution failures are recoverable: they are logged and the device is
/// skipped for this activation, leaving the grid untouched by it.
fn activate_device(
    device: &Device,
    caps: &CoverageCapabilities,
    grid: &mut WorldGrid,
    bursts: &mut EventWriter<SprinklerBurst>,
) {
    let traits = parse_device_name(&device.name);
    let variant = classify(traits, caps);

    match resolve_coverage(device, traits, variant, caps) {
        Ok(tiles) => {
            let mut watered = 0usize;
            for tile in &tiles {
                if grid.water_tile(*tile) {
                    watered += 1;
                }
            }
            debug!(
                "activated '{}' at ({}, {}) as {:?}: {} tiles, {} watered",
                device.name,
                device.grid_x,
                device.grid_y,
                variant,
                tiles.len(),
                watered
            );
            if variant == CoverageVariant::Builtin {
                if let Some(radius) = device.sprinkler_radius {
                    bursts.send(SprinklerBurst {
                        tile: device.tile(),
                        radius,
                    });
                }
            }
        }
        Err(err) => {
            warn!(
                "sprinkler '{}' at ({}, {}) not activated: {}",
                device.name, device.grid_x, device.grid_y, err
            );
        }
    }
}

// =============================================================================
// Run conditions
// =============================================================================

fn interaction_enabled(config: Res<ActivationConfig>) -> bool {
    config.activate_on_interact
}

fn placement_enabled(config: Res<ActivationConfig>) -> bool {
    config.activate_on_placement
}

// =============================================================================
// Plugin
// =============================================================================

pub struct SprinklerActivationPlugin;

impl Plugin for SprinklerActivationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActivationConfig>()
            .add_event::<DeviceInteraction>()
            .add_event::<SprinklerBurst>()
            .add_systems(Startup, detect_capabilities)
            .add_systems(
                Update,
                (
                    activate_on_interaction
                        .run_if(in_state(AppState::Playing))
                        .run_if(interaction_enabled),
                    activate_on_placement.run_if(placement_enabled),
                ),
            );
    }
}
