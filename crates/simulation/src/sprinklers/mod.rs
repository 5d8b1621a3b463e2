mod capabilities;
mod classify;
mod coverage;
mod systems;
pub mod types;

pub use capabilities::{
    detect_capabilities, CapabilityProvider, CoverageCapabilities, OffsetTableApi, PointQueryApi,
    ProviderDirectory, ProviderHandle, LINE_PROVIDER_ID, OFFSET_PROVIDER_ID, POINT_PROVIDER_ID,
};
pub use classify::{classify, parse_device_name, NameTraits};
pub use coverage::{line_coverage, resolve_coverage, CoverageError};
pub use systems::{activate_on_interaction, activate_on_placement, SprinklerActivationPlugin};
pub use types::{
    ActivationConfig, CoverageVariant, DeviceInteraction, LineOrientation, SprinklerBurst,
    SprinklerTier,
};
