use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Substring that makes a device name eligible for sprinkler activation at all.
pub(crate) const SPRINKLER_CLASS_MARKER: &str = "Sprinkler";

/// Brand marker claimed by the line-sprinklers content pack.
pub(crate) const LINE_BRAND_MARKER: &str = "Line";

/// Brand marker claimed by the radiant-tools content pack.
pub(crate) const RADIANT_BRAND_MARKER: &str = "Radiant";

/// Mid-tier marker substring.
pub(crate) const QUALITY_TIER_MARKER: &str = "Quality";

/// Top-tier marker substring.
pub(crate) const IRIDIUM_TIER_MARKER: &str = "Iridium";

/// Orientation marker substrings for line sprinklers.
pub(crate) const UP_MARKER: &str = "(U)";
pub(crate) const LEFT_MARKER: &str = "(L)";
pub(crate) const RIGHT_MARKER: &str = "(R)";
pub(crate) const DOWN_MARKER: &str = "(D)";

/// Line range (tile count) per tier.
pub(crate) const BASE_LINE_RANGE: u32 = 4;
pub(crate) const QUALITY_LINE_RANGE: u32 = 8;
pub(crate) const IRIDIUM_LINE_RANGE: u32 = 24;

// =============================================================================
// Enums
// =============================================================================

/// The coverage strategy selected for a device. Exactly one variant is
/// selected per classification; selection is a pure function of the device
/// name and which capability providers are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageVariant {
    /// Engine radius coverage, the fallback for plain sprinklers.
    Builtin,
    /// Tier- and orientation-encoded straight line, computed locally.
    DirectionalLine,
    /// Kind-keyed relative offsets from the offset-table provider.
    OffsetTable,
    /// Absolute tiles from the point-query provider.
    PointQuery,
    /// Not a sprinkler; never yields coverage or grid mutation.
    Unrecognized,
}

/// Upgrade tier of a sprinkler, decoded from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SprinklerTier {
    #[default]
    Base,
    Quality,
    Iridium,
}

impl SprinklerTier {
    /// Number of tiles a line sprinkler of this tier waters.
    pub fn line_range(self) -> u32 {
        match self {
            SprinklerTier::Base => BASE_LINE_RANGE,
            SprinklerTier::Quality => QUALITY_LINE_RANGE,
            SprinklerTier::Iridium => IRIDIUM_LINE_RANGE,
        }
    }
}

/// Watering direction of a line sprinkler, decoded from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrientation {
    Up,
    Down,
    Left,
    Right,
}

impl LineOrientation {
    /// Unit step in grid coordinates. Up decreases y, down increases it.
    pub fn step(self) -> IVec2 {
        match self {
            LineOrientation::Up => IVec2::NEG_Y,
            LineOrientation::Down => IVec2::Y,
            LineOrientation::Left => IVec2::NEG_X,
            LineOrientation::Right => IVec2::X,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Player interaction with a grid tile, emitted by the host input layer.
#[derive(Event, Debug, Clone)]
pub struct DeviceInteraction {
    pub tile: IVec2,
}

/// Fired once per successful builtin-variant activation so a downstream
/// rendering system can play the burst animation. This module only emits;
/// playback lives elsewhere.
#[derive(Event, Debug, Clone)]
pub struct SprinklerBurst {
    pub tile: IVec2,
    /// Engine radius tier of the activated sprinkler.
    pub radius: u32,
}

// =============================================================================
// Resource
// =============================================================================

/// Which activation triggers are enabled.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Activate the sprinkler under the tile the player interacts with.
    pub activate_on_interact: bool,
    /// Activate newly placed sprinklers immediately.
    pub activate_on_placement: bool,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            activate_on_interact: true,
            activate_on_placement: true,
        }
    }
}
