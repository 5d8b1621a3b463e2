use super::capabilities::CoverageCapabilities;
use super::types::{
    CoverageVariant, LineOrientation, SprinklerTier, DOWN_MARKER, IRIDIUM_TIER_MARKER,
    LEFT_MARKER, LINE_BRAND_MARKER, QUALITY_TIER_MARKER, RADIANT_BRAND_MARKER, RIGHT_MARKER,
    SPRINKLER_CLASS_MARKER, UP_MARKER,
};

// =============================================================================
// Name parsing (pure, testable)
// =============================================================================

/// Traits decoded from a device's display name.
///
/// The name is the only type information the host exposes for placed objects,
/// so all of the fragile substring matching is isolated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTraits {
    /// Carries the generic sprinkler-class marker; without it the device is
    /// not eligible for activation at all.
    pub sprinkler_class: bool,
    /// Carries the line pack's brand marker.
    pub line_branded: bool,
    /// Carries the radiant pack's brand marker.
    pub radiant_branded: bool,
    /// Tier decoded from the tier marker; missing marker means base tier.
    pub tier: SprinklerTier,
    /// Orientation decoded from the directional marker, if any.
    pub orientation: Option<LineOrientation>,
}

/// Decode a device name into its typed traits.
pub fn parse_device_name(name: &str) -> NameTraits {
    let tier = if name.contains(QUALITY_TIER_MARKER) {
        SprinklerTier::Quality
    } else if name.contains(IRIDIUM_TIER_MARKER) {
        SprinklerTier::Iridium
    } else {
        SprinklerTier::Base
    };

    let orientation = if name.contains(UP_MARKER) {
        Some(LineOrientation::Up)
    } else if name.contains(LEFT_MARKER) {
        Some(LineOrientation::Left)
    } else if name.contains(RIGHT_MARKER) {
        Some(LineOrientation::Right)
    } else if name.contains(DOWN_MARKER) {
        Some(LineOrientation::Down)
    } else {
        None
    };

    NameTraits {
        sprinkler_class: name.contains(SPRINKLER_CLASS_MARKER),
        line_branded: name.contains(LINE_BRAND_MARKER),
        radiant_branded: name.contains(RADIANT_BRAND_MARKER),
        tier,
        orientation,
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Select the coverage variant for a device.
///
/// The ladder below is a fixed priority order, first match wins. Two
/// providers can both claim the same device (a line-branded sprinkler is also
/// covered by the brand-agnostic offset table), so the arm order is
/// load-bearing and must not be reordered.
pub fn classify(traits: NameTraits, caps: &CoverageCapabilities) -> CoverageVariant {
    if !traits.sprinkler_class {
        return CoverageVariant::Unrecognized;
    }

    match (
        caps.line_present() && traits.line_branded,
        caps.point_query().is_some() && traits.radiant_branded,
        caps.offset_table().is_some(),
    ) {
        (true, _, _) => CoverageVariant::DirectionalLine,
        (false, true, _) => CoverageVariant::PointQuery,
        (false, false, true) => CoverageVariant::OffsetTable,
        (false, false, false) => CoverageVariant::Builtin,
    }
}
