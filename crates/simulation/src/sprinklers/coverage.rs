use std::collections::HashSet;
use std::fmt;

use bevy::prelude::*;

use crate::devices::{builtin_coverage, Device};

use super::capabilities::CoverageCapabilities;
use super::classify::NameTraits;
use super::types::{CoverageVariant, LineOrientation, SprinklerTier};

// =============================================================================
// Errors
// =============================================================================

/// Reasons coverage resolution can fail for one activation.
///
/// Both are recoverable: the activation boundary logs them and skips the
/// device, so a failing device never aborts a placement batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    /// The offset-table provider has no entry for this device kind. Distinct
    /// from an empty coverage set.
    UnknownDeviceKind(u32),
    /// The point-query provider call failed; the message is provider-supplied
    /// and opaque to this subsystem.
    ProviderFailure(String),
}

impl fmt::Display for CoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageError::UnknownDeviceKind(kind) => {
                write!(f, "no coverage table entry for device kind {}", kind)
            }
            CoverageError::ProviderFailure(msg) => {
                write!(f, "coverage provider failed: {}", msg)
            }
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Produce the set of tiles a classified device waters.
///
/// Duplicates collapse and order is irrelevant. The device's own tile only
/// appears if the active strategy's formula explicitly includes it (the
/// builtin and line formulas never do; a provider may).
pub fn resolve_coverage(
    device: &Device,
    traits: NameTraits,
    variant: CoverageVariant,
    caps: &CoverageCapabilities,
) -> Result<HashSet<IVec2>, CoverageError> {
    match variant {
        CoverageVariant::Unrecognized => Ok(HashSet::new()),
        CoverageVariant::Builtin => {
            // Delegated to the engine. A device the engine does not consider
            // a sprinkler has no radius and waters nothing.
            let tiles = device
                .sprinkler_radius
                .map(|radius| builtin_coverage(device.tile(), radius))
                .unwrap_or_default();
            Ok(tiles.into_iter().collect())
        }
        CoverageVariant::DirectionalLine => {
            Ok(line_coverage(device.tile(), traits.orientation, traits.tier))
        }
        CoverageVariant::OffsetTable => {
            // Presence is guaranteed by classification; an absent provider
            // resolves to no coverage rather than panicking.
            let Some(table) = caps.offset_table() else {
                return Ok(HashSet::new());
            };
            let offsets = table.coverage_offsets();
            let Some(entries) = offsets.get(&device.kind) else {
                return Err(CoverageError::UnknownDeviceKind(device.kind));
            };
            Ok(entries.iter().map(|offset| device.tile() + *offset).collect())
        }
        CoverageVariant::PointQuery => {
            let Some(api) = caps.point_query() else {
                return Ok(HashSet::new());
            };
            let tiles = api
                .coverage_from(device.tile())
                .map_err(CoverageError::ProviderFailure)?;
            Ok(tiles.into_iter().collect())
        }
    }
}

/// Explicit geometry for line sprinklers.
///
/// Walk a cursor from the device's own cell exactly `range` cumulative steps
/// in the orientation's unit direction, emitting each visited cell. The
/// origin is never included. A name without an orientation marker waters
/// nothing; a name without a tier marker uses the base range.
pub fn line_coverage(
    origin: IVec2,
    orientation: Option<LineOrientation>,
    tier: SprinklerTier,
) -> HashSet<IVec2> {
    let Some(orientation) = orientation else {
        return HashSet::new();
    };
    let step = orientation.step();
    let mut cursor = origin;
    let mut tiles = HashSet::with_capacity(tier.line_range() as usize);
    for _ in 0..tier.line_range() {
        cursor += step;
        tiles.insert(cursor);
    }
    tiles
}
