//! Optional coverage capability providers.
//!
//! Content packs can extend sprinkler coverage. The host registers whatever
//! packs are installed in a [`ProviderDirectory`] before startup; a one-time
//! detection pass turns that into an immutable [`CoverageCapabilities`] value
//! that the classifier and resolver read for the rest of the process. Partial
//! availability is normal: any subset of the three providers may be present.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;

/// Fixed identifier of the line-sprinklers pack (presence-only: it has no
/// callable interface, line coverage is computed locally).
pub const LINE_PROVIDER_ID: &str = "line-sprinklers";

/// Fixed identifier of the radiant-tools pack (point-query interface).
pub const POINT_PROVIDER_ID: &str = "radiant-tools";

/// Fixed identifier of the coverage-tuner pack (offset-table interface).
pub const OFFSET_PROVIDER_ID: &str = "coverage-tuner";

/// Coverage interface of the offset-table provider: a zero-argument query
/// returning the full mapping from device kind id to relative tile offsets.
pub trait OffsetTableApi: Send + Sync {
    fn coverage_offsets(&self) -> HashMap<u32, Vec<IVec2>>;
}

/// Coverage interface of the point-query provider: absolute device tile in,
/// absolute covered tiles out. The call is a blocking synchronous query;
/// failures are opaque to the caller.
pub trait PointQueryApi: Send + Sync {
    fn coverage_from(&self, origin: IVec2) -> Result<Vec<IVec2>, String>;
}

/// Handle the host registers for one installed pack.
#[derive(Clone)]
pub enum ProviderHandle {
    /// Presence-only pack without a callable interface.
    Marker,
    OffsetTable(Arc<dyn OffsetTableApi>),
    PointQuery(Arc<dyn PointQueryApi>),
}

/// Host-side directory of installed packs, populated before startup.
/// [`detect_capabilities`] reads it exactly once.
#[derive(Resource, Default)]
pub struct ProviderDirectory {
    entries: HashMap<String, ProviderHandle>,
}

impl ProviderDirectory {
    pub fn register(&mut self, id: impl Into<String>, handle: ProviderHandle) {
        self.entries.insert(id.into(), handle);
    }

    pub fn get(&self, id: &str) -> Option<&ProviderHandle> {
        self.entries.get(id)
    }
}

/// What [`CoverageCapabilities::lookup`] returns for a provider id.
#[derive(Clone, Default)]
pub enum CapabilityProvider {
    /// The provider was not detected at startup.
    #[default]
    Absent,
    /// Present, but presence-only (the line pack).
    Marker,
    OffsetTable(Arc<dyn OffsetTableApi>),
    PointQuery(Arc<dyn PointQueryApi>),
}

/// Immutable capability set established once at startup. Detection is never
/// re-run; absence of a provider for the rest of the process is represented
/// here rather than by re-querying the directory.
#[derive(Resource, Clone, Default)]
pub struct CoverageCapabilities {
    line_present: bool,
    offset_table: Option<Arc<dyn OffsetTableApi>>,
    point_query: Option<Arc<dyn PointQueryApi>>,
}

impl CoverageCapabilities {
    /// One-time detection pass over the host directory.
    ///
    /// Each provider is detected independently: an id registered with the
    /// wrong interface is warned about and treated as absent without
    /// affecting the other providers.
    pub fn detect(directory: &ProviderDirectory) -> Self {
        let line_present = directory.get(LINE_PROVIDER_ID).is_some();

        let offset_table = match directory.get(OFFSET_PROVIDER_ID) {
            Some(ProviderHandle::OffsetTable(api)) => Some(api.clone()),
            Some(_) => {
                warn!(
                    "provider '{}' registered with the wrong interface; treating as absent",
                    OFFSET_PROVIDER_ID
                );
                None
            }
            None => None,
        };

        let point_query = match directory.get(POINT_PROVIDER_ID) {
            Some(ProviderHandle::PointQuery(api)) => Some(api.clone()),
            Some(_) => {
                warn!(
                    "provider '{}' registered with the wrong interface; treating as absent",
                    POINT_PROVIDER_ID
                );
                None
            }
            None => None,
        };

        Self {
            line_present,
            offset_table,
            point_query,
        }
    }

    pub fn line_present(&self) -> bool {
        self.line_present
    }

    pub fn offset_table(&self) -> Option<&Arc<dyn OffsetTableApi>> {
        self.offset_table.as_ref()
    }

    pub fn point_query(&self) -> Option<&Arc<dyn PointQueryApi>> {
        self.point_query.as_ref()
    }

    /// Provider by fixed id. Unknown ids and undetected providers are
    /// `Absent`; this never fails and never re-queries the host.
    pub fn lookup(&self, id: &str) -> CapabilityProvider {
        match id {
            LINE_PROVIDER_ID if self.line_present => CapabilityProvider::Marker,
            OFFSET_PROVIDER_ID => self
                .offset_table
                .clone()
                .map(CapabilityProvider::OffsetTable)
                .unwrap_or_default(),
            POINT_PROVIDER_ID => self
                .point_query
                .clone()
                .map(CapabilityProvider::PointQuery)
                .unwrap_or_default(),
            _ => CapabilityProvider::Absent,
        }
    }
}

/// Startup system: build [`CoverageCapabilities`] from the host directory.
/// Runs once; a missing directory means no providers at all.
pub fn detect_capabilities(mut commands: Commands, directory: Option<Res<ProviderDirectory>>) {
    let caps = match directory {
        Some(directory) => CoverageCapabilities::detect(&directory),
        None => CoverageCapabilities::default(),
    };
    info!(
        "sprinkler coverage providers: line={} offset-table={} point-query={}",
        caps.line_present(),
        caps.offset_table().is_some(),
        caps.point_query().is_some()
    );
    commands.insert_resource(caps);
}
