//! Snapshot data model: grid, units, and their container.
//!
//! A [`Snapshot`] is produced by the ledger collaborator and treated as the
//! source of truth. The engine only reads it; refreshes replace the whole
//! value.
mod common;
mod grid;
mod registry;
mod unit;

pub use common::{Position, UnitId};
pub use grid::{GridModel, MapDimensions, ResourceKind, Tile, TileKind};
pub use registry::{RegistryError, UnitRegistry};
pub use unit::{Unit, UnitKind};

/// Authoritative grid and unit state at one ledger version.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Monotonic ledger sequence; bumped on every accepted intent.
    pub version: u64,
    pub grid: GridModel,
    pub units: UnitRegistry,
}

impl Snapshot {
    pub fn new(version: u64, grid: GridModel, units: UnitRegistry) -> Self {
        Self {
            version,
            grid,
            units,
        }
    }

    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.units.unit_at(position)
    }

    pub fn unit_by_id(&self, id: UnitId) -> Option<&Unit> {
        self.units.unit_by_id(id)
    }

    pub fn tile_at(&self, position: Position) -> Tile {
        self.grid.tile_at(position)
    }

    /// Whether this snapshot may replace `current` without going backwards.
    pub fn supersedes(&self, current: &Snapshot) -> bool {
        self.version >= current.version
    }
}
