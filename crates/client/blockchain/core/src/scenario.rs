//! Scenario files: the initial ledger state as JSON.
//!
//! ```json
//! {
//!   "name": "mountain pass",
//!   "width": 20,
//!   "height": 20,
//!   "default_tile": "plains",
//!   "tiles": [{ "x": 3, "y": 4, "kind": "mountains" }],
//!   "units": [{ "id": 1, "x": 2, "y": 2, "unit_kind": "warrior",
//!               "health": 100, "movement_range": 3 }]
//! }
//! ```

use std::path::{Path, PathBuf};

use game_core::{
    GameConfig, GridModel, MapDimensions, Position, RegistryError, Snapshot, Tile, TileKind,
    Unit, UnitId, UnitKind, UnitRegistry,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid unit layout: {0}")]
    Units(#[from] RegistryError),

    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyMap { width: u32, height: u32 },

    #[error("map {width}x{height} exceeds the {max}-tile side limit")]
    MapTooLarge { width: u32, height: u32, max: u32 },

    #[error("unit {unit} at {position} is outside the {width}x{height} map")]
    UnitOutOfBounds {
        unit: UnitId,
        position: Position,
        width: u32,
        height: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_tile")]
    pub default_tile: TileKind,
    #[serde(default)]
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub units: Vec<Unit>,
}

fn default_width() -> u32 {
    GameConfig::GRID_WIDTH
}

fn default_height() -> u32 {
    GameConfig::GRID_HEIGHT
}

fn default_tile() -> TileKind {
    TileKind::Plains
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), name = %scenario.name, "loaded scenario");
        Ok(scenario)
    }

    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dimensions(&self) -> MapDimensions {
        MapDimensions::new(self.width, self.height)
    }

    /// Builds the version-0 snapshot. Selection flags in the file are dropped;
    /// selection is client-local.
    ///
    /// Every unit must stand inside the map. Tiles outside it are ignored.
    pub fn into_snapshot(self) -> Result<Snapshot, ScenarioError> {
        if self.width == 0 || self.height == 0 {
            return Err(ScenarioError::EmptyMap {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > GameConfig::MAX_MAP_SIDE || self.height > GameConfig::MAX_MAP_SIDE {
            return Err(ScenarioError::MapTooLarge {
                width: self.width,
                height: self.height,
                max: GameConfig::MAX_MAP_SIDE,
            });
        }

        let dimensions = self.dimensions();
        if let Some(unit) = self.units.iter().find(|u| !dimensions.contains(u.position())) {
            return Err(ScenarioError::UnitOutOfBounds {
                unit: unit.id,
                position: unit.position(),
                width: self.width,
                height: self.height,
            });
        }
        for tile in self.tiles.iter().filter(|t| !dimensions.contains(t.position())) {
            tracing::warn!(x = tile.x, y = tile.y, "scenario tile outside map, ignored");
        }
        let base = GridModel::filled(dimensions, self.default_tile);
        let grid = GridModel::from_tiles(dimensions, base.tiles().chain(self.tiles));
        let units = UnitRegistry::new(self.units)?.cleared_selection();

        Ok(Snapshot::new(0, grid, units))
    }

    /// Small built-in map split by a mountain ridge with a two-tile pass.
    pub fn demo() -> Self {
        let mut tiles = Vec::new();
        for y in 0..20 {
            if y != 9 && y != 10 {
                tiles.push(Tile::new(10, y, TileKind::Mountains));
            }
        }
        for (x, y) in [(3, 3), (4, 3), (3, 4), (15, 15), (16, 15)] {
            tiles.push(Tile::new(x, y, TileKind::Forest));
        }
        for (x, y) in [(6, 14), (7, 14)] {
            tiles.push(Tile::new(x, y, TileKind::Field));
        }
        for (x, y) in [(12, 5), (13, 5), (12, 6)] {
            tiles.push(Tile::new(x, y, TileKind::Rocks));
        }
        tiles.push(Tile::new(16, 4, TileKind::StoneQuarry));
        tiles.push(Tile::new(2, 17, TileKind::Village));
        tiles.push(Tile::new(17, 2, TileKind::Empty));

        let units = vec![
            Unit::new(UnitId(1), Position::new(4, 5), UnitKind::Warrior).with_movement_range(3),
            Unit::new(UnitId(2), Position::new(6, 8), UnitKind::Archer).with_movement_range(2),
            Unit::new(UnitId(3), Position::new(3, 15), UnitKind::Settler).with_movement_range(1),
            Unit::new(UnitId(4), Position::new(8, 12), UnitKind::Scout).with_movement_range(5),
            Unit::npc(UnitId(100), Position::new(7, 6), UnitKind::Barbarian),
            Unit::npc(UnitId(101), Position::new(14, 9), UnitKind::Barbarian).with_health(60),
        ];

        Self {
            name: "mountain pass".to_string(),
            width: GameConfig::GRID_WIDTH,
            height: GameConfig::GRID_HEIGHT,
            default_tile: TileKind::Plains,
            tiles,
            units,
        }
    }
}
