//! Static tile layout for one snapshot.
//!
//! The grid is logically total over its bounded domain: any coordinate the
//! backing data does not cover resolves to [`TileKind::DEFAULT`].

use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::Position;
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `position`, or `None` outside the bounds.
    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

impl Default for MapDimensions {
    fn default() -> Self {
        GameConfig::DIMENSIONS
    }
}

/// Terrain or feature category of a grid cell.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TileKind {
    Plains,
    Forest,
    Field,
    Rocks,
    Mountains,
    Village,
    StoneQuarry,
    Empty,
}

impl TileKind {
    /// Kind synthesized for coordinates missing from a snapshot.
    pub const DEFAULT: Self = Self::Empty;

    /// Kinds that can never be entered or targeted as a movement destination.
    pub const BLOCKING: [TileKind; 2] = [TileKind::Village, TileKind::Mountains];

    pub fn is_blocking(self) -> bool {
        Self::BLOCKING.contains(&self)
    }

    /// Resource yielded by this tile, for informational overlays only.
    pub fn resource(self) -> Option<ResourceKind> {
        match self {
            TileKind::Forest => Some(ResourceKind::Lumber),
            TileKind::Field => Some(ResourceKind::Food),
            TileKind::Rocks => Some(ResourceKind::Stone),
            _ => None,
        }
    }
}

impl Default for TileKind {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    Lumber,
    Food,
    Stone,
}

/// A single cell as seen by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
}

impl Tile {
    pub const fn new(x: i32, y: i32, kind: TileKind) -> Self {
        Self { x, y, kind }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Immutable map of coordinate to tile kind.
///
/// Stored densely in row-major order. A backing vector shorter than the
/// dimensions (a snapshot with holes) is tolerated; lookups past its end fall
/// back to the default kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridModel {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
}

impl GridModel {
    /// Grid of the given size where every cell has `kind`.
    pub fn filled(dimensions: MapDimensions, kind: TileKind) -> Self {
        Self {
            dimensions,
            tiles: vec![kind; dimensions.area()],
        }
    }

    /// Builds a grid from sparse tiles; uncovered cells get the default kind.
    ///
    /// Tiles outside the bounds are ignored. When a coordinate appears more
    /// than once the last entry wins.
    pub fn from_tiles(dimensions: MapDimensions, tiles: impl IntoIterator<Item = Tile>) -> Self {
        let mut grid = Self::filled(dimensions, TileKind::DEFAULT);
        for tile in tiles {
            match dimensions.index(tile.position()) {
                Some(index) => grid.tiles[index] = tile.kind,
                None => tracing::debug!("ignoring out-of-bounds tile at {}", tile.position()),
            }
        }
        grid
    }

    /// Returns a copy with one cell changed.
    #[must_use]
    pub fn with_tile(&self, tile: Tile) -> Self {
        Self::from_tiles(self.dimensions, self.tiles().chain(std::iter::once(tile)))
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    /// Tile at `position`. Never fails; holes yield the default kind.
    pub fn tile_at(&self, position: Position) -> Tile {
        let kind = self
            .dimensions
            .index(position)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(TileKind::DEFAULT);
        Tile::new(position.x, position.y, kind)
    }

    pub fn kind_at(&self, position: Position) -> TileKind {
        self.tile_at(position).kind
    }

    pub fn is_blocking(kind: TileKind) -> bool {
        kind.is_blocking()
    }

    pub fn resource_of(kind: TileKind) -> Option<ResourceKind> {
        kind.resource()
    }

    /// Every in-bounds tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let width = self.dimensions.width as i32;
        let height = self.dimensions.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| self.tile_at(Position::new(x, y))))
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::filled(GameConfig::DIMENSIONS, TileKind::Plains)
    }
}
