//! Map view types for 2D grid rendering.

use std::collections::BTreeSet;

use game_core::{Position, ResourceKind, Snapshot, TileKind, Unit, UnitId, UnitKind, UnitRegistry};

use crate::config::OverlayConfig;

/// 2D map view optimized for grid rendering.
#[derive(Clone, Debug)]
pub struct MapView {
    pub width: u32,
    pub height: u32,
    /// Tiles in row-major order, Y-reversed (top row first for rendering).
    pub tiles: Vec<Vec<TileView>>,
}

impl MapView {
    /// `units` should carry projected selection flags; `highlighted` is the
    /// selected unit's reachable set.
    pub fn build(
        snapshot: &Snapshot,
        units: &UnitRegistry,
        highlighted: &BTreeSet<Position>,
        overlay: &OverlayConfig,
    ) -> Self {
        let dimensions = snapshot.grid.dimensions();
        let mut tiles = Vec::with_capacity(dimensions.height as usize);

        // Iterate Y in reverse for top-to-bottom rendering
        for y in (0..dimensions.height as i32).rev() {
            let mut row = Vec::with_capacity(dimensions.width as usize);
            for x in 0..dimensions.width as i32 {
                let position = Position::new(x, y);
                let kind = snapshot.grid.kind_at(position);
                row.push(TileView {
                    position,
                    kind,
                    resource: overlay.show_resources.then(|| kind.resource()).flatten(),
                    highlighted: highlighted.contains(&position),
                    unit: units.unit_at(position).map(UnitView::from),
                });
            }
            tiles.push(row);
        }

        Self {
            width: dimensions.width,
            height: dimensions.height,
            tiles,
        }
    }

    pub fn tile(&self, position: Position) -> Option<&TileView> {
        let row = (self.height as i32).checked_sub(position.y + 1)?;
        self.tiles
            .get(usize::try_from(row).ok()?)?
            .get(usize::try_from(position.x).ok()?)
    }
}

/// Single tile in the map view.
#[derive(Clone, Debug)]
pub struct TileView {
    pub position: Position,
    pub kind: TileKind,
    pub resource: Option<ResourceKind>,
    pub highlighted: bool,
    pub unit: Option<UnitView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub health: u32,
    pub movement_range: u32,
    pub is_selected: bool,
    pub is_npc: bool,
}

impl From<&Unit> for UnitView {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            kind: unit.kind,
            health: unit.health,
            movement_range: unit.movement_range,
            is_selected: unit.is_selected,
            is_npc: unit.is_npc,
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::{GridModel, MapDimensions, RangeCalculator, Tile};

    use super::*;

    fn snapshot() -> Snapshot {
        let grid = GridModel::from_tiles(
            MapDimensions::new(4, 3),
            [
                Tile::new(0, 0, TileKind::Forest),
                Tile::new(3, 2, TileKind::Mountains),
            ],
        );
        let units = UnitRegistry::new([
            Unit::new(UnitId(1), Position::new(1, 1), UnitKind::Scout).with_movement_range(1),
        ])
        .unwrap();
        Snapshot::new(0, grid, units)
    }

    #[test]
    fn rows_are_top_first() {
        let snapshot = snapshot();
        let map = MapView::build(
            &snapshot,
            &snapshot.units,
            &BTreeSet::new(),
            &OverlayConfig::default(),
        );

        assert_eq!(map.tiles.len(), 3);
        assert_eq!(map.tiles[0][3].kind, TileKind::Mountains);
        assert_eq!(map.tiles[2][0].resource, Some(ResourceKind::Lumber));
        assert_eq!(map.tile(Position::new(3, 2)).unwrap().position, Position::new(3, 2));
        assert!(map.tile(Position::new(4, 0)).is_none());
    }

    #[test]
    fn highlight_and_unit_overlay() {
        let snapshot = snapshot();
        let unit = snapshot.unit_by_id(UnitId(1)).unwrap();
        let reachable = RangeCalculator::reachable_from(unit, &snapshot);
        let projected = snapshot.units.project_selection(Some(UnitId(1)));
        let overlay = OverlayConfig {
            show_resources: false,
        };

        let map = MapView::build(&snapshot, &projected, &reachable, &overlay);

        let origin = map.tile(Position::new(1, 1)).unwrap();
        assert!(origin.unit.as_ref().unwrap().is_selected);
        assert!(!origin.highlighted);
        assert!(map.tile(Position::new(1, 2)).unwrap().highlighted);
        assert_eq!(map.tile(Position::new(0, 0)).unwrap().resource, None);
    }
}
