//! Reachability under a uniform-cost Manhattan budget.
//!
//! Each candidate is judged on its own: terrain vetoes a destination, never
//! the cells in between, and occupancy plays no part here (the resolver deals
//! with occupied tiles).

use std::collections::BTreeSet;

use crate::state::{GridModel, Position, Snapshot, Unit};

pub struct RangeCalculator;

impl RangeCalculator {
    /// All in-bounds coordinates a unit at `origin` with `budget` movement may
    /// target. Never contains `origin` itself.
    pub fn reachable(origin: Position, budget: u32, grid: &GridModel) -> BTreeSet<Position> {
        let dimensions = grid.dimensions();
        // Anything past width + height cannot add in-bounds cells.
        let budget = i64::from(budget).min(i64::from(dimensions.width) + i64::from(dimensions.height));

        let mut reachable = BTreeSet::new();
        for dy in -budget..=budget {
            let remaining = budget - dy.abs();
            for dx in -remaining..=remaining {
                let (Ok(x), Ok(y)) = (
                    i32::try_from(i64::from(origin.x) + dx),
                    i32::try_from(i64::from(origin.y) + dy),
                ) else {
                    continue;
                };
                let candidate = Position::new(x, y);
                if candidate != origin
                    && grid.contains(candidate)
                    && !grid.kind_at(candidate).is_blocking()
                {
                    reachable.insert(candidate);
                }
            }
        }
        reachable
    }

    /// Membership test equivalent to `reachable(origin, budget, grid).contains(&target)`.
    pub fn is_reachable(origin: Position, budget: u32, target: Position, grid: &GridModel) -> bool {
        target != origin
            && origin.manhattan(target) <= budget
            && grid.contains(target)
            && !grid.kind_at(target).is_blocking()
    }

    /// Reachable set for `unit` using its own movement range.
    pub fn reachable_from(unit: &Unit, snapshot: &Snapshot) -> BTreeSet<Position> {
        Self::reachable(unit.position(), unit.movement_range, &snapshot.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MapDimensions, Tile, TileKind};

    fn plains() -> GridModel {
        GridModel::filled(MapDimensions::new(20, 20), TileKind::Plains)
    }

    #[test]
    fn never_contains_origin() {
        let grid = plains();
        for budget in 0..6 {
            let set = RangeCalculator::reachable(Position::new(5, 5), budget, &grid);
            assert!(!set.contains(&Position::new(5, 5)), "budget {budget}");
        }
    }

    #[test]
    fn zero_budget_is_empty() {
        assert!(RangeCalculator::reachable(Position::new(3, 3), 0, &plains()).is_empty());
    }

    #[test]
    fn open_field_is_a_full_diamond() {
        // 2r(r+1) cells within distance r, excluding the centre.
        let set = RangeCalculator::reachable(Position::new(10, 10), 3, &plains());
        assert_eq!(set.len(), 24);
        assert!(set.iter().all(|p| p.manhattan(Position::new(10, 10)) <= 3));
    }

    #[test]
    fn completeness_against_brute_force() {
        let grid = plains()
            .with_tile(Tile::new(4, 5, TileKind::Mountains))
            .with_tile(Tile::new(5, 7, TileKind::Village))
            .with_tile(Tile::new(6, 6, TileKind::Forest));
        let origin = Position::new(5, 5);
        let budget = 4;

        let expected: BTreeSet<_> = grid
            .tiles()
            .filter(|tile| {
                let p = tile.position();
                p != origin && p.manhattan(origin) <= budget && !tile.kind.is_blocking()
            })
            .map(|tile| tile.position())
            .collect();

        assert_eq!(RangeCalculator::reachable(origin, budget, &grid), expected);
    }

    #[test]
    fn blocking_tiles_excluded_but_do_not_block_transit() {
        // A ring of mountains around the origin does not hide the cells behind it.
        let mut grid = plains();
        for (x, y) in [(4, 5), (6, 5), (5, 4), (5, 6)] {
            grid = grid.with_tile(Tile::new(x, y, TileKind::Mountains));
        }

        let set = RangeCalculator::reachable(Position::new(5, 5), 2, &grid);

        assert!(!set.contains(&Position::new(6, 5)));
        assert!(set.contains(&Position::new(7, 5)));
        assert!(set.contains(&Position::new(5, 3)));
    }

    #[test]
    fn clipped_to_grid_bounds() {
        let set = RangeCalculator::reachable(Position::new(0, 0), 2, &plains());
        assert_eq!(set.len(), 5);
        assert!(set.iter().all(|p| p.x >= 0 && p.y >= 0));
    }

    #[test]
    fn huge_budget_covers_whole_board() {
        let set = RangeCalculator::reachable(Position::new(0, 0), u32::MAX, &plains());
        assert_eq!(set.len(), 20 * 20 - 1);
    }

    #[test]
    fn membership_agrees_with_set() {
        let grid = plains().with_tile(Tile::new(6, 5, TileKind::Village));
        let origin = Position::new(5, 5);
        let set = RangeCalculator::reachable(origin, 3, &grid);

        for tile in grid.tiles() {
            assert_eq!(
                RangeCalculator::is_reachable(origin, 3, tile.position(), &grid),
                set.contains(&tile.position()),
                "{}",
                tile.position()
            );
        }
    }
}
