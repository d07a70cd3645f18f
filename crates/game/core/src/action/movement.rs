use crate::action::IntentTransition;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, Snapshot, Unit, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is not player-owned")]
    NpcActor(UnitId),

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is the unit's own tile")]
    SameTile { destination: Position },

    #[error("destination {destination} is {distance} tiles away, budget is {budget}")]
    OutOfRange {
        destination: Position,
        distance: u32,
        budget: u32,
    },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("destination {destination} is occupied by {occupant}")]
    Occupied {
        destination: Position,
        occupant: UnitId,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Occupied { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "MOVE_UNIT_NOT_FOUND",
            Self::NpcActor(_) => "MOVE_NPC_ACTOR",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::SameTile { .. } => "MOVE_SAME_TILE",
            Self::OutOfRange { .. } => "MOVE_OUT_OF_RANGE",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::Occupied { .. } => "MOVE_OCCUPIED",
        }
    }
}

/// Request to relocate a player-owned unit to a destination tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveIntent {
    pub unit: UnitId,
    pub to: Position,
}

impl MoveIntent {
    pub fn new(unit: UnitId, to: Position) -> Self {
        Self { unit, to }
    }

    fn mover<'a>(&self, snapshot: &'a Snapshot) -> Result<&'a Unit, MoveError> {
        let unit = snapshot
            .unit_by_id(self.unit)
            .ok_or(MoveError::UnitNotFound(self.unit))?;
        if unit.is_npc {
            return Err(MoveError::NpcActor(self.unit));
        }
        Ok(unit)
    }
}

impl IntentTransition for MoveIntent {
    type Error = MoveError;

    fn actor(&self) -> UnitId {
        self.unit
    }

    fn pre_validate(&self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        let unit = self.mover(snapshot)?;
        let destination = self.to;

        if !snapshot.grid.contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if unit.is_at(destination) {
            return Err(MoveError::SameTile { destination });
        }

        let distance = unit.position().manhattan(destination);
        if distance > unit.movement_range {
            return Err(MoveError::OutOfRange {
                destination,
                distance,
                budget: unit.movement_range,
            });
        }

        if snapshot.tile_at(destination).kind.is_blocking() {
            return Err(MoveError::Blocked { destination });
        }

        if let Some(occupant) = snapshot.unit_at(destination) {
            return Err(MoveError::Occupied {
                destination,
                occupant: occupant.id,
            });
        }

        Ok(())
    }

    fn apply(&self, snapshot: &Snapshot) -> Result<Snapshot, Self::Error> {
        let unit = self.mover(snapshot)?;
        let distance = unit.position().manhattan(self.to);

        let mut moved = unit.clone();
        moved.x = self.to.x;
        moved.y = self.to.y;
        moved.movement_range = moved.movement_range.saturating_sub(distance);

        Ok(Snapshot::new(
            snapshot.version + 1,
            snapshot.grid.clone(),
            snapshot.units.replaced(self.unit, Some(moved)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GridModel, TileKind, UnitKind, UnitRegistry};

    fn snapshot(units: Vec<Unit>) -> Snapshot {
        Snapshot::new(0, GridModel::default(), UnitRegistry::new(units).unwrap())
    }

    fn warrior_at(x: i32, y: i32, range: u32) -> Unit {
        Unit::new(UnitId(1), Position::new(x, y), UnitKind::Warrior).with_movement_range(range)
    }

    #[test]
    fn valid_move_spends_distance() {
        let state = snapshot(vec![warrior_at(5, 5, 3)]);
        let intent = MoveIntent::new(UnitId(1), Position::new(6, 7));

        let next = intent.transition(&state).unwrap();
        let unit = next.unit_by_id(UnitId(1)).unwrap();

        assert_eq!(unit.position(), Position::new(6, 7));
        assert_eq!(unit.movement_range, 0);
        assert_eq!(next.version, 1);
        assert_eq!(state.unit_by_id(UnitId(1)).unwrap().position(), Position::new(5, 5));
    }

    #[test]
    fn rejects_destination_beyond_budget() {
        let state = snapshot(vec![warrior_at(5, 5, 3)]);
        let err = MoveIntent::new(UnitId(1), Position::new(5, 9))
            .pre_validate(&state)
            .unwrap_err();

        assert_eq!(
            err,
            MoveError::OutOfRange {
                destination: Position::new(5, 9),
                distance: 4,
                budget: 3
            }
        );
    }

    #[test]
    fn rejects_blocking_destination() {
        let mut state = snapshot(vec![warrior_at(5, 5, 5)]);
        state.grid = state.grid.with_tile(crate::state::Tile::new(6, 5, TileKind::Village));

        let err = MoveIntent::new(UnitId(1), Position::new(6, 5))
            .pre_validate(&state)
            .unwrap_err();
        assert_eq!(err.error_code(), "MOVE_BLOCKED");
    }

    #[test]
    fn rejects_occupied_destination() {
        let other = Unit::npc(UnitId(2), Position::new(5, 6), UnitKind::Barbarian);
        let state = snapshot(vec![warrior_at(5, 5, 2), other]);

        let err = MoveIntent::new(UnitId(1), Position::new(5, 6))
            .pre_validate(&state)
            .unwrap_err();
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn rejects_npc_mover() {
        let npc = Unit::npc(UnitId(1), Position::new(0, 0), UnitKind::Barbarian)
            .with_movement_range(4);
        let state = snapshot(vec![npc]);

        let err = MoveIntent::new(UnitId(1), Position::new(1, 0))
            .pre_validate(&state)
            .unwrap_err();
        assert_eq!(err, MoveError::NpcActor(UnitId(1)));
    }
}
