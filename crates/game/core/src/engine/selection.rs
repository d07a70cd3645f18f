//! Single-selection state machine.
//!
//! Selection is an explicit `Option<UnitId>` rather than a flag scattered
//! across units. [`SelectionState::project`] derives the per-unit flags for
//! consumers that still expect them.

use crate::engine::Decision;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Snapshot, Unit, UnitId, UnitRegistry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("NPC unit {0} cannot be selected")]
    NpcNotSelectable(UnitId),
}

impl GameError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "SELECTION_UNIT_NOT_FOUND",
            Self::NpcNotSelectable(_) => "SELECTION_NPC",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(UnitId),
}

impl SelectionState {
    pub fn current(&self) -> Option<UnitId> {
        match self {
            Self::NoSelection => None,
            Self::Selected(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: UnitId) -> bool {
        self.current() == Some(id)
    }

    /// State after selecting `unit`, without committing it.
    ///
    /// Selecting the current unit toggles it off; selecting another
    /// player-owned unit replaces the selection in one step.
    pub fn next(&self, unit: &Unit) -> Result<SelectionState, SelectionError> {
        if unit.is_npc {
            return Err(SelectionError::NpcNotSelectable(unit.id));
        }
        if self.is_selected(unit.id) {
            Ok(Self::NoSelection)
        } else {
            Ok(Self::Selected(unit.id))
        }
    }

    /// Selects `id` from `snapshot`, applying the toggle rules.
    pub fn select(&mut self, id: UnitId, snapshot: &Snapshot) -> Result<(), SelectionError> {
        let unit = snapshot
            .unit_by_id(id)
            .ok_or(SelectionError::UnitNotFound(id))?;
        *self = self.next(unit)?;
        Ok(())
    }

    /// Clears the selection once an intent has been dispatched.
    pub fn commit(&mut self) {
        *self = Self::NoSelection;
    }

    /// Moves to the state implied by a resolver decision.
    pub fn apply(&mut self, decision: &Decision) {
        match decision {
            Decision::Select { unit } => *self = Self::Selected(*unit),
            Decision::Deselect => *self = Self::NoSelection,
            Decision::Move { .. } | Decision::Attack { .. } => self.commit(),
            Decision::NoOp | Decision::Rejected { .. } => {}
        }
    }

    /// Drops a selection that no longer points at a selectable unit.
    ///
    /// Returns the dropped id, if any.
    pub fn reconcile(&mut self, snapshot: &Snapshot) -> Option<UnitId> {
        let id = self.current()?;
        let still_valid = snapshot
            .unit_by_id(id)
            .is_some_and(Unit::is_player_owned);
        if still_valid {
            None
        } else {
            *self = Self::NoSelection;
            Some(id)
        }
    }

    /// Registry whose `is_selected` flags mirror this state.
    pub fn project(&self, registry: &UnitRegistry) -> UnitRegistry {
        registry.project_selection(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GridModel, Position, UnitKind};

    fn snapshot() -> Snapshot {
        let units = UnitRegistry::new([
            Unit::new(UnitId(1), Position::new(1, 1), UnitKind::Warrior),
            Unit::new(UnitId(2), Position::new(2, 2), UnitKind::Archer),
            Unit::npc(UnitId(9), Position::new(3, 3), UnitKind::Barbarian),
        ])
        .unwrap();
        Snapshot::new(0, GridModel::default(), units)
    }

    #[test]
    fn select_toggle_and_replace() {
        let snapshot = snapshot();
        let mut state = SelectionState::default();

        state.select(UnitId(1), &snapshot).unwrap();
        assert_eq!(state, SelectionState::Selected(UnitId(1)));

        state.select(UnitId(2), &snapshot).unwrap();
        assert_eq!(state, SelectionState::Selected(UnitId(2)));

        state.select(UnitId(2), &snapshot).unwrap();
        assert_eq!(state, SelectionState::NoSelection);
    }

    #[test]
    fn npc_selection_is_rejected_and_state_kept() {
        let snapshot = snapshot();
        let mut state = SelectionState::Selected(UnitId(1));

        let err = state.select(UnitId(9), &snapshot).unwrap_err();

        assert_eq!(err, SelectionError::NpcNotSelectable(UnitId(9)));
        assert_eq!(state, SelectionState::Selected(UnitId(1)));
    }

    #[test]
    fn single_selection_holds_over_any_sequence() {
        let snapshot = snapshot();
        let mut state = SelectionState::default();
        let sequence = [1, 2, 9, 2, 1, 1, 9, 42, 2, 2, 1];

        for id in sequence {
            let _ = state.select(UnitId(id), &snapshot);
            let projected = state.project(&snapshot.units);
            let flagged: Vec<_> = projected.all_units().filter(|u| u.is_selected).collect();

            assert!(flagged.len() <= 1);
            assert!(flagged.iter().all(|u| !u.is_npc));
            assert_eq!(projected.flagged_selection(), state.current());
        }
    }

    #[test]
    fn dispatch_commits_selection() {
        let mut state = SelectionState::Selected(UnitId(1));
        state.apply(&Decision::Move {
            unit: UnitId(1),
            to: Position::new(1, 2),
        });
        assert_eq!(state.current(), None);
    }

    #[test]
    fn reconcile_drops_vanished_unit() {
        let snapshot = snapshot();
        let mut state = SelectionState::Selected(UnitId(5));

        assert_eq!(state.reconcile(&snapshot), Some(UnitId(5)));
        assert_eq!(state, SelectionState::NoSelection);

        let mut state = SelectionState::Selected(UnitId(1));
        assert_eq!(state.reconcile(&snapshot), None);
        assert_eq!(state.current(), Some(UnitId(1)));
    }
}
