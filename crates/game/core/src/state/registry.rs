//! Unit lookup by id and by coordinate over one snapshot.

use super::{Position, Unit, UnitId};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unit id {0} appears more than once")]
    DuplicateId(UnitId),

    #[error("units {first} and {second} both occupy {position}")]
    Stacked {
        first: UnitId,
        second: UnitId,
        position: Position,
    },

    #[error("units {first} and {second} are both flagged as selected")]
    MultipleSelected { first: UnitId, second: UnitId },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "REGISTRY_DUPLICATE_ID",
            Self::Stacked { .. } => "REGISTRY_STACKED",
            Self::MultipleSelected { .. } => "REGISTRY_MULTIPLE_SELECTED",
        }
    }
}

/// Snapshot-ordered collection of units.
///
/// Invariants upheld by every constructor: ids are unique, no two units share
/// a coordinate, NPC units are never flagged selected, and at most one
/// player-owned unit is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Unit>", into = "Vec<Unit>")
)]
pub struct UnitRegistry {
    units: Vec<Unit>,
}

impl UnitRegistry {
    pub fn new(units: impl IntoIterator<Item = Unit>) -> Result<Self, RegistryError> {
        let mut accepted: Vec<Unit> = Vec::new();
        let mut selected: Option<UnitId> = None;

        for mut unit in units {
            if let Some(existing) = accepted.iter().find(|other| other.id == unit.id) {
                return Err(RegistryError::DuplicateId(existing.id));
            }
            if let Some(existing) = accepted.iter().find(|other| other.is_at(unit.position())) {
                return Err(RegistryError::Stacked {
                    first: existing.id,
                    second: unit.id,
                    position: unit.position(),
                });
            }

            if unit.is_npc {
                unit.is_selected = false;
            } else if unit.is_selected {
                if let Some(first) = selected {
                    return Err(RegistryError::MultipleSelected {
                        first,
                        second: unit.id,
                    });
                }
                selected = Some(unit.id);
            }

            accepted.push(unit);
        }

        Ok(Self { units: accepted })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.is_at(position))
    }

    pub fn unit_by_id(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The player-owned unit whose selection flag is set, if any.
    pub fn flagged_selection(&self) -> Option<UnitId> {
        self.units
            .iter()
            .find(|unit| unit.is_player_owned() && unit.is_selected)
            .map(|unit| unit.id)
    }

    /// Returns a registry where `id` carries the requested flag and every
    /// other player-owned unit is cleared, in a single step.
    ///
    /// NPC units stay unselected regardless of the request.
    #[must_use]
    pub fn with_selection(&self, id: UnitId, selected: bool) -> Self {
        let units = self
            .units
            .iter()
            .cloned()
            .map(|mut unit| {
                unit.is_selected = unit.id == id && selected && unit.is_player_owned();
                unit
            })
            .collect();
        Self { units }
    }

    /// Returns a registry whose flags mirror `selection` exactly.
    #[must_use]
    pub fn project_selection(&self, selection: Option<UnitId>) -> Self {
        match selection {
            Some(id) => self.with_selection(id, true),
            None => self.cleared_selection(),
        }
    }

    #[must_use]
    pub fn cleared_selection(&self) -> Self {
        let units = self
            .units
            .iter()
            .cloned()
            .map(|mut unit| {
                unit.is_selected = false;
                unit
            })
            .collect();
        Self { units }
    }

    /// Returns a registry with `unit` replaced (matched by id) or removed.
    ///
    /// Used by authorities that produce the next snapshot; the caller is
    /// responsible for not introducing stacked units.
    pub(crate) fn replaced(&self, id: UnitId, unit: Option<Unit>) -> Self {
        let units = self
            .units
            .iter()
            .filter_map(|existing| {
                if existing.id == id {
                    unit.clone()
                } else {
                    Some(existing.clone())
                }
            })
            .collect();
        Self { units }
    }
}

impl TryFrom<Vec<Unit>> for UnitRegistry {
    type Error = RegistryError;

    fn try_from(units: Vec<Unit>) -> Result<Self, Self::Error> {
        Self::new(units)
    }
}

impl From<UnitRegistry> for Vec<Unit> {
    fn from(registry: UnitRegistry) -> Self {
        registry.units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UnitKind;

    fn warrior(id: u32, x: i32, y: i32) -> Unit {
        Unit::new(UnitId(id), Position::new(x, y), UnitKind::Warrior).with_movement_range(3)
    }

    #[test]
    fn lookups_by_id_and_position() {
        let registry = UnitRegistry::new([warrior(1, 5, 5), warrior(2, 7, 7)]).unwrap();

        assert_eq!(registry.unit_by_id(UnitId(2)).map(Unit::position), Some(Position::new(7, 7)));
        assert_eq!(registry.unit_at(Position::new(5, 5)).map(|u| u.id), Some(UnitId(1)));
        assert!(registry.unit_at(Position::new(6, 6)).is_none());
        assert!(registry.unit_by_id(UnitId(9)).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = UnitRegistry::new([warrior(1, 0, 0), warrior(1, 1, 0)]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(UnitId(1)));
    }

    #[test]
    fn rejects_stacked_units() {
        let err = UnitRegistry::new([warrior(1, 2, 2), warrior(2, 2, 2)]).unwrap_err();
        assert!(matches!(err, RegistryError::Stacked { first: UnitId(1), second: UnitId(2), .. }));
    }

    #[test]
    fn rejects_two_selected_player_units() {
        let err =
            UnitRegistry::new([warrior(1, 0, 0).selected(), warrior(2, 1, 1).selected()])
                .unwrap_err();
        assert!(matches!(err, RegistryError::MultipleSelected { .. }));
    }

    #[test]
    fn normalizes_npc_selection_flag() {
        let mut npc = warrior(4, 3, 3).as_npc();
        npc.is_selected = true;
        let registry = UnitRegistry::new([npc]).unwrap();

        assert!(!registry.unit_by_id(UnitId(4)).unwrap().is_selected);
    }

    #[test]
    fn with_selection_clears_every_other_player_unit() {
        let registry = UnitRegistry::new([
            warrior(1, 0, 0).selected(),
            warrior(2, 1, 1),
            warrior(3, 2, 2).as_npc(),
        ])
        .unwrap();

        let updated = registry.with_selection(UnitId(2), true);

        assert!(!updated.unit_by_id(UnitId(1)).unwrap().is_selected);
        assert!(updated.unit_by_id(UnitId(2)).unwrap().is_selected);
        assert_eq!(updated.flagged_selection(), Some(UnitId(2)));
        // Original snapshot is untouched.
        assert_eq!(registry.flagged_selection(), Some(UnitId(1)));
    }

    #[test]
    fn with_selection_never_flags_npc() {
        let registry = UnitRegistry::new([warrior(1, 0, 0).selected(), warrior(3, 2, 2).as_npc()])
            .unwrap();

        let updated = registry.with_selection(UnitId(3), true);

        assert_eq!(updated.flagged_selection(), None);
        assert!(updated.all_units().all(|unit| !unit.is_selected));
    }

    #[test]
    fn project_selection_none_clears_flags() {
        let registry = UnitRegistry::new([warrior(1, 0, 0).selected()]).unwrap();
        assert_eq!(registry.project_selection(None).flagged_selection(), None);
    }
}
