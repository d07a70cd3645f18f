//! Attack intents and the static combat capability table.

use crate::action::IntentTransition;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Snapshot, Unit, UnitId, UnitKind};

/// Unit kinds allowed to initiate an attack.
///
/// Extending combat to a new kind means editing this table only.
pub const ATTACK_CAPABLE: [UnitKind; 3] = [UnitKind::Warrior, UnitKind::Swordsman, UnitKind::Archer];

/// Damage dealt per attack by each kind. Kinds outside [`ATTACK_CAPABLE`] deal none.
pub const fn attack_power(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::Warrior => 20,
        UnitKind::Swordsman => 30,
        UnitKind::Archer => 15,
        UnitKind::Settler
        | UnitKind::Worker
        | UnitKind::Scout
        | UnitKind::Barbarian => 0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("attacker {0} not found")]
    AttackerNotFound(UnitId),

    #[error("defender {0} not found")]
    DefenderNotFound(UnitId),

    #[error("attacker {0} is not player-owned")]
    NpcAttacker(UnitId),

    #[error("{kind} units cannot attack")]
    NotCapable { kind: UnitKind },

    #[error("defender {0} is not an NPC")]
    FriendlyTarget(UnitId),

    #[error("attacker {0} has no moves left")]
    NoMovesLeft(UnitId),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoMovesLeft(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AttackerNotFound(_) => "ATTACK_ATTACKER_NOT_FOUND",
            Self::DefenderNotFound(_) => "ATTACK_DEFENDER_NOT_FOUND",
            Self::NpcAttacker(_) => "ATTACK_NPC_ATTACKER",
            Self::NotCapable { .. } => "ATTACK_NOT_CAPABLE",
            Self::FriendlyTarget(_) => "ATTACK_FRIENDLY_TARGET",
            Self::NoMovesLeft(_) => "ATTACK_NO_MOVES_LEFT",
        }
    }
}

/// Offensive action by a player-owned unit against an NPC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackIntent {
    pub attacker: UnitId,
    pub defender: UnitId,
}

impl AttackIntent {
    pub fn new(attacker: UnitId, defender: UnitId) -> Self {
        Self { attacker, defender }
    }

    fn participants<'a>(&self, snapshot: &'a Snapshot) -> Result<(&'a Unit, &'a Unit), AttackError> {
        let attacker = snapshot
            .unit_by_id(self.attacker)
            .ok_or(AttackError::AttackerNotFound(self.attacker))?;
        let defender = snapshot
            .unit_by_id(self.defender)
            .ok_or(AttackError::DefenderNotFound(self.defender))?;
        Ok((attacker, defender))
    }
}

impl IntentTransition for AttackIntent {
    type Error = AttackError;

    fn actor(&self) -> UnitId {
        self.attacker
    }

    fn pre_validate(&self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        let (attacker, defender) = self.participants(snapshot)?;

        if attacker.is_npc {
            return Err(AttackError::NpcAttacker(attacker.id));
        }
        if !attacker.kind.can_attack() {
            return Err(AttackError::NotCapable {
                kind: attacker.kind,
            });
        }
        if !defender.is_npc {
            return Err(AttackError::FriendlyTarget(defender.id));
        }
        if attacker.movement_range == 0 {
            return Err(AttackError::NoMovesLeft(attacker.id));
        }

        Ok(())
    }

    fn apply(&self, snapshot: &Snapshot) -> Result<Snapshot, Self::Error> {
        let (attacker, defender) = self.participants(snapshot)?;

        let mut spent = attacker.clone();
        spent.movement_range = 0;

        let health = defender.health.saturating_sub(attack_power(attacker.kind));
        let survivor = (health > 0).then(|| defender.clone().with_health(health));

        let units = snapshot
            .units
            .replaced(self.attacker, Some(spent))
            .replaced(self.defender, survivor);

        Ok(Snapshot::new(snapshot.version + 1, snapshot.grid.clone(), units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GridModel, Position, UnitRegistry};

    fn snapshot(units: Vec<Unit>) -> Snapshot {
        Snapshot::new(7, GridModel::default(), UnitRegistry::new(units).unwrap())
    }

    fn attacker(kind: UnitKind, range: u32) -> Unit {
        Unit::new(UnitId(1), Position::new(5, 5), kind).with_movement_range(range)
    }

    fn barbarian(health: u32) -> Unit {
        Unit::npc(UnitId(2), Position::new(6, 5), UnitKind::Barbarian).with_health(health)
    }

    #[test]
    fn attack_damages_defender_and_spends_moves() {
        let state = snapshot(vec![attacker(UnitKind::Warrior, 2), barbarian(50)]);

        let next = AttackIntent::new(UnitId(1), UnitId(2)).transition(&state).unwrap();

        assert_eq!(next.version, 8);
        assert_eq!(next.unit_by_id(UnitId(2)).unwrap().health, 30);
        assert_eq!(next.unit_by_id(UnitId(1)).unwrap().movement_range, 0);
    }

    #[test]
    fn lethal_attack_removes_defender() {
        let state = snapshot(vec![attacker(UnitKind::Swordsman, 1), barbarian(30)]);

        let next = AttackIntent::new(UnitId(1), UnitId(2)).transition(&state).unwrap();

        assert!(next.unit_by_id(UnitId(2)).is_none());
        assert_eq!(next.units.len(), 1);
    }

    #[test]
    fn gating_rejects_incapable_kind() {
        let state = snapshot(vec![attacker(UnitKind::Scout, 3), barbarian(10)]);
        let err = AttackIntent::new(UnitId(1), UnitId(2))
            .pre_validate(&state)
            .unwrap_err();
        assert_eq!(err, AttackError::NotCapable { kind: UnitKind::Scout });
    }

    #[test]
    fn gating_rejects_exhausted_attacker() {
        let state = snapshot(vec![attacker(UnitKind::Archer, 0), barbarian(10)]);
        let err = AttackIntent::new(UnitId(1), UnitId(2))
            .pre_validate(&state)
            .unwrap_err();
        assert_eq!(err, AttackError::NoMovesLeft(UnitId(1)));
    }

    #[test]
    fn gating_rejects_player_owned_defender() {
        let friend = Unit::new(UnitId(2), Position::new(6, 5), UnitKind::Worker);
        let state = snapshot(vec![attacker(UnitKind::Warrior, 2), friend]);
        let err = AttackIntent::new(UnitId(1), UnitId(2))
            .pre_validate(&state)
            .unwrap_err();
        assert_eq!(err, AttackError::FriendlyTarget(UnitId(2)));
    }

    #[test]
    fn only_capable_kinds_have_attack_power() {
        use strum::IntoEnumIterator;

        for kind in UnitKind::iter() {
            assert_eq!(kind.can_attack(), attack_power(kind) > 0, "{kind}");
        }
    }
}
