use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::{Position, UnitId};
use crate::action::combat;

/// Closed set of unit kinds. Capabilities live in static tables keyed by
/// kind (see [`combat::ATTACK_CAPABLE`]), not in the type hierarchy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitKind {
    Settler,
    Worker,
    Scout,
    Warrior,
    Swordsman,
    Archer,
    Barbarian,
}

impl UnitKind {
    /// Whether units of this kind may initiate an attack.
    pub fn can_attack(self) -> bool {
        combat::ATTACK_CAPABLE.contains(&self)
    }
}

/// A unit as reported by the ledger snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub x: i32,
    pub y: i32,
    #[cfg_attr(feature = "serde", serde(rename = "unit_kind"))]
    pub kind: UnitKind,
    pub health: u32,
    pub movement_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_selected: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_npc: bool,
}

impl Unit {
    pub fn new(id: UnitId, position: Position, kind: UnitKind) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            kind,
            health: 100,
            movement_range: 0,
            is_selected: false,
            is_npc: false,
        }
    }

    /// Convenience constructor for an NPC unit.
    pub fn npc(id: UnitId, position: Position, kind: UnitKind) -> Self {
        Self::new(id, position, kind).as_npc()
    }

    #[must_use]
    pub fn with_movement_range(mut self, movement_range: u32) -> Self {
        self.movement_range = movement_range;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    #[must_use]
    pub fn as_npc(mut self) -> Self {
        self.is_npc = true;
        self.is_selected = false;
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn is_player_owned(&self) -> bool {
        !self.is_npc
    }

    pub fn is_at(&self, position: Position) -> bool {
        self.x == position.x && self.y == position.y
    }
}
