//! Click resolution: decides whether a click moves, attacks, (de)selects, or
//! does nothing.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. a selected unit and an empty reachable tile → [`Decision::Move`]
//! 2. a selected attack-capable unit and an NPC on the tile →
//!    [`Decision::Attack`], or [`RejectReason::NoMovesLeft`]
//! 3. otherwise toggle selection with the unit on the tile, or
//!    [`Decision::NoOp`] if there is none
//!
//! Rules 1 and 2 are refused with [`RejectReason::ActionPending`] while the
//! selected unit already has an intent in flight.

use crate::action::{AttackIntent, Intent, MoveIntent};
use crate::engine::{PendingIntents, RangeCalculator, SelectionState};
use crate::state::{Position, Snapshot, TileKind, Unit, UnitId};

/// Rule-based refusal. An expected outcome shown to the user, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    #[error("no moves left")]
    NoMovesLeft,

    #[error("action pending")]
    ActionPending,

    #[error("dispatch unavailable")]
    DispatchUnavailable,
}

/// Outcome of resolving one click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    Move { unit: UnitId, to: Position },
    Attack { attacker: UnitId, defender: UnitId },
    Select { unit: UnitId },
    Deselect,
    NoOp,
    Rejected { reason: RejectReason },
}

impl Decision {
    pub const fn rejected(reason: RejectReason) -> Self {
        Self::Rejected { reason }
    }

    /// The intent to hand to the ledger, for `Move` and `Attack` only.
    pub fn intent(&self) -> Option<Intent> {
        match *self {
            Decision::Move { unit, to } => Some(MoveIntent::new(unit, to).into()),
            Decision::Attack { attacker, defender } => {
                Some(AttackIntent::new(attacker, defender).into())
            }
            _ => None,
        }
    }

    pub fn is_dispatch(&self) -> bool {
        matches!(self, Decision::Move { .. } | Decision::Attack { .. })
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Decision::Move { .. } => "move",
            Decision::Attack { .. } => "attack",
            Decision::Select { .. } => "select",
            Decision::Deselect => "deselect",
            Decision::NoOp => "no_op",
            Decision::Rejected { .. } => "rejected",
        }
    }
}

/// Pure resolver over one snapshot, the current selection, and the set of
/// units with intents in flight.
#[derive(Clone, Copy, Debug)]
pub struct ActionResolver<'a> {
    snapshot: &'a Snapshot,
    selection: &'a SelectionState,
    pending: &'a PendingIntents,
}

impl<'a> ActionResolver<'a> {
    pub fn new(
        snapshot: &'a Snapshot,
        selection: &'a SelectionState,
        pending: &'a PendingIntents,
    ) -> Self {
        Self {
            snapshot,
            selection,
            pending,
        }
    }

    pub fn resolve(&self, click: Position) -> Decision {
        let decision = self.resolve_inner(click);
        tracing::debug!(
            %click,
            decision = decision.as_snake_case(),
            selection = ?self.selection.current(),
            "resolved click"
        );
        decision
    }

    fn resolve_inner(&self, click: Position) -> Decision {
        if !self.snapshot.grid.contains(click) {
            return Decision::NoOp;
        }
        // Village tiles open the city view upstream.
        if self.snapshot.tile_at(click).kind == TileKind::Village {
            return Decision::NoOp;
        }

        let target = self.snapshot.unit_at(click);

        if let Some(selected) = self.selected_unit() {
            if let Some(decision) = self.unit_action(selected, target, click) {
                return decision;
            }
        }

        self.toggle(target)
    }

    /// The selected unit, if it still exists in this snapshot and is player-owned.
    fn selected_unit(&self) -> Option<&'a Unit> {
        self.selection
            .current()
            .and_then(|id| self.snapshot.unit_by_id(id))
            .filter(|unit| unit.is_player_owned())
    }

    fn unit_action(
        &self,
        selected: &Unit,
        target: Option<&Unit>,
        click: Position,
    ) -> Option<Decision> {
        match target {
            None if RangeCalculator::is_reachable(
                selected.position(),
                selected.movement_range,
                click,
                &self.snapshot.grid,
            ) =>
            {
                Some(self.guard_pending(selected).unwrap_or(Decision::Move {
                    unit: selected.id,
                    to: click,
                }))
            }
            Some(defender) if defender.is_npc && selected.kind.can_attack() => {
                let decision = self.guard_pending(selected).unwrap_or_else(|| {
                    if selected.movement_range == 0 {
                        Decision::rejected(RejectReason::NoMovesLeft)
                    } else {
                        Decision::Attack {
                            attacker: selected.id,
                            defender: defender.id,
                        }
                    }
                });
                Some(decision)
            }
            _ => None,
        }
    }

    fn guard_pending(&self, selected: &Unit) -> Option<Decision> {
        self.pending
            .contains(selected.id)
            .then_some(Decision::rejected(RejectReason::ActionPending))
    }

    fn toggle(&self, target: Option<&Unit>) -> Decision {
        let Some(unit) = target else {
            return Decision::NoOp;
        };
        match self.selection.next(unit) {
            Ok(SelectionState::Selected(id)) => Decision::Select { unit: id },
            Ok(SelectionState::NoSelection) => Decision::Deselect,
            // NPC clicks without an eligible attacker leave the state unchanged.
            Err(_) => Decision::NoOp,
        }
    }
}
