//! Human-readable text for decisions, intents, and map cells.
use game_core::{Decision, Intent, ResourceKind, TileKind, UnitKind};

use crate::view_model::{MapView, TileView};

/// One-line description of a resolved click.
pub fn describe_decision(decision: &Decision) -> String {
    match decision {
        Decision::Move { unit, to } => format!("unit {unit} moving to {to}"),
        Decision::Attack { attacker, defender } => {
            format!("unit {attacker} attacking {defender}")
        }
        Decision::Select { unit } => format!("selected unit {unit}"),
        Decision::Deselect => "selection cleared".to_string(),
        Decision::NoOp => "nothing to do".to_string(),
        Decision::Rejected { reason } => format!("rejected: {reason}"),
    }
}

pub fn describe_intent(intent: &Intent) -> String {
    intent.to_string()
}

pub fn tile_glyph(kind: TileKind) -> char {
    match kind {
        TileKind::Plains => '.',
        TileKind::Forest => 'f',
        TileKind::Field => ',',
        TileKind::Rocks => 'r',
        TileKind::Mountains => '^',
        TileKind::Village => 'V',
        TileKind::StoneQuarry => 'q',
        TileKind::Empty => ' ',
    }
}

pub fn resource_glyph(resource: ResourceKind) -> char {
    match resource {
        ResourceKind::Lumber => 'L',
        ResourceKind::Food => 'F',
        ResourceKind::Stone => 'S',
    }
}

/// Player units upper-case, NPCs lower-case.
pub fn unit_glyph(kind: UnitKind, is_npc: bool) -> char {
    let glyph = match kind {
        UnitKind::Settler => 'S',
        UnitKind::Worker => 'W',
        UnitKind::Scout => 'C',
        UnitKind::Warrior => 'A',
        UnitKind::Swordsman => 'K',
        UnitKind::Archer => 'R',
        UnitKind::Barbarian => 'B',
    };
    if is_npc {
        glyph.to_ascii_lowercase()
    } else {
        glyph
    }
}

fn cell_glyph(tile: &TileView) -> char {
    if let Some(unit) = &tile.unit {
        return if unit.is_selected {
            '@'
        } else {
            unit_glyph(unit.kind, unit.is_npc)
        };
    }
    if tile.highlighted {
        return '*';
    }
    tile.resource
        .map(resource_glyph)
        .unwrap_or_else(|| tile_glyph(tile.kind))
}

/// Renders the map top row first, one character per cell, with a y-axis
/// gutter.
pub fn render_map(map: &MapView) -> String {
    let mut out = String::with_capacity((map.width as usize + 4) * map.tiles.len());
    for row in &map.tiles {
        let y = row.first().map(|tile| tile.position.y).unwrap_or_default();
        out.push_str(&format!("{y:>2} "));
        out.extend(row.iter().map(cell_glyph));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use game_core::{AttackIntent, MoveIntent, Position, RejectReason, UnitId};

    use super::*;

    #[test]
    fn decisions_read_naturally() {
        let decision = Decision::Move {
            unit: UnitId(3),
            to: Position::new(4, 7),
        };
        assert_eq!(describe_decision(&decision), "unit #3 moving to (4, 7)");
        assert_eq!(
            describe_decision(&Decision::rejected(RejectReason::NoMovesLeft)),
            "rejected: no moves left"
        );
    }

    #[test]
    fn intents_name_both_sides() {
        let intent: Intent = MoveIntent::new(UnitId(1), Position::new(0, 2)).into();
        assert_eq!(describe_intent(&intent), "move #1 to (0, 2)");

        let intent: Intent = AttackIntent::new(UnitId(1), UnitId(7)).into();
        assert_eq!(describe_intent(&intent), intent.to_string());
        assert_eq!(describe_intent(&intent), "attack #7 with #1");
    }

    #[test]
    fn npc_glyphs_are_lowercase() {
        assert_eq!(unit_glyph(UnitKind::Barbarian, true), 'b');
        assert_eq!(unit_glyph(UnitKind::Warrior, false), 'A');
    }
}
