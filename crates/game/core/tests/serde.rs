#![cfg(feature = "serde")]

use game_core::{
    GridModel, Intent, MapDimensions, MoveIntent, Position, Snapshot, Tile, TileKind, Unit,
    UnitId, UnitKind, UnitRegistry,
};

#[test]
fn unit_uses_ledger_field_names() {
    let json = r#"{ "id": 4, "x": 2, "y": 3, "unit_kind": "scout", "health": 80, "movement_range": 5 }"#;
    let unit: Unit = serde_json::from_str(json).unwrap();

    assert_eq!(unit.id, UnitId(4));
    assert_eq!(unit.position(), Position::new(2, 3));
    assert_eq!(unit.kind, UnitKind::Scout);
    assert!(!unit.is_selected);
    assert!(!unit.is_npc);
}

#[test]
fn snapshot_survives_json() {
    let dimensions = MapDimensions::new(4, 4);
    let grid = GridModel::from_tiles(dimensions, [Tile::new(1, 1, TileKind::Mountains)]);
    let units = UnitRegistry::new([
        Unit::new(UnitId(1), Position::new(0, 0), UnitKind::Warrior).with_movement_range(2),
        Unit::npc(UnitId(9), Position::new(3, 3), UnitKind::Barbarian),
    ])
    .unwrap();
    let snapshot = Snapshot::new(7, grid, units);

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: Snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, snapshot);
    assert_eq!(restored.tile_at(Position::new(1, 1)).kind, TileKind::Mountains);
}

#[test]
fn registry_invariants_hold_on_deserialize() {
    let stacked = r#"[
        { "id": 1, "x": 0, "y": 0, "unit_kind": "warrior", "health": 100, "movement_range": 1 },
        { "id": 2, "x": 0, "y": 0, "unit_kind": "archer", "health": 100, "movement_range": 1 }
    ]"#;
    assert!(serde_json::from_str::<UnitRegistry>(stacked).is_err());
}

#[test]
fn intents_are_tagged_by_kind() {
    let intent: Intent = MoveIntent::new(UnitId(1), Position::new(0, 2)).into();
    let json = serde_json::to_value(intent).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "Move": { "unit": 1, "to": { "x": 0, "y": 2 } } })
    );
    assert_eq!(serde_json::from_value::<Intent>(json).unwrap(), intent);
}
