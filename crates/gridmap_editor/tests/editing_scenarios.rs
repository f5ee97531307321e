//! Editing scenarios across commands, history and the group registry

use gridmap_core::{CellRect, EntityInstance, Group, TileMap};
use gridmap_editor::commands::{
    flood_fill, ClearRegionCommand, Command, CommandHistory, MoveEntityCommand,
    PasteRegionCommand, ReorderLayerCommand, ResizeCommand, StrokeRecorder, TileClipboard,
};
use gridmap_editor::groups::GroupRegistry;

fn map_with_ground(width: u32, height: u32) -> TileMap {
    let mut map = TileMap::new(width, height);
    map.add_layer("Ground");
    map
}

/// Paint one cell on a 10x8 map, then undo it
#[test]
fn test_paint_then_undo() {
    let mut map = map_with_ground(10, 8);
    let mut history = CommandHistory::new();
    let mut stroke = StrokeRecorder::new();

    stroke.begin(&mut map, 0, "Paint");
    assert!(stroke.paint(&mut map, 3, 4, Some("grass".into())));
    let command = stroke.finish().unwrap();
    assert!(history.push(Box::new(command)));
    assert_eq!(map.get_cell(0, 3, 4), Some("grass"));

    assert!(history.undo(&mut map));
    assert_eq!(map.get_cell(0, 3, 4), None);
    assert!(history.can_redo());
}

/// Paste a 2x2 pattern with one empty cell at (3, 3)
#[test]
fn test_paste_skips_empty_clipboard_cells() {
    let mut map = map_with_ground(10, 10);
    map.set_cell(0, 4, 4, Some("water".into()));
    let mut history = CommandHistory::new();

    let clipboard = TileClipboard::new(
        2,
        2,
        vec![
            Some("grass".into()),
            Some("wall".into()),
            Some("sand".into()),
            None,
        ],
    )
    .unwrap();

    let paste = PasteRegionCommand::new(&map, 0, 3, 3, &clipboard);
    assert!(history.execute(Box::new(paste), &mut map));

    assert_eq!(map.get_cell(0, 3, 3), Some("grass"));
    assert_eq!(map.get_cell(0, 4, 3), Some("wall"));
    assert_eq!(map.get_cell(0, 3, 4), Some("sand"));
    assert_eq!(map.get_cell(0, 4, 4), Some("water"));

    history.undo(&mut map);
    assert_eq!(map.get_cell(0, 3, 3), None);
    assert_eq!(map.get_cell(0, 4, 4), Some("water"));
}

/// Grow a 5x5 map to 8x10 and undo; shrink and regrow keeps dropped entities
#[test]
fn test_resize_and_undo() {
    let mut map = map_with_ground(5, 5);
    map.set_cell(0, 4, 4, Some("rock".into()));
    let corner = EntityInstance::new("npc", 4, 4);
    let corner_id = corner.id;
    map.add_entity(corner);
    let before = map.clone();
    let mut history = CommandHistory::new();

    history.execute(Box::new(ResizeCommand::new(&map, 8, 10)), &mut map);
    assert_eq!((map.width, map.height), (8, 10));
    assert!(map.is_consistent());
    assert_eq!(map.get_cell(0, 4, 4), Some("rock"));
    history.undo(&mut map);
    assert_eq!(map, before);

    for _ in 0..2 {
        history.execute(Box::new(ResizeCommand::new(&map, 3, 3)), &mut map);
        assert!(map.get_entity(corner_id).is_none());
        assert!(map.is_consistent());
        history.execute(Box::new(ResizeCommand::new(&map, 6, 6)), &mut map);
        assert_eq!(map.get_cell(0, 4, 4), None);
        history.undo(&mut map);
        history.undo(&mut map);
        assert_eq!(map.get_cell(0, 4, 4), Some("rock"));
        assert!(map.get_entity(corner_id).is_some());
        assert_eq!((map.width, map.height), (5, 5));
    }
}

/// Fill a uniform 4x4 layer from the corner as one undoable step
#[test]
fn test_flood_fill_is_one_step() {
    let mut map = map_with_ground(4, 4);
    let mut history = CommandHistory::new();

    let fill = flood_fill(&mut map, 0, 0, 0, Some("water".into())).unwrap();
    assert_eq!(fill.len(), 16);
    history.push(Box::new(fill));
    assert_eq!(history.undo_depth(), 1);

    history.undo(&mut map);
    assert!(map.layers[0].cells.iter().all(|c| c.is_none()));
    history.redo(&mut map);
    assert!(map.layers[0]
        .cells
        .iter()
        .all(|c| c.as_deref() == Some("water")));
}

#[test]
fn test_every_command_undo_restores_state() {
    let mut map = map_with_ground(6, 6);
    map.add_layer("Detail");
    map.set_cell(0, 1, 1, Some("grass".into()));
    map.set_cell(1, 2, 2, Some("flower".into()));
    let npc = EntityInstance::new("npc", 2, 3);
    let npc_id = npc.id;
    map.add_entity(npc);

    let clipboard = TileClipboard::copy_region(&map, 0, CellRect::new(0, 0, 3, 3)).unwrap();
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(ClearRegionCommand::new(&map, 0, CellRect::new(0, 0, 3, 3))),
        Box::new(PasteRegionCommand::new(&map, 1, 4, 4, &clipboard)),
        Box::new(ResizeCommand::new(&map, 2, 9)),
        Box::new(MoveEntityCommand::new(npc_id, (2, 3), (5, 5))),
        Box::new(ReorderLayerCommand::new(0, 1)),
    ];

    for mut command in commands {
        let before = map.clone();
        command.execute(&mut map);
        command.undo(&mut map);
        assert_eq!(map, before, "undo of '{}'", command.description());
    }
}

#[test]
fn test_cancelled_stroke_leaves_no_trace() {
    let mut map = map_with_ground(5, 5);
    let before = map.clone();
    let mut stroke = StrokeRecorder::new();

    stroke.begin(&mut map, 0, "Paint");
    for x in 0..5 {
        stroke.paint(&mut map, x, 2, Some("road".into()));
    }
    stroke.cancel(&mut map);

    assert_eq!(map, before);
    assert!(stroke.finish().is_none());
}

#[test]
fn test_group_removal_cascades_into_maps() {
    let mut registry = GroupRegistry::from_groups(vec![
        Group::tile("grass"),
        Group::tile("water"),
        Group::entity("npc"),
    ]);
    registry.select(Some("water"));

    let mut town = map_with_ground(3, 3);
    town.set_cell(0, 0, 0, Some("water".into()));
    let mut cave = map_with_ground(3, 3);
    cave.set_cell(0, 2, 2, Some("water".into()));
    cave.add_entity(EntityInstance::new("npc", 1, 1));

    let removal = registry.remove("water", [&mut town, &mut cave]).unwrap();
    assert_eq!(removal.cells_cleared, 2);
    assert!(removal.selection_changed);
    assert_eq!(registry.selected(), Some("grass"));
    assert_eq!(town.get_cell(0, 0, 0), None);

    let rename = registry.rename("npc", "villager", [&mut town, &mut cave]).unwrap();
    assert_eq!(rename.entities_rewritten, 1);
    assert_eq!(cave.entities[0].group_name, "villager");
    assert!(registry.is_index_consistent());

    assert!(registry.rename("villager", "grass", [&mut town, &mut cave]).is_none());
    assert_eq!(cave.entities[0].group_name, "villager");
}
