//! Bucket fill

use gridmap_core::{CellRef, TileMap};
use std::collections::VecDeque;

use super::{CellChange, CellStrokeCommand};

/// Flood fill the 4-connected region around (x, y) with `fill`.
///
/// Cells are written as they are reached. Returns the applied fill as a
/// single command, or `None` when the start cell is outside the map or
/// already holds `fill`.
pub fn flood_fill(
    map: &mut TileMap,
    layer: usize,
    x: i32,
    y: i32,
    fill: CellRef,
) -> Option<CellStrokeCommand> {
    map.get_layer(layer)?;
    if !map.in_bounds(x, y) {
        return None;
    }

    let target: CellRef = map.get_cell(layer, x, y).map(str::to_string);
    if target == fill {
        return None;
    }

    let mut changes = Vec::new();
    let mut queue = VecDeque::new();

    // Writing on enqueue marks the cell visited: it no longer equals `target`.
    map.set_cell(layer, x, y, fill.clone());
    changes.push(change(layer, x, y, &target, &fill));
    queue.push_back((x, y));

    while let Some((cx, cy)) = queue.pop_front() {
        for (nx, ny) in [(cx + 1, cy), (cx - 1, cy), (cx, cy + 1), (cx, cy - 1)] {
            if !map.in_bounds(nx, ny) || map.get_cell(layer, nx, ny) != target.as_deref() {
                continue;
            }
            map.set_cell(layer, nx, ny, fill.clone());
            changes.push(change(layer, nx, ny, &target, &fill));
            queue.push_back((nx, ny));
        }
    }

    Some(CellStrokeCommand::new(changes, "Fill"))
}

fn change(layer: usize, x: i32, y: i32, old: &CellRef, new: &CellRef) -> CellChange {
    CellChange {
        layer,
        x,
        y,
        old: old.clone(),
        new: new.clone(),
    }
}
