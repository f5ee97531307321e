//! Rectangular region edits: clear selection and paste

use gridmap_core::{CellRect, CellRef, TileMap};

use super::{Command, TileClipboard};

/// Writes empty into every in-bounds cell of a rectangle
#[derive(Debug, Clone)]
pub struct ClearRegionCommand {
    layer: usize,
    /// (x, y, value before clearing) for every in-bounds cell
    snapshot: Vec<(i32, i32, CellRef)>,
}

impl ClearRegionCommand {
    /// Snapshot the region as it is now. Parts outside the map are ignored.
    pub fn new(map: &TileMap, layer: usize, rect: CellRect) -> Self {
        let snapshot = match (map.get_layer(layer), rect.clip(map.width, map.height)) {
            (Some(_), Some(clipped)) => clipped
                .cells()
                .map(|(x, y)| {
                    let (x, y) = (x as i32, y as i32);
                    (x, y, map.get_cell(layer, x, y).map(str::to_string))
                })
                .collect(),
            _ => Vec::new(),
        };
        Self { layer, snapshot }
    }

    /// Number of in-bounds cells covered
    pub fn cell_count(&self) -> usize {
        self.snapshot.len()
    }
}

impl Command for ClearRegionCommand {
    fn execute(&mut self, map: &mut TileMap) {
        for (x, y, _) in &self.snapshot {
            map.set_cell(self.layer, *x, *y, None);
        }
    }

    fn undo(&mut self, map: &mut TileMap) {
        for (x, y, old) in &self.snapshot {
            map.set_cell(self.layer, *x, *y, old.clone());
        }
    }

    fn description(&self) -> &str {
        "Clear Selection"
    }

    fn is_noop(&self) -> bool {
        self.snapshot.iter().all(|(_, _, old)| old.is_none())
    }
}

#[derive(Debug, Clone)]
struct PasteCell {
    x: i32,
    y: i32,
    old: CellRef,
    /// None when the clipboard cell is empty and the target is left alone
    new: CellRef,
}

/// Writes a clipboard block with its top-left corner at an origin cell
#[derive(Debug, Clone)]
pub struct PasteRegionCommand {
    layer: usize,
    cells: Vec<PasteCell>,
}

impl PasteRegionCommand {
    /// Snapshot the target region as it is now. Parts outside the map are ignored.
    pub fn new(
        map: &TileMap,
        layer: usize,
        origin_x: i32,
        origin_y: i32,
        clipboard: &TileClipboard,
    ) -> Self {
        let rect = CellRect::new(origin_x, origin_y, clipboard.width, clipboard.height);
        let cells = match (map.get_layer(layer), rect.clip(map.width, map.height)) {
            (Some(_), Some(clipped)) => clipped
                .cells()
                .map(|(x, y)| {
                    let (x, y) = (x as i32, y as i32);
                    let local_x = (x - origin_x) as u32;
                    let local_y = (y - origin_y) as u32;
                    PasteCell {
                        x,
                        y,
                        old: map.get_cell(layer, x, y).map(str::to_string),
                        new: clipboard.get(local_x, local_y).map(str::to_string),
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        Self { layer, cells }
    }

    /// Number of cells the paste will write
    pub fn write_count(&self) -> usize {
        self.cells.iter().filter(|c| c.new.is_some()).count()
    }
}

impl Command for PasteRegionCommand {
    fn execute(&mut self, map: &mut TileMap) {
        for cell in self.cells.iter().filter(|c| c.new.is_some()) {
            map.set_cell(self.layer, cell.x, cell.y, cell.new.clone());
        }
    }

    fn undo(&mut self, map: &mut TileMap) {
        for cell in self.cells.iter().filter(|c| c.new.is_some()) {
            map.set_cell(self.layer, cell.x, cell.y, cell.old.clone());
        }
    }

    fn description(&self) -> &str {
        "Paste"
    }

    fn is_noop(&self) -> bool {
        self.cells
            .iter()
            .all(|c| c.new.is_none() || c.new == c.old)
    }
}
