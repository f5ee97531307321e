//! Tile clipboard for copy/paste and stamping

use gridmap_core::{CellRect, CellRef, TileMap};

/// A rectangular block of cells copied out of a layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileClipboard {
    pub width: u32,
    pub height: u32,
    /// Row-major cells, None = leave the target unchanged on paste
    pub cells: Vec<CellRef>,
}

impl TileClipboard {
    /// Returns `None` if `cells` does not hold exactly `width * height` values
    pub fn new(width: u32, height: u32, cells: Vec<CellRef>) -> Option<Self> {
        (cells.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            cells,
        })
    }

    /// Copy the part of `rect` that lies inside the map from one layer
    pub fn copy_region(map: &TileMap, layer: usize, rect: CellRect) -> Option<Self> {
        map.get_layer(layer)?;
        let clipped = rect.clip(map.width, map.height)?;
        let cells = clipped
            .cells()
            .map(|(x, y)| map.get_cell(layer, x as i32, y as i32).map(str::to_string))
            .collect();
        Some(Self {
            width: clipped.width(),
            height: clipped.height(),
            cells,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Get the value at a clipboard-local position
    pub fn get(&self, x: u32, y: u32) -> Option<&str> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get((y * self.width + x) as usize)
            .and_then(|c| c.as_deref())
    }

    /// Non-empty cells as (local x, local y, group name)
    pub fn filled_cells(&self) -> impl Iterator<Item = (u32, u32, &str)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let name = cell.as_deref()?;
            Some((i as u32 % width, i as u32 / width, name))
        })
    }
}
