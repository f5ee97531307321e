//! Layer type holding a grid of group references

use serde::{Deserialize, Serialize};

/// A cell's value: the name of the group painted there, or `None` when empty
pub type CellRef = Option<String>;

/// A named grid of cell references
///
/// Cells are stored row-major. The owning [`TileMap`](crate::TileMap) keeps
/// `cells.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Cell data - None means empty, Some(name) references a group
    pub cells: Vec<CellRef>,
}

fn default_visible() -> bool {
    true
}

impl Layer {
    /// Create a new empty layer sized for a `width` x `height` map
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            visible: true,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Number of cells referencing `group`
    pub fn count_of(&self, group: &str) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.as_deref() == Some(group))
            .count()
    }

    /// Rewrite every cell equal to `from` with `to`, returning how many changed
    pub fn replace_all(&mut self, from: &str, to: Option<&str>) -> usize {
        let mut changed = 0;
        for cell in self.cells.iter_mut() {
            if cell.as_deref() == Some(from) {
                *cell = to.map(str::to_string);
                changed += 1;
            }
        }
        changed
    }

    /// Copy cells into a new `new_width` x `new_height` grid, keeping cells
    /// by coordinate. Cells outside the new bounds are dropped.
    pub(crate) fn resized(&self, width: u32, new_width: u32, new_height: u32) -> Vec<CellRef> {
        let mut cells = vec![None; new_width as usize * new_height as usize];
        if width == 0 {
            return cells;
        }
        let height = (self.cells.len() / width as usize) as u32;
        for y in 0..height.min(new_height) {
            for x in 0..width.min(new_width) {
                let old_idx = (y * width + x) as usize;
                let new_idx = (y * new_width + x) as usize;
                cells[new_idx] = self.cells[old_idx].clone();
            }
        }
        cells
    }
}
