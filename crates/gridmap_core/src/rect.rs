//! Rectangle clipping against map bounds

/// A rectangle of cells in map coordinates. May extend past the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two inclusive corners given in any order
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let min_x = x0.min(x1);
        let min_y = y0.min(y1);
        Self {
            x: min_x,
            y: min_y,
            width: x0.abs_diff(x1) + 1,
            height: y0.abs_diff(y1) + 1,
        }
    }

    /// Clip to a `map_width` x `map_height` grid.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the grid.
    pub fn clip(&self, map_width: u32, map_height: u32) -> Option<ClippedRect> {
        let min_x = i64::from(self.x).max(0);
        let min_y = i64::from(self.y).max(0);
        let max_x = (i64::from(self.x) + i64::from(self.width)).min(i64::from(map_width));
        let max_y = (i64::from(self.y) + i64::from(self.height)).min(i64::from(map_height));

        if min_x >= max_x || min_y >= max_y {
            return None;
        }

        Some(ClippedRect {
            min_x: min_x as u32,
            min_y: min_y as u32,
            max_x: max_x as u32,
            max_y: max_y as u32,
        })
    }
}

/// The in-bounds part of a [`CellRect`]. Max bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippedRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl ClippedRect {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Iterate every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..self.max_y).flat_map(move |y| (min_x..max_x).map(move |x| (x, y)))
    }
}
