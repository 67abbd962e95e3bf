//! Shortest paths over tile maps exported from a level editor.
//!
//! A [`TileMap`] is loaded from the editor's JSON export, its raw tile codes
//! are classified once into [`Tile`]s, and [`find_path`] runs a
//! breadth-first search between the start and target markers over the
//! 4-connected grid.

use std::fmt::{Display, Formatter};

use derive_new::new;

mod load;
mod search;
mod tile;

pub use load::{Canvas, Layer, LoadConfig, LoadError, MapDocument, TileMap, Tileset};
pub use search::{find_path, Direction, FindPathError, DIRECTIONS};
pub use tile::{Marker, Tile, TileCodes, TileGrid};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Row-major index of this point in a grid `width` cells wide, or `None`
    /// if the point lies outside `[0, width) x [0, height)`.
    pub fn index(&self, width: usize, height: usize) -> Option<usize> {
        if self.x < 0 || self.y < 0 {
            return None;
        }

        let (x, y) = (self.x as usize, self.y as usize);
        if x >= width || y >= height {
            return None;
        }

        Some(y * width + x)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
