use derive_more::Display;
use log::warn;
use serde::Deserialize;

use crate::{search, FindPathError, Point};

/// Category of a single cell, derived once from its raw editor code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tile {
    Ground,
    Elevated,
    Start,
    Target,
    Unrecognized,
}

impl Tile {
    /// Elevated terrain is the only impassable category. Markers and
    /// unrecognized codes are walked over like ground.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Tile::Elevated)
    }
}

/// The two marker tiles a map must carry exactly once.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum Marker {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "target")]
    Target,
}

impl Marker {
    pub fn tile(&self) -> Tile {
        match self {
            Marker::Start => Tile::Start,
            Marker::Target => Tile::Target,
        }
    }
}

/// Sentinel codes the map editor writes into the data layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TileCodes {
    pub ground: f64,
    pub elevated: f64,
    pub start: f64,
    pub target: f64,
    /// Largest difference at which a raw code still matches a sentinel.
    pub tolerance: f64,
}

impl Default for TileCodes {
    fn default() -> Self {
        Self {
            ground: -1.0,
            elevated: 3.0,
            start: 8.3,
            target: 0.5,
            tolerance: 1e-4,
        }
    }
}

impl TileCodes {
    pub fn classify(&self, code: f64) -> Tile {
        let matches = |sentinel: f64| (code - sentinel).abs() <= self.tolerance;

        if matches(self.elevated) {
            Tile::Elevated
        } else if matches(self.start) {
            Tile::Start
        } else if matches(self.target) {
            Tile::Target
        } else if matches(self.ground) {
            Tile::Ground
        } else {
            Tile::Unrecognized
        }
    }
}

/// Immutable row-major grid of classified tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Result<Self, FindPathError> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(tiles.len()) {
            return Err(FindPathError::InvalidGrid {
                width,
                height,
                cells: tiles.len(),
            });
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Classifies every raw code. Unrecognized codes are kept as traversable
    /// but reported, since the editor is only expected to emit the sentinels.
    pub fn classify(
        width: usize,
        height: usize,
        codes: &[f64],
        tile_codes: &TileCodes,
    ) -> Result<Self, FindPathError> {
        let tiles: Vec<Tile> = codes.iter().map(|&code| tile_codes.classify(code)).collect();

        let unrecognized = tiles.iter().filter(|&&t| t == Tile::Unrecognized).count();
        if unrecognized > 0 {
            warn!(
                "{} of {} tiles carry unrecognized codes, treating them as ground",
                unrecognized,
                tiles.len()
            );
        }

        Self::new(width, height, tiles)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, point: Point) -> Option<Tile> {
        point
            .index(self.width, self.height)
            .map(|index| self.tiles[index])
    }

    /// Cells holding `tile`, in row-major order.
    pub fn positions(&self, tile: Tile) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == tile)
            .map(move |(i, _)| Point::new((i % width) as i32, (i / width) as i32))
    }

    pub fn find_path(
        &self,
        start: Point,
        target: Point,
    ) -> Result<Option<Vec<Point>>, FindPathError> {
        search::find_path(
            &self.tiles,
            self.width,
            self.height,
            Tile::is_blocked,
            start,
            target,
        )
    }
}
