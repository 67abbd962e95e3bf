use std::fs;
use std::path::Path;

use derive_more::{Display, From};
use log::{info, warn};
use serde::Deserialize;

use crate::{FindPathError, Marker, Point, TileCodes, TileGrid};

const DEFAULT_LAYER: &str = "world";

#[derive(Debug, Display, From)]
pub enum LoadError {
    #[display(fmt = "Error opening file: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "Error parsing JSON: {}", _0)]
    Json(serde_json::Error),
    #[display(fmt = "No layer named {:?} to path find on", _0)]
    #[from(ignore)]
    MissingLayer(String),
    #[display(fmt = "Map declares no tilesets")]
    #[from(ignore)]
    MissingTileset,
    #[display(
        fmt = "Invalid dimensions: canvas {}x{} with {}x{} tiles",
        canvas_width,
        canvas_height,
        tile_width,
        tile_height
    )]
    #[from(ignore)]
    InvalidDimensions {
        canvas_width: u32,
        canvas_height: u32,
        tile_width: u32,
        tile_height: u32,
    },
    #[display(fmt = "Layer holds {} tiles, expected {}", actual, expected)]
    #[from(ignore)]
    DataLengthMismatch { expected: usize, actual: usize },
    #[display(fmt = "Could not find {} position in map", _0)]
    #[from(ignore)]
    MissingMarker(Marker),
    #[display(fmt = "{}", _0)]
    Grid(FindPathError),
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
            LoadError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

/// How a map export is read: which layer carries the tiles and what the
/// sentinel codes are.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub layer: String,
    pub codes: TileCodes,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            layer: DEFAULT_LAYER.to_string(),
            codes: TileCodes::default(),
        }
    }
}

impl LoadConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// The parts of the editor's JSON export that are read. Everything else in
/// the file is ignored.
#[derive(Debug, Deserialize)]
pub struct MapDocument {
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub tilesets: Vec<Tileset>,
    pub canvas: Canvas,
}

#[derive(Debug, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

/// Sizes are read as numbers and truncated to whole pixels, so exports that
/// write `32.0` load the same as `32`.
#[derive(Debug, Deserialize)]
pub struct Tileset {
    #[serde(rename = "tilewidth")]
    pub tile_width: f64,
    #[serde(rename = "tileheight")]
    pub tile_height: f64,
}

#[derive(Debug, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// A classified grid together with its start and target cells.
#[derive(Clone, Debug)]
pub struct TileMap {
    grid: TileGrid,
    start: Point,
    target: Point,
}

impl TileMap {
    pub fn load(file_path: impl AsRef<Path>, config: &LoadConfig) -> Result<Self, LoadError> {
        let text = fs::read_to_string(file_path)?;
        Self::from_json(&text, config)
    }

    pub fn from_json(text: &str, config: &LoadConfig) -> Result<Self, LoadError> {
        let document: MapDocument = serde_json::from_str(text)?;
        Self::from_document(document, config)
    }

    pub fn from_document(document: MapDocument, config: &LoadConfig) -> Result<Self, LoadError> {
        let (width, height) = Self::dimensions(&document)?;

        // A later layer with the same name replaces an earlier one.
        let layer = document
            .layers
            .into_iter()
            .rev()
            .find(|layer| layer.name.as_deref() == Some(config.layer.as_str()))
            .ok_or_else(|| LoadError::MissingLayer(config.layer.clone()))?;

        let expected = width * height;
        if layer.data.len() != expected {
            return Err(LoadError::DataLengthMismatch {
                expected,
                actual: layer.data.len(),
            });
        }

        let grid = TileGrid::classify(width, height, &layer.data, &config.codes)?;
        let start = Self::find_marker(&grid, Marker::Start)?;
        let target = Self::find_marker(&grid, Marker::Target)?;

        info!(
            "loaded {}x{} map, start {} target {}",
            width, height, start, target
        );

        Ok(Self {
            grid,
            start,
            target,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Shortest path from the start marker to the target marker, inclusive
    /// of both. None if the target cannot be reached.
    pub fn find_path(&self) -> Result<Option<Vec<Point>>, FindPathError> {
        self.grid.find_path(self.start, self.target)
    }

    fn dimensions(document: &MapDocument) -> Result<(usize, usize), LoadError> {
        let tileset = document.tilesets.first().ok_or(LoadError::MissingTileset)?;

        // `as` truncates toward zero and clamps negatives and NaN to 0.
        let canvas_width = document.canvas.width as u32;
        let canvas_height = document.canvas.height as u32;
        let tile_width = tileset.tile_width as u32;
        let tile_height = tileset.tile_height as u32;

        let invalid = || LoadError::InvalidDimensions {
            canvas_width,
            canvas_height,
            tile_width,
            tile_height,
        };

        let width = canvas_width.checked_div(tile_width).ok_or_else(invalid)?;
        let height = canvas_height.checked_div(tile_height).ok_or_else(invalid)?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok((width as usize, height as usize))
    }

    fn find_marker(grid: &TileGrid, marker: Marker) -> Result<Point, LoadError> {
        let mut positions = grid.positions(marker.tile());
        let first = positions.next().ok_or(LoadError::MissingMarker(marker))?;

        let duplicates = positions.count();
        if duplicates > 0 {
            warn!(
                "{} more {} markers after {}, using the first",
                duplicates, marker, first
            );
        }

        Ok(first)
    }
}
