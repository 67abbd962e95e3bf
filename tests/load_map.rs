use std::path::PathBuf;

use tilemap_pathfinder::{LoadConfig, LoadError, Marker, Point, Tile, TileMap};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("maps/sample.json")
}

#[test]
fn test_sample_map() {
    let map = TileMap::load(sample_path(), &LoadConfig::default()).unwrap();

    assert_eq!((map.width(), map.height()), (5, 4));
    assert_eq!(map.start(), Point::new(0, 0));
    assert_eq!(map.target(), Point::new(4, 3));
    assert_eq!(map.grid().get(Point::new(3, 0)), Some(Tile::Elevated));
}

#[test]
fn test_sample_map_path() {
    let map = TileMap::load(sample_path(), &LoadConfig::default()).unwrap();

    let path = map.find_path().unwrap();

    assert_eq!(
        path,
        Some(vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(2, 3),
            Point::new(3, 3),
            Point::new(4, 3),
        ])
    );
}

#[test]
fn test_sample_map_repeatable() {
    let map = TileMap::load(sample_path(), &LoadConfig::default()).unwrap();

    let first = map.find_path().unwrap();
    let second = map.find_path().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_walled_off_target() {
    // S . E .
    // E E E .
    // . . E T
    let json = r#"{
        "canvas": { "width": 4, "height": 3 },
        "tilesets": [{ "tilewidth": 1, "tileheight": 1 }],
        "layers": [{ "name": "world", "data": [
            8.3, -1, 3, -1,
            3, 3, 3, -1,
            -1, -1, 3, 0.5
        ] }]
    }"#;

    let map = TileMap::from_json(json, &LoadConfig::default()).unwrap();

    assert_eq!(map.find_path(), Ok(None));
}

#[test]
fn test_custom_layer_and_codes() {
    let json = r#"{
        "canvas": { "width": 3, "height": 1 },
        "tilesets": [{ "tilewidth": 1, "tileheight": 1 }],
        "layers": [{ "name": "terrain", "data": [8.1, 0, 0.5] }]
    }"#;
    let config: LoadConfig =
        serde_json::from_str(r#"{ "layer": "terrain", "codes": { "start": 8.1, "ground": 0 } }"#)
            .unwrap();

    let map = TileMap::from_json(json, &config).unwrap();

    assert_eq!(map.grid().get(Point::new(1, 0)), Some(Tile::Ground));
    assert_eq!(map.find_path().unwrap().map(|p| p.len()), Some(3));
}

#[test]
fn test_no_layers() {
    let json = r#"{ "canvas": { "width": 1, "height": 1 }, "tilesets": [{ "tilewidth": 1, "tileheight": 1 }] }"#;

    let result = TileMap::from_json(json, &LoadConfig::default());

    assert!(matches!(result, Err(LoadError::MissingLayer(_))));
}

#[test]
fn test_missing_file() {
    let path = sample_path().with_file_name("does-not-exist.json");

    let result = TileMap::load(path, &LoadConfig::default());

    assert!(matches!(result, Err(LoadError::Io(_))));
}

#[test]
fn test_marker_error_message() {
    let json = r#"{
        "canvas": { "width": 2, "height": 1 },
        "tilesets": [{ "tilewidth": 1, "tileheight": 1 }],
        "layers": [{ "name": "world", "data": [8.3, -1] }]
    }"#;

    let e = TileMap::from_json(json, &LoadConfig::default()).unwrap_err();

    assert!(matches!(e, LoadError::MissingMarker(Marker::Target)));
    assert_eq!(e.to_string(), "Could not find target position in map");
}
