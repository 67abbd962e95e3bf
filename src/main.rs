use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use tilemap_pathfinder::{LoadConfig, LoadError, TileMap};
use tracing_subscriber::EnvFilter;

const EXIT_USAGE: u8 = 1;
const EXIT_IO: u8 = 2;
const EXIT_JSON: u8 = 3;
const EXIT_MALFORMED_MAP: u8 = 4;
const EXIT_MISSING_MARKER: u8 = 5;
const EXIT_SEARCH: u8 = 6;

#[derive(Debug, PartialEq)]
struct Args {
    map_path: String,
    config_path: Option<String>,
}

/// Supports `tilemap-pathfinder <map.json>` with an optional
/// `--config <path>` / `-c <path>` anywhere after the program name.
fn parse_args(args: impl IntoIterator<Item = String>) -> Option<Args> {
    let mut args = args.into_iter();
    let mut map_path = None;
    let mut config_path = None;

    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            config_path = Some(args.next()?);
        } else if map_path.is_none() && !arg.starts_with('-') {
            map_path = Some(arg);
        } else {
            return None;
        }
    }

    Some(Args {
        map_path: map_path?,
        config_path,
    })
}

fn exit_code(e: &LoadError) -> u8 {
    match e {
        LoadError::Io(_) => EXIT_IO,
        LoadError::Json(_) => EXIT_JSON,
        LoadError::MissingMarker(_) => EXIT_MISSING_MARKER,
        LoadError::MissingLayer(_)
        | LoadError::MissingTileset
        | LoadError::InvalidDimensions { .. }
        | LoadError::DataLengthMismatch { .. }
        | LoadError::Grid(_) => EXIT_MALFORMED_MAP,
    }
}

/// Prints the map summary and the search outcome, returning the exit code.
fn report(out: &mut impl Write, map: &TileMap) -> io::Result<u8> {
    writeln!(out, "Map loaded with dimensions {} x {}", map.width(), map.height())?;
    writeln!(out, "Start Pos: {}, Target Pos: {}", map.start(), map.target())?;

    match map.find_path() {
        Ok(Some(path)) => {
            writeln!(out, "Path found:")?;
            for point in path {
                writeln!(out, "{point}")?;
            }
        }
        Ok(None) => writeln!(out, "No path found.")?,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(EXIT_SEARCH);
        }
    }

    Ok(0)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Some(args) = parse_args(env::args().skip(1)) else {
        let program = env::args()
            .next()
            .unwrap_or_else(|| "tilemap-pathfinder".to_string());
        eprintln!("Usage: {program} <map.json> [--config <config.json>]");
        return ExitCode::from(EXIT_USAGE);
    };

    let config = match &args.config_path {
        Some(path) => match LoadConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {path}: {e}");
                return ExitCode::from(exit_code(&e));
            }
        },
        None => LoadConfig::default(),
    };

    let map = match TileMap::load(&args.map_path, &config) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(exit_code(&e));
        }
    };

    match report(&mut io::stdout().lock(), &map) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error writing output: {e}");
            ExitCode::from(EXIT_IO)
        }
    }
}
