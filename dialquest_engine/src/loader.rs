//! Loader utilities: authored worlds and the room store the engine reads from.
//!
//! Compiled room records in the configured directory are preferred. Without
//! them, the authored world file is validated and encoded into memory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use dialquest_data::{RoomNumber, WorldDef};
use log::{info, warn};

use crate::config::EngineConfig;
use crate::store::{DirRoomStore, MemoryRoomStore, RoomStore};

const DEFAULT_TITLE: &str = "Dialquest";

/// Read and parse an authored world file.
///
/// # Errors
/// Errors bubble up from file IO or TOML deserialization.
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading world from '{}'", path.display()))?;
    let world: WorldDef = toml::from_str(&raw).with_context(|| format!("parsing world from '{}'", path.display()))?;
    info!(
        "world \"{}\" loaded from '{}' with {} rooms",
        world.game.title,
        path.display(),
        world.rooms.len()
    );
    Ok(world)
}

/// Validate an authored world and return a single aggregated error.
///
/// # Errors
/// Lists every validation problem found.
pub fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = dialquest_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("world validation failed:\n{details}");
}

/// The room store to play from, and the room to start in.
pub struct GameData {
    pub store: Box<dyn RoomStore>,
    pub start_room: RoomNumber,
    pub title: String,
}

/// Pick the room store described by `config`.
///
/// # Errors
/// Fails if neither compiled rooms nor a valid authored world are available.
pub fn load_game(config: &EngineConfig) -> Result<GameData> {
    let rooms_dir = config.rooms_dir();
    let world_path = config.world_file();

    if rooms_dir.is_dir() {
        let (title, world_start) = world_summary(&world_path);
        let start_room = config.start_room.unwrap_or(world_start);
        let store = DirRoomStore::with_pattern(rooms_dir, config.room_file_pattern.clone());
        info!("reading compiled rooms from '{}'", store.dir().display());
        return Ok(GameData {
            store: Box::new(store),
            start_room,
            title,
        });
    }

    info!(
        "no compiled rooms at '{}'; building from '{}'",
        rooms_dir.display(),
        world_path.display()
    );
    let world = load_worlddef(&world_path).context("while loading authored world")?;
    validate_worlddef(&world)?;
    let store = MemoryRoomStore::from_world(&world).context("while encoding authored world")?;
    Ok(GameData {
        store: Box::new(store),
        start_room: config.start_room.unwrap_or(world.game.start_room),
        title: world.game.title,
    })
}

/// Title and start room of the authored world, or the defaults when it
/// cannot be read.
fn world_summary(path: &Path) -> (String, RoomNumber) {
    match load_worlddef(path) {
        Ok(world) => (world.game.title, world.game.start_room),
        Err(err) => {
            warn!("no usable world next to compiled rooms ({err:#}); using default title and start room");
            (DEFAULT_TITLE.to_string(), dialquest_data::DEFAULT_START_ROOM)
        },
    }
}
