//! Compile an authored world into one binary record per room.
//!
//! Usage: `compile_rooms [WORLD_TOML] [OUT_DIR]`. Both default to the
//! configured paths under the data directory.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dialquest_data::encode_room;
use dialquest_engine::config::CONFIG_FILE;
use dialquest_engine::data_paths::data_path;
use dialquest_engine::load_config;
use dialquest_engine::loader::{load_worlddef, validate_worlddef};
use dialquest_engine::store::room_file_name;
use log::info;

fn main() -> Result<()> {
    env_logger::init();
    let config = load_config(&data_path(CONFIG_FILE));
    let mut args = env::args().skip(1);
    let world_path = args.next().map_or_else(|| config.world_file(), PathBuf::from);
    let out_dir = args.next().map_or_else(|| config.rooms_dir(), PathBuf::from);

    let world = load_worlddef(&world_path)?;
    validate_worlddef(&world)?;
    if let Some(start) = world.room(world.game.start_room) {
        info!("start room {} is \"{}\"", start.number, start.title);
    }

    fs::create_dir_all(&out_dir).with_context(|| format!("creating '{}'", out_dir.display()))?;
    for room in &world.rooms {
        let record = encode_room(room)?;
        let path = out_dir.join(room_file_name(&config.room_file_pattern, room.number));
        fs::write(&path, &record).with_context(|| format!("writing '{}'", path.display()))?;
        info!("room {} -> '{}' ({} bytes)", room.number, path.display(), record.len());
    }

    println!(
        "compiled {} rooms of \"{}\" into '{}'",
        world.rooms.len(),
        world.game.title,
        out_dir.display()
    );
    Ok(())
}
