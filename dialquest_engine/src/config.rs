//! Engine configuration.
//!
//! Read from `dialquest.toml` in the data directory. Every field has a
//! default, so a partial file is fine; an unreadable or invalid file falls
//! back to the defaults with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dialquest_data::RoomNumber;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::data_paths::data_path;
use crate::navigator::GrantPolicy;
use crate::paginate::PageLayout;
use crate::store::DEFAULT_ROOM_FILE_PATTERN;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "dialquest.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory of compiled room records.
    pub rooms_dir: PathBuf,
    /// File name pattern for room records; `{}` becomes the room number.
    pub room_file_pattern: String,
    /// Authored world, compiled in memory when `rooms_dir` does not exist.
    pub world_file: PathBuf,
    /// Overrides the authored world's start room.
    pub start_room: Option<RoomNumber>,
    pub display: PageLayout,
    /// Skip granted items that are already held instead of using another slot.
    pub dedupe_grants: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rooms_dir: PathBuf::from("rooms"),
            room_file_pattern: DEFAULT_ROOM_FILE_PATTERN.to_string(),
            world_file: PathBuf::from("world.toml"),
            start_room: None,
            display: PageLayout::default(),
            dedupe_grants: false,
        }
    }
}

impl EngineConfig {
    /// `rooms_dir`, resolved against the data root when relative.
    pub fn rooms_dir(&self) -> PathBuf {
        data_path(&self.rooms_dir)
    }

    /// `world_file`, resolved against the data root when relative.
    pub fn world_file(&self) -> PathBuf {
        data_path(&self.world_file)
    }

    pub fn grant_policy(&self) -> GrantPolicy {
        if self.dedupe_grants {
            GrantPolicy::SkipHeld
        } else {
            GrantPolicy::Always
        }
    }

    /// # Errors
    /// Returns an error naming the first setting that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.display.width == 0 || self.display.height == 0 {
            bail!(
                "display must be at least 1x1 (got {}x{})",
                self.display.width,
                self.display.height
            );
        }
        if self.start_room == Some(0) {
            bail!("start_room 0 is reserved for \"no room\"");
        }
        if !self.room_file_pattern.contains("{}") {
            bail!("room_file_pattern '{}' has no {{}} placeholder", self.room_file_pattern);
        }
        Ok(())
    }
}

/// Load the engine configuration, falling back to defaults on any problem.
///
/// A missing file is normal and logged at `info`; a file that cannot be read,
/// parsed, or validated is logged at `warn`.
pub fn load_config(toml_path: &Path) -> EngineConfig {
    if !toml_path.exists() {
        info!("no config at '{}', using defaults", toml_path.display());
        return EngineConfig::default();
    }
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("engine config loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load engine config from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            EngineConfig::default()
        },
    }
}

fn try_load_config(toml_path: &Path) -> Result<EngineConfig> {
    let raw = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine config from '{}'", toml_path.display()))?;
    let config: EngineConfig =
        toml::from_str(&raw).with_context(|| format!("parsing engine config from '{}'", toml_path.display()))?;
    config.validate()?;
    Ok(config)
}
