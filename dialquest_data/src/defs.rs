use serde::{Deserialize, Serialize};

/// Room number as used by exits and room files. `0` means "no room".
pub type RoomNumber = u8;

/// Inventory item identifier. `0` is reserved as the empty-slot marker.
pub type ItemId = u8;

/// Room the engine enters when no other start room is given.
pub const DEFAULT_START_ROOM: RoomNumber = 32;

/// Top-level authored world data, usually read from `world.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
}

impl WorldDef {
    /// Look up an authored room by its number.
    pub fn room(&self, number: RoomNumber) -> Option<&RoomDef> {
        self.rooms.iter().find(|room| room.number == number)
    }
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_start_room")]
    pub start_room: RoomNumber,
}

impl Default for GameDef {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            start_room: DEFAULT_START_ROOM,
        }
    }
}

fn default_start_room() -> RoomNumber {
    DEFAULT_START_ROOM
}

/// One room and all of its conditional variants, in the order they are tried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub number: RoomNumber,
    pub title: String,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
}

/// A conditional version of a room's content.
///
/// The first variant whose `requires` are all held by the player is shown;
/// an empty `requires` list always matches.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VariantDef {
    #[serde(default)]
    pub requires: Vec<ItemId>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub grants: Vec<ItemId>,
    #[serde(default)]
    pub exits: ExitsDef,
}

impl VariantDef {
    /// True if this variant matches regardless of inventory.
    pub fn is_catch_all(&self) -> bool {
        self.requires.is_empty()
    }
}

/// Destination room numbers for the four compass exits; `0` for none.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExitsDef {
    #[serde(default)]
    pub north: RoomNumber,
    #[serde(default)]
    pub east: RoomNumber,
    #[serde(default)]
    pub south: RoomNumber,
    #[serde(default)]
    pub west: RoomNumber,
}

impl ExitsDef {
    /// Exits in record order: north, east, south, west.
    pub fn as_array(&self) -> [RoomNumber; 4] {
        [self.north, self.east, self.south, self.west]
    }

    /// Iterate `(direction name, destination)` pairs that lead somewhere.
    pub fn iter_present(&self) -> impl Iterator<Item = (&'static str, RoomNumber)> {
        ["north", "east", "south", "west"]
            .into_iter()
            .zip(self.as_array())
            .filter(|(_, to)| *to != 0)
    }
}
