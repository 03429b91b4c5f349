//! The room the player currently occupies, and its exits.

use std::fmt;

use bitflags::bitflags;
use dialquest_data::RoomNumber;

use crate::bounded::RoomText;

/// Room number stored in an exit slot that leads nowhere.
pub const NO_EXIT: RoomNumber = 0;

/// The four compass directions, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Position of this direction's exit byte within a variant.
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    pub const fn mask(self) -> ExitMask {
        match self {
            Direction::North => ExitMask::NORTH,
            Direction::East => ExitMask::EAST,
            Direction::South => ExitMask::SOUTH,
            Direction::West => ExitMask::WEST,
        }
    }

    /// Parse a full or single-letter direction name.
    pub fn from_word(word: &str) -> Option<Direction> {
        match word.to_lowercase().as_str() {
            "n" | "north" => Some(Direction::North),
            "e" | "east" => Some(Direction::East),
            "s" | "south" => Some(Direction::South),
            "w" | "west" => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Which exits of a room lead somewhere; drives the exit indicator lights.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ExitMask: u8 {
        const NORTH = 0x01;
        const EAST = 0x02;
        const SOUTH = 0x04;
        const WEST = 0x08;
    }
}

/// Destination room numbers for each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exits([RoomNumber; 4]);

impl Exits {
    pub const fn new(north: RoomNumber, east: RoomNumber, south: RoomNumber, west: RoomNumber) -> Self {
        Self([north, east, south, west])
    }

    pub const fn from_array(exits: [RoomNumber; 4]) -> Self {
        Self(exits)
    }

    pub const fn get(&self, dir: Direction) -> RoomNumber {
        self.0[dir.index()]
    }

    pub fn mask(&self) -> ExitMask {
        Direction::ALL
            .into_iter()
            .filter(|dir| self.get(*dir) != NO_EXIT)
            .fold(ExitMask::empty(), |mask, dir| mask | dir.mask())
    }
}

/// The room the player is in.
///
/// Replaced as a whole on every successful move; never partially updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Room {
    pub number: RoomNumber,
    pub title: RoomText,
    pub description: RoomText,
    pub exits: Exits,
}

impl Room {
    /// The placeholder the engine starts from: nowhere, with a single exit
    /// north into `start`.
    pub fn entrance(start: RoomNumber) -> Self {
        Self {
            exits: Exits::new(start, NO_EXIT, NO_EXIT, NO_EXIT),
            ..Self::default()
        }
    }

    pub const fn exit(&self, dir: Direction) -> RoomNumber {
        self.exits.get(dir)
    }

    pub fn exit_mask(&self) -> ExitMask {
        self.exits.mask()
    }
}
