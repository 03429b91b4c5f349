//! Movement between rooms.
//!
//! The [`Navigator`] owns the session state: the current room and the
//! player's inventory. A move opens the destination's record, decodes it
//! against the inventory, and only then replaces the current room and applies
//! the variant's grants. A failed move changes nothing.

use dialquest_data::{ItemId, RoomNumber};
use log::{info, warn};
use variantly::Variantly;

use crate::error::EngineError;
use crate::inventory::Inventory;
use crate::record::{ParsedRoom, parse_room};
use crate::room::{Direction, NO_EXIT, Room};
use crate::store::RoomStore;

/// How granted items already in the inventory are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrantPolicy {
    /// Every grant takes a slot, even for items already held.
    #[default]
    Always,
    /// Grants for items already held are ignored.
    SkipHeld,
}

/// Summary of a completed move into a new room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub from: RoomNumber,
    pub to: RoomNumber,
    pub variant_index: usize,
    pub granted: Vec<ItemId>,
    /// Grants that could not be stored because the inventory was full.
    pub dropped: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum MoveOutcome {
    /// There is no exit that way; nothing changed.
    Stayed,
    Entered(MoveReport),
}

/// Current room plus inventory, and the store rooms are read from.
#[derive(Debug)]
pub struct Navigator<S> {
    store: S,
    room: Room,
    inventory: Inventory,
    grant_policy: GrantPolicy,
}

impl<S: RoomStore> Navigator<S> {
    /// Enter the starting room with an implicit move north.
    ///
    /// # Errors
    /// Any failure to enter `start_room` is returned; the engine cannot run without it.
    pub fn start(store: S, start_room: RoomNumber, grant_policy: GrantPolicy) -> Result<Self, EngineError> {
        let mut nav = Self {
            store,
            room: Room::entrance(start_room),
            inventory: Inventory::new(),
            grant_policy,
        };
        nav.go(Direction::North)?;
        info!("started in room {start_room}");
        Ok(nav)
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn grant_policy(&self) -> GrantPolicy {
        self.grant_policy
    }

    /// Try to leave the current room in `dir`.
    ///
    /// # Errors
    /// - [`EngineError::SourceUnavailable`] (fatal) if the destination's record cannot be opened.
    /// - [`EngineError::TruncatedRecord`] / [`EngineError::NoMatchingVariant`] if it cannot be decoded.
    ///
    /// In every error case the current room and inventory are left as they were.
    pub fn go(&mut self, dir: Direction) -> Result<MoveOutcome, EngineError> {
        let destination = self.room.exit(dir);
        if destination == NO_EXIT {
            info!("no exit {dir} from room {}", self.room.number);
            return Ok(MoveOutcome::Stayed);
        }

        let mut source = self.store.open(destination)?;
        let parsed = parse_room(destination, &mut source, &self.inventory)?;
        Ok(MoveOutcome::Entered(self.enter(parsed)))
    }

    fn enter(&mut self, parsed: ParsedRoom) -> MoveReport {
        let ParsedRoom {
            number,
            title,
            variant_index,
            variant,
        } = parsed;

        let mut granted = Vec::new();
        let mut dropped = Vec::new();
        for item in variant.grants {
            if self.grant_policy == GrantPolicy::SkipHeld && self.inventory.contains(item) {
                continue;
            }
            match self.inventory.add(item) {
                Ok(()) => granted.push(item),
                Err(err) => {
                    warn!("room {number}: grant dropped: {err}");
                    dropped.push(item);
                },
            }
        }

        let from = self.room.number;
        self.room = Room {
            number,
            title,
            description: variant.description,
            exits: variant.exits,
        };
        info!("moved from room {from} to room {number} ({}), variant {variant_index}", self.room.title);

        MoveReport {
            from,
            to: number,
            variant_index,
            granted,
            dropped,
        }
    }
}
