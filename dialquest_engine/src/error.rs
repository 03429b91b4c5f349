//! Engine error types.
//!
//! Most failures are local to a single move and leave the current room
//! untouched. A room source that cannot be opened means the deployed data is
//! broken, and the control loop halts on it.

use std::io;
use std::path::PathBuf;

use dialquest_data::{ItemId, RoomNumber};
use thiserror::Error;

/// How the control loop should react to an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Report it and keep showing the previous room.
    Recoverable,
    /// Stop the engine; no valid room state can be produced.
    Unrecoverable,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("room {room}: record ended while reading {field}")]
    TruncatedRecord { room: RoomNumber, field: &'static str },

    #[error("room {room}: no variant matches the current inventory")]
    NoMatchingVariant { room: RoomNumber },

    #[error("inventory is full; item {item} was not added")]
    InventoryFull { item: ItemId },

    #[error("item id 0 is reserved for empty inventory slots")]
    InvalidItem,

    #[error("{field} is {len} bytes long (max {max})")]
    TextTooLong { field: &'static str, len: usize, max: usize },

    #[error("room {room}: source {} unavailable: {source}", .path.display())]
    SourceUnavailable {
        room: RoomNumber,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    pub fn severity(&self) -> Severity {
        match self {
            EngineError::SourceUnavailable { .. } => Severity::Unrecoverable,
            EngineError::TruncatedRecord { .. }
            | EngineError::NoMatchingVariant { .. }
            | EngineError::InventoryFull { .. }
            | EngineError::InvalidItem
            | EngineError::TextTooLong { .. } => Severity::Recoverable,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Unrecoverable
    }
}
