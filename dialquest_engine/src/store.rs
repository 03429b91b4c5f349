//! Room stores map a room number to a fresh [`RoomSource`].
//!
//! The directory store reads one file per room; the memory store holds
//! encoded records built from an authored world (or by tests).

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use dialquest_data::{EncodeError, RoomNumber, WorldDef, encode_room};
use log::{debug, info};

use crate::error::EngineError;
use crate::source::RoomSource;

/// Default file name pattern; `{}` is replaced by the room number.
pub const DEFAULT_ROOM_FILE_PATTERN: &str = "room{}.txt";

/// Anything that can open a room's record for a single forward read.
pub trait RoomStore {
    /// Open the record for `room`.
    ///
    /// # Errors
    /// [`EngineError::SourceUnavailable`] if the record cannot be located or opened.
    fn open(&self, room: RoomNumber) -> Result<RoomSource, EngineError>;
}

/// Room records stored as individual files in one directory.
#[derive(Debug, Clone)]
pub struct DirRoomStore {
    dir: PathBuf,
    pattern: String,
}

impl DirRoomStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_pattern(dir, DEFAULT_ROOM_FILE_PATTERN)
    }

    pub fn with_pattern(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            pattern: pattern.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `room`'s record.
    pub fn path_for(&self, room: RoomNumber) -> PathBuf {
        self.dir.join(room_file_name(&self.pattern, room))
    }
}

impl RoomStore for DirRoomStore {
    fn open(&self, room: RoomNumber) -> Result<RoomSource, EngineError> {
        let path = self.path_for(room);
        let file = File::open(&path).map_err(|source| EngineError::SourceUnavailable {
            room,
            path: path.clone(),
            source,
        })?;
        debug!("opened {} for room {room}", path.display());
        Ok(RoomSource::new(file))
    }
}

/// Expand a room file pattern for `room`.
pub fn room_file_name(pattern: &str, room: RoomNumber) -> String {
    pattern.replace("{}", &room.to_string())
}

/// Encoded room records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoomStore {
    records: HashMap<RoomNumber, Vec<u8>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode every room of an authored world.
    ///
    /// # Errors
    /// Returns the first room that cannot be encoded.
    pub fn from_world(world: &WorldDef) -> Result<Self, EncodeError> {
        let mut store = Self::new();
        for room in &world.rooms {
            store.insert(room.number, encode_room(room)?);
        }
        info!("{} rooms encoded into memory store", store.len());
        Ok(store)
    }

    pub fn insert(&mut self, room: RoomNumber, record: impl Into<Vec<u8>>) {
        self.records.insert(room, record.into());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RoomStore for MemoryRoomStore {
    fn open(&self, room: RoomNumber) -> Result<RoomSource, EngineError> {
        self.records
            .get(&room)
            .map(|record| RoomSource::from_bytes(record.clone()))
            .ok_or_else(|| EngineError::SourceUnavailable {
                room,
                path: PathBuf::from(room_file_name(DEFAULT_ROOM_FILE_PATTERN, room)),
                source: io::Error::new(io::ErrorKind::NotFound, "no record in memory store"),
            })
    }
}

impl<S: RoomStore + ?Sized> RoomStore for &S {
    fn open(&self, room: RoomNumber) -> Result<RoomSource, EngineError> {
        (**self).open(room)
    }
}

impl<S: RoomStore + ?Sized> RoomStore for Box<S> {
    fn open(&self, room: RoomNumber) -> Result<RoomSource, EngineError> {
        (**self).open(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn dir_store_reads_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("room32.txt"), [1, b'A']).unwrap();
        let store = DirRoomStore::new(dir.path());
        let mut src = store.open(32).unwrap();
        assert_eq!(src.read_u8(), Some(1));
        assert_eq!(src.read_u8(), Some(b'A'));
        assert!(src.at_end());
    }

    #[test]
    fn dir_store_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirRoomStore::with_pattern(dir.path(), "r{}.bin");
        let err = store.open(3).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(&err, EngineError::SourceUnavailable { path, .. } if path.ends_with("r3.bin")));
    }

    #[test]
    fn memory_store_opens_fresh_sources() {
        let mut store = MemoryRoomStore::new();
        store.insert(5, vec![0, 0]);
        let mut first = store.open(5).unwrap();
        first.skip(2);
        let mut second = store.open(5).unwrap();
        assert_eq!(second.offset(), 0);
        assert_eq!(second.read_u8(), Some(0));
        assert!(store.open(6).is_err());
    }
}
