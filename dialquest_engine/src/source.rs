//! Forward-only byte reader over one room's record.

use std::fmt;
use std::io::{self, BufReader, Cursor, Read};

use log::warn;

/// A single-pass cursor over a room record.
///
/// Only forward reads are possible: [`read_u8`](Self::read_u8),
/// [`skip`](Self::skip) and [`at_end`](Self::at_end). A read error from the
/// underlying stream is logged and ends the source.
pub struct RoomSource {
    reader: BufReader<Box<dyn Read>>,
    peeked: Option<u8>,
    offset: usize,
    ended: bool,
}

impl RoomSource {
    pub fn new(reader: impl Read + 'static) -> Self {
        Self {
            reader: BufReader::new(Box::new(reader)),
            peeked: None,
            offset: 0,
            ended: false,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    /// Next byte, or `None` at end of source.
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = self.peeked.take().or_else(|| self.fetch())?;
        self.offset += 1;
        Some(byte)
    }

    /// Discard up to `n` bytes and return how many were actually skipped.
    pub fn skip(&mut self, n: usize) -> usize {
        let mut skipped = 0;
        while skipped < n && self.read_u8().is_some() {
            skipped += 1;
        }
        skipped
    }

    /// True once no further byte can be read.
    pub fn at_end(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.fetch();
        }
        self.peeked.is_none()
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn fetch(&mut self) -> Option<u8> {
        if self.ended {
            return None;
        }
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => break,
                Ok(_) => return Some(buf[0]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {},
                Err(err) => {
                    warn!("room source read failed at byte {}: {err}", self.offset);
                    break;
                },
            }
        }
        self.ended = true;
        None
    }
}

impl fmt::Debug for RoomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomSource")
            .field("offset", &self.offset)
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}
