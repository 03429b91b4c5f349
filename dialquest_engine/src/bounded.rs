//! Fixed-capacity text buffers for room titles and descriptions.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use crate::error::EngineError;

/// Capacity of a room title or description; every length prefix is one byte.
pub const ROOM_TEXT_CAPACITY: usize = u8::MAX as usize;

/// Byte string stored inline with a hard capacity of `N`.
///
/// Writes past capacity fail instead of truncating.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoundedText<const N: usize> {
    data: [u8; N],
    len: usize,
}

/// The buffer used for room titles and descriptions.
pub type RoomText = BoundedText<ROOM_TEXT_CAPACITY>;

impl<const N: usize> BoundedText<N> {
    pub const fn new() -> Self {
        Self { data: [0u8; N], len: 0 }
    }

    /// Copy `src` into a new buffer.
    ///
    /// # Errors
    /// Returns [`EngineError::TextTooLong`] if `src` does not fit.
    pub fn from_bytes(field: &'static str, src: &[u8]) -> Result<Self, EngineError> {
        let mut text = Self::new();
        text.extend(field, src)?;
        Ok(text)
    }

    /// # Errors
    /// Returns [`EngineError::TextTooLong`] if the buffer is already full.
    pub fn push(&mut self, field: &'static str, byte: u8) -> Result<(), EngineError> {
        if self.len == N {
            return Err(self.overflow(field, 1));
        }
        self.data[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Append all of `src`, or nothing if it does not fit.
    ///
    /// # Errors
    /// Returns [`EngineError::TextTooLong`] if the result would exceed `N`.
    pub fn extend(&mut self, field: &'static str, src: &[u8]) -> Result<(), EngineError> {
        if src.len() > N - self.len {
            return Err(self.overflow(field, src.len()));
        }
        self.data[self.len..self.len + src.len()].copy_from_slice(src);
        self.len += src.len();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// The stored text, with invalid UTF-8 replaced.
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }

    fn overflow(&self, field: &'static str, extra: usize) -> EngineError {
        EngineError::TextTooLong {
            field,
            len: self.len + extra,
            max: N,
        }
    }
}

impl<const N: usize> Default for BoundedText<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data[..self.len]
    }
}

impl<const N: usize> PartialEq<&[u8]> for BoundedText<N> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.deref() == *other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.deref() == other.as_bytes()
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str_lossy())
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str_lossy())
    }
}
