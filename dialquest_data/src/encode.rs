//! Binary room-record encoding.
//!
//! A record is laid out as:
//!
//! ```text
//! title_len u8, title bytes
//! then per variant, in order:
//!   req_count u8, req ids
//!   desc_len u8, desc bytes
//!   grant_count u8, grant ids
//!   north, east, south, west: u8 each
//! ```
//!
//! Every length is a single byte, so no field may exceed 255 entries.

use std::fmt;

use crate::{RoomDef, RoomNumber, VariantDef};

/// Bytes occupied by the four exit fields at the end of every variant.
pub const EXIT_FIELD_LEN: usize = 4;

/// Largest value any length prefix can express.
pub const MAX_FIELD_LEN: usize = u8::MAX as usize;

/// A room that cannot be expressed in the binary format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    FieldTooLong {
        room: RoomNumber,
        field: &'static str,
        len: usize,
    },
    NoVariants {
        room: RoomNumber,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::FieldTooLong { room, field, len } => {
                write!(f, "room {room}: {field} has {len} entries (max {MAX_FIELD_LEN})")
            },
            EncodeError::NoVariants { room } => write!(f, "room {room}: no variants to encode"),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Encode an authored room into its binary record.
///
/// ```
/// use dialquest_data::{ExitsDef, RoomDef, VariantDef, encode_room};
///
/// let room = RoomDef {
///     number: 1,
///     title: "Hall".into(),
///     variants: vec![VariantDef {
///         desc: "Dim.".into(),
///         exits: ExitsDef { north: 2, ..ExitsDef::default() },
///         ..VariantDef::default()
///     }],
/// };
/// let bytes = encode_room(&room).unwrap();
/// assert_eq!(bytes, b"\x04Hall\x00\x04Dim.\x00\x02\x00\x00\x00");
/// ```
///
/// # Errors
/// Returns an error if the room has no variants or if any text or id list is
/// longer than a single length byte can describe.
pub fn encode_room(room: &RoomDef) -> Result<Vec<u8>, EncodeError> {
    if room.variants.is_empty() {
        return Err(EncodeError::NoVariants { room: room.number });
    }

    let mut out = Vec::new();
    push_field(&mut out, room.number, "title", room.title.as_bytes())?;
    for variant in &room.variants {
        encode_variant(&mut out, room.number, variant)?;
    }
    Ok(out)
}

fn encode_variant(out: &mut Vec<u8>, room: RoomNumber, variant: &VariantDef) -> Result<(), EncodeError> {
    push_field(out, room, "required items", &variant.requires)?;
    push_field(out, room, "description", variant.desc.as_bytes())?;
    push_field(out, room, "granted items", &variant.grants)?;
    out.extend_from_slice(&variant.exits.as_array());
    Ok(())
}

fn push_field(out: &mut Vec<u8>, room: RoomNumber, field: &'static str, bytes: &[u8]) -> Result<(), EncodeError> {
    let len = u8::try_from(bytes.len()).map_err(|_| EncodeError::FieldTooLong {
        room,
        field,
        len: bytes.len(),
    })?;
    out.push(len);
    out.extend_from_slice(bytes);
    Ok(())
}
