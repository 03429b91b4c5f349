//! Room record decoding and variant selection.
//!
//! A record is a title followed by one or more variants. Variants are tried in
//! file order against the inventory; the first whose required items are all
//! held wins. Rejected variants are skipped field by field so the cursor lands
//! exactly on the next variant's `req_count` byte.

use dialquest_data::{ItemId, RoomNumber};
use log::{debug, trace};

use crate::bounded::RoomText;
use crate::error::EngineError;
use crate::inventory::Inventory;
use crate::room::Exits;
use crate::source::RoomSource;

/// Number of exit bytes closing every variant.
pub const EXIT_BYTES: usize = 4;

/// Content of an accepted variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub description: RoomText,
    pub grants: Vec<ItemId>,
    pub exits: Exits,
}

/// Result of searching a record's variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantScan {
    Matched { index: usize, variant: Variant },
    Exhausted,
}

/// What happened to a single variant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantStep {
    Accepted(Variant),
    /// Rejected; `skipped` is the number of bytes consumed after the
    /// required-item list.
    Rejected { skipped: usize },
}

/// A fully decoded room, ready to replace the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoom {
    pub number: RoomNumber,
    pub title: RoomText,
    pub variant_index: usize,
    pub variant: Variant,
}

/// Streaming decoder over one room's source.
pub struct RecordParser<'a> {
    room: RoomNumber,
    source: &'a mut RoomSource,
}

impl<'a> RecordParser<'a> {
    pub fn new(room: RoomNumber, source: &'a mut RoomSource) -> Self {
        Self { room, source }
    }

    /// Read the length-prefixed title at the start of the record.
    ///
    /// # Errors
    /// [`EngineError::TruncatedRecord`] if the source ends early.
    pub fn read_title(&mut self) -> Result<RoomText, EngineError> {
        let len = self.byte("title length")?;
        self.text("title", len)
    }

    /// Examine the next variant record.
    ///
    /// Returns `Ok(None)` when the source ends where a `req_count` byte was expected.
    ///
    /// # Errors
    /// [`EngineError::TruncatedRecord`] if the source ends inside the variant.
    pub fn step(&mut self, inventory: &Inventory) -> Result<Option<VariantStep>, EngineError> {
        let Some(req_count) = self.source.read_u8() else {
            return Ok(None);
        };

        let mut all_held = true;
        for _ in 0..req_count {
            let item = self.byte("required items")?;
            all_held &= inventory.contains(item);
        }

        if all_held {
            self.accept().map(|variant| Some(VariantStep::Accepted(variant)))
        } else {
            self.reject().map(|skipped| Some(VariantStep::Rejected { skipped }))
        }
    }

    /// Step through variants until one matches or the record runs out.
    ///
    /// # Errors
    /// [`EngineError::TruncatedRecord`] if any variant is cut short.
    pub fn select_variant(&mut self, inventory: &Inventory) -> Result<VariantScan, EngineError> {
        let mut index = 0;
        loop {
            match self.step(inventory)? {
                None => return Ok(VariantScan::Exhausted),
                Some(VariantStep::Accepted(variant)) => {
                    debug!("room {}: variant {index} accepted", self.room);
                    return Ok(VariantScan::Matched { index, variant });
                },
                Some(VariantStep::Rejected { skipped }) => {
                    trace!("room {}: variant {index} rejected, skipped {skipped} bytes", self.room);
                    index += 1;
                },
            }
        }
    }

    fn accept(&mut self) -> Result<Variant, EngineError> {
        let desc_len = self.byte("description length")?;
        let description = self.text("description", desc_len)?;

        let grant_count = self.byte("grant count")?;
        let grants = (0..grant_count)
            .map(|_| self.byte("granted items"))
            .collect::<Result<Vec<_>, _>>()?;

        let mut exits = [0u8; EXIT_BYTES];
        for exit in &mut exits {
            *exit = self.byte("exits")?;
        }

        Ok(Variant {
            description,
            grants,
            exits: Exits::from_array(exits),
        })
    }

    fn reject(&mut self) -> Result<usize, EngineError> {
        let desc_len = usize::from(self.byte("description length")?);
        self.skip_exact("description", desc_len)?;
        let grant_count = usize::from(self.byte("grant count")?);
        self.skip_exact("granted items", grant_count)?;
        self.skip_exact("exits", EXIT_BYTES)?;
        Ok(1 + desc_len + 1 + grant_count + EXIT_BYTES)
    }

    fn byte(&mut self, field: &'static str) -> Result<u8, EngineError> {
        self.source.read_u8().ok_or(EngineError::TruncatedRecord { room: self.room, field })
    }

    fn text(&mut self, field: &'static str, len: u8) -> Result<RoomText, EngineError> {
        let mut text = RoomText::new();
        for _ in 0..len {
            let byte = self.byte(field)?;
            text.push(field, byte)?;
        }
        Ok(text)
    }

    fn skip_exact(&mut self, field: &'static str, n: usize) -> Result<(), EngineError> {
        if self.source.skip(n) == n {
            Ok(())
        } else {
            Err(EngineError::TruncatedRecord { room: self.room, field })
        }
    }
}

/// Decode `room`'s record, selecting the first variant the inventory satisfies.
///
/// The inventory is only read; granting items is left to the caller so that
/// nothing changes unless the whole record decodes.
///
/// # Errors
/// - [`EngineError::TruncatedRecord`] if the record ends inside a declared field.
/// - [`EngineError::NoMatchingVariant`] if no variant's requirements are met.
pub fn parse_room(room: RoomNumber, source: &mut RoomSource, inventory: &Inventory) -> Result<ParsedRoom, EngineError> {
    let mut parser = RecordParser::new(room, source);
    let title = parser.read_title()?;
    match parser.select_variant(inventory)? {
        VariantScan::Matched { index, variant } => Ok(ParsedRoom {
            number: room,
            title,
            variant_index: index,
            variant,
        }),
        VariantScan::Exhausted => Err(EngineError::NoMatchingVariant { room }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Direction;

    fn variant_bytes(req: &[u8], desc: &str, grants: &[u8], exits: [u8; 4]) -> Vec<u8> {
        let mut out = vec![u8::try_from(req.len()).unwrap()];
        out.extend_from_slice(req);
        out.push(u8::try_from(desc.len()).unwrap());
        out.extend_from_slice(desc.as_bytes());
        out.push(u8::try_from(grants.len()).unwrap());
        out.extend_from_slice(grants);
        out.extend_from_slice(&exits);
        out
    }

    fn record(title: &str, variants: &[Vec<u8>]) -> Vec<u8> {
        let mut out = vec![u8::try_from(title.len()).unwrap()];
        out.extend_from_slice(title.as_bytes());
        for v in variants {
            out.extend_from_slice(v);
        }
        out
    }

    fn inventory(items: &[u8]) -> Inventory {
        let mut inv = Inventory::new();
        for item in items {
            inv.add(*item).unwrap();
        }
        inv
    }

    #[test]
    fn rejected_variants_skip_exactly() {
        for n in 0..6 {
            let mut variants: Vec<_> = (0..n)
                .map(|i| variant_bytes(&[200, 201], &"z".repeat(i * 7), &[1, 2, 3][..i % 4], [9, 9, 9, 9]))
                .collect();
            variants.push(variant_bytes(&[], "Found it.", &[42], [1, 2, 3, 4]));
            let mut src = RoomSource::from_bytes(record("Maze", &variants));

            let parsed = parse_room(8, &mut src, &Inventory::new()).unwrap();
            assert_eq!(parsed.variant_index, n);
            assert_eq!(parsed.title, "Maze");
            assert_eq!(parsed.variant.description, "Found it.");
            assert_eq!(parsed.variant.grants, vec![42]);
            assert_eq!(parsed.variant.exits.get(Direction::West), 4);
            assert!(src.at_end());
        }
    }

    #[test]
    fn rejected_step_reports_skip_length() {
        let bytes = [variant_bytes(&[5], "abc", &[6, 7], [0; 4]), vec![0xAA]].concat();
        let mut src = RoomSource::from_bytes(bytes);
        let mut parser = RecordParser::new(1, &mut src);
        let step = parser.step(&Inventory::new()).unwrap();
        assert_eq!(step, Some(VariantStep::Rejected { skipped: 1 + 3 + 1 + 2 + 4 }));
        assert_eq!(src.offset(), 2 + 1 + 3 + 1 + 2 + 4);
        assert_eq!(src.read_u8(), Some(0xAA));
    }

    #[test]
    fn first_satisfied_variant_wins() {
        let bytes = record(
            "Door",
            &[
                variant_bytes(&[1, 2], "both", &[], [0; 4]),
                variant_bytes(&[2], "two", &[], [0; 4]),
                variant_bytes(&[], "none", &[], [0; 4]),
            ],
        );
        let pick = |items: &[u8]| {
            let mut src = RoomSource::from_bytes(bytes.clone());
            parse_room(1, &mut src, &inventory(items)).unwrap().variant.description
        };
        assert_eq!(pick(&[2, 1]), "both");
        assert_eq!(pick(&[2]), "two");
        assert_eq!(pick(&[1]), "none");
        assert_eq!(pick(&[]), "none");
    }

    #[test]
    fn no_catch_all_means_no_match() {
        let bytes = record("Gate", &[variant_bytes(&[3], "open", &[], [0; 4])]);
        let mut src = RoomSource::from_bytes(bytes);
        let err = parse_room(4, &mut src, &Inventory::new()).unwrap_err();
        assert!(matches!(err, EngineError::NoMatchingVariant { room: 4 }));
    }

    #[test]
    fn truncated_title() {
        let mut src = RoomSource::from_bytes(vec![5, b'a', b'b']);
        let err = parse_room(2, &mut src, &Inventory::new()).unwrap_err();
        assert!(matches!(err, EngineError::TruncatedRecord { room: 2, field: "title" }));
    }

    #[test]
    fn truncated_inside_rejected_variant() {
        let mut bytes = record("Hall", &[variant_bytes(&[9], "skip me", &[], [0; 4])]);
        bytes.truncate(bytes.len() - 2);
        let mut src = RoomSource::from_bytes(bytes);
        let err = parse_room(2, &mut src, &Inventory::new()).unwrap_err();
        assert!(matches!(err, EngineError::TruncatedRecord { field: "exits", .. }));
    }

    #[test]
    fn truncated_required_items() {
        let mut src = RoomSource::from_bytes(vec![0, 3, 1]);
        let err = parse_room(2, &mut src, &inventory(&[1])).unwrap_err();
        assert!(matches!(err, EngineError::TruncatedRecord { field: "required items", .. }));
    }

    #[test]
    fn empty_room_record() {
        let mut src = RoomSource::from_bytes(vec![0, 0, 0, 0, 0, 0, 0, 0]);
        let parsed = parse_room(1, &mut src, &Inventory::new()).unwrap();
        assert!(parsed.title.is_empty());
        assert!(parsed.variant.description.is_empty());
        assert!(parsed.variant.grants.is_empty());
        assert!(parsed.variant.exits.mask().is_empty());
    }

    #[test]
    fn byte_255_is_an_ordinary_value() {
        let bytes = record("X", &[variant_bytes(&[255], "max", &[255], [255, 0, 0, 0])]);
        let mut src = RoomSource::from_bytes(bytes);
        let parsed = parse_room(255, &mut src, &inventory(&[255])).unwrap();
        assert_eq!(parsed.variant.grants, vec![255]);
        assert_eq!(parsed.variant.exits.get(Direction::North), 255);
    }
}
